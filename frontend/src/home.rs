use yew::prelude::*;
use yew_router::prelude::*;

use crate::session::use_session;
use crate::Route;

#[function_component(Home)]
pub fn home() -> Html {
    let session = use_session();
    let logged_in = session.current().is_some();

    html! {
        <div class="home">
            <section class="hero">
                <h1>{"Sparkling clean, on your schedule"}</h1>
                <p>{"Browse our wash packages, register your vehicles and book an appointment in minutes."}</p>
                <div class="hero-actions">
                    <Link<Route> to={Route::Services} classes="button">{"View Services"}</Link<Route>>
                    {
                        if logged_in {
                            html!(<Link<Route> to={Route::Book} classes="button button-primary">{"Book a Wash"}</Link<Route>>)
                        } else {
                            html!(<Link<Route> to={Route::Login} classes="button button-primary">{"Login to Book"}</Link<Route>>)
                        }
                    }
                </div>
            </section>
            <section class="home-highlights">
                <div class="highlight-card">
                    <h3>{"Pick a package"}</h3>
                    <p>{"From a quick exterior rinse to full interior detailing."}</p>
                </div>
                <div class="highlight-card">
                    <h3>{"Bring any vehicle"}</h3>
                    <p>{"Sedans, SUVs, trucks, vans and motorcycles are all welcome."}</p>
                </div>
                <div class="highlight-card">
                    <h3>{"Track your bookings"}</h3>
                    <p>{"Cancel while pending, rate the wash when it's done."}</p>
                </div>
            </section>
        </div>
    }
}
