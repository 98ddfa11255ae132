use yew::prelude::*;
use yew_router::prelude::*;

mod api;
mod guard;
mod models;
mod nav;
mod session;
mod utils;

// Pages
mod admin;
mod book;
mod dashboard;
mod home;
mod login;
mod my_bookings;
mod register;
mod services;
mod staff;
mod vehicles;

/* -------------------- routing -------------------- */

#[derive(Routable, Clone, PartialEq, Eq, Debug)]
pub enum Route {
    #[at("/")]
    Home,
    #[at("/login")]
    Login,
    #[at("/register")]
    Register,
    #[at("/services")]
    Services,
    #[at("/dashboard")]
    Dashboard,
    #[at("/book")]
    Book,
    #[at("/vehicles")]
    Vehicles,
    #[at("/bookings")]
    MyBookings,
    #[at("/staff")]
    Staff,
    #[at("/admin")]
    Admin,
    #[not_found]
    #[at("/404")]
    NotFound,
}

fn switch(route: Route) -> Html {
    match route {
        Route::Home => html!(<home::Home />),
        Route::Login => html!(<login::Login />),
        Route::Register => html!(<register::Register />),
        Route::Services => html!(<services::Services />),
        Route::Dashboard => html!(<guard::Guarded><dashboard::Dashboard /></guard::Guarded>),
        Route::Book => html!(<guard::Guarded><book::Book /></guard::Guarded>),
        Route::Vehicles => html!(<guard::Guarded><vehicles::Vehicles /></guard::Guarded>),
        Route::MyBookings => html!(<guard::Guarded><my_bookings::MyBookings /></guard::Guarded>),
        Route::Staff => html!(<guard::Guarded><staff::StaffDashboard /></guard::Guarded>),
        Route::Admin => html!(<guard::Guarded><admin::AdminDashboard /></guard::Guarded>),
        // Unknown paths fall back to the public landing page.
        Route::NotFound => html!(<Redirect<Route> to={Route::Home} />),
    }
}

/* -------------------- entry point ---------------- */

#[function_component(App)]
fn app() -> Html {
    html! {
        <session::SessionProvider>
            <BrowserRouter>
                <nav::Navbar />
                <main class="main-content">
                    <Switch<Route> render={switch} />
                </main>
            </BrowserRouter>
        </session::SessionProvider>
    }
}

fn main() {
    yew::Renderer::<App>::new().render();
}
