//! Public service catalog. No auth required; the booking call-to-action only
//! shows for logged-in visitors.

use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;
use yew_router::prelude::*;

use crate::api;
use crate::models::{format_duration, format_price, Service};
use crate::session::use_session;
use crate::utils::{use_alive, ErrorBanner};
use crate::Route;

#[function_component(Services)]
pub fn services() -> Html {
    let session = use_session();
    let list = use_state(Vec::<Service>::new);
    let loading = use_state(|| true);
    let error = use_state(|| None::<String>);
    // Bumped by "Try Again" to re-run the fetch effect.
    let attempt = use_state(|| 0u32);
    let alive = use_alive();

    {
        let list = list.clone();
        let loading = loading.clone();
        let error = error.clone();
        let alive = alive.clone();
        use_effect_with(*attempt, move |_| {
            loading.set(true);
            error.set(None);
            spawn_local(async move {
                let result = api::services::list().await;
                if !alive.get() {
                    return;
                }
                loading.set(false);
                match result {
                    Ok(services) => list.set(services),
                    Err(err) => error.set(Some(err.to_string())),
                }
            });
            || ()
        });
    }

    let on_retry = {
        let attempt = attempt.clone();
        Callback::from(move |_| attempt.set(*attempt + 1))
    };

    let logged_in = session.current().is_some();

    html! {
        <div class="page services-page">
            <h1>{"Our Services"}</h1>
            {
                if let Some(message) = (*error).clone() {
                    html!(<ErrorBanner {message} on_retry={Some(on_retry)} />)
                } else if *loading {
                    html!(<p class="loading">{"Loading services…"}</p>)
                } else if list.is_empty() {
                    html!(<p class="empty">{"No services available right now."}</p>)
                } else {
                    html! {
                        <div class="card-grid">
                            { for list.iter().map(|service| html! {
                                <div class="card service-card" key={service.id}>
                                    <h3>{ &service.name }</h3>
                                    <p class="description">{ service.description.clone().unwrap_or_default() }</p>
                                    <p class="price">{ format_price(service.price, &service.currency) }</p>
                                    <p class="duration">{ format_duration(service.duration_minutes) }</p>
                                    {
                                        if logged_in {
                                            html!(<Link<Route> to={Route::Book} classes="button button-primary">{"Book"}</Link<Route>>)
                                        } else {
                                            Html::default()
                                        }
                                    }
                                </div>
                            })}
                        </div>
                    }
                }
            }
        </div>
    }
}
