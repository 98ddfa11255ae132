//! Landing page for any logged-in user: profile summary, profile update form
//! and role-appropriate quick links.

use wasm_bindgen_futures::spawn_local;
use web_sys::HtmlInputElement;
use yew::prelude::*;
use yew_router::prelude::*;

use crate::api;
use crate::guard::use_require_session;
use crate::models::{Role, UpdateProfileRequest, UserProfile};
use crate::session::use_session;
use crate::utils::{surface_error, use_alive, ErrorBanner};
use crate::Route;

#[function_component(Dashboard)]
pub fn dashboard() -> Html {
    // Independent re-check on mount; the router guard is not trusted to be
    // the only gate in front of this page.
    let current = use_require_session(None);
    let session = use_session();
    let navigator = use_navigator().expect("router context missing");

    let profile = use_state(|| None::<UserProfile>);
    let error = use_state(|| None::<String>);
    let notice = use_state(|| None::<String>);
    let attempt = use_state(|| 0u32);
    let alive = use_alive();

    let name_ref = use_node_ref();
    let phone_ref = use_node_ref();

    {
        let profile = profile.clone();
        let error = error.clone();
        let session = session.clone();
        let navigator = navigator.clone();
        let alive = alive.clone();
        let logged_in = current.is_some();
        use_effect_with((*attempt, logged_in), move |&(_, logged_in)| {
            if logged_in {
                spawn_local(async move {
                    let result = api::users::profile().await;
                    if !alive.get() {
                        return;
                    }
                    match result {
                        Ok(p) => profile.set(Some(p)),
                        Err(err) => surface_error(&err, &session, &navigator, &error),
                    }
                });
            }
            || ()
        });
    }

    let on_retry = {
        let attempt = attempt.clone();
        Callback::from(move |_| attempt.set(*attempt + 1))
    };

    let on_update = {
        let session = session.clone();
        let navigator = navigator.clone();
        let profile = profile.clone();
        let error = error.clone();
        let notice = notice.clone();
        let name_ref = name_ref.clone();
        let phone_ref = phone_ref.clone();
        let alive = alive.clone();

        Callback::from(move |ev: SubmitEvent| {
            ev.prevent_default();

            let full_name = name_ref
                .cast::<HtmlInputElement>()
                .map(|input| input.value())
                .unwrap_or_default();
            let phone_number = phone_ref
                .cast::<HtmlInputElement>()
                .map(|input| input.value())
                .unwrap_or_default();

            if full_name.trim().is_empty() {
                notice.set(None);
                error.set(Some("Full name cannot be empty".to_string()));
                return;
            }

            let body = UpdateProfileRequest {
                full_name: full_name.trim().to_string(),
                phone_number: phone_number.trim().to_string(),
            };

            let session = session.clone();
            let navigator = navigator.clone();
            let profile = profile.clone();
            let error = error.clone();
            let notice = notice.clone();
            let alive = alive.clone();

            spawn_local(async move {
                let result = api::users::update_profile(&body).await;
                if !alive.get() {
                    return;
                }
                match result {
                    Ok(updated) => {
                        profile.set(Some(updated));
                        error.set(None);
                        notice.set(Some("Profile updated".to_string()));
                    }
                    Err(err) => {
                        notice.set(None);
                        surface_error(&err, &session, &navigator, &error);
                    }
                }
            });
        })
    };

    let Some(current) = current else {
        // Redirect already queued by the guard hook.
        return Html::default();
    };

    let quick_links = match current.role() {
        Role::Customer => html! {
            <div class="quick-links">
                <Link<Route> to={Route::Book} classes="button button-primary">{"Book a Service"}</Link<Route>>
                <Link<Route> to={Route::MyBookings} classes="button">{"My Bookings"}</Link<Route>>
                <Link<Route> to={Route::Vehicles} classes="button">{"My Vehicles"}</Link<Route>>
            </div>
        },
        Role::Staff => html! {
            <div class="quick-links">
                <Link<Route> to={Route::Staff} classes="button button-primary">{"Staff Dashboard"}</Link<Route>>
            </div>
        },
        Role::Admin => html! {
            <div class="quick-links">
                <Link<Route> to={Route::Admin} classes="button button-primary">{"Admin Dashboard"}</Link<Route>>
            </div>
        },
    };

    html! {
        <div class="page dashboard-page">
            <h1>{ format!("Welcome, {}", current.user.full_name) }</h1>
            {
                if let Some(message) = (*error).clone() {
                    html!(<ErrorBanner {message} on_retry={Some(on_retry)} />)
                } else {
                    Html::default()
                }
            }
            { quick_links }
            {
                if let Some(profile) = &*profile {
                    html! {
                        <div class="card profile-card">
                            <h2>{"Your Profile"}</h2>
                            <p>{ format!("Email: {}", profile.email) }</p>
                            <p>{ format!("Role: {}", profile.role) }</p>
                            {
                                if let Some(message) = (*notice).clone() {
                                    html!(<p class="form-notice">{ message }</p>)
                                } else {
                                    Html::default()
                                }
                            }
                            <form onsubmit={on_update}>
                                <label>{"Full Name"}</label>
                                <input ref={name_ref} type="text" value={profile.full_name.clone()} />
                                <label>{"Phone Number"}</label>
                                <input ref={phone_ref} type="tel" value={profile.phone_number.clone().unwrap_or_default()} />
                                <button type="submit" class="button">{"Update Profile"}</button>
                            </form>
                        </div>
                    }
                } else {
                    html!(<p class="loading">{"Loading profile…"}</p>)
                }
            }
        </div>
    }
}
