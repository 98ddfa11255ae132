//! Booking form: pick a service and a vehicle, choose a time, add notes.
//! Accepts `?vehicle=<id>` to preselect a vehicle (the fleet page links here).

use serde::Deserialize;
use wasm_bindgen_futures::spawn_local;
use web_sys::{HtmlInputElement, HtmlSelectElement, HtmlTextAreaElement};
use yew::prelude::*;
use yew_router::prelude::*;

use crate::api;
use crate::guard::use_require_session;
use crate::models::{format_duration, format_price, CreateBookingRequest, Service, Vehicle};
use crate::session::use_session;
use crate::utils::{surface_error, use_alive, ErrorBanner};
use crate::Route;

#[derive(Debug, Default, Deserialize)]
struct BookQuery {
    vehicle: Option<i64>,
}

#[function_component(Book)]
pub fn book() -> Html {
    let current = use_require_session(None);
    let session = use_session();
    let navigator = use_navigator().expect("router context missing");
    let location = use_location();

    let preselected_vehicle = location
        .and_then(|loc| loc.query::<BookQuery>().ok())
        .unwrap_or_default()
        .vehicle;

    let services = use_state(Vec::<Service>::new);
    let vehicles = use_state(Vec::<Vehicle>::new);
    let service_id = use_state(|| None::<i64>);
    let vehicle_id = use_state(|| preselected_vehicle);
    let datetime_ref = use_node_ref();
    let notes_ref = use_node_ref();
    let error = use_state(|| None::<String>);
    let form_error = use_state(String::new);
    let success = use_state(|| None::<String>);
    let submitting = use_state(|| false);
    let attempt = use_state(|| 0u32);
    let alive = use_alive();

    {
        let services = services.clone();
        let vehicles = vehicles.clone();
        let error = error.clone();
        let session = session.clone();
        let navigator = navigator.clone();
        let alive = alive.clone();
        let logged_in = current.is_some();
        use_effect_with((*attempt, logged_in), move |&(_, logged_in)| {
            if logged_in {
                spawn_local(async move {
                    let loaded_services = api::services::list().await;
                    let loaded_vehicles = api::vehicles::list().await;
                    if !alive.get() {
                        return;
                    }
                    match (loaded_services, loaded_vehicles) {
                        (Ok(s), Ok(v)) => {
                            services.set(s);
                            vehicles.set(v);
                        }
                        (Err(err), _) | (_, Err(err)) => {
                            surface_error(&err, &session, &navigator, &error)
                        }
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

    let on_service_change = {
        let service_id = service_id.clone();
        Callback::from(move |ev: Event| {
            let value = ev.target_unchecked_into::<HtmlSelectElement>().value();
            service_id.set(value.parse::<i64>().ok());
        })
    };

    let on_vehicle_change = {
        let vehicle_id = vehicle_id.clone();
        Callback::from(move |ev: Event| {
            let value = ev.target_unchecked_into::<HtmlSelectElement>().value();
            vehicle_id.set(value.parse::<i64>().ok());
        })
    };

    let onsubmit = {
        let session = session.clone();
        let navigator = navigator.clone();
        let service_id = service_id.clone();
        let vehicle_id = vehicle_id.clone();
        let datetime_ref = datetime_ref.clone();
        let notes_ref = notes_ref.clone();
        let error = error.clone();
        let form_error = form_error.clone();
        let success = success.clone();
        let submitting = submitting.clone();
        let alive = alive.clone();

        Callback::from(move |ev: SubmitEvent| {
            ev.prevent_default();
            success.set(None);

            let booking_date_time = datetime_ref
                .cast::<HtmlInputElement>()
                .map(|input| input.value())
                .unwrap_or_default();
            let notes = notes_ref
                .cast::<HtmlTextAreaElement>()
                .map(|area| area.value())
                .unwrap_or_default();

            let (Some(service), Some(vehicle)) = (*service_id, *vehicle_id) else {
                form_error.set("Select a service and a vehicle".to_string());
                return;
            };
            if booking_date_time.is_empty() {
                form_error.set("Pick a date and time".to_string());
                return;
            }

            form_error.set(String::new());
            submitting.set(true);

            let body = CreateBookingRequest {
                service_id: service,
                vehicle_id: vehicle,
                booking_date_time,
                notes,
            };

            let session = session.clone();
            let navigator = navigator.clone();
            let service_id = service_id.clone();
            let vehicle_id = vehicle_id.clone();
            let error = error.clone();
            let success = success.clone();
            let submitting = submitting.clone();
            let alive = alive.clone();

            spawn_local(async move {
                let result = api::bookings::create(&body).await;
                if !alive.get() {
                    return;
                }
                submitting.set(false);
                match result {
                    Ok(()) => {
                        service_id.set(None);
                        vehicle_id.set(None);
                        success.set(Some(
                            "Booking created — track it under My Bookings".to_string(),
                        ));
                    }
                    Err(err) => surface_error(&err, &session, &navigator, &error),
                }
            });
        })
    };

    if current.is_none() {
        return Html::default();
    }

    let selected_service = service_id.and_then(|id| services.iter().find(|s| s.id == id).cloned());

    html! {
        <div class="page book-page">
            <h1>{"Book a Service"}</h1>
            {
                if let Some(message) = (*error).clone() {
                    html!(<ErrorBanner {message} on_retry={Some(on_retry)} />)
                } else {
                    Html::default()
                }
            }
            {
                if let Some(message) = (*success).clone() {
                    html!(<p class="form-notice">{ message }</p>)
                } else {
                    Html::default()
                }
            }

            <form onsubmit={onsubmit} class="card booking-form">
                <label>{"Service"}</label>
                <select onchange={on_service_change}>
                    <option value="" selected={service_id.is_none()}>{"-- choose a service --"}</option>
                    { for services.iter().map(|s| html! {
                        <option value={s.id.to_string()} selected={*service_id == Some(s.id)} key={s.id}>
                            { format!("{} ({})", s.name, format_price(s.price, &s.currency)) }
                        </option>
                    })}
                </select>

                <label>{"Vehicle"}</label>
                {
                    if vehicles.is_empty() {
                        html! {
                            <p class="empty">
                                {"No vehicles on file yet. "}
                                <Link<Route> to={Route::Vehicles}>{"Add one first"}</Link<Route>>
                            </p>
                        }
                    } else {
                        html! {
                            <select onchange={on_vehicle_change}>
                                <option value="" selected={vehicle_id.is_none()}>{"-- choose a vehicle --"}</option>
                                { for vehicles.iter().map(|v| html! {
                                    <option value={v.id.to_string()} selected={*vehicle_id == Some(v.id)} key={v.id}>
                                        { format!("{} {} - {}", v.make, v.model, v.license_plate) }
                                    </option>
                                })}
                            </select>
                        }
                    }
                }

                <label>{"Date & Time"}</label>
                <input ref={datetime_ref} type="datetime-local" />

                <label>{"Notes (optional)"}</label>
                <textarea ref={notes_ref} placeholder="Anything we should know?"></textarea>

                {
                    if !form_error.is_empty() {
                        html!(<p class="form-error">{ &*form_error }</p>)
                    } else {
                        Html::default()
                    }
                }

                <button type="submit" class="button button-primary" disabled={*submitting}>
                    { if *submitting { "Booking…" } else { "Confirm Booking" } }
                </button>
            </form>

            {
                if let Some(service) = selected_service {
                    html! {
                        <div class="card service-preview">
                            <h3>{ &service.name }</h3>
                            <p>{ service.description.clone().unwrap_or_default() }</p>
                            <p class="price">{ format_price(service.price, &service.currency) }</p>
                            <p class="duration">{ format_duration(service.duration_minutes) }</p>
                        </div>
                    }
                } else {
                    Html::default()
                }
            }
        </div>
    }
}
