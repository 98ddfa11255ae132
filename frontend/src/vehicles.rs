//! The caller's vehicle list: view, add, delete, and jump into booking with a
//! vehicle preselected.

use gloo_dialogs::confirm;
use serde::Serialize;
use wasm_bindgen_futures::spawn_local;
use web_sys::{HtmlInputElement, HtmlSelectElement};
use yew::prelude::*;
use yew_router::prelude::*;

use crate::api;
use crate::guard::use_require_session;
use crate::models::{Vehicle, VehiclePayload, VehicleType};
use crate::session::use_session;
use crate::utils::{surface_error, use_alive, ErrorBanner};
use crate::Route;

#[derive(Serialize)]
struct BookQuery {
    vehicle: i64,
}

#[function_component(Vehicles)]
pub fn vehicles() -> Html {
    let current = use_require_session(None);
    let session = use_session();
    let navigator = use_navigator().expect("router context missing");

    let list = use_state(Vec::<Vehicle>::new);
    let loading = use_state(|| true);
    let error = use_state(|| None::<String>);
    let form_error = use_state(String::new);
    let attempt = use_state(|| 0u32);
    let alive = use_alive();

    let make_ref = use_node_ref();
    let model_ref = use_node_ref();
    let plate_ref = use_node_ref();
    let color_ref = use_node_ref();
    let type_ref = use_node_ref();

    {
        let list = list.clone();
        let loading = loading.clone();
        let error = error.clone();
        let session = session.clone();
        let navigator = navigator.clone();
        let alive = alive.clone();
        let logged_in = current.is_some();
        use_effect_with((*attempt, logged_in), move |&(_, logged_in)| {
            if logged_in {
                loading.set(true);
                spawn_local(async move {
                    let result = api::vehicles::list().await;
                    if !alive.get() {
                        return;
                    }
                    loading.set(false);
                    match result {
                        Ok(vehicles) => list.set(vehicles),
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

    let on_add = {
        let session = session.clone();
        let navigator = navigator.clone();
        let list = list.clone();
        let error = error.clone();
        let form_error = form_error.clone();
        let make_ref = make_ref.clone();
        let model_ref = model_ref.clone();
        let plate_ref = plate_ref.clone();
        let color_ref = color_ref.clone();
        let type_ref = type_ref.clone();
        let alive = alive.clone();

        Callback::from(move |ev: SubmitEvent| {
            ev.prevent_default();

            let value = |node: &NodeRef| {
                node.cast::<HtmlInputElement>()
                    .map(|input| input.value())
                    .unwrap_or_default()
            };
            let make = value(&make_ref);
            let model = value(&model_ref);
            let license_plate = value(&plate_ref);
            let color = value(&color_ref);
            let vehicle_type = type_ref
                .cast::<HtmlSelectElement>()
                .and_then(|select| VehicleType::parse(&select.value()))
                .unwrap_or(VehicleType::Sedan);

            if make.trim().is_empty() || model.trim().is_empty() || license_plate.trim().is_empty()
            {
                form_error.set("Make, model and license plate are required".to_string());
                return;
            }
            form_error.set(String::new());

            let body = VehiclePayload {
                make: make.trim().to_string(),
                model: model.trim().to_string(),
                license_plate: license_plate.trim().to_string(),
                color: color.trim().to_string(),
                vehicle_type,
            };

            let session = session.clone();
            let navigator = navigator.clone();
            let list = list.clone();
            let error = error.clone();
            let make_ref = make_ref.clone();
            let model_ref = model_ref.clone();
            let plate_ref = plate_ref.clone();
            let color_ref = color_ref.clone();
            let alive = alive.clone();

            spawn_local(async move {
                let result = api::vehicles::create(&body).await;
                if !alive.get() {
                    return;
                }
                match result {
                    Ok(created) => {
                        let mut vehicles = (*list).clone();
                        vehicles.push(created);
                        list.set(vehicles);
                        for node in [&make_ref, &model_ref, &plate_ref, &color_ref] {
                            if let Some(input) = node.cast::<HtmlInputElement>() {
                                input.set_value("");
                            }
                        }
                    }
                    Err(err) => surface_error(&err, &session, &navigator, &error),
                }
            });
        })
    };

    let on_delete = {
        let session = session.clone();
        let navigator = navigator.clone();
        let list = list.clone();
        let error = error.clone();
        let alive = alive.clone();

        Callback::from(move |id: i64| {
            if !confirm("Delete this vehicle?") {
                return;
            }
            let session = session.clone();
            let navigator = navigator.clone();
            let list = list.clone();
            let error = error.clone();
            let alive = alive.clone();

            spawn_local(async move {
                let result = api::vehicles::delete(id).await;
                if !alive.get() {
                    return;
                }
                match result {
                    Ok(()) => {
                        let vehicles: Vec<Vehicle> =
                            list.iter().filter(|v| v.id != id).cloned().collect();
                        list.set(vehicles);
                    }
                    Err(err) => surface_error(&err, &session, &navigator, &error),
                }
            });
        })
    };

    if current.is_none() {
        return Html::default();
    }

    html! {
        <div class="page vehicles-page">
            <h1>{"My Vehicles"}</h1>
            {
                if let Some(message) = (*error).clone() {
                    html!(<ErrorBanner {message} on_retry={Some(on_retry)} />)
                } else {
                    Html::default()
                }
            }

            <form onsubmit={on_add} class="card vehicle-form">
                <h2>{"Add a vehicle"}</h2>
                <label>{"Make"}</label>
                <input ref={make_ref} type="text" placeholder="Toyota" />
                <label>{"Model"}</label>
                <input ref={model_ref} type="text" placeholder="Corolla" />
                <label>{"License Plate"}</label>
                <input ref={plate_ref} type="text" placeholder="KAA 123A" />
                <label>{"Color"}</label>
                <input ref={color_ref} type="text" placeholder="Silver" />
                <label>{"Type"}</label>
                <select ref={type_ref}>
                    { for VehicleType::ALL.iter().map(|t| html! {
                        <option value={t.as_str()} key={t.as_str()}>{ t.as_str() }</option>
                    })}
                </select>
                {
                    if !form_error.is_empty() {
                        html!(<p class="form-error">{ &*form_error }</p>)
                    } else {
                        Html::default()
                    }
                }
                <button type="submit" class="button button-primary">{"Add Vehicle"}</button>
            </form>

            {
                if *loading {
                    html!(<p class="loading">{"Loading vehicles…"}</p>)
                } else if list.is_empty() {
                    html!(<p class="empty">{"No vehicles yet — add your first one above."}</p>)
                } else {
                    html! {
                        <div class="card-grid">
                            { for list.iter().map(|vehicle| {
                                let id = vehicle.id;
                                let on_delete = on_delete.clone();
                                let delete = Callback::from(move |_| on_delete.emit(id));
                                let book = {
                                    let navigator = navigator.clone();
                                    Callback::from(move |_| {
                                        let _ = navigator
                                            .push_with_query(&Route::Book, &BookQuery { vehicle: id });
                                    })
                                };
                                html! {
                                    <div class="card vehicle-card" key={vehicle.id}>
                                        <h3>{ format!("{} {}", vehicle.make, vehicle.model) }</h3>
                                        <p>{ format!("Plate: {}", vehicle.license_plate) }</p>
                                        <p>{ format!("Color: {}", vehicle.color.clone().unwrap_or_else(|| "-".to_string())) }</p>
                                        <p>{ format!("Type: {}", vehicle.vehicle_type.as_str()) }</p>
                                        <div class="card-actions">
                                            <button class="button" onclick={book}>{"Book a wash"}</button>
                                            <button class="button button-danger" onclick={delete}>{"Delete"}</button>
                                        </div>
                                    </div>
                                }
                            })}
                        </div>
                    }
                }
            }
        </div>
    }
}
