//! Admin panel: overview statistics and service-catalog management. Only the
//! ADMIN role may render this page; everyone else is bounced by both the
//! router guard and the mount-time re-check below. Real authorization still
//! happens server-side — the /services mutations are admin-only endpoints.

use gloo_dialogs::confirm;
use wasm_bindgen_futures::spawn_local;
use web_sys::{HtmlInputElement, HtmlSelectElement, HtmlTextAreaElement};
use yew::prelude::*;
use yew_router::prelude::*;

use crate::api;
use crate::guard::use_require_session;
use crate::models::{format_price, Role, Service, ServicePayload, UserProfile};
use crate::session::use_session;
use crate::utils::{surface_error, use_alive, ErrorBanner};

const CURRENCIES: [&str; 3] = ["KES", "USD", "EUR"];

#[derive(Clone, Copy, PartialEq, Eq)]
enum Tab {
    Stats,
    Services,
}

/// Placeholder numbers until the reporting endpoints exist; displayed as-is.
struct Stats {
    total_users: u32,
    total_customers: u32,
    total_staff: u32,
    total_admins: u32,
    total_bookings: u32,
    pending_bookings: u32,
    completed_bookings: u32,
    total_revenue: f64,
    currency: &'static str,
}

fn placeholder_stats() -> Stats {
    Stats {
        total_users: 45,
        total_customers: 32,
        total_staff: 10,
        total_admins: 3,
        total_bookings: 156,
        pending_bookings: 12,
        completed_bookings: 120,
        total_revenue: 254_700.0,
        currency: "KES",
    }
}

fn validate_service(
    name: &str,
    description: &str,
    price: &str,
    duration: &str,
    currency: &str,
) -> Result<ServicePayload, String> {
    if name.trim().is_empty() {
        return Err("Service name is required".to_string());
    }
    let price: f64 = price
        .trim()
        .parse()
        .map_err(|_| "Price must be a number".to_string())?;
    if price <= 0.0 {
        return Err("Price must be greater than zero".to_string());
    }
    let duration_minutes: u32 = duration
        .trim()
        .parse()
        .map_err(|_| "Duration must be whole minutes".to_string())?;
    if duration_minutes == 0 {
        return Err("Duration must be greater than zero".to_string());
    }
    Ok(ServicePayload {
        name: name.trim().to_string(),
        description: description.trim().to_string(),
        price,
        currency: currency.to_string(),
        duration_minutes,
    })
}

#[function_component(AdminDashboard)]
pub fn admin_dashboard() -> Html {
    let current = use_require_session(Some(Role::Admin));
    let session = use_session();
    let navigator = use_navigator().expect("router context missing");

    let tab = use_state(|| Tab::Stats);
    let profile = use_state(|| None::<UserProfile>);
    let services = use_state(Vec::<Service>::new);
    let editing = use_state(|| None::<Service>);
    let error = use_state(|| None::<String>);
    let form_error = use_state(String::new);
    let attempt = use_state(|| 0u32);
    let alive = use_alive();

    let name_ref = use_node_ref();
    let description_ref = use_node_ref();
    let price_ref = use_node_ref();
    let duration_ref = use_node_ref();
    let currency_ref = use_node_ref();

    // Profile card, loaded once on mount.
    {
        let profile = profile.clone();
        let error = error.clone();
        let session = session.clone();
        let navigator = navigator.clone();
        let alive = alive.clone();
        let is_admin = current.is_some();
        use_effect_with(is_admin, move |&is_admin| {
            if is_admin {
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

    // Service catalog, reloaded when the tab opens or after a retry.
    {
        let services = services.clone();
        let error = error.clone();
        let session = session.clone();
        let navigator = navigator.clone();
        let alive = alive.clone();
        let wanted = current.is_some() && *tab == Tab::Services;
        use_effect_with((*attempt, wanted), move |&(_, wanted)| {
            if wanted {
                spawn_local(async move {
                    let result = api::services::list().await;
                    if !alive.get() {
                        return;
                    }
                    match result {
                        Ok(list) => services.set(list),
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

    let select_tab = |target: Tab| {
        let tab = tab.clone();
        Callback::from(move |_| tab.set(target))
    };

    let on_edit = {
        let editing = editing.clone();
        let services = services.clone();
        Callback::from(move |id: i64| {
            let selected = services.iter().find(|s| s.id == id).cloned();
            editing.set(selected);
        })
    };

    let on_cancel_edit = {
        let editing = editing.clone();
        let form_error = form_error.clone();
        Callback::from(move |_| {
            editing.set(None);
            form_error.set(String::new());
        })
    };

    let on_delete = {
        let session = session.clone();
        let navigator = navigator.clone();
        let services = services.clone();
        let error = error.clone();
        let alive = alive.clone();

        Callback::from(move |id: i64| {
            if !confirm("Delete this service from the catalog?") {
                return;
            }
            let session = session.clone();
            let navigator = navigator.clone();
            let services = services.clone();
            let error = error.clone();
            let alive = alive.clone();

            spawn_local(async move {
                let result = api::services::delete(id).await;
                if !alive.get() {
                    return;
                }
                match result {
                    Ok(()) => {
                        let remaining: Vec<Service> =
                            services.iter().filter(|s| s.id != id).cloned().collect();
                        services.set(remaining);
                    }
                    Err(err) => surface_error(&err, &session, &navigator, &error),
                }
            });
        })
    };

    let on_save = {
        let session = session.clone();
        let navigator = navigator.clone();
        let services = services.clone();
        let editing = editing.clone();
        let error = error.clone();
        let form_error = form_error.clone();
        let attempt = attempt.clone();
        let name_ref = name_ref.clone();
        let description_ref = description_ref.clone();
        let price_ref = price_ref.clone();
        let duration_ref = duration_ref.clone();
        let currency_ref = currency_ref.clone();
        let alive = alive.clone();

        Callback::from(move |ev: SubmitEvent| {
            ev.prevent_default();

            let input = |node: &NodeRef| {
                node.cast::<HtmlInputElement>()
                    .map(|i| i.value())
                    .unwrap_or_default()
            };
            let description = description_ref
                .cast::<HtmlTextAreaElement>()
                .map(|a| a.value())
                .unwrap_or_default();
            let currency = currency_ref
                .cast::<HtmlSelectElement>()
                .map(|s| s.value())
                .unwrap_or_else(|| "KES".to_string());

            let body = match validate_service(
                &input(&name_ref),
                &description,
                &input(&price_ref),
                &input(&duration_ref),
                &currency,
            ) {
                Ok(body) => body,
                Err(message) => {
                    form_error.set(message);
                    return;
                }
            };
            form_error.set(String::new());

            let target = editing.as_ref().map(|s| s.id);
            let session = session.clone();
            let navigator = navigator.clone();
            let services = services.clone();
            let editing = editing.clone();
            let error = error.clone();
            let attempt = attempt.clone();
            let alive = alive.clone();

            spawn_local(async move {
                let result = match target {
                    Some(id) => api::services::update(id, &body).await,
                    None => api::services::create(&body).await,
                };
                if !alive.get() {
                    return;
                }
                match result {
                    Ok(saved) => {
                        let mut list = (*services).clone();
                        match list.iter_mut().find(|s| s.id == saved.id) {
                            Some(slot) => *slot = saved,
                            None => list.push(saved),
                        }
                        services.set(list);
                        editing.set(None);
                        // Re-run the catalog fetch so the list reflects any
                        // server-side normalization.
                        attempt.set(*attempt + 1);
                    }
                    Err(err) => surface_error(&err, &session, &navigator, &error),
                }
            });
        })
    };

    let Some(current) = current else {
        return Html::default();
    };

    let stats = placeholder_stats();
    let editing_service = (*editing).clone();

    html! {
        <div class="page admin-page">
            <h1>{"Admin Dashboard"}</h1>
            <p class="subtitle">{ format!("Signed in as {} ({})", current.user.full_name, current.role()) }</p>

            {
                if let Some(message) = (*error).clone() {
                    html!(<ErrorBanner {message} on_retry={Some(on_retry)} />)
                } else {
                    Html::default()
                }
            }

            <div class="tab-bar">
                <button
                    class={if *tab == Tab::Stats { "tab tab-active" } else { "tab" }}
                    onclick={select_tab(Tab::Stats)}>
                    {"Overview"}
                </button>
                <button
                    class={if *tab == Tab::Services { "tab tab-active" } else { "tab" }}
                    onclick={select_tab(Tab::Services)}>
                    {"Manage Services"}
                </button>
            </div>

            {
                match *tab {
                    Tab::Stats => html! {
                        <>
                            <div class="stat-grid">
                                <div class="card stat-card">
                                    <h3>{"Users"}</h3>
                                    <p class="stat-number">{ stats.total_users }</p>
                                    <p class="stat-detail">{ format!("{} customers · {} staff · {} admins",
                                        stats.total_customers, stats.total_staff, stats.total_admins) }</p>
                                </div>
                                <div class="card stat-card">
                                    <h3>{"Bookings"}</h3>
                                    <p class="stat-number">{ stats.total_bookings }</p>
                                    <p class="stat-detail">{ format!("{} pending · {} completed",
                                        stats.pending_bookings, stats.completed_bookings) }</p>
                                </div>
                                <div class="card stat-card">
                                    <h3>{"Revenue"}</h3>
                                    <p class="stat-number">{ format_price(stats.total_revenue, stats.currency) }</p>
                                    <p class="stat-detail">{"All time"}</p>
                                </div>
                            </div>
                            {
                                if let Some(profile) = &*profile {
                                    html! {
                                        <div class="card profile-card">
                                            <h3>{"Your account"}</h3>
                                            <p>{ format!("{} — {}", profile.full_name, profile.email) }</p>
                                        </div>
                                    }
                                } else {
                                    Html::default()
                                }
                            }
                        </>
                    },
                    Tab::Services => html! {
                        <>
                            <form onsubmit={on_save} class="card service-form" key={editing_service.as_ref().map(|s| s.id).unwrap_or(0)}>
                                <h2>{ if editing_service.is_some() { "Edit service" } else { "Add a service" } }</h2>
                                <label>{"Name"}</label>
                                <input ref={name_ref} type="text"
                                    value={editing_service.as_ref().map(|s| s.name.clone())} />
                                <label>{"Description"}</label>
                                <textarea ref={description_ref}
                                    value={editing_service.as_ref().and_then(|s| s.description.clone())}>
                                </textarea>
                                <label>{"Price"}</label>
                                <input ref={price_ref} type="number" step="0.01"
                                    value={editing_service.as_ref().map(|s| s.price.to_string())} />
                                <label>{"Duration (minutes)"}</label>
                                <input ref={duration_ref} type="number"
                                    value={editing_service.as_ref().map(|s| s.duration_minutes.to_string())} />
                                <label>{"Currency"}</label>
                                <select ref={currency_ref}>
                                    { for CURRENCIES.iter().map(|c| html! {
                                        <option value={*c} key={*c}
                                            selected={editing_service.as_ref().map(|s| s.currency == *c).unwrap_or(*c == "KES")}>
                                            { *c }
                                        </option>
                                    })}
                                </select>
                                {
                                    if !form_error.is_empty() {
                                        html!(<p class="form-error">{ &*form_error }</p>)
                                    } else {
                                        Html::default()
                                    }
                                }
                                <div class="card-actions">
                                    <button type="submit" class="button button-primary">
                                        { if editing_service.is_some() { "Save changes" } else { "Create service" } }
                                    </button>
                                    {
                                        if editing_service.is_some() {
                                            html!(<button type="button" class="button" onclick={on_cancel_edit.clone()}>{"Cancel"}</button>)
                                        } else {
                                            Html::default()
                                        }
                                    }
                                </div>
                            </form>

                            <div class="card-grid">
                                { for services.iter().map(|service| {
                                    let id = service.id;
                                    let edit = {
                                        let on_edit = on_edit.clone();
                                        Callback::from(move |_| on_edit.emit(id))
                                    };
                                    let delete = {
                                        let on_delete = on_delete.clone();
                                        Callback::from(move |_| on_delete.emit(id))
                                    };
                                    html! {
                                        <div class="card service-card" key={service.id}>
                                            <h3>{ &service.name }</h3>
                                            <p class="description">{ service.description.clone().unwrap_or_default() }</p>
                                            <p class="price">{ format_price(service.price, &service.currency) }</p>
                                            <p class="duration">{ format!("{} min", service.duration_minutes) }</p>
                                            <div class="card-actions">
                                                <button class="button" onclick={edit}>{"Edit"}</button>
                                                <button class="button button-danger" onclick={delete}>{"Delete"}</button>
                                            </div>
                                        </div>
                                    }
                                })}
                            </div>
                        </>
                    },
                }
            }
        </div>
    }
}

/* ---------------- tests ---------------- */

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn service_form_validation() {
        assert_eq!(
            validate_service("", "", "100", "30", "KES").unwrap_err(),
            "Service name is required"
        );
        assert_eq!(
            validate_service("Wash", "", "abc", "30", "KES").unwrap_err(),
            "Price must be a number"
        );
        assert_eq!(
            validate_service("Wash", "", "0", "30", "KES").unwrap_err(),
            "Price must be greater than zero"
        );
        assert_eq!(
            validate_service("Wash", "", "100", "1.5", "KES").unwrap_err(),
            "Duration must be whole minutes"
        );

        let body = validate_service(" Premium Wash ", "Full detail", "1500", "45", "KES").unwrap();
        assert_eq!(body.name, "Premium Wash");
        assert_eq!(body.price, 1500.0);
        assert_eq!(body.duration_minutes, 45);
    }

    #[test]
    fn placeholder_stats_render_with_the_kes_formatter() {
        let stats = placeholder_stats();
        assert_eq!(format_price(stats.total_revenue, stats.currency), "KSh 254,700");
    }
}
