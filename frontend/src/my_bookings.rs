//! Booking history for the logged-in customer: status, cancellation while
//! pending, and rating once completed.

use gloo_dialogs::{confirm, prompt};
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;
use yew_router::prelude::*;

use crate::api;
use crate::guard::use_require_session;
use crate::models::{Booking, BookingStatus, RateBookingRequest, StatusUpdateRequest};
use crate::session::use_session;
use crate::utils::{surface_error, use_alive, ErrorBanner};
use crate::Route;

fn stars(rating: u8) -> String {
    let filled = rating.min(5) as usize;
    format!("{}{}", "★".repeat(filled), "☆".repeat(5 - filled))
}

fn with_status(bookings: &[Booking], id: i64, status: BookingStatus) -> Vec<Booking> {
    bookings
        .iter()
        .map(|b| {
            if b.id == id {
                let mut updated = b.clone();
                updated.status = status;
                updated
            } else {
                b.clone()
            }
        })
        .collect()
}

fn with_rating(bookings: &[Booking], id: i64, rating: u8, review: Option<String>) -> Vec<Booking> {
    bookings
        .iter()
        .map(|b| {
            if b.id == id {
                let mut updated = b.clone();
                updated.rating = Some(rating);
                updated.review = review.clone();
                updated
            } else {
                b.clone()
            }
        })
        .collect()
}

#[function_component(MyBookings)]
pub fn my_bookings() -> Html {
    let current = use_require_session(None);
    let session = use_session();
    let navigator = use_navigator().expect("router context missing");

    let bookings = use_state(Vec::<Booking>::new);
    let loading = use_state(|| true);
    let error = use_state(|| None::<String>);
    let attempt = use_state(|| 0u32);
    let alive = use_alive();

    {
        let bookings = bookings.clone();
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
                    let result = api::bookings::my_bookings().await;
                    if !alive.get() {
                        return;
                    }
                    loading.set(false);
                    match result {
                        Ok(list) => bookings.set(list),
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

    let on_cancel = {
        let session = session.clone();
        let navigator = navigator.clone();
        let bookings = bookings.clone();
        let error = error.clone();
        let alive = alive.clone();

        Callback::from(move |id: i64| {
            if !confirm("Cancel this booking?") {
                return;
            }
            let session = session.clone();
            let navigator = navigator.clone();
            let bookings = bookings.clone();
            let error = error.clone();
            let alive = alive.clone();

            spawn_local(async move {
                let body = StatusUpdateRequest {
                    status: BookingStatus::Cancelled,
                };
                let result = api::bookings::set_status(id, &body).await;
                if !alive.get() {
                    return;
                }
                match result {
                    Ok(()) => bookings.set(with_status(&bookings, id, BookingStatus::Cancelled)),
                    Err(err) => surface_error(&err, &session, &navigator, &error),
                }
            });
        })
    };

    let on_rate = {
        let session = session.clone();
        let navigator = navigator.clone();
        let bookings = bookings.clone();
        let error = error.clone();
        let alive = alive.clone();

        Callback::from(move |id: i64| {
            let Some(raw) = prompt("Rate this booking from 1 to 5:", None) else {
                return;
            };
            let rating = match raw.trim().parse::<u8>() {
                Ok(n) if (1..=5).contains(&n) => n,
                _ => {
                    error.set(Some("Rating must be a number between 1 and 5".to_string()));
                    return;
                }
            };
            let review = prompt("Leave a short review (optional):", None)
                .map(|r| r.trim().to_string())
                .filter(|r| !r.is_empty());

            let session = session.clone();
            let navigator = navigator.clone();
            let bookings = bookings.clone();
            let error = error.clone();
            let alive = alive.clone();

            spawn_local(async move {
                let body = RateBookingRequest {
                    rating,
                    review: review.clone(),
                };
                let result = api::bookings::rate(id, &body).await;
                if !alive.get() {
                    return;
                }
                match result {
                    Ok(()) => bookings.set(with_rating(&bookings, id, rating, review)),
                    Err(err) => surface_error(&err, &session, &navigator, &error),
                }
            });
        })
    };

    if current.is_none() {
        return Html::default();
    }

    html! {
        <div class="page bookings-page">
            <h1>{"My Bookings"}</h1>
            {
                if let Some(message) = (*error).clone() {
                    html!(<ErrorBanner {message} on_retry={Some(on_retry)} />)
                } else {
                    Html::default()
                }
            }
            {
                if *loading {
                    html!(<p class="loading">{"Loading bookings…"}</p>)
                } else if bookings.is_empty() {
                    html! {
                        <div class="empty">
                            <p>{"You have no bookings yet."}</p>
                            <Link<Route> to={Route::Book} classes="button button-primary">{"Book your first wash"}</Link<Route>>
                        </div>
                    }
                } else {
                    html! {
                        <div class="booking-list">
                            { for bookings.iter().map(|booking| {
                                let id = booking.id;
                                let cancel = {
                                    let on_cancel = on_cancel.clone();
                                    Callback::from(move |_| on_cancel.emit(id))
                                };
                                let rate = {
                                    let on_rate = on_rate.clone();
                                    Callback::from(move |_| on_rate.emit(id))
                                };
                                html! {
                                    <div class="card booking-card" key={booking.id}>
                                        <div class="booking-header">
                                            <h3>{ &booking.service.name }</h3>
                                            <span class={booking.status.badge_class()}>{ booking.status.as_str() }</span>
                                        </div>
                                        <p>{ format!("{} {} - {}", booking.vehicle.make, booking.vehicle.model, booking.vehicle.license_plate) }</p>
                                        <p>{ format!("When: {}", booking.booking_date_time) }</p>
                                        {
                                            if let Some(notes) = &booking.notes {
                                                html!(<p class="notes">{ format!("Notes: {notes}") }</p>)
                                            } else {
                                                Html::default()
                                            }
                                        }
                                        {
                                            if let Some(rating) = booking.rating {
                                                html! {
                                                    <p class="rating">
                                                        { stars(rating) }
                                                        { booking.review.as_ref().map(|r| format!(" — \"{r}\"")).unwrap_or_default() }
                                                    </p>
                                                }
                                            } else {
                                                Html::default()
                                            }
                                        }
                                        <div class="card-actions">
                                            {
                                                if booking.status == BookingStatus::Pending {
                                                    html!(<button class="button button-danger" onclick={cancel}>{"Cancel"}</button>)
                                                } else {
                                                    Html::default()
                                                }
                                            }
                                            {
                                                if booking.status == BookingStatus::Completed && booking.rating.is_none() {
                                                    html!(<button class="button" onclick={rate}>{"Rate this wash"}</button>)
                                                } else {
                                                    Html::default()
                                                }
                                            }
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

/* ---------------- tests ---------------- */

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{BookedService, BookedVehicle};

    fn booking(id: i64, status: BookingStatus) -> Booking {
        Booking {
            id,
            service: BookedService {
                id: 1,
                name: "Premium Wash".to_string(),
                price: Some(1500.0),
                duration_minutes: Some(45),
            },
            vehicle: BookedVehicle {
                id: 2,
                make: "Toyota".to_string(),
                model: "Corolla".to_string(),
                license_plate: "KAA 123A".to_string(),
            },
            booking_date_time: "2026-09-01T10:00".to_string(),
            status,
            notes: None,
            rating: None,
            review: None,
            assigned_staff_name: None,
        }
    }

    #[test]
    fn cancel_updates_only_the_target_booking() {
        let list = vec![booking(1, BookingStatus::Pending), booking(2, BookingStatus::Pending)];
        let updated = with_status(&list, 1, BookingStatus::Cancelled);
        assert_eq!(updated[0].status, BookingStatus::Cancelled);
        assert_eq!(updated[1].status, BookingStatus::Pending);
    }

    #[test]
    fn rating_attaches_stars_and_review() {
        let list = vec![booking(5, BookingStatus::Completed)];
        let updated = with_rating(&list, 5, 4, Some("great".to_string()));
        assert_eq!(updated[0].rating, Some(4));
        assert_eq!(updated[0].review.as_deref(), Some("great"));
    }

    #[test]
    fn star_strings_always_have_five_slots() {
        assert_eq!(stars(1), "★☆☆☆☆");
        assert_eq!(stars(5), "★★★★★");
        assert_eq!(stars(9), "★★★★★");
    }
}
