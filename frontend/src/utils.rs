//! Small shared pieces: the late-response guard, the page error banner and
//! the common failure path for API calls.

use std::cell::Cell;
use std::rc::Rc;

use yew::prelude::*;
use yew_router::navigator::Navigator;

use crate::api::{disposition, ApiError, ErrorDisposition};
use crate::session::SessionHandle;
use crate::Route;

/// Flag cleared when the owning component unmounts. Fetch effects check it
/// before touching state so a late response never updates a dead view.
#[hook]
pub fn use_alive() -> Rc<Cell<bool>> {
    let alive = use_memo((), |_| Cell::new(true));
    {
        let alive = alive.clone();
        use_effect_with((), move |_| move || alive.set(false));
    }
    alive
}

/// Shared failure path: a 401 tears the session down and lands on the login
/// page; anything else is surfaced as a page-level banner.
pub fn surface_error(
    err: &ApiError,
    session: &SessionHandle,
    navigator: &Navigator,
    banner: &UseStateHandle<Option<String>>,
) {
    log::error!("request failed: {err}");
    match disposition(err) {
        ErrorDisposition::ExpireSession => {
            session.expire();
            navigator.push(&Route::Login);
        }
        ErrorDisposition::Banner(message) => banner.set(Some(message)),
    }
}

/* ---------------- error banner ---------------- */

#[derive(Properties, PartialEq)]
pub struct ErrorBannerProps {
    pub message: String,
    /// Present on data-fetch failures; wired to a "Try Again" button.
    #[prop_or_default]
    pub on_retry: Option<Callback<()>>,
}

#[function_component(ErrorBanner)]
pub fn error_banner(props: &ErrorBannerProps) -> Html {
    let retry = props.on_retry.clone().map(|cb| {
        let onclick = Callback::from(move |_| cb.emit(()));
        html!(<button class="retry-button" {onclick}>{"Try Again"}</button>)
    });

    html! {
        <div class="error-banner">
            <span class="error-text">{ &props.message }</span>
            { retry.unwrap_or_default() }
        </div>
    }
}
