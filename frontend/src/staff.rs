//! Staff landing page. The schedule and job-assignment views depend on
//! server-side staff workflows that do not exist yet, so this stays a
//! placeholder shell.

use yew::prelude::*;

use crate::guard::use_require_session;
use crate::models::Role;

#[function_component(StaffDashboard)]
pub fn staff_dashboard() -> Html {
    let current = use_require_session(Some(Role::Staff));

    let Some(current) = current else {
        return Html::default();
    };

    html! {
        <div class="page staff-page">
            <h1>{"Staff Dashboard"}</h1>
            <p>{ format!("Signed in as {}", current.user.full_name) }</p>
            <div class="card-grid">
                <div class="card">
                    <h3>{"Today's Schedule"}</h3>
                    <p class="empty">{"Schedule assignments will appear here once rostering is live."}</p>
                </div>
                <div class="card">
                    <h3>{"Assigned Jobs"}</h3>
                    <p class="empty">{"Jobs assigned to you by an admin will appear here."}</p>
                </div>
            </div>
        </div>
    }
}
