//! Route gating over the locally cached session. This is UX only: it decides
//! which screens get rendered, never who is authorized. The server re-checks
//! the bearer token on every protected request, so a forged local role buys
//! nothing beyond an empty page.

use yew::prelude::*;
use yew_router::prelude::*;

use crate::models::Role;
use crate::session::{use_session, Session};
use crate::Route;

/* ---------------- policy ---------------- */

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RouteAccess {
    Public,
    Authenticated,
    RoleOnly(Role),
}

pub fn access_for(route: &Route) -> RouteAccess {
    match route {
        Route::Home | Route::Login | Route::Register | Route::Services | Route::NotFound => {
            RouteAccess::Public
        }
        Route::Dashboard | Route::Book | Route::Vehicles | Route::MyBookings => {
            RouteAccess::Authenticated
        }
        Route::Staff => RouteAccess::RoleOnly(Role::Staff),
        Route::Admin => RouteAccess::RoleOnly(Role::Admin),
    }
}

/// Where a role lands when bounced off a page it may not see.
pub fn landing_route(role: Role) -> Route {
    match role {
        Role::Customer | Role::Admin => Route::Dashboard,
        Role::Staff => Route::Staff,
    }
}

/// Destination right after a successful login or registration.
pub fn post_login_route(role: Role) -> Route {
    match role {
        Role::Customer => Route::Dashboard,
        Role::Staff => Route::Staff,
        Role::Admin => Route::Admin,
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GuardDecision {
    Allow,
    RedirectToLogin,
    RedirectTo(Route),
}

/// Pure, synchronous decision over already-available local state. First
/// match wins: missing session beats wrong role.
pub fn decide(dest: &Route, session: Option<&Session>) -> GuardDecision {
    match access_for(dest) {
        RouteAccess::Public => GuardDecision::Allow,
        RouteAccess::Authenticated => match session {
            Some(_) => GuardDecision::Allow,
            None => GuardDecision::RedirectToLogin,
        },
        RouteAccess::RoleOnly(required) => match session {
            None => GuardDecision::RedirectToLogin,
            Some(s) if s.role() == required => GuardDecision::Allow,
            Some(s) => GuardDecision::RedirectTo(landing_route(s.role())),
        },
    }
}

/* ---------------- router-level guard ---------------- */

#[derive(Properties, PartialEq)]
pub struct GuardedProps {
    #[prop_or_default]
    pub children: Children,
}

#[function_component(Guarded)]
pub fn guarded(props: &GuardedProps) -> Html {
    let session = use_session();
    let route = use_route::<Route>().unwrap_or(Route::NotFound);

    match decide(&route, session.current().as_ref()) {
        GuardDecision::Allow => html! { for props.children.iter() },
        GuardDecision::RedirectToLogin => html!(<Redirect<Route> to={Route::Login} />),
        GuardDecision::RedirectTo(to) => html!(<Redirect<Route> to={to} />),
    }
}

/* ---------------- page-level re-check ---------------- */

/// Defense in depth for protected pages: independent of the router guard,
/// every page reached by any means (deep link, back button) re-consults the
/// store on mount and refuses to render privileged content. Returns the
/// session only when the caller may proceed.
#[hook]
pub fn use_require_session(required: Option<Role>) -> Option<Session> {
    let session = use_session();
    let navigator = use_navigator().expect("router context missing");
    let current = session.current();

    {
        let current = current.clone();
        use_effect_with(current, move |cur| {
            match cur {
                None => navigator.push(&Route::Login),
                Some(s) => {
                    if let Some(required) = required {
                        if s.role() != required {
                            navigator.push(&landing_route(s.role()));
                        }
                    }
                }
            }
            || ()
        });
    }

    match (current, required) {
        (Some(s), Some(required)) if s.role() != required => None,
        (current, _) => current,
    }
}

/* ---------------- tests ---------------- */

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::testing::sample_session;
    use GuardDecision::{Allow, RedirectTo, RedirectToLogin};

    const ALL_ROUTES: [Route; 11] = [
        Route::Home,
        Route::Login,
        Route::Register,
        Route::Services,
        Route::Dashboard,
        Route::Book,
        Route::Vehicles,
        Route::MyBookings,
        Route::Staff,
        Route::Admin,
        Route::NotFound,
    ];

    fn decide_as(route: &Route, role: Option<Role>) -> GuardDecision {
        let session = role.map(sample_session);
        decide(route, session.as_ref())
    }

    #[test]
    fn full_policy_table() {
        // (destination, anonymous, customer, staff, admin)
        let expected = [
            (Route::Home, Allow, Allow, Allow, Allow),
            (Route::Login, Allow, Allow, Allow, Allow),
            (Route::Register, Allow, Allow, Allow, Allow),
            (Route::Services, Allow, Allow, Allow, Allow),
            (Route::Dashboard, RedirectToLogin, Allow, Allow, Allow),
            (Route::Book, RedirectToLogin, Allow, Allow, Allow),
            (Route::Vehicles, RedirectToLogin, Allow, Allow, Allow),
            (Route::MyBookings, RedirectToLogin, Allow, Allow, Allow),
            (
                Route::Staff,
                RedirectToLogin,
                RedirectTo(Route::Dashboard),
                Allow,
                RedirectTo(Route::Dashboard),
            ),
            (
                Route::Admin,
                RedirectToLogin,
                RedirectTo(Route::Dashboard),
                RedirectTo(Route::Staff),
                Allow,
            ),
            (Route::NotFound, Allow, Allow, Allow, Allow),
        ];

        assert_eq!(expected.len(), ALL_ROUTES.len());
        for (route, anon, customer, staff, admin) in expected {
            assert_eq!(decide_as(&route, None), anon, "anonymous → {route:?}");
            assert_eq!(
                decide_as(&route, Some(Role::Customer)),
                customer,
                "customer → {route:?}"
            );
            assert_eq!(decide_as(&route, Some(Role::Staff)), staff, "staff → {route:?}");
            assert_eq!(decide_as(&route, Some(Role::Admin)), admin, "admin → {route:?}");
        }
    }

    #[test]
    fn anonymous_dashboard_request_goes_to_login() {
        assert_eq!(decide_as(&Route::Dashboard, None), RedirectToLogin);
    }

    #[test]
    fn customer_requesting_admin_lands_on_dashboard() {
        assert_eq!(
            decide_as(&Route::Admin, Some(Role::Customer)),
            RedirectTo(Route::Dashboard)
        );
    }

    #[test]
    fn landing_and_post_login_routes() {
        assert_eq!(landing_route(Role::Customer), Route::Dashboard);
        assert_eq!(landing_route(Role::Staff), Route::Staff);
        assert_eq!(landing_route(Role::Admin), Route::Dashboard);

        assert_eq!(post_login_route(Role::Customer), Route::Dashboard);
        assert_eq!(post_login_route(Role::Staff), Route::Staff);
        assert_eq!(post_login_route(Role::Admin), Route::Admin);
    }
}
