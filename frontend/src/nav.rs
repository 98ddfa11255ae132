//! Navigation bar. The visible link set is derived from the session store on
//! every render and nowhere else, so login/logout propagate without a reload.

use yew::prelude::*;
use yew_router::prelude::*;

use crate::models::Role;
use crate::session::use_session;
use crate::Route;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NavLink {
    pub label: &'static str,
    pub to: Route,
}

fn link(label: &'static str, to: Route) -> NavLink {
    NavLink { label, to }
}

/// The role → links table. Logout is an action, not a link, and is rendered
/// separately for every logged-in state.
pub fn links_for(role: Option<Role>) -> Vec<NavLink> {
    let mut links = vec![link("Home", Route::Home), link("Services", Route::Services)];
    match role {
        None => {
            links.push(link("Login", Route::Login));
            links.push(link("Register", Route::Register));
        }
        Some(Role::Customer) => {
            links.push(link("Dashboard", Route::Dashboard));
            links.push(link("Book Service", Route::Book));
            links.push(link("My Bookings", Route::MyBookings));
            links.push(link("My Vehicles", Route::Vehicles));
        }
        Some(Role::Staff) => {
            links.push(link("Staff Dashboard", Route::Staff));
        }
        Some(Role::Admin) => {
            links.push(link("Admin Dashboard", Route::Admin));
        }
    }
    links
}

fn badge_class(role: Role) -> &'static str {
    match role {
        Role::Customer => "role-badge role-customer",
        Role::Staff => "role-badge role-staff",
        Role::Admin => "role-badge role-admin",
    }
}

#[function_component(Navbar)]
pub fn navbar() -> Html {
    let session = use_session();
    let navigator = use_navigator().expect("router context missing");

    let current = session.current();
    let role = current.as_ref().map(|s| s.role());

    let on_logout = {
        let session = session.clone();
        Callback::from(move |_| {
            // Clear first, then navigate: the very next read anywhere sees
            // the absent session.
            session.logout();
            navigator.push(&Route::Home);
        })
    };

    html! {
        <nav class="navbar">
            <div class="navbar-logo">
                <Link<Route> to={Route::Home} classes="logo-link">{"🚗 CarWash Pro"}</Link<Route>>
            </div>
            <ul class="nav-list">
                { for links_for(role).into_iter().map(|l| html! {
                    <li class="nav-item" key={l.label}>
                        <Link<Route> to={l.to}>{ l.label }</Link<Route>>
                    </li>
                })}
            </ul>
            {
                if let Some(role) = role {
                    html! {
                        <div class="navbar-session">
                            <span class={badge_class(role)}>{ role.as_str() }</span>
                            <button class="logout-button" onclick={on_logout}>{"Logout"}</button>
                        </div>
                    }
                } else {
                    Html::default()
                }
            }
        </nav>
    }
}

/* ---------------- tests ---------------- */

#[cfg(test)]
mod tests {
    use super::*;

    fn labels(role: Option<Role>) -> Vec<&'static str> {
        links_for(role).into_iter().map(|l| l.label).collect()
    }

    #[test]
    fn anonymous_links() {
        assert_eq!(labels(None), ["Home", "Services", "Login", "Register"]);
    }

    #[test]
    fn customer_links() {
        assert_eq!(
            labels(Some(Role::Customer)),
            ["Home", "Services", "Dashboard", "Book Service", "My Bookings", "My Vehicles"]
        );
    }

    #[test]
    fn staff_links() {
        assert_eq!(labels(Some(Role::Staff)), ["Home", "Services", "Staff Dashboard"]);
    }

    #[test]
    fn admin_links() {
        assert_eq!(labels(Some(Role::Admin)), ["Home", "Services", "Admin Dashboard"]);
    }

    #[test]
    fn links_point_at_the_expected_routes() {
        let links = links_for(Some(Role::Customer));
        let book = links.iter().find(|l| l.label == "Book Service").unwrap();
        assert_eq!(book.to, Route::Book);
        let vehicles = links.iter().find(|l| l.label == "My Vehicles").unwrap();
        assert_eq!(vehicles.to, Route::Vehicles);

        let admin = links_for(Some(Role::Admin));
        assert_eq!(admin.last().unwrap().to, Route::Admin);
        let staff = links_for(Some(Role::Staff));
        assert_eq!(staff.last().unwrap().to, Route::Staff);
    }
}
