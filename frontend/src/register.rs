use wasm_bindgen_futures::spawn_local;
use web_sys::HtmlInputElement;
use yew::prelude::*;
use yew_router::prelude::*;

use crate::api;
use crate::guard::post_login_route;
use crate::models::{RegisterRequest, Role};
use crate::session::{session_from_auth, use_session};

/// Client-side validation, resolved before any request goes out. New accounts
/// always register as customers; staff and admin accounts are provisioned
/// server-side.
fn validate(
    full_name: &str,
    email: &str,
    phone: &str,
    password: &str,
    confirm: &str,
) -> Result<RegisterRequest, String> {
    if full_name.trim().is_empty() {
        return Err("Full name is required".to_string());
    }
    if email.trim().is_empty() {
        return Err("Email is required".to_string());
    }
    if !email.contains('@') {
        return Err("Enter a valid email address".to_string());
    }
    if phone.trim().is_empty() {
        return Err("Phone number is required".to_string());
    }
    if password.is_empty() {
        return Err("Password is required".to_string());
    }
    if password.len() < 6 {
        return Err("Password must be at least 6 characters".to_string());
    }
    if password != confirm {
        return Err("Passwords do not match".to_string());
    }
    Ok(RegisterRequest {
        email: email.trim().to_string(),
        password: password.to_string(),
        full_name: full_name.trim().to_string(),
        phone_number: phone.trim().to_string(),
        role: Role::Customer,
    })
}

#[function_component(Register)]
pub fn register() -> Html {
    let session = use_session();
    let navigator = use_navigator().expect("router context missing");

    let name_ref = use_node_ref();
    let email_ref = use_node_ref();
    let phone_ref = use_node_ref();
    let password_ref = use_node_ref();
    let confirm_ref = use_node_ref();
    let error = use_state(String::new);
    let loading = use_state(|| false);

    let onsubmit = {
        let session = session.clone();
        let navigator = navigator.clone();
        let name_ref = name_ref.clone();
        let email_ref = email_ref.clone();
        let phone_ref = phone_ref.clone();
        let password_ref = password_ref.clone();
        let confirm_ref = confirm_ref.clone();
        let error = error.clone();
        let loading = loading.clone();

        Callback::from(move |ev: SubmitEvent| {
            ev.prevent_default();

            let value = |node: &NodeRef| {
                node.cast::<HtmlInputElement>()
                    .map(|input| input.value())
                    .unwrap_or_default()
            };

            let body = match validate(
                &value(&name_ref),
                &value(&email_ref),
                &value(&phone_ref),
                &value(&password_ref),
                &value(&confirm_ref),
            ) {
                Ok(body) => body,
                Err(message) => {
                    error.set(message);
                    return;
                }
            };

            error.set(String::new());
            loading.set(true);

            let session = session.clone();
            let navigator = navigator.clone();
            let error = error.clone();
            let loading = loading.clone();

            spawn_local(async move {
                match api::auth::register(&body).await {
                    Ok(auth) => match session_from_auth(auth) {
                        Ok(new_session) => {
                            let role = new_session.role();
                            session.login(new_session);
                            navigator.push(&post_login_route(role));
                        }
                        Err(err) => {
                            loading.set(false);
                            error.set(err.to_string());
                        }
                    },
                    Err(err) => {
                        loading.set(false);
                        error.set(err.to_string());
                    }
                }
            });
        })
    };

    html! {
        <div class="page auth-page">
            <div class="auth-box">
                <h2>{"Create your account"}</h2>
                <p class="subtitle">{"Register to start booking washes"}</p>

                {
                    if !error.is_empty() {
                        html!(<p class="form-error">{ &*error }</p>)
                    } else {
                        Html::default()
                    }
                }

                <form {onsubmit}>
                    <label>{"Full Name"}</label>
                    <input ref={name_ref} type="text" placeholder="Jane Doe" disabled={*loading} />
                    <label>{"Email Address"}</label>
                    <input ref={email_ref} type="email" placeholder="you@example.com" disabled={*loading} />
                    <label>{"Phone Number"}</label>
                    <input ref={phone_ref} type="tel" placeholder="+254 700 000000" disabled={*loading} />
                    <label>{"Password"}</label>
                    <input ref={password_ref} type="password" placeholder="At least 6 characters" disabled={*loading} />
                    <label>{"Confirm Password"}</label>
                    <input ref={confirm_ref} type="password" placeholder="Repeat your password" disabled={*loading} />
                    <button type="submit" class="button button-primary" disabled={*loading}>
                        { if *loading { "Creating account…" } else { "Register" } }
                    </button>
                </form>
            </div>
        </div>
    }
}

/* ---------------- tests ---------------- */

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_mismatched_passwords() {
        let err = validate("Jane", "jane@example.com", "0700", "secret1", "secret2").unwrap_err();
        assert_eq!(err, "Passwords do not match");
    }

    #[test]
    fn rejects_short_password() {
        let err = validate("Jane", "jane@example.com", "0700", "abc", "abc").unwrap_err();
        assert_eq!(err, "Password must be at least 6 characters");
    }

    #[test]
    fn rejects_missing_fields_in_order() {
        assert_eq!(validate("", "", "", "", "").unwrap_err(), "Full name is required");
        assert_eq!(validate("Jane", "", "", "", "").unwrap_err(), "Email is required");
        assert_eq!(
            validate("Jane", "not-an-email", "", "", "").unwrap_err(),
            "Enter a valid email address"
        );
        assert_eq!(
            validate("Jane", "jane@example.com", "", "", "").unwrap_err(),
            "Phone number is required"
        );
    }

    #[test]
    fn valid_input_registers_as_customer() {
        let body =
            validate(" Jane Doe ", "jane@example.com", "0700123456", "secret1", "secret1").unwrap();
        assert_eq!(body.full_name, "Jane Doe");
        assert_eq!(body.role, Role::Customer);
    }
}
