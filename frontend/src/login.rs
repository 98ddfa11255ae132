use wasm_bindgen_futures::spawn_local;
use web_sys::HtmlInputElement;
use yew::prelude::*;
use yew_router::prelude::*;

use crate::api;
use crate::guard::post_login_route;
use crate::models::LoginRequest;
use crate::session::{session_from_auth, use_session};

#[function_component(Login)]
pub fn login() -> Html {
    let session = use_session();
    let navigator = use_navigator().expect("router context missing");

    let email_ref = use_node_ref();
    let password_ref = use_node_ref();
    let error = use_state(String::new);
    let loading = use_state(|| false);

    let onsubmit = {
        let session = session.clone();
        let navigator = navigator.clone();
        let email_ref = email_ref.clone();
        let password_ref = password_ref.clone();
        let error = error.clone();
        let loading = loading.clone();

        Callback::from(move |ev: SubmitEvent| {
            ev.prevent_default();

            let email = email_ref
                .cast::<HtmlInputElement>()
                .map(|input| input.value())
                .unwrap_or_default();
            let password = password_ref
                .cast::<HtmlInputElement>()
                .map(|input| input.value())
                .unwrap_or_default();

            if email.trim().is_empty() || password.is_empty() {
                error.set("Email and password are required".to_string());
                return;
            }

            error.set(String::new());
            loading.set(true);

            let session = session.clone();
            let navigator = navigator.clone();
            let error = error.clone();
            let loading = loading.clone();

            spawn_local(async move {
                let body = LoginRequest {
                    email: email.trim().to_string(),
                    password,
                };
                match api::auth::login(&body).await {
                    // A response without a token is rejected here; nothing is
                    // written to the session store in that case.
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
                <h2>{"Login to CarWash Pro"}</h2>
                <p class="subtitle">{"Access your account to book services"}</p>

                {
                    if !error.is_empty() {
                        html!(<p class="form-error">{ &*error }</p>)
                    } else {
                        Html::default()
                    }
                }

                <form {onsubmit}>
                    <label>{"Email Address"}</label>
                    <input ref={email_ref} type="email" placeholder="you@example.com" disabled={*loading} />
                    <label>{"Password"}</label>
                    <input ref={password_ref} type="password" placeholder="Enter your password" disabled={*loading} />
                    <button type="submit" class="button button-primary" disabled={*loading}>
                        { if *loading { "Logging in…" } else { "Login" } }
                    </button>
                </form>
            </div>
        </div>
    }
}
