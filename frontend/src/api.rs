//! Single HTTP client for the booking API. Every request goes through
//! `fetch_json`/`fetch_empty`, which attach the bearer token whenever the
//! session store holds one. A 401 from any endpoint surfaces as
//! `ApiError::Unauthorized` so callers can tear the session down.

use gloo_net::http::{Method, Request, RequestBuilder, Response};
use serde::{de::DeserializeOwned, Serialize};
use thiserror::Error;

use crate::models::{
    AuthResponse, Booking, CreateBookingRequest, LoginRequest, RateBookingRequest,
    RegisterRequest, Service, ServicePayload, StatusUpdateRequest, UpdateProfileRequest,
    UserProfile, Vehicle, VehiclePayload,
};
use crate::session::SessionStore;

/* ---------------- configuration ---------------- */

const DEFAULT_BASE: &str = "http://127.0.0.1:8080/api";

/// API base URL, overridable at build time with CARWASH_API_BASE.
pub fn base_url() -> &'static str {
    option_env!("CARWASH_API_BASE").unwrap_or(DEFAULT_BASE)
}

/* ---------------- error taxonomy ---------------- */

#[derive(Debug, Error)]
pub enum ApiError {
    /// No response reached the client at all.
    #[error("cannot reach the server — check that the backend is running")]
    Network(gloo_net::Error),
    /// The server rejected the bearer token; the session is invalid.
    #[error("your session has expired, please log in again")]
    Unauthorized,
    /// Any other 4xx/5xx, with the server-provided message when available.
    #[error("{message}")]
    Server { status: u16, message: String },
    /// 2xx whose body did not parse as the expected shape.
    #[error("unexpected response from the server")]
    Decode,
}

/// What a page should do with a failed request. 401 is special-cased per the
/// session contract; everything else becomes a banner the user can retry.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ErrorDisposition {
    ExpireSession,
    Banner(String),
}

pub fn disposition(err: &ApiError) -> ErrorDisposition {
    match err {
        ApiError::Unauthorized => ErrorDisposition::ExpireSession,
        other => ErrorDisposition::Banner(other.to_string()),
    }
}

/* ---------------- generic calls ---------------- */

fn builder(method: Method, url: &str) -> RequestBuilder {
    let builder = match method {
        Method::GET => Request::get(url),
        Method::POST => Request::post(url),
        Method::PUT => Request::put(url),
        Method::PATCH => Request::patch(url),
        Method::DELETE => Request::delete(url),
        _ => Request::get(url),
    };
    // Readers always re-consult the store; nothing caches the token.
    match SessionStore::browser().get() {
        Some(session) => builder.header("Authorization", &format!("Bearer {}", session.token)),
        None => builder,
    }
}

async fn error_message(resp: &Response) -> Option<String> {
    let text = resp.text().await.ok()?;
    if text.trim().is_empty() {
        return None;
    }
    match serde_json::from_str::<serde_json::Value>(&text) {
        Ok(body) => body
            .get("message")
            .or_else(|| body.get("error"))
            .and_then(|m| m.as_str())
            .map(str::to_owned)
            .or(Some(text)),
        Err(_) => Some(text),
    }
}

async fn send<T>(builder: RequestBuilder, body: Option<&T>) -> Result<Response, ApiError>
where
    T: Serialize + ?Sized,
{
    let resp = match body {
        Some(b) => builder
            .json(b)
            .map_err(|_| ApiError::Decode)?
            .send()
            .await
            .map_err(ApiError::Network)?,
        None => builder.send().await.map_err(ApiError::Network)?,
    };

    match resp.status() {
        200..=299 => Ok(resp),
        401 => Err(ApiError::Unauthorized),
        status => {
            let message = error_message(&resp)
                .await
                .unwrap_or_else(|| format!("request failed with status {status}"));
            Err(ApiError::Server { status, message })
        }
    }
}

pub async fn fetch_json<T, U>(method: Method, path: &str, body: Option<&T>) -> Result<U, ApiError>
where
    T: Serialize + ?Sized,
    U: DeserializeOwned,
{
    let url = format!("{}{}", base_url(), path);
    let resp = send(builder(method, &url), body).await?;
    resp.json().await.map_err(|_| ApiError::Decode)
}

/// For endpoints whose response body we don't consume (deletes, status
/// updates); any 2xx counts as success.
pub async fn fetch_empty<T>(method: Method, path: &str, body: Option<&T>) -> Result<(), ApiError>
where
    T: Serialize + ?Sized,
{
    let url = format!("{}{}", base_url(), path);
    send(builder(method, &url), body).await.map(|_| ())
}

/* ---------------- typed endpoints ---------------- */

pub mod auth {
    use super::*;

    pub async fn login(body: &LoginRequest) -> Result<AuthResponse, ApiError> {
        fetch_json(Method::POST, "/auth/login", Some(body)).await
    }

    pub async fn register(body: &RegisterRequest) -> Result<AuthResponse, ApiError> {
        fetch_json(Method::POST, "/auth/register", Some(body)).await
    }
}

pub mod services {
    use super::*;

    pub async fn list() -> Result<Vec<Service>, ApiError> {
        fetch_json::<(), _>(Method::GET, "/services", None).await
    }

    pub async fn create(body: &ServicePayload) -> Result<Service, ApiError> {
        fetch_json(Method::POST, "/services", Some(body)).await
    }

    pub async fn update(id: i64, body: &ServicePayload) -> Result<Service, ApiError> {
        fetch_json(Method::PUT, &format!("/services/{id}"), Some(body)).await
    }

    pub async fn delete(id: i64) -> Result<(), ApiError> {
        fetch_empty::<()>(Method::DELETE, &format!("/services/{id}"), None).await
    }
}

pub mod vehicles {
    use super::*;

    pub async fn list() -> Result<Vec<Vehicle>, ApiError> {
        fetch_json::<(), _>(Method::GET, "/vehicles", None).await
    }

    pub async fn create(body: &VehiclePayload) -> Result<Vehicle, ApiError> {
        fetch_json(Method::POST, "/vehicles", Some(body)).await
    }

    pub async fn delete(id: i64) -> Result<(), ApiError> {
        fetch_empty::<()>(Method::DELETE, &format!("/vehicles/{id}"), None).await
    }
}

pub mod bookings {
    use super::*;

    pub async fn my_bookings() -> Result<Vec<Booking>, ApiError> {
        fetch_json::<(), _>(Method::GET, "/bookings/my-bookings", None).await
    }

    pub async fn create(body: &CreateBookingRequest) -> Result<(), ApiError> {
        fetch_empty(Method::POST, "/bookings", Some(body)).await
    }

    pub async fn set_status(id: i64, body: &StatusUpdateRequest) -> Result<(), ApiError> {
        fetch_empty(Method::PUT, &format!("/bookings/{id}/status"), Some(body)).await
    }

    pub async fn rate(id: i64, body: &RateBookingRequest) -> Result<(), ApiError> {
        fetch_empty(Method::POST, &format!("/bookings/{id}/rate"), Some(body)).await
    }
}

pub mod users {
    use super::*;

    pub async fn profile() -> Result<UserProfile, ApiError> {
        fetch_json::<(), _>(Method::GET, "/users/profile", None).await
    }

    pub async fn update_profile(body: &UpdateProfileRequest) -> Result<UserProfile, ApiError> {
        fetch_json(Method::PUT, "/users/profile", Some(body)).await
    }
}

/* ---------------- tests ---------------- */

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Role;
    use crate::session::testing::{memory_store, sample_session};

    #[test]
    fn unauthorized_expires_the_session() {
        assert_eq!(disposition(&ApiError::Unauthorized), ErrorDisposition::ExpireSession);
    }

    #[test]
    fn server_errors_surface_their_message() {
        let err = ApiError::Server {
            status: 422,
            message: "booking date is in the past".to_string(),
        };
        assert_eq!(
            disposition(&err),
            ErrorDisposition::Banner("booking date is in the past".to_string())
        );
    }

    #[test]
    fn network_errors_get_a_generic_banner() {
        let err = ApiError::Network(gloo_net::Error::GlooError("offline".to_string()));
        match disposition(&err) {
            ErrorDisposition::Banner(msg) => assert!(msg.contains("cannot reach the server")),
            other => panic!("expected banner, got {other:?}"),
        }
    }

    #[test]
    fn revoked_token_scenario_clears_the_store() {
        // A protected page holds a live session, then a request comes back
        // 401: the disposition says expire, and after the store clear every
        // subsequent read is absent — the user is effectively logged out
        // without a manual logout.
        let store = memory_store();
        store.set(&sample_session(Role::Customer));
        assert!(store.get().is_some());

        if disposition(&ApiError::Unauthorized) == ErrorDisposition::ExpireSession {
            store.clear();
        }
        assert_eq!(store.get(), None);
    }
}
