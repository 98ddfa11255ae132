//! Client-held session: one bearer token plus the profile it was issued for,
//! persisted as a single record so readers never observe one without the
//! other. The store is a dumb cell — expiry is only ever discovered when the
//! server rejects a request.

use gloo::storage::{LocalStorage, Storage};
use serde::{Deserialize, Serialize};
use yew::prelude::*;

use crate::models::{AuthResponse, Role, UserProfile};

const SESSION_KEY: &str = "carwash.session";

/* ---------------- session record ---------------- */

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub token: String,
    pub user: UserProfile,
}

impl Session {
    pub fn role(&self) -> Role {
        self.user.role
    }
}

#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum SessionError {
    #[error("the server did not return a session token")]
    MissingToken,
}

/// Builds a session from a login/registration answer. A response without a
/// usable token is rejected here, before anything is written to storage.
pub fn session_from_auth(auth: AuthResponse) -> Result<Session, SessionError> {
    let token = auth
        .token
        .filter(|t| !t.trim().is_empty())
        .ok_or(SessionError::MissingToken)?;
    Ok(Session {
        token,
        user: UserProfile {
            id: None,
            full_name: auth.full_name,
            email: auth.email,
            phone_number: None,
            role: auth.role,
            active: true,
        },
    })
}

/* ---------------- persistent store ---------------- */

/// Storage seam: the browser backend writes local storage, tests swap in an
/// in-memory map.
pub trait StorageBackend {
    fn read(&self) -> Option<String>;
    fn write(&self, raw: &str);
    fn remove(&self);
}

pub struct LocalStorageBackend;

impl StorageBackend for LocalStorageBackend {
    fn read(&self) -> Option<String> {
        LocalStorage::get(SESSION_KEY).ok()
    }

    fn write(&self, raw: &str) {
        let _ = LocalStorage::set(SESSION_KEY, raw);
    }

    fn remove(&self) {
        LocalStorage::delete(SESSION_KEY);
    }
}

pub struct SessionStore<B: StorageBackend> {
    backend: B,
}

impl<B: StorageBackend> SessionStore<B> {
    pub fn new(backend: B) -> Self {
        Self { backend }
    }

    /// Absent, corrupt or partial records all read as "not logged in".
    pub fn get(&self) -> Option<Session> {
        let raw = self.backend.read()?;
        serde_json::from_str(&raw).ok()
    }

    pub fn set(&self, session: &Session) {
        match serde_json::to_string(session) {
            Ok(raw) => self.backend.write(&raw),
            Err(err) => log::error!("failed to serialize session: {err}"),
        }
    }

    pub fn clear(&self) {
        self.backend.remove();
    }
}

impl SessionStore<LocalStorageBackend> {
    pub fn browser() -> Self {
        Self::new(LocalStorageBackend)
    }
}

/* ---------------- yew integration ---------------- */

/// Handle shared through context. Writes go through the persistent store AND
/// the state handle, so every subscribed view re-renders immediately — no
/// full-page reload needed after login or logout.
#[derive(Clone, PartialEq)]
pub struct SessionHandle {
    state: UseStateHandle<Option<Session>>,
}

impl SessionHandle {
    pub fn current(&self) -> Option<Session> {
        (*self.state).clone()
    }

    pub fn login(&self, session: Session) {
        SessionStore::browser().set(&session);
        self.state.set(Some(session));
    }

    pub fn logout(&self) {
        SessionStore::browser().clear();
        self.state.set(None);
    }

    /// Same teardown as logout; separate name so 401 call sites read as what
    /// they are — the server told us the token is dead.
    pub fn expire(&self) {
        self.logout();
    }
}

#[hook]
pub fn use_session() -> SessionHandle {
    use_context::<SessionHandle>().expect("SessionProvider missing")
}

#[derive(Properties, PartialEq)]
pub struct SessionProviderProps {
    #[prop_or_default]
    pub children: Children,
}

#[function_component(SessionProvider)]
pub fn session_provider(props: &SessionProviderProps) -> Html {
    // Seeded synchronously from storage, so the very first render of any
    // guard or navbar already sees the persisted session.
    let state = use_state(|| SessionStore::browser().get());
    let handle = SessionHandle { state };

    html! {
        <ContextProvider<SessionHandle> context={handle}>
            { for props.children.iter() }
        </ContextProvider<SessionHandle>>
    }
}

/* ---------------- tests ---------------- */

#[cfg(test)]
pub(crate) mod testing {
    use super::*;
    use std::cell::RefCell;

    /// Deterministic stand-in for local storage.
    #[derive(Default)]
    pub struct MemoryBackend {
        slot: RefCell<Option<String>>,
    }

    impl StorageBackend for MemoryBackend {
        fn read(&self) -> Option<String> {
            self.slot.borrow().clone()
        }

        fn write(&self, raw: &str) {
            *self.slot.borrow_mut() = Some(raw.to_string());
        }

        fn remove(&self) {
            *self.slot.borrow_mut() = None;
        }
    }

    pub fn memory_store() -> SessionStore<MemoryBackend> {
        SessionStore::new(MemoryBackend::default())
    }

    pub fn sample_session(role: Role) -> Session {
        Session {
            token: "tok-123".to_string(),
            user: UserProfile {
                id: Some(7),
                full_name: "Jane Doe".to_string(),
                email: "jane@example.com".to_string(),
                phone_number: None,
                role,
                active: true,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::testing::{memory_store, sample_session};
    use super::*;

    #[test]
    fn set_then_get_returns_exactly_what_was_written() {
        let store = memory_store();
        let session = sample_session(Role::Customer);
        store.set(&session);
        assert_eq!(store.get(), Some(session));
    }

    #[test]
    fn clear_always_yields_absent() {
        let store = memory_store();
        store.clear();
        assert_eq!(store.get(), None);

        store.set(&sample_session(Role::Admin));
        store.clear();
        assert_eq!(store.get(), None);
    }

    #[test]
    fn set_overwrites_any_prior_session() {
        let store = memory_store();
        store.set(&sample_session(Role::Customer));
        let admin = sample_session(Role::Admin);
        store.set(&admin);
        assert_eq!(store.get(), Some(admin));
    }

    #[test]
    fn corrupt_record_reads_as_logged_out() {
        let store = memory_store();
        store.backend.write("{not json");
        assert_eq!(store.get(), None);
    }

    #[test]
    fn partial_record_reads_as_logged_out() {
        // Token without a user violates the pairing invariant; treated as a
        // recoverable inconsistency, not a session.
        let store = memory_store();
        store.backend.write(r#"{"token":"tok-123"}"#);
        assert_eq!(store.get(), None);
    }

    #[test]
    fn auth_response_without_token_is_rejected() {
        let auth = AuthResponse {
            token: None,
            email: "jane@example.com".to_string(),
            full_name: "Jane Doe".to_string(),
            role: Role::Customer,
        };
        assert_eq!(session_from_auth(auth), Err(SessionError::MissingToken));
    }

    #[test]
    fn blank_token_counts_as_missing() {
        let auth = AuthResponse {
            token: Some("   ".to_string()),
            email: "jane@example.com".to_string(),
            full_name: "Jane Doe".to_string(),
            role: Role::Customer,
        };
        assert_eq!(session_from_auth(auth), Err(SessionError::MissingToken));
    }

    #[test]
    fn valid_auth_response_becomes_a_session() {
        let auth = AuthResponse {
            token: Some("tok-abc".to_string()),
            email: "jane@example.com".to_string(),
            full_name: "Jane Doe".to_string(),
            role: Role::Staff,
        };
        let session = session_from_auth(auth).unwrap();
        assert_eq!(session.token, "tok-abc");
        assert_eq!(session.role(), Role::Staff);
        assert_eq!(session.user.email, "jane@example.com");
    }
}
