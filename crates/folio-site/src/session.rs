//! Per-visitor session state keyed by a cookie.
//!
//! Sessions hold the visitor's current CSRF token and the time of their last
//! accepted contact submission. They live in a moka cache and expire after a
//! period of inactivity; the cookie itself has no expiry, so it disappears
//! when the browser session ends.

use std::sync::Arc;
use std::time::{Duration, Instant};

use axum::http::{HeaderMap, HeaderValue, header};
use folio_core::contact::{ContactError, Cooldown};
use moka::future::Cache;
use parking_lot::Mutex;
use uuid::Uuid;

/// Name of the session cookie.
pub const SESSION_COOKIE: &str = "folio_sid";

/// Maximum number of live sessions.
const SESSION_CAPACITY: u64 = 50_000;

/// Sessions idle for longer than this are dropped.
const SESSION_IDLE: Duration = Duration::from_secs(12 * 3600);

/// State stored for one visitor.
#[derive(Debug, Default)]
pub struct Session {
    /// Token mirrored into the hidden field of the most recently rendered form.
    pub csrf_token: Option<String>,
    /// When the last contact submission was accepted.
    pub last_contact_submit: Option<Instant>,
}

/// Shared handle to one session's state.
pub type SessionHandle = Arc<Mutex<Session>>;

/// A session resolved for the current request.
#[derive(Debug, Clone)]
pub struct ActiveSession {
    pub id: String,
    pub handle: SessionHandle,
    /// Whether the session was created by this request (cookie must be set).
    pub is_new: bool,
}

impl ActiveSession {
    /// Generate a new CSRF token, store it in the session and return it.
    pub fn issue_csrf_token(&self) -> String {
        let token = folio_core::csrf::generate_token();
        self.handle.lock().csrf_token = Some(token.clone());
        token
    }

    /// The stored CSRF token, if any form has been rendered for this session.
    pub fn csrf_token(&self) -> Option<String> {
        self.handle.lock().csrf_token.clone()
    }

    /// Start the contact cooldown at `now` unless one is still running.
    ///
    /// The check and the update happen under one lock, so concurrent
    /// submissions from the same session cannot both be accepted.
    pub fn claim_contact_slot(&self, cooldown: &Cooldown, now: Instant) -> Result<(), ContactError> {
        let mut session = self.handle.lock();
        cooldown.check(session.last_contact_submit, now)?;
        session.last_contact_submit = Some(now);
        Ok(())
    }

    /// `Set-Cookie` header for a newly created session.
    pub fn set_cookie(&self) -> Option<HeaderValue> {
        if !self.is_new {
            return None;
        }
        HeaderValue::from_str(&format!(
            "{SESSION_COOKIE}={}; Path=/; HttpOnly; SameSite=Lax",
            self.id
        ))
        .ok()
    }

    /// Add the session cookie to `headers` when needed.
    pub fn apply_cookie(&self, headers: &mut HeaderMap) {
        if let Some(cookie) = self.set_cookie() {
            headers.insert(header::SET_COOKIE, cookie);
        }
    }
}

/// In-memory session store.
#[derive(Clone)]
pub struct SessionStore {
    cache: Cache<String, SessionHandle>,
}

impl SessionStore {
    pub fn new() -> Self {
        let cache = Cache::builder()
            .max_capacity(SESSION_CAPACITY)
            .time_to_idle(SESSION_IDLE)
            .build();
        Self { cache }
    }

    /// Find the session named by the request's cookie, or start a new one.
    ///
    /// Unknown or expired ids are never adopted; a fresh id is issued instead.
    pub async fn resolve(&self, headers: &HeaderMap) -> ActiveSession {
        if let Some(id) = cookie_value(headers, SESSION_COOKIE) {
            if let Some(handle) = self.cache.get(id).await {
                return ActiveSession {
                    id: id.to_string(),
                    handle,
                    is_new: false,
                };
            }
            tracing::debug!("unknown session id, starting a new session");
        }

        let id = Uuid::new_v4().to_string();
        let handle: SessionHandle = Arc::new(Mutex::new(Session::default()));
        self.cache.insert(id.clone(), Arc::clone(&handle)).await;
        ActiveSession {
            id,
            handle,
            is_new: true,
        }
    }
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::new()
    }
}

/// Value of cookie `name` from the request's `Cookie` headers.
fn cookie_value<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(key, _)| *key == name)
        .map(|(_, value)| value)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn headers_with_cookie(cookie: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(header::COOKIE, HeaderValue::from_str(cookie).unwrap());
        headers
    }

    #[test]
    fn cookie_value_parses_pairs() {
        let headers = headers_with_cookie("theme=dark; folio_sid=abc-123; other=1");
        assert_eq!(cookie_value(&headers, SESSION_COOKIE), Some("abc-123"));
        assert_eq!(cookie_value(&headers, "theme"), Some("dark"));
        assert_eq!(cookie_value(&headers, "missing"), None);
    }

    #[tokio::test]
    async fn new_session_sets_cookie() {
        let store = SessionStore::new();
        let session = store.resolve(&HeaderMap::new()).await;
        assert!(session.is_new);
        let cookie = session.set_cookie().unwrap();
        let cookie = cookie.to_str().unwrap();
        assert!(cookie.starts_with(&format!("{SESSION_COOKIE}={}", session.id)));
        assert!(cookie.contains("HttpOnly"));
    }

    #[tokio::test]
    async fn contact_slot_claimed_once_per_window() {
        let store = SessionStore::new();
        let session = store.resolve(&HeaderMap::new()).await;
        let cooldown = Cooldown::new(Duration::from_secs(30));
        let start = Instant::now();

        assert!(session.claim_contact_slot(&cooldown, start).is_ok());
        assert!(matches!(
            session.claim_contact_slot(&cooldown, start + Duration::from_secs(10)),
            Err(ContactError::RateLimited { .. })
        ));
        assert_eq!(session.handle.lock().last_contact_submit, Some(start));
        assert!(session.claim_contact_slot(&cooldown, start + Duration::from_secs(30)).is_ok());
    }

    #[tokio::test]
    async fn existing_session_is_reused() {
        let store = SessionStore::new();
        let first = store.resolve(&HeaderMap::new()).await;
        let token = first.issue_csrf_token();

        let headers = headers_with_cookie(&format!("{SESSION_COOKIE}={}", first.id));
        let second = store.resolve(&headers).await;
        assert!(!second.is_new);
        assert_eq!(second.id, first.id);
        assert_eq!(second.csrf_token(), Some(token));
        assert!(second.set_cookie().is_none());
    }

    #[tokio::test]
    async fn unknown_session_id_is_replaced() {
        let store = SessionStore::new();
        let headers = headers_with_cookie(&format!("{SESSION_COOKIE}=forged"));
        let session = store.resolve(&headers).await;
        assert!(session.is_new);
        assert_ne!(session.id, "forged");
    }

    #[tokio::test]
    async fn issuing_rotates_token() {
        let store = SessionStore::new();
        let session = store.resolve(&HeaderMap::new()).await;
        let a = session.issue_csrf_token();
        let b = session.issue_csrf_token();
        assert_ne!(a, b);
        assert_eq!(session.csrf_token(), Some(b));
    }
}
