//! Per-visitor session plumbing.
//!
//! Sessions live in an in-memory map keyed by a `session_id` cookie. A
//! record is created on a visitor's first contact and dropped with the
//! process; there is no server-side expiry beyond that.

use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use services::SessionRecord;
use std::{collections::HashMap, sync::Arc};
use tokio::sync::RwLock;
use uuid::Uuid;

pub type SessionStore = Arc<RwLock<HashMap<Uuid, SessionRecord>>>;

pub const SESSION_COOKIE: &str = "session_id";

pub fn new_session_store() -> SessionStore {
    Arc::new(RwLock::new(HashMap::new()))
}

/// Resolve the visitor's session from the cookie jar, creating a fresh
/// record (and cookie) on first contact. Returns the possibly-updated jar
/// so the handler can attach it to the response.
pub async fn visitor_session(
    store: &SessionStore,
    jar: CookieJar,
) -> (Uuid, SessionRecord, CookieJar) {
    let existing_id = jar
        .get(SESSION_COOKIE)
        .and_then(|cookie| Uuid::parse_str(cookie.value()).ok());

    if let Some(id) = existing_id {
        if let Some(record) = store.read().await.get(&id) {
            return (id, record.clone(), jar);
        }
    }

    // First contact, or a cookie pointing at a session this process never
    // created (e.g. after a restart): start fresh.
    let id = Uuid::new_v4();
    store.write().await.insert(id, SessionRecord::default());

    let cookie = Cookie::build((SESSION_COOKIE, id.to_string()))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .build();

    (id, SessionRecord::default(), jar.add(cookie))
}

/// Write the (possibly mutated) record back into the store.
pub async fn store_session(store: &SessionStore, id: Uuid, record: SessionRecord) {
    store.write().await.insert(id, record);
}
