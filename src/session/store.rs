//! Per-client session storage
//!
//! Each browser gets its own [`Session`], addressed by an opaque id kept in
//! a cookie. The map lock only guards lookups; every session sits behind
//! its own mutex, so requests from one client run one after another while
//! other clients (and the map) are never blocked by a database write.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

use chrono::{DateTime, Duration, Utc};
use uuid::Uuid;

use super::Session;

type SharedSession = Arc<Mutex<Session>>;

struct Entry {
    session: SharedSession,
    last_seen: DateTime<Utc>,
}

/// In-memory map of live sessions
pub struct SessionStore {
    entries: Mutex<HashMap<String, Entry>>,
    photo_count: usize,
    ttl: Duration,
}

// A panic mid-request leaves the guarded value usable
fn lock_ignoring_poison<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

impl SessionStore {
    pub fn new(photo_count: usize, ttl: Duration) -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
            photo_count,
            ttl,
        }
    }

    /// Run `f` on the client's session, starting a new one under a fresh
    /// id when `id` is missing or unknown. Returns the id actually used.
    pub fn with_session<F, T>(&self, id: Option<&str>, f: F) -> (String, T)
    where
        F: FnOnce(&mut Session) -> T,
    {
        self.with_session_at(id, Utc::now(), f)
    }

    pub fn with_session_at<F, T>(&self, id: Option<&str>, now: DateTime<Utc>, f: F) -> (String, T)
    where
        F: FnOnce(&mut Session) -> T,
    {
        let (id, shared) = self.checkout(id, now);
        let mut session = lock_ignoring_poison(&shared);
        let result = f(&mut session);
        (id, result)
    }

    fn checkout(&self, id: Option<&str>, now: DateTime<Utc>) -> (String, SharedSession) {
        let mut entries = lock_ignoring_poison(&self.entries);
        self.prune(&mut entries, now);

        if let Some(id) = id {
            if let Some(entry) = entries.get_mut(id) {
                entry.last_seen = now;
                return (id.to_string(), Arc::clone(&entry.session));
            }
        }

        let new_id = Uuid::new_v4().to_string();
        tracing::debug!("Starting new quiz session {}", new_id);
        let session = Arc::new(Mutex::new(Session::new(self.photo_count)));
        entries.insert(
            new_id.clone(),
            Entry {
                session: Arc::clone(&session),
                last_seen: now,
            },
        );
        (new_id, session)
    }

    /// Number of live sessions
    pub fn len(&self) -> usize {
        lock_ignoring_poison(&self.entries).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn prune(&self, entries: &mut HashMap<String, Entry>, now: DateTime<Utc>) {
        let before = entries.len();
        entries.retain(|_, entry| now - entry.last_seen <= self.ttl);

        let evicted = before - entries.len();
        if evicted > 0 {
            tracing::info!("Evicted {} idle quiz sessions", evicted);
        }
    }
}
