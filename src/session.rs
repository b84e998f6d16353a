//! Per-visitor in-memory state, keyed by the visitor cookie.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

use tokio::sync::Mutex;

use crate::screens::community::CommunityScreen;
use crate::upload::UploadWidget;

pub const VISITOR_COOKIE: &str = "cropcare_visitor";

/// Each piece sits behind its own lock so a slow backend call on one screen
/// doesn't hold up the other.
#[derive(Clone)]
pub struct VisitorState {
    pub upload: Arc<Mutex<UploadWidget>>,
    pub community: Arc<Mutex<CommunityScreen>>,
}

pub struct SessionStore {
    sessions: HashMap<String, (Instant, VisitorState)>,
    idle: Duration,
    max_upload_bytes: u64,
}

impl SessionStore {
    pub fn new(idle: Duration, max_upload_bytes: u64) -> Self {
        Self {
            sessions: HashMap::new(),
            idle,
            max_upload_bytes,
        }
    }

    /// Fetches the visitor's state, creating it on first sight. Touching a
    /// session resets its idle clock and evicts the ones that ran out.
    pub fn visitor(&mut self, id: &str) -> VisitorState {
        self.clear_stale();
        let max_upload_bytes = self.max_upload_bytes;
        let entry = self.sessions.entry(id.to_string()).or_insert_with(|| {
            tracing::debug!(visitor = id, "New visitor session");
            (
                Instant::now(),
                VisitorState {
                    upload: Arc::new(Mutex::new(UploadWidget::new(max_upload_bytes))),
                    community: Arc::new(Mutex::new(CommunityScreen::new())),
                },
            )
        });
        entry.0 = Instant::now();
        entry.1.clone()
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }

    fn clear_stale(&mut self) {
        let Some(cutoff) = Instant::now().checked_sub(self.idle) else {
            return;
        };
        let before = self.sessions.len();
        self.sessions.retain(|_, (seen, _)| *seen > cutoff);
        let evicted = before - self.sessions.len();
        if evicted > 0 {
            tracing::debug!(evicted, "Evicted idle visitor sessions");
        }
    }
}

pub fn new_visitor_id() -> String {
    uuid::Uuid::now_v7().to_string()
}

pub fn visitor_cookie(id: &str, idle: Duration) -> String {
    format!(
        "{}={}; HttpOnly; SameSite=Lax; Path=/; Max-Age={}",
        VISITOR_COOKIE,
        id,
        idle.as_secs()
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::upload::MAX_UPLOAD_BYTES;

    #[tokio::test]
    async fn same_id_returns_same_state() {
        let mut store = SessionStore::new(Duration::from_secs(60), MAX_UPLOAD_BYTES);
        let first = store.visitor("abc");
        let second = store.visitor("abc");
        assert!(Arc::ptr_eq(&first.upload, &second.upload));
        assert!(Arc::ptr_eq(&first.community, &second.community));
        assert_eq!(store.len(), 1);
    }

    #[tokio::test]
    async fn visitors_are_isolated() {
        let mut store = SessionStore::new(Duration::from_secs(60), MAX_UPLOAD_BYTES);
        let a = store.visitor("a");
        let b = store.visitor("b");
        assert!(!Arc::ptr_eq(&a.upload, &b.upload));
        assert_eq!(store.len(), 2);
    }

    #[tokio::test]
    async fn idle_sessions_are_evicted() {
        let mut store = SessionStore::new(Duration::from_millis(10), MAX_UPLOAD_BYTES);
        store.visitor("old");
        std::thread::sleep(Duration::from_millis(30));

        store.visitor("new");

        assert_eq!(store.len(), 1);
    }

    #[test]
    fn widget_uses_configured_limit() {
        let mut store = SessionStore::new(Duration::from_secs(60), 1024);
        let state = store.visitor("abc");
        assert_eq!(state.upload.try_lock().unwrap().max_bytes(), 1024);
    }

    #[test]
    fn cookie_is_http_only() {
        let cookie = visitor_cookie("abc", Duration::from_secs(1800));
        assert_eq!(
            cookie,
            "cropcare_visitor=abc; HttpOnly; SameSite=Lax; Path=/; Max-Age=1800"
        );
    }
}
