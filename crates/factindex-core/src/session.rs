use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Identifiers scoped to one page load. Created once and passed to whatever
/// needs them; nothing caches them globally.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionContext {
    /// Analytics token attached to search requests (`userToken`).
    pub search_session_id: String,
    pub chat_session_id: String,
    pub created_at: DateTime<Utc>,
}

#[must_use]
pub fn create_session() -> SessionContext {
    create_session_at(Utc::now())
}

#[must_use]
pub fn create_session_at(now: DateTime<Utc>) -> SessionContext {
    SessionContext {
        search_session_id: search_token(now),
        chat_session_id: Uuid::new_v4().to_string(),
        created_at: now,
    }
}

fn search_token(now: DateTime<Utc>) -> String {
    let entropy = Uuid::new_v4().simple().to_string();
    format!("user_{}_{}", now.timestamp_millis(), &entropy[..13])
}
