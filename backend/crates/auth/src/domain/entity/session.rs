//! Session Entity
//!
//! One row per user, keyed by the raw access token. Logging in again
//! replaces the previous row, which is what makes a login the user's
//! only live session.

use chrono::{DateTime, Utc};

use crate::domain::value_object::UserId;

/// A login session record
#[derive(Debug, Clone)]
pub struct Session {
    /// The raw access token issued at login
    pub session_key: String,
    pub user_id: UserId,
    pub created_at: DateTime<Utc>,
}

impl Session {
    pub fn new(session_key: String, user_id: UserId) -> Self {
        Self {
            session_key,
            user_id,
            created_at: Utc::now(),
        }
    }
}
