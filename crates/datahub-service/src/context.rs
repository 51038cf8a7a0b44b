//! Request context carrying the already-authorized actor.

use serde::{Deserialize, Serialize};

use datahub_core::types::id::UserId;

/// Context for the current request.
///
/// General edit permission has been resolved by the caller before a
/// service method is invoked; the context only records *who* is acting.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RequestContext {
    /// The acting user's ID.
    pub user_id: UserId,
    /// The acting user's name, for logs.
    pub username: String,
}

impl RequestContext {
    /// Creates a new request context.
    pub fn new(user_id: UserId, username: impl Into<String>) -> Self {
        Self {
            user_id,
            username: username.into(),
        }
    }
}
