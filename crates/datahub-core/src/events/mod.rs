//! Domain events emitted by DataHub operations.
//!
//! Events are recorded through `tracing` when an operation completes so
//! that audit and notification consumers outside this workspace can pick
//! them up from the structured log stream.

pub mod dataset;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub use dataset::DatasetEvent;

use crate::types::id::UserId;

/// Wrapper for all domain events with metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DomainEvent {
    /// Unique event ID.
    pub id: Uuid,
    /// When the event occurred.
    pub timestamp: DateTime<Utc>,
    /// The user who caused the event (if applicable).
    pub actor_id: Option<UserId>,
    /// The event payload.
    pub payload: EventPayload,
}

/// Union of all domain event types.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "domain", content = "event")]
pub enum EventPayload {
    /// A dataset-related event.
    Dataset(DatasetEvent),
}

impl DomainEvent {
    /// Create a new domain event stamped at `timestamp`.
    pub fn new(actor_id: Option<UserId>, timestamp: DateTime<Utc>, payload: EventPayload) -> Self {
        Self {
            id: Uuid::now_v7(),
            timestamp,
            actor_id,
            payload,
        }
    }

    /// Serialize the event for the structured log.
    pub fn to_json(&self) -> Result<String, crate::error::AppError> {
        Ok(serde_json::to_string(self)?)
    }
}
