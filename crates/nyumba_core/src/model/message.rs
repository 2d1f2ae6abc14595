//! Housing message domain model.
//!
//! # Responsibility
//! - Define the canonical housing message record and its caller payload.
//! - Own creation and payload-merge semantics, including timestamping rules.
//!
//! # Invariants
//! - `id` is stable and never reused for another message.
//! - `created_at` is immutable after creation.
//! - `updated_at` is `Some` iff the record has been updated at least once.
//! - `blockchain_features` is always empty; no code path populates it.

use serde::{Deserialize, Serialize};
use std::time::{SystemTime, UNIX_EPOCH};
use uuid::Uuid;

/// A message listed on the housing board.
///
/// Field names serialize in camelCase to match the external schema.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HousingMessage {
    /// Stable unique identifier, generated at creation.
    pub id: String,
    /// Message title, free text.
    pub title: String,
    /// Message body, free text.
    pub body: String,
    /// Attachment location, free text (not validated as a URL).
    #[serde(rename = "attachmentURL")]
    pub attachment_url: String,
    /// Creation time, nanoseconds since the Unix epoch.
    pub created_at: u64,
    /// Last update time; absent until the first update.
    pub updated_at: Option<u64>,
    /// Reserved placeholder. Always empty in every code path.
    pub blockchain_features: Vec<String>,
}

/// Caller-supplied fields for create and update operations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MessagePayload {
    pub title: String,
    pub body: String,
    #[serde(rename = "attachmentURL")]
    pub attachment_url: String,
}

impl HousingMessage {
    /// Creates a new message from a payload with a generated id.
    ///
    /// # Invariants
    /// - `created_at` is the current host time.
    /// - `updated_at` starts absent.
    /// - `blockchain_features` starts empty.
    pub fn new(payload: MessagePayload) -> Self {
        Self::with_id(Uuid::new_v4().to_string(), payload, now_nanos())
    }

    /// Creates a message with a caller-provided id and creation time.
    ///
    /// Used by tests and import paths where identity already exists.
    pub fn with_id(id: impl Into<String>, payload: MessagePayload, created_at: u64) -> Self {
        Self {
            id: id.into(),
            title: payload.title,
            body: payload.body,
            attachment_url: payload.attachment_url,
            created_at,
            updated_at: None,
            blockchain_features: Vec::new(),
        }
    }

    /// Produces the updated record for this message.
    ///
    /// # Contract
    /// - Payload fields overwrite the stored ones.
    /// - `id` and `created_at` are preserved.
    /// - `updated_at` becomes `Some(updated_at)`.
    /// - `blockchain_features` is reset to empty.
    pub fn apply_payload(&self, payload: MessagePayload, updated_at: u64) -> Self {
        Self {
            id: self.id.clone(),
            title: payload.title,
            body: payload.body,
            attachment_url: payload.attachment_url,
            created_at: self.created_at,
            updated_at: Some(updated_at),
            blockchain_features: Vec::new(),
        }
    }

    /// Returns whether this message has ever been updated.
    pub fn is_updated(&self) -> bool {
        self.updated_at.is_some()
    }
}

/// Current host time as nanoseconds since the Unix epoch.
pub fn now_nanos() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_nanos() as u64)
        .unwrap_or(0)
}
