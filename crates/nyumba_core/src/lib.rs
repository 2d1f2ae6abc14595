//! Core domain logic for the Nyumba housing message board.
//! This crate is the single source of truth for record-store invariants.

pub mod db;
pub mod logging;
pub mod model;
pub mod service;
pub mod store;

pub use logging::{default_log_level, init_logging, logging_status};
pub use model::message::{HousingMessage, MessagePayload};
pub use service::message_service::{MessageService, ServiceError, ServiceResult};
pub use store::message_store::{MessageStore, SqliteMessageStore};
pub use store::stable_map::{
    StableMap, StoreError, StoreResult, MAX_KEY_BYTES, MAX_VALUE_BYTES,
};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
