//! Record store layer: the ordered map and its typed message wrapper.
//!
//! # Responsibility
//! - Provide a persistent ordered key-value map with fixed size bounds.
//! - Provide a typed message store that owns record (de)serialization.
//!
//! # Invariants
//! - Keys never exceed [`stable_map::MAX_KEY_BYTES`] in serialized form.
//! - Values never exceed [`stable_map::MAX_VALUE_BYTES`] in serialized form.
//! - Store APIs return semantic absence (`Option`) in addition to storage
//!   transport errors; turning absence into NotFound is the service's job.

pub mod message_store;
pub mod stable_map;
