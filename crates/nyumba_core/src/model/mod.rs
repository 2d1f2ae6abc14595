//! Domain model for the housing message board.
//!
//! # Responsibility
//! - Define the canonical record and payload shapes used by core logic.
//!
//! # Invariants
//! - Every record is identified by a stable string id used as the store key.
//! - `created_at` is set once at creation and never changes afterwards.

pub mod message;
