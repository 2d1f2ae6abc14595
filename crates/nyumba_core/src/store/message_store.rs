//! Typed housing-message store over the ordered map.
//!
//! # Responsibility
//! - Translate between `HousingMessage` records and stored value envelopes.
//! - Keep envelope format details inside the storage boundary.
//!
//! # Invariants
//! - Envelopes are JSON bytes bounded by the map's value size limit.
//! - Corrupt persisted envelopes surface as `InvalidData`, never panics.

use crate::model::message::HousingMessage;
use crate::store::stable_map::{StableMap, StoreError, StoreResult};
use rusqlite::Connection;

/// Store interface for housing message records.
pub trait MessageStore {
    /// Returns all records in ascending key order.
    fn list(&self) -> StoreResult<Vec<HousingMessage>>;
    /// Returns the record stored under `id`, if any.
    fn get(&self, id: &str) -> StoreResult<Option<HousingMessage>>;
    /// Writes `message` under its own id, overwriting any existing record.
    fn insert(&self, message: &HousingMessage) -> StoreResult<()>;
    /// Deletes and returns the record stored under `id`, if any.
    fn remove(&self, id: &str) -> StoreResult<Option<HousingMessage>>;
}

/// SQLite-backed message store.
pub struct SqliteMessageStore<'conn> {
    map: StableMap<'conn>,
}

impl<'conn> SqliteMessageStore<'conn> {
    /// Constructs a store from a migrated/ready connection.
    pub fn try_new(conn: &'conn Connection) -> StoreResult<Self> {
        Ok(Self {
            map: StableMap::try_new(conn)?,
        })
    }
}

impl MessageStore for SqliteMessageStore<'_> {
    fn list(&self) -> StoreResult<Vec<HousingMessage>> {
        self.map
            .values()?
            .iter()
            .map(|envelope| decode_message(envelope))
            .collect()
    }

    fn get(&self, id: &str) -> StoreResult<Option<HousingMessage>> {
        match self.map.get(id)? {
            Some(envelope) => Ok(Some(decode_message(&envelope)?)),
            None => Ok(None),
        }
    }

    fn insert(&self, message: &HousingMessage) -> StoreResult<()> {
        let envelope = encode_message(message)?;
        self.map.insert(&message.id, &envelope)
    }

    fn remove(&self, id: &str) -> StoreResult<Option<HousingMessage>> {
        match self.map.remove(id)? {
            Some(envelope) => Ok(Some(decode_message(&envelope)?)),
            None => Ok(None),
        }
    }
}

fn encode_message(message: &HousingMessage) -> StoreResult<Vec<u8>> {
    serde_json::to_vec(message)
        .map_err(|err| StoreError::InvalidData(format!("failed to encode record: {err}")))
}

fn decode_message(envelope: &[u8]) -> StoreResult<HousingMessage> {
    serde_json::from_slice(envelope)
        .map_err(|err| StoreError::InvalidData(format!("failed to decode record: {err}")))
}
