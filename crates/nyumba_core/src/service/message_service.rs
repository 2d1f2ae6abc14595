//! Housing message use-case service.
//!
//! # Responsibility
//! - Provide the board's list/get/add/update/delete entry points.
//! - Own id generation and timestamping for create/update paths.
//!
//! # Invariants
//! - NotFound messages carry the requested id and the attempted operation.
//! - Update preserves `id` and `created_at` and refreshes `updated_at`.
//! - `blockchain_features` leaves this layer empty on every path.

use crate::model::message::{now_nanos, HousingMessage, MessagePayload};
use crate::store::message_store::MessageStore;
use crate::store::stable_map::StoreError;
use log::{info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type ServiceResult<T> = Result<T, ServiceError>;

/// Service-level error for message operations.
///
/// `NotFound` is the only recoverable kind; `Store` passes fatal storage
/// conditions (size bounds, corrupt data, transport) through unchanged.
#[derive(Debug)]
pub enum ServiceError {
    NotFound(String),
    Store(StoreError),
}

impl Display for ServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotFound(message) => write!(f, "{message}"),
            Self::Store(err) => write!(f, "{err}"),
        }
    }
}

impl Error for ServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::NotFound(_) => None,
            Self::Store(err) => Some(err),
        }
    }
}

impl From<StoreError> for ServiceError {
    fn from(value: StoreError) -> Self {
        Self::Store(value)
    }
}

/// Use-case service wrapper for housing message operations.
pub struct MessageService<S: MessageStore> {
    store: S,
}

impl<S: MessageStore> MessageService<S> {
    /// Creates a service using the provided store implementation.
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Returns all messages in store order. Never fails with NotFound.
    pub fn list_messages(&self) -> ServiceResult<Vec<HousingMessage>> {
        let messages = self.store.list()?;
        info!(
            "event=message_list module=service status=ok count={}",
            messages.len()
        );
        Ok(messages)
    }

    /// Returns one message by id.
    pub fn get_message(&self, id: &str) -> ServiceResult<HousingMessage> {
        match self.store.get(id)? {
            Some(message) => Ok(message),
            None => {
                warn!("event=message_get module=service status=not_found id={id}");
                Err(ServiceError::NotFound(format!(
                    "A message with id={id} not found"
                )))
            }
        }
    }

    /// Creates a new message from the payload and persists it.
    ///
    /// # Contract
    /// - Generates a fresh unique id.
    /// - Sets `created_at` to current host time, `updated_at` absent.
    pub fn create_message(&self, payload: MessagePayload) -> ServiceResult<HousingMessage> {
        let message = HousingMessage::new(payload);
        self.store.insert(&message)?;
        info!(
            "event=message_create module=service status=ok id={}",
            message.id
        );
        Ok(message)
    }

    /// Overwrites an existing message's payload fields.
    ///
    /// # Contract
    /// - `id` and `created_at` are preserved.
    /// - `updated_at` is set to current host time.
    pub fn update_message(
        &self,
        id: &str,
        payload: MessagePayload,
    ) -> ServiceResult<HousingMessage> {
        let Some(existing) = self.store.get(id)? else {
            warn!("event=message_update module=service status=not_found id={id}");
            return Err(ServiceError::NotFound(format!(
                "Couldn't update a message with id={id}. Message not found"
            )));
        };

        let updated = existing.apply_payload(payload, now_nanos());
        self.store.insert(&updated)?;
        info!("event=message_update module=service status=ok id={id}");
        Ok(updated)
    }

    /// Removes a message and returns it to the caller.
    pub fn delete_message(&self, id: &str) -> ServiceResult<HousingMessage> {
        match self.store.remove(id)? {
            Some(message) => {
                info!("event=message_delete module=service status=ok id={id}");
                Ok(message)
            }
            None => {
                warn!("event=message_delete module=service status=not_found id={id}");
                Err(ServiceError::NotFound(format!(
                    "Couldn't delete a message with id={id}. Message not found."
                )))
            }
        }
    }
}
