//! User service facade
//!
//! Thin typed layer between the HTTP handlers and the persistence
//! capability. Logs every operation with an `op` tag, wraps storage
//! failures preserving the cause, and lifts the store's not-found into a
//! domain-level error. Edit overlay semantics live here.

use std::sync::Arc;

use thiserror::Error;
use tracing::{error, info};

use crate::db::{StorageError, UserStore};
use crate::models::{EditUserPayload, EnrichedUser, UserFilter};

/// Service-level failure seen by the HTTP handlers.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// The referenced user does not exist.
    #[error("user not found")]
    UserNotFound,

    /// Any other storage failure, cause preserved.
    #[error(transparent)]
    Storage(StorageError),
}

fn map_storage(err: StorageError) -> ServiceError {
    match err {
        StorageError::NotFound => ServiceError::UserNotFound,
        other => ServiceError::Storage(other),
    }
}

/// Facade over the user store.
pub struct UserService {
    store: Arc<dyn UserStore>,
}

impl UserService {
    pub fn new(store: Arc<dyn UserStore>) -> Self {
        Self { store }
    }

    /// Persist an enriched user, returning the assigned id.
    pub async fn save_user(&self, user: &EnrichedUser) -> Result<i64, ServiceError> {
        info!(op = "save_user", "attempting to save user");

        match self.store.save_user(user).await {
            Ok(id) => Ok(id),
            Err(err) => {
                error!(op = "save_user", error = %err, "failed to save user");
                Err(map_storage(err))
            }
        }
    }

    /// Apply an edit overlay: load the current record, replace any non-empty
    /// name fields from the payload, and persist the result. Demographics
    /// are never re-inferred here.
    pub async fn edit_user(&self, payload: &EditUserPayload) -> Result<EnrichedUser, ServiceError> {
        info!(op = "edit_user", id = payload.id, "attempting to edit user");

        let mut user = match self.store.get_user(payload.id).await {
            Ok(user) => user,
            Err(err) => {
                error!(op = "edit_user", id = payload.id, error = %err, "failed to load user");
                return Err(map_storage(err));
            }
        };

        if !payload.name.is_empty() {
            user.name = payload.name.clone();
        }
        if !payload.surname.is_empty() {
            user.surname = payload.surname.clone();
        }
        if !payload.patronymic.is_empty() {
            user.patronymic = payload.patronymic.clone();
        }

        match self.store.edit_user(&user).await {
            Ok(updated) => Ok(updated),
            Err(err) => {
                error!(op = "edit_user", id = payload.id, error = %err, "failed to edit user");
                Err(map_storage(err))
            }
        }
    }

    /// Delete a user by id.
    pub async fn delete_user(&self, id: i64) -> Result<(), ServiceError> {
        info!(op = "delete_user", id = id, "attempting to delete user");

        match self.store.delete_user(id).await {
            Ok(()) => Ok(()),
            Err(err) => {
                error!(op = "delete_user", id = id, error = %err, "failed to delete user");
                Err(map_storage(err))
            }
        }
    }

    /// Filtered listing.
    pub async fn get_users(&self, filter: &UserFilter) -> Result<Vec<EnrichedUser>, ServiceError> {
        info!(op = "get_users", "attempting to get users");

        match self.store.get_users(filter).await {
            Ok(users) => Ok(users),
            Err(err) => {
                error!(op = "get_users", error = %err, "failed to get users");
                Err(map_storage(err))
            }
        }
    }

    /// Fetch a single user by id.
    pub async fn get_user(&self, id: i64) -> Result<EnrichedUser, ServiceError> {
        info!(op = "get_user", id = id, "attempting to get user");

        match self.store.get_user(id).await {
            Ok(user) => Ok(user),
            Err(err) => {
                error!(op = "get_user", id = id, error = %err, "failed to get user");
                Err(map_storage(err))
            }
        }
    }
}
