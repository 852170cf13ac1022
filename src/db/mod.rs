//! Storage layer
//!
//! Defines the persistence capability (`UserStore`) the service facade
//! depends on, and connects the PostgreSQL pool at startup. Any backing
//! store satisfying the trait is substitutable; tests inject an in-memory
//! one.

use anyhow::{Context, Result};
use async_trait::async_trait;
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use thiserror::Error;

use crate::models::{EnrichedUser, UserFilter};

pub mod postgres;

/// Storage failure. `NotFound` is the only variant the facade reinterprets;
/// everything else stays opaque.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("user not found")]
    NotFound,

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Persistence capability for enriched user records.
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Insert a record, returning the assigned id.
    async fn save_user(&self, user: &EnrichedUser) -> Result<i64, StorageError>;

    /// Full-column update keyed on `user.id`, returning the row after the
    /// update. Fails with `NotFound` when no row matches.
    async fn edit_user(&self, user: &EnrichedUser) -> Result<EnrichedUser, StorageError>;

    /// Remove a record. Fails with `NotFound` when no row was affected.
    async fn delete_user(&self, id: i64) -> Result<(), StorageError>;

    /// Filtered listing in ascending id order.
    async fn get_users(&self, filter: &UserFilter) -> Result<Vec<EnrichedUser>, StorageError>;

    /// Fetch a single record by id.
    async fn get_user(&self, id: i64) -> Result<EnrichedUser, StorageError>;
}

/// Connect the PostgreSQL pool.
///
/// Connection is eager so an unreachable database fails startup instead of
/// the first request.
pub async fn connect(db_url: &str) -> Result<PgPool> {
    let pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(db_url)
        .await
        .context("failed to connect to database")?;

    Ok(pool)
}
