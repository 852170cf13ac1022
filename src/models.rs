//! Domain models shared across the API, enrichment, and storage layers

use serde::{Deserialize, Serialize};

/// Payload for creating a user; only name fields are supplied by the caller,
/// demographics are filled in by enrichment.
#[derive(Debug, Clone, Deserialize)]
pub struct SaveUserPayload {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub surname: String,
    #[serde(default)]
    pub patronymic: String,
}

/// Payload for editing a user. Empty name fields mean "leave unchanged".
#[derive(Debug, Clone, Deserialize)]
pub struct EditUserPayload {
    pub id: i64,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub surname: String,
    #[serde(default)]
    pub patronymic: String,
}

/// Payload for deleting a user by id.
#[derive(Debug, Clone, Deserialize)]
pub struct DeleteUserPayload {
    pub id: i64,
}

/// One nationality guess: ISO 3166 alpha-2 code plus the probability the
/// inference service assigned to it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Country {
    pub country_id: String,
    pub probability: f64,
}

/// A person record after enrichment. `id` is 0 until the store assigns one.
///
/// `countries` keeps the exact order returned by the nationality inference;
/// storage round-trips it without reordering or dedup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnrichedUser {
    pub id: i64,
    pub name: String,
    pub surname: String,
    /// Empty string when the person has no patronymic.
    pub patronymic: String,
    pub age: i32,
    /// "male", "female", or empty when inference yielded none.
    pub sex: String,
    pub countries: Vec<Country>,
}

/// Listing filter. `None` fields are not applied; age bounds and pagination
/// are additionally ignored unless positive.
#[derive(Debug, Clone, Default)]
pub struct UserFilter {
    pub name: Option<String>,
    pub surname: Option<String>,
    pub patronymic: Option<String>,
    pub age_from: Option<i32>,
    pub age_to: Option<i32>,
    pub sex: Option<String>,
    pub country: Option<String>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}
