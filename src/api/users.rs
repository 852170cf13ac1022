//! User CRUD handlers
//!
//! Decode requests, run validation and enrichment, route to the service
//! facade, and map failures to HTTP status codes.

use std::collections::HashMap;

use axum::extract::rejection::JsonRejection;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Serialize;

use crate::error::{ApiError, ApiResult};
use crate::models::{
    DeleteUserPayload, EditUserPayload, EnrichedUser, SaveUserPayload, UserFilter,
};
use crate::service::ServiceError;
use crate::validate::validate_all_names;
use crate::AppState;

/// Response for GET /
#[derive(Debug, Serialize)]
pub struct ListResponse {
    pub count: usize,
    pub users: Vec<EnrichedUser>,
}

/// Response for POST /add
#[derive(Debug, Serialize)]
pub struct AddResponse {
    pub id: i64,
}

/// Response for POST /edit
#[derive(Debug, Serialize)]
pub struct EditResponse {
    pub message: &'static str,
    pub user: EnrichedUser,
}

/// Response for POST /delete
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: &'static str,
}

fn string_param(params: &HashMap<String, String>, key: &str) -> Option<String> {
    params.get(key).filter(|value| !value.is_empty()).cloned()
}

/// Integer query params are best-effort: unparseable values are treated as
/// unset rather than rejected.
fn int_param<T: std::str::FromStr>(params: &HashMap<String, String>, key: &str) -> Option<T> {
    params.get(key).and_then(|value| value.parse().ok())
}

/// Build a listing filter from raw query parameters. `sex`, when present,
/// must be one of the two recognized values.
fn filter_from_params(params: &HashMap<String, String>) -> Result<UserFilter, ApiError> {
    let sex = string_param(params, "sex");
    if let Some(sex) = &sex {
        if sex != "male" && sex != "female" {
            return Err(ApiError::InvalidSex);
        }
    }

    Ok(UserFilter {
        name: string_param(params, "name"),
        surname: string_param(params, "surname"),
        patronymic: string_param(params, "patronymic"),
        age_from: int_param(params, "ageFrom"),
        age_to: int_param(params, "ageTo"),
        sex,
        country: string_param(params, "country"),
        limit: int_param(params, "limit"),
        offset: int_param(params, "offset"),
    })
}

/// GET /
///
/// Filtered, paginated listing of users.
pub async fn list_users(
    State(state): State<AppState>,
    Query(params): Query<HashMap<String, String>>,
) -> ApiResult<Json<ListResponse>> {
    let filter = filter_from_params(&params)?;

    let users = state
        .service
        .get_users(&filter)
        .await
        .map_err(|err| ApiError::Storage {
            context: "failed to get users",
            source: err,
        })?;

    Ok(Json(ListResponse {
        count: users.len(),
        users,
    }))
}

/// POST /add
///
/// Validate the name fields, enrich with the three inference lookups, and
/// persist the composed record. Enrichment is all-or-nothing: if any lookup
/// fails, nothing is stored.
pub async fn add_user(
    State(state): State<AppState>,
    payload: Result<Json<SaveUserPayload>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<AddResponse>)> {
    let Json(payload) = payload.map_err(|err| ApiError::Decode(err.body_text()))?;

    validate_all_names(&payload.name, &payload.surname, &payload.patronymic)?;

    let user = state.enricher.enrich(&payload).await?;

    let id = state
        .service
        .save_user(&user)
        .await
        .map_err(|err| ApiError::Storage {
            context: "failed to save user",
            source: err,
        })?;

    Ok((StatusCode::CREATED, Json(AddResponse { id })))
}

/// POST /edit
///
/// Overlay non-empty name fields onto the stored record; empty fields mean
/// "leave unchanged". Demographics are not re-inferred.
pub async fn edit_user(
    State(state): State<AppState>,
    payload: Result<Json<EditUserPayload>, JsonRejection>,
) -> ApiResult<Json<EditResponse>> {
    let Json(payload) = payload.map_err(|err| ApiError::Decode(err.body_text()))?;

    let user = state
        .service
        .edit_user(&payload)
        .await
        .map_err(|err| match err {
            ServiceError::UserNotFound => ApiError::UserNotFound,
            other => ApiError::Storage {
                context: "failed to update user",
                source: other,
            },
        })?;

    Ok(Json(EditResponse {
        message: "user updated successfully",
        user,
    }))
}

/// POST /delete
pub async fn delete_user(
    State(state): State<AppState>,
    payload: Result<Json<DeleteUserPayload>, JsonRejection>,
) -> ApiResult<Json<MessageResponse>> {
    let Json(payload) = payload.map_err(|err| ApiError::Decode(err.body_text()))?;

    state
        .service
        .delete_user(payload.id)
        .await
        .map_err(|err| match err {
            ServiceError::UserNotFound => ApiError::UserNotFound,
            other => ApiError::Storage {
                context: "failed to delete user",
                source: other,
            },
        })?;

    Ok(Json(MessageResponse {
        message: "user deleted",
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_filter_accepts_valid_sex() {
        let filter = filter_from_params(&params(&[("sex", "female")])).unwrap();
        assert_eq!(filter.sex.as_deref(), Some("female"));
    }

    #[test]
    fn test_filter_rejects_unknown_sex() {
        let err = filter_from_params(&params(&[("sex", "other")])).unwrap_err();
        assert!(matches!(err, ApiError::InvalidSex));
    }

    #[test]
    fn test_unparseable_integers_are_unset() {
        let filter =
            filter_from_params(&params(&[("ageFrom", "abc"), ("limit", "ten")])).unwrap();
        assert_eq!(filter.age_from, None);
        assert_eq!(filter.limit, None);
    }

    #[test]
    fn test_empty_strings_are_unset() {
        let filter = filter_from_params(&params(&[("name", ""), ("sex", "")])).unwrap();
        assert_eq!(filter.name, None);
        assert_eq!(filter.sex, None);
    }

    #[test]
    fn test_full_filter_parse() {
        let filter = filter_from_params(&params(&[
            ("name", "Dmi"),
            ("ageFrom", "25"),
            ("ageTo", "35"),
            ("limit", "2"),
            ("offset", "1"),
        ]))
        .unwrap();
        assert_eq!(filter.name.as_deref(), Some("Dmi"));
        assert_eq!(filter.age_from, Some(25));
        assert_eq!(filter.age_to, Some(35));
        assert_eq!(filter.limit, Some(2));
        assert_eq!(filter.offset, Some(1));
    }
}
