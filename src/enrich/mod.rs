//! Demographic enrichment
//!
//! Combines a validated creation payload with three independent inference
//! lookups (age, sex, nationalities) into a single `EnrichedUser`. The
//! lookups fan out concurrently; if any of them fails the whole enrichment
//! fails and nothing is persisted.

pub mod clients;

use std::time::Duration;

use thiserror::Error;
use tracing::debug;

use crate::models::{EnrichedUser, SaveUserPayload};
use clients::{AgeClient, ClientError, GenderClient, NationalityClient};

const AGIFY_URL: &str = "https://api.agify.io/";
const GENDERIZE_URL: &str = "https://api.genderize.io/";
const NATIONALIZE_URL: &str = "https://api.nationalize.io/";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Enrichment failure, naming the lookup that failed.
#[derive(Debug, Error)]
pub enum EnrichError {
    #[error("failed to get age: {0}")]
    Age(#[source] ClientError),

    #[error("failed to get gender: {0}")]
    Gender(#[source] ClientError),

    #[error("failed to get nationality: {0}")]
    Nationality(#[source] ClientError),
}

/// Enrichment orchestrator over the three inference clients.
pub struct Enricher {
    age: AgeClient,
    gender: GenderClient,
    nationality: NationalityClient,
}

impl Enricher {
    /// Create an enricher against the public inference APIs.
    pub fn new() -> Result<Self, reqwest::Error> {
        Self::with_base_urls(
            AGIFY_URL.to_string(),
            GENDERIZE_URL.to_string(),
            NATIONALIZE_URL.to_string(),
        )
    }

    /// Create an enricher against explicit base URLs. Tests point this at
    /// local mock servers.
    pub fn with_base_urls(
        agify_url: String,
        genderize_url: String,
        nationalize_url: String,
    ) -> Result<Self, reqwest::Error> {
        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()?;

        Ok(Self {
            age: AgeClient::new(http.clone(), agify_url),
            gender: GenderClient::new(http.clone(), genderize_url),
            nationality: NationalityClient::new(http, nationalize_url),
        })
    }

    /// Enrich a creation payload into a full user record with `id = 0`.
    ///
    /// The three lookups run concurrently; the first failure cancels the
    /// rest and fails the enrichment as a whole.
    pub async fn enrich(&self, payload: &SaveUserPayload) -> Result<EnrichedUser, EnrichError> {
        debug!(name = %payload.name, "enriching user data");

        let (age, sex, countries) = tokio::try_join!(
            async {
                self.age
                    .lookup(&payload.name)
                    .await
                    .map_err(EnrichError::Age)
            },
            async {
                self.gender
                    .lookup(&payload.name)
                    .await
                    .map_err(EnrichError::Gender)
            },
            async {
                self.nationality
                    .lookup(&payload.name)
                    .await
                    .map_err(EnrichError::Nationality)
            },
        )?;

        Ok(EnrichedUser {
            id: 0,
            name: payload.name.clone(),
            surname: payload.surname.clone(),
            patronymic: payload.patronymic.clone(),
            age,
            sex,
            countries,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{routing::get, Json, Router};
    use serde_json::{json, Value};

    /// Serve a fixed JSON body on an ephemeral local port, returning the
    /// base URL.
    async fn spawn_upstream(body: Value) -> String {
        let app = Router::new().route(
            "/",
            get(move || {
                let body = body.clone();
                async move { Json(body) }
            }),
        );
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{}/", addr)
    }

    /// A base URL nothing is listening on.
    async fn unreachable_upstream() -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);
        format!("http://{}/", addr)
    }

    fn payload(name: &str) -> SaveUserPayload {
        SaveUserPayload {
            name: name.to_string(),
            surname: "Ushakov".to_string(),
            patronymic: String::new(),
        }
    }

    #[tokio::test]
    async fn test_enrich_happy_path() {
        let agify = spawn_upstream(json!({"count": 12345, "name": "Dmitriy", "age": 42})).await;
        let genderize =
            spawn_upstream(json!({"name": "Dmitriy", "gender": "male", "probability": 0.99}))
                .await;
        let nationalize = spawn_upstream(json!({
            "name": "Dmitriy",
            "country": [
                {"country_id": "RU", "probability": 0.88},
                {"country_id": "UA", "probability": 0.07}
            ]
        }))
        .await;

        let enricher = Enricher::with_base_urls(agify, genderize, nationalize).unwrap();
        let user = enricher.enrich(&payload("Dmitriy")).await.unwrap();

        assert_eq!(user.id, 0);
        assert_eq!(user.age, 42);
        assert_eq!(user.sex, "male");
        assert_eq!(user.countries.len(), 2);
        assert_eq!(user.countries[0].country_id, "RU");
        assert_eq!(user.countries[0].probability, 0.88);
        assert_eq!(user.countries[1].country_id, "UA");
    }

    #[tokio::test]
    async fn test_missing_fields_yield_zero_values() {
        let agify = spawn_upstream(json!({"name": "Zzyzx", "age": null})).await;
        let genderize = spawn_upstream(json!({"name": "Zzyzx", "gender": null})).await;
        let nationalize = spawn_upstream(json!({"name": "Zzyzx"})).await;

        let enricher = Enricher::with_base_urls(agify, genderize, nationalize).unwrap();
        let user = enricher.enrich(&payload("Zzyzx")).await.unwrap();

        assert_eq!(user.age, 0);
        assert_eq!(user.sex, "");
        assert!(user.countries.is_empty());
    }

    #[tokio::test]
    async fn test_age_failure_fails_enrichment() {
        let agify = unreachable_upstream().await;
        let genderize = spawn_upstream(json!({"gender": "female"})).await;
        let nationalize = spawn_upstream(json!({"country": []})).await;

        let enricher = Enricher::with_base_urls(agify, genderize, nationalize).unwrap();
        let err = enricher.enrich(&payload("Lena")).await.unwrap_err();

        assert!(matches!(err, EnrichError::Age(_)));
        assert!(err.to_string().starts_with("failed to get age"));
    }

    #[tokio::test]
    async fn test_nationality_failure_fails_enrichment() {
        let agify = spawn_upstream(json!({"age": 30})).await;
        let genderize = spawn_upstream(json!({"gender": "male"})).await;
        let nationalize = unreachable_upstream().await;

        let enricher = Enricher::with_base_urls(agify, genderize, nationalize).unwrap();
        let err = enricher.enrich(&payload("Ivan")).await.unwrap_err();

        assert!(matches!(err, EnrichError::Nationality(_)));
    }

    #[tokio::test]
    async fn test_country_order_preserved() {
        let agify = spawn_upstream(json!({"age": 1})).await;
        let genderize = spawn_upstream(json!({"gender": ""})).await;
        // Deliberately not sorted by probability; the order must survive
        let nationalize = spawn_upstream(json!({
            "country": [
                {"country_id": "KZ", "probability": 0.05},
                {"country_id": "RU", "probability": 0.90},
                {"country_id": "BY", "probability": 0.03}
            ]
        }))
        .await;

        let enricher = Enricher::with_base_urls(agify, genderize, nationalize).unwrap();
        let user = enricher.enrich(&payload("Oleg")).await.unwrap();

        let order: Vec<&str> = user
            .countries
            .iter()
            .map(|c| c.country_id.as_str())
            .collect();
        assert_eq!(order, vec!["KZ", "RU", "BY"]);
    }
}
