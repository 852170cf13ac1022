//! Inference API clients
//!
//! Three stateless HTTP GET lookups keyed on a given name: estimated age
//! (agify.io), probable sex (genderize.io), and probable nationalities
//! (nationalize.io). No retry, no caching.

use serde::Deserialize;
use thiserror::Error;

use crate::models::Country;

/// Failure of a single inference lookup.
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("unexpected response: {0}")]
    Decode(#[from] serde_json::Error),
}

#[derive(Debug, Deserialize)]
struct AgeResponse {
    #[serde(default)]
    age: Option<i32>,
}

#[derive(Debug, Deserialize)]
struct GenderResponse {
    #[serde(default)]
    gender: Option<String>,
}

#[derive(Debug, Deserialize)]
struct NationalityResponse {
    #[serde(default)]
    country: Vec<Country>,
}

/// Fetch the raw response body; an empty body is legal and maps to the
/// lookup's zero value at the caller.
async fn fetch_body(
    http: &reqwest::Client,
    base_url: &str,
    name: &str,
) -> Result<String, ClientError> {
    let body = http
        .get(base_url)
        .query(&[("name", name)])
        .send()
        .await?
        .text()
        .await?;
    Ok(body)
}

/// Estimated-age lookup (agify.io).
pub struct AgeClient {
    http: reqwest::Client,
    base_url: String,
}

impl AgeClient {
    pub fn new(http: reqwest::Client, base_url: String) -> Self {
        Self { http, base_url }
    }

    pub async fn lookup(&self, name: &str) -> Result<i32, ClientError> {
        let body = fetch_body(&self.http, &self.base_url, name).await?;
        if body.trim().is_empty() {
            return Ok(0);
        }
        let resp: AgeResponse = serde_json::from_str(&body)?;
        Ok(resp.age.unwrap_or(0))
    }
}

/// Probable-sex lookup (genderize.io).
pub struct GenderClient {
    http: reqwest::Client,
    base_url: String,
}

impl GenderClient {
    pub fn new(http: reqwest::Client, base_url: String) -> Self {
        Self { http, base_url }
    }

    pub async fn lookup(&self, name: &str) -> Result<String, ClientError> {
        let body = fetch_body(&self.http, &self.base_url, name).await?;
        if body.trim().is_empty() {
            return Ok(String::new());
        }
        let resp: GenderResponse = serde_json::from_str(&body)?;
        Ok(resp.gender.unwrap_or_default())
    }
}

/// Nationality-guess lookup (nationalize.io). The returned order is the
/// service's own (descending probability) and is preserved as-is.
pub struct NationalityClient {
    http: reqwest::Client,
    base_url: String,
}

impl NationalityClient {
    pub fn new(http: reqwest::Client, base_url: String) -> Self {
        Self { http, base_url }
    }

    pub async fn lookup(&self, name: &str) -> Result<Vec<Country>, ClientError> {
        let body = fetch_body(&self.http, &self.base_url, name).await?;
        if body.trim().is_empty() {
            return Ok(Vec::new());
        }
        let resp: NationalityResponse = serde_json::from_str(&body)?;
        Ok(resp.country)
    }
}
