// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Statistics API client.
//!
//! Handles:
//! - Connectivity check against the info endpoint
//! - Region list and single region lookups
//! - Per-region statistic history
//! - Password login and access token refresh
//!
//! Every call applies the same validation: anything but `200 OK`, or an
//! absent body, is a failure regardless of what the status implied.

use crate::error::AppError;
use crate::models::{Region, StatisticRecord, TokenPair};
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

/// Request header carrying the access token.
pub const TOKEN_HEADER: &str = "Token";

/// Statistics API client.
#[derive(Clone)]
pub struct StatisticsApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl StatisticsApiClient {
    /// Create a client for the service rooted at `base_url`.
    pub fn new(base_url: impl Into<String>) -> Self {
        let mut base_url = base_url.into();
        if !base_url.ends_with('/') {
            base_url.push('/');
        }

        Self {
            http: reqwest::Client::new(),
            base_url,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Check that the service is reachable.
    pub async fn info(&self) -> Result<serde_json::Value, AppError> {
        let response = self
            .http
            .get(self.url("info"))
            .send()
            .await
            .map_err(|e| AppError::Api(format!("No connection possible: {}", e)))?;

        check_response_json(response)
            .await
            .map_err(|detail| AppError::Api(format!("Info endpoint: {}", detail)))
    }

    /// List all regions.
    pub async fn list_regions(&self, access_token: &str) -> Result<Vec<Region>, AppError> {
        let envelope: ResultsEnvelope<Region> = self
            .get_json(&self.url("bezirk"), access_token, &[])
            .await
            .map_err(|detail| AppError::Api(format!("Couldn't fetch bezirke: {}", detail)))?;

        Ok(envelope.results)
    }

    /// Fetch a single region by identifier.
    pub async fn fetch_region(
        &self,
        access_token: &str,
        identifier: &str,
    ) -> Result<Region, AppError> {
        let url = self.url(&format!("bezirk/{}", identifier));
        self.get_json(&url, access_token, &[])
            .await
            .map_err(|detail| AppError::Api(format!("Couldn't fetch bezirk: {}", detail)))
    }

    /// Fetch the full statistic history of a region.
    pub async fn fetch_history(
        &self,
        access_token: &str,
        identifier: &str,
    ) -> Result<Vec<StatisticRecord>, AppError> {
        let envelope: ResultsEnvelope<StatisticRecord> = self
            .get_json(&self.url("statisticEntry"), access_token, &[("gkz", identifier)])
            .await
            .map_err(|detail| {
                AppError::Api(format!("Couldn't fetch statistic entries: {}", detail))
            })?;

        Ok(envelope.results)
    }

    /// Log in with username and password.
    ///
    /// Returns the issued token pair and the raw response body.
    pub async fn login(
        &self,
        username: &str,
        password: &str,
    ) -> Result<(TokenPair, serde_json::Value), AppError> {
        let body = LoginRequest {
            email: username,
            password,
        };

        let response = self
            .http
            .post(self.url("user/login"))
            .json(&body)
            .send()
            .await
            .map_err(|e| AppError::Auth(format!("Login request failed: {}", e)))?;

        let status = response.status();
        let raw = read_body(response).await.map_err(|detail| {
            AppError::Auth(format!("Invalid password - could not obtain API key ({})", detail))
        })?;

        // The service reports rejected credentials in an `error` field,
        // sometimes alongside a 200.
        if let Some(detail) = login_error(&raw) {
            return Err(AppError::Auth(format!(
                "Invalid password - could not obtain API key! Error: {}",
                detail
            )));
        }

        if status != StatusCode::OK {
            return Err(AppError::Auth(format!(
                "Invalid password - could not obtain API key (HTTP {})",
                status
            )));
        }

        let parsed: LoginResponse = serde_json::from_value(raw.clone())
            .map_err(|e| AppError::Auth(format!("Malformed login response: {}", e)))?;

        Ok((
            TokenPair::new(parsed.access_token.token, parsed.refresh_token),
            raw,
        ))
    }

    /// Obtain a new access token for a stored refresh token.
    ///
    /// The refresh token is not rotated; the returned pair carries the same one.
    pub async fn refresh(&self, username: &str, refresh_token: &str) -> Result<TokenPair, AppError> {
        let body = RefreshRequest {
            user_email: username,
            refresh_token,
        };

        let response = self
            .http
            .post(self.url("user/refreshToken"))
            .json(&body)
            .send()
            .await
            .map_err(|e| AppError::Auth(format!("Token refresh request failed: {}", e)))?;

        let parsed: RefreshResponse = check_response_json(response)
            .await
            .map_err(|detail| AppError::Auth(format!("Couldn't refresh tokens: {}", detail)))?;

        Ok(TokenPair::new(parsed.access_token.token, refresh_token))
    }

    /// Authenticated GET with JSON response.
    async fn get_json<T: DeserializeOwned>(
        &self,
        url: &str,
        access_token: &str,
        query: &[(&str, &str)],
    ) -> Result<T, String> {
        let response = self
            .http
            .get(url)
            .header(TOKEN_HEADER, access_token)
            .query(query)
            .send()
            .await
            .map_err(|e| format!("request failed: {}", e))?;

        check_response_json(response).await
    }
}

/// Validate status and body, then decode the body.
async fn check_response_json<T: DeserializeOwned>(
    response: reqwest::Response,
) -> Result<T, String> {
    let status = response.status();
    if status != StatusCode::OK {
        let body = response.text().await.unwrap_or_default();
        tracing::debug!(status = %status, body = %body, "Statistics API returned non-success status");
        return Err(format!("HTTP {}", status));
    }

    let value = read_body(response).await?;
    serde_json::from_value(value).map_err(|e| format!("unexpected response shape: {}", e))
}

/// Read a JSON body, treating an empty body or JSON `null` as absent.
async fn read_body(response: reqwest::Response) -> Result<serde_json::Value, String> {
    let text = response
        .text()
        .await
        .map_err(|e| format!("failed to read body: {}", e))?;

    if text.trim().is_empty() {
        return Err("empty response body".to_string());
    }

    let value: serde_json::Value =
        serde_json::from_str(&text).map_err(|e| format!("JSON parse error: {}", e))?;

    if value.is_null() {
        return Err("empty response body".to_string());
    }

    Ok(value)
}

/// Text of a set `error` field in a login response.
///
/// `null`, `false`, `0` and `""` count as unset.
fn login_error(raw: &serde_json::Value) -> Option<String> {
    use serde_json::Value;

    match raw.get("error")? {
        Value::Null | Value::Bool(false) => None,
        Value::String(s) if s.is_empty() => None,
        Value::Number(n) if n.as_f64() == Some(0.0) => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

/// List responses wrap their payload in `results`.
#[derive(Debug, Deserialize)]
struct ResultsEnvelope<T> {
    results: Vec<T>,
}

#[derive(Serialize)]
struct LoginRequest<'a> {
    email: &'a str,
    password: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct RefreshRequest<'a> {
    user_email: &'a str,
    refresh_token: &'a str,
}

#[derive(Debug, Deserialize)]
struct AccessToken {
    token: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct LoginResponse {
    access_token: AccessToken,
    refresh_token: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RefreshResponse {
    access_token: AccessToken,
}
