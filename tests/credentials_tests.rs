// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Token lifecycle tests: login vs. refresh and their failure modes.

use std::sync::atomic::Ordering;

use bezirk_charts::error::AppError;
use bezirk_charts::models::TokenOrigin;
use bezirk_charts::services::{CredentialManager, StatisticsApiClient};

mod common;
use common::{
    MockService, StaticPassword, LOGIN_ACCESS_TOKEN, PASSWORD, REFRESHED_ACCESS_TOKEN,
    REFRESH_TOKEN, USERNAME,
};

#[tokio::test]
async fn test_no_refresh_token_logs_in_interactively() {
    let (base_url, state) = MockService::default().spawn().await;
    let client = StatisticsApiClient::new(base_url);
    let (prompt, asked) = StaticPassword::new(PASSWORD);

    let mut manager = CredentialManager::new(&client, USERNAME, prompt);
    let acquired = manager.acquire_tokens(None).await.unwrap();

    assert_eq!(acquired.origin, TokenOrigin::Login);
    assert!(acquired.refresh_token_issued());
    assert_eq!(acquired.pair.access_token, LOGIN_ACCESS_TOKEN);
    assert_eq!(acquired.pair.refresh_token, "freshly-issued-refresh-token");
    assert_eq!(manager.tokens(), Some(&acquired.pair));

    assert_eq!(asked.load(Ordering::SeqCst), 1);
    assert_eq!(state.login_calls.load(Ordering::SeqCst), 1);
    assert_eq!(state.refresh_calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_stored_refresh_token_refreshes_silently() {
    let (base_url, state) = MockService::default().spawn().await;
    let client = StatisticsApiClient::new(base_url);
    let (prompt, asked) = StaticPassword::new(PASSWORD);

    let mut manager = CredentialManager::new(&client, USERNAME, prompt);
    let acquired = manager.acquire_tokens(Some(REFRESH_TOKEN)).await.unwrap();

    assert_eq!(acquired.origin, TokenOrigin::Refresh);
    assert!(!acquired.refresh_token_issued());
    assert_eq!(acquired.pair.access_token, REFRESHED_ACCESS_TOKEN);
    // Refresh does not rotate the refresh token
    assert_eq!(acquired.pair.refresh_token, REFRESH_TOKEN);

    assert_eq!(asked.load(Ordering::SeqCst), 0);
    assert_eq!(state.login_calls.load(Ordering::SeqCst), 0);
    assert_eq!(state.refresh_calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_wrong_password_propagates_service_error() {
    let (base_url, _state) = MockService::default().spawn().await;
    let client = StatisticsApiClient::new(base_url);
    let (prompt, _asked) = StaticPassword::new("wrong");

    let mut manager = CredentialManager::new(&client, USERNAME, prompt);
    let err = manager.acquire_tokens(None).await.unwrap_err();

    assert!(
        matches!(err, AppError::Auth(ref msg) if msg.contains("Wrong email or password")),
        "{err}"
    );
    assert!(manager.tokens().is_none());
}

#[tokio::test]
async fn test_error_field_with_ok_status_is_rejected() {
    let mut service = MockService::default();
    service.login_error_with_ok = true;
    let (base_url, _state) = service.spawn().await;
    let client = StatisticsApiClient::new(base_url);
    let (prompt, _asked) = StaticPassword::new("wrong");

    let mut manager = CredentialManager::new(&client, USERNAME, prompt);
    let err = manager.acquire_tokens(None).await.unwrap_err();

    assert!(matches!(err, AppError::Auth(ref msg) if msg.contains("Wrong email or password")));
}

#[tokio::test]
async fn test_unset_error_field_does_not_reject_login() {
    for error in [serde_json::json!(""), serde_json::json!(false)] {
        let mut service = MockService::default();
        service.login_success_error = Some(error.clone());
        let (base_url, _state) = service.spawn().await;
        let client = StatisticsApiClient::new(base_url);
        let (prompt, _asked) = StaticPassword::new(PASSWORD);

        let mut manager = CredentialManager::new(&client, USERNAME, prompt);
        let acquired = manager.acquire_tokens(None).await.unwrap_or_else(|e| {
            panic!("error field {error} should not reject the login: {e}")
        });

        assert_eq!(acquired.origin, TokenOrigin::Login);
        assert_eq!(acquired.pair.access_token, LOGIN_ACCESS_TOKEN);
    }
}

#[tokio::test]
async fn test_rejected_refresh_token_does_not_fall_back_to_login() {
    let (base_url, state) = MockService::default().spawn().await;
    let client = StatisticsApiClient::new(base_url);
    let (prompt, asked) = StaticPassword::new(PASSWORD);

    let mut manager = CredentialManager::new(&client, USERNAME, prompt);
    let err = manager.acquire_tokens(Some("revoked")).await.unwrap_err();

    assert!(matches!(err, AppError::Auth(ref msg) if msg.contains("Couldn't refresh tokens")));
    assert_eq!(asked.load(Ordering::SeqCst), 0);
    assert_eq!(state.login_calls.load(Ordering::SeqCst), 0);
    assert_eq!(state.refresh_calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_login_against_unreachable_service() {
    let client = StatisticsApiClient::new("http://127.0.0.1:9/api/");
    let (prompt, _asked) = StaticPassword::new(PASSWORD);

    let mut manager = CredentialManager::new(&client, USERNAME, prompt);
    let err = manager.acquire_tokens(None).await.unwrap_err();

    assert!(matches!(err, AppError::Auth(_)));
}
