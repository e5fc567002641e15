// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Credential lifecycle for the statistics API.
//!
//! A run either logs in interactively (no stored refresh token) or
//! refreshes silently with the stored one. A rejected refresh token ends
//! the run; it does not fall back to asking for a password.

use std::future::Future;
use std::io;

use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};

use crate::error::{AppError, Result};
use crate::models::{AcquiredTokens, TokenOrigin, TokenPair};
use crate::services::StatisticsApiClient;

/// Source of the account password for interactive login.
pub trait PasswordPrompt {
    fn read_password(&mut self, prompt: &str) -> impl Future<Output = io::Result<String>>;
}

/// Reads the password as one line from standard input.
#[derive(Debug, Default)]
pub struct StdinPrompt;

impl PasswordPrompt for StdinPrompt {
    async fn read_password(&mut self, prompt: &str) -> io::Result<String> {
        let mut stderr = tokio::io::stderr();
        stderr.write_all(prompt.as_bytes()).await?;
        stderr.flush().await?;

        let mut line = String::new();
        BufReader::new(tokio::io::stdin())
            .read_line(&mut line)
            .await?;

        Ok(line.trim_end_matches(['\r', '\n']).to_string())
    }
}

/// Owns the token pair for one run.
pub struct CredentialManager<'a, P> {
    client: &'a StatisticsApiClient,
    username: String,
    prompt: P,
    tokens: Option<TokenPair>,
}

impl<'a, P: PasswordPrompt> CredentialManager<'a, P> {
    pub fn new(client: &'a StatisticsApiClient, username: impl Into<String>, prompt: P) -> Self {
        Self {
            client,
            username: username.into(),
            prompt,
            tokens: None,
        }
    }

    /// Obtain a usable token pair.
    ///
    /// Without a stored refresh token this asks for the password and logs
    /// in; otherwise it refreshes. Exactly one of the two is attempted.
    pub async fn acquire_tokens(
        &mut self,
        prior_refresh_token: Option<&str>,
    ) -> Result<AcquiredTokens> {
        let acquired = match prior_refresh_token {
            None => self.login().await?,
            Some(refresh_token) => self.refresh(refresh_token).await?,
        };

        self.tokens = Some(acquired.pair.clone());
        Ok(acquired)
    }

    /// The pair obtained by the last successful acquisition.
    pub fn tokens(&self) -> Option<&TokenPair> {
        self.tokens.as_ref()
    }

    async fn login(&mut self) -> Result<AcquiredTokens> {
        tracing::info!(username = %self.username, "No refresh token stored, logging in");

        let password = self
            .prompt
            .read_password("[*] API password: ")
            .await
            .map_err(|e| AppError::Auth(format!("Failed to read password: {}", e)))?;

        let (pair, _raw) = self.client.login(&self.username, &password).await?;

        tracing::info!(username = %self.username, "Login successful, new refresh token issued");
        Ok(AcquiredTokens {
            pair,
            origin: TokenOrigin::Login,
        })
    }

    async fn refresh(&mut self, refresh_token: &str) -> Result<AcquiredTokens> {
        tracing::info!(username = %self.username, "Refreshing access token");

        let pair = self
            .client
            .refresh(&self.username, refresh_token)
            .await
            .map_err(|e| {
                tracing::error!(error = %e, "Stored refresh token was rejected");
                e
            })?;

        Ok(AcquiredTokens {
            pair,
            origin: TokenOrigin::Refresh,
        })
    }
}
