// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Access/refresh token pair for the statistics API.

use std::fmt;

/// Credentials for one run.
///
/// A refresh produces a new pair; pairs are never mutated in place.
#[derive(Clone, PartialEq, Eq)]
pub struct TokenPair {
    /// Short-lived token sent with every data request
    pub access_token: String,
    /// Durable token used to obtain new access tokens
    pub refresh_token: String,
}

impl TokenPair {
    pub fn new(access_token: impl Into<String>, refresh_token: impl Into<String>) -> Self {
        Self {
            access_token: access_token.into(),
            refresh_token: refresh_token.into(),
        }
    }
}

impl fmt::Debug for TokenPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenPair")
            .field("access_token", &"<redacted>")
            .field("refresh_token", &"<redacted>")
            .finish()
    }
}

/// How a token pair was obtained.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenOrigin {
    /// Interactive password login; the refresh token is new.
    Login,
    /// Silent refresh with a stored refresh token.
    Refresh,
}

/// Result of a credential acquisition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AcquiredTokens {
    pub pair: TokenPair,
    pub origin: TokenOrigin,
}

impl AcquiredTokens {
    /// Whether the caller should persist `pair.refresh_token`.
    pub fn refresh_token_issued(&self) -> bool {
        self.origin == TokenOrigin::Login
    }
}
