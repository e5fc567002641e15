// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Bezirk (administrative region) model.

use serde::{Deserialize, Deserializer, Serialize};

/// An administrative region as listed by the statistics service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Region {
    /// Stable key for history lookups ("Gemeindekennzahl", wire name `gkz`)
    #[serde(rename = "gkz", deserialize_with = "string_or_number")]
    pub identifier: String,
    /// Display name, matched case-insensitively
    pub name: String,
}

impl Region {
    pub fn new(identifier: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            identifier: identifier.into(),
            name: name.into(),
        }
    }
}

/// The service has delivered `gkz` both as a string and as a bare number.
fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Text(String),
        Int(i64),
        Float(f64),
    }

    Ok(match Raw::deserialize(deserializer)? {
        Raw::Text(s) => s,
        Raw::Int(n) => n.to_string(),
        Raw::Float(f) => f.to_string(),
    })
}
