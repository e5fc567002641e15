// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Region lookup by display name.

use crate::error::{AppError, Result};
use crate::models::Region;

/// Resolves a user-supplied region name against the fetched list.
#[derive(Debug, Default, Clone, Copy)]
pub struct RegionResolver;

impl RegionResolver {
    /// Case-insensitive exact match on the name; the first match wins.
    pub fn resolve<'r>(&self, regions: &'r [Region], name: &str) -> Result<&'r Region> {
        let wanted = name.to_lowercase();

        regions
            .iter()
            .find(|region| region.name.to_lowercase() == wanted)
            .ok_or_else(|| AppError::NotFound(name.to_string()))
    }
}
