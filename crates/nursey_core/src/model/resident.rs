//! Resident record and name validation.
//!
//! # Responsibility
//! - Hold the minimal resident record carried in every book snapshot.
//! - Own the name format shared by residents and task name references.
//!
//! # Invariants
//! - A `Resident` always carries a valid, trimmed name.
//! - Name comparison for roster membership ignores ASCII case.

use once_cell::sync::Lazy;
use regex::Regex;
use std::fmt::{Display, Formatter};
use thiserror::Error;

static NAME_PATTERN: Lazy<Result<Regex, regex::Error>> =
    Lazy::new(|| Regex::new(r"^[\p{Alphabetic}\p{N}][\p{Alphabetic}\p{N} ]*$"));

/// Resident roster errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResidentError {
    #[error("invalid resident name `{0}`: names contain letters, digits and spaces only")]
    InvalidName(String),
    #[error("resident `{0}` already exists")]
    DuplicateResident(String),
    #[error("resident `{0}` not found")]
    ResidentNotFound(String),
}

/// Returns the trimmed name when it matches the resident name format.
pub fn normalize_name(value: &str) -> Option<String> {
    let trimmed = value.trim();
    let matches = match NAME_PATTERN.as_ref() {
        Ok(pattern) => pattern.is_match(trimmed),
        Err(_) => false,
    };
    matches.then(|| trimmed.to_string())
}

/// Person under care. Only the name participates in the core.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Resident {
    name: String,
}

impl Resident {
    pub fn new(name: &str) -> Result<Self, ResidentError> {
        let name =
            normalize_name(name).ok_or_else(|| ResidentError::InvalidName(name.to_string()))?;
        Ok(Self { name })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Case-insensitive roster identity check.
    pub fn has_name(&self, name: &str) -> bool {
        self.name.eq_ignore_ascii_case(name.trim())
    }
}

impl Display for Resident {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.name)
    }
}
