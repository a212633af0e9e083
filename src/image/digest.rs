//! Content-addressed image identifiers
//!
//! Registry digests look like `sha256:<hex>`. They are validated once when an
//! image is read from the registry so later stages can rely on the format.

use crate::error::{CleanupError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Digest(String);

impl Digest {
    /// Validate `algorithm:hex` and wrap it
    pub fn parse(value: &str) -> Result<Self> {
        let (algorithm, encoded) = value.split_once(':').ok_or_else(|| {
            CleanupError::fetch(format!("Invalid digest {:?}: missing algorithm prefix", value))
        })?;

        if algorithm.is_empty()
            || !algorithm
                .chars()
                .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || "+._-".contains(c))
        {
            return Err(CleanupError::fetch(format!(
                "Invalid digest {:?}: bad algorithm {:?}",
                value, algorithm
            )));
        }

        if encoded.is_empty() {
            return Err(CleanupError::fetch(format!(
                "Invalid digest {:?}: empty hash",
                value
            )));
        }

        hex::decode(encoded).map_err(|e| {
            CleanupError::fetch(format!("Invalid digest {:?}: {}", value, e))
        })?;

        Ok(Self(value.to_string()))
    }

    pub fn algorithm(&self) -> &str {
        self.0.split_once(':').map(|(a, _)| a).unwrap_or_default()
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Digest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for Digest {
    type Err = CleanupError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl TryFrom<String> for Digest {
    type Error = CleanupError;

    fn try_from(value: String) -> Result<Self> {
        Self::parse(&value)
    }
}

impl From<Digest> for String {
    fn from(digest: Digest) -> Self {
        digest.0
    }
}
