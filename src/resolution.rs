//! Resolution types requested by the host engine.

use serde::Deserialize;
use std::fmt;
use std::str::FromStr;

/// Shape the caller expects the answer in.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResolutionType {
    /// Scalar answer; `key::field` selects a field of a JSON secret
    #[default]
    #[serde(alias = "priority")]
    Plain,
    /// List answer (not supported by this backend)
    Array,
    /// Mapping answer decoded from a JSON secret
    Hash,
}

impl fmt::Display for ResolutionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Plain => write!(f, "plain"),
            Self::Array => write!(f, "array"),
            Self::Hash => write!(f, "hash"),
        }
    }
}

impl FromStr for ResolutionType {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "" | "plain" | "priority" => Ok(Self::Plain),
            "array" => Ok(Self::Array),
            "hash" => Ok(Self::Hash),
            other => Err(anyhow::anyhow!("unknown resolution type: {}", other)),
        }
    }
}
