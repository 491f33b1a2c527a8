use std::collections::HashMap;
use std::fmt;
use std::fs;
use std::path::Path;

use serde::de::{MapAccess, Visitor};
use serde::{Deserialize, Deserializer};
use thiserror::Error;

/// File name of the lender alias dataset inside a data directory.
pub const LENDER_DATASET_FILE: &str = "mca_lender_list.json";
/// File name of the rule pattern dataset inside a data directory.
pub const RULE_DATASET_FILE: &str = "revenue_patterns.json";

/// Fatal configuration failure, raised while loading dataset files or
/// building a [`PatternStore`](crate::PatternStore). Classification itself
/// has no error path.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse dataset: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Invalid pattern '{pattern}': {source}")]
    InvalidPattern {
        pattern: String,
        source: regex::Error,
    },
    #[error(transparent)]
    UnknownWireType(#[from] trurev_core::UnknownWireType),
}

/// Lender alias dataset: canonical lender name to the alias strings that
/// appear in bank descriptions.
#[derive(Debug, Clone, Deserialize)]
pub struct LenderDataset {
    pub lenders: HashMap<String, Vec<String>>,
}

impl LenderDataset {
    pub fn from_json(data: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(data)?)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        Self::from_json(&fs::read_to_string(path)?)
    }
}

/// Rule pattern dataset: five named category pattern lists plus the ordered
/// wire-subtype table.
#[derive(Debug, Clone, Deserialize)]
pub struct RuleDataset {
    pub true_revenue_patterns: Vec<String>,
    pub non_true_revenue_patterns: Vec<String>,
    pub treasury_true_patterns: Vec<String>,
    pub treasury_false_positive_patterns: Vec<String>,
    pub zelle_venmo_patterns: Vec<String>,
    /// Pattern to wire-subtype name. Document order is match priority, so
    /// the JSON object is kept as an ordered list of pairs.
    #[serde(deserialize_with = "ordered_pairs")]
    pub wire_patterns: Vec<(String, String)>,
}

impl RuleDataset {
    pub fn from_json(data: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(data)?)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        Self::from_json(&fs::read_to_string(path)?)
    }
}

fn ordered_pairs<'de, D>(deserializer: D) -> Result<Vec<(String, String)>, D::Error>
where
    D: Deserializer<'de>,
{
    struct PairsVisitor;

    impl<'de> Visitor<'de> for PairsVisitor {
        type Value = Vec<(String, String)>;

        fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("a map of pattern string to wire type name")
        }

        fn visit_map<A>(self, mut access: A) -> Result<Self::Value, A::Error>
        where
            A: MapAccess<'de>,
        {
            let mut pairs = Vec::with_capacity(access.size_hint().unwrap_or(0));
            while let Some(entry) = access.next_entry::<String, String>()? {
                pairs.push(entry);
            }
            Ok(pairs)
        }
    }

    deserializer.deserialize_map(PairsVisitor)
}
