use std::str::FromStr;

use regex::{Regex, RegexBuilder};

use trurev_core::WireType;

use crate::datasets::{ConfigError, LenderDataset, RuleDataset};
use crate::lenders::LenderIndex;

/// Immutable rule sets behind the classifier: the lender reverse index,
/// five category pattern sets, and the ordered wire-subtype table.
///
/// Built once, read-only thereafter. The category sets are unordered "any
/// match" predicates; only the wire table is ordered (first match wins).
#[derive(Debug, Clone)]
pub struct PatternStore {
    lenders: LenderIndex,
    true_revenue: Vec<Regex>,
    non_true_revenue: Vec<Regex>,
    treasury_true: Vec<Regex>,
    treasury_false: Vec<Regex>,
    p2p: Vec<Regex>,
    wire: Vec<(Regex, WireType)>,
}

impl PatternStore {
    /// Compiles every pattern case-insensitively and resolves every wire
    /// subtype name. Any invalid pattern or unknown subtype fails the whole
    /// construction — a store is never observable half-built.
    pub fn new(lenders: &LenderDataset, rules: &RuleDataset) -> Result<Self, ConfigError> {
        let wire = rules
            .wire_patterns
            .iter()
            .map(|(pattern, name)| {
                let wire_type = WireType::from_str(name)?;
                Ok((compile(pattern)?, wire_type))
            })
            .collect::<Result<Vec<_>, ConfigError>>()?;

        Ok(Self {
            lenders: LenderIndex::build(&lenders.lenders),
            true_revenue: compile_all(&rules.true_revenue_patterns)?,
            non_true_revenue: compile_all(&rules.non_true_revenue_patterns)?,
            treasury_true: compile_all(&rules.treasury_true_patterns)?,
            treasury_false: compile_all(&rules.treasury_false_positive_patterns)?,
            p2p: compile_all(&rules.zelle_venmo_patterns)?,
            wire,
        })
    }

    pub fn lender_match(&self, description_upper: &str) -> Option<&str> {
        self.lenders.find(description_upper)
    }

    /// First matching wire pattern wins, in configured order.
    pub fn wire_type(&self, description: &str) -> Option<WireType> {
        self.wire
            .iter()
            .find(|(re, _)| re.is_match(description))
            .map(|(_, wire_type)| *wire_type)
    }

    pub fn is_true_revenue(&self, description: &str) -> bool {
        any_match(&self.true_revenue, description)
    }

    pub fn is_non_true_revenue(&self, description: &str) -> bool {
        any_match(&self.non_true_revenue, description)
    }

    pub fn is_treasury_true(&self, description: &str) -> bool {
        any_match(&self.treasury_true, description)
    }

    pub fn is_treasury_false(&self, description: &str) -> bool {
        any_match(&self.treasury_false, description)
    }

    pub fn is_p2p(&self, description: &str) -> bool {
        any_match(&self.p2p, description)
    }
}

fn any_match(set: &[Regex], text: &str) -> bool {
    set.iter().any(|re| re.is_match(text))
}

fn compile(pattern: &str) -> Result<Regex, ConfigError> {
    RegexBuilder::new(pattern)
        .case_insensitive(true)
        .build()
        .map_err(|source| ConfigError::InvalidPattern {
            pattern: pattern.to_string(),
            source,
        })
}

fn compile_all(patterns: &[String]) -> Result<Vec<Regex>, ConfigError> {
    patterns.iter().map(|p| compile(p)).collect()
}
