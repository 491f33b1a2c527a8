use std::path::Path;

use trurev_core::{ClassifiedTransaction, RevenueType, Transaction, WireType};

use crate::datasets::{
    ConfigError, LenderDataset, RuleDataset, LENDER_DATASET_FILE, RULE_DATASET_FILE,
};
use crate::patterns::PatternStore;

/// Advisory flags recorded on classified transactions for audit traceability.
pub mod flags {
    pub const FOREIGN_WIRE_NOT_REVENUE: &str = "FOREIGN_WIRE_NOT_REVENUE";
    pub const P2P_REVIEW_REQUIRED: &str = "P2P_REVIEW_REQUIRED";
    pub const TREASURY_PAYMENT: &str = "TREASURY_PAYMENT";
    pub const TREASURY_FALSE_POSITIVE: &str = "TREASURY_FALSE_POSITIVE";
}

/// Classifies transactions by revenue type and MCA lender activity.
///
/// Holds only the immutable [`PatternStore`], so a single classifier can be
/// shared across threads and `classify` called without coordination.
#[derive(Debug)]
pub struct RevenueClassifier {
    store: PatternStore,
}

impl RevenueClassifier {
    pub fn new(store: PatternStore) -> Self {
        Self { store }
    }

    pub fn from_datasets(
        lenders: &LenderDataset,
        rules: &RuleDataset,
    ) -> Result<Self, ConfigError> {
        Ok(Self::new(PatternStore::new(lenders, rules)?))
    }

    /// Loads `mca_lender_list.json` and `revenue_patterns.json` from a data
    /// directory and builds the classifier.
    pub fn from_data_dir(dir: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let dir = dir.as_ref();
        let lenders = LenderDataset::from_path(dir.join(LENDER_DATASET_FILE))?;
        let rules = RuleDataset::from_path(dir.join(RULE_DATASET_FILE))?;
        Self::from_datasets(&lenders, &rules)
    }

    pub fn store(&self) -> &PatternStore {
        &self.store
    }

    /// Classifies a single transaction. Total over any well-formed
    /// transaction: every description resolves to some revenue type, with
    /// needs-review as the universal fallback.
    ///
    /// The cascade runs in strict precedence order and stops at the first
    /// applicable rule: sign gate, lender match, wire subtype, P2P,
    /// treasury true/false, general exclusion, general inclusion, default.
    /// Reordering these steps changes verdicts for descriptions matching
    /// more than one category.
    pub fn classify(&self, tx: &Transaction) -> ClassifiedTransaction {
        let mut classified = ClassifiedTransaction::from_transaction(tx);

        // Only deposits can be revenue.
        if !tx.amount.is_positive() {
            classified.revenue_type = RevenueType::NonTrueRevenue;
            return classified;
        }

        let desc = tx.description.to_uppercase();

        // A lender hit means an MCA repayment: flag it via the match field
        // and leave the revenue verdict untouched.
        if let Some(lender) = self.store.lender_match(&desc) {
            classified.mca_match = Some(lender.to_string());
            return classified;
        }

        if let Some(wire_type) = self.store.wire_type(&desc) {
            classified.wire_type = Some(wire_type);
            // Foreign incoming wires are transfers, not revenue, no matter
            // what the downstream patterns would say.
            if wire_type == WireType::ForeignRemittance {
                classified.revenue_type = RevenueType::NonTrueRevenue;
                classified
                    .flags
                    .push(flags::FOREIGN_WIRE_NOT_REVENUE.to_string());
                return classified;
            }
        }

        // P2P rails are ambiguous as a revenue signal; always hand them to
        // a human.
        if self.store.is_p2p(&desc) {
            classified.revenue_type = RevenueType::NeedsReview;
            classified.flags.push(flags::P2P_REVIEW_REQUIRED.to_string());
            return classified;
        }

        if self.store.is_treasury_true(&desc) {
            classified.revenue_type = RevenueType::TrueRevenue;
            classified.flags.push(flags::TREASURY_PAYMENT.to_string());
            return classified;
        }

        if self.store.is_treasury_false(&desc) {
            classified.revenue_type = RevenueType::NonTrueRevenue;
            classified
                .flags
                .push(flags::TREASURY_FALSE_POSITIVE.to_string());
            return classified;
        }

        // Exclusions before inclusions.
        if self.store.is_non_true_revenue(&desc) {
            classified.revenue_type = RevenueType::NonTrueRevenue;
            return classified;
        }

        if self.store.is_true_revenue(&desc) {
            classified.revenue_type = RevenueType::TrueRevenue;
            return classified;
        }

        classified
    }

    /// Classifies a batch, preserving positional correspondence with the
    /// input.
    pub fn classify_all(&self, transactions: &[Transaction]) -> Vec<ClassifiedTransaction> {
        transactions.iter().map(|tx| self.classify(tx)).collect()
    }
}
