use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::classification::{RevenueType, WireType};
use super::money::Money;

/// Origination channel of a bank transaction as tagged by the statement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum TransactionType {
    Deposit,
    Withdrawal,
    Transfer,
    Wire,
    #[default]
    Ach,
    Check,
    Card,
    Fee,
}

impl TransactionType {
    /// Parses a statement tag, `None` for anything unrecognized. Importers
    /// decide the fallback (ACH is the conventional default).
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag.trim().to_lowercase().as_str() {
            "deposit" => Some(TransactionType::Deposit),
            "withdrawal" => Some(TransactionType::Withdrawal),
            "transfer" => Some(TransactionType::Transfer),
            "wire" => Some(TransactionType::Wire),
            "ach" => Some(TransactionType::Ach),
            "check" => Some(TransactionType::Check),
            "card" => Some(TransactionType::Card),
            "fee" => Some(TransactionType::Fee),
            _ => None,
        }
    }
}

impl fmt::Display for TransactionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransactionType::Deposit => write!(f, "deposit"),
            TransactionType::Withdrawal => write!(f, "withdrawal"),
            TransactionType::Transfer => write!(f, "transfer"),
            TransactionType::Wire => write!(f, "wire"),
            TransactionType::Ach => write!(f, "ach"),
            TransactionType::Check => write!(f, "check"),
            TransactionType::Card => write!(f, "card"),
            TransactionType::Fee => write!(f, "fee"),
        }
    }
}

/// A single bank transaction as it comes off a statement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub date: NaiveDate,
    pub description: String,
    pub amount: Money,
    #[serde(default)]
    pub transaction_type: TransactionType,
    #[serde(default)]
    pub raw_text: String,
}

impl Transaction {
    pub fn new(date: NaiveDate, description: impl Into<String>, amount: Money) -> Self {
        Transaction {
            date,
            description: description.into(),
            amount,
            transaction_type: TransactionType::default(),
            raw_text: String::new(),
        }
    }
}

/// A transaction with its classification verdict and audit metadata.
///
/// `mca_match` carries the canonical lender name when a lender alias was
/// found in the description; in that case `revenue_type` stays at its
/// default — an MCA repayment is flagged via the match field alone, never
/// given a revenue verdict.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassifiedTransaction {
    pub date: NaiveDate,
    pub description: String,
    pub amount: Money,
    pub transaction_type: TransactionType,
    pub raw_text: String,
    pub revenue_type: RevenueType,
    pub mca_match: Option<String>,
    pub wire_type: Option<WireType>,
    pub flags: Vec<String>,
}

impl ClassifiedTransaction {
    /// Carries the transaction fields over with classification metadata at
    /// its defaults.
    pub fn from_transaction(tx: &Transaction) -> Self {
        ClassifiedTransaction {
            date: tx.date,
            description: tx.description.clone(),
            amount: tx.amount,
            transaction_type: tx.transaction_type,
            raw_text: tx.raw_text.clone(),
            revenue_type: RevenueType::default(),
            mca_match: None,
            wire_type: None,
            flags: Vec::new(),
        }
    }
}
