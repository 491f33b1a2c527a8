use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Terminal revenue verdict for a classified transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum RevenueType {
    TrueRevenue,
    NonTrueRevenue,
    Outlier,
    McaPayment,
    #[default]
    NeedsReview,
}

impl fmt::Display for RevenueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RevenueType::TrueRevenue => write!(f, "true_revenue"),
            RevenueType::NonTrueRevenue => write!(f, "non_true_revenue"),
            RevenueType::Outlier => write!(f, "outlier"),
            RevenueType::McaPayment => write!(f, "mca_payment"),
            RevenueType::NeedsReview => write!(f, "needs_review"),
        }
    }
}

/// Transport/settlement mechanism of a wire transfer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WireType {
    WireTransfer,
    FedWire,
    ChipsCredit,
    BookTransfer,
    ForeignRemittance,
    Unknown,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown wire type: '{0}'")]
pub struct UnknownWireType(pub String);

impl FromStr for WireType {
    type Err = UnknownWireType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "wire_transfer" => Ok(WireType::WireTransfer),
            "fed_wire" => Ok(WireType::FedWire),
            "chips_credit" => Ok(WireType::ChipsCredit),
            "book_transfer" => Ok(WireType::BookTransfer),
            "foreign_remittance" => Ok(WireType::ForeignRemittance),
            "unknown" => Ok(WireType::Unknown),
            other => Err(UnknownWireType(other.to_string())),
        }
    }
}

impl fmt::Display for WireType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WireType::WireTransfer => write!(f, "wire_transfer"),
            WireType::FedWire => write!(f, "fed_wire"),
            WireType::ChipsCredit => write!(f, "chips_credit"),
            WireType::BookTransfer => write!(f, "book_transfer"),
            WireType::ForeignRemittance => write!(f, "foreign_remittance"),
            WireType::Unknown => write!(f, "unknown"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn revenue_type_defaults_to_needs_review() {
        assert_eq!(RevenueType::default(), RevenueType::NeedsReview);
    }

    #[test]
    fn wire_type_from_str_accepts_every_subtype() {
        for name in [
            "wire_transfer",
            "fed_wire",
            "chips_credit",
            "book_transfer",
            "foreign_remittance",
            "unknown",
        ] {
            let parsed: WireType = name.parse().unwrap();
            assert_eq!(parsed.to_string(), name);
        }
    }

    #[test]
    fn wire_type_from_str_rejects_unknown_names() {
        let err = "swift_mt103".parse::<WireType>().unwrap_err();
        assert_eq!(err, UnknownWireType("swift_mt103".to_string()));
    }

    #[test]
    fn serde_names_are_snake_case() {
        assert_eq!(
            serde_json::to_string(&RevenueType::TrueRevenue).unwrap(),
            "\"true_revenue\""
        );
        assert_eq!(
            serde_json::to_string(&WireType::ForeignRemittance).unwrap(),
            "\"foreign_remittance\""
        );
    }
}
