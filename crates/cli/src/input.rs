use std::fs;
use std::io::Read;
use std::path::Path;
use std::str::FromStr;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Deserialize;
use thiserror::Error;

use trurev_core::{Money, Transaction, TransactionType};

#[derive(Error, Debug)]
pub enum CsvImportError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    #[error("Invalid profile: {0}")]
    Profile(#[from] toml::de::Error),
    #[error("Missing column {column} in row {row}")]
    MissingColumn { column: usize, row: usize },
    #[error("Invalid date: '{0}'")]
    InvalidDate(String),
    #[error("Invalid amount: '{0}'")]
    InvalidAmount(String),
    #[error("No data rows")]
    NoDataRows,
}

/// Column positions within a statement CSV. Either `amount_column` or the
/// debit/credit pair must be set; credits are inflows (positive amounts).
#[derive(Debug, Clone, Deserialize)]
pub struct CsvColumnMapping {
    pub date_column: usize,
    pub description_column: usize,
    pub amount_column: Option<usize>,
    pub debit_column: Option<usize>,
    pub credit_column: Option<usize>,
    pub type_column: Option<usize>,
    pub date_format: String,
}

impl Default for CsvColumnMapping {
    fn default() -> Self {
        Self {
            date_column: 0,
            description_column: 1,
            amount_column: Some(2),
            debit_column: None,
            credit_column: None,
            type_column: None,
            date_format: "%Y-%m-%d".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct CsvProfile {
    pub has_header: bool,
    pub delimiter: String,
    pub mapping: CsvColumnMapping,
}

impl Default for CsvProfile {
    fn default() -> Self {
        Self {
            has_header: true,
            delimiter: ",".to_string(),
            mapping: CsvColumnMapping::default(),
        }
    }
}

impl CsvProfile {
    pub fn from_toml(content: &str) -> Result<Self, CsvImportError> {
        Ok(toml::from_str(content)?)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, CsvImportError> {
        Self::from_toml(&fs::read_to_string(path)?)
    }
}

/// Reads a statement CSV into transactions according to the profile's
/// column mapping.
pub fn import_transactions<R: Read>(
    data: R,
    profile: &CsvProfile,
) -> Result<Vec<Transaction>, CsvImportError> {
    let delimiter = profile.delimiter.as_bytes().first().copied().unwrap_or(b',');
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(profile.has_header)
        .delimiter(delimiter)
        .flexible(true)
        .from_reader(data);
    let mapping = &profile.mapping;

    let mut transactions = Vec::new();
    for (row, result) in reader.records().enumerate() {
        let record = result?;
        if record.is_empty() {
            continue;
        }

        let field = |column: usize| {
            record
                .get(column)
                .ok_or(CsvImportError::MissingColumn { column, row })
        };

        let date = parse_date(field(mapping.date_column)?, &mapping.date_format)?;
        let description = field(mapping.description_column)?.to_string();
        let amount = parse_mapped_amount(&record, mapping, row)?;

        let transaction_type = match mapping.type_column {
            Some(column) => {
                let tag = field(column)?;
                TransactionType::from_tag(tag).unwrap_or_else(|| {
                    tracing::warn!(%tag, row, "unknown transaction type tag, defaulting to ach");
                    TransactionType::Ach
                })
            }
            None => TransactionType::Ach,
        };

        let raw_text = record
            .iter()
            .collect::<Vec<_>>()
            .join(&(delimiter as char).to_string());

        transactions.push(Transaction {
            date,
            description,
            amount,
            transaction_type,
            raw_text,
        });
    }

    if transactions.is_empty() {
        return Err(CsvImportError::NoDataRows);
    }

    Ok(transactions)
}

fn parse_mapped_amount(
    record: &csv::StringRecord,
    mapping: &CsvColumnMapping,
    row: usize,
) -> Result<Money, CsvImportError> {
    if let Some(column) = mapping.amount_column {
        let field = record
            .get(column)
            .ok_or(CsvImportError::MissingColumn { column, row })?;
        return parse_amount(field);
    }

    // Statement convention: credits are inflows, debits are outflows.
    let read = |column: Option<usize>| {
        column
            .and_then(|c| record.get(c))
            .filter(|s| !s.trim().is_empty())
            .map(parse_amount)
            .transpose()
    };
    let debit = read(mapping.debit_column)?;
    let credit = read(mapping.credit_column)?;

    Ok(match (credit, debit) {
        (Some(c), None) => c,
        (None, Some(d)) => -d,
        _ => Money::zero(),
    })
}

fn parse_date(s: &str, format: &str) -> Result<NaiveDate, CsvImportError> {
    let s = s.trim();

    if let Ok(date) = NaiveDate::parse_from_str(s, format) {
        return Ok(date);
    }

    for fmt in &[
        "%m/%d/%Y", "%d/%m/%Y", "%Y/%m/%d", "%m-%d-%Y", "%d-%m-%Y", "%Y-%m-%d",
    ] {
        if let Ok(date) = NaiveDate::parse_from_str(s, fmt) {
            return Ok(date);
        }
    }

    Err(CsvImportError::InvalidDate(s.to_string()))
}

fn parse_amount(s: &str) -> Result<Money, CsvImportError> {
    let s = s.trim();
    let (negative, s) = if s.starts_with('(') && s.ends_with(')') {
        (true, &s[1..s.len() - 1])
    } else {
        (false, s)
    };
    let cleaned = s.replace([',', '$', ' '], "");
    let mut dec =
        Decimal::from_str(&cleaned).map_err(|_| CsvImportError::InvalidAmount(s.to_string()))?;
    if negative {
        dec = -dec;
    }
    Ok(Money::from_decimal(dec))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn default_profile() -> CsvProfile {
        CsvProfile::default()
    }

    // ── parse_amount ──────────────────────────────────────────────────────────

    #[test]
    fn parse_amount_plain_and_signed() {
        assert_eq!(parse_amount("123.45").unwrap(), Money::from_cents(12345));
        assert_eq!(parse_amount("-50.00").unwrap(), Money::from_cents(-5000));
    }

    #[test]
    fn parse_amount_currency_forms() {
        assert_eq!(parse_amount("$1,234.56").unwrap(), Money::from_cents(123456));
        assert_eq!(parse_amount("(75.25)").unwrap(), Money::from_cents(-7525));
    }

    #[test]
    fn parse_amount_invalid() {
        assert!(parse_amount("not_a_number").is_err());
        assert!(parse_amount("").is_err());
    }

    // ── import ────────────────────────────────────────────────────────────────

    #[test]
    fn import_basic_amount_column() {
        let data = b"date,description,amount\n2024-01-15,MERCHANT DEPOSIT,49.99\n2024-01-16,ONDECK PAYMENT,-250.00\n";
        let txs = import_transactions(data.as_ref(), &default_profile()).unwrap();
        assert_eq!(txs.len(), 2);
        assert_eq!(txs[0].amount, Money::from_cents(4999));
        assert_eq!(txs[0].description, "MERCHANT DEPOSIT");
        assert_eq!(txs[1].amount, Money::from_cents(-25000));
    }

    #[test]
    fn import_debit_credit_columns() {
        let data = b"date,description,debit,credit\n2024-01-15,WIRE IN,,1000.00\n2024-01-16,LENDER DRAFT,250.00,\n";
        let profile = CsvProfile {
            mapping: CsvColumnMapping {
                amount_column: None,
                debit_column: Some(2),
                credit_column: Some(3),
                ..CsvColumnMapping::default()
            },
            ..default_profile()
        };
        let txs = import_transactions(data.as_ref(), &profile).unwrap();
        // Credits are inflows, debits outflows.
        assert_eq!(txs[0].amount, Money::from_cents(100000));
        assert_eq!(txs[1].amount, Money::from_cents(-25000));
    }

    #[test]
    fn import_type_column_with_lenient_fallback() {
        let data = b"date,description,amount,type\n2024-01-15,FEDWIRE CREDIT,500.00,wire\n2024-01-16,MYSTERY,10.00,carrier-pigeon\n";
        let profile = CsvProfile {
            mapping: CsvColumnMapping {
                type_column: Some(3),
                ..CsvColumnMapping::default()
            },
            ..default_profile()
        };
        let txs = import_transactions(data.as_ref(), &profile).unwrap();
        assert_eq!(txs[0].transaction_type, TransactionType::Wire);
        assert_eq!(txs[1].transaction_type, TransactionType::Ach);
    }

    #[test]
    fn import_preserves_raw_text() {
        let data = b"date,description,amount\n2024-01-15,MERCHANT DEPOSIT,49.99\n";
        let txs = import_transactions(data.as_ref(), &default_profile()).unwrap();
        assert_eq!(txs[0].raw_text, "2024-01-15,MERCHANT DEPOSIT,49.99");
    }

    #[test]
    fn import_no_data_rows_errors() {
        let data = b"date,description,amount\n";
        let result = import_transactions(data.as_ref(), &default_profile());
        assert!(matches!(result, Err(CsvImportError::NoDataRows)));
    }

    #[test]
    fn import_date_fallback_formats() {
        let data = b"date,description,amount\n01/15/2024,MERCHANT DEPOSIT,10.00\n";
        let txs = import_transactions(data.as_ref(), &default_profile()).unwrap();
        assert_eq!(
            txs[0].date,
            NaiveDate::from_ymd_opt(2024, 1, 15).unwrap()
        );
    }

    // ── profile ───────────────────────────────────────────────────────────────

    #[test]
    fn profile_parses_from_toml() {
        let profile = CsvProfile::from_toml(
            r#"
            has_header = false
            delimiter = ";"

            [mapping]
            date_column = 1
            description_column = 2
            amount_column = 0
            date_format = "%m/%d/%Y"
            "#,
        )
        .unwrap();
        assert!(!profile.has_header);
        assert_eq!(profile.delimiter, ";");
        assert_eq!(profile.mapping.amount_column, Some(0));
    }

    #[test]
    fn profile_rejects_malformed_toml() {
        assert!(matches!(
            CsvProfile::from_toml("has_header = maybe"),
            Err(CsvImportError::Profile(_))
        ));
    }
}
