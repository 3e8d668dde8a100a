//! CSV import for purchase-history exports.
//!
//! Expected header: `Date,Merchant,Amount,Product,Category`. Dates are
//! `YYYY-MM-DD`; amounts are plain decimals. Receipt ids are assigned in row
//! order since exports carry none.

use crate::eligibility::Receipt;
use chrono::NaiveDate;
use serde::Deserialize;
use std::io::Read;
use std::path::Path;

#[derive(Debug)]
pub enum ReceiptImportError {
    Io(std::io::Error),
    Csv(csv::Error),
    InvalidDate { row: usize, value: String },
    InvalidAmount { row: usize, value: String },
}

impl std::fmt::Display for ReceiptImportError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ReceiptImportError::Io(err) => write!(f, "failed to read receipts export: {}", err),
            ReceiptImportError::Csv(err) => write!(f, "invalid receipts CSV data: {}", err),
            ReceiptImportError::InvalidDate { row, value } => {
                write!(f, "row {}: '{}' is not a YYYY-MM-DD date", row, value)
            }
            ReceiptImportError::InvalidAmount { row, value } => {
                write!(f, "row {}: '{}' is not a decimal amount", row, value)
            }
        }
    }
}

impl std::error::Error for ReceiptImportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ReceiptImportError::Io(err) => Some(err),
            ReceiptImportError::Csv(err) => Some(err),
            ReceiptImportError::InvalidDate { .. } | ReceiptImportError::InvalidAmount { .. } => {
                None
            }
        }
    }
}

impl From<std::io::Error> for ReceiptImportError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<csv::Error> for ReceiptImportError {
    fn from(err: csv::Error) -> Self {
        Self::Csv(err)
    }
}

pub struct ReceiptCsvImporter;

impl ReceiptCsvImporter {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Vec<Receipt>, ReceiptImportError> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(file)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Vec<Receipt>, ReceiptImportError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);
        let mut receipts = Vec::new();

        for (index, record) in csv_reader.deserialize::<ReceiptRow>().enumerate() {
            let row = record?;
            // Header is row 1 on most exports; report 1-based data rows.
            let row_number = index + 1;
            receipts.push(row.into_receipt(row_number)?);
        }

        Ok(receipts)
    }
}

#[derive(Debug, Deserialize)]
struct ReceiptRow {
    #[serde(rename = "Date")]
    date: String,
    #[serde(rename = "Merchant")]
    merchant: String,
    #[serde(rename = "Amount")]
    amount: String,
    #[serde(rename = "Product")]
    product: String,
    #[serde(rename = "Category")]
    category: String,
}

impl ReceiptRow {
    fn into_receipt(self, row: usize) -> Result<Receipt, ReceiptImportError> {
        let date = NaiveDate::parse_from_str(self.date.trim(), "%Y-%m-%d").map_err(|_| {
            ReceiptImportError::InvalidDate {
                row,
                value: self.date.clone(),
            }
        })?;

        let amount: f64 =
            self.amount
                .trim()
                .parse()
                .map_err(|_| ReceiptImportError::InvalidAmount {
                    row,
                    value: self.amount.clone(),
                })?;

        Ok(Receipt {
            id: row as u32,
            date,
            merchant: self.merchant,
            amount,
            product: self.product,
            category: self.category,
        })
    }
}
