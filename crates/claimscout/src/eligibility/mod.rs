//! Purchase-history eligibility detection.
//!
//! A single-pass, side-effect-free filter: given one settlement and a user's
//! receipts, flag whether the user may qualify and return the receipts that
//! justify the flag.

use crate::catalog::{Settlement, SettlementCategory};
use crate::matching::Confidence;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One purchase record from a user's imported history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Receipt {
    pub id: u32,
    pub date: NaiveDate,
    pub merchant: String,
    pub amount: f64,
    pub product: String,
    pub category: String,
}

/// Outcome of an eligibility check against one settlement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EligibilityReport {
    pub settlement_id: u32,
    pub settlement_name: String,
    pub may_qualify: bool,
    pub confidence: Confidence,
    pub message: String,
    pub detected_purchases: Vec<Receipt>,
}

/// Run the detector over a user's receipts. `detected_purchases` preserves
/// the input order; confidence never exceeds medium since receipts alone are
/// a weak signal.
pub fn detect(settlement: &Settlement, receipts: &[Receipt]) -> EligibilityReport {
    let detected = relevant_receipts(settlement, receipts);
    let may_qualify = !detected.is_empty();

    let (confidence, message) = if may_qualify {
        (
            Confidence::Medium,
            "You may qualify based on detected purchases",
        )
    } else {
        (Confidence::Low, "No matching purchases detected")
    };

    EligibilityReport {
        settlement_id: settlement.id,
        settlement_name: settlement.name.clone(),
        may_qualify,
        confidence,
        message: message.to_string(),
        detected_purchases: detected,
    }
}

/// Receipts relevant to a settlement, order preserved. Shared with the claim
/// autofill builder so both surfaces agree on what counts as relevant.
pub(crate) fn relevant_receipts(settlement: &Settlement, receipts: &[Receipt]) -> Vec<Receipt> {
    receipts
        .iter()
        .filter(|receipt| is_relevant(settlement, receipt))
        .cloned()
        .collect()
}

fn is_relevant(settlement: &Settlement, receipt: &Receipt) -> bool {
    match &settlement.category {
        // No catalog settlement carries an "Electronics" category today; the
        // arm only fires for out-of-enumeration labels.
        SettlementCategory::Other(label) if label == "Electronics" => {
            receipt.category == "Electronics"
        }
        SettlementCategory::ConsumerProtection => receipt.merchant == "RetailGiant",
        _ => false,
    }
}
