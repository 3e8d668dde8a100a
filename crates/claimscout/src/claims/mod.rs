//! Claim-form pre-fill: autofill suggestions built from detected purchases,
//! and the confirmation preview shown before redirecting the user to the
//! official claims site. Nothing here submits anything anywhere.

pub mod import;

use crate::accounts::UserRecord;
use crate::catalog::Settlement;
use crate::eligibility::{self, Receipt};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

pub use import::{ReceiptCsvImporter, ReceiptImportError};

const PREVIEW_DISCLAIMER: &str =
    "This is a preview only. You will be redirected to the official claim site to submit.";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonalInfo {
    pub full_name: String,
    pub email: String,
    pub address: String,
    pub phone: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SettlementInfo {
    pub settlement_id: u32,
    pub settlement_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub official_site: Option<String>,
}

/// A receipt trimmed to the fields a claim form asks about.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PurchaseEntry {
    pub date: NaiveDate,
    pub merchant: String,
    pub amount: f64,
    pub product: String,
}

/// Suggestions only; the user must confirm every field before preview.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SuggestedAnswers {
    pub purchase_period: String,
    pub received_notification: String,
    pub amount_spent: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AutofillData {
    pub personal_info: PersonalInfo,
    pub settlement_info: SettlementInfo,
    pub purchase_history: Vec<PurchaseEntry>,
    pub suggested_answers: SuggestedAnswers,
}

/// Build autofill suggestions from the user's profile and the receipts the
/// eligibility filter considers relevant to this settlement.
pub fn build_autofill(
    user: &UserRecord,
    settlement: &Settlement,
    receipts: &[Receipt],
) -> AutofillData {
    let relevant = eligibility::relevant_receipts(settlement, receipts);
    let amount_spent: f64 = relevant.iter().map(|receipt| receipt.amount).sum();

    let purchase_history = relevant
        .into_iter()
        .map(|receipt| PurchaseEntry {
            date: receipt.date,
            merchant: receipt.merchant,
            amount: receipt.amount,
            product: receipt.product,
        })
        .collect::<Vec<_>>();

    let purchase_period = if purchase_history.is_empty() { "No" } else { "Yes" };

    AutofillData {
        personal_info: PersonalInfo {
            full_name: user.name.clone(),
            email: user.email.clone(),
            address: user.address.clone(),
            phone: user.phone.clone(),
        },
        settlement_info: SettlementInfo {
            settlement_id: settlement.id,
            settlement_name: settlement.name.clone(),
            official_site: Some(settlement.official_site.clone()),
        },
        purchase_history,
        suggested_answers: SuggestedAnswers {
            purchase_period: purchase_period.to_string(),
            // The user must answer this one themselves.
            received_notification: "Unknown".to_string(),
            amount_spent,
        },
    }
}

/// What will be submitted, echoed back for a final review.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClaimPreview {
    pub preview: AutofillData,
    pub ready_for_submission: bool,
    pub disclaimer: String,
    pub official_site: String,
}

pub fn preview(confirmed: AutofillData) -> ClaimPreview {
    let official_site = confirmed
        .settlement_info
        .official_site
        .clone()
        .unwrap_or_default();

    ClaimPreview {
        preview: confirmed,
        ready_for_submission: true,
        disclaimer: PREVIEW_DISCLAIMER.to_string(),
        official_site,
    }
}
