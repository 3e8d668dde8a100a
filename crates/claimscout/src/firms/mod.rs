//! Partnered law-firm directory and their settlement updates.

use crate::catalog::Settlement;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LawFirm {
    pub id: u32,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub website: String,
    pub specialties: Vec<String>,
    /// Settlement ids this firm handles.
    pub settlements: Vec<u32>,
    pub benefits: Vec<String>,
    pub description: String,
    pub logo: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UpdateKind {
    Deadline,
    Payout,
    Status,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LawFirmUpdate {
    pub id: u32,
    pub settlement_id: u32,
    pub title: String,
    pub content: String,
    pub date: NaiveDate,
    #[serde(rename = "type")]
    pub kind: UpdateKind,
}

/// In-memory directory, loaded once; updates are keyed by firm id.
#[derive(Debug, Clone)]
pub struct LawFirmDirectory {
    firms: Vec<LawFirm>,
    updates: BTreeMap<u32, Vec<LawFirmUpdate>>,
}

impl LawFirmDirectory {
    pub fn new(firms: Vec<LawFirm>, updates: BTreeMap<u32, Vec<LawFirmUpdate>>) -> Self {
        Self { firms, updates }
    }

    pub fn firms(&self) -> &[LawFirm] {
        &self.firms
    }

    pub fn find(&self, id: u32) -> Option<&LawFirm> {
        self.firms.iter().find(|firm| firm.id == id)
    }

    pub fn updates_for(&self, firm_id: u32) -> &[LawFirmUpdate] {
        self.updates
            .get(&firm_id)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Firm partnered with the settlement, if the partnership reference
    /// resolves.
    pub fn firm_for_settlement(&self, settlement: &Settlement) -> Option<&LawFirm> {
        settlement
            .partnered_law_firm
            .and_then(|firm_id| self.find(firm_id))
    }

    /// Showcase directory matching the standard settlement catalog.
    pub fn standard() -> Self {
        let partner_benefits = || {
            vec![
                "Direct attorney support".to_string(),
                "Priority claim processing".to_string(),
                "Higher payout opportunities".to_string(),
                "Regular settlement updates".to_string(),
                "Access to claim administrators".to_string(),
                "Expert legal guidance".to_string(),
            ]
        };

        let firms = vec![
            LawFirm {
                id: 1,
                name: "Smith & Associates Class Action Law".to_string(),
                email: "support@smithlaw.com".to_string(),
                phone: "1-800-555-0100".to_string(),
                website: "https://smithlaw.com".to_string(),
                specialties: vec![
                    "Data Privacy".to_string(),
                    "Consumer Protection".to_string(),
                ],
                settlements: vec![1, 2],
                benefits: partner_benefits(),
                description: "Leading class action law firm specializing in data privacy and \
                              consumer protection cases. We have successfully represented \
                              thousands of clients in major settlements."
                    .to_string(),
                logo: "/law-firm-logo.jpg".to_string(),
            },
            LawFirm {
                id: 2,
                name: "Consumer Rights Legal Group".to_string(),
                email: "info@consumerrightslaw.com".to_string(),
                phone: "1-800-555-0200".to_string(),
                website: "https://consumerrightslaw.com".to_string(),
                specialties: vec![
                    "Consumer Fraud".to_string(),
                    "False Advertising".to_string(),
                ],
                settlements: vec![3],
                benefits: partner_benefits(),
                description: "Dedicated to protecting consumer rights through class action \
                              litigation. Our team has recovered millions in settlements for \
                              consumers nationwide."
                    .to_string(),
                logo: "/law-firm-logo.jpg".to_string(),
            },
        ];

        let mut updates = BTreeMap::new();
        updates.insert(
            1,
            vec![
                LawFirmUpdate {
                    id: 1,
                    settlement_id: 1,
                    title: "Important Deadline Reminder".to_string(),
                    content: "The deadline for the TechCorp Data Breach Settlement is \
                              approaching. Please submit your claim by December 31, 2024 to \
                              ensure eligibility."
                        .to_string(),
                    date: date(2024, 11, 15),
                    kind: UpdateKind::Deadline,
                },
                LawFirmUpdate {
                    id: 2,
                    settlement_id: 1,
                    title: "Payout Information Update".to_string(),
                    content: "We have received confirmation that payouts for approved claims \
                              will begin processing in Q1 2025. Estimated amounts range from \
                              $50-$500 based on individual circumstances."
                        .to_string(),
                    date: date(2024, 11, 10),
                    kind: UpdateKind::Payout,
                },
                LawFirmUpdate {
                    id: 3,
                    settlement_id: 2,
                    title: "Settlement Status Update".to_string(),
                    content: "The RetailGiant Price Fixing settlement is progressing well. All \
                              eligible claims are being reviewed by the claims administrator."
                        .to_string(),
                    date: date(2024, 11, 5),
                    kind: UpdateKind::Status,
                },
            ],
        );
        updates.insert(
            2,
            vec![
                LawFirmUpdate {
                    id: 4,
                    settlement_id: 3,
                    title: "Extended Warranty Settlement Update".to_string(),
                    content: "We are pleased to announce that the AutoParts Warranty Settlement \
                              has been approved. Claim submissions are now being processed."
                        .to_string(),
                    date: date(2024, 11, 12),
                    kind: UpdateKind::Status,
                },
                LawFirmUpdate {
                    id: 5,
                    settlement_id: 3,
                    title: "Higher Payout Opportunities".to_string(),
                    content: "Clients working with our firm may be eligible for higher payouts \
                              due to our direct relationship with the claims administrator. \
                              Contact us for more information."
                        .to_string(),
                    date: date(2024, 11, 8),
                    kind: UpdateKind::Payout,
                },
            ],
        );

        Self::new(firms, updates)
    }
}

/// Message a user sends to a partnered firm about a settlement.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactRequest {
    pub subject: String,
    pub message: String,
    #[serde(default)]
    pub settlement_id: Option<u32>,
}

/// Acknowledgement returned after a contact request is accepted.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactReceipt {
    pub success: bool,
    pub message: String,
    pub law_firm_name: String,
    pub contact_email: String,
}

fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("valid fixture date")
}
