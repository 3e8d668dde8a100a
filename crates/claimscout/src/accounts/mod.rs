//! User accounts, subscription tiers, and the storage abstraction.
//!
//! The repository trait replaces shared mutable module state: subscription
//! changes and match history go through explicit get/update operations so the
//! service module can be exercised in isolation.

use crate::eligibility::Receipt;
use crate::matching::MatchResult;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Subscription level controlling access to partnered-law-firm surfaces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SubscriptionTier {
    Free,
    Premium,
}

impl SubscriptionTier {
    pub const fn label(self) -> &'static str {
        match self {
            SubscriptionTier::Free => "free",
            SubscriptionTier::Premium => "premium",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "free" => Some(SubscriptionTier::Free),
            "premium" => Some(SubscriptionTier::Premium),
            _ => None,
        }
    }

    /// Public pricing entry for this tier, as shown on the upgrade page.
    pub fn listing(self) -> TierListing {
        match self {
            SubscriptionTier::Free => TierListing {
                id: SubscriptionTier::Free,
                name: "Free".to_string(),
                price: 0.0,
                features: vec![
                    "View up to 3 settlements".to_string(),
                    "Basic auto-fill assistance".to_string(),
                    "Manual form review".to_string(),
                ],
                limitations: vec![
                    "Limited to 3 settlements per month".to_string(),
                    "No receipt scanning".to_string(),
                    "No email integration".to_string(),
                    "No access to Partnered Law Firms".to_string(),
                ],
            },
            SubscriptionTier::Premium => TierListing {
                id: SubscriptionTier::Premium,
                name: "Premium".to_string(),
                price: 9.99,
                features: vec![
                    "Unlimited settlements".to_string(),
                    "Advanced auto-fill".to_string(),
                    "Receipt scanning".to_string(),
                    "Email integration".to_string(),
                    "Priority support".to_string(),
                    "Export claim data".to_string(),
                    "Access to Partnered Law Firms".to_string(),
                    "Direct attorney support".to_string(),
                    "Priority claim processing".to_string(),
                    "Higher payout opportunities".to_string(),
                    "Settlement updates from law firms".to_string(),
                    "Access to claim administrators".to_string(),
                ],
                limitations: Vec::new(),
            },
        }
    }

    /// Every tier's listing, cheapest first.
    pub fn listings() -> Vec<TierListing> {
        vec![
            SubscriptionTier::Free.listing(),
            SubscriptionTier::Premium.listing(),
        ]
    }

    /// Feature switches exposed on the subscription status payload.
    pub fn features(self) -> TierFeatures {
        match self {
            SubscriptionTier::Free => TierFeatures {
                max_settlements: Some(3),
                receipt_scanning: false,
                email_integration: false,
                export_data: false,
                law_firm_access: false,
            },
            SubscriptionTier::Premium => TierFeatures {
                max_settlements: None,
                receipt_scanning: true,
                email_integration: true,
                export_data: true,
                law_firm_access: true,
            },
        }
    }
}

/// Public pricing/feature entry for one tier. Served unauthenticated, so it
/// carries no per-user state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TierListing {
    pub id: SubscriptionTier,
    pub name: String,
    pub price: f64,
    pub features: Vec<String>,
    pub limitations: Vec<String>,
}

/// Per-tier feature switches. `max_settlements: None` means unlimited.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TierFeatures {
    pub max_settlements: Option<u32>,
    pub receipt_scanning: bool,
    pub email_integration: bool,
    pub export_data: bool,
    pub law_firm_access: bool,
}

/// One user account plus their imported purchase history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserRecord {
    pub id: u32,
    pub email: String,
    pub name: String,
    pub address: String,
    pub phone: String,
    pub subscription_tier: SubscriptionTier,
    pub receipts: Vec<Receipt>,
}

impl UserRecord {
    /// The showcase account the seeded repository starts with.
    pub fn demo() -> Self {
        UserRecord {
            id: 1,
            email: "demo@example.com".to_string(),
            name: "Kennedy".to_string(),
            address: "123 Main St, Anytown, ST 12345".to_string(),
            phone: "555-0100".to_string(),
            subscription_tier: SubscriptionTier::Premium,
            receipts: demo_receipts(),
        }
    }
}

fn demo_receipts() -> Vec<Receipt> {
    vec![
        Receipt {
            id: 1,
            date: date(2023, 6, 15),
            merchant: "Amazon".to_string(),
            amount: 89.99,
            product: "Wireless Headphones".to_string(),
            category: "Electronics".to_string(),
        },
        Receipt {
            id: 2,
            date: date(2023, 8, 22),
            merchant: "Target".to_string(),
            amount: 45.50,
            product: "Household Items".to_string(),
            category: "Home".to_string(),
        },
        Receipt {
            id: 3,
            date: date(2023, 11, 10),
            merchant: "Best Buy".to_string(),
            amount: 299.99,
            product: "Smart TV".to_string(),
            category: "Electronics".to_string(),
        },
    ]
}

/// Storage abstraction so the service module can be exercised in isolation.
pub trait UserRepository: Send + Sync {
    fn fetch(&self, id: u32) -> Result<Option<UserRecord>, RepositoryError>;
    fn update_tier(&self, id: u32, tier: SubscriptionTier) -> Result<UserRecord, RepositoryError>;
    fn record_matches(&self, id: u32, matches: Vec<MatchResult>) -> Result<(), RepositoryError>;
    fn fetch_matches(&self, id: u32) -> Result<Vec<MatchResult>, RepositoryError>;
}

/// Error enumeration for repository failures.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("record not found")]
    NotFound,
    #[error("repository unavailable: {0}")]
    Unavailable(String),
}

/// Claim earnings rollup shown on the dashboard.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EarningsSummary {
    pub total_earnings: f64,
    pub pending_claims: u32,
    pub completed_claims: u32,
    pub potential_earnings: f64,
    pub recent_earnings: Vec<EarningsEntry>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EarningsEntry {
    pub settlement_name: String,
    pub amount: f64,
    pub date: NaiveDate,
    pub status: String,
}

impl EarningsSummary {
    /// Fixed showcase figures until claim tracking is backed by real storage.
    pub fn showcase() -> Self {
        EarningsSummary {
            total_earnings: 275.50,
            pending_claims: 2,
            completed_claims: 3,
            potential_earnings: 850.0,
            recent_earnings: vec![
                EarningsEntry {
                    settlement_name: "TechCorp Data Breach Settlement".to_string(),
                    amount: 150.00,
                    date: date(2024, 1, 15),
                    status: "completed".to_string(),
                },
                EarningsEntry {
                    settlement_name: "RetailGiant Price Fixing".to_string(),
                    amount: 75.50,
                    date: date(2024, 2, 20),
                    status: "completed".to_string(),
                },
                EarningsEntry {
                    settlement_name: "AutoParts Warranty Settlement".to_string(),
                    amount: 50.00,
                    date: date(2024, 3, 10),
                    status: "completed".to_string(),
                },
            ],
        }
    }
}

fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("valid fixture date")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tier_parse_rejects_unknown_values() {
        assert_eq!(SubscriptionTier::parse("free"), Some(SubscriptionTier::Free));
        assert_eq!(
            SubscriptionTier::parse("premium"),
            Some(SubscriptionTier::Premium)
        );
        assert_eq!(SubscriptionTier::parse("platinum"), None);
        assert_eq!(SubscriptionTier::parse("Premium"), None);
    }

    #[test]
    fn premium_features_unlock_law_firm_access() {
        assert!(!SubscriptionTier::Free.features().law_firm_access);
        assert!(SubscriptionTier::Premium.features().law_firm_access);
        assert_eq!(SubscriptionTier::Free.features().max_settlements, Some(3));
        assert_eq!(SubscriptionTier::Premium.features().max_settlements, None);
    }

    #[test]
    fn tier_listings_order_free_before_premium() {
        let listings = SubscriptionTier::listings();
        assert_eq!(listings.len(), 2);
        assert_eq!(listings[0].id, SubscriptionTier::Free);
        assert_eq!(listings[0].price, 0.0);
        assert_eq!(listings[0].limitations.len(), 4);
        assert_eq!(listings[1].id, SubscriptionTier::Premium);
        assert_eq!(listings[1].price, 9.99);
        assert!(listings[1].limitations.is_empty());
        assert!(listings[1]
            .features
            .iter()
            .any(|feature| feature == "Access to Partnered Law Firms"));
    }

    #[test]
    fn demo_account_carries_purchase_history() {
        let user = UserRecord::demo();
        assert_eq!(user.subscription_tier, SubscriptionTier::Premium);
        assert_eq!(user.receipts.len(), 3);
        assert!(user
            .receipts
            .iter()
            .any(|receipt| receipt.category == "Electronics"));
    }
}
