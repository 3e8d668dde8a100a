use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Category labels the matching rules recognize. Labels outside the fixed
/// enumeration round-trip through `Other` and accrue no category-based score.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum SettlementCategory {
    DataPrivacy,
    ConsumerProtection,
    ConsumerFraud,
    FalseAdvertising,
    Other(String),
}

impl SettlementCategory {
    pub fn label(&self) -> &str {
        match self {
            SettlementCategory::DataPrivacy => "Data Privacy",
            SettlementCategory::ConsumerProtection => "Consumer Protection",
            SettlementCategory::ConsumerFraud => "Consumer Fraud",
            SettlementCategory::FalseAdvertising => "False Advertising",
            SettlementCategory::Other(label) => label,
        }
    }
}

impl From<String> for SettlementCategory {
    fn from(value: String) -> Self {
        match value.as_str() {
            "Data Privacy" => SettlementCategory::DataPrivacy,
            "Consumer Protection" => SettlementCategory::ConsumerProtection,
            "Consumer Fraud" => SettlementCategory::ConsumerFraud,
            "False Advertising" => SettlementCategory::FalseAdvertising,
            _ => SettlementCategory::Other(value),
        }
    }
}

impl From<SettlementCategory> for String {
    fn from(value: SettlementCategory) -> Self {
        value.label().to_string()
    }
}

/// Payout band published for a settlement, in whole dollars.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AmountRange {
    pub min: u32,
    pub max: u32,
}

/// One class-action settlement users may be eligible to claim against.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Settlement {
    pub id: u32,
    pub name: String,
    pub description: String,
    pub deadline: NaiveDate,
    pub potential_amount: AmountRange,
    pub category: SettlementCategory,
    pub company: String,
    pub eligibility_criteria: Vec<String>,
    pub official_site: String,
    pub partnered_law_firm: Option<u32>,
}

/// Read-only collection of settlement records, loaded once at startup.
#[derive(Debug, Clone)]
pub struct SettlementCatalog {
    settlements: Vec<Settlement>,
}

impl SettlementCatalog {
    pub fn new(settlements: Vec<Settlement>) -> Self {
        Self { settlements }
    }

    pub fn settlements(&self) -> &[Settlement] {
        &self.settlements
    }

    pub fn find(&self, id: u32) -> Option<&Settlement> {
        self.settlements.iter().find(|settlement| settlement.id == id)
    }

    pub fn len(&self) -> usize {
        self.settlements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.settlements.is_empty()
    }

    /// Showcase catalog the service ships with until a live feed exists.
    pub fn standard() -> Self {
        let settlements = vec![
            Settlement {
                id: 1,
                name: "TechCorp Data Breach Settlement".to_string(),
                description: "Settlement regarding unauthorized data access affecting customers \
                              who made purchases between 2020-2023."
                    .to_string(),
                deadline: date(2024, 12, 31),
                potential_amount: AmountRange { min: 50, max: 500 },
                category: SettlementCategory::DataPrivacy,
                company: "TechCorp Inc.".to_string(),
                eligibility_criteria: vec![
                    "Made purchases between 2020-2023".to_string(),
                    "Received data breach notification".to_string(),
                ],
                official_site: "https://techcorpsettlement.com".to_string(),
                partnered_law_firm: Some(1),
            },
            Settlement {
                id: 2,
                name: "RetailGiant Price Fixing Class Action".to_string(),
                description: "Settlement for customers who purchased electronics from RetailGiant \
                              between 2021-2024."
                    .to_string(),
                deadline: date(2025, 3, 15),
                potential_amount: AmountRange { min: 25, max: 200 },
                category: SettlementCategory::ConsumerProtection,
                company: "RetailGiant".to_string(),
                eligibility_criteria: vec![
                    "Purchased electronics between 2021-2024".to_string(),
                    "Resides in affected states".to_string(),
                ],
                official_site: "https://retailgiantsettlement.org".to_string(),
                partnered_law_firm: Some(1),
            },
            Settlement {
                id: 3,
                name: "AutoParts Warranty Settlement".to_string(),
                description: "Settlement for consumers who purchased extended warranties on auto \
                              parts that were misrepresented."
                    .to_string(),
                deadline: date(2024, 11, 30),
                potential_amount: AmountRange { min: 100, max: 1000 },
                category: SettlementCategory::ConsumerFraud,
                company: "AutoParts Co.".to_string(),
                eligibility_criteria: vec![
                    "Purchased extended warranty".to_string(),
                    "Between 2019-2023".to_string(),
                ],
                official_site: "https://autopartssettlement.net".to_string(),
                partnered_law_firm: Some(2),
            },
            Settlement {
                id: 4,
                name: "FoodBrand Labeling Settlement".to_string(),
                description: "Settlement regarding misleading product labeling on organic food \
                              products."
                    .to_string(),
                deadline: date(2025, 1, 20),
                potential_amount: AmountRange { min: 15, max: 75 },
                category: SettlementCategory::FalseAdvertising,
                company: "FoodBrand LLC".to_string(),
                eligibility_criteria: vec![
                    "Purchased organic products".to_string(),
                    "Between 2022-2024".to_string(),
                ],
                official_site: "https://foodbrandsettlement.com".to_string(),
                partnered_law_firm: None,
            },
        ];

        Self::new(settlements)
    }
}

fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("valid fixture date")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_catalog_has_unique_ids_and_ordered_amounts() {
        let catalog = SettlementCatalog::standard();
        assert_eq!(catalog.len(), 4);

        let mut ids: Vec<u32> = catalog.settlements().iter().map(|s| s.id).collect();
        ids.dedup();
        assert_eq!(ids.len(), catalog.len(), "settlement ids must be unique");

        for settlement in catalog.settlements() {
            assert!(settlement.potential_amount.min <= settlement.potential_amount.max);
        }
    }

    #[test]
    fn find_resolves_known_and_unknown_ids() {
        let catalog = SettlementCatalog::standard();
        assert_eq!(
            catalog.find(3).map(|s| s.company.as_str()),
            Some("AutoParts Co.")
        );
        assert!(catalog.find(99).is_none());
    }

    #[test]
    fn category_round_trips_unrecognized_labels() {
        let parsed = SettlementCategory::from("Electronics".to_string());
        assert_eq!(parsed, SettlementCategory::Other("Electronics".to_string()));
        assert_eq!(parsed.label(), "Electronics");
        assert_eq!(
            SettlementCategory::from("Data Privacy".to_string()),
            SettlementCategory::DataPrivacy
        );
    }

    #[test]
    fn settlement_serializes_with_camel_case_fields() {
        let catalog = SettlementCatalog::standard();
        let value = serde_json::to_value(&catalog.settlements()[0]).expect("serializes");
        assert_eq!(value["category"], "Data Privacy");
        assert_eq!(value["potentialAmount"]["min"], 50);
        assert_eq!(value["partneredLawFirm"], 1);
        assert_eq!(value["deadline"], "2024-12-31");
    }
}
