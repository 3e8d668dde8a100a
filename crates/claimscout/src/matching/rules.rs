//! The additive rule set behind settlement matching.
//!
//! Rules are independent: each one that fires adds its fixed point value and
//! appends its reason string, so one settlement can accumulate points from
//! several rules. Reason order is rule-firing order.

use crate::catalog::{Settlement, SettlementCategory};

use super::QuestionnaireAnswers;

pub(crate) fn score_settlement(
    settlement: &Settlement,
    answers: &QuestionnaireAnswers,
) -> (u32, Vec<String>) {
    let mut score: u32 = 0;
    let mut reasons = Vec::new();

    if let Some(categories) = &answers.purchase_categories {
        let points = match &settlement.category {
            SettlementCategory::DataPrivacy
                if categories.mentions_any(&["Electronics", "Software"]) =>
            {
                Some(30)
            }
            SettlementCategory::ConsumerProtection if categories.mentions("Electronics") => {
                Some(25)
            }
            SettlementCategory::ConsumerFraud if categories.mentions("Automotive") => Some(30),
            SettlementCategory::FalseAdvertising if categories.mentions("Food") => Some(25),
            _ => None,
        };
        if let Some(points) = points {
            score += points;
            reasons.push("Matches your purchase categories".to_string());
        }
    }

    if answers.data_breach.as_deref() == Some("Yes")
        && settlement.category == SettlementCategory::DataPrivacy
    {
        score += 40;
        reasons.push("You reported receiving data breach notifications".to_string());
    }

    if let Some(period) = &answers.purchase_period {
        if settlement.name.contains("2020-2023") && period.mentions("2020") {
            score += 20;
            reasons.push("Matches your purchase timeline".to_string());
        }
        if settlement.name.contains("2021-2024") && period.mentions_any(&["2022", "2024"]) {
            score += 20;
            reasons.push("Matches your purchase timeline".to_string());
        }
    }

    if let Some(companies) = &answers.companies {
        let matched = match settlement.company.as_str() {
            "TechCorp Inc." => companies.mentions("Tech"),
            "RetailGiant" => companies.mentions_any(&["retailer", "Amazon", "Target"]),
            _ => false,
        };
        if matched {
            score += 25;
            reasons.push("Matches companies you purchased from".to_string());
        }
    }

    if let Some(issues) = &answers.issues {
        let points = match &settlement.category {
            SettlementCategory::FalseAdvertising
                if issues.mentions_any(&["Misleading", "False"]) =>
            {
                Some(30)
            }
            SettlementCategory::ConsumerFraud if issues.mentions("Warranty") => Some(30),
            _ => None,
        };
        if let Some(points) = points {
            score += points;
            reasons.push("Matches issues you experienced".to_string());
        }
    }

    if let Some(notifications) = &answers.notifications {
        if notifications.mentions_any(&["Yes", "Not sure"])
            && settlement.category == SettlementCategory::DataPrivacy
        {
            score += 15;
            reasons.push("You may have received notifications for this settlement".to_string());
        }
    }

    (score, reasons)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::SettlementCatalog;
    use crate::matching::AnswerValue;

    fn settlement(id: u32) -> Settlement {
        SettlementCatalog::standard()
            .find(id)
            .expect("fixture settlement")
            .clone()
    }

    #[test]
    fn independent_rules_sum_their_points() {
        let answers = QuestionnaireAnswers {
            purchase_categories: Some(AnswerValue::from(vec!["Electronics".to_string()])),
            data_breach: Some("Yes".to_string()),
            ..Default::default()
        };

        let (score, reasons) = score_settlement(&settlement(1), &answers);
        assert_eq!(score, 30 + 40);
        assert_eq!(reasons.len(), 2);
        assert_eq!(reasons[0], "Matches your purchase categories");
        assert_eq!(reasons[1], "You reported receiving data breach notifications");
    }

    #[test]
    fn purchase_period_rules_key_off_the_settlement_name() {
        let answers = QuestionnaireAnswers {
            purchase_period: Some(AnswerValue::from("2020-2021")),
            ..Default::default()
        };
        let (techcorp_score, _) = score_settlement(&settlement(1), &answers);
        assert_eq!(techcorp_score, 20, "TechCorp name carries 2020-2023");

        let (retail_score, _) = score_settlement(&settlement(2), &answers);
        assert_eq!(retail_score, 0, "2020 does not satisfy the 2021-2024 window");

        let answers = QuestionnaireAnswers {
            purchase_period: Some(AnswerValue::from("2024")),
            ..Default::default()
        };
        let (retail_score, _) = score_settlement(&settlement(2), &answers);
        assert_eq!(retail_score, 20);
    }

    #[test]
    fn company_rule_substring_matches_user_answers() {
        let answers = QuestionnaireAnswers {
            companies: Some(AnswerValue::from(vec!["Online retailer".to_string()])),
            ..Default::default()
        };
        let (score, reasons) = score_settlement(&settlement(2), &answers);
        assert_eq!(score, 25);
        assert_eq!(reasons, vec!["Matches companies you purchased from"]);

        let (techcorp_score, _) = score_settlement(&settlement(1), &answers);
        assert_eq!(techcorp_score, 0);
    }

    #[test]
    fn warranty_issues_match_consumer_fraud_only() {
        let answers = QuestionnaireAnswers {
            issues: Some(AnswerValue::from(vec!["Warranty problems".to_string()])),
            ..Default::default()
        };
        let (autoparts_score, _) = score_settlement(&settlement(3), &answers);
        assert_eq!(autoparts_score, 30);

        let (foodbrand_score, _) = score_settlement(&settlement(4), &answers);
        assert_eq!(foodbrand_score, 0);
    }

    #[test]
    fn notifications_rule_accepts_not_sure() {
        let answers = QuestionnaireAnswers {
            notifications: Some(AnswerValue::from("Not sure")),
            ..Default::default()
        };
        let (score, _) = score_settlement(&settlement(1), &answers);
        assert_eq!(score, 15);

        let (other_score, _) = score_settlement(&settlement(3), &answers);
        assert_eq!(other_score, 0);
    }

    #[test]
    fn unrecognized_category_accrues_no_category_points() {
        let mut odd = settlement(1);
        odd.category = SettlementCategory::Other("Securities".to_string());
        let answers = QuestionnaireAnswers {
            purchase_categories: Some(AnswerValue::from("Electronics")),
            ..Default::default()
        };
        let (score, reasons) = score_settlement(&odd, &answers);
        assert_eq!(score, 0);
        assert!(reasons.is_empty());
    }
}
