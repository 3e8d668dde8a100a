//! Rule-based matching of settlements against questionnaire answers.

mod answers;
mod rules;

pub use answers::{AnswerValue, QuestionnaireAnswers};

use crate::catalog::Settlement;
use serde::{Deserialize, Serialize};

/// Score assigned to settlements that matched no explicit rule under
/// [`FloorPolicy::AlwaysInclude`].
pub const FLOOR_SCORE: u32 = 10;

const FLOOR_REASON: &str = "May be relevant based on your profile";

/// How the engine treats settlements that matched no rule.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FloorPolicy {
    /// Keep every settlement, clamping unmatched ones to [`FLOOR_SCORE`] so
    /// the user always sees a ranked list. This is the consumer-facing
    /// default.
    #[default]
    AlwaysInclude,
    /// Drop unmatched settlements from the result entirely.
    OmitUnmatched,
}

/// Three-level bucket derived deterministically from the numeric score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Confidence {
    High,
    Medium,
    Low,
}

impl Confidence {
    pub fn from_score(score: u32) -> Self {
        if score >= 60 {
            Confidence::High
        } else if score >= 40 {
            Confidence::Medium
        } else {
            Confidence::Low
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Confidence::High => "high",
            Confidence::Medium => "medium",
            Confidence::Low => "low",
        }
    }
}

/// A settlement annotated with its score, the reasons each rule fired, and
/// the derived confidence bucket. Serializes as the settlement's own fields
/// plus the match annotations, matching the questionnaire wire contract.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchResult {
    #[serde(flatten)]
    pub settlement: Settlement,
    pub match_score: u32,
    pub match_reasons: Vec<String>,
    pub confidence: Confidence,
}

/// Pure scorer over an already-materialized catalog. Holds no state beyond
/// the floor policy; concurrent invocations need no coordination.
#[derive(Debug, Clone, Copy, Default)]
pub struct MatchingEngine {
    floor_policy: FloorPolicy,
}

impl MatchingEngine {
    pub fn new(floor_policy: FloorPolicy) -> Self {
        Self { floor_policy }
    }

    pub fn floor_policy(&self) -> FloorPolicy {
        self.floor_policy
    }

    /// Rank the catalog against the answers, descending by score. The sort is
    /// stable, so equally scored settlements keep their catalog order.
    pub fn rank(&self, answers: &QuestionnaireAnswers, catalog: &[Settlement]) -> Vec<MatchResult> {
        let mut results = Vec::with_capacity(catalog.len());

        for settlement in catalog {
            let (mut score, mut reasons) = rules::score_settlement(settlement, answers);

            if score == 0 {
                match self.floor_policy {
                    FloorPolicy::AlwaysInclude => {
                        score = FLOOR_SCORE;
                        reasons.push(FLOOR_REASON.to_string());
                    }
                    FloorPolicy::OmitUnmatched => continue,
                }
            }

            results.push(MatchResult {
                settlement: settlement.clone(),
                match_score: score,
                match_reasons: reasons,
                confidence: Confidence::from_score(score),
            });
        }

        results.sort_by(|a, b| b.match_score.cmp(&a.match_score));
        results
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::SettlementCatalog;

    fn catalog() -> SettlementCatalog {
        SettlementCatalog::standard()
    }

    #[test]
    fn empty_answers_floor_every_settlement_under_always_include() {
        let engine = MatchingEngine::new(FloorPolicy::AlwaysInclude);
        let catalog = catalog();
        let results = engine.rank(&QuestionnaireAnswers::default(), catalog.settlements());

        assert_eq!(results.len(), catalog.len());
        for result in &results {
            assert_eq!(result.match_score, FLOOR_SCORE);
            assert_eq!(result.confidence, Confidence::Low);
            assert_eq!(result.match_reasons, vec![FLOOR_REASON.to_string()]);
        }
        // Stable sort: all-equal scores preserve catalog order.
        let ids: Vec<u32> = results.iter().map(|r| r.settlement.id).collect();
        assert_eq!(ids, vec![1, 2, 3, 4]);
    }

    #[test]
    fn omit_unmatched_drops_zero_scoring_settlements() {
        let engine = MatchingEngine::new(FloorPolicy::OmitUnmatched);
        let answers = QuestionnaireAnswers {
            issues: Some(AnswerValue::from(vec!["Warranty problems".to_string()])),
            ..Default::default()
        };
        let results = engine.rank(&answers, catalog().settlements());

        assert_eq!(results.len(), 1);
        assert_eq!(results[0].settlement.id, 3);
        assert_eq!(results[0].match_score, 30);
    }

    #[test]
    fn breach_scenario_ranks_techcorp_high() {
        let engine = MatchingEngine::default();
        let answers = QuestionnaireAnswers {
            data_breach: Some("Yes".to_string()),
            purchase_categories: Some(AnswerValue::from(vec!["Electronics".to_string()])),
            ..Default::default()
        };
        let results = engine.rank(&answers, catalog().settlements());

        let ids: Vec<u32> = results.iter().map(|r| r.settlement.id).collect();
        assert_eq!(ids, vec![1, 2, 3, 4]);

        assert_eq!(results[0].match_score, 70);
        assert_eq!(results[0].confidence, Confidence::High);
        assert_eq!(results[1].match_score, 25);
        assert_eq!(results[1].confidence, Confidence::Low);
        assert_eq!(results[2].match_score, FLOOR_SCORE);
        assert_eq!(results[3].match_score, FLOOR_SCORE);
    }

    #[test]
    fn confidence_buckets_follow_score_thresholds() {
        assert_eq!(Confidence::from_score(0), Confidence::Low);
        assert_eq!(Confidence::from_score(39), Confidence::Low);
        assert_eq!(Confidence::from_score(40), Confidence::Medium);
        assert_eq!(Confidence::from_score(59), Confidence::Medium);
        assert_eq!(Confidence::from_score(60), Confidence::High);
        assert_eq!(Confidence::from_score(120), Confidence::High);
    }

    #[test]
    fn bare_string_answer_scores_like_singleton_list() {
        let engine = MatchingEngine::default();
        let bare = QuestionnaireAnswers {
            purchase_categories: Some(AnswerValue::from("Electronics")),
            ..Default::default()
        };
        let list = QuestionnaireAnswers {
            purchase_categories: Some(AnswerValue::from(vec!["Electronics".to_string()])),
            ..Default::default()
        };

        let bare_scores: Vec<u32> = engine
            .rank(&bare, catalog().settlements())
            .iter()
            .map(|r| r.match_score)
            .collect();
        let list_scores: Vec<u32> = engine
            .rank(&list, catalog().settlements())
            .iter()
            .map(|r| r.match_score)
            .collect();
        assert_eq!(bare_scores, list_scores);
    }

    #[test]
    fn match_result_serializes_flattened_with_annotations() {
        let engine = MatchingEngine::default();
        let answers = QuestionnaireAnswers {
            data_breach: Some("Yes".to_string()),
            ..Default::default()
        };
        let results = engine.rank(&answers, catalog().settlements());
        let value = serde_json::to_value(&results[0]).expect("serializes");

        assert_eq!(value["name"], "TechCorp Data Breach Settlement");
        assert_eq!(value["matchScore"], 40);
        assert_eq!(value["confidence"], "medium");
        assert!(value["matchReasons"].is_array());
    }
}
