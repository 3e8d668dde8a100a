use serde::{Deserialize, Serialize};
use std::slice;

/// A questionnaire answer that arrives as either a bare string or a
/// multi-select list. The untagged representation accepts both wire shapes;
/// consumers always go through [`AnswerValue::selections`] for a uniform view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AnswerValue {
    Single(String),
    Multi(Vec<String>),
}

impl AnswerValue {
    /// Uniform sequence view; a bare string behaves as a one-element selection.
    pub fn selections(&self) -> &[String] {
        match self {
            AnswerValue::Single(value) => slice::from_ref(value),
            AnswerValue::Multi(values) => values,
        }
    }

    /// True when any selection contains the token. Matching is case-sensitive,
    /// mirroring the questionnaire's authored option labels.
    pub fn mentions(&self, token: &str) -> bool {
        self.selections().iter().any(|value| value.contains(token))
    }

    pub fn mentions_any(&self, tokens: &[&str]) -> bool {
        tokens.iter().any(|token| self.mentions(token))
    }
}

impl From<&str> for AnswerValue {
    fn from(value: &str) -> Self {
        AnswerValue::Single(value.to_string())
    }
}

impl From<Vec<String>> for AnswerValue {
    fn from(values: Vec<String>) -> Self {
        AnswerValue::Multi(values)
    }
}

/// Answers collected by the questionnaire, keyed by question. Every field is
/// optional; an absent field simply contributes nothing to the score.
/// `spending` and `location` are collected for claim pre-fill context and are
/// not scored.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct QuestionnaireAnswers {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub purchase_categories: Option<AnswerValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data_breach: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub purchase_period: Option<AnswerValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub companies: Option<AnswerValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub issues: Option<AnswerValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notifications: Option<AnswerValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub spending: Option<AnswerValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<AnswerValue>,
}
