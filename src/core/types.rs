//! Domain types shared across the scoring engine

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

use crate::core::errors::{Error, Result};

/// Lowest raw response on the 5-point Likert scale
pub const MIN_RAW_ANSWER: u8 = 1;
/// Highest raw response on the 5-point Likert scale
pub const MAX_RAW_ANSWER: u8 = 5;

/// Immutable question catalog entry
///
/// `category` names the scale the question belongs to; many questions
/// share one category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    pub id: String,
    pub category: String,
    #[serde(default)]
    pub is_reverse_scored: bool,
}

impl Question {
    /// Create a forward-scored question
    pub fn new(id: impl Into<String>, category: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            category: category.into(),
            is_reverse_scored: false,
        }
    }

    /// Mark the question as reverse-keyed
    pub fn reverse_scored(mut self) -> Self {
        self.is_reverse_scored = true;
        self
    }
}

/// A higher-order trait defined as a combination of scales
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompetencyDefinition {
    pub name: String,
    pub scales: Vec<String>,
}

impl CompetencyDefinition {
    pub fn new<S: Into<String>>(
        name: impl Into<String>,
        scales: impl IntoIterator<Item = S>,
    ) -> Self {
        Self {
            name: name.into(),
            scales: scales.into_iter().map(Into::into).collect(),
        }
    }
}

/// Calibration mean/std-dev pair for one scale, competency, or the total
///
/// A `std_dev_value` of 0 is legal in stored data; the T-score formula
/// guards it at read time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Norm {
    pub category_name: String,
    pub mean_value: f64,
    pub std_dev_value: f64,
}

impl Norm {
    pub fn new(category_name: impl Into<String>, mean_value: f64, std_dev_value: f64) -> Self {
        Self {
            category_name: category_name.into(),
            mean_value,
            std_dev_value,
        }
    }
}

/// One respondent's raw answers
///
/// Keys are either question UUIDs or stringified zero-based positions
/// in test order; both conventions appear in stored logs and lookup
/// tries the UUID first.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AnswerLog(HashMap<String, u8>);

impl AnswerLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: impl Into<String>, value: u8) {
        self.0.insert(key.into(), value);
    }

    pub fn get(&self, key: &str) -> Option<u8> {
        self.0.get(key).copied()
    }

    /// Resolve the answer for a question, trying its UUID before its
    /// position in test order
    pub fn response_for(&self, question: &Question, position: usize) -> Option<u8> {
        self.get(&question.id)
            .or_else(|| self.get(&position.to_string()))
    }

    pub fn keys(&self) -> impl Iterator<Item = &String> {
        self.0.keys()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Reject raw values outside the Likert domain
    ///
    /// An out-of-domain value signals a data-integrity bug upstream and
    /// must never be silently clamped into the aggregation.
    pub fn validate(&self) -> Result<()> {
        for (key, &value) in &self.0 {
            if !(MIN_RAW_ANSWER..=MAX_RAW_ANSWER).contains(&value) {
                return Err(Error::MalformedAnswer {
                    key: key.clone(),
                    value,
                });
            }
        }
        Ok(())
    }
}

impl FromIterator<(String, u8)> for AnswerLog {
    fn from_iter<I: IntoIterator<Item = (String, u8)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Raw sum and normalized T-score at one aggregation level
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LevelScore {
    pub raw: f64,
    pub t_score: f64,
}

/// Full score tree for one respondent
///
/// Computed once per submission and persisted verbatim by callers; a
/// corrective re-score produces a new value rather than mutating this
/// one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetailedScores {
    pub scales: BTreeMap<String, LevelScore>,
    pub competencies: BTreeMap<String, LevelScore>,
    pub total: LevelScore,
}

/// Complete calibration output of the norm builder
///
/// Always replaces any prior norm set wholesale; a partial overwrite
/// would mix norms computed from different sample generations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NormSet {
    pub scale_norms: Vec<Norm>,
    pub competency_norms: Vec<Norm>,
    pub total_norm: Norm,
}

impl NormSet {
    /// Competency rows plus the TOTAL row, as the score calculator
    /// consumes them
    pub fn competency_rows_with_total(&self) -> Vec<Norm> {
        let mut rows = self.competency_norms.clone();
        rows.push(self.total_norm.clone());
        rows
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_answer_log_resolves_uuid_before_position() {
        let question = Question::new("q-1", "focus");
        let mut log = AnswerLog::new();
        log.insert("q-1", 4);
        log.insert("0", 2);

        assert_eq!(log.response_for(&question, 0), Some(4));
    }

    #[test]
    fn test_answer_log_falls_back_to_position() {
        let question = Question::new("q-1", "focus");
        let mut log = AnswerLog::new();
        log.insert("3", 5);

        assert_eq!(log.response_for(&question, 3), Some(5));
        assert_eq!(log.response_for(&question, 1), None);
    }

    #[test]
    fn test_answer_log_validate_rejects_out_of_domain() {
        let mut log = AnswerLog::new();
        log.insert("q-1", 6);

        let err = log.validate().unwrap_err();
        assert!(matches!(err, Error::MalformedAnswer { value: 6, .. }));
    }

    #[test]
    fn test_answer_log_validate_accepts_full_domain() {
        let log: AnswerLog = (1..=5u8).map(|v| (format!("q-{}", v), v)).collect();
        assert!(log.validate().is_ok());
    }
}
