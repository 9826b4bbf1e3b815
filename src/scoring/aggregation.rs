//! Ordered aggregation passes shared by the calculator and the norm builder

use std::collections::{HashMap, HashSet};

use crate::core::errors::Result;
use crate::core::types::{AnswerLog, CompetencyDefinition, Question};

use super::calculation::applied_score;

/// Per-category raw sums in question declaration order
///
/// Unanswered questions are skipped; answer keys matching no question
/// are dropped with a warning. The answer log is validated up front so
/// a malformed value is rejected before any accumulation. Summation
/// follows catalog order, keeping floating-point accumulation stable
/// across calls.
pub fn scale_raw_sums(answers: &AnswerLog, questions: &[Question]) -> Result<Vec<(String, f64)>> {
    answers.validate()?;
    warn_unresolvable_keys(answers, questions);

    let mut order: Vec<String> = Vec::new();
    let mut sums: HashMap<String, f64> = HashMap::new();

    for (position, question) in questions.iter().enumerate() {
        let Some(raw) = answers.response_for(question, position) else {
            continue;
        };
        if !sums.contains_key(&question.category) {
            order.push(question.category.clone());
        }
        *sums.entry(question.category.clone()).or_insert(0.0) +=
            applied_score(raw, question.is_reverse_scored);
    }

    Ok(order
        .into_iter()
        .map(|category| {
            let sum = sums.remove(&category).unwrap_or(0.0);
            (category, sum)
        })
        .collect())
}

/// Every distinct category in catalog declaration order
pub fn catalog_categories(questions: &[Question]) -> Vec<String> {
    let mut seen: HashSet<&str> = HashSet::new();
    questions
        .iter()
        .filter(|q| seen.insert(q.category.as_str()))
        .map(|q| q.category.clone())
        .collect()
}

/// Competency raw sums in definition order
///
/// Each competency sums its constituent scales' T-scores in the
/// definition's scale order; a scale with no computed T-score
/// contributes 0.
pub fn competency_raw_sums(
    scale_t_scores: &HashMap<String, f64>,
    competencies: &[CompetencyDefinition],
) -> Vec<(String, f64)> {
    competencies
        .iter()
        .map(|def| {
            let sum = def
                .scales
                .iter()
                .map(|scale| {
                    scale_t_scores.get(scale).copied().unwrap_or_else(|| {
                        log::debug!(
                            "scale '{}' has no T-score for competency '{}'; contributes 0",
                            scale,
                            def.name
                        );
                        0.0
                    })
                })
                .sum();
            (def.name.clone(), sum)
        })
        .collect()
}

fn warn_unresolvable_keys(answers: &AnswerLog, questions: &[Question]) {
    let ids: HashSet<&str> = questions.iter().map(|q| q.id.as_str()).collect();
    for key in answers.keys() {
        let is_position = key
            .parse::<usize>()
            .map(|index| index < questions.len())
            .unwrap_or(false);
        if !ids.contains(key.as_str()) && !is_position {
            log::warn!("answer key '{}' matches no question; dropped", key);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::MAX_RAW_ANSWER;

    fn catalog() -> Vec<Question> {
        vec![
            Question::new("q1", "drive"),
            Question::new("q2", "drive").reverse_scored(),
            Question::new("q3", "calm"),
            Question::new("q4", "drive"),
        ]
    }

    #[test]
    fn test_scale_raw_sums_accumulates_by_category() {
        let answers: AnswerLog = [("q1", 4u8), ("q2", 2), ("q3", 5), ("q4", 3)]
            .into_iter()
            .map(|(k, v)| (k.to_string(), v))
            .collect();

        let sums = scale_raw_sums(&answers, &catalog()).unwrap();

        // q2 is reverse-keyed: 2 scores as 4
        assert_eq!(
            sums,
            vec![("drive".to_string(), 11.0), ("calm".to_string(), 5.0)]
        );
    }

    #[test]
    fn test_scale_raw_sums_preserves_declaration_order() {
        let answers: AnswerLog = [("q3", 1u8), ("q1", 1)]
            .into_iter()
            .map(|(k, v)| (k.to_string(), v))
            .collect();

        let sums = scale_raw_sums(&answers, &catalog()).unwrap();
        assert_eq!(sums[0].0, "drive");
        assert_eq!(sums[1].0, "calm");
    }

    #[test]
    fn test_scale_raw_sums_skips_unanswered() {
        let answers: AnswerLog = [("q3".to_string(), 2u8)].into_iter().collect();

        let sums = scale_raw_sums(&answers, &catalog()).unwrap();
        assert_eq!(sums, vec![("calm".to_string(), 2.0)]);
    }

    #[test]
    fn test_scale_raw_sums_resolves_position_keys() {
        // Keyed by position in test order instead of question id
        let answers: AnswerLog = [("0".to_string(), 3u8), ("2".to_string(), 4)]
            .into_iter()
            .collect();

        let sums = scale_raw_sums(&answers, &catalog()).unwrap();
        assert_eq!(
            sums,
            vec![("drive".to_string(), 3.0), ("calm".to_string(), 4.0)]
        );
    }

    #[test]
    fn test_scale_raw_sums_drops_unknown_keys() {
        let answers: AnswerLog = [("ghost".to_string(), 3u8), ("q1".to_string(), 2)]
            .into_iter()
            .collect();

        let sums = scale_raw_sums(&answers, &catalog()).unwrap();
        assert_eq!(sums, vec![("drive".to_string(), 2.0)]);
    }

    #[test]
    fn test_scale_raw_sums_rejects_malformed_value() {
        let answers: AnswerLog =
            [("q1".to_string(), MAX_RAW_ANSWER + 1)].into_iter().collect();

        assert!(scale_raw_sums(&answers, &catalog()).is_err());
    }

    #[test]
    fn test_scale_raw_sums_empty_log_is_valid() {
        let sums = scale_raw_sums(&AnswerLog::new(), &catalog()).unwrap();
        assert!(sums.is_empty());
    }

    #[test]
    fn test_catalog_categories_deduplicates_in_order() {
        assert_eq!(
            catalog_categories(&catalog()),
            vec!["drive".to_string(), "calm".to_string()]
        );
    }

    #[test]
    fn test_competency_raw_sums_follow_definition_order() {
        let scale_t: HashMap<String, f64> =
            [("drive".to_string(), 60.0), ("calm".to_string(), 45.0)]
                .into_iter()
                .collect();
        let defs = vec![
            CompetencyDefinition::new("energy", ["drive", "calm"]),
            CompetencyDefinition::new("poise", ["calm"]),
        ];

        let sums = competency_raw_sums(&scale_t, &defs);
        assert_eq!(
            sums,
            vec![("energy".to_string(), 105.0), ("poise".to_string(), 45.0)]
        );
    }

    #[test]
    fn test_competency_raw_sums_missing_scale_contributes_zero() {
        let scale_t: HashMap<String, f64> = [("drive".to_string(), 60.0)].into_iter().collect();
        let defs = vec![CompetencyDefinition::new("energy", ["drive", "absent"])];

        let sums = competency_raw_sums(&scale_t, &defs);
        assert_eq!(sums, vec![("energy".to_string(), 60.0)]);
    }
}
