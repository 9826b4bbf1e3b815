//! Three-pass hierarchical norm calibration

use std::collections::HashMap;

use crate::config::ScoringConfig;
use crate::core::errors::{Error, Result};
use crate::core::types::{AnswerLog, CompetencyDefinition, Norm, NormSet, Question};
use crate::scoring::aggregation::{catalog_categories, competency_raw_sums, scale_raw_sums};
use crate::scoring::calculation::t_score;
use crate::scoring::lookup::{NormTable, COMP_PREFIX, SCALE_PREFIX, TOTAL_KEY};

use super::stats::distribution;

/// Derive scale, competency, and total norms from a sample population,
/// with the default scoring configuration
pub fn build_norms(
    samples: &[AnswerLog],
    questions: &[Question],
    competencies: &[CompetencyDefinition],
) -> Result<NormSet> {
    build_norms_with_config(samples, questions, competencies, ScoringConfig::default())
}

/// Derive a complete norm set in three sequential passes
///
/// Each pass re-scores the whole sample with the norms of the pass
/// before it: a level's T-scores are defined against the distribution
/// of that level's raw scores, which is only knowable once the level
/// below has been normalized. The returned set replaces any prior one
/// wholesale; callers persist it delete-then-insert, never merged.
///
/// Calibration is strict: a malformed answer value anywhere in the
/// sample corpus is an error, since a silently shrunken sample would
/// shift every norm.
pub fn build_norms_with_config(
    samples: &[AnswerLog],
    questions: &[Question],
    competencies: &[CompetencyDefinition],
    config: ScoringConfig,
) -> Result<NormSet> {
    if questions.is_empty() {
        return Err(Error::EmptyCatalog);
    }
    if samples.is_empty() {
        return Err(Error::EmptySample);
    }
    config.validate().map_err(Error::Configuration)?;
    let bounds = config.bounds();

    // Pass 1: per-category raw sums across the sample. A respondent
    // without answers in a category contributes 0 to its distribution,
    // keeping the divisor at N for every category.
    let categories = catalog_categories(questions);
    let per_sample_sums: Vec<HashMap<String, f64>> = samples
        .iter()
        .map(|sample| scale_raw_sums(sample, questions).map(|sums| sums.into_iter().collect()))
        .collect::<Result<_>>()?;

    log::debug!(
        "norm pass 1: {} categories over {} samples",
        categories.len(),
        samples.len()
    );
    let scale_norms: Vec<Norm> = categories
        .iter()
        .map(|category| {
            let values: Vec<f64> = per_sample_sums
                .iter()
                .map(|sums| sums.get(category).copied().unwrap_or(0.0))
                .collect();
            let (mean, std_dev) = distribution(&values);
            Norm::new(format!("{}{}", SCALE_PREFIX, category), mean, std_dev)
        })
        .collect();

    // Pass 2: competency raw sums from scale T-scores under pass-1 norms
    let scale_table = NormTable::from_rows(&scale_norms);
    let per_sample_comp_raws: Vec<Vec<(String, f64)>> = per_sample_sums
        .iter()
        .map(|sums| {
            let scale_t: HashMap<String, f64> = sums
                .iter()
                .map(|(category, &raw)| {
                    let params = scale_table.resolve(SCALE_PREFIX, category);
                    (
                        category.clone(),
                        t_score(raw, params.mean, params.std_dev, bounds),
                    )
                })
                .collect();
            competency_raw_sums(&scale_t, competencies)
        })
        .collect();

    log::debug!("norm pass 2: {} competencies", competencies.len());
    let competency_norms: Vec<Norm> = competencies
        .iter()
        .enumerate()
        .map(|(index, def)| {
            let values: Vec<f64> = per_sample_comp_raws
                .iter()
                .map(|raws| raws[index].1)
                .collect();
            let (mean, std_dev) = distribution(&values);
            Norm::new(format!("{}{}", COMP_PREFIX, def.name), mean, std_dev)
        })
        .collect();

    // Pass 3: total raw = sum of competency T-scores under pass-2 norms
    let competency_table = NormTable::from_rows(&competency_norms);
    let totals: Vec<f64> = per_sample_comp_raws
        .iter()
        .map(|raws| {
            raws.iter()
                .map(|(name, raw)| {
                    let params = competency_table.resolve(COMP_PREFIX, name);
                    t_score(*raw, params.mean, params.std_dev, bounds)
                })
                .sum()
        })
        .collect();

    let (mean, std_dev) = distribution(&totals);
    log::debug!("norm pass 3: TOTAL mean {:.4}, std-dev {:.4}", mean, std_dev);

    Ok(NormSet {
        scale_norms,
        competency_norms,
        total_norm: Norm::new(TOTAL_KEY, mean, std_dev),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn single_scale_catalog() -> Vec<Question> {
        vec![
            Question::new("q1", "focus"),
            Question::new("q2", "focus").reverse_scored(),
        ]
    }

    fn log_of(values: [(&str, u8); 2]) -> AnswerLog {
        values
            .into_iter()
            .map(|(k, v)| (k.to_string(), v))
            .collect()
    }

    #[test]
    fn test_empty_sample_is_an_error() {
        let result = build_norms(&[], &single_scale_catalog(), &[]);
        assert!(matches!(result, Err(Error::EmptySample)));
    }

    #[test]
    fn test_empty_catalog_is_an_error() {
        let result = build_norms(&[AnswerLog::new()], &[], &[]);
        assert!(matches!(result, Err(Error::EmptyCatalog)));
    }

    #[test]
    fn test_malformed_sample_fails_calibration() {
        let samples = vec![log_of([("q1", 3), ("q2", 9)])];
        let result = build_norms(&samples, &single_scale_catalog(), &[]);
        assert!(matches!(result, Err(Error::MalformedAnswer { .. })));
    }

    #[test]
    fn test_norm_keys_are_prefixed() {
        let samples = vec![log_of([("q1", 5), ("q2", 1)]), log_of([("q1", 3), ("q2", 3)])];
        let defs = vec![CompetencyDefinition::new("grit", ["focus"])];

        let norms = build_norms(&samples, &single_scale_catalog(), &defs).unwrap();

        assert_eq!(norms.scale_norms[0].category_name, "Scale_focus");
        assert_eq!(norms.competency_norms[0].category_name, "Comp_grit");
        assert_eq!(norms.total_norm.category_name, "TOTAL");
    }

    #[test]
    fn test_three_passes_on_hand_computed_sample() {
        // Respondent 1: q1=5, q2=1 (reverse -> 5), focus raw 10
        // Respondent 2: q1=3, q2=3 (reverse -> 3), focus raw 6
        let samples = vec![log_of([("q1", 5), ("q2", 1)]), log_of([("q1", 3), ("q2", 3)])];
        let defs = vec![CompetencyDefinition::new("grit", ["focus"])];

        let norms = build_norms(&samples, &single_scale_catalog(), &defs).unwrap();

        // Scale: mean 8, population std-dev 2
        assert_eq!(norms.scale_norms[0].mean_value, 8.0);
        assert_eq!(norms.scale_norms[0].std_dev_value, 2.0);

        // Scale T-scores are 60 and 40, so grit raws are 60 and 40
        assert_eq!(norms.competency_norms[0].mean_value, 50.0);
        assert_eq!(norms.competency_norms[0].std_dev_value, 10.0);

        // Grit T-scores are 60 and 40, so totals are 60 and 40
        assert_eq!(norms.total_norm.mean_value, 50.0);
        assert_eq!(norms.total_norm.std_dev_value, 10.0);
    }
}
