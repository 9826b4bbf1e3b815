//! Per-respondent score computation

use std::collections::{BTreeMap, HashMap};

use crate::config::ScoringConfig;
use crate::core::errors::{Error, Result};
use crate::core::types::{
    AnswerLog, CompetencyDefinition, DetailedScores, LevelScore, Norm, Question,
};

use super::aggregation::{competency_raw_sums, scale_raw_sums};
use super::calculation::t_score;
use super::lookup::{resolve_total, NormTable, COMP_PREFIX, SCALE_PREFIX};

/// Scores respondents against a prepared catalog and norm set
///
/// Construction indexes the norm rows once; `score` is then a pure
/// function of the answer log with no side effects beyond warning
/// logs, safe to call from parallel batch jobs.
pub struct ScoreCalculator<'a> {
    questions: &'a [Question],
    competencies: &'a [CompetencyDefinition],
    scale_norms: NormTable,
    competency_norms: NormTable,
    config: ScoringConfig,
}

impl<'a> ScoreCalculator<'a> {
    /// Build a calculator with the default scoring configuration
    pub fn new(
        questions: &'a [Question],
        competencies: &'a [CompetencyDefinition],
        scale_norms: &[Norm],
        competency_norms: &[Norm],
    ) -> Result<Self> {
        Self::with_config(
            questions,
            competencies,
            scale_norms,
            competency_norms,
            ScoringConfig::default(),
        )
    }

    /// Build a calculator with explicit clamp bounds
    pub fn with_config(
        questions: &'a [Question],
        competencies: &'a [CompetencyDefinition],
        scale_norms: &[Norm],
        competency_norms: &[Norm],
        config: ScoringConfig,
    ) -> Result<Self> {
        if questions.is_empty() {
            return Err(Error::EmptyCatalog);
        }
        config.validate().map_err(Error::Configuration)?;
        Ok(Self {
            questions,
            competencies,
            scale_norms: NormTable::from_rows(scale_norms),
            competency_norms: NormTable::from_rows(competency_norms),
            config,
        })
    }

    /// Compute the full scale → competency → total score tree
    ///
    /// Scale raw sums normalize against `Scale_` rows; competency raw
    /// scores are sums of already-normalized scale T-scores, normalized
    /// in turn against `Comp_` rows; the total raw score is the sum of
    /// competency T-scores, normalized against the `TOTAL` row.
    pub fn score(&self, answers: &AnswerLog) -> Result<DetailedScores> {
        let bounds = self.config.bounds();

        let scale_raws = scale_raw_sums(answers, self.questions)?;
        let mut scale_t: HashMap<String, f64> = HashMap::with_capacity(scale_raws.len());
        let mut scales = BTreeMap::new();
        for (category, raw) in scale_raws {
            let params = self.scale_norms.resolve(SCALE_PREFIX, &category);
            let t = t_score(raw, params.mean, params.std_dev, bounds);
            scale_t.insert(category.clone(), t);
            scales.insert(category, LevelScore { raw, t_score: t });
        }

        let mut competencies = BTreeMap::new();
        let mut total_raw = 0.0;
        for (name, raw) in competency_raw_sums(&scale_t, self.competencies) {
            let params = self.competency_norms.resolve(COMP_PREFIX, &name);
            let t = t_score(raw, params.mean, params.std_dev, bounds);
            total_raw += t;
            competencies.insert(name, LevelScore { raw, t_score: t });
        }

        let params = resolve_total(&self.competency_norms, &self.scale_norms);
        let total = LevelScore {
            raw: total_raw,
            t_score: t_score(total_raw, params.mean, params.std_dev, bounds),
        };

        Ok(DetailedScores {
            scales,
            competencies,
            total,
        })
    }
}

/// One-shot convenience wrapper over [`ScoreCalculator`]
pub fn compute_scores(
    answers: &AnswerLog,
    questions: &[Question],
    scale_norms: &[Norm],
    competency_norms: &[Norm],
    competencies: &[CompetencyDefinition],
) -> Result<DetailedScores> {
    ScoreCalculator::new(questions, competencies, scale_norms, competency_norms)?.score(answers)
}
