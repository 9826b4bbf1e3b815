//! Parallel batch recalculation over many respondents

use im::Vector;
use indicatif::{ParallelProgressIterator, ProgressBar, ProgressIterator};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::config::ScoringConfig;
use crate::core::errors::Result;
use crate::core::types::{AnswerLog, CompetencyDefinition, DetailedScores, NormSet, Question};
use crate::scoring::ScoreCalculator;

/// Outcome of scoring one respondent in a batch, in input order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum BatchOutcome {
    Scored { scores: DetailedScores },
    Skipped { reason: String },
}

impl BatchOutcome {
    pub fn is_scored(&self) -> bool {
        matches!(self, BatchOutcome::Scored { .. })
    }
}

/// Score a corpus of answer logs against one prepared norm set
///
/// Respondents are independent and the map shares only read-only
/// inputs, so the batch parallelizes per respondent. A respondent
/// whose log fails validation is skipped with the reason recorded,
/// never aborting the batch; structural problems (empty catalog,
/// invalid config) still fail up front.
pub fn score_batch(
    logs: &[AnswerLog],
    questions: &[Question],
    competencies: &[CompetencyDefinition],
    norm_set: &NormSet,
    config: ScoringConfig,
    parallel: bool,
) -> Result<Vector<BatchOutcome>> {
    let competency_rows = norm_set.competency_rows_with_total();
    let calculator = ScoreCalculator::with_config(
        questions,
        competencies,
        &norm_set.scale_norms,
        &competency_rows,
        config,
    )?;
    let progress = ProgressBar::new(logs.len() as u64);

    let outcomes: Vec<BatchOutcome> = if parallel {
        logs.par_iter()
            .progress_with(progress)
            .map(|answers| score_one(&calculator, answers))
            .collect()
    } else {
        logs.iter()
            .progress_with(progress)
            .map(|answers| score_one(&calculator, answers))
            .collect()
    };

    Ok(Vector::from(outcomes))
}

fn score_one(calculator: &ScoreCalculator<'_>, answers: &AnswerLog) -> BatchOutcome {
    match calculator.score(answers) {
        Ok(scores) => BatchOutcome::Scored { scores },
        Err(e) => {
            log::warn!("skipping respondent: {}", e);
            BatchOutcome::Skipped {
                reason: e.to_string(),
            }
        }
    }
}
