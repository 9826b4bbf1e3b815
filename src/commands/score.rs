use anyhow::{Context, Result};
use std::path::PathBuf;

use crate::batch::score_batch;
use crate::config;
use crate::io::{self, AnswerInput, OutputFormat};
use crate::scoring::ScoreCalculator;

pub struct ScoreConfig {
    pub catalog: PathBuf,
    pub norms: PathBuf,
    pub answers: PathBuf,
    pub output: Option<PathBuf>,
    pub format: OutputFormat,
    pub no_parallel: bool,
}

pub fn score(cfg: ScoreConfig) -> Result<()> {
    let catalog = io::read_catalog(&cfg.catalog)?;
    let norm_set = io::read_norms(&cfg.norms)?;
    let scoring_config = config::get_scoring_config();

    let mut writer = io::create_writer(cfg.output, cfg.format)?;

    match io::read_answers(&cfg.answers)? {
        AnswerInput::Single(answers) => {
            let competency_rows = norm_set.competency_rows_with_total();
            let calculator = ScoreCalculator::with_config(
                &catalog.questions,
                &catalog.competencies,
                &norm_set.scale_norms,
                &competency_rows,
                scoring_config,
            )?;
            let scores = calculator.score(&answers).context("scoring failed")?;
            writer.write_scores(&scores)?;
        }
        AnswerInput::Batch(logs) => {
            let outcomes = score_batch(
                &logs,
                &catalog.questions,
                &catalog.competencies,
                &norm_set,
                scoring_config,
                !cfg.no_parallel,
            )?;
            writer.write_batch(&outcomes)?;
        }
    }

    Ok(())
}
