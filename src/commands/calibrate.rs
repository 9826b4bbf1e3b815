use anyhow::{Context, Result};
use std::path::PathBuf;

use crate::config;
use crate::io;
use crate::norms::build_norms_with_config;

pub struct CalibrateConfig {
    pub catalog: PathBuf,
    pub samples: PathBuf,
    pub output: PathBuf,
}

pub fn calibrate(cfg: CalibrateConfig) -> Result<()> {
    let catalog = io::read_catalog(&cfg.catalog)?;
    let samples = io::read_samples(&cfg.samples)?;

    let norm_set = build_norms_with_config(
        &samples,
        &catalog.questions,
        &catalog.competencies,
        config::get_scoring_config(),
    )
    .context("norm calibration failed")?;

    io::write_json(&cfg.output, &norm_set)?;
    println!(
        "Calibrated {} scale norms and {} competency norms from {} samples",
        norm_set.scale_norms.len(),
        norm_set.competency_norms.len(),
        samples.len()
    );

    Ok(())
}
