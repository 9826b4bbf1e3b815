//! JSON file shapes for the CLI boundary

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::core::types::{AnswerLog, CompetencyDefinition, NormSet, Question};

/// Question catalog plus competency definitions for one test
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TestCatalog {
    pub questions: Vec<Question>,
    #[serde(default)]
    pub competencies: Vec<CompetencyDefinition>,
}

/// Answers file contents: one respondent or a whole batch
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum AnswerInput {
    Single(AnswerLog),
    Batch(Vec<AnswerLog>),
}

pub fn read_catalog(path: &Path) -> Result<TestCatalog> {
    read_json(path).with_context(|| format!("failed to read test catalog {}", path.display()))
}

pub fn read_norms(path: &Path) -> Result<NormSet> {
    read_json(path).with_context(|| format!("failed to read norm set {}", path.display()))
}

pub fn read_answers(path: &Path) -> Result<AnswerInput> {
    read_json(path).with_context(|| format!("failed to read answers {}", path.display()))
}

pub fn read_samples(path: &Path) -> Result<Vec<AnswerLog>> {
    read_json(path).with_context(|| format!("failed to read sample corpus {}", path.display()))
}

fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T> {
    let contents = super::read_file(path)?;
    Ok(serde_json::from_str(&contents)?)
}

pub fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value)?;
    super::write_file(path, &json)
}
