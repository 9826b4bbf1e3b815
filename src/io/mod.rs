pub mod formats;
pub mod output;

// Re-export I/O helpers for convenient access
pub use formats::{
    read_answers, read_catalog, read_norms, read_samples, write_json, AnswerInput, TestCatalog,
};
pub use output::{create_writer, score_band, JsonWriter, OutputFormat, ScoreBand, ScoreWriter, TerminalWriter};

use anyhow::Result;
use std::fs;
use std::path::Path;

pub fn read_file(path: &Path) -> Result<String> {
    Ok(fs::read_to_string(path)?)
}

pub fn write_file(path: &Path, content: &str) -> Result<()> {
    fs::write(path, content)?;
    Ok(())
}
