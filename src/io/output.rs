//! Score output rendering

use anyhow::Result;
use clap::ValueEnum;
use colored::*;
use im::Vector;
use std::io::Write;
use std::path::PathBuf;

use crate::batch::BatchOutcome;
use crate::core::types::{DetailedScores, LevelScore};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Json,
    Terminal,
}

/// Interpretation band for a normalized T-score
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScoreBand {
    Low,
    Mid,
    High,
}

/// Band a T-score falls into: one std-dev or more from the center is
/// notable in either direction
pub fn score_band(t_score: f64) -> ScoreBand {
    if t_score >= 60.0 {
        ScoreBand::High
    } else if t_score <= 40.0 {
        ScoreBand::Low
    } else {
        ScoreBand::Mid
    }
}

pub trait ScoreWriter {
    fn write_scores(&mut self, scores: &DetailedScores) -> Result<()>;
    fn write_batch(&mut self, outcomes: &Vector<BatchOutcome>) -> Result<()>;
}

pub struct JsonWriter<W: Write> {
    writer: W,
}

impl<W: Write> JsonWriter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }
}

impl<W: Write> ScoreWriter for JsonWriter<W> {
    fn write_scores(&mut self, scores: &DetailedScores) -> Result<()> {
        let json = serde_json::to_string_pretty(scores)?;
        writeln!(self.writer, "{}", json)?;
        Ok(())
    }

    fn write_batch(&mut self, outcomes: &Vector<BatchOutcome>) -> Result<()> {
        let items: Vec<&BatchOutcome> = outcomes.iter().collect();
        let json = serde_json::to_string_pretty(&items)?;
        writeln!(self.writer, "{}", json)?;
        Ok(())
    }
}

pub struct TerminalWriter<W: Write> {
    writer: W,
}

impl<W: Write> TerminalWriter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    fn write_level(&mut self, name: &str, score: &LevelScore) -> Result<()> {
        let t = format!("{:>6.1}", score.t_score);
        let t = match score_band(score.t_score) {
            ScoreBand::High => t.green(),
            ScoreBand::Low => t.red(),
            ScoreBand::Mid => t.normal(),
        };
        writeln!(self.writer, "  {:<24} raw {:>8.1}  T {}", name, score.raw, t)?;
        Ok(())
    }
}

impl<W: Write> ScoreWriter for TerminalWriter<W> {
    fn write_scores(&mut self, scores: &DetailedScores) -> Result<()> {
        writeln!(self.writer, "{}", "Scales".bold())?;
        for (name, score) in &scores.scales {
            self.write_level(name, score)?;
        }

        writeln!(self.writer, "{}", "Competencies".bold())?;
        for (name, score) in &scores.competencies {
            self.write_level(name, score)?;
        }

        writeln!(self.writer, "{}", "Total".bold())?;
        self.write_level("TOTAL", &scores.total)?;
        Ok(())
    }

    fn write_batch(&mut self, outcomes: &Vector<BatchOutcome>) -> Result<()> {
        let mut scored = 0usize;
        for (index, outcome) in outcomes.iter().enumerate() {
            match outcome {
                BatchOutcome::Scored { scores } => {
                    scored += 1;
                    writeln!(
                        self.writer,
                        "respondent {:>4}: total T {:>6.1}",
                        index, scores.total.t_score
                    )?;
                }
                BatchOutcome::Skipped { reason } => {
                    writeln!(
                        self.writer,
                        "respondent {:>4}: {} ({})",
                        index,
                        "skipped".yellow(),
                        reason
                    )?;
                }
            }
        }
        writeln!(
            self.writer,
            "{} of {} respondents scored",
            scored,
            outcomes.len()
        )?;
        Ok(())
    }
}

/// Writer for the requested format and destination (stdout by default)
pub fn create_writer(
    output: Option<PathBuf>,
    format: OutputFormat,
) -> Result<Box<dyn ScoreWriter>> {
    match output {
        Some(path) => {
            let file = std::fs::File::create(path)?;
            Ok(match format {
                OutputFormat::Json => Box::new(JsonWriter::new(file)),
                OutputFormat::Terminal => Box::new(TerminalWriter::new(file)),
            })
        }
        None => {
            let stdout = std::io::stdout();
            Ok(match format {
                OutputFormat::Json => Box::new(JsonWriter::new(stdout)),
                OutputFormat::Terminal => Box::new(TerminalWriter::new(stdout)),
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    fn sample_scores() -> DetailedScores {
        let mut scales = BTreeMap::new();
        scales.insert(
            "focus".to_string(),
            LevelScore {
                raw: 8.0,
                t_score: 60.0,
            },
        );
        DetailedScores {
            scales,
            competencies: BTreeMap::new(),
            total: LevelScore {
                raw: 60.0,
                t_score: 55.0,
            },
        }
    }

    #[test]
    fn test_score_band_thresholds() {
        assert_eq!(score_band(60.0), ScoreBand::High);
        assert_eq!(score_band(59.9), ScoreBand::Mid);
        assert_eq!(score_band(40.0), ScoreBand::Low);
        assert_eq!(score_band(40.1), ScoreBand::Mid);
    }

    #[test]
    fn test_json_writer_emits_score_tree() {
        let mut buffer = Vec::new();
        JsonWriter::new(&mut buffer)
            .write_scores(&sample_scores())
            .unwrap();

        let text = String::from_utf8(buffer).unwrap();
        assert!(text.contains("\"t_score\": 60.0"));
        assert!(text.contains("\"total\""));
    }

    #[test]
    fn test_terminal_writer_lists_all_levels() {
        let mut buffer = Vec::new();
        TerminalWriter::new(&mut buffer)
            .write_scores(&sample_scores())
            .unwrap();

        let text = String::from_utf8(buffer).unwrap();
        assert!(text.contains("focus"));
        assert!(text.contains("TOTAL"));
    }
}
