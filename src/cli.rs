use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::io::OutputFormat;

#[derive(Parser, Debug)]
#[command(name = "aptscore")]
#[command(about = "Psychometric scoring engine: Likert answers to normed T-scores", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Compute detailed scores for one respondent or a batch
    Score {
        /// Question catalog and competency definitions (JSON)
        #[arg(long)]
        catalog: PathBuf,

        /// Calibrated norm set (JSON)
        #[arg(long)]
        norms: PathBuf,

        /// Answer log, or an array of answer logs for batch scoring (JSON)
        #[arg(long)]
        answers: PathBuf,

        /// Output file (defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Output format
        #[arg(short, long, value_enum, default_value = "terminal")]
        format: OutputFormat,

        /// Score batch respondents sequentially
        #[arg(long = "no-parallel")]
        no_parallel: bool,
    },

    /// Calibrate scale, competency, and total norms from a sample corpus
    Calibrate {
        /// Question catalog and competency definitions (JSON)
        #[arg(long)]
        catalog: PathBuf,

        /// Sample corpus: array of answer logs (JSON)
        #[arg(long)]
        samples: PathBuf,

        /// Where to write the calibrated norm set (JSON)
        #[arg(short, long)]
        output: PathBuf,
    },

    /// Create a default .aptscore.toml configuration file
    Init {
        /// Overwrite an existing configuration file
        #[arg(long)]
        force: bool,
    },
}
