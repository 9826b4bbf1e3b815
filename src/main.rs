use anyhow::Result;
use aptscore::cli::{Cli, Commands};
use clap::Parser;

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Score {
            catalog,
            norms,
            answers,
            output,
            format,
            no_parallel,
        } => {
            let config = aptscore::commands::score::ScoreConfig {
                catalog,
                norms,
                answers,
                output,
                format,
                no_parallel,
            };
            aptscore::commands::score::score(config)
        }
        Commands::Calibrate {
            catalog,
            samples,
            output,
        } => {
            let config = aptscore::commands::calibrate::CalibrateConfig {
                catalog,
                samples,
                output,
            };
            aptscore::commands::calibrate::calibrate(config)
        }
        Commands::Init { force } => aptscore::commands::init::init_config(force),
    }
}
