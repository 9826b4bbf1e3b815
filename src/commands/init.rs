use crate::io;
use anyhow::Result;
use std::path::PathBuf;

pub fn init_config(force: bool) -> Result<()> {
    let config_path = PathBuf::from(".aptscore.toml");

    if config_path.exists() && !force {
        anyhow::bail!("Configuration file already exists. Use --force to overwrite.");
    }

    let default_config = r#"# Aptscore Configuration

[scoring]
# T-scores are clamped to this range after normalization. Deployments
# that expect the historical wide range can set 0.0 / 100.0 instead.
clamp_min = 20.0
clamp_max = 80.0
"#;

    io::write_file(&config_path, default_config)?;
    println!("Created .aptscore.toml configuration file");

    Ok(())
}
