use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use crate::scoring::calculation::T_SCORE_CENTER;

/// Scoring configuration
///
/// T-scores are clamped to `[clamp_min, clamp_max]` after
/// normalization. The default range is 20..=80; deployments that need
/// the historical unclamped-feeling behavior can widen it to 0..=100.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoringConfig {
    /// Lower clamp bound for computed T-scores
    #[serde(default = "default_clamp_min")]
    pub clamp_min: f64,

    /// Upper clamp bound for computed T-scores
    #[serde(default = "default_clamp_max")]
    pub clamp_max: f64,
}

fn default_clamp_min() -> f64 {
    20.0
}

fn default_clamp_max() -> f64 {
    80.0
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            clamp_min: default_clamp_min(),
            clamp_max: default_clamp_max(),
        }
    }
}

impl ScoringConfig {
    /// Clamp bounds as a `(min, max)` pair
    pub fn bounds(&self) -> (f64, f64) {
        (self.clamp_min, self.clamp_max)
    }

    /// Validate the clamp bounds
    ///
    /// The zero-std-dev guard pins a T-score to the center value, so
    /// the bounds must bracket it.
    pub fn validate(&self) -> Result<(), String> {
        if !self.clamp_min.is_finite() || !self.clamp_max.is_finite() {
            return Err("clamp bounds must be finite".to_string());
        }
        if self.clamp_min >= self.clamp_max {
            return Err(format!(
                "clamp_min {} must be below clamp_max {}",
                self.clamp_min, self.clamp_max
            ));
        }
        if self.clamp_min > T_SCORE_CENTER || self.clamp_max < T_SCORE_CENTER {
            return Err(format!(
                "clamp bounds [{}, {}] must contain the T-score center {}",
                self.clamp_min, self.clamp_max, T_SCORE_CENTER
            ));
        }
        Ok(())
    }
}

/// Top-level `.aptscore.toml` shape
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AptscoreConfig {
    pub scoring: Option<ScoringConfig>,
}

/// Parse and validate config from TOML contents
///
/// An invalid scoring section is replaced with defaults rather than
/// failing the whole load.
pub fn parse_config(contents: &str) -> Result<AptscoreConfig, String> {
    let mut config: AptscoreConfig = toml::from_str(contents)
        .map_err(|e| format!("failed to parse .aptscore.toml: {}", e))?;

    if let Some(scoring) = &config.scoring {
        if let Err(e) = scoring.validate() {
            log::warn!("invalid scoring config: {}. Using defaults.", e);
            config.scoring = Some(ScoringConfig::default());
        }
    }

    Ok(config)
}

fn try_load_config_from_path(config_path: &Path) -> Option<AptscoreConfig> {
    let contents = match fs::read_to_string(config_path) {
        Ok(contents) => contents,
        Err(e) => {
            if e.kind() != std::io::ErrorKind::NotFound {
                log::warn!(
                    "failed to read config file {}: {}",
                    config_path.display(),
                    e
                );
            }
            return None;
        }
    };

    match parse_config(&contents) {
        Ok(config) => {
            log::debug!("loaded config from {}", config_path.display());
            Some(config)
        }
        Err(e) => {
            log::warn!("{}. Using defaults.", e);
            None
        }
    }
}

fn directory_ancestors(start: PathBuf, max_depth: usize) -> impl Iterator<Item = PathBuf> {
    std::iter::successors(Some(start), |dir| {
        let mut parent = dir.clone();
        if parent.pop() {
            Some(parent)
        } else {
            None
        }
    })
    .take(max_depth)
}

/// Load configuration from the nearest `.aptscore.toml`, if any
pub fn load_config() -> AptscoreConfig {
    const MAX_TRAVERSAL_DEPTH: usize = 10;

    let current = match std::env::current_dir() {
        Ok(dir) => dir,
        Err(e) => {
            log::warn!("failed to get current directory: {}. Using defaults.", e);
            return AptscoreConfig::default();
        }
    };

    directory_ancestors(current, MAX_TRAVERSAL_DEPTH)
        .map(|dir| dir.join(".aptscore.toml"))
        .find_map(|path| try_load_config_from_path(&path))
        .unwrap_or_default()
}

/// Process-wide configuration, loaded once
pub fn get_config() -> &'static AptscoreConfig {
    static CONFIG: OnceLock<AptscoreConfig> = OnceLock::new();
    CONFIG.get_or_init(load_config)
}

/// Effective scoring configuration for this process
pub fn get_scoring_config() -> ScoringConfig {
    get_config().scoring.unwrap_or_default()
}
