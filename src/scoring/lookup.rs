//! Norm row lookup and key-prefix conventions

use std::collections::HashMap;

use crate::core::types::Norm;

/// Key prefix for scale-level norm rows
pub const SCALE_PREFIX: &str = "Scale_";
/// Key prefix for competency-level norm rows
pub const COMP_PREFIX: &str = "Comp_";
/// Key of the single total-level norm row
pub const TOTAL_KEY: &str = "TOTAL";

/// Norm parameters consulted by the T-score formula
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NormParams {
    pub mean: f64,
    pub std_dev: f64,
}

impl NormParams {
    /// Fallback for a missing norm row: the formula still evaluates,
    /// yielding an uninformative 50 + 10 * raw before clamping.
    pub fn missing() -> Self {
        Self {
            mean: 0.0,
            std_dev: 1.0,
        }
    }
}

impl Default for NormParams {
    fn default() -> Self {
        Self::missing()
    }
}

/// Norm rows indexed by stored key
#[derive(Debug, Clone, Default)]
pub struct NormTable {
    entries: HashMap<String, NormParams>,
}

impl NormTable {
    pub fn from_rows(rows: &[Norm]) -> Self {
        let entries = rows
            .iter()
            .map(|row| {
                (
                    row.category_name.clone(),
                    NormParams {
                        mean: row.mean_value,
                        std_dev: row.std_dev_value,
                    },
                )
            })
            .collect();
        Self { entries }
    }

    pub fn get(&self, key: &str) -> Option<NormParams> {
        self.entries.get(key).copied()
    }

    /// Look up a level's norm row, preferring the prefixed key
    ///
    /// Unprefixed rows are accepted as a read-compatibility shim for
    /// legacy data; writes always use prefixed keys. A missing row
    /// degrades to mean 0 / std-dev 1 with a warning.
    pub fn resolve(&self, prefix: &str, name: &str) -> NormParams {
        if let Some(params) = self.entries.get(&format!("{}{}", prefix, name)) {
            return *params;
        }
        if let Some(params) = self.entries.get(name) {
            return *params;
        }
        log::warn!(
            "no norm row for {}{}; defaulting to mean 0, std-dev 1",
            prefix,
            name
        );
        NormParams::missing()
    }
}

/// Resolve the total-level norm row
///
/// Historical data stores the TOTAL row in either set; competency rows
/// take precedence.
pub fn resolve_total(competency_norms: &NormTable, scale_norms: &NormTable) -> NormParams {
    competency_norms
        .get(TOTAL_KEY)
        .or_else(|| scale_norms.get(TOTAL_KEY))
        .unwrap_or_else(|| {
            log::warn!("no TOTAL norm row; defaulting to mean 0, std-dev 1");
            NormParams::missing()
        })
}
