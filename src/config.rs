use std::path::Path;

use anyhow::Context;
use serde::Deserialize;

use crate::classify::Thresholds;
use crate::curriculum::Curriculum;
use crate::report::LegendConfig;

/// Externally tunable surface: thresholds, legend styling, curriculum plans,
/// and the optional feedback portal link. Absent fields fall back to the
/// built-in defaults.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub thresholds: Thresholds,
    #[serde(default)]
    pub legend: LegendConfig,
    #[serde(default)]
    pub curriculum: Curriculum,
    #[serde(default)]
    pub portal_url: Option<String>,
}

impl AppConfig {
    pub fn load(path: Option<&Path>) -> anyhow::Result<Self> {
        let Some(path) = path else {
            return Ok(AppConfig::default());
        };

        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config {}", path.display()))?;
        let config = serde_json::from_str(&raw)
            .with_context(|| format!("invalid config {}", path.display()))?;
        Ok(config)
    }
}
