use serde::{Deserialize, Serialize};
use std::env;
use std::path::{Path, PathBuf};

use crate::funding::{RecommendConfig, RiskWeights, RoiConfig};
use crate::metrics::{GeneratorConfig, ReachConfig, TrendingConfig, ViralWeights};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineConfig {
    pub generator: GeneratorConfig,
    pub viral: ViralWeights,
    pub reach: ReachConfig,
    pub trending: TrendingConfig,
    pub risk: RiskWeights,
    pub roi: RoiConfig,
    pub recommend: RecommendConfig,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            generator: GeneratorConfig::default(),
            viral: ViralWeights::default(),
            reach: ReachConfig::default(),
            trending: TrendingConfig::default(),
            risk: RiskWeights::default(),
            roi: RoiConfig::default(),
            recommend: RecommendConfig::default(),
        }
    }
}

impl EngineConfig {
    pub fn load(path: Option<PathBuf>) -> Result<(Self, Option<PathBuf>), String> {
        let config_path = path.or_else(default_config_path);
        let mut config = if let Some(path) = config_path.as_ref() {
            if path.exists() {
                let contents = std::fs::read_to_string(path)
                    .map_err(|err| format!("failed to read config: {}", err))?;
                toml::from_str(&contents)
                    .map_err(|err| format!("failed to parse config: {}", err))?
            } else {
                EngineConfig::default()
            }
        } else {
            EngineConfig::default()
        };

        config.apply_env_overrides();
        Ok((config, config_path))
    }

    pub fn write(&self, path: &Path) -> Result<(), String> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|err| format!("failed to create config dir: {}", err))?;
        }
        let payload = toml::to_string_pretty(self)
            .map_err(|err| format!("failed to serialize config: {}", err))?;
        std::fs::write(path, payload)
            .map_err(|err| format!("failed to write config: {}", err))?;
        Ok(())
    }

    fn apply_env_overrides(&mut self) {
        if let Ok(threshold) = env::var("ENGINE_TRENDING_THRESHOLD") {
            if let Ok(value) = threshold.parse::<f64>() {
                self.trending.threshold = value;
            }
        }
        if let Ok(cap) = env::var("ENGINE_SUGGESTION_CAP") {
            if let Ok(value) = cap.parse::<usize>() {
                self.recommend.cap = value;
            }
        }
        if let Ok(cutoff) = env::var("ENGINE_MAX_RISK") {
            if let Ok(value) = cutoff.parse::<u8>() {
                self.recommend.risk_cutoff = value;
            }
        }
    }
}

fn default_config_path() -> Option<PathBuf> {
    env::var("ENGINE_CONFIG_PATH")
        .ok()
        .filter(|value| !value.trim().is_empty())
        .map(PathBuf::from)
        .or_else(|| Some(PathBuf::from("config/engine.toml")))
}
