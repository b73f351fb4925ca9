use serde::{Deserialize, Serialize};

use crate::metrics::RawMetrics;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrendingConfig {
    pub threshold: f64,
    pub rank_step: f64,
    pub population_share: u64,
    pub streaming_growth_gate: f64,
    pub clips_growth_gate: f64,
    pub radio_growth_gate: f64,
}

impl Default for TrendingConfig {
    fn default() -> Self {
        Self {
            threshold: 60.0,
            rank_step: 5.0,
            // Only the top fifth of the population can hold a rank.
            population_share: 5,
            streaming_growth_gate: 300.0,
            clips_growth_gate: 500.0,
            radio_growth_gate: 200.0,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrendingIndicators {
    pub channels: Vec<String>,
    pub momentum: bool,
}

#[derive(Debug, Clone)]
pub struct TrendingRankAssigner {
    config: TrendingConfig,
}

impl TrendingRankAssigner {
    pub fn new(config: TrendingConfig) -> Self {
        Self { config }
    }

    /// 0 means not trending; otherwise 1 is best. A rank that would fall
    /// outside the population's top share collapses back to 0.
    pub fn rank(&self, viral_score: f64, population: u64) -> u32 {
        if viral_score < self.config.threshold {
            return 0;
        }

        let mut rank = ((100.0 - viral_score) / self.config.rank_step) as i64 + 1;
        if rank < 1 {
            rank = 1;
        }
        if rank as u64 > population / self.config.population_share.max(1) {
            return 0;
        }
        rank as u32
    }

    pub fn indicators(&self, metrics: &RawMetrics) -> TrendingIndicators {
        let mut channels = Vec::new();
        if metrics.streaming.growth_pct > self.config.streaming_growth_gate {
            channels.push("streaming".to_string());
        }
        if metrics.clips.growth_pct > self.config.clips_growth_gate {
            channels.push("clips".to_string());
        }
        if metrics.radio.growth_pct > self.config.radio_growth_gate {
            channels.push("radio".to_string());
        }

        let momentum = channels.len() >= 2;
        TrendingIndicators { channels, momentum }
    }
}
