use serde::{Deserialize, Serialize};

use crate::metrics::RawMetrics;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReachConfig {
    pub overlap_retention: f64,
    pub clip_view_divisor: f64,
}

impl Default for ReachConfig {
    fn default() -> Self {
        Self {
            // 30% of the audience is assumed to overlap across channels.
            overlap_retention: 0.7,
            clip_view_divisor: 10.0,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ReachEstimator {
    config: ReachConfig,
}

impl ReachEstimator {
    pub fn new(config: ReachConfig) -> Self {
        Self { config }
    }

    pub fn estimate(&self, metrics: &RawMetrics) -> u64 {
        let total = metrics.streaming.listeners as f64
            + metrics.clips.views as f64 / self.config.clip_view_divisor
            + metrics.radio.listeners as f64;
        (total * self.config.overlap_retention).round() as u64
    }
}
