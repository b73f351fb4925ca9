use serde::{Deserialize, Serialize};

use crate::metrics::RawMetrics;
use crate::round2;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ViralWeights {
    pub play_divisor: f64,
    pub play_cap: f64,
    pub view_divisor: f64,
    pub view_cap: f64,
    pub listener_divisor: f64,
    pub listener_cap: f64,
    pub longevity_divisor: f64,
    pub longevity_cap: f64,
}

impl Default for ViralWeights {
    fn default() -> Self {
        Self {
            play_divisor: 1_000.0,
            play_cap: 30.0,
            view_divisor: 2_000.0,
            view_cap: 30.0,
            listener_divisor: 500.0,
            listener_cap: 20.0,
            longevity_divisor: 30.0,
            longevity_cap: 20.0,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ViralScoreCalculator {
    weights: ViralWeights,
}

impl ViralScoreCalculator {
    pub fn new(weights: ViralWeights) -> Self {
        Self { weights }
    }

    /// Each sub-score saturates before summing, so neither a brand-new
    /// entity nor a very old high-traffic one can leave the 0-100 range.
    pub fn score(&self, metrics: &RawMetrics, age_days: f64) -> f64 {
        let age = age_days.max(1.0);
        let plays_per_day = metrics.streaming.plays as f64 / age;
        let views_per_day = metrics.clips.views as f64 / age;
        let listeners_per_day = metrics.streaming.listeners as f64 / age;

        let weights = &self.weights;
        let play_score = (plays_per_day / weights.play_divisor * weights.play_cap).min(weights.play_cap);
        let view_score = (views_per_day / weights.view_divisor * weights.view_cap).min(weights.view_cap);
        let listener_score =
            (listeners_per_day / weights.listener_divisor * weights.listener_cap).min(weights.listener_cap);
        let time_bonus =
            (age / weights.longevity_divisor * weights.longevity_cap).min(weights.longevity_cap);

        let total = play_score + view_score + listener_score + time_bonus;
        round2(total.min(100.0))
    }
}
