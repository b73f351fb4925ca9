use serde::{Deserialize, Serialize};

use crate::round2;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoiConfig {
    pub base: f64,
    pub funding_bonus_max: f64,
    pub risk_penalty: f64,
    pub maturity_divisor: f64,
    pub maturity_cap: f64,
    pub maturity_bonus: f64,
    pub floor: f64,
    pub ceiling: f64,
}

impl Default for RoiConfig {
    fn default() -> Self {
        Self {
            base: 150.0,
            funding_bonus_max: 50.0,
            risk_penalty: 0.5,
            maturity_divisor: 30.0,
            // Maturity stops paying out after 150 days.
            maturity_cap: 5.0,
            maturity_bonus: 10.0,
            floor: 80.0,
            ceiling: 300.0,
        }
    }
}

#[derive(Debug, Clone)]
pub struct RoiEstimator {
    config: RoiConfig,
}

impl RoiEstimator {
    pub fn new(config: RoiConfig) -> Self {
        Self { config }
    }

    /// Expected-return percentage. The funding ratio is clamped at 100 here
    /// so an over-funded campaign cannot inflate the bonus.
    pub fn estimate(&self, funding_ratio_pct: f64, risk_score: u8, age_days: f64) -> f64 {
        let config = &self.config;
        let funding_bonus =
            funding_ratio_pct.clamp(0.0, 100.0) / 100.0 * config.funding_bonus_max;
        let risk_penalty = risk_score as f64 * config.risk_penalty;
        let maturity_factor =
            (age_days.max(0.0) / config.maturity_divisor).min(config.maturity_cap) * config.maturity_bonus;

        let estimate = config.base + funding_bonus - risk_penalty + maturity_factor;
        round2(estimate.clamp(config.floor, config.ceiling))
    }
}
