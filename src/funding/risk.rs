use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct CampaignRiskState {
    pub funding_ratio_pct: f64,
    pub contributor_count: u32,
    pub creator_reputation: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RiskWeights {
    pub funding_weight: f64,
    pub contributor_weight: f64,
    pub reputation_weight: f64,
    pub contributor_scale: f64,
    pub reputation_scale: f64,
}

impl Default for RiskWeights {
    fn default() -> Self {
        Self {
            funding_weight: 0.4,
            contributor_weight: 0.3,
            reputation_weight: 0.3,
            contributor_scale: 2.0,
            reputation_scale: 10.0,
        }
    }
}

#[derive(Debug, Clone)]
pub struct RiskScoreCalculator {
    weights: RiskWeights,
}

impl RiskScoreCalculator {
    pub fn new(weights: RiskWeights) -> Self {
        Self { weights }
    }

    /// 0-100, lower is safer. The three reductions saturate independently:
    /// full funding, 50 contributors, and 10 prior works each max out their
    /// own term, so no single factor can zero the risk alone.
    pub fn risk(&self, state: &CampaignRiskState) -> u8 {
        let weights = &self.weights;
        let mut risk = 100.0;

        risk -= state.funding_ratio_pct.clamp(0.0, 100.0) * weights.funding_weight;

        let contributor_score =
            (state.contributor_count as f64 * weights.contributor_scale).min(100.0);
        risk -= contributor_score * weights.contributor_weight;

        let reputation_score =
            (state.creator_reputation as f64 * weights.reputation_scale).min(100.0);
        risk -= reputation_score * weights.reputation_weight;

        risk.clamp(0.0, 100.0) as u8
    }
}
