use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::{round2, CampaignStatus};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CandidateCampaign {
    pub campaign_id: u64,
    pub token_id: u64,
    pub title: String,
    pub artist: String,
    #[serde(default)]
    pub royalty_pct: u16,
    pub status: CampaignStatus,
    pub funding_ratio_pct: f64,
    pub estimated_roi: f64,
    pub risk_score: u8,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Suggestion {
    pub campaign_id: u64,
    pub token_id: u64,
    pub title: String,
    pub artist: String,
    pub royalty_pct: u16,
    pub estimated_roi: f64,
    pub risk_score: u8,
    pub reasoning: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SuggestionBatch {
    pub suggestions: Vec<Suggestion>,
    pub average_roi: f64,
    pub summary: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecommendConfig {
    pub risk_cutoff: u8,
    pub cap: usize,
}

impl Default for RecommendConfig {
    fn default() -> Self {
        Self {
            risk_cutoff: 70,
            cap: 5,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ReinvestmentRecommender {
    config: RecommendConfig,
}

impl ReinvestmentRecommender {
    pub fn new(config: RecommendConfig) -> Self {
        Self { config }
    }

    /// ROI is the primary key, risk the tie-break toward safety. An empty
    /// eligible set yields an empty batch with a zero average, not an error.
    pub fn recommend(&self, candidates: &[CandidateCampaign]) -> SuggestionBatch {
        let mut eligible: Vec<&CandidateCampaign> = candidates
            .iter()
            .filter(|candidate| {
                candidate.status == CampaignStatus::Active
                    && candidate.risk_score < self.config.risk_cutoff
            })
            .collect();

        eligible.sort_by(|a, b| {
            b.estimated_roi
                .partial_cmp(&a.estimated_roi)
                .unwrap_or(Ordering::Equal)
                .then_with(|| a.risk_score.cmp(&b.risk_score))
        });
        eligible.truncate(self.config.cap);

        let suggestions: Vec<Suggestion> = eligible
            .iter()
            .map(|candidate| Suggestion {
                campaign_id: candidate.campaign_id,
                token_id: candidate.token_id,
                title: candidate.title.clone(),
                artist: candidate.artist.clone(),
                royalty_pct: candidate.royalty_pct,
                estimated_roi: candidate.estimated_roi,
                risk_score: candidate.risk_score,
                reasoning: format!(
                    "High ROI potential ({:.1}%) with low risk score ({}/100). Currently {:.0}% funded.",
                    candidate.estimated_roi, candidate.risk_score, candidate.funding_ratio_pct
                ),
            })
            .collect();

        let average_roi = if suggestions.is_empty() {
            0.0
        } else {
            let total: f64 = suggestions.iter().map(|entry| entry.estimated_roi).sum();
            round2(total / suggestions.len() as f64)
        };

        let summary = format!(
            "Top {} performing campaigns based on ROI and risk",
            suggestions.len()
        );

        SuggestionBatch {
            suggestions,
            average_roi,
            summary,
        }
    }
}
