use serde::{Deserialize, Serialize};

use encore_analytics::funding::{CandidateCampaign, Suggestion, SuggestionBatch};
use encore_analytics::metrics::RawMetrics;
use encore_analytics::tier::{classify, leaderboard_rank, leaderboard_score, CreatorTotals};
use encore_analytics::{entity_id_from_slug, CampaignOutlook, CampaignSnapshot, EngagementReport};

#[derive(Debug, Deserialize)]
pub struct ApiAnalyzeRequest {
    pub entity_id: Option<u64>,
    pub slug: Option<String>,
    pub age_days: Option<f64>,
    pub population: Option<u64>,
}

impl ApiAnalyzeRequest {
    pub fn resolve(&self) -> Result<(u64, f64, u64), String> {
        let entity_id = match (self.entity_id, self.slug.as_deref()) {
            (Some(id), _) => id,
            (None, Some(slug)) if !slug.trim().is_empty() => entity_id_from_slug(slug.trim()),
            _ => return Err("entity_id or slug is required".to_string()),
        };

        let age_days = self.age_days.ok_or_else(|| "age_days is required".to_string())?;
        if !age_days.is_finite() {
            return Err("age_days must be a finite number".to_string());
        }

        Ok((entity_id, age_days, self.population.unwrap_or(0)))
    }
}

#[derive(Debug, Serialize)]
pub struct ApiAnalyzeResponse {
    pub entity_id: u64,
    pub age_days: f64,
    pub metrics: RawMetrics,
    pub viral_score: f64,
    pub estimated_reach: u64,
    pub trending_rank: u32,
    pub is_trending: bool,
    pub trending_channels: Vec<String>,
    pub momentum: bool,
    pub view_to_play_ratio: f64,
    pub weekly_listener_growth_pct: f64,
    pub listener_trend: Vec<u64>,
}

impl ApiAnalyzeResponse {
    pub fn from_report(report: EngagementReport) -> Self {
        Self {
            entity_id: report.entity_id,
            age_days: report.age_days,
            metrics: report.metrics,
            viral_score: report.viral_score,
            estimated_reach: report.estimated_reach,
            trending_rank: report.trending_rank,
            is_trending: report.is_trending,
            trending_channels: report.trending_channels,
            momentum: report.momentum,
            view_to_play_ratio: report.view_to_play_ratio,
            weekly_listener_growth_pct: report.weekly_listener_growth_pct,
            listener_trend: report.listener_trend,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct ApiOutlookRequest {
    pub funding_ratio_pct: Option<f64>,
    pub contributor_count: Option<u32>,
    pub creator_reputation: Option<u32>,
    pub age_days: Option<f64>,
}

impl ApiOutlookRequest {
    pub fn into_snapshot(self) -> Result<CampaignSnapshot, String> {
        let funding_ratio_pct = self.funding_ratio_pct.unwrap_or(0.0);
        if !funding_ratio_pct.is_finite() {
            return Err("funding_ratio_pct must be a finite number".to_string());
        }
        let age_days = self.age_days.unwrap_or(0.0);
        if !age_days.is_finite() {
            return Err("age_days must be a finite number".to_string());
        }

        Ok(CampaignSnapshot {
            funding_ratio_pct,
            contributor_count: self.contributor_count.unwrap_or(0),
            creator_reputation: self.creator_reputation.unwrap_or(0),
            age_days,
        })
    }
}

#[derive(Debug, Serialize)]
pub struct ApiOutlookResponse {
    pub risk_score: u8,
    pub estimated_roi: f64,
}

impl ApiOutlookResponse {
    pub fn from_outlook(outlook: CampaignOutlook) -> Self {
        Self {
            risk_score: outlook.risk_score,
            estimated_roi: outlook.estimated_roi,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct ApiSuggestRequest {
    pub candidates: Vec<CandidateCampaign>,
    pub cap: Option<usize>,
}

#[derive(Debug, Serialize)]
pub struct ApiSuggestResponse {
    pub suggestions: Vec<Suggestion>,
    pub count: usize,
    pub average_roi: f64,
    pub summary: String,
}

impl ApiSuggestResponse {
    pub fn from_batch(batch: SuggestionBatch) -> Self {
        Self {
            count: batch.suggestions.len(),
            suggestions: batch.suggestions,
            average_roi: batch.average_roi,
            summary: batch.summary,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct ApiTierRequest {
    pub total_works: Option<u64>,
    pub total_earnings: Option<f64>,
    pub total_campaigns: Option<u64>,
    pub peer_scores: Option<Vec<f64>>,
}

#[derive(Debug, Serialize)]
pub struct ApiTierResponse {
    pub tier: String,
    pub leaderboard_score: f64,
    pub rank: Option<usize>,
}

impl ApiTierRequest {
    pub fn evaluate(self) -> ApiTierResponse {
        let totals = CreatorTotals {
            total_works: self.total_works.unwrap_or(0),
            total_earnings: self.total_earnings.unwrap_or(0.0),
            total_campaigns: self.total_campaigns.unwrap_or(0),
        };

        let tier = classify(totals.total_works, totals.total_earnings);
        let score = leaderboard_score(&totals);
        let rank = self
            .peer_scores
            .as_deref()
            .map(|peers| leaderboard_rank(score, peers));

        ApiTierResponse {
            tier: tier.label().to_string(),
            leaderboard_score: score,
            rank,
        }
    }
}
