pub mod config;
pub mod funding;
pub mod metrics;
pub mod tier;

use serde::{Deserialize, Serialize};

use crate::config::EngineConfig;
use crate::funding::{
    CampaignRiskState, CandidateCampaign, ReinvestmentRecommender, RiskScoreCalculator,
    RoiEstimator, SuggestionBatch,
};
use crate::metrics::{
    listener_trend, view_to_play_ratio, weekly_growth, MetricGenerator, RawMetrics,
    ReachEstimator, TrendingRankAssigner, ViralScoreCalculator,
};

pub const LISTENER_TREND_DAYS: usize = 30;
const WEEKLY_LOOKBACK_DAYS: usize = 7;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CampaignStatus {
    Active,
    Successful,
    Failed,
    Cancelled,
}

impl CampaignStatus {
    pub fn from_str(value: &str) -> Option<Self> {
        match value.to_lowercase().as_str() {
            "active" | "open" => Some(CampaignStatus::Active),
            "successful" | "funded" => Some(CampaignStatus::Successful),
            "failed" => Some(CampaignStatus::Failed),
            "cancelled" | "canceled" => Some(CampaignStatus::Cancelled),
            _ => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            CampaignStatus::Active => "active",
            CampaignStatus::Successful => "successful",
            CampaignStatus::Failed => "failed",
            CampaignStatus::Cancelled => "cancelled",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngagementReport {
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

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct CampaignSnapshot {
    pub funding_ratio_pct: f64,
    pub contributor_count: u32,
    pub creator_reputation: u32,
    pub age_days: f64,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct CampaignOutlook {
    pub risk_score: u8,
    pub estimated_roi: f64,
}

/// Full engagement report for one entity. Pure function of
/// (id, age, population, config); safe to recompute or cache at will.
pub fn analyze_entity(
    entity_id: u64,
    age_days: f64,
    population: u64,
    config: &EngineConfig,
) -> EngagementReport {
    let generator = MetricGenerator::new(config.generator.clone());
    let viral = ViralScoreCalculator::new(config.viral.clone());
    let reach = ReachEstimator::new(config.reach.clone());
    let trending = TrendingRankAssigner::new(config.trending.clone());

    let metrics = generator.generate(entity_id, age_days);
    let viral_score = viral.score(&metrics, age_days);
    let estimated_reach = reach.estimate(&metrics);
    let trending_rank = trending.rank(viral_score, population);
    let indicators = trending.indicators(&metrics);

    let trend = listener_trend(metrics.streaming.listeners, LISTENER_TREND_DAYS);
    let weekly_listener_growth_pct = weekly_from_trend(&trend);

    EngagementReport {
        entity_id,
        age_days,
        viral_score,
        estimated_reach,
        trending_rank,
        is_trending: trending_rank > 0,
        trending_channels: indicators.channels,
        momentum: indicators.momentum,
        view_to_play_ratio: view_to_play_ratio(&metrics),
        weekly_listener_growth_pct,
        listener_trend: trend,
        metrics,
    }
}

fn weekly_from_trend(trend: &[u64]) -> f64 {
    if trend.len() <= WEEKLY_LOOKBACK_DAYS {
        return 0.0;
    }
    let current = trend[trend.len() - 1] as f64;
    let previous = trend[trend.len() - 1 - WEEKLY_LOOKBACK_DAYS] as f64;
    weekly_growth(current, previous)
}

pub fn campaign_outlook(snapshot: &CampaignSnapshot, config: &EngineConfig) -> CampaignOutlook {
    let risk = RiskScoreCalculator::new(config.risk.clone());
    let roi = RoiEstimator::new(config.roi.clone());

    let risk_score = risk.risk(&CampaignRiskState {
        funding_ratio_pct: snapshot.funding_ratio_pct,
        contributor_count: snapshot.contributor_count,
        creator_reputation: snapshot.creator_reputation,
    });
    let estimated_roi = roi.estimate(snapshot.funding_ratio_pct, risk_score, snapshot.age_days);

    CampaignOutlook {
        risk_score,
        estimated_roi,
    }
}

pub fn recommend_reinvestments(
    candidates: &[CandidateCampaign],
    config: &EngineConfig,
) -> SuggestionBatch {
    ReinvestmentRecommender::new(config.recommend.clone()).recommend(candidates)
}

/// Stable 64-bit id for callers that key entities by an external string.
pub fn entity_id_from_slug(slug: &str) -> u64 {
    use sha2::{Digest, Sha256};

    let mut hasher = Sha256::new();
    hasher.update(slug.as_bytes());
    let digest = hasher.finalize();
    let mut bytes = [0u8; 8];
    bytes.copy_from_slice(&digest[..8]);
    u64::from_be_bytes(bytes)
}

pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

pub fn format_number(value: f64) -> String {
    let rounded = value.round().max(0.0) as i64;
    let mut chars: Vec<char> = rounded.to_string().chars().collect();
    let mut result = String::new();
    let mut count = 0usize;

    while let Some(ch) = chars.pop() {
        if count == 3 {
            result.push(',');
            count = 0;
        }
        result.push(ch);
        count += 1;
    }

    result.chars().rev().collect()
}

pub fn format_percent(value: f64) -> String {
    format!("{:.1}%", value)
}

pub fn format_float(value: f64, digits: usize) -> String {
    format!("{:.1$}", value, digits)
}
