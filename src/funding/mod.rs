pub mod recommend;
pub mod risk;
pub mod roi;

pub use recommend::{
    CandidateCampaign, RecommendConfig, ReinvestmentRecommender, Suggestion, SuggestionBatch,
};
pub use risk::{CampaignRiskState, RiskScoreCalculator, RiskWeights};
pub use roi::{RoiConfig, RoiEstimator};
