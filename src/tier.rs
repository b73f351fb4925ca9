use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Tier {
    Registered,
    Verified,
    Established,
    RisingStar,
    Legendary,
}

impl Tier {
    pub fn label(self) -> &'static str {
        match self {
            Tier::Registered => "Registered",
            Tier::Verified => "Verified",
            Tier::Established => "Established",
            Tier::RisingStar => "Rising Star",
            Tier::Legendary => "Legendary",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct CreatorTotals {
    pub total_works: u64,
    pub total_earnings: f64,
    pub total_campaigns: u64,
}

/// Ordered cascade, most senior tier first; either dimension alone can
/// promote a creator.
pub fn classify(total_works: u64, total_earnings: f64) -> Tier {
    if total_works >= 50 || total_earnings >= 100.0 {
        return Tier::Legendary;
    }
    if total_works >= 20 || total_earnings >= 50.0 {
        return Tier::RisingStar;
    }
    if total_works >= 10 || total_earnings >= 20.0 {
        return Tier::Established;
    }
    if total_works >= 5 || total_earnings >= 5.0 {
        return Tier::Verified;
    }
    Tier::Registered
}

pub fn leaderboard_score(totals: &CreatorTotals) -> f64 {
    totals.total_works as f64 * 100.0
        + totals.total_earnings * 10.0
        + totals.total_campaigns as f64 * 50.0
}

/// Rank is one plus the number of strictly higher peer scores; ties share
/// the better rank.
pub fn leaderboard_rank(score: f64, peer_scores: &[f64]) -> usize {
    1 + peer_scores.iter().filter(|peer| **peer > score).count()
}
