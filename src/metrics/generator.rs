use rand::{rngs::StdRng, Rng, SeedableRng};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Span {
    pub min: f64,
    pub max: f64,
}

impl Span {
    pub fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneratorConfig {
    pub streaming_multiplier: Span,
    pub clips_multiplier: Span,
    pub radio_multiplier: Span,
    pub streaming_plays: Span,
    pub streaming_listener_ratio: f64,
    pub streaming_growth_pct: Span,
    pub clips_views: Span,
    pub clips_uses: Span,
    pub clips_growth_pct: Span,
    pub radio_plays: Span,
    pub radio_listener_ratio: f64,
    pub radio_growth_pct: Span,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            streaming_multiplier: Span::new(1.0, 3.0),
            clips_multiplier: Span::new(2.0, 5.0),
            radio_multiplier: Span::new(0.6, 1.6),
            streaming_plays: Span::new(5_000.0, 50_000.0),
            streaming_listener_ratio: 0.65,
            streaming_growth_pct: Span::new(100.0, 800.0),
            clips_views: Span::new(10_000.0, 200_000.0),
            clips_uses: Span::new(50.0, 500.0),
            clips_growth_pct: Span::new(150.0, 1_000.0),
            radio_plays: Span::new(3_000.0, 40_000.0),
            radio_listener_ratio: 0.70,
            radio_growth_pct: Span::new(50.0, 500.0),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StreamStats {
    pub plays: u64,
    pub listeners: u64,
    pub growth_pct: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ClipStats {
    pub views: u64,
    pub uses: u64,
    pub growth_pct: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RawMetrics {
    pub streaming: StreamStats,
    pub clips: ClipStats,
    pub radio: StreamStats,
}

#[derive(Debug, Clone)]
pub struct MetricGenerator {
    config: GeneratorConfig,
}

impl MetricGenerator {
    pub fn new(config: GeneratorConfig) -> Self {
        Self { config }
    }

    /// Engagement synthesis is keyed by the entity id alone; the draw order
    /// below is part of the contract, so the same id replays the same stream.
    pub fn generate(&self, entity_id: u64, age_days: f64) -> RawMetrics {
        let mut rng = StdRng::seed_from_u64(entity_id);
        let age = age_days.max(1.0);
        let growth_factor = 1.0 + (age / 7.0 + 1.0).log10();

        let config = &self.config;
        let streaming_mult = draw(&mut rng, config.streaming_multiplier);
        let clips_mult = draw(&mut rng, config.clips_multiplier);
        let radio_mult = draw(&mut rng, config.radio_multiplier);

        let streaming_plays =
            (draw(&mut rng, config.streaming_plays) * streaming_mult * growth_factor) as u64;
        let streaming = StreamStats {
            plays: streaming_plays,
            listeners: (streaming_plays as f64 * config.streaming_listener_ratio) as u64,
            growth_pct: draw(&mut rng, config.streaming_growth_pct),
        };

        // Clip uses track the channel multiplier only, not catalog age.
        let clips = ClipStats {
            views: (draw(&mut rng, config.clips_views) * clips_mult * growth_factor) as u64,
            uses: (draw(&mut rng, config.clips_uses) * clips_mult) as u64,
            growth_pct: draw(&mut rng, config.clips_growth_pct),
        };

        let radio_plays = (draw(&mut rng, config.radio_plays) * radio_mult * growth_factor) as u64;
        let radio = StreamStats {
            plays: radio_plays,
            listeners: (radio_plays as f64 * config.radio_listener_ratio) as u64,
            growth_pct: draw(&mut rng, config.radio_growth_pct),
        };

        RawMetrics {
            streaming,
            clips,
            radio,
        }
    }
}

fn draw(rng: &mut StdRng, span: Span) -> f64 {
    span.min + rng.gen::<f64>() * (span.max - span.min)
}
