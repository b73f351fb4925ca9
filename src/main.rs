mod api;
mod server;
mod snapshots;

use clap::{Args, Parser, Subcommand};
use std::io::{self, Read};
use std::path::{Path, PathBuf};

use encore_analytics::config::EngineConfig;
use encore_analytics::funding::CandidateCampaign;
use encore_analytics::tier::{classify, leaderboard_score, CreatorTotals};
use encore_analytics::{
    analyze_entity, campaign_outlook, entity_id_from_slug, format_float, format_number,
    format_percent, recommend_reinvestments, CampaignSnapshot,
};

#[derive(Parser)]
#[command(name = "encore-analytics", about = "Creator economy analytics and scoring engine")]
struct Cli {
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    Analyze(AnalyzeArgs),
    Outlook(OutlookArgs),
    Suggest(SuggestArgs),
    Tier(TierArgs),
    Serve(ServeArgs),
    InitConfig(InitConfigArgs),
}

#[derive(Args, Debug, Clone)]
struct AnalyzeArgs {
    #[arg(long, conflicts_with = "slug")]
    id: Option<u64>,
    #[arg(long)]
    slug: Option<String>,
    #[arg(long, default_value_t = 30.0)]
    age_days: f64,
    #[arg(long, default_value_t = 100)]
    population: u64,
    #[arg(long)]
    details: bool,
}

#[derive(Args, Debug, Clone)]
struct OutlookArgs {
    #[arg(long, default_value_t = 0.0)]
    funding_pct: f64,
    #[arg(long, default_value_t = 0)]
    contributors: u32,
    #[arg(long, default_value_t = 0)]
    reputation: u32,
    #[arg(long, default_value_t = 0.0)]
    age_days: f64,
}

#[derive(Args, Debug, Clone)]
struct SuggestArgs {
    #[arg(long)]
    input: Option<PathBuf>,
    #[arg(long)]
    cap: Option<usize>,
}

#[derive(Args, Debug, Clone)]
struct TierArgs {
    #[arg(long, default_value_t = 0)]
    works: u64,
    #[arg(long, default_value_t = 0.0)]
    earnings: f64,
    #[arg(long, default_value_t = 0)]
    campaigns: u64,
}

#[derive(Args, Debug, Clone)]
pub struct ServeArgs {
    #[arg(long, default_value = "127.0.0.1")]
    host: String,
    #[arg(long, default_value_t = 8788)]
    port: u16,
    #[arg(long, default_value = "data/snapshots.json")]
    snapshots: String,
}

#[derive(Args, Debug, Clone)]
struct InitConfigArgs {
    #[arg(long, default_value = "config/engine.toml")]
    path: PathBuf,
}

#[tokio::main]
async fn main() {
    load_dotenv();
    if let Err(err) = run().await {
        eprintln!("Error: {}", err);
        std::process::exit(1);
    }
}

async fn run() -> Result<(), String> {
    let cli = Cli::parse();

    match cli.command {
        Command::Analyze(args) => run_analyze(args, cli.config),
        Command::Outlook(args) => run_outlook(args, cli.config),
        Command::Suggest(args) => run_suggest(args, cli.config),
        Command::Tier(args) => run_tier(args),
        Command::Serve(args) => server::serve(args, cli.config).await,
        Command::InitConfig(args) => run_init_config(args),
    }
}

fn run_analyze(args: AnalyzeArgs, config_path: Option<PathBuf>) -> Result<(), String> {
    let (config, _) = EngineConfig::load(config_path)?;

    let entity_id = match (args.id, args.slug.as_deref()) {
        (Some(id), _) => id,
        (None, Some(slug)) if !slug.trim().is_empty() => entity_id_from_slug(slug.trim()),
        _ => return Err("missing entity: pass --id or --slug".to_string()),
    };
    let age_days = validate_age(args.age_days)?;

    let report = analyze_entity(entity_id, age_days, args.population, &config);

    let trending = if report.is_trending {
        format!("trending rank #{}", report.trending_rank)
    } else {
        "not trending".to_string()
    };
    println!(
        "Viral score: {} ({})",
        format_float(report.viral_score, 1),
        trending
    );
    println!("Estimated reach: {}", format_number(report.estimated_reach as f64));
    println!(
        "Streaming: {} plays | {} listeners | {} growth",
        format_number(report.metrics.streaming.plays as f64),
        format_number(report.metrics.streaming.listeners as f64),
        format_percent(report.metrics.streaming.growth_pct)
    );
    println!(
        "Clips: {} views | {} uses | {} growth",
        format_number(report.metrics.clips.views as f64),
        format_number(report.metrics.clips.uses as f64),
        format_percent(report.metrics.clips.growth_pct)
    );
    println!(
        "Radio: {} plays | {} listeners | {} growth",
        format_number(report.metrics.radio.plays as f64),
        format_number(report.metrics.radio.listeners as f64),
        format_percent(report.metrics.radio.growth_pct)
    );
    println!(
        "Weekly listener growth: {}",
        format_percent(report.weekly_listener_growth_pct)
    );

    if !report.trending_channels.is_empty() {
        let momentum = if report.momentum { " (momentum)" } else { "" };
        println!(
            "Trending channels: {}{}",
            report.trending_channels.join(", "),
            momentum
        );
    }

    if args.details {
        println!(
            "View-to-play ratio: {}",
            format_float(report.view_to_play_ratio, 2)
        );
        println!("\nListener trend (last 7 days):");
        for listeners in report.listener_trend.iter().rev().take(7).rev() {
            println!("  {}", format_number(*listeners as f64));
        }
    }

    Ok(())
}

fn run_outlook(args: OutlookArgs, config_path: Option<PathBuf>) -> Result<(), String> {
    let (config, _) = EngineConfig::load(config_path)?;
    let age_days = validate_age(args.age_days)?;

    let snapshot = CampaignSnapshot {
        funding_ratio_pct: args.funding_pct,
        contributor_count: args.contributors,
        creator_reputation: args.reputation,
        age_days,
    };
    let outlook = campaign_outlook(&snapshot, &config);

    println!("Risk score: {}/100", outlook.risk_score);
    println!("Estimated ROI: {}", format_percent(outlook.estimated_roi));

    Ok(())
}

fn run_suggest(args: SuggestArgs, config_path: Option<PathBuf>) -> Result<(), String> {
    let (mut config, _) = EngineConfig::load(config_path)?;
    if let Some(cap) = args.cap {
        config.recommend.cap = cap;
    }

    let candidates = read_candidates(args.input)?;
    let batch = recommend_reinvestments(&candidates, &config);

    if batch.suggestions.is_empty() {
        println!("No eligible campaigns.");
        return Ok(());
    }

    for (index, suggestion) in batch.suggestions.iter().enumerate() {
        println!(
            "{}. {} - {} (campaign {}): ROI {} | risk {}/100",
            index + 1,
            suggestion.title,
            suggestion.artist,
            suggestion.campaign_id,
            format_percent(suggestion.estimated_roi),
            suggestion.risk_score
        );
        println!("   {}", suggestion.reasoning);
    }
    println!("Average expected ROI: {}", format_percent(batch.average_roi));
    println!("{}", batch.summary);

    Ok(())
}

fn run_tier(args: TierArgs) -> Result<(), String> {
    let totals = CreatorTotals {
        total_works: args.works,
        total_earnings: args.earnings,
        total_campaigns: args.campaigns,
    };

    let tier = classify(totals.total_works, totals.total_earnings);
    println!("Tier: {}", tier.label());
    println!(
        "Leaderboard score: {}",
        format_number(leaderboard_score(&totals))
    );

    Ok(())
}

fn run_init_config(args: InitConfigArgs) -> Result<(), String> {
    let config = EngineConfig::default();
    config.write(&args.path)?;
    println!("Wrote default engine config to {}", args.path.display());
    Ok(())
}

fn read_candidates(arg: Option<PathBuf>) -> Result<Vec<CandidateCampaign>, String> {
    let payload = if let Some(path) = arg {
        std::fs::read_to_string(&path)
            .map_err(|err| format!("failed to read {}: {}", path.display(), err))?
    } else {
        let mut buffer = String::new();
        io::stdin()
            .read_to_string(&mut buffer)
            .map_err(|err| format!("failed reading stdin: {}", err))?;
        buffer
    };

    let trimmed = payload.trim();
    if trimmed.is_empty() {
        return Err("missing candidates: pass --input or pipe JSON".to_string());
    }

    serde_json::from_str(trimmed).map_err(|err| format!("failed to parse candidates: {}", err))
}

fn validate_age(value: f64) -> Result<f64, String> {
    if !value.is_finite() {
        return Err(format!("invalid age (must be finite): {}", value));
    }
    Ok(value)
}

fn load_dotenv() {
    let _ = dotenvy::dotenv();
    let manifest_dir = env!("CARGO_MANIFEST_DIR");
    let manifest_path = Path::new(manifest_dir).join(".env");
    let _ = dotenvy::from_path(manifest_path);
}
