//! Prop Analytics Board
//!
//! Fetches player prop projections, keeps a refreshed in-memory board, and
//! serves lineup building and payout estimation over a local HTTP API.

use clap::{Parser, Subcommand};
use propboard::{
    board::{filter_and_sort, ProjectionFilter, SortDirection, SortKey},
    client::ApiClient,
    config::Config,
    data::{ProjectionStore, Refresher},
    explain::{ChatModel, ExplanationModel},
    health::{HealthPoller, HealthState},
    lineup::LineupBuilder,
    monitor::{start_dashboard, BoardState, ErrorLog, ErrorReporter},
    payout::PayoutEstimator,
};
use rust_decimal::Decimal;
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "propboard")]
#[command(about = "Sports prop projection analytics and lineup service")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Config file path
    #[arg(short, long, default_value = "config.toml")]
    config: String,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the board service
    Run,
    /// Show current projections
    Props {
        /// Number of projections to show
        #[arg(short, long, default_value = "20")]
        limit: usize,
        /// Filter by sport
        #[arg(short, long)]
        sport: Option<String>,
        /// Filter by player name substring
        #[arg(long)]
        search: Option<String>,
        /// Sort key: confidence, line, player, team, stat, value, kelly
        #[arg(long, default_value = "confidence")]
        sort: String,
        /// Sort ascending instead of descending
        #[arg(long)]
        asc: bool,
    },
    /// Ask the AI backend to explain a projection
    Explain {
        /// Projection ID to explain
        projection_id: String,
    },
    /// Show backend model health
    Health,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    // Initialize logging
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    // Load configuration
    let config = Config::load(&cli.config)?;

    match cli.command {
        Commands::Run => run_board(config).await,
        Commands::Props {
            limit,
            sport,
            search,
            sort,
            asc,
        } => show_props(config, limit, sport, search, &sort, asc).await,
        Commands::Explain { projection_id } => explain_prop(config, &projection_id).await,
        Commands::Health => show_health(config).await,
    }
}

async fn run_board(config: Config) -> anyhow::Result<()> {
    tracing::info!("Starting prop board");

    let client = ApiClient::new(&config.api)?;
    let store = Arc::new(ProjectionStore::new());
    let error_log = Arc::new(ErrorLog::new(config.diagnostics.max_reports));
    let reporter = Arc::new(ErrorReporter::new(
        error_log.clone(),
        config.diagnostics.report_endpoint.clone(),
    ));
    let health_state = Arc::new(HealthState::new());

    // Health poller runs on its own interval, independent of the refresh
    let poller = HealthPoller::new(
        client.health.clone(),
        health_state.clone(),
        Duration::from_secs(config.board.health_interval_secs),
    );
    tokio::spawn(async move {
        poller.run().await;
    });

    // Board API
    if config.server.enabled {
        let estimator = PayoutEstimator::new(Duration::from_millis(
            config.payout.compute_delay_ms,
        ))
        .with_min_picks(config.lineup.min_picks);

        let state = Arc::new(BoardState::new(
            store.clone(),
            health_state,
            error_log,
            LineupBuilder::new(config.lineup.max_picks),
            estimator,
        ));

        let port = config.server.port;
        tokio::spawn(async move {
            if let Err(e) = start_dashboard(state, port).await {
                tracing::error!("Board API server error: {}", e);
            }
        });
    }

    tracing::info!(
        "Refreshing projections every {}s from {}",
        config.board.refresh_interval_secs,
        config.api.base_url
    );

    // The refresh loop owns the main task
    let refresher = Refresher::new(
        Arc::new(client.props.clone()),
        store,
        reporter,
        Duration::from_secs(config.board.refresh_interval_secs),
        config.board.fallback_enabled,
        config.board.fallback_count,
    );
    refresher.run().await;

    Ok(())
}

async fn show_props(
    config: Config,
    limit: usize,
    sport: Option<String>,
    search: Option<String>,
    sort: &str,
    asc: bool,
) -> anyhow::Result<()> {
    let client = ApiClient::new(&config.api)?;
    let projections = client.props.get_enhanced_props().await?;

    let filter = ProjectionFilter {
        sport,
        player_search: search,
        ..Default::default()
    };
    let direction = if asc {
        SortDirection::Asc
    } else {
        SortDirection::Desc
    };
    let out = filter_and_sort(&projections, &filter, parse_sort_key(sort)?, direction);

    println!("\n📊 {} projections (showing up to {}):\n", out.len(), limit);
    println!(
        "{:<24} {:<6} {:<18} {:>8} {:>6} {:>7}",
        "Player", "Team", "Stat", "Line", "Conf", "EV"
    );
    println!("{}", "-".repeat(75));

    for p in out.iter().take(limit) {
        println!(
            "{:<24} {:<6} {:<18} {:>8} {:>5}% {:>7}",
            truncate(&p.player_name, 24),
            p.team,
            truncate(&p.stat_type, 18),
            p.line,
            p.confidence,
            p.expected_value.unwrap_or(Decimal::ZERO),
        );
    }

    Ok(())
}

async fn explain_prop(config: Config, projection_id: &str) -> anyhow::Result<()> {
    let client = ApiClient::new(&config.api)?;
    let projections = client.props.get_enhanced_props().await?;
    let projection = projections
        .iter()
        .find(|p| p.id == projection_id)
        .ok_or_else(|| anyhow::anyhow!("Projection {} not found", projection_id))?;

    println!("\n🤖 Asking the model about {}...\n", projection.player_name);

    let http = reqwest::Client::builder()
        .timeout(Duration::from_secs(config.api.request_timeout_secs))
        .build()?;
    let model = ChatModel::new(http, config.api.base_url.clone());

    let explanation = model.explain(projection).await?;
    println!("{}\n", explanation.content);

    if let Some(confidence) = explanation.confidence {
        println!("Confidence: {}%", confidence);
    }
    if let Some(risk) = explanation.risk_level {
        println!("Risk level: {}", risk);
    }
    if !explanation.factors.is_empty() {
        println!("\nKey factors:");
        for (name, weight) in &explanation.factors {
            println!("  {:<24} {:.2}", name, weight);
        }
    }
    if !explanation.suggestions.is_empty() {
        println!("\nTry asking:");
        for suggestion in &explanation.suggestions {
            println!("  - {}", suggestion);
        }
    }

    Ok(())
}

async fn show_health(config: Config) -> anyhow::Result<()> {
    let client = ApiClient::new(&config.api)?;
    let health = client.health.get_model_health().await?;

    println!("\n💚 Backend model health\n");
    println!("Status: {}", health.status);
    println!("Models ready: {}", health.models_ready);
    println!("Model count: {}", health.model_count);
    if let Some(reported) = health.reported_at {
        println!("Reported at: {}", reported);
    }

    Ok(())
}

fn parse_sort_key(s: &str) -> anyhow::Result<SortKey> {
    Ok(match s {
        "confidence" => SortKey::Confidence,
        "line" => SortKey::Line,
        "player" => SortKey::PlayerName,
        "team" => SortKey::Team,
        "stat" => SortKey::StatType,
        "value" => SortKey::ExpectedValue,
        "kelly" => SortKey::KellyPct,
        other => anyhow::bail!("Unknown sort key: {}", other),
    })
}

fn truncate(s: &str, max: usize) -> String {
    if s.len() > max {
        format!("{}...", &s[..max.saturating_sub(3)])
    } else {
        s.to_string()
    }
}
