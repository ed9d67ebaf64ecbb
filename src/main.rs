//! Tourtrack - location tracking and attraction reward engine
//!
//! Tracks users' positions, awards one-time points for visits near
//! catalogued attractions, and answers ranked nearest-attraction queries.
//!
//! Module structure:
//! - `domain/` - Core business types (User, Position, Attraction, Reward)
//! - `io/` - External collaborators (GPS feed, reward central, pricing, users)
//! - `services/` - Business logic (RewardEngine, LocationTracker, NearbyRanker)
//! - `infra/` - Infrastructure (Config, Metrics)

use clap::Parser;
use std::sync::Arc;
use tokio::sync::watch;
use tourtrack::infra::{Config, Metrics};
use tourtrack::io::{
    InMemoryUserRepository, SimulatedGps, SimulatedRewardCentral, SimulatedTripPricer,
    UserRepository,
};
use tourtrack::services::{
    AttractionCatalog, LocationTracker, NearbyRanker, ProximityPolicy, RewardEngine,
};
use tracing::{error, info};
use tracing_subscriber::fmt::time::UtcTime;
use tracing_subscriber::EnvFilter;

/// Tourtrack - attraction proximity reward tracker
#[derive(Parser, Debug)]
#[command(name = "tourtrack", version, about)]
struct Args {
    /// Path to TOML configuration file
    #[arg(short, long, default_value = "config/dev.toml")]
    config: String,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize structured logging with configurable level via RUST_LOG env var
    // Default: INFO, use RUST_LOG=debug for per-cycle visibility
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_timer(UtcTime::rfc_3339())
        .with_target(false)
        .init();

    info!("tourtrack starting");

    let args = Args::parse();
    let config = Config::load_from_path(&args.config);

    info!(
        config_file = %config.config_file(),
        site_id = %config.site_id(),
        proximity_miles = %config.proximity_miles(),
        reward_workers = %config.reward_workers(),
        lookup_timeout_ms = %config.lookup_timeout_ms(),
        tracking_interval_secs = %config.tracking_interval_secs(),
        internal_users = %config.internal_user_count(),
        "config_loaded"
    );

    // Create shutdown signal
    let (shutdown_tx, mut shutdown_rx) = watch::channel(false);

    // External collaborators (simulated in this build)
    let gps = Arc::new(SimulatedGps::new());
    let reward_central = Arc::new(SimulatedRewardCentral::new());
    let pricer = Arc::new(SimulatedTripPricer::new());

    // Shared components
    let metrics = Arc::new(Metrics::new());
    let catalog = Arc::new(AttractionCatalog::new(gps.clone()));
    let policy = Arc::new(ProximityPolicy::new(&config));
    let engine = Arc::new(RewardEngine::new(
        &config,
        catalog.clone(),
        policy,
        reward_central.clone(),
        metrics.clone(),
    ));
    let tracker = Arc::new(LocationTracker::new(
        &config,
        gps,
        engine,
        pricer,
        metrics.clone(),
    ));
    let ranker = NearbyRanker::new(catalog, reward_central);

    // Seed the synthetic user population
    let users = InMemoryUserRepository::with_internal_users(config.internal_user_count());
    info!(users = %users.user_count(), "users_ready");

    // Start metrics reporter
    let metrics_clone = metrics.clone();
    let metrics_interval = config.metrics_interval_secs();
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(std::time::Duration::from_secs(metrics_interval));
        loop {
            interval.tick().await;
            metrics_clone.report().log();
        }
    });

    // Handle shutdown on Ctrl+C
    let shutdown_signal = shutdown_tx;
    tokio::spawn(async move {
        tokio::signal::ctrl_c().await.ok();
        info!("shutdown_signal_received");
        let _ = shutdown_signal.send(true);
    });

    // Periodic tracking sweeps until shutdown
    let mut sweep_interval =
        tokio::time::interval(std::time::Duration::from_secs(config.tracking_interval_secs()));
    loop {
        tokio::select! {
            _ = sweep_interval.tick() => {
                let all_users = users.all();
                let results = tracker.track_all(&all_users).await;

                // Showcase the query paths with the first successfully
                // tracked user of the sweep
                if let Some((user_id, Ok(position))) =
                    results.iter().find(|(_, r)| r.is_ok())
                {
                    match ranker.nearby(position).await {
                        Ok(ranked) => {
                            for entry in &ranked {
                                info!(
                                    user = %user_id,
                                    attraction = %entry.attraction_name,
                                    distance_miles = %format!("{:.1}", entry.distance_miles),
                                    reward_points = %entry.reward_points,
                                    "nearby_attraction"
                                );
                            }
                        }
                        Err(e) => error!(error = %e, "nearby_query_failed"),
                    }
                }
            }
            _ = shutdown_rx.changed() => {
                if *shutdown_rx.borrow() {
                    break;
                }
            }
        }
    }

    info!("tourtrack shutdown complete");
    Ok(())
}
