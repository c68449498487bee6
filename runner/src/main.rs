mod report;

use anyhow::{Context, Result};
use clap::Parser;
use common::{default_snake_colors, GameEngine, GameEvent, Speed};
use futures_util::future::join_all;
use tokio::sync::watch;
use tokio::time::{Duration, MissedTickBehavior};
use tracing::{debug, error, info, warn};

use report::{BatchSummary, DuelReport};

#[derive(Parser, Debug)]
#[command(
    name = "snakebattle-runner",
    about = "Run Snake Battle duels without a UI and report the results"
)]
struct Args {
    /// Number of duels to run concurrently
    #[arg(long, default_value_t = 10)]
    games: usize,

    /// Seed of the first duel; duel N uses seed + N. Random when omitted
    #[arg(long)]
    seed: Option<u64>,

    /// Tick speed, only relevant with --realtime
    #[arg(long, default_value = "normal")]
    speed: Speed,

    /// Stop a duel that is still running after this many ticks
    #[arg(long, default_value_t = 10_000)]
    max_ticks: u32,

    /// Pace ticks on the wall clock instead of running flat out
    #[arg(long)]
    realtime: bool,

    /// Print one JSON report per line instead of a table
    #[arg(long)]
    json: bool,
}

#[derive(Debug, Clone, Copy)]
struct DuelConfig {
    speed: Speed,
    max_ticks: u32,
    realtime: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let base_seed = args.seed.unwrap_or_else(rand::random);
    let config = DuelConfig {
        speed: args.speed,
        max_ticks: args.max_ticks,
        realtime: args.realtime,
    };

    info!(
        "Running {} duel(s) from seed {} ({}, max {} ticks)",
        args.games,
        base_seed,
        if config.realtime { config.speed.to_string() } else { "headless".to_string() },
        config.max_ticks
    );

    let (progress_tx, progress_rx) = watch::channel(0usize);
    let logger = tokio::spawn(log_progress(args.games, progress_rx));

    let mut handles = Vec::new();
    for game in 1..=args.games {
        let seed = base_seed.wrapping_add(game as u64);
        let progress_tx = progress_tx.clone();
        handles.push(tokio::spawn(async move {
            let result = run_duel(game, seed, config).await;
            progress_tx.send_modify(|done| *done += 1);
            result
        }));
    }
    drop(progress_tx);

    let results = tokio::select! {
        results = join_all(handles) => results,
        _ = tokio::signal::ctrl_c() => {
            warn!("Interrupted, abandoning unfinished duels");
            logger.abort();
            return Ok(());
        }
    };
    logger.abort();

    let mut reports = Vec::new();
    for result in results {
        match result.context("Duel task panicked")? {
            Ok(report) => reports.push(report),
            Err(err) => error!("Duel failed: {:#}", err),
        }
    }
    reports.sort_by_key(|report| report.game);

    for report in &reports {
        if args.json {
            println!("{}", serde_json::to_string(report)?);
        } else {
            println!("{}", report);
        }
    }

    let summary = BatchSummary::from_reports(&reports);
    if args.json {
        println!("{}", serde_json::to_string(&summary)?);
    } else {
        println!("{}", summary);
    }
    Ok(())
}

async fn run_duel(game: usize, seed: u64, config: DuelConfig) -> Result<DuelReport> {
    let mut engine = GameEngine::new_with_settings(seed, config.speed, default_snake_colors());
    engine.start_game()?;

    if config.realtime {
        let mut interval = tokio::time::interval(engine.tick_interval());
        interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
        // First tick of an interval fires immediately
        interval.tick().await;
        while engine.is_running() && engine.current_tick() < config.max_ticks {
            interval.tick().await;
            log_events(game, engine.tick()?);
        }
    } else {
        while engine.is_running() && engine.current_tick() < config.max_ticks {
            log_events(game, engine.tick()?);
            if engine.current_tick() % 1000 == 0 {
                // Let other duels on this worker make progress
                tokio::task::yield_now().await;
            }
        }
    }

    Ok(DuelReport::from_engine(game, seed, &engine))
}

fn log_events(game: usize, events: Vec<GameEvent>) {
    for event in events {
        match event {
            GameEvent::GameOver { cause } => debug!("Duel {} over: {}", game, cause),
            GameEvent::FoodEaten { snake_id, position } => {
                debug!("Duel {}: snake {} ate food at {:?}", game, snake_id, position)
            }
            _ => {}
        }
    }
}

async fn log_progress(total: usize, mut progress_rx: watch::Receiver<usize>) {
    let mut interval = tokio::time::interval(Duration::from_secs(5));
    let mut done = 0;
    loop {
        tokio::select! {
            _ = interval.tick() => {
                if done > 0 {
                    info!("{}/{} duel(s) finished", done, total);
                }
            }
            changed = progress_rx.changed() => {
                if changed.is_err() {
                    break;
                }
                done = *progress_rx.borrow();
            }
        }
    }
}
