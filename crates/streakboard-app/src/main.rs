use clap::Parser;
use serde::Serialize;
use std::path::Path;
use std::process::ExitCode;
use tracing::{error, info};

use streakboard_infrastructure::logging::init_logger;
use streakboard_lib::application::services::{default_config_path, AppConfig, LeaderboardScheduler};
use streakboard_lib::presentation::bootstrap::build_app_state;
use streakboard_lib::presentation::cli::{Cli, Commands};
use streakboard_lib::presentation::commands;
use streakboard_lib::presentation::error::CommandError;
use streakboard_lib::presentation::state::AppState;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!(code = err.code, recoverable = err.recoverable, "{}", err.message);
            match serde_json::to_string_pretty(&err) {
                Ok(json) => eprintln!("{}", json),
                Err(_) => eprintln!("{}", err),
            }
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<(), CommandError> {
    let config_path = cli.config.unwrap_or_else(default_config_path);
    let config = AppConfig::load(Some(&config_path))?;

    init_logger(&config.log_dir, config.log_level.as_str())?;
    info!(
        config_path = %config_path.display(),
        database = %config.database_path.display(),
        batch_size = config.leaderboard_batch_size,
        "🚀 Streakboard starting"
    );

    let state = build_app_state(config).await?;
    dispatch(cli.command, &state, &config_path).await
}

async fn dispatch(command: Commands, state: &AppState, config_path: &Path) -> Result<(), CommandError> {
    match command {
        Commands::Recompute => print_json(&commands::recompute_leaderboard(state).await?),
        Commands::Streak { user } => print_json(&commands::refresh_streak(state, &user).await?),
        Commands::Record { user, date, count } => {
            print_json(&commands::record_activity(state, &user, date, count).await?)
        }
        Commands::Leaderboard {
            period,
            user: Some(user),
            ..
        } => print_json(&commands::find_standing(state, period, &user).await?),
        Commands::Leaderboard {
            period,
            limit,
            user: None,
        } => print_json(&commands::list_leaderboard(state, period, limit).await?),
        Commands::AddUser {
            user,
            timezone,
            historical,
        } => print_json(&commands::add_user(state, &user, &timezone, historical).await?),
        Commands::InitConfig => print_json(&commands::init_config(&state.runtime.config, config_path)?),
        Commands::Schedule => run_scheduler(state).await,
    }
}

async fn run_scheduler(state: &AppState) -> Result<(), CommandError> {
    let mut scheduler = LeaderboardScheduler::new(
        state.services.leaderboard_engine.clone(),
        &state.runtime.config.recompute_cron,
    )
    .await?;
    scheduler.start().await?;

    tokio::signal::ctrl_c()
        .await
        .map_err(|e| CommandError::infrastructure(format!("Failed to listen for Ctrl-C: {}", e)))?;

    info!("Ctrl-C received, stopping scheduler");
    scheduler.shutdown().await?;
    Ok(())
}

fn print_json<T: Serialize>(value: &T) -> Result<(), CommandError> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
