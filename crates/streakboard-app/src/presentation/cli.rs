//! Command-line argument parsing.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use streakboard_domain::calendar::ActivityDate;
use streakboard_domain::leaderboard::Period;

/// Contribution streaks and leaderboards
#[derive(Debug, Parser)]
#[command(name = "streakboard")]
#[command(about = "Contribution streaks and daily/weekly/monthly/all-time leaderboards", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Path to config.json (defaults to the per-user config directory)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Recompute every leaderboard period once
    Recompute,

    /// Recalculate one user's streaks and rolling total
    Streak {
        #[arg(long)]
        user: String,
    },

    /// Record a day's contribution count, then refresh the user's streak
    Record {
        #[arg(long)]
        user: String,

        /// Calendar day, YYYY-MM-DD
        #[arg(long)]
        date: ActivityDate,

        #[arg(long)]
        count: u32,
    },

    /// Show a leaderboard period, or one user's standing in it
    Leaderboard {
        /// daily, weekly, monthly or all_time
        #[arg(long)]
        period: Period,

        #[arg(long, default_value_t = 10)]
        limit: usize,

        #[arg(long)]
        user: Option<String>,
    },

    /// Register a new user
    AddUser {
        #[arg(long)]
        user: String,

        /// IANA timezone name used for the user's "today"
        #[arg(long, default_value = "UTC")]
        timezone: String,

        /// Points carried over from before tracking began
        #[arg(long, default_value_t = 0)]
        historical: u64,
    },

    /// Write the effective config to the config path
    InitConfig,

    /// Recompute on the configured cron schedule until Ctrl-C
    Schedule,
}
