use crate::config::toml_config::ClientConfig;
use crate::core::time_grid::TimeSlot;
use crate::utils::error::{BookingError, Result};
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use std::path::Path;

pub const DEFAULT_CONFIG_FILE: &str = "booking.toml";

#[derive(Debug, Clone, Parser)]
#[command(name = "booking")]
#[command(about = "Browse activities, register schedules and manage reservations")]
pub struct CliConfig {
    #[arg(long, help = "Path to the TOML config file (default: ./booking.toml if present)")]
    pub config: Option<String>,

    #[arg(long, help = "Override api.base_url")]
    pub base_url: Option<String>,

    #[arg(long, help = "Override api.team_id")]
    pub team_id: Option<String>,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Emit logs as JSON")]
    pub json_logs: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Sign in and store the session
    Login {
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
    },
    /// Remove the stored session
    Logout,
    /// Show the signed-in user
    Whoami,
    /// List activities
    Activities {
        #[arg(long, default_value = "1")]
        page: u32,
        #[arg(long, default_value = "8")]
        size: u32,
        #[arg(long)]
        category: Option<String>,
        #[arg(long)]
        keyword: Option<String>,
        #[arg(long, help = "most_reviewed | price_asc | price_desc | latest")]
        sort: Option<String>,
    },
    /// List the activities you host
    MyActivities,
    /// Monthly reservation status for one of your activities
    Status {
        #[arg(long)]
        activity_id: Option<i64>,
        #[arg(long)]
        year: Option<i32>,
        #[arg(long)]
        month: Option<u32>,
    },
    /// List your reservations
    Reservations {
        #[arg(long, help = "pending | confirmed | declined | canceled | completed")]
        status: Option<String>,
        #[arg(long, help = "Write CSV to stdout")]
        csv: bool,
    },
    /// Cancel a pending reservation
    Cancel {
        reservation_id: i64,
        #[arg(long, help = "Confirm the cancellation")]
        yes: bool,
    },
    /// Review a completed reservation
    Review {
        reservation_id: i64,
        #[arg(long)]
        rating: u8,
        #[arg(long)]
        content: String,
    },
    /// List notifications, or delete one
    Notifications {
        #[arg(long)]
        delete: Option<i64>,
    },
    /// Register a new activity with its available schedules
    Register {
        #[arg(long)]
        title: String,
        #[arg(long)]
        category: String,
        #[arg(long, default_value = "")]
        description: String,
        #[arg(long)]
        address: String,
        #[arg(long)]
        price: i64,
        #[arg(long, default_value = "")]
        banner_image_url: String,
        #[arg(long = "schedule", help = "DATE,START,END e.g. 2024-05-01,10:00,12:00")]
        schedules: Vec<String>,
    },
}

impl CliConfig {
    /// 載入設定檔後以命令列參數覆寫
    pub fn resolve(&self) -> Result<ClientConfig> {
        let mut config = match &self.config {
            Some(path) => ClientConfig::from_file(path)?,
            None if Path::new(DEFAULT_CONFIG_FILE).exists() => {
                ClientConfig::from_file(DEFAULT_CONFIG_FILE)?
            }
            None => ClientConfig::default(),
        };

        if let Some(base_url) = &self.base_url {
            config.api.base_url = base_url.clone();
        }
        if let Some(team_id) = &self.team_id {
            config.api.team_id = team_id.clone();
        }
        if self.verbose {
            config.logging.verbose = Some(true);
        }
        if self.json_logs {
            config.logging.json = Some(true);
        }

        Ok(config)
    }
}

/// `--schedule DATE,START,END` 的內容
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScheduleArg {
    pub date: NaiveDate,
    pub start_time: TimeSlot,
    pub end_time: TimeSlot,
}

impl std::str::FromStr for ScheduleArg {
    type Err = BookingError;

    fn from_str(s: &str) -> Result<Self> {
        let parts: Vec<&str> = s.split(',').map(str::trim).collect();
        let [date, start, end] = parts.as_slice() else {
            return Err(BookingError::ValidationError {
                message: format!("Schedule '{}' must look like DATE,START,END", s),
            });
        };

        let date = NaiveDate::parse_from_str(date, "%Y-%m-%d").map_err(|e| {
            BookingError::ValidationError {
                message: format!("Invalid schedule date '{}': {}", date, e),
            }
        })?;

        Ok(Self {
            date,
            start_time: start.parse()?,
            end_time: end.parse()?,
        })
    }
}
