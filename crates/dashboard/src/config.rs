//! Runtime configuration (CLI flags with environment fallbacks).

use std::time::Duration;

use clap::Parser;
use thiserror::Error;

use stockroom_observability::LogFormat;

use crate::routes::Route;

/// Command-line arguments for the `stockroom` console.
#[derive(Debug, Clone, Parser)]
#[command(name = "stockroom", version, about = "Inventory and sales dashboard console")]
pub struct Args {
    /// Seconds between simulated notifications.
    #[arg(long, env = "STOCKROOM_NOTIFY_INTERVAL_SECS", default_value_t = 10)]
    pub notify_interval_secs: u64,

    /// Log output format (json or compact). Logs go to stderr.
    #[arg(long, env = "STOCKROOM_LOG_FORMAT", default_value = "compact")]
    pub log_format: LogFormat,

    /// Page to open on start (path or name).
    #[arg(long, env = "STOCKROOM_START_ROUTE", default_value = "/")]
    pub start_route: String,

    /// Do not start the notification timer.
    #[arg(long)]
    pub no_notifications: bool,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("notification interval must be at least 1 second")]
    ZeroInterval,

    #[error("unknown start route {0:?}")]
    UnknownRoute(String),
}

/// Validated configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DashboardConfig {
    pub notify_interval: Duration,
    pub log_format: LogFormat,
    pub start_route: Route,
    pub notifications_enabled: bool,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            notify_interval: crate::notifications::DEFAULT_INTERVAL,
            log_format: LogFormat::default(),
            start_route: Route::default(),
            notifications_enabled: true,
        }
    }
}

impl TryFrom<Args> for DashboardConfig {
    type Error = ConfigError;

    fn try_from(args: Args) -> Result<Self, Self::Error> {
        if args.notify_interval_secs == 0 {
            return Err(ConfigError::ZeroInterval);
        }
        let start_route = args
            .start_route
            .parse()
            .map_err(|_| ConfigError::UnknownRoute(args.start_route.clone()))?;

        Ok(Self {
            notify_interval: Duration::from_secs(args.notify_interval_secs),
            log_format: args.log_format,
            start_route,
            notifications_enabled: !args.no_notifications,
        })
    }
}
