//! `stockroom-dashboard`
//!
//! **Responsibility:** the console front end.
//!
//! This crate provides:
//! - Routes and the sidebar
//! - The dashboard and profile pages
//! - The timer-driven notification feed
//! - Text rendering of every page
//! - The `App` that owns all page state and executes console commands

pub mod app;
pub mod command;
pub mod config;
pub mod notifications;
pub mod overview;
pub mod profile;
pub mod render;
pub mod routes;

pub use app::{App, Outcome};
pub use command::Command;
pub use config::{Args, ConfigError, DashboardConfig};
pub use notifications::{Notification, NotificationFeed, NotificationTicker, TickerHandle};
pub use overview::{Chart, ChartKind, DashboardView, KpiCard};
pub use profile::UserProfile;
pub use routes::{MenuItem, Route, sidebar};
