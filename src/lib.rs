//! SkillStack: a terminal client for a personal skill tracker
//!
//! Skills and practice events live in a REST backend. This crate fetches
//! them, computes the 7-day activity widget (sparkline plus per-day heat
//! bars) and renders it as text, SVG or an interactive dashboard.

pub mod activity;
pub mod api;
pub mod config;
pub mod error;
pub mod interactive;
pub mod logging;
pub mod models;
pub mod render;
pub mod skills;
pub mod timeline;
pub mod utils;

pub use activity::{ActivitySummary, ActivityWidget, DayLabeler};
pub use api::ApiClient;
pub use config::Config;
pub use error::{Result, SkillStackError};
pub use models::Event;
