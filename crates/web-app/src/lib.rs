#![warn(clippy::pedantic)]
#![allow(clippy::too_many_lines)]

pub mod calculator;
pub mod log;
pub mod route;
pub mod service;
pub mod settings;
pub mod workout_list;

pub use route::Route;
pub use service::Service;
pub use settings::{Settings, SettingsRepository, SettingsService};
