// Config layer - environment-driven settings and logging setup
pub mod logging;
pub mod settings;

pub use settings::{Environment, Settings, SettingsError};
