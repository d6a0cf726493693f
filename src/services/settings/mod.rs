// Settings service module
// Loads and stores grid tunables as TOML

mod service;

pub use service::{ConfigError, SettingsService};
