#![warn(clippy::uninlined_format_args)]

pub mod engine;
pub mod settings;

pub use engine::GoodLpEngine;
pub use settings::{SettingsError, load_settings, load_settings_with};
