use slicewise_application::OptimizerSettings;
use std::{env, str::FromStr, time::Duration};
use thiserror::Error;

pub const MAX_TOPPINGS_PER_PIZZA_VAR: &str = "SLICEWISE_MAX_TOPPINGS_PER_PIZZA";
pub const DISLIKE_WEIGHT_VAR: &str = "SLICEWISE_DISLIKE_WEIGHT";
pub const TIME_LIMIT_SECONDS_VAR: &str = "SLICEWISE_TIME_LIMIT_SECONDS";
pub const THREADS_VAR: &str = "SLICEWISE_THREADS";
pub const SYMMETRY_BREAKING_VAR: &str = "SLICEWISE_SYMMETRY_BREAKING";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SettingsError {
    #[error("{key} is not a valid value: {value:?}")]
    Unparsable { key: &'static str, value: String },
    #[error("{key} is out of range: {value:?} ({reason})")]
    OutOfRange {
        key: &'static str,
        value: String,
        reason: &'static str,
    },
}

/// Reads [`OptimizerSettings`] from the process environment.
pub fn load_settings() -> Result<OptimizerSettings, SettingsError> {
    load_settings_with(|key| env::var(key).ok())
}

/// Reads [`OptimizerSettings`] through `lookup`. Unset keys keep their defaults.
pub fn load_settings_with(
    lookup: impl Fn(&str) -> Option<String>,
) -> Result<OptimizerSettings, SettingsError> {
    let mut settings = OptimizerSettings::default();

    if let Some(cap) = parse::<usize>(&lookup, MAX_TOPPINGS_PER_PIZZA_VAR)? {
        settings.max_toppings_per_pizza = cap;
    }

    if let Some((weight, raw)) = parse_with_raw::<f64>(&lookup, DISLIKE_WEIGHT_VAR)? {
        if !weight.is_finite() {
            return Err(SettingsError::OutOfRange {
                key: DISLIKE_WEIGHT_VAR,
                value: raw,
                reason: "must be a finite number",
            });
        }
        settings.dislike_weight = weight;
    }

    if let Some((seconds, raw)) = parse_with_raw::<f64>(&lookup, TIME_LIMIT_SECONDS_VAR)? {
        let Ok(limit) = Duration::try_from_secs_f64(seconds) else {
            return Err(SettingsError::OutOfRange {
                key: TIME_LIMIT_SECONDS_VAR,
                value: raw,
                reason: "must be a positive number of seconds",
            });
        };
        if limit.is_zero() {
            return Err(SettingsError::OutOfRange {
                key: TIME_LIMIT_SECONDS_VAR,
                value: raw,
                reason: "must be a positive number of seconds",
            });
        }
        settings.time_limit = limit;
    }

    if let Some((threads, raw)) = parse_with_raw::<u32>(&lookup, THREADS_VAR)? {
        if threads == 0 {
            return Err(SettingsError::OutOfRange {
                key: THREADS_VAR,
                value: raw,
                reason: "must be at least 1",
            });
        }
        settings.threads = threads;
    }

    if let Some(enabled) = parse::<bool>(&lookup, SYMMETRY_BREAKING_VAR)? {
        settings.symmetry_breaking = enabled;
    }

    tracing::debug!(
        max_toppings_per_pizza = settings.max_toppings_per_pizza,
        dislike_weight = settings.dislike_weight,
        time_limit_ms = settings.time_limit.as_millis(),
        threads = settings.threads,
        symmetry_breaking = settings.symmetry_breaking,
        "Optimizer settings loaded"
    );

    Ok(settings)
}

fn parse<T: FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &'static str,
) -> Result<Option<T>, SettingsError> {
    Ok(parse_with_raw(lookup, key)?.map(|(value, _)| value))
}

fn parse_with_raw<T: FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &'static str,
) -> Result<Option<(T, String)>, SettingsError> {
    let Some(raw) = lookup(key) else {
        return Ok(None);
    };
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    match trimmed.parse::<T>() {
        Ok(value) => Ok(Some((value, raw))),
        Err(_) => Err(SettingsError::Unparsable { key, value: raw }),
    }
}
