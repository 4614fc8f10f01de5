//! Plan configuration parser
//!
//! Parses `hurdles.toml` into the plan start date, weather settings and the
//! cyclic list of training days.

use std::collections::HashSet;
use std::path::Path;

use anyhow::{bail, Context, Result};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::plan::day::DayPlan;

/// Environment value that means "no key configured"
const DEMO_API_KEY: &str = "demo_key";

/// Global settings shared by every command
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct GlobalConfig {
    /// First day of the plan cycle (default: 2024-09-01)
    #[serde(default = "default_start_date")]
    pub start_date: NaiveDate,
    /// City query sent to the weather provider
    #[serde(default = "default_location")]
    pub location: String,
    /// Name of the environment variable holding the `OpenWeatherMap` key
    #[serde(default = "default_api_key_env")]
    pub weather_api_key_env: String,
    /// Weather provider base URL
    #[serde(default = "default_weather_base_url")]
    pub weather_base_url: String,
    /// Long-term progression goals shown alongside the daily workout
    #[serde(default)]
    pub goals: Vec<String>,
}

fn default_start_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 9, 1).unwrap_or_default()
}

fn default_location() -> String {
    "Union City,PA".to_string()
}

fn default_api_key_env() -> String {
    "OPENWEATHER_API_KEY".to_string()
}

fn default_weather_base_url() -> String {
    "http://api.openweathermap.org".to_string()
}

impl Default for GlobalConfig {
    fn default() -> Self {
        Self {
            start_date: default_start_date(),
            location: default_location(),
            weather_api_key_env: default_api_key_env(),
            weather_base_url: default_weather_base_url(),
            goals: Vec::new(),
        }
    }
}

impl GlobalConfig {
    /// Read the weather API key from the configured environment variable.
    ///
    /// Unset, blank and `demo_key` values all mean no key.
    #[must_use]
    pub fn weather_api_key(&self) -> Option<String> {
        std::env::var(&self.weather_api_key_env)
            .ok()
            .map(|key| key.trim().to_string())
            .filter(|key| !key.is_empty() && key != DEMO_API_KEY)
    }
}

/// A technique drill listed with every workout
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FormDrill {
    /// Drill name
    pub name: String,
    /// Short cue or rep scheme
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Top-level configuration parsed from hurdles.toml
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct PlanConfig {
    /// Global configuration
    #[serde(default)]
    pub global: GlobalConfig,
    /// Training days, in cycle order
    #[serde(rename = "day", default)]
    pub days: Vec<DayPlan>,
    /// Form drills
    #[serde(rename = "drill", default)]
    pub drills: Vec<FormDrill>,
}

impl PlanConfig {
    /// Parse a hurdles.toml file from a path
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        Self::parse(&content)
    }

    /// Parse hurdles.toml content from a string
    pub fn parse(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content).context("Failed to parse hurdles.toml")?;
        config.validate()?;
        Ok(config)
    }

    /// Load the config, or fall back to an empty plan if it cannot be used.
    ///
    /// The empty plan makes the scheduler hand out the recovery day.
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Self {
        let path = path.as_ref();
        Self::from_path(path).unwrap_or_else(|err| {
            tracing::error!("Error loading training plan from {}: {err:#}", path.display());
            Self::default()
        })
    }

    /// Validate the configuration
    fn validate(&self) -> Result<()> {
        for (i, day) in self.days.iter().enumerate() {
            if day.focus.trim().is_empty() {
                bail!("Day {} has an empty focus", i + 1);
            }
        }

        let mut seen = HashSet::new();
        for number in self.days.iter().filter_map(|d| d.day) {
            if !seen.insert(number) {
                bail!("Duplicate day number: {number}");
            }
        }

        for drill in &self.drills {
            if drill.name.trim().is_empty() {
                bail!("Drill name cannot be empty");
            }
        }

        if self.global.location.trim().is_empty() {
            bail!("Weather location cannot be empty");
        }

        Ok(())
    }
}

/// Rewrite `global.start_date` in a hurdles.toml file in place.
///
/// Comments and formatting elsewhere in the file are preserved. The edited
/// document is validated before it is written.
pub fn set_start_date<P: AsRef<Path>>(path: P, start_date: NaiveDate) -> Result<()> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    let updated = with_start_date(&content, start_date)?;

    std::fs::write(path, updated)
        .with_context(|| format!("Failed to write config file: {}", path.display()))
}

fn with_start_date(content: &str, start_date: NaiveDate) -> Result<String> {
    let mut doc: toml_edit::DocumentMut = content
        .parse()
        .context("Failed to parse hurdles.toml")?;

    let global = doc.entry("global").or_insert(toml_edit::table());
    let Some(global) = global.as_table_like_mut() else {
        bail!("'global' in hurdles.toml must be a table");
    };
    global.insert("start_date", toml_edit::value(start_date.to_string()));

    let updated = doc.to_string();
    PlanConfig::parse(&updated)?;
    Ok(updated)
}
