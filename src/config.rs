// File: ./src/config.rs
// Handles configuration loading, saving, and defaults.
use crate::context::AppContext;
use crate::schedule::ScanOptions;
use crate::storage::CalendarStore;
use anyhow::{Error, Result};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use std::fs;

fn default_timezone() -> Tz {
    chrono_tz::America::Vancouver
}
fn default_uid_namespace() -> String {
    "geeksquad.ca".to_string()
}
fn default_prodid() -> String {
    "-//horaire//EN".to_string()
}

fn default_work_summary() -> String {
    "Travail".to_string()
}
fn default_lunch_summary() -> String {
    "Lunch".to_string()
}
fn default_lunch_minutes() -> u32 {
    30
}

fn default_work_reminders() -> Vec<u32> {
    vec![15, 5]
}
fn default_lunch_reminder() -> u32 {
    5
}

fn default_date_lookback_days() -> u32 {
    14
}

#[derive(Deserialize, Serialize, Clone, Debug, PartialEq)]
pub struct Config {
    /// Timezone the schedule times are written in.
    #[serde(default = "default_timezone")]
    pub timezone: Tz,
    /// Last segment of every event UID.
    #[serde(default = "default_uid_namespace")]
    pub uid_namespace: String,
    #[serde(default = "default_prodid")]
    pub prodid: String,

    #[serde(default = "default_work_summary")]
    pub work_summary: String,
    #[serde(default = "default_lunch_summary")]
    pub lunch_summary: String,
    #[serde(default = "default_lunch_minutes")]
    pub lunch_minutes: u32,

    // Minutes before the shift starts.
    #[serde(default = "default_work_reminders")]
    pub work_reminders_mins: Vec<u32>,
    #[serde(default = "default_lunch_reminder")]
    pub lunch_start_reminder_mins: u32,
    #[serde(default = "default_lunch_reminder")]
    pub lunch_end_reminder_mins: u32,

    /// Header dates further than this before the message date belong to next year.
    #[serde(default = "default_date_lookback_days")]
    pub date_lookback_days: u32,

    /// Name prefixes to export. Empty exports everybody.
    #[serde(default)]
    pub employee_filter: Vec<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            timezone: default_timezone(),
            uid_namespace: default_uid_namespace(),
            prodid: default_prodid(),
            work_summary: default_work_summary(),
            lunch_summary: default_lunch_summary(),
            lunch_minutes: 30,
            work_reminders_mins: vec![15, 5],
            lunch_start_reminder_mins: 5,
            lunch_end_reminder_mins: 5,
            date_lookback_days: 14,
            employee_filter: Vec::new(),
        }
    }
}

impl Config {
    /// Load the configuration from disk using an explicit context.
    /// Returns a contextualized error if reading or parsing fails.
    pub fn load(ctx: &dyn AppContext) -> Result<Self> {
        let path = ctx.get_config_file_path()?;

        if !path.exists() {
            return Err(anyhow::anyhow!("Config file not found"));
        }

        let contents = fs::read_to_string(&path).map_err(|e| {
            anyhow::anyhow!("Failed to read config file '{}': {}", path.display(), e)
        })?;

        let config: Config = toml::from_str(&contents).map_err(|e| {
            anyhow::anyhow!("Failed to parse config file '{}': {}", path.display(), e)
        })?;

        Ok(config)
    }

    /// Like [`Config::load`], but a missing file yields the defaults.
    pub fn load_or_default(ctx: &dyn AppContext) -> Result<Self> {
        match Self::load(ctx) {
            Ok(config) => Ok(config),
            Err(e) if Self::is_missing_config_error(&e) => {
                log::debug!("No config file, using defaults");
                Ok(Self::default())
            }
            Err(e) => Err(e),
        }
    }

    /// Helper to detect whether an anyhow::Error indicates that the config file was missing.
    pub fn is_missing_config_error(err: &Error) -> bool {
        if err.to_string().contains("Config file not found") {
            return true;
        }

        err.chain().any(|cause| {
            cause
                .downcast_ref::<std::io::Error>()
                .is_some_and(|io_err| io_err.kind() == std::io::ErrorKind::NotFound)
        })
    }

    /// Save configuration using an explicit context.
    pub fn save(&self, ctx: &dyn AppContext) -> Result<()> {
        let path = ctx.get_config_file_path()?;
        CalendarStore::with_lock(&path, || {
            let toml_str = toml::to_string_pretty(self)?;
            CalendarStore::atomic_write(&path, toml_str)?;
            Ok(())
        })?;
        Ok(())
    }

    pub fn scan_options(&self) -> ScanOptions {
        ScanOptions {
            timezone: self.timezone,
            date_lookback_days: self.date_lookback_days,
        }
    }

    pub fn exports_employee(&self, name: &str) -> bool {
        self.employee_filter.is_empty()
            || self
                .employee_filter
                .iter()
                .any(|prefix| name.starts_with(prefix.as_str()))
    }
}
