//! User settings for grocery-cli
//!
//! Manages user preferences: currency display, calendar conventions, budget
//! alert threshold and the price ranges used by charts and shortcuts.

use chrono::Weekday;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::paths::GroceryPaths;
use crate::error::GroceryError;
use crate::expense::PriceBuckets;
use crate::models::Money;

/// First day of the calendar week used for weekly budget windows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum WeekStart {
    #[default]
    Monday,
    Sunday,
}

impl WeekStart {
    pub fn weekday(self) -> Weekday {
        match self {
            Self::Monday => Weekday::Mon,
            Self::Sunday => Weekday::Sun,
        }
    }
}

/// User settings for grocery-cli
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Schema version for migration support
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    /// Currency symbol used when formatting amounts
    #[serde(default = "default_currency")]
    pub currency_symbol: String,

    /// Date format preference (strftime format)
    #[serde(default = "default_date_format")]
    pub date_format: String,

    /// First day of week for weekly windows
    #[serde(default)]
    pub week_start: WeekStart,

    /// Percentage of a budget at which spending counts as "near" the limit
    #[serde(default = "default_near_threshold")]
    pub near_threshold_percent: u8,

    /// Lower edges of the price distribution buckets
    #[serde(default = "default_price_bucket_edges")]
    pub price_bucket_edges: Vec<Money>,

    /// Price per unit above which an item counts as expensive
    #[serde(default = "default_expensive_threshold")]
    pub expensive_threshold: Money,

    /// Price per unit at or below which an item counts as budget friendly
    #[serde(default = "default_budget_friendly_threshold")]
    pub budget_friendly_threshold: Money,

    /// Number of days shown in the spending trend
    #[serde(default = "default_trend_days")]
    pub trend_days: u32,
}

fn default_schema_version() -> u32 {
    1
}

fn default_currency() -> String {
    "$".to_string()
}

fn default_date_format() -> String {
    "%Y-%m-%d".to_string()
}

fn default_near_threshold() -> u8 {
    90
}

fn default_price_bucket_edges() -> Vec<Money> {
    [0, 2, 5, 10, 20]
        .into_iter()
        .map(|d| Money::new(Decimal::from(d)))
        .collect()
}

fn default_expensive_threshold() -> Money {
    Money::new(Decimal::from(10))
}

fn default_budget_friendly_threshold() -> Money {
    Money::new(Decimal::from(5))
}

fn default_trend_days() -> u32 {
    30
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            currency_symbol: default_currency(),
            date_format: default_date_format(),
            week_start: WeekStart::default(),
            near_threshold_percent: default_near_threshold(),
            price_bucket_edges: default_price_bucket_edges(),
            expensive_threshold: default_expensive_threshold(),
            budget_friendly_threshold: default_budget_friendly_threshold(),
            trend_days: default_trend_days(),
        }
    }
}

impl Settings {
    /// Load settings from disk, or return defaults if the file doesn't exist
    pub fn load_or_create(paths: &GroceryPaths) -> Result<Self, GroceryError> {
        let settings_path = paths.settings_file();

        if !settings_path.exists() {
            // Don't save yet - let caller decide when to persist
            return Ok(Settings::default());
        }

        let contents = std::fs::read_to_string(&settings_path)
            .map_err(|e| GroceryError::Io(format!("Failed to read settings file: {}", e)))?;

        let settings: Settings = serde_json::from_str(&contents)
            .map_err(|e| GroceryError::Config(format!("Failed to parse settings file: {}", e)))?;

        settings.validate()?;
        Ok(settings)
    }

    /// Save settings to disk
    pub fn save(&self, paths: &GroceryPaths) -> Result<(), GroceryError> {
        paths.ensure_directories()?;

        let contents = serde_json::to_string_pretty(self)
            .map_err(|e| GroceryError::Config(format!("Failed to serialize settings: {}", e)))?;

        std::fs::write(paths.settings_file(), contents)
            .map_err(|e| GroceryError::Io(format!("Failed to write settings file: {}", e)))?;

        Ok(())
    }

    /// Check that the loaded values are usable
    pub fn validate(&self) -> Result<(), GroceryError> {
        if self.near_threshold_percent == 0 || self.near_threshold_percent > 100 {
            return Err(GroceryError::Config(format!(
                "near_threshold_percent must be between 1 and 100, got {}",
                self.near_threshold_percent
            )));
        }
        if self.trend_days == 0 {
            return Err(GroceryError::Config("trend_days must be positive".into()));
        }
        self.price_buckets()?;
        Ok(())
    }

    /// The near-limit threshold as a fraction (90 -> 0.9)
    pub fn near_threshold(&self) -> Decimal {
        Decimal::from(self.near_threshold_percent) / Decimal::from(100)
    }

    /// Build the configured price buckets
    pub fn price_buckets(&self) -> Result<PriceBuckets, GroceryError> {
        PriceBuckets::new(self.price_bucket_edges.clone())
    }

    /// Change one setting by key, as given on the command line
    ///
    /// The result is validated; on error the settings are left unchanged.
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), GroceryError> {
        let mut updated = self.clone();
        let value = value.trim();
        let invalid = |what: &str| GroceryError::Config(format!("Invalid {} '{}'", what, value));
        let money = |v: &str| {
            Money::parse(v)
                .ok()
                .filter(|m| !m.is_negative())
                .ok_or_else(|| invalid("amount"))
        };

        match key {
            "currency_symbol" => {
                if value.is_empty() {
                    return Err(invalid("currency symbol"));
                }
                updated.currency_symbol = value.to_string();
            }
            "date_format" => {
                if value.is_empty() {
                    return Err(invalid("date format"));
                }
                updated.date_format = value.to_string();
            }
            "week_start" => {
                updated.week_start = match value.to_lowercase().as_str() {
                    "monday" | "mon" => WeekStart::Monday,
                    "sunday" | "sun" => WeekStart::Sunday,
                    _ => return Err(invalid("week start (monday or sunday)")),
                }
            }
            "near_threshold_percent" => {
                updated.near_threshold_percent =
                    value.parse().map_err(|_| invalid("percentage"))?
            }
            "expensive_threshold" => updated.expensive_threshold = money(value)?,
            "budget_friendly_threshold" => updated.budget_friendly_threshold = money(value)?,
            "trend_days" => updated.trend_days = value.parse().map_err(|_| invalid("day count"))?,
            "price_bucket_edges" => {
                updated.price_bucket_edges = value
                    .split(',')
                    .map(|edge| money(edge.trim()))
                    .collect::<Result<_, _>>()?
            }
            other => {
                return Err(GroceryError::Config(format!(
                    "Unknown setting '{}'",
                    other
                )))
            }
        }

        updated.validate()?;
        *self = updated;
        Ok(())
    }
}
