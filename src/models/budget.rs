//! Spending budget model
//!
//! A budget caps spending for one calendar period. At most one weekly and one
//! monthly budget exist at a time.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::money::Money;

/// Period a budget applies to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BudgetPeriod {
    Weekly,
    Monthly,
}

impl BudgetPeriod {
    pub const ALL: [BudgetPeriod; 2] = [BudgetPeriod::Weekly, BudgetPeriod::Monthly];
}

impl fmt::Display for BudgetPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Weekly => write!(f, "Weekly"),
            Self::Monthly => write!(f, "Monthly"),
        }
    }
}

impl FromStr for BudgetPeriod {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "weekly" | "week" | "w" => Ok(Self::Weekly),
            "monthly" | "month" | "m" => Ok(Self::Monthly),
            other => Err(format!("Unknown budget period '{}'", other)),
        }
    }
}

/// A spending limit for a period
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Budget {
    /// Period this limit applies to
    pub period: BudgetPeriod,

    /// Maximum planned spend for the period (non-negative)
    pub limit_amount: Money,

    /// When the limit was last set
    pub updated_at: DateTime<Utc>,
}

impl Budget {
    /// Create a budget; the caller guarantees `limit_amount >= 0`
    pub fn new(period: BudgetPeriod, limit_amount: Money) -> Self {
        Self {
            period,
            limit_amount,
            updated_at: Utc::now(),
        }
    }

    /// Amount left before the limit (negative when overspent)
    pub fn remaining(&self, spent: Money) -> Money {
        self.limit_amount - spent
    }

    /// Share of the limit already used, in percent (0 for a zero limit)
    pub fn used_percentage(&self, spent: Money) -> f64 {
        spent.percentage_of(self.limit_amount)
    }
}
