// src/core/billing.rs — Earnings calculation for work sessions

use serde::{Deserialize, Serialize};

/// Default length of a fixed-price project, in hours.
pub const DEFAULT_PROJECT_HOURS: f64 = 8.0;

const SECONDS_PER_HOUR: f64 = 3600.0;

/// Which billing model a new session uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BillingKind {
    #[default]
    Hourly,
    Fixed,
}

/// Converts active work time into earnings.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BillingStrategy {
    /// `hours × rate`, unbounded.
    HourlyRate { rate: f64 },
    /// `(hours / project_hours) × price`.
    ///
    /// Not clamped: working past `project_hours` keeps accruing beyond `price`.
    FixedProjectPrice { price: f64, project_hours: f64 },
}

impl BillingStrategy {
    pub fn new(kind: BillingKind, amount: f64, project_hours: f64) -> Self {
        match kind {
            BillingKind::Hourly => Self::HourlyRate { rate: amount },
            BillingKind::Fixed => Self::FixedProjectPrice {
                price: amount,
                project_hours,
            },
        }
    }

    /// Earnings for `active_seconds` of work. Negative input counts as zero.
    pub fn earnings(&self, active_seconds: f64) -> f64 {
        let hours = active_seconds.max(0.0) / SECONDS_PER_HOUR;
        match *self {
            Self::HourlyRate { rate } => hours * rate,
            Self::FixedProjectPrice {
                price,
                project_hours,
            } => {
                if project_hours > 0.0 {
                    hours / project_hours * price
                } else {
                    0.0
                }
            }
        }
    }
}
