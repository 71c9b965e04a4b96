//! # Reporting Periods
//!
//! Period keys and report shapes for the financial dashboard.
//!
//! Transaction dates are stored as `YYYY-MM-DD HH:MM:SS` text in server
//! local time, so a period is simply a text prefix:
//!
//! ```text
//!   date          "2026-10-19 09:30:00"
//!   day key       "2026-10-19"          ← today
//!   month key     "2026-10"             ← this month, monthly buckets
//!   month label   "10/2026"             ← what the chart shows
//! ```

use chrono::{Datelike, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use ts_rs::TS;

use crate::money::Money;

// =============================================================================
// Period Keys
// =============================================================================

/// `YYYY-MM-DD` prefix for the day containing `now`.
pub fn day_key(now: NaiveDateTime) -> String {
    now.format("%Y-%m-%d").to_string()
}

/// `YYYY-MM` prefix for the month containing `now`.
pub fn month_key(now: NaiveDateTime) -> String {
    YearMonth::of(now).key()
}

/// A calendar month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct YearMonth {
    pub year: i32,
    /// 1-12
    pub month: u32,
}

impl YearMonth {
    pub fn of(now: NaiveDateTime) -> Self {
        YearMonth {
            year: now.year(),
            month: now.month(),
        }
    }

    /// The month before this one.
    pub fn previous(self) -> Self {
        if self.month == 1 {
            YearMonth {
                year: self.year - 1,
                month: 12,
            }
        } else {
            YearMonth {
                year: self.year,
                month: self.month - 1,
            }
        }
    }

    /// Storage prefix, e.g. `2026-03`.
    pub fn key(&self) -> String {
        format!("{:04}-{:02}", self.year, self.month)
    }

    /// Chart label, e.g. `03/2026`.
    pub fn label(&self) -> String {
        format!("{:02}/{:04}", self.month, self.year)
    }
}

/// The `count` months ending with the month of `now`, oldest first.
///
/// ## Example
/// ```rust
/// use chrono::NaiveDate;
/// use partsdesk_core::report::trailing_months;
///
/// let now = NaiveDate::from_ymd_opt(2026, 2, 10).unwrap().and_hms_opt(8, 0, 0).unwrap();
/// let labels: Vec<String> = trailing_months(now, 3).iter().map(|m| m.label()).collect();
/// assert_eq!(labels, ["12/2025", "01/2026", "02/2026"]);
/// ```
pub fn trailing_months(now: NaiveDateTime, count: usize) -> Vec<YearMonth> {
    let mut months = Vec::with_capacity(count);
    let mut current = YearMonth::of(now);

    for _ in 0..count {
        months.push(current);
        current = current.previous();
    }

    months.reverse();
    months
}

// =============================================================================
// Report Shapes
// =============================================================================

/// Dashboard figures. Every field is a plain number; empty periods are 0.
///
/// Read in one statement, so every figure comes from the same snapshot.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct FinancialSummary {
    #[ts(type = "number")]
    pub total_sales: Money,
    #[ts(type = "number")]
    pub total_profit: Money,
    #[ts(type = "number")]
    pub total_purchases: Money,
    #[ts(type = "number")]
    pub today_sales: Money,
    #[ts(type = "number")]
    pub today_profit: Money,
    #[ts(type = "number")]
    pub today_purchases: Money,
    #[ts(type = "number")]
    pub month_sales: Money,
    #[ts(type = "number")]
    pub month_profit: Money,
}

/// Sales per month for the dashboard chart.
///
/// `months` and `data` always have the same length and order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct MonthlySeries {
    pub months: Vec<String>,
    #[ts(type = "Array<number>")]
    pub data: Vec<Money>,
}

impl MonthlySeries {
    /// Lays `totals` (keyed by `YYYY-MM`) over `window`; missing months are 0.
    pub fn from_totals(window: &[YearMonth], totals: &HashMap<String, Money>) -> Self {
        let months = window.iter().map(YearMonth::label).collect();
        let data = window
            .iter()
            .map(|m| totals.get(&m.key()).copied().unwrap_or_default())
            .collect();

        MonthlySeries { months, data }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
