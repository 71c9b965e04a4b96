//! # Financial Aggregator
//!
//! Dashboard figures computed from the ledger on every call (no caching).
//!
//! ## Periods
//! ```text
//!   now = 2026-10-19 14:05:09
//!
//!   total*   every record
//!   today*   date LIKE '2026-10-19%'
//!   month*   date LIKE '2026-10%'
//!   series   05/2026 06/2026 07/2026 08/2026 09/2026 10/2026
//! ```

use chrono::NaiveDateTime;
use std::sync::Arc;
use tracing::debug;

use crate::service::ServiceResult;
use crate::store::Store;
use partsdesk_core::report::{day_key, month_key, trailing_months};
use partsdesk_core::{FinancialSummary, MonthlySeries, MONTHLY_WINDOW};

#[derive(Clone)]
pub struct FinancialAggregator {
    store: Arc<dyn Store>,
}

impl FinancialAggregator {
    pub fn new(store: Arc<dyn Store>) -> Self {
        FinancialAggregator { store }
    }

    /// All-time, today and this-month figures as of `now`, read together
    /// in one store call so they describe the same ledger state.
    pub async fn summary(&self, now: NaiveDateTime) -> ServiceResult<FinancialSummary> {
        let today = day_key(now);
        let month = month_key(now);

        let summary = self.store.financial_summary(&today, &month).await?;

        debug!(%today, %month, "Computed financial summary");
        Ok(summary)
    }

    /// Sales per month for the six months ending with `now`'s month.
    pub async fn monthly_series(&self, now: NaiveDateTime) -> ServiceResult<MonthlySeries> {
        let window = trailing_months(now, MONTHLY_WINDOW);
        let since = window.first().map(|m| m.key()).unwrap_or_else(|| month_key(now));

        let totals = self.store.monthly_sales(&since).await?;
        Ok(MonthlySeries::from_totals(&window, &totals))
    }
}
