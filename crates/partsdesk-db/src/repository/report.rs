//! # Report Repository
//!
//! Period sums for the dashboard. Periods are date-text prefixes, so every
//! query is a plain `LIKE` or `substr` over the `date` column.

use sqlx::SqlitePool;
use std::collections::HashMap;
use tracing::debug;

use crate::error::DbResult;
use crate::repository::period_pattern;
use partsdesk_core::{FinancialSummary, Money};

/// Repository for aggregate queries.
#[derive(Debug, Clone)]
pub struct ReportRepository {
    pool: SqlitePool,
}

impl ReportRepository {
    /// Creates a new ReportRepository.
    pub fn new(pool: SqlitePool) -> Self {
        ReportRepository { pool }
    }

    /// Computes every dashboard figure in one statement.
    ///
    /// A single SELECT reads one snapshot of both tables, so a sale
    /// committed mid-request cannot show up in one figure and not another.
    pub async fn financial_summary(&self, day: &str, month: &str) -> DbResult<FinancialSummary> {
        let summary: FinancialSummary = sqlx::query_as(
            r#"
            SELECT
                (SELECT COALESCE(SUM(total_cents), 0) FROM sales) AS total_sales,
                (SELECT COALESCE(SUM(profit_cents), 0) FROM sales) AS total_profit,
                (SELECT COALESCE(SUM(total_cents), 0) FROM purchases) AS total_purchases,
                (SELECT COALESCE(SUM(total_cents), 0) FROM sales WHERE date LIKE ?1) AS today_sales,
                (SELECT COALESCE(SUM(profit_cents), 0) FROM sales WHERE date LIKE ?1) AS today_profit,
                (SELECT COALESCE(SUM(total_cents), 0) FROM purchases WHERE date LIKE ?1) AS today_purchases,
                (SELECT COALESCE(SUM(total_cents), 0) FROM sales WHERE date LIKE ?2) AS month_sales,
                (SELECT COALESCE(SUM(profit_cents), 0) FROM sales WHERE date LIKE ?2) AS month_profit
            "#,
        )
        .bind(period_pattern(day))
        .bind(period_pattern(month))
        .fetch_one(&self.pool)
        .await?;

        debug!(
            day,
            month,
            total_sales = %summary.total_sales,
            today_sales = %summary.today_sales,
            "Summed dashboard figures"
        );
        Ok(summary)
    }

    /// Sale totals per `YYYY-MM`, starting at `since_month`.
    pub async fn monthly_sales(&self, since_month: &str) -> DbResult<HashMap<String, Money>> {
        let rows: Vec<(String, i64)> = sqlx::query_as(
            r#"
            SELECT substr(date, 1, 7) AS month, SUM(total_cents)
            FROM sales
            WHERE date >= ?1
            GROUP BY month
            "#,
        )
        .bind(since_month)
        .fetch_all(&self.pool)
        .await?;

        debug!(since_month, buckets = rows.len(), "Grouped sales by month");
        Ok(rows
            .into_iter()
            .map(|(month, cents)| (month, Money::from_cents(cents)))
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use crate::pool::{Database, DbConfig};
    use crate::store::LedgerTx;
    use chrono::{NaiveDate, NaiveDateTime};
    use partsdesk_core::{FinancialSummary, Money, NewPurchase, NewSale, PaymentMethod};

    fn at(y: i32, m: u32, d: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap()
    }

    async fn record(db: &Database, date: NaiveDateTime, total: i64, profit: i64) {
        let mut tx = db.ledger().begin().await.unwrap();
        tx.insert_sale(&NewSale {
            date,
            total: Money::from_units(total),
            payment_method: PaymentMethod::Cash,
            items: vec![],
            profit: Money::from_units(profit),
        })
        .await
        .unwrap();
        tx.commit().await.unwrap();
    }

    #[tokio::test]
    async fn test_empty_tables_sum_to_zero() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let reports = db.reports();

        assert_eq!(
            reports.financial_summary("2026-10-19", "2026-10").await.unwrap(),
            FinancialSummary::default()
        );
        assert!(reports.monthly_sales("2026-05").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_period_prefix_matching() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        record(&db, at(2026, 10, 19), 240, 90).await;
        record(&db, at(2026, 10, 1), 100, 10).await;
        record(&db, at(2026, 9, 30), 50, 5).await;

        let mut tx = db.ledger().begin().await.unwrap();
        tx.insert_purchase(&NewPurchase {
            date: at(2026, 10, 19),
            total: Money::from_units(500),
            items: vec![],
        })
        .await
        .unwrap();
        tx.commit().await.unwrap();

        let reports = db.reports();
        let summary = reports.financial_summary("2026-10-19", "2026-10").await.unwrap();
        assert_eq!(
            summary,
            FinancialSummary {
                total_sales: Money::from_units(390),
                total_profit: Money::from_units(105),
                total_purchases: Money::from_units(500),
                today_sales: Money::from_units(240),
                today_profit: Money::from_units(90),
                today_purchases: Money::from_units(500),
                month_sales: Money::from_units(340),
                month_profit: Money::from_units(100),
            }
        );

        let monthly = reports.monthly_sales("2026-09").await.unwrap();
        assert_eq!(monthly.get("2026-10"), Some(&Money::from_units(340)));
        assert_eq!(monthly.get("2026-09"), Some(&Money::from_units(50)));
        assert!(reports.monthly_sales("2026-10").await.unwrap().get("2026-09").is_none());
    }
}
