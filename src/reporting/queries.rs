//! Database queries for the reporting engine.
//!
//! The order/line-item/product join is restricted to liter-eligible
//! categories in SQL; the raw counts for the summary are unfiltered.
//! Rows come back ordered by `created_at DESC`, which the engine relies
//! on when picking `last_order_at`.

use chrono::{DateTime, Utc};
use sqlx::PgPool;

use crate::error::Result;

use super::models::{group_order_rows, OrderItemRow, ReportOrder};

/// Fetch all orders with liter-eligible line items in the window,
/// grouped with their items. A `None` cutoff means no lower bound.
pub async fn fetch_report_orders(
    pool: &PgPool,
    cutoff: Option<DateTime<Utc>>,
) -> Result<Vec<ReportOrder>> {
    let rows = sqlx::query_as::<_, OrderItemRow>(
        r#"
        SELECT
            o.id AS order_id,
            o.user_id,
            o.created_at,
            i.quantity,
            i.volume,
            p.name AS product_name,
            p.category
        FROM orders o
        JOIN order_items i ON i.order_id = o.id
        JOIN products p ON p.id = i.product_id
        WHERE p.category IN ('Víno', 'Nápoje', 'Ovocné víno', 'Ovocné')
          AND ($1::timestamptz IS NULL OR o.created_at >= $1)
        ORDER BY o.created_at DESC, o.id
        "#,
    )
    .bind(cutoff)
    .fetch_all(pool)
    .await?;

    Ok(group_order_rows(rows))
}

/// Fetch one user's orders with liter-eligible line items in the window.
pub async fn fetch_user_report_orders(
    pool: &PgPool,
    user_id: &str,
    cutoff: Option<DateTime<Utc>>,
) -> Result<Vec<ReportOrder>> {
    let rows = sqlx::query_as::<_, OrderItemRow>(
        r#"
        SELECT
            o.id AS order_id,
            o.user_id,
            o.created_at,
            i.quantity,
            i.volume,
            p.name AS product_name,
            p.category
        FROM orders o
        JOIN order_items i ON i.order_id = o.id
        JOIN products p ON p.id = i.product_id
        WHERE o.user_id = $1
          AND p.category IN ('Víno', 'Nápoje', 'Ovocné víno', 'Ovocné')
          AND ($2::timestamptz IS NULL OR o.created_at >= $2)
        ORDER BY o.created_at DESC, o.id
        "#,
    )
    .bind(user_id)
    .bind(cutoff)
    .fetch_all(pool)
    .await?;

    Ok(group_order_rows(rows))
}

/// Raw order count in the window, unfiltered by category.
pub async fn count_orders(pool: &PgPool, cutoff: Option<DateTime<Utc>>) -> Result<i64> {
    let count = sqlx::query_scalar::<_, i64>(
        r#"
        SELECT COUNT(*)
        FROM orders
        WHERE ($1::timestamptz IS NULL OR created_at >= $1)
        "#,
    )
    .bind(cutoff)
    .fetch_one(pool)
    .await?;

    Ok(count)
}

/// Distinct customers with at least one order in the window. Guest
/// orders (null user) do not count.
pub async fn count_active_customers(pool: &PgPool, cutoff: Option<DateTime<Utc>>) -> Result<i64> {
    let count = sqlx::query_scalar::<_, i64>(
        r#"
        SELECT COUNT(DISTINCT user_id)
        FROM orders
        WHERE user_id IS NOT NULL
          AND ($1::timestamptz IS NULL OR created_at >= $1)
        "#,
    )
    .bind(cutoff)
    .fetch_one(pool)
    .await?;

    Ok(count)
}
