//! Input shapes for the aggregation engine.
//!
//! The engine never sees full order rows - only `created_at`, the owning
//! user and the joined line-item fields. The informational `total_volume`
//! column on orders is deliberately not fetched; liters are always
//! recomputed from line items.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

/// Flat row from the order / line-item / product join.
#[derive(Debug, Clone, FromRow)]
pub struct OrderItemRow {
    pub order_id: Uuid,
    pub user_id: Option<String>,
    pub created_at: DateTime<Utc>,
    pub quantity: i32,
    pub volume: String,
    pub product_name: String,
    pub category: String,
}

/// One product line inside an order, as seen by the engine.
#[derive(Debug, Clone)]
pub struct ReportLineItem {
    pub product_name: String,
    pub category: String,
    pub volume: String,
    pub quantity: i32,
}

/// An order with its line items, as seen by the engine.
#[derive(Debug, Clone)]
pub struct ReportOrder {
    pub id: Uuid,
    pub user_id: Option<String>,
    pub created_at: DateTime<Utc>,
    pub items: Vec<ReportLineItem>,
}

/// Group flat join rows into orders, preserving the row order (the
/// queries sort by `created_at DESC`, which the engine relies on when
/// picking `last_order_at`).
pub fn group_order_rows(rows: Vec<OrderItemRow>) -> Vec<ReportOrder> {
    let mut orders: Vec<ReportOrder> = Vec::new();
    let mut index: HashMap<Uuid, usize> = HashMap::new();

    for row in rows {
        let item = ReportLineItem {
            product_name: row.product_name,
            category: row.category,
            volume: row.volume,
            quantity: row.quantity,
        };
        match index.get(&row.order_id) {
            Some(&at) => orders[at].items.push(item),
            None => {
                index.insert(row.order_id, orders.len());
                orders.push(ReportOrder {
                    id: row.order_id,
                    user_id: row.user_id,
                    created_at: row.created_at,
                    items: vec![item],
                });
            }
        }
    }

    orders
}
