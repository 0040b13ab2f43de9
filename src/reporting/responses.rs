//! Response DTOs for the reporting API endpoints.
//!
//! Field names are consumed verbatim by the portal UI - keep them stable.

use chrono::{DateTime, Utc};
use serde::Serialize;

/// Liters attributed to one product.
#[derive(Debug, Clone, Serialize)]
pub struct ProductLiters {
    pub name: String,
    pub liters: f64,
}

/// Per-user statistics for the account detail view.
#[derive(Debug, Serialize)]
pub struct UserStatsResponse {
    pub total_orders: i64,
    pub total_liters: f64,
    pub average_liters: f64,
    pub last_order_at: Option<DateTime<Utc>>,
    pub products: Vec<ProductLiters>,
}

/// One row of the cross-user leaderboard.
#[derive(Debug, Serialize)]
pub struct LeaderboardRow {
    pub user_id: String,
    pub full_name: Option<String>,
    pub company: Option<String>,
    pub email: Option<String>,
    pub total_orders: i64,
    pub total_liters: f64,
    pub top_product: Option<String>,
}

/// One of the top customers in the global summary.
#[derive(Debug, Serialize)]
pub struct TopCustomer {
    pub user_id: String,
    pub full_name: Option<String>,
    pub company: Option<String>,
    pub email: Option<String>,
    pub liters: f64,
}

/// Liters attributed to one product category.
#[derive(Debug, Serialize)]
pub struct CategoryShare {
    pub category: String,
    pub liters: f64,
}

/// Liters attributed to one package-size bucket.
#[derive(Debug, Serialize)]
pub struct PackageShare {
    pub package: String,
    pub liters: f64,
}

/// Highest package bucket with its share of all package liters.
#[derive(Debug, Serialize)]
pub struct TopPackage {
    pub package: String,
    pub liters: f64,
    pub pct: f64,
}

/// One point of the six-month trend series.
#[derive(Debug, Serialize)]
pub struct MonthlyTrendPoint {
    pub month: String,
    pub liters: f64,
    pub change_pct: Option<f64>,
}

/// Platform-wide summary for the admin dashboard.
#[derive(Debug, Serialize)]
pub struct SummaryResponse {
    pub users_count: i64,
    pub orders_count: i64,
    pub active_customers: i64,
    pub total_liters: f64,
    pub average_liters: f64,
    pub max_order_liters: f64,
    pub top_customers: Vec<TopCustomer>,
    pub top_products: Vec<ProductLiters>,
    pub category_shares: Vec<CategoryShare>,
    pub package_shares: Vec<PackageShare>,
    pub top_package: Option<TopPackage>,
    pub monthly_trend: Vec<MonthlyTrendPoint>,
}
