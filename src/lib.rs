//! Reporting backend for the Napoje B2B ordering portal.
//!
//! Customers of the beverage wholesale order kegs and packaged goods
//! through the portal UI; this service aggregates their orders into the
//! per-user statistics, leaderboard and dashboard summary views.

pub mod cache;
pub mod db;
pub mod error;
pub mod models;
pub mod reporting;

use cache::AppCache;
use sqlx::PgPool;

/// Shared application state for route handlers
#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    pub cache: AppCache,
}
