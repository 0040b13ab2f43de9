//! Order aggregation and reporting module.
//!
//! Turns orders and their line items into per-user statistics, the
//! cross-user leaderboard and the global summary consumed by the portal
//! UI. The rollup math is pure; database access lives in `queries`.

pub mod calculators;
pub mod models;
pub mod queries;
pub mod requests;
pub mod responses;
pub mod rollups;
pub mod routes;

// Re-export commonly used items
pub use calculators::{parsed_liters, round_liters};
pub use requests::Period;
pub use routes::router;
