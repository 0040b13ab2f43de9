//! User profile models

use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;

/// A registered user's business/contact record, keyed 1:1 with the
/// identity provider's user id. Consumed read-only by reporting.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Profile {
    pub id: String,
    pub full_name: Option<String>,
    pub company: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub is_admin: bool,
    pub created_at: DateTime<Utc>,
}
