//! Database access layer

pub mod queries;

pub use queries::{get_non_admin_profiles, get_profile, get_profiles};
