//! Database-backed domain models

pub mod profile;

pub use profile::Profile;
