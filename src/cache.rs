//! In-memory caching using moka
//!
//! Caches profile lookups used by the reporting endpoints. Profile data
//! changes rarely compared to how often reports are requested, so short
//! TTLs keep rows acceptably fresh without a Postgres round trip per
//! request.

use moka::future::Cache;
use sqlx::PgPool;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::interval;
use tracing::{info, warn};

use crate::db;
use crate::models::Profile;

/// Cache key for the non-admin profile roster.
pub const NON_ADMIN_ROSTER_KEY: &str = "roster:non_admin";

/// Cache key for the full profile roster, admins included.
pub const FULL_ROSTER_KEY: &str = "roster:all";

/// Application cache holding profile rows and rosters
#[derive(Clone)]
pub struct AppCache {
    /// Single profiles (user_id -> Profile)
    pub profiles: Cache<String, Arc<Profile>>,
    /// Profile rosters (key -> Vec<Profile>)
    pub rosters: Cache<String, Arc<Vec<Profile>>>,
}

impl AppCache {
    /// Create a new cache instance with configured TTLs
    pub fn new() -> Self {
        Self {
            // Single profiles: 1000 entries, 5 min TTL, 2 min idle
            profiles: Cache::builder()
                .max_capacity(1000)
                .time_to_live(Duration::from_secs(5 * 60))
                .time_to_idle(Duration::from_secs(2 * 60))
                .build(),

            // Rosters: a handful of entries, 60s TTL
            rosters: Cache::builder()
                .max_capacity(4)
                .time_to_live(Duration::from_secs(60))
                .build(),
        }
    }

    /// Get cache statistics for monitoring
    pub fn stats(&self) -> CacheStats {
        CacheStats {
            profiles_size: self.profiles.entry_count(),
            roster_cached: self.rosters.entry_count() > 0,
        }
    }
}

impl Default for AppCache {
    fn default() -> Self {
        Self::new()
    }
}

/// Cache statistics for monitoring
#[derive(Debug, Clone)]
pub struct CacheStats {
    pub profiles_size: u64,
    pub roster_cached: bool,
}

/// Start background cache warmer
///
/// Warms the roster on startup and refreshes every 5 minutes, so the
/// reporting endpoints rarely see a cold roster.
pub async fn start_cache_warmer(cache: AppCache, db: PgPool) {
    warm_cache(&cache, &db).await;

    let mut interval = interval(Duration::from_secs(5 * 60));
    loop {
        interval.tick().await;
        warm_cache(&cache, &db).await;
    }
}

/// Warm the cache with both profile rosters
async fn warm_cache(cache: &AppCache, db: &PgPool) {
    match db::get_non_admin_profiles(db).await {
        Ok(roster) => {
            cache
                .rosters
                .insert(NON_ADMIN_ROSTER_KEY.to_string(), Arc::new(roster))
                .await;
        }
        Err(e) => warn!("Failed to warm non-admin roster cache: {}", e),
    }

    match db::get_profiles(db).await {
        Ok(roster) => {
            cache
                .rosters
                .insert(FULL_ROSTER_KEY.to_string(), Arc::new(roster))
                .await;
        }
        Err(e) => warn!("Failed to warm full roster cache: {}", e),
    }

    info!("Roster caches warmed. Stats: {:?}", cache.stats());
}
