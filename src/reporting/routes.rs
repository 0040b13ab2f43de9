//! Reporting route handlers

use axum::{
    extract::{Path, Query, State},
    routing::get,
    Json, Router,
};
use chrono::Utc;
use std::sync::Arc;

use crate::cache::{FULL_ROSTER_KEY, NON_ADMIN_ROSTER_KEY};
use crate::db;
use crate::error::Result;
use crate::models::Profile;
use crate::AppState;

use super::calculators::{period_cutoff, trend_window_start};
use super::queries;
use super::requests::ReportQuery;
use super::rollups::{self, SummaryInput};
use super::responses::{LeaderboardRow, SummaryResponse, UserStatsResponse};

/// Build the reporting router, nested under `/api` by the server.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/stats", get(stats))
        .route("/summary", get(summary))
        .route("/users/:user_id/stats", get(user_stats))
}

/// Cross-user leaderboard over all non-admin customers.
async fn stats(
    State(state): State<AppState>,
    Query(query): Query<ReportQuery>,
) -> Result<Json<Vec<LeaderboardRow>>> {
    let cutoff = period_cutoff(query.period, Utc::now());
    let profiles = non_admin_roster(&state).await?;
    let orders = queries::fetch_report_orders(&state.db, cutoff).await?;

    Ok(Json(rollups::leaderboard(&profiles, &orders)))
}

/// Platform-wide summary for the admin dashboard.
async fn summary(
    State(state): State<AppState>,
    Query(query): Query<ReportQuery>,
) -> Result<Json<SummaryResponse>> {
    let now = Utc::now();
    let cutoff = period_cutoff(query.period, now);

    // The full roster, admins included: the order fetch is not filtered
    // by user, so the engine needs the admin rows to keep admin-owned
    // orders out of the top-customer list.
    let profiles = full_roster(&state).await?;
    let users_count = profiles.iter().filter(|p| !p.is_admin).count() as i64;
    let orders_count = queries::count_orders(&state.db, cutoff).await?;
    let active_customers = queries::count_active_customers(&state.db, cutoff).await?;
    let orders = queries::fetch_report_orders(&state.db, cutoff).await?;
    // The trend always covers the fixed six-month lookback, regardless
    // of the requested period.
    let trend_orders =
        queries::fetch_report_orders(&state.db, Some(trend_window_start(now))).await?;

    Ok(Json(rollups::summary(SummaryInput {
        users_count,
        orders_count,
        active_customers,
        orders: &orders,
        trend_orders: &trend_orders,
        profiles: &profiles,
        now,
    })))
}

/// Per-user statistics for the account detail view.
async fn user_stats(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
    Query(query): Query<ReportQuery>,
) -> Result<Json<UserStatsResponse>> {
    // 404 with a JSON error body when the profile does not exist
    let profile = profile_for(&state, &user_id).await?;
    let cutoff = period_cutoff(query.period, Utc::now());
    let orders = queries::fetch_user_report_orders(&state.db, &profile.id, cutoff).await?;

    Ok(Json(rollups::user_stats(&orders)))
}

/// Cache-or-fetch for the non-admin profile roster.
async fn non_admin_roster(state: &AppState) -> Result<Arc<Vec<Profile>>> {
    if let Some(cached) = state.cache.rosters.get(NON_ADMIN_ROSTER_KEY).await {
        tracing::debug!("Cache HIT for non-admin roster");
        return Ok(cached);
    }
    tracing::debug!("Cache MISS for non-admin roster");
    let roster = Arc::new(db::get_non_admin_profiles(&state.db).await?);
    state
        .cache
        .rosters
        .insert(NON_ADMIN_ROSTER_KEY.to_string(), roster.clone())
        .await;
    Ok(roster)
}

/// Cache-or-fetch for the full profile roster, admins included.
async fn full_roster(state: &AppState) -> Result<Arc<Vec<Profile>>> {
    if let Some(cached) = state.cache.rosters.get(FULL_ROSTER_KEY).await {
        tracing::debug!("Cache HIT for full roster");
        return Ok(cached);
    }
    tracing::debug!("Cache MISS for full roster");
    let roster = Arc::new(db::get_profiles(&state.db).await?);
    state
        .cache
        .rosters
        .insert(FULL_ROSTER_KEY.to_string(), roster.clone())
        .await;
    Ok(roster)
}

/// Cache-or-fetch for a single profile.
async fn profile_for(state: &AppState, user_id: &str) -> Result<Arc<Profile>> {
    if let Some(cached) = state.cache.profiles.get(user_id).await {
        return Ok(cached);
    }
    let profile = Arc::new(db::get_profile(&state.db, user_id).await?);
    state
        .cache
        .profiles
        .insert(user_id.to_string(), profile.clone())
        .await;
    Ok(profile)
}
