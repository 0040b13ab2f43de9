//! Database queries for user profiles

use sqlx::PgPool;

use crate::error::{AppError, Result};
use crate::models::Profile;

/// Get every non-admin profile, oldest account first.
pub async fn get_non_admin_profiles(pool: &PgPool) -> Result<Vec<Profile>> {
    let profiles = sqlx::query_as::<_, Profile>(
        r#"
        SELECT
            id,
            full_name,
            company,
            email,
            phone,
            address,
            is_admin,
            created_at
        FROM profiles
        WHERE is_admin = FALSE
        ORDER BY created_at
        "#,
    )
    .fetch_all(pool)
    .await?;

    Ok(profiles)
}

/// Get every profile, admins included, oldest account first. The
/// summary needs admin rows to keep admin-owned orders out of the
/// top-customer list.
pub async fn get_profiles(pool: &PgPool) -> Result<Vec<Profile>> {
    let profiles = sqlx::query_as::<_, Profile>(
        r#"
        SELECT
            id,
            full_name,
            company,
            email,
            phone,
            address,
            is_admin,
            created_at
        FROM profiles
        ORDER BY created_at
        "#,
    )
    .fetch_all(pool)
    .await?;

    Ok(profiles)
}

/// Get a single profile by the identity provider's user id.
pub async fn get_profile(pool: &PgPool, user_id: &str) -> Result<Profile> {
    let profile = sqlx::query_as::<_, Profile>(
        r#"
        SELECT
            id,
            full_name,
            company,
            email,
            phone,
            address,
            is_admin,
            created_at
        FROM profiles
        WHERE id = $1
        "#,
    )
    .bind(user_id)
    .fetch_optional(pool)
    .await?
    .ok_or(AppError::NotFound)?;

    Ok(profile)
}
