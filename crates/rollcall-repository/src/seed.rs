//! Default data inserted on first start.

use crate::DatabasePoolInterface;
use rollcall_core::{RollcallResult, DEFAULT_PROFILE_NAMES};
use tracing::info;

/// Inserts the default profiles unless they already exist.
///
/// Returns the number of profiles actually created, so a second run yields `0`.
///
/// # Errors
///
/// Returns [`rollcall_core::RollcallError::Database`] if an insert fails.
pub async fn seed_default_profiles(pool: &dyn DatabasePoolInterface) -> RollcallResult<u64> {
    let mut created = 0;

    for name in DEFAULT_PROFILE_NAMES {
        let result = sqlx::query(
            "INSERT INTO profiles (name) VALUES ($1) ON CONFLICT (name) DO NOTHING",
        )
        .bind(name)
        .execute(pool.inner())
        .await?;
        created += result.rows_affected();
    }

    if created > 0 {
        info!("Seeded {} default profile(s)", created);
    }
    Ok(created)
}
