//! Profile controller.

use crate::{
    responses::{ok, ApiResult},
    state::AppState,
};
use axum::{extract::State, routing::get, Router};
use rollcall_service::ProfileResponse;
use tracing::debug;

/// Creates the profile router.
pub fn router() -> Router<AppState> {
    Router::new().route("/", get(list_profiles))
}

/// List all profiles.
async fn list_profiles(State(state): State<AppState>) -> ApiResult<Vec<ProfileResponse>> {
    debug!("List profiles request");
    let profiles = state.profiles.list_profiles().await?;
    ok(profiles)
}
