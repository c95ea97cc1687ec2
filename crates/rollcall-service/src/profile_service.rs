//! Profile service trait definition.

use crate::dto::ProfileResponse;
use async_trait::async_trait;
use rollcall_core::{Interface, RollcallResult};

/// Profile service trait.
#[async_trait]
pub trait ProfileService: Interface + Send + Sync {
    /// Lists all profiles by name.
    async fn list_profiles(&self) -> RollcallResult<Vec<ProfileResponse>>;
}
