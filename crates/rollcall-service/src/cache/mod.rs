//! Process-local cache for the request handler.
//!
//! Values are stored as JSON strings under deterministic keys from
//! [`cache_keys`]. Entries live until they are invalidated unless a TTL is
//! configured.

mod cache_interface;
pub mod cache_keys;
mod memory_cache;

pub use cache_interface::{CacheExt, CacheInterface};
pub use memory_cache::{CacheEntry, InMemoryCacheService};

use rollcall_core::RollcallError;
use tracing::error;

/// Logs a failed cache operation and hands the error back for propagation.
pub(crate) fn cache_failure(key: &str, err: RollcallError) -> RollcallError {
    error!("Cache operation on '{}' failed: {}", key, err);
    err
}
