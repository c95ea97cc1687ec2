//! # Rollcall Repository
//!
//! Store layer for users and profiles.
//!
//! ```text
//! Service
//!   ↓  Arc<dyn UserRepository> / Arc<dyn ProfileRepository>
//! PostgresUserRepository / PostgresProfileRepository
//!   ↓  Arc<dyn DatabasePoolInterface>
//! DatabasePool (sqlx::PgPool)
//!   ↓
//! Postgres
//! ```

pub mod pool;
pub mod postgres;
pub mod seed;
pub mod traits;

#[cfg(any(test, feature = "testing"))]
pub mod memory;

pub use pool::*;
pub use postgres::*;
pub use seed::*;
pub use traits::*;
