//! PostgreSQL storage backend using Diesel.
//!
//! Row structs (`models.rs`) and table definitions (`schema.rs`) stay inside
//! this module; only [`DieselRepository`], the pool types and the migration
//! entry point are public.
//!
//! ```ignore
//! use user_groups::outbound::persistence::{DbPool, DieselRepository, PoolConfig};
//!
//! let pool = DbPool::new(PoolConfig::new("postgres://localhost/user_groups")).await?;
//! let repository = DieselRepository::new(pool);
//! ```

mod diesel_groups;
mod diesel_repository;
mod diesel_users;
mod error_mapping;
mod migrations;
mod models;
mod pool;
mod schema;

pub use diesel_groups::DieselGroupQuery;
pub use diesel_repository::DieselRepository;
pub use diesel_users::DieselUserQuery;
pub use migrations::{MIGRATIONS, MigrationError, run_pending_migrations};
pub use pool::{DbPool, PoolConfig, PoolError};
