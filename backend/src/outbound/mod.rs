//! Outbound adapters implementing the storage ports.
//!
//! - **memory**: process-local tables, used when no database is configured
//!   and throughout the tests.
//! - **persistence**: PostgreSQL through Diesel.

pub mod memory;
pub mod persistence;
