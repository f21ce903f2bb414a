//! Outbound adapters implementing the domain repository ports.
//!
//! - **persistence**: PostgreSQL repositories on Diesel with `bb8` pooling.
//! - **memory**: a process-local store for development and tests.

pub mod memory;
pub mod persistence;
