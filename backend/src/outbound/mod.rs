//! Outbound adapters implementing the domain's driven ports.
//!
//! - **persistence**: PostgreSQL repositories using Diesel ORM
//! - **memory**: the same repositories over process memory, for tests and
//!   database-less runs
//! - **security**: Argon2 password hashing
//!
//! Adapters are thin translators between domain types and infrastructure
//! representations. They contain no business logic.

pub mod memory;
pub mod persistence;
pub mod security;
