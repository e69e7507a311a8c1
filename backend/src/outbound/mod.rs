//! Outbound adapters implementing domain ports for external infrastructure.
//!
//! - **persistence**: PostgreSQL-backed repositories using Diesel ORM
//! - **memory**: lock-guarded in-process repositories
//! - **security**: bcrypt password hashing and JWT bearer tokens
//! - **notifications**: tweet notification delivery
//!
//! Adapters are thin translators that convert between domain types and
//! infrastructure-specific representations. They contain no business logic.

pub mod memory;
pub mod notifications;
pub mod persistence;
pub mod security;
