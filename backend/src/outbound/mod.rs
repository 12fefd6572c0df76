//! Outbound adapters implementing domain ports for external infrastructure.
//!
//! - **persistence**: PostgreSQL-backed credential store using Diesel ORM
//! - **memory**: in-process credential store for development and tests
//! - **security**: Argon2id password hashing and HS256 bearer tokens
//!
//! Adapters are thin translators between domain types and infrastructure
//! representations. They contain no business logic.

pub mod memory;
pub mod persistence;
pub mod security;
