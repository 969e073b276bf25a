//! Repository modules implementing the store operations.
//!
//! Each module adds methods to `FixStore` via `impl FixStore` blocks, except
//! `credential`, which wraps the store as an identity provider.

pub mod credential;
pub mod incident;
pub mod user;
