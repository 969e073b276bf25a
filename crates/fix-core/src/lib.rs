//! # fix-core
//!
//! Core types, ID generation, and error types for FixPoint.
//!
//! This crate provides the foundational types shared across all FixPoint crates:
//! - Entity structs for incidents and users
//! - Status and role enums with their storage and legacy representations
//! - ID prefix constants and formatting helpers
//! - Cross-cutting error types
//! - Repository traits implemented by every backing store
//! - Aggregate response types for the dashboards
//! - Legacy document mapping for the original collection field names

pub mod entities;
pub mod enums;
pub mod errors;
pub mod identity;
pub mod ids;
pub mod legacy;
pub mod repository;
pub mod responses;
