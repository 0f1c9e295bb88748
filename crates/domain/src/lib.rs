//! # Informado Domain
//!
//! Shared types for the Trujillo Informado client.
//!
//! This crate contains:
//! - Session credential types and roles
//! - Report, task and page payloads
//! - Client configuration structures
//! - Error types and Result definitions
//! - Constants (storage keys, endpoint paths, navigation targets)
//!
//! ## Architecture
//! - No dependencies on other Informado crates
//! - Pure data types, no I/O

pub mod config;
pub mod constants;
pub mod errors;
pub mod macros;
pub mod types;

pub use config::*;
pub use errors::*;
pub use types::*;
