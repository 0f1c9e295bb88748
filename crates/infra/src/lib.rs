//! # Informado Infrastructure
//!
//! Infrastructure implementations of the session ports.
//!
//! This crate contains:
//! - The HTTP client and the authenticated request gateway
//! - Backend auth and report endpoints
//! - Token stores (memory, JSON file, platform keychain)
//! - Configuration loading
//!
//! ## Architecture
//! - Implements traits defined in `informado-core`
//! - Contains all "impure" code (network, filesystem, keychain)

pub mod api;
pub mod config;
pub mod errors;
pub mod http;
pub mod storage;

// Re-export commonly used items
pub use api::{ApiError, ApiResponse, AuthGateway, GatewayError, HttpAuthApi, ReportsApi};
pub use http::HttpClient;
pub use storage::{open_store, FileTokenStore, KeychainTokenStore, MemoryTokenStore};
