//! # Informado Core
//!
//! Session logic for the Trujillo Informado client - no infrastructure
//! dependencies.
//!
//! This crate contains:
//! - Port interfaces (traits) for token storage, the auth backend and
//!   navigation
//! - The session service: login, logout, single-flight token refresh,
//!   role checks
//! - Unverified JWT claim decoding for the current-user view
//!
//! ## Architecture Principles
//! - Only depends on `informado-domain`
//! - No HTTP, file or keychain code
//! - All external dependencies via traits

pub mod session;

pub use session::{
    AccessDecision, AuthApi, AuthApiError, LoginError, RefreshOutcome, SessionNavigator,
    SessionService, TokenStore,
};
