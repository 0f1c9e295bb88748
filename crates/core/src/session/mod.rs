//! Session management
//!
//! Ports for credential storage, backend authentication and navigation, plus
//! the service that drives login, logout and token refresh over them.

pub mod claims;
pub mod dev_fallback;
pub mod errors;
pub mod ports;
pub mod service;

pub use errors::{AuthApiError, LoginError};
pub use ports::{AuthApi, SessionNavigator, TokenStore};
pub use service::{AccessDecision, RefreshOutcome, SessionService};
