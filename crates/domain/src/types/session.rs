//! Session credential types
//!
//! A [`CredentialPair`] is the whole authentication state of one session:
//! either all three fields are stored or none are.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::constants::{CITIZEN_DASHBOARD, LOGIN_PAGE, SUPERVISOR_DASHBOARD, WORKER_DASHBOARD};

/// Access token, refresh token and role of an authenticated session.
///
/// Deserializes directly from the login response body
/// (`{accessToken, refreshToken, role}`). `role` is kept as the raw string the
/// backend sent so that it survives refreshes byte for byte.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CredentialPair {
    pub access_token: String,
    pub refresh_token: String,
    pub role: String,
}

impl CredentialPair {
    #[must_use]
    pub fn new(
        access_token: impl Into<String>,
        refresh_token: impl Into<String>,
        role: impl Into<String>,
    ) -> Self {
        Self {
            access_token: access_token.into(),
            refresh_token: refresh_token.into(),
            role: role.into(),
        }
    }

    /// Parsed role, if the stored string names a known one.
    #[must_use]
    pub fn parsed_role(&self) -> Option<Role> {
        self.role.parse().ok()
    }
}

// Tokens never show up in logs.
impl fmt::Debug for CredentialPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CredentialPair")
            .field("access_token", &"<redacted>")
            .field("refresh_token", &"<redacted>")
            .field("role", &self.role)
            .finish()
    }
}

/// Body returned by the refresh endpoint. The backend does not resend the role.
#[derive(Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
}

impl TokenPair {
    /// Combine with the role stored before the refresh.
    #[must_use]
    pub fn with_role(self, role: impl Into<String>) -> CredentialPair {
        CredentialPair {
            access_token: self.access_token,
            refresh_token: self.refresh_token,
            role: role.into(),
        }
    }
}

impl fmt::Debug for TokenPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenPair").finish_non_exhaustive()
    }
}

/// Coarse authorization category attached to a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    Citizen,
    Supervisor,
    Worker,
}

crate::impl_wire_enum_conversions!(Role {
    Citizen => "CIUDADANO" | "CITIZEN",
    Supervisor => "SUPERVISOR",
    Worker => "TRABAJADOR" | "WORKER",
});

impl Role {
    /// Landing page for this role.
    #[must_use]
    pub const fn dashboard(self) -> &'static str {
        match self {
            Self::Citizen => CITIZEN_DASHBOARD,
            Self::Supervisor => SUPERVISOR_DASHBOARD,
            Self::Worker => WORKER_DASHBOARD,
        }
    }

    /// Landing page for a raw role string; unknown roles go back to login.
    #[must_use]
    pub fn dashboard_for(raw: &str) -> &'static str {
        raw.parse::<Self>().map_or(LOGIN_PAGE, Self::dashboard)
    }
}

/// Where the client should go after a session state change
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Destination {
    /// Unauthenticated state.
    Login,
    /// Home of an authenticated role.
    Dashboard(Role),
}

impl Destination {
    /// Destination for a raw role string.
    #[must_use]
    pub fn for_role(raw: &str) -> Self {
        raw.parse::<Role>().map_or(Self::Login, Self::Dashboard)
    }

    #[must_use]
    pub const fn page(self) -> &'static str {
        match self {
            Self::Login => LOGIN_PAGE,
            Self::Dashboard(role) => role.dashboard(),
        }
    }
}

impl fmt::Display for Destination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.page())
    }
}
