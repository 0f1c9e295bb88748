//! Current user view
//!
//! Built from the access token's claims when it is a JWT, otherwise from the
//! stored role alone.

use serde::{Deserialize, Serialize};

/// Identity of the signed-in user as far as the client can tell
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CurrentUser {
    pub id: Option<String>,
    pub name: Option<String>,
    pub phone: Option<String>,
    /// `sub` claim
    pub email: Option<String>,
    pub role: Option<String>,
    /// Full decoded payload, when the token was a JWT
    #[serde(skip_serializing_if = "Option::is_none")]
    pub raw: Option<serde_json::Value>,
}

impl CurrentUser {
    /// User known only by the stored role.
    #[must_use]
    pub fn from_role(role: Option<String>) -> Self {
        Self { role, ..Self::default() }
    }
}
