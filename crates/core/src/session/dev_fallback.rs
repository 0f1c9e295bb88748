//! Local development login fallback
//!
//! Lets UI work proceed without a backend: when login against a local
//! backend fails at the transport level, a handful of fixed users get a
//! synthetic session. Callers must only enable this for local backends.

use informado_domain::{CredentialPair, Role};

pub const DEV_ACCESS_TOKEN: &str = "dev-access-token";
pub const DEV_REFRESH_TOKEN: &str = "dev-refresh-token";
pub const DEV_PASSWORD: &str = "pass";

const DEV_USERS: [(&str, Role); 3] = [
    ("ciudadano", Role::Citizen),
    ("supervisor", Role::Supervisor),
    ("trabajador", Role::Worker),
];

/// Synthetic credentials for a development user, if `email` names one.
///
/// Accepts both `supervisor` and `supervisor@anything`.
#[must_use]
pub fn dev_credentials(email: &str, password: &str) -> Option<CredentialPair> {
    if password != DEV_PASSWORD {
        return None;
    }

    let local_part = email.split_once('@').map_or(email, |(local, _)| local);
    let lookup = if local_part.is_empty() { email } else { local_part };

    DEV_USERS.iter().find(|(name, _)| *name == lookup).map(|(_, role)| {
        CredentialPair::new(DEV_ACCESS_TOKEN, DEV_REFRESH_TOKEN, role.as_wire_str())
    })
}
