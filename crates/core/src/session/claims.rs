//! Unverified JWT payload decoding
//!
//! The client only reads claims for display purposes; signature checks are
//! the backend's job.

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine as _;
use informado_domain::CurrentUser;
use serde_json::Value;
use tracing::debug;

/// Decode the payload segment of a JWT into JSON.
///
/// Returns `None` for anything that is not a three-part token with a
/// base64url-encoded JSON object in the middle.
#[must_use]
pub fn decode_payload(token: &str) -> Option<Value> {
    let mut segments = token.split('.');
    let payload = match (segments.next(), segments.next(), segments.next()) {
        (Some(_), Some(payload), Some(_)) if !payload.is_empty() => payload,
        _ => return None,
    };

    let bytes = match URL_SAFE_NO_PAD.decode(payload.trim_end_matches('=')) {
        Ok(bytes) => bytes,
        Err(err) => {
            debug!(error = %err, "access token payload is not base64url");
            return None;
        }
    };

    match serde_json::from_slice::<Value>(&bytes) {
        Ok(value) if value.is_object() => Some(value),
        Ok(_) => None,
        Err(err) => {
            debug!(error = %err, "access token payload is not JSON");
            None
        }
    }
}

/// Build the current user from an access token, falling back to the stored
/// role when the token carries no readable claims.
#[must_use]
pub fn current_user(access_token: Option<&str>, stored_role: Option<String>) -> CurrentUser {
    let Some(claims) = access_token.and_then(decode_payload) else {
        return CurrentUser::from_role(stored_role);
    };

    CurrentUser {
        id: claim_string(&claims, "id"),
        name: claim_string(&claims, "name"),
        phone: claim_string(&claims, "phone"),
        email: claim_string(&claims, "sub"),
        role: claim_string(&claims, "role").or(stored_role),
        raw: Some(claims),
    }
}

// Numeric ids are common in the backend's tokens.
fn claim_string(claims: &Value, key: &str) -> Option<String> {
    match claims.get(key)? {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}
