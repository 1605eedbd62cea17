use base64::Engine as _;
use chrono::{DateTime, Utc};
use serde_json::{Map, Value};

use super::state::UserInfo;

/// Identity used when a token carries none of the identity claims, or when
/// the token cannot be decoded at all.
pub const UNKNOWN_IDENTITY: &str = "unknown";

/// Identity claims in priority order; the first non-empty one wins.
const IDENTITY_CLAIMS: [&str; 4] = ["upn", "unique_name", "email", "sub"];

/// Identity facts read from the payload of a compact signed token.
///
/// The signature is never checked. These claims only feed `whoami`-style
/// displays and the persisted [`UserInfo`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenClaims {
    /// Resolved from `upn`, `unique_name`, `email`, then `sub`.
    pub user_id: String,
    /// `name` claim, or `user_id` when absent.
    pub display_name: String,
    /// `tid` claim.
    pub tenant_id: Option<String>,
    /// `tenant_name` claim.
    pub tenant_name: Option<String>,
    /// `oid` claim.
    pub object_id: Option<String>,
    /// `roles` claim; empty when absent.
    pub roles: Vec<String>,
    /// `exp` claim.
    pub expires_at: Option<DateTime<Utc>>,
}

impl TokenClaims {
    /// Decode the payload segment of `token` and map its claims.
    ///
    /// Returns `None` for anything that is not a three-segment token with a
    /// base64url JSON object payload. Never panics on arbitrary input.
    pub fn from_token(token: &str) -> Option<Self> {
        match decode_payload(token) {
            Ok(payload) => Some(Self::from_payload(&payload)),
            Err(reason) => {
                tracing::warn!(%reason, "could not read claims from token");
                None
            }
        }
    }

    /// Map an already-decoded claim set.
    pub fn from_payload(claims: &Map<String, Value>) -> Self {
        let user_id = IDENTITY_CLAIMS
            .iter()
            .find_map(|key| string_claim(claims, key))
            .unwrap_or_else(|| UNKNOWN_IDENTITY.to_string());
        let display_name = string_claim(claims, "name").unwrap_or_else(|| user_id.clone());

        let roles = claims
            .get("roles")
            .and_then(Value::as_array)
            .map(|roles| {
                roles
                    .iter()
                    .filter_map(Value::as_str)
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default();

        let expires_at = claims
            .get("exp")
            .and_then(Value::as_i64)
            .and_then(|secs| DateTime::from_timestamp(secs, 0));

        Self {
            user_id,
            display_name,
            tenant_id: string_claim(claims, "tid"),
            tenant_name: string_claim(claims, "tenant_name"),
            object_id: string_claim(claims, "oid"),
            roles,
            expires_at,
        }
    }

    /// Fallback identity for tokens that could not be decoded.
    pub fn placeholder() -> Self {
        Self::from_payload(&Map::new())
    }

    /// Convert into the persisted identity record.
    pub fn to_user_info(&self) -> UserInfo {
        UserInfo {
            user_id: self.user_id.clone(),
            display_name: self.display_name.clone(),
            tenant_id: self.tenant_id.clone(),
            tenant_name: self.tenant_name.clone(),
            object_id: self.object_id.clone(),
            roles: self.roles.clone(),
        }
    }
}

/// Build an unsigned three-segment token around `claims`.
///
/// Used by the demo provider so fabricated logins go through the same
/// extraction path as real ones.
pub fn unsigned_token(claims: &Value) -> String {
    let engine = base64::engine::general_purpose::URL_SAFE_NO_PAD;
    let header = engine.encode(r#"{"alg":"none","typ":"JWT"}"#);
    let payload = engine.encode(claims.to_string());
    let signature = engine.encode("unsigned");
    format!("{header}.{payload}.{signature}")
}

fn decode_payload(token: &str) -> Result<Map<String, Value>, String> {
    let segments: Vec<&str> = token.split('.').collect();
    if segments.len() != 3 {
        return Err(format!("expected 3 segments, found {}", segments.len()));
    }

    let mut payload = segments[1].to_string();
    while payload.len() % 4 != 0 {
        payload.push('=');
    }

    let bytes = base64::engine::general_purpose::URL_SAFE
        .decode(payload.as_bytes())
        .map_err(|e| format!("base64 decode failed: {e}"))?;
    let value: Value =
        serde_json::from_slice(&bytes).map_err(|e| format!("JSON parse failed: {e}"))?;
    match value {
        Value::Object(map) => Ok(map),
        _ => Err("payload is not a JSON object".into()),
    }
}

fn string_claim(claims: &Map<String, Value>, key: &str) -> Option<String> {
    claims
        .get(key)
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}
