//! Structural token decoding for the gateway edge.
//!
//! Nothing here checks a signature. A token that decodes is only known to be
//! well-formed; whether it is genuine is decided by the auth service.

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use chrono::Utc;

use crate::claims::Claims;

/// Reads the payload of a three-segment token.
///
/// Returns `None` when the token does not have exactly three segments, the
/// payload is not base64url, or the payload is not a claims object.
pub fn decode(token: &str) -> Option<Claims> {
    let mut segments = token.split('.');
    let (Some(_header), Some(payload), Some(_signature), None) = (
        segments.next(),
        segments.next(),
        segments.next(),
        segments.next(),
    ) else {
        return None;
    };

    let bytes = URL_SAFE_NO_PAD
        .decode(payload.trim_end_matches('='))
        .ok()?;
    serde_json::from_slice(&bytes).ok()
}

/// Whether `token` is expired at the current wall-clock second.
pub fn is_expired(token: &str) -> bool {
    is_expired_at(token, Utc::now().timestamp())
}

/// Whether `token` is expired at `now` (Unix seconds).
///
/// Undecodable tokens and tokens without `exp` are expired. A token whose
/// `exp` equals `now` is still valid.
pub fn is_expired_at(token: &str, now: i64) -> bool {
    match decode(token).and_then(|claims| claims.exp) {
        Some(exp) => exp < now,
        None => true,
    }
}
