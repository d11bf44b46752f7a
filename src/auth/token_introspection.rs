use chrono::Utc;
use log::warn;

/// Decode the payload claims of a JWT without verifying the signature.
///
/// Client-side decoding only, for display fallbacks and diagnostics.
/// Authorization decisions always come from the backend.
pub fn decode_claims(token: &str) -> Option<serde_json::Value> {
    let parts: Vec<&str> = token.split('.').collect();
    if parts.len() != 3 {
        warn!("Invalid JWT format: expected 3 parts");
        return None;
    }

    let payload = parts[1];

    // Decode base64url
    let decoded = match base64_url_decode(payload) {
        Ok(d) => d,
        Err(e) => {
            warn!("Failed to decode JWT payload: {}", e);
            return None;
        }
    };

    // Parse JSON
    match serde_json::from_slice(&decoded) {
        Ok(j) => Some(j),
        Err(e) => {
            warn!("Failed to parse JWT payload JSON: {}", e);
            None
        }
    }
}

/// Decode the exp (expiration) claim from a JWT token
/// Returns the expiration timestamp in seconds since Unix epoch
pub fn decode_exp(token: &str) -> Option<i64> {
    decode_claims(token)?.get("exp")?.as_i64()
}

/// Whether a token's exp claim lies in the past.
///
/// Undecodable tokens and tokens without a numeric exp count as expired.
pub fn is_token_expired(token: &str) -> bool {
    match decode_exp(token) {
        Some(exp) => exp * 1000 < Utc::now().timestamp_millis(),
        None => true,
    }
}

/// Calculate seconds until token expiry
/// Returns None if token is invalid or already expired
pub fn seconds_until_expiry(token: &str) -> Option<i64> {
    let exp = decode_exp(token)?;
    let now = Utc::now().timestamp();
    let seconds = exp - now;

    if seconds <= 0 { None } else { Some(seconds) }
}

/// Decode base64url string (JWT uses base64url, not standard base64)
fn base64_url_decode(input: &str) -> Result<Vec<u8>, String> {
    use base64::{Engine as _, engine::general_purpose::URL_SAFE_NO_PAD};

    URL_SAFE_NO_PAD
        .decode(input)
        .map_err(|e| format!("Base64 decode error: {}", e))
}
