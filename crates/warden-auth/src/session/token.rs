//! Opaque session token generation.

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use rand::RngCore;
use rand::rngs::OsRng;

/// Raw entropy per token: 256 bits.
pub const TOKEN_BYTES: usize = 32;

/// Encoded length of a token (base64url, unpadded).
pub const TOKEN_LEN: usize = 43;

/// Generates a fresh token from the operating system CSPRNG.
pub fn generate_token() -> String {
    let mut bytes = [0u8; TOKEN_BYTES];
    OsRng.fill_bytes(&mut bytes);
    URL_SAFE_NO_PAD.encode(bytes)
}

/// Short prefix of a token, safe to put in logs.
pub fn fingerprint(token: &str) -> &str {
    token.get(..8).unwrap_or(token)
}
