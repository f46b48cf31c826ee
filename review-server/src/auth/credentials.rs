//! HTTP Basic credentials

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use sha2::{Digest, Sha256};

use crate::core::AdminCredentials;

/// Decode `Authorization: Basic base64(user:pass)`
pub fn parse_basic(header: &str) -> Option<(String, String)> {
    let (scheme, encoded) = header.trim().split_once(' ')?;
    if !scheme.eq_ignore_ascii_case("basic") {
        return None;
    }
    let decoded = STANDARD.decode(encoded.trim()).ok()?;
    let decoded = String::from_utf8(decoded).ok()?;
    let (user, pass) = decoded.split_once(':')?;
    Some((user.to_string(), pass.to_string()))
}

/// Compare fixed-size digests without short-circuiting
fn digest_eq(a: &str, b: &str) -> bool {
    let a = Sha256::digest(a.as_bytes());
    let b = Sha256::digest(b.as_bytes());
    a.iter().zip(b.iter()).fold(0u8, |acc, (x, y)| acc | (x ^ y)) == 0
}

/// Check a username/password pair against the configured admin
pub fn verify(expected: &AdminCredentials, username: &str, password: &str) -> bool {
    let user_ok = digest_eq(username, &expected.username);
    let pass_ok = digest_eq(password, &expected.password);
    user_ok & pass_ok
}
