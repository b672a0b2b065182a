//! Token and activation-code generation.

use rand::{RngCore, rngs::OsRng};

/// Lifetime of a provisioning token.
pub const TOKEN_TTL_HOURS: i64 = 24;

/// Derives the 4-character prefix of an activation code from an entity
/// name: keep alphanumerics, uppercase, take the first four, pad with
/// `X`. `"Sab-5"` gives `SAB5`, `"Go"` gives `GOXX`.
#[must_use]
pub fn activation_prefix(entity_name: &str) -> String {
    let mut prefix: String = entity_name
        .chars()
        .filter(char::is_ascii_alphanumeric)
        .map(|c| c.to_ascii_uppercase())
        .take(4)
        .collect();

    while prefix.len() < 4 {
        prefix.push('X');
    }

    prefix
}

/// Builds a full activation code: the entity prefix plus three random
/// four-character hex groups, `PREFIX-A1B2-C3D4-E5F6`.
#[must_use]
pub fn generate_activation_code(entity_name: &str) -> String {
    let mut code = activation_prefix(entity_name);

    let mut buf = [0u8; 2];
    for _ in 0..3 {
        OsRng.fill_bytes(&mut buf);
        code.push('-');
        for byte in buf {
            use std::fmt::Write;
            let _ = write!(code, "{byte:02X}");
        }
    }

    code
}

/// Mints the opaque token itself: 32 random bytes, lowercase hex.
#[must_use]
pub fn generate_provisioning_token() -> String {
    let mut buf = [0u8; 32];
    OsRng.fill_bytes(&mut buf);

    let mut out = String::with_capacity(64);
    for byte in buf {
        use std::fmt::Write;
        let _ = write!(out, "{byte:02x}");
    }
    out
}

/// The deep link a device opens to configure itself.
#[must_use]
pub fn deep_link(token: &str) -> String {
    format!("appcontrol://configure?token={token}")
}
