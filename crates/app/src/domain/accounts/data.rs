//! Account input data.

use rand::{RngCore, rngs::OsRng};
use zeroize::Zeroizing;

use crate::domain::accounts::records::AccountUuid;

/// Data required to create an account.
///
/// `database_name`, `storage_id` and the API key are minted by the
/// service, not supplied by the caller.
#[derive(Debug, Clone)]
pub struct NewAccount {
    pub uuid: AccountUuid,
    pub billing_name: String,
    pub billing_email: Option<String>,
    pub billing_phone: Option<String>,
    pub billing_address: Option<String>,
    pub billing_country: Option<String>,
    pub billing_tax_id: Option<String>,
    pub billing_notes: Option<String>,
    pub contact_email: Option<String>,
    pub contact_phone: Option<String>,
    pub max_entities: i32,
}

/// Full-replace update for an account.
///
/// `database_name` is not updatable: renaming the billing name never
/// re-derives the slug.
#[derive(Debug, Clone)]
pub struct AccountUpdate {
    pub billing_name: String,
    pub billing_email: Option<String>,
    pub billing_phone: Option<String>,
    pub billing_address: Option<String>,
    pub billing_country: Option<String>,
    pub billing_tax_id: Option<String>,
    pub billing_notes: Option<String>,
    pub contact_email: Option<String>,
    pub contact_phone: Option<String>,
    pub max_entities: i32,
    pub is_active: bool,
}

/// Derives the `database_name` slug from a billing name.
///
/// Lowercases, collapses every run of non-alphanumeric characters into a
/// single underscore, trims leading/trailing underscores, and prefixes
/// `db_`. `"Acme Corp"` becomes `db_acme_corp`.
#[must_use]
pub fn database_name_slug(billing_name: &str) -> String {
    let mut slug = String::with_capacity(billing_name.len() + 3);
    slug.push_str("db_");

    let mut pending_separator = false;

    for ch in billing_name.chars() {
        if ch.is_ascii_alphanumeric() {
            if pending_separator && slug.len() > 3 {
                slug.push('_');
            }
            pending_separator = false;
            slug.push(ch.to_ascii_lowercase());
        } else {
            pending_separator = true;
        }
    }

    slug
}

/// Mints a new raw API key: 32 random bytes, lowercase hex. The raw key
/// is secret material and lives in zeroed-on-drop memory.
#[must_use]
pub fn generate_api_key() -> Zeroizing<String> {
    Zeroizing::new(random_hex(32))
}

/// Mints an opaque storage identifier for an account.
#[must_use]
pub fn generate_account_storage_id() -> String {
    format!("acc_{}", random_hex(8))
}

fn random_hex(bytes: usize) -> String {
    let mut buf = vec![0u8; bytes];
    OsRng.fill_bytes(&mut buf);
    buf.iter().fold(
        String::with_capacity(bytes * 2),
        |mut out, byte| {
            use std::fmt::Write;
            let _ = write!(out, "{byte:02x}");
            out
        },
    )
}
