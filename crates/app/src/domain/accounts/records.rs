//! Account Records

use jiff::Timestamp;
use zeroize::Zeroizing;

use crate::uuids::TypedUuid;

/// Account UUID
pub type AccountUuid = TypedUuid<AccountRecord>;

/// Account Record
///
/// The stored API key is deliberately absent: raw keys are returned
/// exactly once, at creation or rotation time.
#[derive(Debug, Clone)]
pub struct AccountRecord {
    /// Unique account identifier.
    pub uuid: AccountUuid,

    /// Legal name used on invoices. Also the source of `database_name`.
    pub billing_name: String,

    pub billing_email: Option<String>,
    pub billing_phone: Option<String>,
    pub billing_address: Option<String>,
    pub billing_country: Option<String>,
    pub billing_tax_id: Option<String>,
    pub billing_notes: Option<String>,

    /// Operational contact, distinct from billing.
    pub contact_email: Option<String>,
    pub contact_phone: Option<String>,

    /// Stable slug derived from the billing name at creation time.
    /// Never re-derived on rename.
    pub database_name: String,

    /// Opaque identifier used to build object-storage paths.
    pub storage_id: String,

    /// Inactive accounts fail credential resolution for all their users.
    pub is_active: bool,

    /// Quota enforced when entities are created under this account.
    pub max_entities: i32,

    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// An account plus the raw API key minted for it.
///
/// Only `create_account` and `rotate_api_key` produce raw keys.
#[derive(Debug, Clone)]
pub struct CreatedAccount {
    pub account: AccountRecord,
    pub api_key: Zeroizing<String>,
}
