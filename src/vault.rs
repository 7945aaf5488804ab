//! The stored FIDO2 credential shape (§3): the subset of a vault entry's
//! data this crate reads and writes. Field names and the base64url-encoded
//! key/user-handle convention mirror the passkey export format in the
//! credential-exchange corpus this module was grounded on, adapted to the
//! single ES256/P-256 shape this authenticator ever produces.

use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::model::CredentialId;

pub const KEY_TYPE: &str = "public-key";
pub const KEY_ALGORITHM: &str = "ECDSA";
pub const KEY_CURVE: &str = "P-256";

/// A FIDO2 credential as persisted inside one vault entry.
///
/// Invariant (§3): `counter == 0` is a sentinel for "counter disabled" and
/// must never be incremented; see [`StoredCredential::bump_counter`].
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredCredential {
    pub credential_id: String,
    pub key_type: String,
    pub key_algorithm: String,
    pub key_curve: String,
    /// base64url(PKCS#8 private key document).
    pub key_value: String,
    pub rp_id: String,
    pub rp_name: String,
    /// base64url(user.id).
    pub user_handle: String,
    pub user_name: String,
    pub user_display_name: String,
    pub counter: u32,
    pub discoverable: bool,
    pub creation_date: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_used_date: Option<DateTime<Utc>>,
}

impl StoredCredential {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        credential_id: CredentialId,
        pkcs8_der: &[u8],
        rp_id: String,
        rp_name: String,
        user_handle: &[u8],
        user_name: String,
        user_display_name: String,
        discoverable: bool,
        creation_date: DateTime<Utc>,
    ) -> Self {
        Self {
            credential_id: credential_id.to_canonical_text(),
            key_type: KEY_TYPE.to_owned(),
            key_algorithm: KEY_ALGORITHM.to_owned(),
            key_curve: KEY_CURVE.to_owned(),
            key_value: URL_SAFE_NO_PAD.encode(pkcs8_der),
            rp_id,
            rp_name,
            user_handle: URL_SAFE_NO_PAD.encode(user_handle),
            user_name,
            user_display_name,
            counter: 0,
            discoverable,
            creation_date,
            last_used_date: None,
        }
    }

    pub fn credential_id(&self) -> Result<CredentialId, crate::model::InvalidCredentialId> {
        CredentialId::from_canonical_text(&self.credential_id)
    }

    pub fn pkcs8_der(&self) -> Result<Vec<u8>, base64::DecodeError> {
        URL_SAFE_NO_PAD.decode(&self.key_value)
    }

    pub fn user_handle_bytes(&self) -> Result<Vec<u8>, base64::DecodeError> {
        URL_SAFE_NO_PAD.decode(&self.user_handle)
    }

    /// Increments `counter` unless it's the disabled sentinel, and records
    /// `used_at` as the new `lastUsedDate`. No-op on the counter when
    /// disabled, per §3's invariant — callers must still persist the
    /// updated `lastUsedDate` either way.
    pub fn bump_counter(&mut self, used_at: DateTime<Utc>) {
        if self.counter != 0 {
            self.counter += 1;
        }
        self.last_used_date = Some(used_at);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> StoredCredential {
        StoredCredential::new(
            CredentialId::generate(),
            b"pkcs8-bytes",
            "example.com".to_owned(),
            "Example".to_owned(),
            b"user-handle-bytes",
            "alice".to_owned(),
            "Alice".to_owned(),
            true,
            Utc::now(),
        )
    }

    #[test]
    fn new_credential_starts_with_disabled_counter_and_no_last_used_date() {
        let credential = sample();
        assert_eq!(credential.counter, 0);
        assert!(credential.last_used_date.is_none());
    }

    #[test]
    fn bump_counter_leaves_disabled_sentinel_at_zero() {
        let mut credential = sample();
        let now = Utc::now();
        credential.bump_counter(now);
        assert_eq!(credential.counter, 0);
        assert_eq!(credential.last_used_date, Some(now));
    }

    #[test]
    fn bump_counter_increments_when_enabled() {
        let mut credential = sample();
        credential.counter = 5;
        credential.bump_counter(Utc::now());
        assert_eq!(credential.counter, 6);
    }

    #[test]
    fn key_value_and_user_handle_round_trip_through_base64url() {
        let credential = sample();
        assert_eq!(credential.pkcs8_der().unwrap(), b"pkcs8-bytes");
        assert_eq!(credential.user_handle_bytes().unwrap(), b"user-handle-bytes");
    }
}
