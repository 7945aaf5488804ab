//! Authenticator-data builder (§4.3): the raw (non-CBOR) byte layout
//! `rpIdHash(32) || flags(1) || signCount(4, BE) || [attestedCredentialData]`.

use modular_bitfield::{bitfield, specifiers::B1};
use tracing::trace;

use crate::crypto::sha256;

/// The flags byte. Bit order follows §4.3 exactly: UP is the LSB, ED is the
/// MSB, with two reserved-for-future-use bits (1 and 5) kept zero.
#[bitfield]
#[derive(Clone, Copy, Debug, Default)]
pub struct AuthDataFlags {
    pub user_present: bool,
    rfu1: B1,
    pub user_verified: bool,
    pub backup_eligible: bool,
    pub backup_state: bool,
    rfu2: B1,
    pub attested_credential_data: bool,
    pub extension_data: bool,
}

impl AuthDataFlags {
    pub fn to_byte(self) -> u8 {
        self.into_bytes()[0]
    }
}

/// `AAGUID(16) || credIdLen(2, BE) || credId || COSE_Key`, appended only
/// when the AT flag is set.
pub struct AttestedCredentialData {
    pub aaguid: [u8; 16],
    pub credential_id: Vec<u8>,
    /// Already-encoded canonical CBOR COSE_Key bytes (§4.2).
    pub cose_key: Vec<u8>,
}

impl AttestedCredentialData {
    fn encoded_len(&self) -> usize {
        16 + 2 + self.credential_id.len() + self.cose_key.len()
    }

    fn write_into(&self, out: &mut Vec<u8>) {
        out.extend_from_slice(&self.aaguid);
        out.extend_from_slice(&(self.credential_id.len() as u16).to_be_bytes());
        out.extend_from_slice(&self.credential_id);
        out.extend_from_slice(&self.cose_key);
    }
}

/// Assembles the authenticator-data blob. `extensions`, when present, is
/// appended verbatim as already-encoded CBOR bytes; this authenticator never
/// emits extensions (ED is always 0), so the parameter exists for
/// completeness rather than any call site actually using it.
pub fn build_auth_data(
    rp_id: &str,
    flags: AuthDataFlags,
    counter: u32,
    attested: Option<&AttestedCredentialData>,
    extensions: Option<&[u8]>,
) -> Vec<u8> {
    let rp_id_hash = sha256(rp_id.as_bytes());
    let attested_len = attested.map(AttestedCredentialData::encoded_len).unwrap_or(0);
    let extensions_len = extensions.map(|e| e.len()).unwrap_or(0);

    let mut out = Vec::with_capacity(37 + attested_len + extensions_len);
    out.extend_from_slice(&rp_id_hash);
    out.push(flags.to_byte());
    out.extend_from_slice(&counter.to_be_bytes());
    if let Some(attested) = attested {
        attested.write_into(&mut out);
    }
    if let Some(extensions) = extensions {
        out.extend_from_slice(extensions);
    }
    trace!("authData bytes: {}", hex::encode(&out));
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn registration_flags_set_up_be_bs_at() {
        let flags = AuthDataFlags::new()
            .with_user_present(true)
            .with_backup_eligible(true)
            .with_backup_state(true)
            .with_attested_credential_data(true);
        // bit0 | bit3 | bit4 | bit6 = 0b0101_1001
        assert_eq!(flags.to_byte(), 0b0101_1001);
    }

    #[test]
    fn assertion_without_attested_data_is_exactly_37_bytes() {
        let flags = AuthDataFlags::new()
            .with_user_present(true)
            .with_backup_eligible(true)
            .with_backup_state(true);
        let data = build_auth_data("example.com", flags, 6, None, None);
        assert_eq!(data.len(), 37);
        assert_eq!(&data[32..36], &6u32.to_be_bytes());
    }

    #[test]
    fn rp_id_hash_prefix_matches_sha256_of_utf8_rp_id() {
        let flags = AuthDataFlags::new();
        let data = build_auth_data("example.com", flags, 0, None, None);
        assert_eq!(&data[..32], &sha256(b"example.com"));
    }

    #[test]
    fn zero_counter_serializes_as_four_zero_bytes() {
        let flags = AuthDataFlags::new();
        let data = build_auth_data("example.com", flags, 0, None, None);
        assert_eq!(&data[32..36], &[0, 0, 0, 0]);
    }

    #[test]
    fn attested_credential_data_is_appended_when_present() {
        let flags = AuthDataFlags::new().with_attested_credential_data(true);
        let attested = AttestedCredentialData {
            aaguid: [7; 16],
            credential_id: vec![1, 2, 3, 4],
            cose_key: vec![9; 20],
        };
        let data = build_auth_data("example.com", flags, 0, Some(&attested), None);
        assert_eq!(data.len(), 37 + 16 + 2 + 4 + 20);
        assert_eq!(&data[37..53], &[7u8; 16]);
        assert_eq!(&data[53..55], &4u16.to_be_bytes());
        assert_eq!(&data[55..59], &[1, 2, 3, 4]);
        assert_eq!(&data[59..79], &[9u8; 20]);
    }
}
