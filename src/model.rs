//! Data model shared between the client and authenticator layers.
//!
//! Mirrors the WebAuthn dictionaries these types are named after; see
//! <https://w3c.github.io/webauthn/#sctn-credentialdescriptor> and neighbours.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Identifies a cryptographic algorithm by its COSE algorithm number.
///
/// [See more](https://w3c.github.io/webauthn/#typedefdef-cosealgorithmidentifier)
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct COSEAlgorithmIdentifier(pub i32);

/// Identifies the relying party (RP) of a credential.
///
/// [See more](https://w3c.github.io/webauthn/#rp-id)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RpId(pub String);

impl RpId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// `{ id, name }` — identifies the RP during `MakeCredential`.
///
/// [See more](https://w3c.github.io/webauthn/#dictdef-publickeycredentialrpentity)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RpEntity {
    pub id: RpId,
    pub name: String,
}

/// Identifies a user's account within a particular RP. Must be 1..=64 bytes.
///
/// [See more](https://w3c.github.io/webauthn/#dom-publickeycredentialuserentity-id)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserHandle(#[serde(with = "serde_bytes")] pub Vec<u8>);

impl UserHandle {
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }
}

/// `{ id, name, displayName }`.
///
/// [See more](https://w3c.github.io/webauthn/#dictdef-publickeycredentialuserentity)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserEntity {
    pub id: UserHandle,
    pub name: String,
    pub display_name: String,
}

/// `{ type: "public-key", alg }`. Only `alg == -7` (ES256) is ever accepted
/// for key generation by this authenticator (§1 Non-goals).
///
/// [See more](https://w3c.github.io/webauthn/#dictdef-publickeycredentialparameters)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PublicKeyCredentialParameters {
    #[serde(rename = "type")]
    pub credential_type: PublicKeyCredentialType,
    pub alg: COSEAlgorithmIdentifier,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PublicKeyCredentialType {
    #[serde(rename = "public-key")]
    PublicKey,
}

/// A fresh random credential id, stored as the canonical text form of a
/// UUID; the raw form used on the wire is the 16-byte big-endian UUID.
///
/// [See more](https://w3c.github.io/webauthn/#credential-id)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CredentialId(Uuid);

#[derive(Debug, thiserror::Error)]
#[error("credential id must decode to a 16-byte UUID: {0}")]
pub struct InvalidCredentialId(#[from] uuid::Error);

impl CredentialId {
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }

    /// Decodes a raw 16-byte big-endian credential id as received on a
    /// `PublicKeyCredentialDescriptor`.
    pub fn from_raw(bytes: &[u8]) -> Result<Self, InvalidCredentialId> {
        let uuid = Uuid::from_slice(bytes)?;
        Ok(Self(uuid))
    }

    pub fn as_raw(&self) -> [u8; 16] {
        *self.0.as_bytes()
    }

    /// Canonical textual UUID, the form persisted as `credentialId` on the
    /// stored credential (§3).
    pub fn to_canonical_text(self) -> String {
        self.0.to_string()
    }

    pub fn from_canonical_text(text: &str) -> Result<Self, InvalidCredentialId> {
        Ok(Self(Uuid::parse_str(text)?))
    }
}

/// `{ type: "public-key", id, transports? }`.
///
/// [See more](https://w3c.github.io/webauthn/#dictdef-publickeycredentialdescriptor)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PublicKeyCredentialDescriptor {
    #[serde(rename = "type")]
    pub credential_type: PublicKeyCredentialType,
    #[serde(with = "serde_bytes")]
    pub id: Vec<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transports: Option<Vec<String>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn credential_id_round_trips_raw_to_text_to_raw() {
        let id = CredentialId::generate();
        let raw = id.as_raw();
        let text = id.to_canonical_text();
        let parsed_from_text = CredentialId::from_canonical_text(&text).unwrap();
        let parsed_from_raw = CredentialId::from_raw(&raw).unwrap();
        assert_eq!(parsed_from_text.as_raw(), raw);
        assert_eq!(parsed_from_raw.as_raw(), raw);
        assert_eq!(parsed_from_text, parsed_from_raw);
    }

    #[test]
    fn credential_id_rejects_wrong_length() {
        assert!(CredentialId::from_raw(&[1, 2, 3]).is_err());
    }
}
