//! The small set of fixed constants the core owns.
//!
//! This crate reads no environment variables and owns no on-disk files; the
//! embedding application is expected to build one [`Config`] at startup and
//! share it between the [`crate::client::Client`] and
//! [`crate::authenticator::Authenticator`] it constructs.

use crate::model::COSEAlgorithmIdentifier;

/// The only signature algorithm this authenticator ever generates keys for.
pub const ES256: COSEAlgorithmIdentifier = COSEAlgorithmIdentifier(-7);

/// `RS256`, kept only so the default `pubKeyCredParams` list in
/// [`crate::client::create_credential`] matches what browsers send: a caller
/// that did not specify any algorithm gets ES256 and RS256 offered, and this
/// authenticator accepts whichever of the two is ES256.
pub const RS256: COSEAlgorithmIdentifier = COSEAlgorithmIdentifier(-257);

/// 16-byte authenticator model identifier embedded in attested credential data.
pub const AAGUID: [u8; 16] = [
    0xd5, 0x48, 0x82, 0x6e, 0x79, 0xb4, 0xdb, 0x40, 0xa3, 0xd8, 0x11, 0x11, 0x6f, 0x7e, 0x83, 0x49,
];

/// RP id that triggers the `["internal", "usb"]` transports workaround (§4.6).
pub const GOOGLE_RP_ID: &str = "google.com";

/// Fixed identity constants owned by this crate. `webVaultUrl` (§6) is
/// runtime-configurable and comes from the [`crate::collaborators::Environment`]
/// collaborator instead, since it can change per install/region.
#[derive(Debug, Clone, Copy)]
pub struct Config {
    pub aaguid: [u8; 16],
    pub es256: COSEAlgorithmIdentifier,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            aaguid: AAGUID,
            es256: ES256,
        }
    }
}
