//! Crypto primitives (§4.4): SHA-256, and ECDSA P-256 key generation / signing
//! via `ring`. This authenticator only ever speaks ES256 (§1 Non-goals), so
//! unlike a general-purpose COSE library this module hard-codes the one
//! curve and one signature algorithm it needs.

mod p256;

use tracing::trace;

pub use p256::{CryptoError, P256KeyPair, P256PublicKey};

/// `sha256(bytes) -> 32 bytes`.
pub fn sha256(data: &[u8]) -> [u8; 32] {
    let digest = ring::digest::digest(&ring::digest::SHA256, data);
    let mut out = [0u8; 32];
    out.copy_from_slice(digest.as_ref());
    trace!("sha256 digest bytes: {}", hex::encode(out));
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sha256_of_empty_matches_known_vector() {
        let hash = sha256(b"");
        assert_eq!(
            hex::encode(hash),
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b85"
        );
    }
}
