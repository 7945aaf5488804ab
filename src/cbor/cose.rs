//! COSE_Key encoding (§4.2): the EC2/P-256/ES256 public-key map this
//! authenticator ever emits, built with `coset` the same way the teacher
//! crate's ring-backed `CryptoKeyPair::to_public_cose_key` did.

use coset::{iana, CborSerializable, CoseKeyBuilder};
use tracing::trace;

use crate::crypto::P256PublicKey;

/// Canonical CBOR encoding of `{1: 2, 3: -7, -1: 1, -2: X, -3: Y}`.
///
/// `CoseKeyBuilder::new_ec2_pub_key` inserts `kty` and (via `.algorithm`)
/// `alg` first, then the EC2-specific `crv`/`x`/`y` params in that order.
/// Every one of those five keys (1, 3, -1, -2, -3) encodes as a single CBOR
/// byte, so canonical (length-then-value) map-key ordering reduces to plain
/// numeric order, which is exactly the order `coset` builds and serializes
/// them in here; no separate canonicalization pass is needed.
pub fn encode_es256_public_key(public_key: &P256PublicKey) -> Vec<u8> {
    let cose_key = CoseKeyBuilder::new_ec2_pub_key(
        iana::EllipticCurve::P_256,
        public_key.x().to_vec(),
        public_key.y().to_vec(),
    )
    .algorithm(iana::Algorithm::ES256)
    .build();
    let encoded = cose_key
        .to_vec()
        .expect("a fully-populated EC2 COSE_Key always serializes");
    trace!("COSE_Key bytes: {}", hex::encode(&encoded));
    encoded
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crypto::P256KeyPair;

    #[test]
    fn encodes_five_entry_map_in_canonical_key_order() {
        let key = P256KeyPair::generate().unwrap();
        let encoded = encode_es256_public_key(&key.public_key());

        // Map header: major type 5 (map), 5 entries.
        assert_eq!(encoded[0], 0xa5);
        // First key is 1 (kty), encoded as the single byte 0x01.
        assert_eq!(encoded[1], 0x01);

        let decoded: ciborium::value::Value = ciborium::de::from_reader(encoded.as_slice())
            .expect("coset output is valid CBOR");
        let map = decoded.as_map().unwrap();
        let keys: Vec<i128> = map
            .iter()
            .map(|(k, _)| k.as_integer().unwrap().into())
            .collect();
        assert_eq!(keys, vec![1, 3, -1, -2, -3]);
    }
}
