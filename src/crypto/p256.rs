use ring::{
    rand::SystemRandom,
    signature::{EcdsaKeyPair, KeyPair, ECDSA_P256_SHA256_ASN1_SIGNING},
};
use thiserror::Error;
use tracing::trace;

#[derive(Debug, Error)]
pub enum CryptoError {
    #[error("ring reported an unspecified cryptographic failure")]
    RingUnspecified,

    #[error("stored private key is not valid PKCS#8: {0}")]
    InvalidPkcs8(ring::error::KeyRejected),
}

impl From<ring::error::Unspecified> for CryptoError {
    fn from(_: ring::error::Unspecified) -> Self {
        CryptoError::RingUnspecified
    }
}

/// An ECDSA P-256 key pair, held as its PKCS#8 document (the same form
/// that's persisted, base64url-encoded, as `keyValue` on a stored credential).
#[derive(Clone)]
pub struct P256KeyPair {
    pkcs8: Vec<u8>,
}

/// The uncompressed affine coordinates of a P-256 public key, each exactly
/// 32 bytes (leading zeros preserved, per §8 invariant 6).
pub struct P256PublicKey {
    x: [u8; 32],
    y: [u8; 32],
}

impl P256PublicKey {
    pub fn x(&self) -> &[u8; 32] {
        &self.x
    }

    pub fn y(&self) -> &[u8; 32] {
        &self.y
    }

    /// SPKI DER encoding of an uncompressed P-256 public key. The header is
    /// the fixed 26-byte `SEQUENCE` wrapping the `id-ecPublicKey`/`prime256v1`
    /// AlgorithmIdentifier that every uncompressed P-256 SPKI key shares;
    /// only the trailing 65-byte bit string (`0x04 || X || Y`) varies.
    pub fn to_spki_der(&self) -> Vec<u8> {
        const SPKI_HEADER: [u8; 26] = [
            0x30, 0x59, 0x30, 0x13, 0x06, 0x07, 0x2a, 0x86, 0x48, 0xce, 0x3d, 0x02, 0x01, 0x06,
            0x08, 0x2a, 0x86, 0x48, 0xce, 0x3d, 0x03, 0x01, 0x07, 0x03, 0x42, 0x00,
        ];
        let mut der = Vec::with_capacity(SPKI_HEADER.len() + 1 + 32 + 32);
        der.extend_from_slice(&SPKI_HEADER);
        der.push(0x04);
        der.extend_from_slice(&self.x);
        der.extend_from_slice(&self.y);
        trace!("SPKI public key bytes: {}", hex::encode(&der));
        der
    }
}

impl P256KeyPair {
    /// `generateP256KeyPair` (§4.4): generates a fresh key pair, returning it
    /// still wrapped around its PKCS#8 private key document.
    pub fn generate() -> Result<Self, CryptoError> {
        let rng = SystemRandom::new();
        let doc = EcdsaKeyPair::generate_pkcs8(&ECDSA_P256_SHA256_ASN1_SIGNING, &rng)?;
        Ok(Self {
            pkcs8: doc.as_ref().to_owned(),
        })
    }

    pub fn from_pkcs8(pkcs8: Vec<u8>) -> Result<Self, CryptoError> {
        EcdsaKeyPair::from_pkcs8(&ECDSA_P256_SHA256_ASN1_SIGNING, &pkcs8)
            .map_err(CryptoError::InvalidPkcs8)?;
        Ok(Self { pkcs8 })
    }

    pub fn pkcs8_der(&self) -> &[u8] {
        &self.pkcs8
    }

    fn ring_pair(&self) -> EcdsaKeyPair {
        EcdsaKeyPair::from_pkcs8(&ECDSA_P256_SHA256_ASN1_SIGNING, &self.pkcs8)
            .expect("pkcs8 was already validated on construction")
    }

    pub fn public_key(&self) -> P256PublicKey {
        let pair = self.ring_pair();
        // ring represents the public key via "Octet-String-to-Elliptic-Curve-Point
        // Conversion" in uncompressed form (SEC1 §2.3.3): 0x04 || x || y.
        let octet_string = pair.public_key().as_ref();
        assert_eq!(octet_string.len(), 1 + 32 + 32);
        assert_eq!(octet_string[0], 0x04, "public key must be uncompressed");
        let (x, y) = octet_string[1..].split_at(32);
        let mut px = [0u8; 32];
        let mut py = [0u8; 32];
        px.copy_from_slice(x);
        py.copy_from_slice(y);
        P256PublicKey { x: px, y: py }
    }

    /// `signEs256(privateKeyPkcs8, message) -> DER`: signs `SHA256(message)`
    /// with ECDSA P-256 and returns an ASN.1 DER `SEQUENCE { r, s }`. `ring`'s
    /// `*_ASN1_SIGNING` algorithm already emits DER, so no post-processing of
    /// the signature bytes is required.
    pub fn sign(&self, message: &[u8]) -> Result<Vec<u8>, CryptoError> {
        let pair = self.ring_pair();
        let rng = SystemRandom::new();
        let signature = pair.sign(&rng, message)?;
        let der = signature.as_ref().to_owned();
        trace!("ES256 signature DER bytes: {}", hex::encode(&der));
        Ok(der)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generated_key_signs_and_reports_32_byte_coordinates() {
        let key = P256KeyPair::generate().unwrap();
        let public = key.public_key();
        assert_eq!(public.x().len(), 32);
        assert_eq!(public.y().len(), 32);

        let message = b"authData || clientDataHash";
        let signature = key.sign(message).unwrap();
        // DER SEQUENCE tag.
        assert_eq!(signature[0], 0x30);

        let spki = public.to_spki_der();
        let unparsed = ring::signature::UnparsedPublicKey::new(
            &ring::signature::ECDSA_P256_SHA256_ASN1,
            &spki[spki.len() - 65..],
        );
        unparsed.verify(message, &signature).unwrap();
    }

    #[test]
    fn pkcs8_round_trips_through_reconstruction() {
        let key = P256KeyPair::generate().unwrap();
        let reloaded = P256KeyPair::from_pkcs8(key.pkcs8_der().to_owned()).unwrap();
        assert_eq!(key.public_key().x(), reloaded.public_key().x());
        assert_eq!(key.public_key().y(), reloaded.public_key().y());
    }
}
