//! CBOR encoders for the two wire structures this authenticator produces:
//! COSE_Key public keys and "none"-format attestation objects.
//!
//! The teacher crate's generic `key_mapped`/`ordered_ser`/`serde_key_mapper`
//! machinery solved a harder problem (serde-derived structs whose CBOR map
//! keys are small integers needing post-hoc canonical sorting, for the full
//! CTAP2 command/response set). This authenticator only ever emits two fixed,
//! hand-built maps, so it builds them directly instead of carrying that
//! generic layer.

pub mod attestation;
pub mod cose;
