//! Attestation object encoding (§4.2): the 3-entry CBOR map
//! `{fmt: "none", attStmt: {}, authData: bytes}`, in that exact key order.
//!
//! This authenticator never produces anything but "none" attestation (§1
//! Non-goals), so unlike the teacher's `AttestationStatement` enum — built to
//! hold a `"packed"` variant with a signature and an x5c chain — this map has
//! exactly one shape and is built directly rather than through serde.

use ciborium::value::Value;
use tracing::trace;

/// Serializes the attestation object for a completed `MakeCredential`.
pub fn encode_none_attestation_object(auth_data: &[u8]) -> Vec<u8> {
    let map = Value::Map(vec![
        (Value::Text("fmt".into()), Value::Text("none".into())),
        (Value::Text("attStmt".into()), Value::Map(Vec::new())),
        (
            Value::Text("authData".into()),
            Value::Bytes(auth_data.to_vec()),
        ),
    ]);
    let mut out = Vec::new();
    ciborium::ser::into_writer(&map, &mut out)
        .expect("attestation object is a fixed, always-serializable shape");
    trace!("attestation object CBOR bytes: {}", hex::encode(&out));
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encodes_fmt_none_and_empty_att_stmt_before_auth_data() {
        let encoded = encode_none_attestation_object(&[1, 2, 3]);
        let decoded: Value = ciborium::de::from_reader(encoded.as_slice()).unwrap();
        let map = decoded.as_map().unwrap();
        assert_eq!(map.len(), 3);
        assert_eq!(map[0].0, Value::Text("fmt".into()));
        assert_eq!(map[0].1, Value::Text("none".into()));
        assert_eq!(map[1].0, Value::Text("attStmt".into()));
        assert_eq!(map[1].1, Value::Map(Vec::new()));
        assert_eq!(map[2].0, Value::Text("authData".into()));
        assert_eq!(map[2].1, Value::Bytes(vec![1, 2, 3]));
    }
}
