//! Client-data JSON assembly (§4.6): UTF-8 JSON with field order
//! `type, challenge, origin, crossOrigin`, exactly as listed.

use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};
use serde::Serialize;

#[derive(Debug, Clone, Copy, Serialize)]
pub enum ClientDataType {
    #[serde(rename = "webauthn.create")]
    Create,
    #[serde(rename = "webauthn.get")]
    Get,
}

/// Field order here is load-bearing: `serde_json` serializes a struct in its
/// declared field order, so this layout is what fixes the wire order the
/// relying party expects.
#[derive(Serialize)]
struct ClientData {
    #[serde(rename = "type")]
    type_: ClientDataType,
    challenge: String,
    origin: String,
    #[serde(rename = "crossOrigin")]
    cross_origin: bool,
}

pub fn build_client_data_json(
    client_data_type: ClientDataType,
    challenge: &[u8],
    origin: &str,
    cross_origin: bool,
) -> String {
    let data = ClientData {
        type_: client_data_type,
        challenge: URL_SAFE_NO_PAD.encode(challenge),
        origin: origin.to_owned(),
        cross_origin,
    };
    serde_json::to_string(&data).expect("ClientData has no non-serializable fields")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn field_order_is_type_challenge_origin_cross_origin() {
        let json = build_client_data_json(ClientDataType::Create, b"abc", "https://example.com", false);
        let type_pos = json.find("\"type\"").unwrap();
        let challenge_pos = json.find("\"challenge\"").unwrap();
        let origin_pos = json.find("\"origin\"").unwrap();
        let cross_origin_pos = json.find("\"crossOrigin\"").unwrap();
        assert!(type_pos < challenge_pos);
        assert!(challenge_pos < origin_pos);
        assert!(origin_pos < cross_origin_pos);
    }

    #[test]
    fn challenge_is_base64url_encoded_without_padding() {
        let json = build_client_data_json(ClientDataType::Get, &[0xff, 0x00], "https://example.com", true);
        assert!(json.contains("\"challenge\":\"_wA\""));
        assert!(!json.contains('='));
    }

    #[test]
    fn webauthn_create_and_get_type_tags_are_exact() {
        let create = build_client_data_json(ClientDataType::Create, b"x", "https://a.com", false);
        let get = build_client_data_json(ClientDataType::Get, b"x", "https://a.com", false);
        assert!(create.contains("\"type\":\"webauthn.create\""));
        assert!(get.contains("\"type\":\"webauthn.get\""));
    }
}
