//! Request/response shapes for the three authenticator operations (§4.5).

use crate::model::{
    COSEAlgorithmIdentifier, PublicKeyCredentialDescriptor, PublicKeyCredentialParameters,
    RpEntity, UserEntity,
};

pub struct MakeCredentialParams {
    pub hash: [u8; 32],
    pub rp_entity: RpEntity,
    pub user_entity: UserEntity,
    pub cred_types_and_pub_key_algs: Vec<PublicKeyCredentialParameters>,
    pub require_resident_key: bool,
    pub require_user_verification: bool,
    pub exclude_credential_descriptor_list: Vec<PublicKeyCredentialDescriptor>,
    /// Accepted but never acted on: this authenticator emits no extension
    /// outputs, so the ED flag is always 0 regardless of what's passed here.
    pub extensions: Option<Vec<u8>>,
}

pub struct MakeCredentialResult {
    pub credential_id: [u8; 16],
    pub attestation_object: Vec<u8>,
    pub auth_data: Vec<u8>,
    pub public_key_spki_der: Vec<u8>,
    pub public_key_algorithm: COSEAlgorithmIdentifier,
}

pub struct GetAssertionParams {
    pub rp_id: String,
    pub hash: [u8; 32],
    pub allow_credential_descriptor_list: Vec<PublicKeyCredentialDescriptor>,
    pub require_user_presence: bool,
    pub require_user_verification: bool,
}

pub struct SelectedCredential {
    pub id: [u8; 16],
    pub user_handle: Vec<u8>,
}

pub struct GetAssertionResult {
    pub selected_credential: SelectedCredential,
    pub authenticator_data: Vec<u8>,
    pub signature: Vec<u8>,
}

pub struct DiscoveredCredential {
    pub id: [u8; 16],
    pub rp_id: String,
    pub user_handle: Vec<u8>,
    pub user_name: String,
}
