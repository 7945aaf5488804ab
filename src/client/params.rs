use crate::model::{
    COSEAlgorithmIdentifier, PublicKeyCredentialDescriptor, PublicKeyCredentialParameters,
    RpEntity, UserEntity,
};

pub struct CreateCredentialParams {
    pub origin: String,
    pub same_origin_with_ancestors: bool,
    pub rp_entity: RpEntity,
    pub user_entity: UserEntity,
    pub challenge: Vec<u8>,
    pub pub_key_cred_params: Vec<PublicKeyCredentialParameters>,
    pub exclude_credentials: Vec<PublicKeyCredentialDescriptor>,
    /// `"required"`, `"preferred"`, `"discouraged"`, or unset.
    pub resident_key: Option<String>,
    pub require_resident_key: bool,
    /// `"required"`, `"preferred"`, `"discouraged"`, or unset.
    pub user_verification: Option<String>,
    /// Passed through to the authenticator unchanged; never acted on, since
    /// this authenticator emits no extension outputs (§4.3 ED is always 0).
    pub extensions: Option<Vec<u8>>,
}

pub struct CreateCredentialResult {
    pub credential_id: [u8; 16],
    pub attestation_object: Vec<u8>,
    pub auth_data: Vec<u8>,
    pub client_data_json: String,
    pub public_key: Vec<u8>,
    pub public_key_algorithm: COSEAlgorithmIdentifier,
    pub transports: Vec<String>,
}

pub struct AssertCredentialParams {
    pub origin: String,
    pub same_origin_with_ancestors: bool,
    pub rp_id: String,
    pub challenge: Vec<u8>,
    pub allow_credentials: Vec<PublicKeyCredentialDescriptor>,
    pub user_verification: Option<String>,
    pub require_user_presence: bool,
}

pub struct AssertCredentialResult {
    pub id: String,
    pub raw_id: [u8; 16],
    pub authenticator_data: Vec<u8>,
    pub client_data_json: String,
    pub signature: Vec<u8>,
    pub user_handle: Vec<u8>,
}
