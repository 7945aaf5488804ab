//! The client layer (§4.6): `CreateCredential` / `AssertCredential`,
//! implementing the WebAuthn client-side guards and parameter derivation in
//! front of the [`crate::authenticator::Authenticator`].

mod client_data;
mod error;
pub mod params;

pub use client_data::ClientDataType;
pub use error::ClientError;
pub use params::{
    AssertCredentialParams, AssertCredentialResult, CreateCredentialParams,
    CreateCredentialResult,
};

use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};

use crate::collaborators::{Environment, State, Sync as SyncCollaborator, UserInterface, Vault};
use crate::config::{Config, GOOGLE_RP_ID};
use crate::crypto::sha256;
use crate::model::{COSEAlgorithmIdentifier, PublicKeyCredentialParameters, PublicKeyCredentialType};
use crate::rp_id::is_valid_rp_id;
use crate::authenticator::{Authenticator, GetAssertionParams, MakeCredentialParams};

pub struct Client<St, En, UI, V, Sy> {
    state: St,
    environment: En,
    config: Config,
    authenticator: Authenticator<UI, V, Sy>,
}

impl<St, En, UI, V, Sy> Client<St, En, UI, V, Sy>
where
    St: State,
    En: Environment,
    UI: UserInterface,
    V: Vault,
    Sy: SyncCollaborator,
{
    pub fn new(state: St, environment: En, config: Config, authenticator: Authenticator<UI, V, Sy>) -> Self {
        Self {
            state,
            environment,
            config,
            authenticator,
        }
    }

    fn host_of(origin: &str) -> Option<String> {
        url::Url::parse(origin).ok().and_then(|u| u.host_str().map(str::to_owned))
    }

    /// Guards shared by `CreateCredential` and `AssertCredential` (§4.6
    /// steps 1-3). Returns the origin's host for callers that need it.
    async fn common_guards(&self, origin: &str) -> Result<String, ClientError> {
        let host = Self::host_of(origin)
            .ok_or_else(|| ClientError::security("origin is not a valid URL"))?;

        let blocklisted = self
            .state
            .autofill_blocklisted_hosts()
            .await
            .map_err(|e| ClientError::unknown(e.to_string()))?;
        if blocklisted.iter().any(|h| h == &host) {
            return Err(ClientError::uri_blocked(format!(
                "host {host} is in the autofill blocklist"
            )));
        }

        let authenticated = self
            .state
            .is_authenticated()
            .await
            .map_err(|e| ClientError::unknown(e.to_string()))?;
        if !authenticated {
            return Err(ClientError::invalid_state("no user is authenticated"));
        }

        let web_vault_url = self
            .environment
            .web_vault_url()
            .await
            .map_err(|e| ClientError::unknown(e.to_string()))?;
        if origin == web_vault_url {
            return Err(ClientError::not_allowed(
                "refusing to create or use a credential against the password manager's own origin",
            ));
        }

        Ok(host)
    }

    /// `CreateCredential` (§4.6).
    pub async fn create_credential(
        &self,
        params: CreateCredentialParams,
    ) -> Result<CreateCredentialResult, ClientError> {
        self.common_guards(&params.origin).await?;

        if !params.same_origin_with_ancestors {
            return Err(ClientError::not_allowed(
                "sameOriginWithAncestors must be true to create a credential",
            ));
        }
        let user_id_len = params.user_entity.id.as_bytes().len();
        if !(1..=64).contains(&user_id_len) {
            return Err(ClientError::type_error(format!(
                "user.id must be 1..=64 bytes, got {user_id_len}"
            )));
        }

        if !params.origin.starts_with("https://") {
            return Err(ClientError::security("origin must use https"));
        }
        if !is_valid_rp_id(params.rp_entity.id.as_str(), &params.origin) {
            return Err(ClientError::security("rpId is not valid for this origin"));
        }

        let candidates = if params.pub_key_cred_params.is_empty() {
            default_pub_key_cred_params()
        } else {
            params.pub_key_cred_params
        };
        let filtered: Vec<PublicKeyCredentialParameters> = candidates
            .into_iter()
            .filter(|p| p.credential_type == PublicKeyCredentialType::PublicKey && p.alg == self.config.es256)
            .collect();
        if filtered.is_empty() {
            return Err(ClientError::not_supported(
                "no offered pubKeyCredParams entry is ES256",
            ));
        }

        let require_resident_key = matches!(params.resident_key.as_deref(), Some("required") | Some("preferred"))
            || (params.resident_key.is_none() && params.require_resident_key);
        let require_user_verification = matches!(
            params.user_verification.as_deref(),
            Some("required") | Some("preferred") | None
        );

        let client_data_json = client_data::build_client_data_json(
            ClientDataType::Create,
            &params.challenge,
            &params.origin,
            !params.same_origin_with_ancestors,
        );
        let client_data_hash = sha256(client_data_json.as_bytes());

        let result = self
            .authenticator
            .make_credential(MakeCredentialParams {
                hash: client_data_hash,
                rp_entity: params.rp_entity.clone(),
                user_entity: params.user_entity,
                cred_types_and_pub_key_algs: filtered,
                require_resident_key,
                require_user_verification,
                exclude_credential_descriptor_list: params.exclude_credentials,
                extensions: params.extensions,
            })
            .await?;

        let transports = if params.rp_entity.id.as_str() == GOOGLE_RP_ID {
            vec!["internal".to_owned(), "usb".to_owned()]
        } else {
            vec!["internal".to_owned()]
        };

        Ok(CreateCredentialResult {
            credential_id: result.credential_id,
            attestation_object: result.attestation_object,
            auth_data: result.auth_data,
            client_data_json,
            public_key: result.public_key_spki_der,
            public_key_algorithm: result.public_key_algorithm,
            transports,
        })
    }

    /// `AssertCredential` (§4.6).
    pub async fn assert_credential(
        &self,
        params: AssertCredentialParams,
    ) -> Result<AssertCredentialResult, ClientError> {
        self.common_guards(&params.origin).await?;

        if !params.origin.starts_with("https://") {
            return Err(ClientError::security("origin must use https"));
        }
        if !is_valid_rp_id(&params.rp_id, &params.origin) {
            return Err(ClientError::security("rpId is not valid for this origin"));
        }

        let require_user_verification = matches!(
            params.user_verification.as_deref(),
            Some("required") | Some("preferred") | None
        );

        let client_data_json = client_data::build_client_data_json(
            ClientDataType::Get,
            &params.challenge,
            &params.origin,
            !params.same_origin_with_ancestors,
        );
        let client_data_hash = sha256(client_data_json.as_bytes());

        let result = self
            .authenticator
            .get_assertion(GetAssertionParams {
                rp_id: params.rp_id,
                hash: client_data_hash,
                allow_credential_descriptor_list: params.allow_credentials,
                require_user_presence: params.require_user_presence,
                require_user_verification,
            })
            .await?;

        Ok(AssertCredentialResult {
            id: URL_SAFE_NO_PAD.encode(result.selected_credential.id),
            raw_id: result.selected_credential.id,
            authenticator_data: result.authenticator_data,
            client_data_json,
            signature: result.signature,
            user_handle: result.selected_credential.user_handle,
        })
    }
}

fn default_pub_key_cred_params() -> Vec<PublicKeyCredentialParameters> {
    vec![
        PublicKeyCredentialParameters {
            credential_type: PublicKeyCredentialType::PublicKey,
            alg: COSEAlgorithmIdentifier(-7),
        },
        PublicKeyCredentialParameters {
            credential_type: PublicKeyCredentialType::PublicKey,
            alg: COSEAlgorithmIdentifier(-257),
        },
    ]
}
