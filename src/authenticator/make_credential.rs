use std::collections::HashSet;

use chrono::Utc;
use tracing::debug;

use crate::authdata::{build_auth_data, AttestedCredentialData, AuthDataFlags};
use crate::cbor::{attestation::encode_none_attestation_object, cose::encode_es256_public_key};
use crate::collaborators::{Sync as SyncCollaborator, UserInterface, Vault};
use crate::config::ES256;
use crate::crypto::P256KeyPair;
use crate::model::CredentialId;
use crate::vault::StoredCredential;

use super::{AuthenticatorError, Authenticator, MakeCredentialParams, MakeCredentialResult};

impl<UI, V, Sy> Authenticator<UI, V, Sy>
where
    UI: UserInterface,
    V: Vault,
    Sy: SyncCollaborator,
{
    /// `MakeCredential` (§4.5.1).
    pub async fn make_credential(
        &self,
        params: MakeCredentialParams,
    ) -> Result<MakeCredentialResult, AuthenticatorError> {
        if !params
            .cred_types_and_pub_key_algs
            .iter()
            .any(|p| p.alg == ES256)
        {
            return Err(AuthenticatorError::not_supported(
                "no entry in credTypesAndPubKeyAlgs offers ES256",
            ));
        }

        let ui = self.ui()?;
        ui.ensure_unlocked_vault()
            .await
            .map_err(|e| AuthenticatorError::unknown(e.to_string()))?;
        self.sync
            .full_sync(false)
            .await
            .map_err(|e| AuthenticatorError::unknown(e.to_string()))?;

        let excluded_ids: HashSet<String> = params
            .exclude_credential_descriptor_list
            .iter()
            .filter_map(|d| CredentialId::from_raw(&d.id).ok())
            .map(CredentialId::to_canonical_text)
            .collect();

        if !excluded_ids.is_empty() {
            let entries = self
                .vault
                .get_all_decrypted()
                .await
                .map_err(|e| AuthenticatorError::unknown(e.to_string()))?;
            let excluded_matches: Vec<CredentialId> = entries
                .iter()
                .filter(|e| e.is_fido2_registration_candidate())
                .filter_map(|e| e.credential.as_ref())
                .filter(|c| excluded_ids.contains(&c.credential_id))
                .filter_map(|c| c.credential_id().ok())
                .collect();
            if !excluded_matches.is_empty() {
                ui.inform_excluded_credential(&excluded_matches)
                    .await
                    .map_err(|e| AuthenticatorError::unknown(e.to_string()))?;
                return Err(AuthenticatorError::not_allowed(
                    "excludeCredentialDescriptorList matched an existing credential",
                ));
            }
        }

        let confirmation = ui
            .confirm_new_credential(
                &params.rp_entity.name,
                &params.user_entity.name,
                params.require_user_verification,
                params.rp_entity.id.as_str(),
            )
            .await
            .map_err(|e| AuthenticatorError::unknown(e.to_string()))?;
        let Some(cipher_id) = confirmation.cipher_id else {
            return Err(AuthenticatorError::not_allowed(
                "user declined or cancelled credential creation",
            ));
        };

        let key_pair =
            P256KeyPair::generate().map_err(|e| AuthenticatorError::unknown(e.to_string()))?;
        let credential_id = CredentialId::generate();

        let encrypted = self
            .vault
            .get_encrypted(&cipher_id)
            .await
            .map_err(|e| AuthenticatorError::unknown(e.to_string()))?
            .ok_or_else(|| AuthenticatorError::unknown("confirmed cipher id not found in vault"))?;
        let mut entry = self
            .vault
            .decrypt(&encrypted)
            .await
            .map_err(|e| AuthenticatorError::unknown(e.to_string()))?;

        if !confirmation.user_verified
            && (params.require_user_verification || entry.reprompt.is_some())
        {
            return Err(AuthenticatorError::not_allowed(
                "user verification required but not satisfied",
            ));
        }

        let stored = StoredCredential::new(
            credential_id,
            key_pair.pkcs8_der(),
            params.rp_entity.id.as_str().to_owned(),
            params.rp_entity.name.clone(),
            params.user_entity.id.as_bytes(),
            params.user_entity.name.clone(),
            params.user_entity.display_name.clone(),
            params.require_resident_key,
            Utc::now(),
        );
        entry.credential = Some(stored);

        let re_encrypted = self
            .vault
            .encrypt(&entry)
            .await
            .map_err(|e| AuthenticatorError::unknown(e.to_string()))?;
        self.vault
            .save_with_server(&re_encrypted)
            .await
            .map_err(|e| AuthenticatorError::unknown(e.to_string()))?;

        let public_key = key_pair.public_key();
        let cose_key = encode_es256_public_key(&public_key);
        let attested = AttestedCredentialData {
            aaguid: self.config.aaguid,
            credential_id: credential_id.as_raw().to_vec(),
            cose_key,
        };
        let flags = AuthDataFlags::new()
            .with_user_present(true)
            .with_user_verified(confirmation.user_verified)
            .with_backup_eligible(true)
            .with_backup_state(true)
            .with_attested_credential_data(true);
        let auth_data = build_auth_data(
            params.rp_entity.id.as_str(),
            flags,
            0,
            Some(&attested),
            // Extensions never surface in the output: ED stays 0 (§4.3).
            None,
        );
        let attestation_object = encode_none_attestation_object(&auth_data);

        debug!(
            cipher_id = %cipher_id,
            user_verified = confirmation.user_verified,
            "registered new FIDO2 credential"
        );

        Ok(MakeCredentialResult {
            credential_id: credential_id.as_raw(),
            attestation_object,
            auth_data,
            public_key_spki_der: public_key.to_spki_der(),
            public_key_algorithm: ES256,
        })
    }
}
