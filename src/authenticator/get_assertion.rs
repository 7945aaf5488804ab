use chrono::Utc;
use tracing::debug;

use crate::authdata::{build_auth_data, AuthDataFlags};
use crate::collaborators::{Sync as SyncCollaborator, UserInterface, Vault, VaultEntry};
use crate::model::CredentialId;

use super::{
    AuthenticatorError, Authenticator, GetAssertionParams, GetAssertionResult, SelectedCredential,
};

impl<UI, V, Sy> Authenticator<UI, V, Sy>
where
    UI: UserInterface,
    V: Vault,
    Sy: SyncCollaborator,
{
    /// `GetAssertion` (§4.5.2).
    pub async fn get_assertion(
        &self,
        params: GetAssertionParams,
    ) -> Result<GetAssertionResult, AuthenticatorError> {
        let ui = self.ui()?;
        ui.ensure_unlocked_vault()
            .await
            .map_err(|e| AuthenticatorError::unknown(e.to_string()))?;
        self.sync
            .full_sync(false)
            .await
            .map_err(|e| AuthenticatorError::unknown(e.to_string()))?;

        let entries = self
            .vault
            .get_all_decrypted()
            .await
            .map_err(|e| AuthenticatorError::unknown(e.to_string()))?;

        let is_candidate = |e: &&VaultEntry| {
            !e.deleted
                && e.is_login
                && e.credential
                    .as_ref()
                    .map(|c| c.rp_id == params.rp_id)
                    .unwrap_or(false)
        };

        let candidates: Vec<&VaultEntry> = if !params.allow_credential_descriptor_list.is_empty() {
            let allowed_ids: Vec<String> = params
                .allow_credential_descriptor_list
                .iter()
                .filter_map(|d| CredentialId::from_raw(&d.id).ok())
                .map(CredentialId::to_canonical_text)
                .collect();
            entries
                .iter()
                .filter(is_candidate)
                .filter(|e| {
                    e.credential
                        .as_ref()
                        .map(|c| allowed_ids.contains(&c.credential_id))
                        .unwrap_or(false)
                })
                .collect()
        } else {
            entries
                .iter()
                .filter(is_candidate)
                .filter(|e| e.credential.as_ref().map(|c| c.discoverable).unwrap_or(false))
                .collect()
        };

        if candidates.is_empty() {
            return Err(AuthenticatorError::not_allowed(
                "no vault entry matches the requested rpId/allow-list",
            ));
        }

        let (cipher_id, user_verified, user_presence) = if params.allow_credential_descriptor_list.len() == 1
            && !params.require_user_presence
        {
            (candidates[0].cipher_id.clone(), false, false)
        } else {
            let cipher_ids: Vec<String> = candidates.iter().map(|e| e.cipher_id.clone()).collect();
            let outcome = ui
                .pick_credential(&cipher_ids, params.require_user_verification)
                .await
                .map_err(|e| AuthenticatorError::unknown(e.to_string()))?;
            (outcome.cipher_id, outcome.user_verified, true)
        };

        let Some(selected) = candidates.iter().find(|e| e.cipher_id == cipher_id) else {
            return Err(AuthenticatorError::not_allowed(
                "selected cipher id is not among the candidate credentials",
            ));
        };

        if !user_presence && params.require_user_presence {
            return Err(AuthenticatorError::not_allowed(
                "user presence required but not satisfied",
            ));
        }
        if !user_verified && (params.require_user_verification || selected.reprompt.is_some()) {
            return Err(AuthenticatorError::not_allowed(
                "user verification required but not satisfied",
            ));
        }

        let stored = selected
            .credential
            .as_ref()
            .expect("is_candidate filtered to entries carrying a FIDO2 credential");
        let credential_id = stored
            .credential_id()
            .map_err(|e| AuthenticatorError::unknown(e.to_string()))?;
        let user_handle = stored
            .user_handle_bytes()
            .map_err(|e| AuthenticatorError::unknown(e.to_string()))?;
        let pkcs8_der = stored
            .pkcs8_der()
            .map_err(|e| AuthenticatorError::unknown(e.to_string()))?;
        let key_pair = crate::crypto::P256KeyPair::from_pkcs8(pkcs8_der)
            .map_err(|e| AuthenticatorError::unknown(e.to_string()))?;

        let mut updated_entry = (*selected).clone();
        let new_counter = {
            let credential = updated_entry
                .credential
                .as_mut()
                .expect("selected entry carries a FIDO2 credential");
            credential.bump_counter(Utc::now());
            credential.counter
        };

        let encrypted = self
            .vault
            .encrypt(&updated_entry)
            .await
            .map_err(|e| AuthenticatorError::unknown(e.to_string()))?;
        self.vault
            .save_with_server(&encrypted)
            .await
            .map_err(|e| AuthenticatorError::unknown(e.to_string()))?;
        self.vault
            .update_last_used_date(&cipher_id, Utc::now())
            .await
            .map_err(|e| AuthenticatorError::unknown(e.to_string()))?;

        let flags = AuthDataFlags::new()
            .with_user_present(user_presence)
            .with_user_verified(user_verified)
            .with_backup_eligible(true)
            .with_backup_state(true);
        let auth_data = build_auth_data(&params.rp_id, flags, new_counter, None, None);

        let mut signed_over = auth_data.clone();
        signed_over.extend_from_slice(&params.hash);
        let signature = key_pair
            .sign(&signed_over)
            .map_err(|e| AuthenticatorError::unknown(e.to_string()))?;

        debug!(cipher_id = %cipher_id, counter = new_counter, "produced assertion");

        Ok(GetAssertionResult {
            selected_credential: SelectedCredential {
                id: credential_id.as_raw(),
                user_handle,
            },
            authenticator_data: auth_data,
            signature,
        })
    }
}
