use crate::collaborators::{Sync as SyncCollaborator, UserInterface, Vault};
use crate::model::CredentialId;

use super::{AuthenticatorError, Authenticator, DiscoveredCredential};

impl<UI, V, Sy> Authenticator<UI, V, Sy>
where
    UI: UserInterface,
    V: Vault,
    Sy: SyncCollaborator,
{
    /// `SilentDiscovery` (§4.5.3). No UI prompt and no mutation: a pure read
    /// over the already-decrypted vault for discoverable FIDO2 credentials.
    pub async fn silent_discovery(
        &self,
        rp_id: &str,
    ) -> Result<Vec<DiscoveredCredential>, AuthenticatorError> {
        let entries = self
            .vault
            .get_all_decrypted()
            .await
            .map_err(|e| AuthenticatorError::unknown(e.to_string()))?;

        entries
            .iter()
            .filter(|e| !e.deleted && e.is_login)
            .filter_map(|e| e.credential.as_ref().map(|c| (e, c)))
            .filter(|(_, c)| c.rp_id == rp_id && c.discoverable)
            .map(|(_, c)| {
                let credential_id = CredentialId::from_canonical_text(&c.credential_id)
                    .map_err(|err| AuthenticatorError::unknown(err.to_string()))?;
                let user_handle = c
                    .user_handle_bytes()
                    .map_err(|err| AuthenticatorError::unknown(err.to_string()))?;
                Ok(DiscoveredCredential {
                    id: credential_id.as_raw(),
                    rp_id: c.rp_id.clone(),
                    user_handle,
                    user_name: c.user_name.clone(),
                })
            })
            .collect()
    }
}
