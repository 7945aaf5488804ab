//! The authenticator layer (§4.5): `MakeCredential`, `GetAssertion`,
//! `SilentDiscovery`. Holds its vault/sync collaborators from construction,
//! and its user-interface collaborator late-bound via [`Authenticator::with_ui`]
//! — mirroring the teacher crate's pattern of a service struct built first and
//! wired to its transport/UI afterwards.

mod error;
mod get_assertion;
mod make_credential;
pub mod params;
mod silent_discovery;

pub use error::AuthenticatorError;
pub use params::{
    DiscoveredCredential, GetAssertionParams, GetAssertionResult, MakeCredentialParams,
    MakeCredentialResult, SelectedCredential,
};

use crate::collaborators::{Sync as SyncCollaborator, UserInterface, Vault};
use crate::config::Config;

pub struct Authenticator<UI, V, Sy> {
    config: Config,
    ui: Option<UI>,
    vault: V,
    sync: Sy,
}

impl<UI, V, Sy> Authenticator<UI, V, Sy>
where
    UI: UserInterface,
    V: Vault,
    Sy: SyncCollaborator,
{
    pub fn new(config: Config, vault: V, sync: Sy) -> Self {
        Self {
            config,
            ui: None,
            vault,
            sync,
        }
    }

    pub fn with_ui(mut self, ui: UI) -> Self {
        self.ui = Some(ui);
        self
    }

    fn ui(&self) -> Result<&UI, AuthenticatorError> {
        self.ui
            .as_ref()
            .ok_or_else(|| AuthenticatorError::unknown("user-interface collaborator not attached"))
    }
}
