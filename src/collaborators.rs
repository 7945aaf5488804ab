//! Collaborator contracts (§6): everything this core needs from the
//! embedding password-manager application, expressed as async traits the
//! application implements. Grounded in the teacher crate's
//! `authenticator::storage::Storage` trait — an `async_trait` with an
//! associated `Error` type, one method per query the core needs.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::model::CredentialId;
use crate::vault::StoredCredential;

/// A cipher id, opaque to this crate: whatever identifier the embedding
/// vault uses for an entry.
pub type CipherId = String;

/// The subset of a vault entry's own metadata (beyond its FIDO2 credential)
/// that the algorithms in §4.5/§4.6 branch on.
#[derive(Debug, Clone)]
pub struct VaultEntry {
    pub cipher_id: CipherId,
    pub deleted: bool,
    /// `Some` iff this entry belongs to an organization; such entries are
    /// never eligible for FIDO2 registration (§4.5 step 3).
    pub organization_id: Option<String>,
    pub is_login: bool,
    /// `Some` when the embedding app requires a re-prompt (e.g. a master
    /// password confirmation) before this entry may be used without UV.
    pub reprompt: Option<String>,
    pub credential: Option<StoredCredential>,
}

impl VaultEntry {
    pub fn is_fido2_registration_candidate(&self) -> bool {
        !self.deleted && self.organization_id.is_none() && self.is_login && self.credential.is_some()
    }
}

/// `getAutofillBlocklistedHosts()`, `isAuthenticated()`.
#[async_trait]
pub trait State {
    type Error: std::error::Error + Send + Sync + 'static;

    async fn autofill_blocklisted_hosts(&self) -> Result<Vec<String>, Self::Error>;
    async fn is_authenticated(&self) -> Result<bool, Self::Error>;
}

/// `webVaultUrl()`.
#[async_trait]
pub trait Environment {
    type Error: std::error::Error + Send + Sync + 'static;

    async fn web_vault_url(&self) -> Result<String, Self::Error>;
}

/// `hash(bytes, Sha256) -> bytes`. Optional: the core's own
/// [`crate::crypto::sha256`] suffices unless the embedding app wants to
/// supply its own (e.g. a hardware-backed implementation).
#[async_trait]
pub trait Crypto {
    type Error: std::error::Error + Send + Sync + 'static;

    async fn sha256(&self, data: &[u8]) -> Result<[u8; 32], Self::Error>;
}

/// Outcome of asking the user to confirm registration into a vault entry.
pub struct ConfirmNewCredentialOutcome {
    pub cipher_id: Option<CipherId>,
    pub user_verified: bool,
}

/// Outcome of asking the user to pick among candidate entries for assertion.
pub struct PickCredentialOutcome {
    pub cipher_id: CipherId,
    pub user_verified: bool,
}

/// `ensureUnlockedVault()`, `informExcludedCredential(ids)`,
/// `confirmNewCredential(...)`, `pickCredential(...)`.
#[async_trait]
pub trait UserInterface {
    type Error: std::error::Error + Send + Sync + 'static;

    async fn ensure_unlocked_vault(&self) -> Result<(), Self::Error>;

    async fn inform_excluded_credential(&self, ids: &[CredentialId]) -> Result<(), Self::Error>;

    async fn confirm_new_credential(
        &self,
        credential_name: &str,
        user_name: &str,
        user_verification: bool,
        rp_id: &str,
    ) -> Result<ConfirmNewCredentialOutcome, Self::Error>;

    async fn pick_credential(
        &self,
        cipher_ids: &[CipherId],
        user_verification: bool,
    ) -> Result<PickCredentialOutcome, Self::Error>;
}

/// `getEncrypted(id)`, `decrypt(entry)`, `encrypt(entry)`,
/// `saveWithServer(entry)`, `getAllDecrypted()`, `updateLastUsedDate(id)`.
#[async_trait]
pub trait Vault {
    type Error: std::error::Error + Send + Sync + 'static;
    /// Opaque encrypted form of a [`VaultEntry`], as stored at rest.
    type Encrypted: Send + Sync;

    async fn get_encrypted(&self, cipher_id: &CipherId) -> Result<Option<Self::Encrypted>, Self::Error>;
    async fn decrypt(&self, entry: &Self::Encrypted) -> Result<VaultEntry, Self::Error>;
    async fn encrypt(&self, entry: &VaultEntry) -> Result<Self::Encrypted, Self::Error>;
    async fn save_with_server(&self, entry: &Self::Encrypted) -> Result<(), Self::Error>;
    async fn get_all_decrypted(&self) -> Result<Vec<VaultEntry>, Self::Error>;
    async fn update_last_used_date(&self, cipher_id: &CipherId, used_at: DateTime<Utc>) -> Result<(), Self::Error>;
}

/// `fullSync(force=false)`.
#[async_trait]
pub trait Sync {
    type Error: std::error::Error + Send + Sync + 'static;

    async fn full_sync(&self, force: bool) -> Result<(), Self::Error>;
}
