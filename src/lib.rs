//! Core of a WebAuthn/FIDO2 credential provider embedded in a password-manager vault.
//!
//! Two layered subsystems live here: [`client`], which implements the WebAuthn
//! client-side algorithms (origin/RP-ID validation, client-data assembly,
//! algorithm negotiation), and [`authenticator`], a virtual CTAP2 authenticator
//! (key-pair generation, attestation-object assembly, assertion signing,
//! credential storage through a vault).
//!
//! Everything this crate does not own — vault encryption, cross-device sync,
//! UI prompts, the autofill blocklist, and the HTTP link to the backend — is
//! expressed as a trait in [`collaborators`] that the embedding application
//! implements.

pub mod authdata;
pub mod authenticator;
pub mod cbor;
pub mod client;
pub mod collaborators;
pub mod config;
pub mod crypto;
pub mod model;
pub mod rp_id;
pub mod vault;

pub use authenticator::{Authenticator, AuthenticatorError};
pub use client::{Client, ClientError};
pub use config::Config;
