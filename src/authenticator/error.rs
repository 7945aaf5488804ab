//! Authenticator-layer errors (§7). The authenticator only ever raises
//! `NotSupported`, `NotAllowed`, `InvalidState`, or `Unknown`; the remaining
//! kinds in the taxonomy (`UriBlocked`, `Security`, `TypeError`) belong to
//! the client layer and live in [`crate::client::error`].

use thiserror::Error;
use tracing::{error, warn};

#[derive(Debug, Error)]
pub enum AuthenticatorError {
    #[error("no acceptable algorithm offered: {reason}")]
    NotSupported { reason: String },

    #[error("not allowed: {reason}")]
    NotAllowed { reason: String },

    #[error("invalid state: {reason}")]
    InvalidState { reason: String },

    #[error("unexpected failure: {reason}")]
    Unknown { reason: String },
}

impl AuthenticatorError {
    pub fn not_supported(reason: impl Into<String>) -> Self {
        let reason = reason.into();
        warn!(%reason, "rejecting request: no acceptable algorithm");
        Self::NotSupported { reason }
    }

    pub fn not_allowed(reason: impl Into<String>) -> Self {
        let reason = reason.into();
        warn!(%reason, "rejecting request: not allowed");
        Self::NotAllowed { reason }
    }

    pub fn invalid_state(reason: impl Into<String>) -> Self {
        let reason = reason.into();
        error!(%reason, "collaborator reported invalid state");
        Self::InvalidState { reason }
    }

    pub fn unknown(reason: impl Into<String>) -> Self {
        let reason = reason.into();
        error!(%reason, "unexpected failure in authenticator layer");
        Self::Unknown { reason }
    }
}
