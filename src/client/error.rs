//! Client-layer errors (§7). Re-raises [`crate::authenticator::AuthenticatorError::InvalidState`]
//! verbatim and maps every other authenticator error to `Unknown`; raises its
//! own `UriBlocked`/`Security`/`TypeError`/`NotAllowed`/`NotSupported` for the
//! guards in §4.6.

use thiserror::Error;
use tracing::{error, warn};

use crate::authenticator::AuthenticatorError;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("origin blocked by autofill blocklist: {reason}")]
    UriBlocked { reason: String },

    #[error("invalid state: {reason}")]
    InvalidState { reason: String },

    #[error("not allowed: {reason}")]
    NotAllowed { reason: String },

    #[error("security violation: {reason}")]
    Security { reason: String },

    #[error("type error: {reason}")]
    TypeError { reason: String },

    #[error("no acceptable algorithm: {reason}")]
    NotSupported { reason: String },

    #[error("unexpected failure: {reason}")]
    Unknown { reason: String },
}

impl ClientError {
    pub fn uri_blocked(reason: impl Into<String>) -> Self {
        let reason = reason.into();
        warn!(%reason, "rejecting request: origin blocked");
        Self::UriBlocked { reason }
    }

    pub fn invalid_state(reason: impl Into<String>) -> Self {
        let reason = reason.into();
        error!(%reason, "invalid state");
        Self::InvalidState { reason }
    }

    pub fn not_allowed(reason: impl Into<String>) -> Self {
        let reason = reason.into();
        warn!(%reason, "rejecting request: not allowed");
        Self::NotAllowed { reason }
    }

    pub fn security(reason: impl Into<String>) -> Self {
        let reason = reason.into();
        warn!(%reason, "rejecting request: security violation");
        Self::Security { reason }
    }

    pub fn type_error(reason: impl Into<String>) -> Self {
        let reason = reason.into();
        warn!(%reason, "rejecting request: type error");
        Self::TypeError { reason }
    }

    pub fn not_supported(reason: impl Into<String>) -> Self {
        let reason = reason.into();
        warn!(%reason, "rejecting request: no acceptable algorithm");
        Self::NotSupported { reason }
    }

    pub fn unknown(reason: impl Into<String>) -> Self {
        let reason = reason.into();
        error!(%reason, "unexpected failure in client layer");
        Self::Unknown { reason }
    }
}

impl From<AuthenticatorError> for ClientError {
    fn from(error: AuthenticatorError) -> Self {
        match error {
            AuthenticatorError::InvalidState { reason } => ClientError::InvalidState { reason },
            other => ClientError::unknown(other.to_string()),
        }
    }
}
