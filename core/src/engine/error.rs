// Copyright (c) 2022-2023 The MobileCoin Foundation

use ledger_ada_apdu::version::Version;

use crate::compat::MIN_VERSION;

/// [Ceremony][super::Ceremony] errors
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Firmware version below the minimum supported
    #[error("firmware version {0} is not supported (requires >= {})", MIN_VERSION)]
    VersionIncompatible(Version),

    /// Transaction uses a feature not supported by the firmware
    #[error("{feature} not supported by firmware version {version}")]
    UnsupportedFeature {
        feature: &'static str,
        version: String,
    },

    /// Request violates a host-side precondition
    #[error("malformed request: {0}")]
    MalformedRequest(&'static str),

    /// Transport failure, the device must be reset before reuse
    #[error("transport error: {0}")]
    Transport(Box<dyn std::error::Error + Send + Sync + 'static>),

    /// Response length did not match the message
    #[error("unexpected response length (expected {expected}, received {actual})")]
    UnexpectedResponse { expected: usize, actual: usize },

    /// Invalid ceremony state, the driver misused the ceremony
    #[error("invalid ceremony state")]
    InvalidState,
}

impl Error {
    /// Check whether the device is left in an indeterminate state,
    /// only failures once messages are on the wire qualify
    pub fn requires_reset(&self) -> bool {
        matches!(self, Error::Transport(_) | Error::UnexpectedResponse { .. })
    }
}
