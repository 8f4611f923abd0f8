// Copyright (c) 2022-2023 The MobileCoin Foundation

use ledger_ada_apdu::{status::StatusCode, ApduError};
use tokio::time::error::Elapsed;

/// Ledger Cardano API Error Type
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Transport error
    #[error("Transport error {0}")]
    Transport(ledger_lib::Error),

    /// APDU encoding or decoding failed
    #[error("APDU error {0:?}")]
    Apdu(ApduError),

    /// Unexpected APDU response
    #[error("Unexpected APDU response")]
    UnexpectedResponse,

    /// Device reported an error status
    #[error("Device error: {0}")]
    Device(StatusCode),

    /// Device reported an unrecognised status word
    #[error("Unknown device status 0x{0:04x}")]
    Status(u16),

    /// User denied operation
    #[error("Operation rejected by user")]
    UserDenied,

    /// Timeout waiting for user
    #[error("Timeout waiting for user interaction")]
    UserTimeout,

    /// Request timeout
    #[error("Timeout waiting for device response")]
    RequestTimeout,

    /// Signing ceremony error
    #[error("Signing ceremony failed: {0}")]
    Engine(#[from] ledger_ada_core::Error),
}

impl Error {
    /// Map a non-success status word to an error
    pub(crate) fn from_status(sw: u16) -> Self {
        match StatusCode::try_from(sw) {
            Ok(StatusCode::RejectedByUser) => Error::UserDenied,
            Ok(s) => Error::Device(s),
            Err(_) => Error::Status(sw),
        }
    }
}

impl From<ledger_lib::Error> for Error {
    fn from(e: ledger_lib::Error) -> Self {
        Error::Transport(e)
    }
}

impl From<ApduError> for Error {
    fn from(e: ApduError) -> Self {
        Error::Apdu(e)
    }
}

impl From<Elapsed> for Error {
    fn from(_: Elapsed) -> Self {
        Error::RequestTimeout
    }
}
