// Copyright (c) 2022-2023 The MobileCoin Foundation

//! Cardano hardware wallet signing engine
//!
//! This provides a transport-agnostic [Ceremony][engine::Ceremony] sequencing
//! every message of a hardware wallet transaction signing operation, see
//! [ledger_ada_apdu] for APDU objects and wire encodings.
//!
//! ## Operations
//!
//! Prior to signing the client should issue a
//! [`VersionReq`][ledger_ada_apdu::version::VersionReq] to fetch a
//! [`VersionResp`][ledger_ada_apdu::version::VersionResp] containing the application
//! version and flags, which select the [Compatibility][compat::Compatibility] set
//! used to validate and encode the transaction.
//!
//! ### Executing a transaction
//!
//! A [SigningRequest][tx::SigningRequest] is checked against the firmware
//! capabilities before any message is produced, then executed as a strictly
//! sequential series of stages, each message acknowledged before the next is sent:
//!
//! 1. `INIT` with network, presence flags, signing mode and element counts
//! 2. `AUX_DATA` when supported by the firmware (placed before the body from 2.3.0)
//! 3. `INPUTS` for each transaction input
//! 4. `OUTPUTS` for each output
//!     1. `BASIC_DATA` with destination, amount and counts
//!     2. `ASSET_GROUP` followed by `TOKEN` for each entry of the multi-asset bundle
//!     3. `DATUM` (and `DATUM_CHUNK`s) when a datum is attached
//!     4. `SCRIPT` (and `SCRIPT_CHUNK`s) when a reference script is attached
//!     5. `CONFIRM`
//! 5. `FEE`, then `TTL` if present
//! 6. `CERTIFICATES` for each certificate, pool registrations expanding to their own sub-sequence
//! 7. `WITHDRAWALS` for each withdrawal
//! 8. `AUX_DATA` on firmware placing auxiliary data after the body
//! 9. `VALIDITY_START`, `MINT`, `SCRIPT_DATA_HASH` if present
//! 10. `COLLATERAL_INPUTS`, `REQUIRED_SIGNERS`, `COLLATERAL_OUTPUT`,
//!     `TOTAL_COLLATERAL` and `REFERENCE_INPUTS` if present
//! 11. `CONFIRM`, returning the transaction hash once approved by the user
//! 12. `WITNESSES` for each collected witness path, returning a signature
//!
//! See `ledger_ada::DeviceHandle` for an async driver executing a ceremony
//! over a ledger transport.

pub use ledger_ada_apdu::{self as apdu};

pub mod compat;

pub mod encode;

pub mod engine;

pub mod path;

pub mod tx;

pub mod validate;

pub mod witness;

pub use engine::{Ceremony, Error, Transport};
pub use path::Bip32Path;
