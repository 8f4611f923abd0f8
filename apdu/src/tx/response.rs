// Copyright (c) 2022-2023 The MobileCoin Foundation

//! Fixed-size responses returned during a signing ceremony

use encdec::{Decode, Encode};

use crate::{helpers::*, ApduError};

/// Transaction hash length (blake2b-256)
pub const TX_HASH_LEN: usize = 32;

/// Auxiliary data hash length (blake2b-256)
pub const AUX_DATA_HASH_LEN: usize = 32;

/// Witness signature length (ed25519)
pub const SIGNATURE_LEN: usize = 64;

/// Transaction hash, returned in response to the `Confirm` stage
///
/// ## Encoding:
/// ```text
///  0                   1                   2                   3
///  0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1
/// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
/// |                                                               |
/// /                            TX_HASH                            /
/// /                           (32-byte)                           /
/// |                                                               |
/// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
/// ```
#[derive(Clone, PartialEq, Debug, Encode, Decode)]
#[encdec(error = "ApduError")]
pub struct TxHashResp {
    #[encdec(with = "arr")]
    pub hash: [u8; TX_HASH_LEN],
}

impl TxHashResp {
    pub const LEN: usize = TX_HASH_LEN;
}

/// Witness signature, returned in response to each `Witnesses` stage message
///
/// ## Encoding:
/// ```text
///  0                   1                   2                   3
///  0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1
/// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
/// |                                                               |
/// /                           SIGNATURE                           /
/// /                   (64-byte ed25519 signature)                 /
/// |                                                               |
/// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
/// ```
#[derive(Clone, PartialEq, Debug, Encode, Decode)]
#[encdec(error = "ApduError")]
pub struct WitnessResp {
    #[encdec(with = "arr")]
    pub signature: [u8; SIGNATURE_LEN],
}

impl WitnessResp {
    pub const LEN: usize = SIGNATURE_LEN;
}

/// Auxiliary data supplement, returned on voting registration confirmation
///
/// ## Encoding:
/// ```text
///  0                   1                   2                   3
///  0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1
/// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
/// |                                                               |
/// /                         AUX_DATA_HASH                         /
/// /                           (32-byte)                           /
/// |                                                               |
/// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
/// |                                                               |
/// /                      REGISTRATION_SIGNATURE                   /
/// /                   (64-byte ed25519 signature)                 /
/// |                                                               |
/// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
/// ```
#[derive(Clone, PartialEq, Debug, Encode, Decode)]
#[encdec(error = "ApduError")]
pub struct AuxDataSupplementResp {
    #[encdec(with = "arr")]
    pub aux_data_hash: [u8; AUX_DATA_HASH_LEN],

    #[encdec(with = "arr")]
    pub signature: [u8; SIGNATURE_LEN],
}

impl AuxDataSupplementResp {
    pub const LEN: usize = AUX_DATA_HASH_LEN + SIGNATURE_LEN;
}
