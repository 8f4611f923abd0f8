// Copyright (c) 2022-2023 The MobileCoin Foundation

//! Device status words, appended to every response

use byteorder::{BigEndian, ByteOrder};
use num_enum::TryFromPrimitive;
use strum::Display;

use crate::ApduError;

/// Status word length
pub const STATUS_LEN: usize = 2;

/// Status words reported by the Cardano application
#[derive(Copy, Clone, PartialEq, Eq, Debug, Display, TryFromPrimitive)]
#[repr(u16)]
pub enum StatusCode {
    Ok = 0x9000,
    ClaNotSupported = 0x6e00,
    MalformedRequestHeader = 0x6e01,
    BadCla = 0x6e02,
    UnknownIns = 0x6e03,
    StillInCall = 0x6e04,
    InvalidRequestParameters = 0x6e05,
    InvalidState = 0x6e06,
    InvalidData = 0x6e07,
    InvalidBip44Path = 0x6e08,
    RejectedByUser = 0x6e09,
    RejectedByPolicy = 0x6e10,
    DeviceLocked = 0x6e11,
    UnsupportedAddressType = 0x6e12,
}

/// Split a raw response into payload and status word
pub fn split_status(resp: &[u8]) -> Result<(&[u8], u16), ApduError> {
    if resp.len() < STATUS_LEN {
        return Err(ApduError::InvalidLength);
    }

    let (data, sw) = resp.split_at(resp.len() - STATUS_LEN);
    Ok((data, BigEndian::read_u16(sw)))
}
