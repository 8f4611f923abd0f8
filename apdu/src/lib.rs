// Copyright (c) 2022-2023 The MobileCoin Foundation

//! Protocol / APDU definitions for Cardano app communication
//!
//! This module provides the wire-level vocabulary used by the host when driving
//! a transaction signing ceremony: instruction codes, stage (`P1`) and sub-stage
//! (`P2`) tags, the [`Message`][tx::Message] frame exchanged with the device,
//! fixed-size response decoders and the chunked transfer codec used for
//! oversized output fields.
//!
//! Multi-byte integers in message payloads (amounts, indices, lengths) are
//! big-endian, matching the encoding expected by the device application.
//!

pub use ledger_proto::{ApduError, ApduStatic};

pub mod chunk;
pub mod prelude;
pub mod status;
pub mod tx;
pub mod version;

mod helpers;

/// Cardano APDU Class
pub const ADA_APDU_CLA: u8 = 0xd7;

/// Status word returned by the device on success
pub const SW_OK: u16 = 0x9000;

/// Maximum APDU payload length
pub const MAX_APDU_DATA: usize = 255;

/// Cardano APDU instruction codes
#[derive(Copy, Clone, Debug, PartialEq, Eq, strum::Display)]
#[repr(u8)]
pub enum Instruction {
    /// Fetch application version and flags
    GetVersion = 0x00,

    /// Execute a transaction signing stage
    SignTx = 0x21,
}

/// Build a raw APDU frame (`CLA INS P1 P2 LC DATA`) for transmission
pub fn apdu_frame(cla: u8, ins: u8, p1: u8, p2: u8, data: &[u8]) -> Result<Vec<u8>, ApduError> {
    if data.len() > MAX_APDU_DATA {
        return Err(ApduError::InvalidLength);
    }

    let mut buff = Vec::with_capacity(5 + data.len());
    buff.extend_from_slice(&[cla, ins, p1, p2, data.len() as u8]);
    buff.extend_from_slice(data);

    Ok(buff)
}

/// Helper macro for encoding `bitflags` types
#[macro_export]
macro_rules! encdec_bitflags {
    ($b:ty) => {
        impl encdec::Encode for $b {
            type Error = ApduError;

            fn encode(&self, buff: &mut [u8]) -> Result<usize, Self::Error> {
                let bits: u8 = self.bits();
                encdec::Encode::encode(&bits, buff).map_err(|e| e.into())
            }

            fn encode_len(&self) -> Result<usize, Self::Error> {
                let bits: u8 = self.bits();
                encdec::Encode::encode_len(&bits).map_err(|e| e.into())
            }
        }

        impl encdec::DecodeOwned for $b {
            type Output = $b;
            type Error = ApduError;

            fn decode_owned(buff: &[u8]) -> Result<(Self, usize), Self::Error> {
                if buff.is_empty() {
                    return Err(ApduError::InvalidLength);
                }

                let v = <$b>::from_bits_truncate(buff[0]);
                Ok((v, 1))
            }
        }
    };
}
