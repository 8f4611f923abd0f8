// Copyright (c) 2022-2023 The MobileCoin Foundation

use super::{destination, Writer};
use crate::{tx::*, Bip32Path};

/// Auxiliary data provided as an arbitrary hash
const AUX_DATA_HASH: u8 = 0x00;
/// Auxiliary data constructed on the device
const AUX_DATA_VOTING: u8 = 0x01;

const VOTE_KEY_RAW: u8 = 0x01;
const VOTE_KEY_PATH: u8 = 0x02;

/// Encode the top-level `AUX_DATA` message
pub fn aux_data(a: &AuxiliaryData) -> Vec<u8> {
    match a {
        AuxiliaryData::Hash(h) => Writer::new().u8(AUX_DATA_HASH).bytes(h),
        AuxiliaryData::VotingRegistration(_) => Writer::new().u8(AUX_DATA_VOTING),
    }
    .finish()
}

/// Encode voting registration `INIT`
pub fn voting_init(r: &VotingRegistration) -> Vec<u8> {
    Writer::new()
        .u8(r.format as u8)
        .u32(r.delegations.len() as u32)
        .finish()
}

fn write_vote_key(w: Writer, k: &VoteKey, typed: bool) -> Writer {
    match (k, typed) {
        (VoteKey::Key(k), false) => w.bytes(k),
        (VoteKey::Key(k), true) => w.u8(VOTE_KEY_RAW).bytes(k),
        // Derived keys are only accepted by firmware supporting typed keys
        (VoteKey::Path(p), _) => w.u8(VOTE_KEY_PATH).path(p),
    }
}

/// Encode a direct `VOTE_KEY`, pre-CIP-36 firmware accepts only raw keys
pub fn vote_key(k: &VoteKey, typed: bool) -> Vec<u8> {
    write_vote_key(Writer::new(), k, typed).finish()
}

/// Encode a `DELEGATION` entry
pub fn delegation(d: &Delegation) -> Vec<u8> {
    write_vote_key(Writer::new(), &d.vote_key, true)
        .u32(d.weight)
        .finish()
}

/// Encode `STAKING_KEY`
pub fn staking_key(p: &Bip32Path) -> Vec<u8> {
    Writer::new().path(p).finish()
}

/// Encode `PAYMENT_ADDRESS`
pub fn payment_destination(d: &OutputDestination, network: &Network) -> Vec<u8> {
    destination(Writer::new(), d, network).finish()
}

/// Encode `NONCE`
pub fn nonce(n: u64) -> Vec<u8> {
    Writer::new().u64(n).finish()
}

/// Encode `VOTING_PURPOSE`
pub fn voting_purpose(p: Option<u64>) -> Vec<u8> {
    match p {
        Some(p) => Writer::new().presence(true).u64(p),
        None => Writer::new().presence(false),
    }
    .finish()
}
