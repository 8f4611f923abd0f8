// Copyright (c) 2022-2023 The MobileCoin Foundation

use strum::Display;

use super::{OutputDestination, DATA_HASH_LEN};
use crate::Bip32Path;

/// Voting key length (ed25519 public key)
pub const VOTE_KEY_LEN: usize = 32;

/// Transaction auxiliary data
#[derive(Clone, PartialEq, Debug)]
pub enum AuxiliaryData {
    /// Hash of auxiliary data serialised by the caller
    Hash([u8; DATA_HASH_LEN]),
    /// Voting registration constructed and signed by the device
    VotingRegistration(VotingRegistration),
}

/// Voting registration metadata format
#[derive(Copy, Clone, PartialEq, Eq, Debug, Display)]
#[repr(u8)]
pub enum VotingFormat {
    Cip15 = 0x01,
    Cip36 = 0x02,
}

/// Voting public key, provided or derived on the device
#[derive(Clone, PartialEq, Debug)]
pub enum VoteKey {
    Key([u8; VOTE_KEY_LEN]),
    Path(Bip32Path),
}

/// Weighted voting power delegation
#[derive(Clone, PartialEq, Debug)]
pub struct Delegation {
    pub vote_key: VoteKey,
    pub weight: u32,
}

/// Voting registration (CIP-15 / CIP-36)
///
/// Exactly one of `vote_key` or a non-empty `delegations` list must be provided.
#[derive(Clone, PartialEq, Debug)]
pub struct VotingRegistration {
    pub format: VotingFormat,
    pub vote_key: Option<VoteKey>,
    pub delegations: Vec<Delegation>,
    pub staking_path: Bip32Path,
    pub payment_destination: OutputDestination,
    pub nonce: u64,
    pub voting_purpose: Option<u64>,
}

impl VotingRegistration {
    /// Check whether any vote key is referenced by derivation path
    pub fn has_vote_key_path(&self) -> bool {
        self.vote_key
            .iter()
            .chain(self.delegations.iter().map(|d| &d.vote_key))
            .any(|k| matches!(k, VoteKey::Path(_)))
    }
}
