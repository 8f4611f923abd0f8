// Copyright (c) 2022-2023 The MobileCoin Foundation

use super::{KeyHash, DATA_HASH_LEN};
use crate::Bip32Path;

/// Reward account length (header byte and stake key hash)
pub const REWARD_ACCOUNT_LEN: usize = 29;

/// Stake credential for certificates and withdrawals
#[derive(Clone, PartialEq, Debug)]
pub enum StakeCredential {
    KeyPath(Bip32Path),
    KeyHash(KeyHash),
    ScriptHash(KeyHash),
}

impl StakeCredential {
    /// Fetch the device key path, if any
    pub fn path(&self) -> Option<&Bip32Path> {
        match self {
            StakeCredential::KeyPath(p) => Some(p),
            StakeCredential::KeyHash(_) | StakeCredential::ScriptHash(_) => None,
        }
    }
}

/// Transaction certificate
#[derive(Clone, PartialEq, Debug)]
pub enum Certificate {
    StakeRegistration {
        credential: StakeCredential,
    },
    StakeDeregistration {
        credential: StakeCredential,
    },
    StakeDelegation {
        credential: StakeCredential,
        pool_key_hash: KeyHash,
    },
    StakePoolRegistration(PoolParams),
    StakePoolRetirement {
        path: Bip32Path,
        retirement_epoch: u64,
    },
}

impl Certificate {
    /// Stake credential carried by the certificate, if any
    pub fn stake_credential(&self) -> Option<&StakeCredential> {
        match self {
            Certificate::StakeRegistration { credential }
            | Certificate::StakeDeregistration { credential }
            | Certificate::StakeDelegation { credential, .. } => Some(credential),
            Certificate::StakePoolRegistration(_) | Certificate::StakePoolRetirement { .. } => None,
        }
    }
}

/// Pool cold key
#[derive(Clone, PartialEq, Debug)]
pub enum PoolKey {
    DeviceOwned(Bip32Path),
    ThirdParty(KeyHash),
}

/// Pool owner stake key
#[derive(Clone, PartialEq, Debug)]
pub enum PoolOwner {
    DeviceOwned(Bip32Path),
    ThirdParty(KeyHash),
}

/// Pool reward account
#[derive(Clone, PartialEq, Debug)]
pub enum PoolRewardAccount {
    DeviceOwned(Bip32Path),
    ThirdParty([u8; REWARD_ACCOUNT_LEN]),
}

/// Pool margin as a fraction
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub struct Margin {
    pub numerator: u64,
    pub denominator: u64,
}

/// Pool relay
#[derive(Clone, PartialEq, Debug)]
pub enum Relay {
    SingleHostIp {
        port: Option<u16>,
        ipv4: Option<[u8; 4]>,
        ipv6: Option<[u8; 16]>,
    },
    SingleHostName {
        port: Option<u16>,
        dns_name: String,
    },
    MultiHostName {
        dns_name: String,
    },
}

/// Pool metadata reference
#[derive(Clone, PartialEq, Debug)]
pub struct PoolMetadata {
    pub url: String,
    pub hash: [u8; DATA_HASH_LEN],
}

/// Stake pool registration parameters
#[derive(Clone, PartialEq, Debug)]
pub struct PoolParams {
    pub pool_key: PoolKey,
    pub vrf_key_hash: [u8; DATA_HASH_LEN],
    pub pledge: u64,
    pub cost: u64,
    pub margin: Margin,
    pub reward_account: PoolRewardAccount,
    pub owners: Vec<PoolOwner>,
    pub relays: Vec<Relay>,
    pub metadata: Option<PoolMetadata>,
}
