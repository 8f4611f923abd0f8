// Copyright (c) 2022-2023 The MobileCoin Foundation

use super::{stake_credential, Writer};
use crate::{tx::*, Error};

/// Certificate kind tags
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
#[repr(u8)]
enum CertificateKind {
    StakeRegistration = 0x00,
    StakeDeregistration = 0x01,
    StakeDelegation = 0x02,
    StakePoolRegistration = 0x03,
    StakePoolRetirement = 0x04,
}

const DEVICE_OWNED: u8 = 0x01;
const THIRD_PARTY: u8 = 0x02;

/// Encode the `CERTIFICATES` message for a certificate
pub fn certificate(c: &Certificate) -> Vec<u8> {
    let w = Writer::new();

    match c {
        Certificate::StakeRegistration { credential } => {
            stake_credential(w.u8(CertificateKind::StakeRegistration as u8), credential)
        }
        Certificate::StakeDeregistration { credential } => {
            stake_credential(w.u8(CertificateKind::StakeDeregistration as u8), credential)
        }
        Certificate::StakeDelegation {
            credential,
            pool_key_hash,
        } => stake_credential(w.u8(CertificateKind::StakeDelegation as u8), credential)
            .bytes(pool_key_hash),
        Certificate::StakePoolRegistration(p) => w
            .u8(CertificateKind::StakePoolRegistration as u8)
            .u32(p.owners.len() as u32)
            .u32(p.relays.len() as u32),
        Certificate::StakePoolRetirement {
            path,
            retirement_epoch,
        } => w
            .u8(CertificateKind::StakePoolRetirement as u8)
            .path(path)
            .u64(*retirement_epoch),
    }
    .finish()
}

/// Encode pool registration `INIT`
pub fn pool_init(p: &PoolParams) -> Vec<u8> {
    Writer::new()
        .u32(p.owners.len() as u32)
        .u32(p.relays.len() as u32)
        .finish()
}

/// Encode the pool `POOL_KEY`, legacy firmware accepts only a key hash
pub fn pool_key(k: &PoolKey, legacy: bool) -> Result<Vec<u8>, Error> {
    let w = match (k, legacy) {
        (PoolKey::ThirdParty(h), true) => Writer::new().bytes(h),
        (PoolKey::ThirdParty(h), false) => Writer::new().u8(THIRD_PARTY).bytes(h),
        (PoolKey::DeviceOwned(p), false) => Writer::new().u8(DEVICE_OWNED).path(p),
        (PoolKey::DeviceOwned(_), true) => {
            return Err(Error::MalformedRequest(
                "device-owned pool key requires operator support",
            ))
        }
    };
    Ok(w.finish())
}

/// Encode pool `VRF_KEY`
pub fn pool_vrf_key(p: &PoolParams) -> Vec<u8> {
    p.vrf_key_hash.to_vec()
}

/// Encode pool `FINANCIALS`
pub fn pool_financials(p: &PoolParams) -> Vec<u8> {
    Writer::new()
        .u64(p.pledge)
        .u64(p.cost)
        .u64(p.margin.numerator)
        .u64(p.margin.denominator)
        .finish()
}

/// Encode the pool `REWARD_ACCOUNT`, legacy firmware accepts only raw accounts
pub fn pool_reward_account(a: &PoolRewardAccount, legacy: bool) -> Result<Vec<u8>, Error> {
    let w = match (a, legacy) {
        (PoolRewardAccount::ThirdParty(r), true) => Writer::new().bytes(r),
        (PoolRewardAccount::ThirdParty(r), false) => Writer::new().u8(THIRD_PARTY).bytes(r),
        (PoolRewardAccount::DeviceOwned(p), false) => Writer::new().u8(DEVICE_OWNED).path(p),
        (PoolRewardAccount::DeviceOwned(_), true) => {
            return Err(Error::MalformedRequest(
                "device-owned reward account requires operator support",
            ))
        }
    };
    Ok(w.finish())
}

/// Encode a pool `OWNERS` entry
pub fn pool_owner(o: &PoolOwner) -> Vec<u8> {
    match o {
        PoolOwner::DeviceOwned(p) => Writer::new().u8(DEVICE_OWNED).path(p),
        PoolOwner::ThirdParty(h) => Writer::new().u8(THIRD_PARTY).bytes(h),
    }
    .finish()
}

fn optional<T>(w: Writer, v: Option<T>, f: impl FnOnce(Writer, T) -> Writer) -> Writer {
    match v {
        Some(v) => f(w.presence(true), v),
        None => w.presence(false),
    }
}

/// Encode a pool `RELAYS` entry
pub fn pool_relay(r: &Relay) -> Vec<u8> {
    let w = Writer::new();

    match r {
        Relay::SingleHostIp { port, ipv4, ipv6 } => {
            let w = optional(w.u8(0x00), *port, Writer::u16);
            let w = optional(w, ipv4.as_ref(), |w, v| w.bytes(v));
            optional(w, ipv6.as_ref(), |w, v| w.bytes(v))
        }
        Relay::SingleHostName { port, dns_name } => {
            optional(w.u8(0x01), *port, Writer::u16).bytes(dns_name.as_bytes())
        }
        Relay::MultiHostName { dns_name } => w.u8(0x02).bytes(dns_name.as_bytes()),
    }
    .finish()
}

/// Encode pool `METADATA`
pub fn pool_metadata(m: &Option<PoolMetadata>) -> Vec<u8> {
    optional(Writer::new(), m.as_ref(), |w, m| {
        w.bytes(&m.hash).bytes(m.url.as_bytes())
    })
    .finish()
}
