// Copyright (c) 2022-2023 The MobileCoin Foundation

//! Field encoders, producing the payload for each ceremony message
//!
//! All integers are big-endian, paths are encoded as
//! `[DEPTH (u8), INDEX_0 (u32), ... INDEX_N (u32)]`.

use byteorder::{BigEndian, ByteOrder};

use crate::{compat::Compatibility, tx::*, Bip32Path};

mod aux_data;
pub use aux_data::*;

mod cert;
pub use cert::*;

mod output;
pub use output::*;

/// Optional field absent
pub const ABSENT: u8 = 0x01;
/// Optional field present
pub const PRESENT: u8 = 0x02;

/// Payload writer
#[derive(Clone, PartialEq, Debug, Default)]
pub struct Writer {
    buff: Vec<u8>,
}

impl Writer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn u8(mut self, v: u8) -> Self {
        self.buff.push(v);
        self
    }

    pub fn u16(self, v: u16) -> Self {
        let mut b = [0u8; 2];
        BigEndian::write_u16(&mut b, v);
        self.bytes(&b)
    }

    pub fn u32(self, v: u32) -> Self {
        let mut b = [0u8; 4];
        BigEndian::write_u32(&mut b, v);
        self.bytes(&b)
    }

    pub fn u64(self, v: u64) -> Self {
        let mut b = [0u8; 8];
        BigEndian::write_u64(&mut b, v);
        self.bytes(&b)
    }

    pub fn i64(self, v: i64) -> Self {
        let mut b = [0u8; 8];
        BigEndian::write_i64(&mut b, v);
        self.bytes(&b)
    }

    pub fn bytes(mut self, v: &[u8]) -> Self {
        self.buff.extend_from_slice(v);
        self
    }

    /// Length-prefixed (u32) bytes
    pub fn var_bytes(self, v: &[u8]) -> Self {
        self.u32(v.len() as u32).bytes(v)
    }

    pub fn path(mut self, p: &Bip32Path) -> Self {
        p.encode(&mut self.buff);
        self
    }

    /// Presence flag for an optional field
    pub fn presence(self, present: bool) -> Self {
        self.u8(match present {
            true => PRESENT,
            false => ABSENT,
        })
    }

    /// Apply `f` only if `cond` holds
    pub fn when(self, cond: bool, f: impl FnOnce(Self) -> Self) -> Self {
        match cond {
            true => f(self),
            false => self,
        }
    }

    pub fn finish(self) -> Vec<u8> {
        self.buff
    }
}

/// Encode the `INIT` stage payload
pub fn tx_init(c: &Compatibility, req: &SigningRequest, num_witnesses: usize) -> Vec<u8> {
    let tx = &req.tx;

    Writer::new()
        .u8(tx.network.network_id)
        .u32(tx.network.protocol_magic)
        .presence(tx.ttl.is_some())
        .presence(tx.aux_data.is_some())
        .presence(tx.validity_interval_start.is_some())
        .when(c.mint, |w| w.presence(tx.mint.is_some()))
        .when(c.script_data_hash, |w| w.presence(tx.script_data_hash.is_some()))
        .when(c.network_id, |w| w.presence(tx.include_network_id))
        .when(c.collateral_output, |w| w.presence(tx.collateral_output.is_some()))
        .when(c.total_collateral, |w| w.presence(tx.total_collateral.is_some()))
        .u8(req.signing_mode as u8)
        .u32(tx.inputs.len() as u32)
        .u32(tx.outputs.len() as u32)
        .u32(tx.certificates.len() as u32)
        .u32(tx.withdrawals.len() as u32)
        .when(c.collateral_inputs, |w| w.u32(tx.collateral_inputs.len() as u32))
        .when(c.required_signers, |w| w.u32(tx.required_signers.len() as u32))
        .when(c.reference_inputs, |w| w.u32(tx.reference_inputs.len() as u32))
        .u32(num_witnesses as u32)
        .finish()
}

/// Encode an input, collateral input or reference input
pub fn tx_input(i: &TxInput) -> Vec<u8> {
    Writer::new()
        .bytes(&i.tx_hash)
        .u32(i.output_index)
        .finish()
}

/// Encode an amount or slot field (fee, TTL, validity start, total collateral)
pub fn uint64(v: u64) -> Vec<u8> {
    Writer::new().u64(v).finish()
}

/// Encode a 32-byte hash field (script data hash)
pub fn hash32(h: &[u8; DATA_HASH_LEN]) -> Vec<u8> {
    h.to_vec()
}

/// Encode a stake credential
pub fn stake_credential(w: Writer, s: &StakeCredential) -> Writer {
    match s {
        StakeCredential::KeyPath(p) => w.u8(0x00).path(p),
        StakeCredential::ScriptHash(h) => w.u8(0x01).bytes(h),
        StakeCredential::KeyHash(h) => w.u8(0x02).bytes(h),
    }
}

/// Encode a withdrawal
pub fn withdrawal(d: &Withdrawal) -> Vec<u8> {
    stake_credential(Writer::new().u64(d.amount), &d.stake_credential).finish()
}

/// Encode a required signer
pub fn required_signer(s: &RequiredSigner) -> Vec<u8> {
    match s {
        RequiredSigner::Path(p) => Writer::new().u8(0x00).path(p),
        RequiredSigner::Hash(h) => Writer::new().u8(0x01).bytes(h),
    }
    .finish()
}

/// Encode a witness request
pub fn witness(p: &Bip32Path) -> Vec<u8> {
    Writer::new().path(p).finish()
}

/// Encode device-owned address parameters
pub fn address_params(w: Writer, p: &AddressParams, network: &Network) -> Writer {
    let w = w.u8(p.address_type as u8);

    let w = match p.address_type {
        AddressType::Byron => w.u32(network.protocol_magic),
        _ => w.u8(network.network_id),
    };

    let w = match &p.spending {
        SpendingData::Path(p) => w.u8(0x11).path(p),
        SpendingData::ScriptHash(h) => w.u8(0x12).bytes(h),
        SpendingData::None => w.u8(0x13),
    };

    match &p.staking {
        StakingData::None => w.u8(0x11),
        StakingData::KeyPath(p) => w.u8(0x22).path(p),
        StakingData::KeyHash(h) => w.u8(0x33).bytes(h),
        StakingData::Pointer(p) => w
            .u8(0x44)
            .u32(p.block_index)
            .u32(p.tx_index)
            .u32(p.certificate_index),
        StakingData::ScriptHash(h) => w.u8(0x55).bytes(h),
    }
}

/// Encode an output or payment destination
pub fn destination(w: Writer, d: &OutputDestination, network: &Network) -> Writer {
    match d {
        OutputDestination::ThirdParty { address } => w.u8(0x01).var_bytes(address),
        OutputDestination::DeviceOwned(p) => address_params(w.u8(0x02), p, network),
    }
}
