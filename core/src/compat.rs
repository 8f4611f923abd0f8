// Copyright (c) 2022-2023 The MobileCoin Foundation

//! Firmware capability matrix
//!
//! Maps a firmware [Version] and [AppFlags] to the set of transaction features
//! the application supports. Every capability is monotonic in version for a
//! fixed flag set, a feature introduced at version `V` remains available at
//! every version `>= V`.

use ledger_ada_apdu::version::{AppFlags, Version};

use crate::Error;

/// Minimum supported firmware version
pub const MIN_VERSION: Version = Version::new(2, 2, 0);

/// Check the firmware version is supported by this engine
pub fn ensure_version_compatible(version: &Version) -> Result<(), Error> {
    if *version < MIN_VERSION {
        return Err(Error::VersionIncompatible(*version));
    }
    Ok(())
}

/// Feature support for a given firmware version
#[derive(Copy, Clone, PartialEq, Eq, Debug, Default)]
pub struct Compatibility {
    pub multi_asset: bool,
    pub validity_interval_start: bool,

    pub zero_ttl: bool,
    pub voting_registration_cip15: bool,
    pub aux_data_before_tx_body: bool,

    /// Operator mode and the rich pool registration layout
    pub pool_registration_operator: bool,
    pub pool_retirement: bool,

    pub script_hash_address: bool,
    pub script_hash_stake_credential: bool,
    pub multisig: bool,
    pub mint: bool,

    pub plutus: bool,
    pub datum_hash: bool,
    pub script_data_hash: bool,
    pub collateral_inputs: bool,
    pub required_signers: bool,
    pub network_id: bool,
    pub key_hash_stake_credential: bool,

    pub required_signers_in_ordinary: bool,

    pub map_format: bool,
    pub inline_datum: bool,
    pub reference_script: bool,
    pub collateral_output: bool,
    pub total_collateral: bool,
    pub reference_inputs: bool,

    pub voting_registration_cip36: bool,
    pub voting_delegations: bool,
    pub voting_purpose: bool,
    pub vote_key_path: bool,
    pub third_party_payment_destination: bool,
}

impl Compatibility {
    /// Compute supported features for a firmware version and application flags
    pub fn new(version: &Version, flags: AppFlags) -> Self {
        let v = |major, minor| *version >= Version::new(major, minor, 0);
        let full = !flags.contains(AppFlags::APP_XS);

        Self {
            multi_asset: v(2, 2),
            validity_interval_start: v(2, 2),

            zero_ttl: v(2, 3),
            voting_registration_cip15: v(2, 3),
            aux_data_before_tx_body: v(2, 3),

            pool_registration_operator: v(2, 4),
            pool_retirement: v(2, 4) && full,

            script_hash_address: v(3, 0) && full,
            script_hash_stake_credential: v(3, 0) && full,
            multisig: v(3, 0) && full,
            mint: v(3, 0) && full,

            plutus: v(4, 0),
            datum_hash: v(4, 0),
            script_data_hash: v(4, 0),
            collateral_inputs: v(4, 0),
            required_signers: v(4, 0),
            network_id: v(4, 0),
            key_hash_stake_credential: v(4, 0),

            required_signers_in_ordinary: v(4, 1),

            map_format: v(5, 0),
            inline_datum: v(5, 0),
            reference_script: v(5, 0),
            collateral_output: v(5, 0),
            total_collateral: v(5, 0),
            reference_inputs: v(5, 0),

            voting_registration_cip36: v(6, 0),
            voting_delegations: v(6, 0),
            voting_purpose: v(6, 0),
            vote_key_path: v(6, 0),
            third_party_payment_destination: v(6, 0),
        }
    }

    /// Named capability flags, in declaration order
    pub fn flags(&self) -> [(&'static str, bool); 30] {
        [
            ("multi-asset", self.multi_asset),
            ("validity interval start", self.validity_interval_start),
            ("zero TTL", self.zero_ttl),
            ("voting registration", self.voting_registration_cip15),
            ("auxiliary data before tx body", self.aux_data_before_tx_body),
            ("pool registration as operator", self.pool_registration_operator),
            ("pool retirement", self.pool_retirement),
            ("script hash in address", self.script_hash_address),
            ("script hash stake credential", self.script_hash_stake_credential),
            ("multisig", self.multisig),
            ("mint", self.mint),
            ("plutus", self.plutus),
            ("datum hash", self.datum_hash),
            ("script data hash", self.script_data_hash),
            ("collateral inputs", self.collateral_inputs),
            ("required signers", self.required_signers),
            ("network id", self.network_id),
            ("key hash stake credential", self.key_hash_stake_credential),
            ("required signers in ordinary and multisig transactions", self.required_signers_in_ordinary),
            ("map output format", self.map_format),
            ("inline datum", self.inline_datum),
            ("reference script", self.reference_script),
            ("collateral output", self.collateral_output),
            ("total collateral", self.total_collateral),
            ("reference inputs", self.reference_inputs),
            ("CIP-36 voting registration", self.voting_registration_cip36),
            ("voting delegations", self.voting_delegations),
            ("voting purpose", self.voting_purpose),
            ("vote key derivation path", self.vote_key_path),
            ("third party payment destination", self.third_party_payment_destination),
        ]
    }
}
