// Copyright (c) 2022-2023 The MobileCoin Foundation

//! Pre-flight request validation
//!
//! Checks a [SigningRequest] for host-side preconditions, then against the
//! [Compatibility] of the connected firmware, failing on the first unsupported
//! feature before any message is sent.

use ledger_ada_apdu::version::{AppFlags, Version};

#[cfg(feature = "log")]
use log::debug;

use crate::{
    compat::{ensure_version_compatible, Compatibility},
    tx::*,
    Error,
};

/// Validate a signing request for the provided firmware version and flags
pub fn validate(version: &Version, flags: AppFlags, req: &SigningRequest) -> Result<(), Error> {
    ensure_version_compatible(version)?;

    let c = Compatibility::new(version, flags);

    let r = check_preconditions(req).and_then(|_| Validator { c: &c, version }.check(req));

    #[cfg(feature = "log")]
    if let Err(e) = &r {
        debug!("request rejected: {e}");
    }

    r
}

/// Check host-side request preconditions, independent of firmware capabilities
pub fn check_preconditions(req: &SigningRequest) -> Result<(), Error> {
    // Voting registrations carry exactly one of a vote key or delegations
    if let Some(AuxiliaryData::VotingRegistration(r)) = &req.tx.aux_data {
        match (&r.vote_key, r.delegations.is_empty()) {
            (Some(_), false) => {
                return Err(Error::MalformedRequest(
                    "voting registration with both vote key and delegations",
                ))
            }
            (None, true) => {
                return Err(Error::MalformedRequest(
                    "voting registration without vote key or delegations",
                ))
            }
            _ => (),
        }
    }

    Ok(())
}

struct Validator<'a> {
    c: &'a Compatibility,
    version: &'a Version,
}

impl<'a> Validator<'a> {
    /// Fail with the provided feature name if unsupported
    fn require(&self, supported: bool, feature: &'static str) -> Result<(), Error> {
        match supported {
            true => Ok(()),
            false => Err(Error::UnsupportedFeature {
                feature,
                version: self.version.to_string(),
            }),
        }
    }

    fn check(&self, req: &SigningRequest) -> Result<(), Error> {
        let c = self.c;
        let tx = &req.tx;

        // Signing mode
        match req.signing_mode {
            SigningMode::PoolRegistrationAsOperator => {
                self.require(c.pool_registration_operator, "pool registration as operator")?
            }
            SigningMode::Multisig => self.require(c.multisig, "multisig")?,
            SigningMode::Plutus => self.require(c.plutus, "plutus")?,
            SigningMode::Ordinary | SigningMode::PoolRegistrationAsOwner => (),
        }

        // Outputs
        for o in tx.outputs.iter().chain(tx.collateral_output.iter()) {
            self.check_output(o)?;
        }

        if tx.ttl == Some(0) {
            self.require(c.zero_ttl, "zero TTL")?;
        }

        // Stake credentials
        let credentials = tx
            .certificates
            .iter()
            .filter_map(|c| c.stake_credential())
            .chain(tx.withdrawals.iter().map(|w| &w.stake_credential));
        for s in credentials {
            match s {
                StakeCredential::KeyPath(_) => (),
                StakeCredential::KeyHash(_) => {
                    self.require(c.key_hash_stake_credential, "key hash stake credential")?
                }
                StakeCredential::ScriptHash(_) => {
                    self.require(c.script_hash_stake_credential, "script hash stake credential")?
                }
            }
        }

        for cert in &tx.certificates {
            if let Certificate::StakePoolRetirement { .. } = cert {
                self.require(c.pool_retirement, "pool retirement")?;
            }
        }

        if tx.mint.is_some() {
            self.require(c.mint, "mint")?;
        }
        if tx.validity_interval_start.is_some() {
            self.require(c.validity_interval_start, "validity interval start")?;
        }
        if tx.script_data_hash.is_some() {
            self.require(c.script_data_hash, "script data hash")?;
        }
        if !tx.collateral_inputs.is_empty() {
            self.require(c.collateral_inputs, "collateral inputs")?;
        }
        if !tx.required_signers.is_empty() {
            self.require(c.required_signers, "required signers")?;

            if matches!(req.signing_mode, SigningMode::Ordinary | SigningMode::Multisig) {
                self.require(
                    c.required_signers_in_ordinary,
                    "required signers in ordinary and multisig transactions",
                )?;
            }
        }
        if tx.include_network_id {
            self.require(c.network_id, "network id")?;
        }
        if tx.collateral_output.is_some() {
            self.require(c.collateral_output, "collateral output")?;
        }
        if tx.total_collateral.is_some() {
            self.require(c.total_collateral, "total collateral")?;
        }
        if !tx.reference_inputs.is_empty() {
            self.require(c.reference_inputs, "reference inputs")?;
        }

        // Voting registration
        if let Some(AuxiliaryData::VotingRegistration(r)) = &tx.aux_data {
            self.check_voting(r)?;
        }

        Ok(())
    }

    fn check_output(&self, o: &TxOutput) -> Result<(), Error> {
        let c = self.c;

        if let OutputDestination::DeviceOwned(p) = &o.destination {
            if p.has_script_hash() {
                self.require(c.script_hash_address, "script hash in address")?;
            }
        }

        if !o.token_bundle.is_empty() {
            self.require(c.multi_asset, "multi-asset")?;
        }

        match &o.datum {
            Some(Datum::Hash(_)) => self.require(c.datum_hash, "datum hash")?,
            Some(Datum::Inline(_)) => self.require(c.inline_datum, "inline datum")?,
            None => (),
        }

        if o.format == OutputFormat::MapBabbage {
            self.require(c.map_format, "map output format")?;
        }

        if o.reference_script.is_some() {
            self.require(c.reference_script, "reference script")?;
        }

        Ok(())
    }

    fn check_voting(&self, r: &VotingRegistration) -> Result<(), Error> {
        let c = self.c;

        self.require(c.voting_registration_cip15, "voting registration")?;

        if r.format == VotingFormat::Cip36 {
            self.require(c.voting_registration_cip36, "CIP-36 voting registration")?;
        }
        if !r.delegations.is_empty() {
            self.require(c.voting_delegations, "voting delegations")?;
        }
        if r.voting_purpose.is_some() {
            self.require(c.voting_purpose, "voting purpose")?;
        }
        if r.has_vote_key_path() {
            self.require(c.vote_key_path, "vote key derivation path")?;
        }
        if let OutputDestination::ThirdParty { .. } = r.payment_destination {
            self.require(
                c.third_party_payment_destination,
                "third party payment destination",
            )?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::Bip32Path;

    fn v(major: u8, minor: u8) -> Version {
        Version::new(major, minor, 0)
    }

    fn base_request() -> SigningRequest {
        let mut req = SigningRequest::default();
        req.tx.inputs.push(TxInput {
            tx_hash: [0x11; 32],
            output_index: 0,
            path: Some(Bip32Path::shelley(0, 0, 0)),
        });
        req.tx.outputs.push(TxOutput::new(
            OutputDestination::ThirdParty {
                address: vec![0x01; 57],
            },
            1_000_000,
        ));
        req.tx.fee = 170_000;
        req.tx.ttl = Some(1000);
        req
    }

    fn assert_unsupported(r: Result<(), Error>, name: &str) {
        match r {
            Err(Error::UnsupportedFeature { feature, .. }) => assert_eq!(feature, name),
            other => panic!("expected unsupported feature '{name}', got {other:?}"),
        }
    }

    #[test]
    fn accept_plain_transaction() {
        let req = base_request();
        for ver in [v(2, 2), v(3, 0), v(6, 0)] {
            validate(&ver, AppFlags::empty(), &req).unwrap();
        }
    }

    #[test]
    fn reject_old_firmware() {
        let req = base_request();
        assert!(matches!(
            validate(&v(2, 1), AppFlags::empty(), &req),
            Err(Error::VersionIncompatible(_))
        ));
    }

    #[test]
    fn reject_signing_modes() {
        let tests = &[
            (SigningMode::PoolRegistrationAsOperator, v(2, 3), "pool registration as operator"),
            (SigningMode::Multisig, v(2, 4), "multisig"),
            (SigningMode::Plutus, v(3, 0), "plutus"),
        ];

        for (mode, ver, name) in tests {
            let req = SigningRequest {
                signing_mode: *mode,
                ..base_request()
            };
            assert_unsupported(validate(ver, AppFlags::empty(), &req), name);
        }

        // Multisig unavailable on XS builds
        let req = SigningRequest {
            signing_mode: SigningMode::Multisig,
            ..base_request()
        };
        assert_unsupported(validate(&v(5, 0), AppFlags::APP_XS, &req), "multisig");
    }

    #[test]
    fn reject_structural_features() {
        let tests: Vec<(Box<dyn Fn(&mut SigningRequest)>, Version, &str)> = vec![
            (Box::new(|r| r.tx.ttl = Some(0)), v(2, 2), "zero TTL"),
            (
                Box::new(|r| r.tx.outputs[0].datum = Some(Datum::Hash([0; 32]))),
                v(3, 0),
                "datum hash",
            ),
            (
                Box::new(|r| r.tx.outputs[0].datum = Some(Datum::Inline(vec![0; 10]))),
                v(4, 1),
                "inline datum",
            ),
            (
                Box::new(|r| r.tx.outputs[0].format = OutputFormat::MapBabbage),
                v(4, 1),
                "map output format",
            ),
            (
                Box::new(|r| r.tx.outputs[0].reference_script = Some(vec![0; 10])),
                v(4, 1),
                "reference script",
            ),
            (Box::new(|r| r.tx.mint = Some(vec![])), v(2, 4), "mint"),
            (Box::new(|r| r.tx.script_data_hash = Some([0; 32])), v(3, 0), "script data hash"),
            (Box::new(|r| r.tx.include_network_id = true), v(3, 0), "network id"),
            (Box::new(|r| r.tx.total_collateral = Some(5)), v(4, 1), "total collateral"),
            (
                Box::new(|r| {
                    r.tx.withdrawals.push(Withdrawal {
                        stake_credential: StakeCredential::KeyHash([0; 28]),
                        amount: 10,
                    })
                }),
                v(3, 0),
                "key hash stake credential",
            ),
            (
                Box::new(|r| {
                    r.tx.certificates.push(Certificate::StakeDelegation {
                        credential: StakeCredential::ScriptHash([0; 28]),
                        pool_key_hash: [0; 28],
                    })
                }),
                v(2, 4),
                "script hash stake credential",
            ),
            (
                Box::new(|r| {
                    r.tx.certificates.push(Certificate::StakePoolRetirement {
                        path: Bip32Path::new([0x8000_0000 | 1853]).unwrap(),
                        retirement_epoch: 100,
                    })
                }),
                v(2, 3),
                "pool retirement",
            ),
            (
                Box::new(|r| {
                    r.tx.required_signers.push(RequiredSigner::Hash([0; 28]))
                }),
                v(4, 0),
                "required signers in ordinary and multisig transactions",
            ),
            (
                Box::new(|r| {
                    r.signing_mode = SigningMode::Multisig;
                    r.tx.inputs[0].path = None;
                    r.tx.required_signers.push(RequiredSigner::Hash([0; 28]))
                }),
                v(4, 0),
                "required signers in ordinary and multisig transactions",
            ),
            (
                Box::new(|r| {
                    r.tx.outputs[0].destination = OutputDestination::DeviceOwned(AddressParams {
                        address_type: AddressType::BasePaymentScriptStakeKey,
                        spending: SpendingData::ScriptHash([0; 28]),
                        staking: StakingData::KeyPath(Bip32Path::stake(0)),
                    })
                }),
                v(2, 4),
                "script hash in address",
            ),
        ];

        for (f, ver, name) in tests {
            let mut req = base_request();
            f(&mut req);

            assert_unsupported(validate(&ver, AppFlags::empty(), &req), name);
            validate(&v(6, 0), AppFlags::empty(), &req).unwrap();
        }
    }

    #[test]
    fn required_signers_in_plutus() {
        let mut req = base_request();
        req.signing_mode = SigningMode::Plutus;
        req.tx.required_signers.push(RequiredSigner::Path(Bip32Path::shelley(0, 0, 1)));

        validate(&v(4, 0), AppFlags::empty(), &req).unwrap();
        assert_unsupported(validate(&v(3, 0), AppFlags::empty(), &req), "plutus");
    }

    #[test]
    fn first_failure_reported() {
        // Mode is checked before structural features
        let mut req = base_request();
        req.signing_mode = SigningMode::Plutus;
        req.tx.ttl = Some(0);
        req.tx.reference_inputs.push(req.tx.inputs[0].clone());

        assert_unsupported(validate(&v(2, 2), AppFlags::empty(), &req), "plutus");
        assert_unsupported(validate(&v(4, 0), AppFlags::empty(), &req), "reference inputs");
    }

    #[test]
    fn vote_key_xor_delegations() {
        let delegation = Delegation {
            vote_key: VoteKey::Key([0x33; 32]),
            weight: 1,
        };

        // Malformed regardless of firmware capabilities
        for ver in [v(2, 3), v(5, 0), v(6, 0)] {
            let mut r = registration();
            r.delegations.push(delegation.clone());

            let mut req = base_request();
            req.tx.aux_data = Some(AuxiliaryData::VotingRegistration(r));
            assert!(matches!(
                validate(&ver, AppFlags::empty(), &req),
                Err(Error::MalformedRequest(_))
            ));

            let mut r = registration();
            r.vote_key = None;

            let mut req = base_request();
            req.tx.aux_data = Some(AuxiliaryData::VotingRegistration(r));
            assert!(matches!(
                validate(&ver, AppFlags::empty(), &req),
                Err(Error::MalformedRequest(_))
            ));
        }
    }

    fn registration() -> VotingRegistration {
        VotingRegistration {
            format: VotingFormat::Cip15,
            vote_key: Some(VoteKey::Key([0x22; 32])),
            delegations: vec![],
            staking_path: Bip32Path::stake(0),
            payment_destination: OutputDestination::DeviceOwned(AddressParams {
                address_type: AddressType::BasePaymentKeyStakeKey,
                spending: SpendingData::Path(Bip32Path::shelley(0, 0, 0)),
                staking: StakingData::KeyPath(Bip32Path::stake(0)),
            }),
            nonce: 1,
            voting_purpose: None,
        }
    }

    #[test]
    fn reject_voting_features() {
        let tests: Vec<(Box<dyn Fn(&mut VotingRegistration)>, Version, &str)> = vec![
            (Box::new(|_| ()), v(2, 2), "voting registration"),
            (Box::new(|r| r.format = VotingFormat::Cip36), v(5, 0), "CIP-36 voting registration"),
            (
                Box::new(|r| {
                    r.vote_key = None;
                    r.delegations.push(Delegation {
                        vote_key: VoteKey::Key([0; 32]),
                        weight: 1,
                    });
                }),
                v(5, 0),
                "voting delegations",
            ),
            (Box::new(|r| r.voting_purpose = Some(0)), v(5, 0), "voting purpose"),
            (
                Box::new(|r| r.vote_key = Some(VoteKey::Path(Bip32Path::new([0x8000_0000 | 1694]).unwrap()))),
                v(5, 0),
                "vote key derivation path",
            ),
            (
                Box::new(|r| {
                    r.payment_destination = OutputDestination::ThirdParty {
                        address: vec![0; 57],
                    }
                }),
                v(5, 0),
                "third party payment destination",
            ),
        ];

        for (f, ver, name) in tests {
            let mut r = registration();
            f(&mut r);

            let mut req = base_request();
            req.tx.aux_data = Some(AuxiliaryData::VotingRegistration(r));

            assert_unsupported(validate(&ver, AppFlags::empty(), &req), name);
            validate(&v(6, 0), AppFlags::empty(), &req).unwrap();
        }
    }
}
