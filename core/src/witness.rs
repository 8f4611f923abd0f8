// Copyright (c) 2022-2023 The MobileCoin Foundation

//! Witness path collection
//!
//! Gathers the key paths the device must sign with, each distinct path
//! requested at most once in first-occurrence order.

use std::collections::HashSet;

use crate::{tx::*, Bip32Path};

/// Order-preserving set of witness paths
#[derive(Clone, Debug, Default)]
pub struct WitnessPaths {
    paths: Vec<Bip32Path>,
    seen: HashSet<Bip32Path>,
}

impl WitnessPaths {
    /// Append a path if not already present
    pub fn insert(&mut self, path: &Bip32Path) -> bool {
        if self.seen.contains(path) {
            return false;
        }

        self.seen.insert(path.clone());
        self.paths.push(path.clone());
        true
    }

    pub fn len(&self) -> usize {
        self.paths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    pub fn into_vec(self) -> Vec<Bip32Path> {
        self.paths
    }
}

impl<'a> Extend<&'a Bip32Path> for WitnessPaths {
    fn extend<I: IntoIterator<Item = &'a Bip32Path>>(&mut self, iter: I) {
        for p in iter {
            self.insert(p);
        }
    }
}

/// Collect witness paths for a signing request
pub fn collect_witness_paths(req: &SigningRequest) -> Vec<Bip32Path> {
    let mut w = WitnessPaths::default();

    // Multisig credentials may map to any number of keys, use only the caller-supplied paths
    if req.signing_mode != SigningMode::Multisig {
        let tx = &req.tx;

        w.extend(tx.inputs.iter().filter_map(|i| i.path.as_ref()));

        for c in &tx.certificates {
            w.extend(certificate_paths(c));
        }

        w.extend(
            tx.withdrawals
                .iter()
                .filter_map(|d| d.stake_credential.path()),
        );

        w.extend(tx.required_signers.iter().filter_map(|s| match s {
            RequiredSigner::Path(p) => Some(p),
            RequiredSigner::Hash(_) => None,
        }));

        w.extend(tx.collateral_inputs.iter().filter_map(|i| i.path.as_ref()));
    }

    w.extend(req.additional_witness_paths.iter());

    w.into_vec()
}

/// Device keys witnessing a certificate
fn certificate_paths(c: &Certificate) -> Vec<&Bip32Path> {
    match c {
        // Registration requires no witness
        Certificate::StakeRegistration { .. } => vec![],
        Certificate::StakeDeregistration { credential }
        | Certificate::StakeDelegation { credential, .. } => credential.path().into_iter().collect(),
        Certificate::StakePoolRegistration(p) => {
            let mut paths: Vec<_> = p
                .owners
                .iter()
                .filter_map(|o| match o {
                    PoolOwner::DeviceOwned(o) => Some(o),
                    PoolOwner::ThirdParty(_) => None,
                })
                .collect();

            if let PoolKey::DeviceOwned(k) = &p.pool_key {
                paths.push(k);
            }

            paths
        }
        Certificate::StakePoolRetirement { path, .. } => vec![path],
    }
}
