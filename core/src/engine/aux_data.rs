// Copyright (c) 2022-2023 The MobileCoin Foundation

//! Auxiliary data stage sequences

use ledger_ada_apdu::tx::{Stage, SubStage, VotingStep};

use super::interaction::{Plan, Reply};
use crate::{compat::Compatibility, encode, tx::*};

/// Build the `AUX_DATA` sequence, voting registrations expanding into their own sub-sequence
pub(crate) fn aux_data(c: &Compatibility, a: &AuxiliaryData, network: &Network) -> Plan {
    let mut p = Plan::new();

    p.ack(Stage::AuxData, SubStage::None, encode::aux_data(a));

    if let AuxiliaryData::VotingRegistration(r) = a {
        p.append(voting_registration(c, r, network));
    }

    p
}

fn voting_registration(c: &Compatibility, r: &VotingRegistration, network: &Network) -> Plan {
    let mut p = Plan::new();
    let s = SubStage::Voting;

    // Format and delegation count are implied on CIP-15 only firmware
    if c.voting_registration_cip36 {
        p.ack(Stage::AuxData, s(VotingStep::Init), encode::voting_init(r));
    }

    // Exactly one of vote key or delegations, checked before planning
    match &r.vote_key {
        Some(k) => p.ack(
            Stage::AuxData,
            s(VotingStep::VoteKey),
            encode::vote_key(k, c.voting_registration_cip36),
        ),
        None => {
            for d in &r.delegations {
                p.ack(Stage::AuxData, s(VotingStep::Delegation), encode::delegation(d));
            }
        }
    }

    p.ack(
        Stage::AuxData,
        s(VotingStep::StakingKey),
        encode::staking_key(&r.staking_path),
    );
    p.ack(
        Stage::AuxData,
        s(VotingStep::PaymentAddress),
        encode::payment_destination(&r.payment_destination, network),
    );
    p.ack(Stage::AuxData, s(VotingStep::Nonce), encode::nonce(r.nonce));

    if c.voting_purpose {
        p.ack(
            Stage::AuxData,
            s(VotingStep::VotingPurpose),
            encode::voting_purpose(r.voting_purpose),
        );
    }

    p.expect(
        Stage::AuxData,
        s(VotingStep::Confirm),
        vec![],
        Reply::AuxDataSupplement,
    );

    p
}
