// Copyright (c) 2022-2023 The MobileCoin Foundation

//! Certificate stage sequences

use ledger_ada_apdu::tx::{PoolStep, Stage, SubStage};

#[cfg(feature = "log")]
use log::debug;

use super::interaction::Plan;
use crate::{compat::Compatibility, encode, tx::*, Error};

/// Build the sub-sequence for a certificate
pub(crate) fn certificate(c: &Compatibility, cert: &Certificate) -> Result<Plan, Error> {
    let mut p = Plan::new();

    p.ack(Stage::Certificates, SubStage::None, encode::certificate(cert));

    if let Certificate::StakePoolRegistration(params) = cert {
        p.append(pool_registration(c, params)?);
    }

    Ok(p)
}

/// Build the pool registration sub-sequence, message order is shared between
/// the rich and legacy layouts with only key and reward account payloads differing
fn pool_registration(c: &Compatibility, params: &PoolParams) -> Result<Plan, Error> {
    let legacy = !c.pool_registration_operator;

    #[cfg(feature = "log")]
    debug!(
        "pool registration ({} layout, {} owners, {} relays)",
        if legacy { "legacy" } else { "rich" },
        params.owners.len(),
        params.relays.len()
    );

    let mut p = Plan::new();
    let s = SubStage::Pool;

    p.ack(Stage::Certificates, s(PoolStep::Init), encode::pool_init(params));
    p.ack(
        Stage::Certificates,
        s(PoolStep::PoolKey),
        encode::pool_key(&params.pool_key, legacy)?,
    );
    p.ack(Stage::Certificates, s(PoolStep::VrfKey), encode::pool_vrf_key(params));
    p.ack(
        Stage::Certificates,
        s(PoolStep::Financials),
        encode::pool_financials(params),
    );
    p.ack(
        Stage::Certificates,
        s(PoolStep::RewardAccount),
        encode::pool_reward_account(&params.reward_account, legacy)?,
    );

    for o in &params.owners {
        p.ack(Stage::Certificates, s(PoolStep::Owners), encode::pool_owner(o));
    }

    for r in &params.relays {
        p.ack(Stage::Certificates, s(PoolStep::Relays), encode::pool_relay(r));
    }

    p.ack(
        Stage::Certificates,
        s(PoolStep::Metadata),
        encode::pool_metadata(&params.metadata),
    );
    p.ack(Stage::Certificates, s(PoolStep::Confirm), vec![]);

    Ok(p)
}
