// Copyright (c) 2022-2023 The MobileCoin Foundation

//! Output-like stage sequences (outputs, collateral output, mint)

use ledger_ada_apdu::{
    chunk::{Chunked, MAX_CHUNK_SIZE},
    tx::{OutputStep, Stage, SubStage},
};

use super::interaction::Plan;
use crate::{
    compat::Compatibility,
    encode::{self, Amount},
    tx::*,
};

/// Build the multi-asset bundle sub-sequence
pub(crate) fn asset_groups<A: Amount>(stage: Stage, groups: &[AssetGroup<A>]) -> Plan {
    let mut p = Plan::new();

    for g in groups {
        p.ack(
            stage,
            SubStage::Output(OutputStep::AssetGroup),
            encode::asset_group(g),
        );

        for t in &g.tokens {
            p.ack(stage, SubStage::Output(OutputStep::Token), encode::token(t));
        }
    }

    p
}

/// Build a chunked field sub-sequence, the head embedded in the initiating message
fn chunked(
    stage: Stage,
    step: OutputStep,
    chunk_step: OutputStep,
    data: &[u8],
    init: impl FnOnce(usize, &[u8]) -> Vec<u8>,
) -> Plan {
    let mut p = Plan::new();
    let c = Chunked::new(data, MAX_CHUNK_SIZE);

    p.ack(stage, SubStage::Output(step), init(c.total_len(), c.head()));

    for e in c.encoded_chunks() {
        p.ack(stage, SubStage::Output(chunk_step), e);
    }

    p
}

/// Build the sub-sequence for an output (or collateral output)
pub(crate) fn output(c: &Compatibility, stage: Stage, o: &TxOutput, network: &Network) -> Plan {
    let mut p = Plan::new();

    p.ack(
        stage,
        SubStage::Output(OutputStep::BasicData),
        encode::output_basic(c, o, network),
    );

    p.append(asset_groups(stage, &o.token_bundle));

    // Legacy firmware receives datum hashes in basic data
    if c.map_format {
        match &o.datum {
            Some(Datum::Hash(h)) => p.ack(
                stage,
                SubStage::Output(OutputStep::Datum),
                encode::datum_hash(h),
            ),
            Some(Datum::Inline(d)) => p.append(chunked(
                stage,
                OutputStep::Datum,
                OutputStep::DatumChunk,
                d,
                encode::datum_inline,
            )),
            None => (),
        }

        if let Some(s) = &o.reference_script {
            p.append(chunked(
                stage,
                OutputStep::Script,
                OutputStep::ScriptChunk,
                s,
                encode::reference_script,
            ));
        }
    }

    p.ack(stage, SubStage::Output(OutputStep::Confirm), vec![]);

    p
}

/// Build the `MINT` sub-sequence
pub(crate) fn mint(groups: &[AssetGroup<i64>]) -> Plan {
    let mut p = Plan::new();

    p.ack(Stage::Mint, SubStage::Output(OutputStep::BasicData), encode::mint(groups));
    p.append(asset_groups(Stage::Mint, groups));
    p.ack(Stage::Mint, SubStage::Output(OutputStep::Confirm), vec![]);

    p
}
