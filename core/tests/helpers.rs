// Copyright (c) 2022-2023 The MobileCoin Foundation

#![allow(unused)]

use std::str::FromStr;

use log::{debug, trace, LevelFilter};
use simplelog::SimpleLogger;

use ledger_ada_core::{
    apdu::tx::{Message, Stage, SubStage},
    tx::*,
    Bip32Path, Transport,
};

/// Initialise logging, level from `LOG_LEVEL` env var
pub fn setup() {
    let log_level = match std::env::var("LOG_LEVEL").map(|v| LevelFilter::from_str(&v)) {
        Ok(Ok(l)) => l,
        _ => LevelFilter::Debug,
    };

    let _ = SimpleLogger::init(log_level, simplelog::Config::default());
}

/// Transport failure injected by [RecordingDevice]
#[derive(Debug, thiserror::Error)]
#[error("device disconnected")]
pub struct Disconnected;

/// Synchronous device recording each message, replying with
/// `fill` bytes of the expected response length
#[derive(Debug, Default)]
pub struct RecordingDevice {
    pub messages: Vec<Message>,
    pub fill: u8,
    /// Fail the message at this index
    pub fail_at: Option<usize>,
}

impl RecordingDevice {
    pub fn new(fill: u8) -> Self {
        Self {
            fill,
            ..Default::default()
        }
    }

    pub fn failing_at(index: usize) -> Self {
        Self {
            fail_at: Some(index),
            ..Default::default()
        }
    }

    /// Fetch recorded stage and sub-stage pairs
    pub fn steps(&self) -> Vec<(Stage, SubStage)> {
        self.messages.iter().map(|m| (m.stage, m.sub_stage)).collect()
    }

    /// Fetch recorded stages with repeats collapsed
    pub fn stages(&self) -> Vec<Stage> {
        let mut s: Vec<Stage> = self.messages.iter().map(|m| m.stage).collect();
        s.dedup();
        s
    }
}

impl Transport for RecordingDevice {
    type Error = Disconnected;

    fn send(&mut self, msg: &Message) -> Result<Vec<u8>, Self::Error> {
        if self.fail_at == Some(self.messages.len()) {
            return Err(Disconnected);
        }

        debug!("{} / {} ({} bytes)", msg.stage, msg.sub_stage, msg.data.len());
        trace!("data: {}", hex::encode(&msg.data));

        self.messages.push(msg.clone());

        Ok(vec![self.fill; msg.response_len])
    }
}

pub fn input(index: u32, path: Option<Bip32Path>) -> TxInput {
    TxInput {
        tx_hash: [0x3b; TX_HASH_LEN],
        output_index: index,
        path,
    }
}

pub fn third_party_output(amount: u64) -> TxOutput {
    TxOutput::new(
        OutputDestination::ThirdParty {
            address: hex::decode(
                "01f6a4b8e1e7d5c83aa2b0d9a6e0b5b9c0ad5cc1b39f63c6c5a9c9e5e2e4f6b1a3c5e7f9113355779bbddff0011223344556677889900aabbc",
            )
            .unwrap(),
        },
        amount,
    )
}

/// Simple ordinary transaction with one input and one output
pub fn ordinary_request() -> SigningRequest {
    let mut req = SigningRequest::default();

    req.tx.inputs.push(input(0, Some(Bip32Path::shelley(0, 0, 0))));
    req.tx.outputs.push(third_party_output(1_000_000));
    req.tx.fee = 170_000;
    req.tx.ttl = Some(10_000_000);

    req
}
