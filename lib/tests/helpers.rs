// Copyright (c) 2022-2023 The MobileCoin Foundation

#![allow(unused)]

use std::{
    str::FromStr,
    sync::{Arc, Mutex},
    time::Duration,
};

use async_trait::async_trait;
use log::{debug, LevelFilter};
use simplelog::SimpleLogger;

use ledger_ada::{
    apdu::{
        tx::{Stage, SubStage, VotingStep},
        Instruction,
    },
    tx::*,
    Bip32Path, Exchange,
};

/// Initialise logging, level from `LOG_LEVEL` env var
pub fn setup() {
    let log_level = match std::env::var("LOG_LEVEL").map(|v| LevelFilter::from_str(&v)) {
        Ok(Ok(l)) => l,
        _ => LevelFilter::Debug,
    };

    let _ = SimpleLogger::init(log_level, simplelog::Config::default());
}

/// Mock Cardano application replying with canned responses
#[derive(Clone)]
pub struct MockDevice {
    /// Reported version and flags
    pub version: [u8; 4],
    /// Fill byte for hash and signature responses
    pub fill: u8,
    /// Reject requests for this stage with the provided status word
    pub reject: Option<(Stage, u16)>,
    /// Delay responses for this stage
    pub delay: Option<(Stage, Duration)>,
    /// Raw APDUs received
    pub apdus: Arc<Mutex<Vec<Vec<u8>>>>,
}

impl MockDevice {
    pub fn new(major: u8, minor: u8, patch: u8) -> Self {
        Self {
            version: [major, minor, patch, 0],
            fill: 0xa5,
            reject: None,
            delay: None,
            apdus: Arc::new(Mutex::new(vec![])),
        }
    }

    /// Fetch (P1, P2) pairs for received signing APDUs
    pub fn stages(&self) -> Vec<(u8, u8)> {
        self.apdus
            .lock()
            .unwrap()
            .iter()
            .filter(|a| a[1] == Instruction::SignTx as u8)
            .map(|a| (a[2], a[3]))
            .collect()
    }

    fn response_len(stage: Stage, p2: u8) -> usize {
        match (stage, p2) {
            (Stage::Confirm, _) => 32,
            (Stage::Witnesses, _) => 64,
            (Stage::AuxData, p2) if p2 == SubStage::Voting(VotingStep::Confirm).p2() => 96,
            _ => 0,
        }
    }
}

#[async_trait]
impl Exchange for MockDevice {
    async fn exchange(
        &mut self,
        command: &[u8],
        _timeout: Duration,
    ) -> Result<Vec<u8>, ledger_lib::Error> {
        self.apdus.lock().unwrap().push(command.to_vec());

        let (cla, ins, p1, p2, lc) = (command[0], command[1], command[2], command[3], command[4]);
        assert_eq!(cla, 0xd7);
        assert_eq!(lc as usize, command.len() - 5);

        let mut resp = match ins {
            i if i == Instruction::GetVersion as u8 => self.version.to_vec(),
            i if i == Instruction::SignTx as u8 => {
                let stage = Stage::try_from(p1).unwrap();

                debug!("mock {stage} (p2: 0x{p2:02x})");

                if let Some((s, d)) = self.delay {
                    if s == stage {
                        tokio::time::sleep(d).await;
                    }
                }

                if let Some((s, sw)) = self.reject {
                    if s == stage {
                        return Ok(sw.to_be_bytes().to_vec());
                    }
                }

                vec![self.fill; Self::response_len(stage, p2)]
            }
            // Unknown instruction
            _ => return Ok(vec![0x6e, 0x03]),
        };

        resp.extend_from_slice(&[0x90, 0x00]);

        Ok(resp)
    }
}

/// Simple ordinary transaction with two inputs and one output
pub fn ordinary_request() -> SigningRequest {
    let mut req = SigningRequest::default();

    for i in 0..2 {
        req.tx.inputs.push(TxInput {
            tx_hash: [0x3b; TX_HASH_LEN],
            output_index: i,
            path: Some(Bip32Path::shelley(0, 0, i)),
        });
    }

    req.tx.outputs.push(TxOutput::new(
        OutputDestination::ThirdParty {
            address: vec![0x01; 57],
        },
        1_000_000,
    ));
    req.tx.fee = 170_000;
    req.tx.ttl = Some(10_000_000);

    req
}
