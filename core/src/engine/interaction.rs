// Copyright (c) 2022-2023 The MobileCoin Foundation

//! Ceremony interaction plan
//!
//! Each stage builder produces a [Plan] of [Request]s, nested builders
//! (per-output, per-asset-group, pool registration, voting registration) are
//! flattened into their caller via [Plan::append] so the driver only ever sees
//! a linear sequence with one outstanding message at a time.

use std::collections::VecDeque;

use ledger_ada_apdu::tx::{
    AuxDataSupplementResp, Message, Stage, SubStage, TxHashResp, WitnessResp,
};

use crate::Bip32Path;

/// Handling for the response to a planned message
#[derive(Clone, PartialEq, Debug)]
pub enum Reply {
    /// Acknowledge only
    Ack,
    /// Transaction hash, returned on `CONFIRM`
    TxHash,
    /// Auxiliary data hash and signature, returned on voting `CONFIRM`
    AuxDataSupplement,
    /// Signature under the provided path
    Witness(Bip32Path),
}

impl Reply {
    /// Expected response length
    pub fn response_len(&self) -> usize {
        match self {
            Reply::Ack => 0,
            Reply::TxHash => TxHashResp::LEN,
            Reply::AuxDataSupplement => AuxDataSupplementResp::LEN,
            Reply::Witness(_) => WitnessResp::LEN,
        }
    }
}

/// Planned message and response handling
#[derive(Clone, PartialEq, Debug)]
pub struct Request {
    pub message: Message,
    pub reply: Reply,
}

/// Ordered sequence of pending requests
#[derive(Clone, PartialEq, Debug, Default)]
pub struct Plan {
    requests: VecDeque<Request>,
}

impl Plan {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an acknowledge-only message
    pub fn ack(&mut self, stage: Stage, sub_stage: SubStage, data: Vec<u8>) {
        self.expect(stage, sub_stage, data, Reply::Ack)
    }

    /// Add a message expecting the provided reply
    pub fn expect(&mut self, stage: Stage, sub_stage: SubStage, data: Vec<u8>, reply: Reply) {
        let message = Message::new(stage, sub_stage, data).with_response(reply.response_len());
        self.requests.push_back(Request { message, reply });
    }

    /// Append a nested plan
    pub fn append(&mut self, mut other: Plan) {
        self.requests.append(&mut other.requests);
    }

    /// Take the next request
    pub fn pop(&mut self) -> Option<Request> {
        self.requests.pop_front()
    }

    pub fn len(&self) -> usize {
        self.requests.len()
    }

    pub fn is_empty(&self) -> bool {
        self.requests.is_empty()
    }

    /// Iterate over pending messages
    pub fn messages(&self) -> impl Iterator<Item = &Message> {
        self.requests.iter().map(|r| &r.message)
    }
}

#[cfg(test)]
mod test {
    use ledger_ada_apdu::tx::OutputStep;

    use super::*;

    #[test]
    fn append_flattens() {
        let mut inner = Plan::new();
        inner.ack(Stage::Outputs, SubStage::Output(OutputStep::BasicData), vec![1]);
        inner.ack(Stage::Outputs, SubStage::Output(OutputStep::Confirm), vec![]);

        let mut p = Plan::new();
        p.ack(Stage::Init, SubStage::None, vec![0]);
        p.append(inner);
        p.expect(Stage::Confirm, SubStage::None, vec![], Reply::TxHash);

        let stages: Vec<_> = p.messages().map(|m| (m.stage, m.sub_stage)).collect();
        assert_eq!(
            stages,
            vec![
                (Stage::Init, SubStage::None),
                (Stage::Outputs, SubStage::Output(OutputStep::BasicData)),
                (Stage::Outputs, SubStage::Output(OutputStep::Confirm)),
                (Stage::Confirm, SubStage::None),
            ]
        );

        assert_eq!(p.pop().map(|r| r.reply), Some(Reply::Ack));
        assert_eq!(p.len(), 3);
        assert_eq!(p.messages().last().map(|m| m.response_len), Some(32));
    }
}
