// Copyright (c) 2022-2023 The MobileCoin Foundation

//! Transaction signing APDUs, used to execute a signing ceremony via the hardware wallet.
//!
//! Every message in a ceremony uses the [`Instruction::SignTx`] instruction, with
//! the stage carried in `P1` and the sub-stage in `P2`.
//!
//! See `ledger_ada_core::engine` for sequencing.

use num_enum::TryFromPrimitive;
use strum::{Display, EnumIter};

use crate::{apdu_frame, ApduError, Instruction, ADA_APDU_CLA};

mod response;
pub use response::*;

/// Signing stage, sent as `P1`
#[derive(Copy, Clone, PartialEq, Eq, Debug, Display, EnumIter, TryFromPrimitive)]
#[repr(u8)]
pub enum Stage {
    Init = 0x01,
    Inputs = 0x02,
    Outputs = 0x03,
    Fee = 0x04,
    Ttl = 0x05,
    Certificates = 0x06,
    Withdrawals = 0x07,
    AuxData = 0x08,
    ValidityStart = 0x09,
    Confirm = 0x0a,
    Mint = 0x0b,
    ScriptDataHash = 0x0c,
    CollateralInputs = 0x0d,
    RequiredSigners = 0x0e,
    Witnesses = 0x0f,
    TotalCollateral = 0x10,
    ReferenceInputs = 0x11,
    CollateralOutput = 0x12,
}

/// Sub-stages for output-like stages (outputs, collateral output, mint)
#[derive(Copy, Clone, PartialEq, Eq, Debug, Display, EnumIter, TryFromPrimitive)]
#[repr(u8)]
pub enum OutputStep {
    BasicData = 0x30,
    AssetGroup = 0x31,
    Token = 0x32,
    Confirm = 0x33,
    Datum = 0x34,
    DatumChunk = 0x35,
    Script = 0x36,
    ScriptChunk = 0x37,
}

/// Sub-stages for stake pool registration certificates
#[derive(Copy, Clone, PartialEq, Eq, Debug, Display, EnumIter, TryFromPrimitive)]
#[repr(u8)]
pub enum PoolStep {
    Init = 0x30,
    PoolKey = 0x31,
    VrfKey = 0x32,
    Financials = 0x33,
    RewardAccount = 0x34,
    Owners = 0x35,
    Relays = 0x36,
    Metadata = 0x37,
    Confirm = 0x38,
}

/// Sub-stages for voting registration auxiliary data
#[derive(Copy, Clone, PartialEq, Eq, Debug, Display, EnumIter, TryFromPrimitive)]
#[repr(u8)]
pub enum VotingStep {
    VoteKey = 0x30,
    StakingKey = 0x31,
    PaymentAddress = 0x32,
    Nonce = 0x33,
    Confirm = 0x34,
    VotingPurpose = 0x35,
    Init = 0x36,
    Delegation = 0x37,
}

/// Sub-stage, sent as `P2`
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum SubStage {
    /// Stage has no sub-stages (`P2 = 0x00`)
    None,
    Output(OutputStep),
    Pool(PoolStep),
    Voting(VotingStep),
}

impl SubStage {
    /// Fetch the `P2` value for this sub-stage
    pub fn p2(&self) -> u8 {
        match self {
            SubStage::None => 0x00,
            SubStage::Output(s) => *s as u8,
            SubStage::Pool(s) => *s as u8,
            SubStage::Voting(s) => *s as u8,
        }
    }

    /// Resolve a `P2` value in the context of the provided stage
    pub fn parse(stage: Stage, p2: u8) -> Result<Self, ApduError> {
        if p2 == 0x00 {
            return Ok(SubStage::None);
        }

        match stage {
            Stage::Outputs | Stage::CollateralOutput | Stage::Mint => OutputStep::try_from(p2)
                .map(SubStage::Output)
                .map_err(|_| ApduError::InvalidEncoding),
            Stage::Certificates => PoolStep::try_from(p2)
                .map(SubStage::Pool)
                .map_err(|_| ApduError::InvalidEncoding),
            Stage::AuxData => VotingStep::try_from(p2)
                .map(SubStage::Voting)
                .map_err(|_| ApduError::InvalidEncoding),
            Stage::Init
            | Stage::Inputs
            | Stage::Fee
            | Stage::Ttl
            | Stage::Withdrawals
            | Stage::ValidityStart
            | Stage::Confirm
            | Stage::ScriptDataHash
            | Stage::CollateralInputs
            | Stage::RequiredSigners
            | Stage::Witnesses
            | Stage::TotalCollateral
            | Stage::ReferenceInputs => Err(ApduError::InvalidEncoding),
        }
    }
}

impl core::fmt::Display for SubStage {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            SubStage::None => write!(f, "-"),
            SubStage::Output(s) => write!(f, "{s}"),
            SubStage::Pool(s) => write!(f, "{s}"),
            SubStage::Voting(s) => write!(f, "{s}"),
        }
    }
}

/// Signing ceremony message, one framed request to the device.
///
/// ## Encoding:
/// ```text
///  0                   1                   2                   3
///  0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1
/// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
/// |   CLA (0xd7)  |   INS (0x21)  |   P1 (STAGE)  | P2 (SUBSTAGE) |
/// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
/// |    DATA_LEN   |                                               |
/// +-+-+-+-+-+-+-+-+                                               +
/// /                             DATA                              /
/// /                      (variable length)                        /
/// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
/// ```
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Message {
    /// Instruction code, constant for the whole ceremony
    pub ins: Instruction,
    /// Signing stage
    pub stage: Stage,
    /// Sub-stage within the signing stage
    pub sub_stage: SubStage,
    /// Encoded stage payload
    pub data: Vec<u8>,
    /// Expected response length (`0` for acknowledge-only messages)
    pub response_len: usize,
}

impl Message {
    /// Create a new acknowledge-only message
    pub fn new(stage: Stage, sub_stage: SubStage, data: Vec<u8>) -> Self {
        Self {
            ins: Instruction::SignTx,
            stage,
            sub_stage,
            data,
            response_len: 0,
        }
    }

    /// Set the expected response length for this message
    pub fn with_response(mut self, len: usize) -> Self {
        self.response_len = len;
        self
    }

    /// Build the raw APDU frame for this message
    pub fn to_apdu(&self) -> Result<Vec<u8>, ApduError> {
        apdu_frame(
            ADA_APDU_CLA,
            self.ins as u8,
            self.stage as u8,
            self.sub_stage.p2(),
            &self.data,
        )
    }
}

#[cfg(test)]
mod test {
    use strum::IntoEnumIterator;

    use super::*;

    #[test]
    fn sub_stage_parse() {
        for s in OutputStep::iter() {
            for stage in [Stage::Outputs, Stage::CollateralOutput, Stage::Mint] {
                assert_eq!(SubStage::parse(stage, s as u8).unwrap(), SubStage::Output(s));
            }
        }

        for s in PoolStep::iter() {
            assert_eq!(
                SubStage::parse(Stage::Certificates, s as u8).unwrap(),
                SubStage::Pool(s)
            );
        }

        for s in VotingStep::iter() {
            assert_eq!(
                SubStage::parse(Stage::AuxData, s as u8).unwrap(),
                SubStage::Voting(s)
            );
        }

        for stage in Stage::iter() {
            assert_eq!(SubStage::parse(stage, 0).unwrap(), SubStage::None);
        }
    }

    #[test]
    fn sub_stage_reject_unknown() {
        assert!(SubStage::parse(Stage::Fee, 0x30).is_err());
        assert!(SubStage::parse(Stage::Outputs, 0x38).is_err());
        assert!(SubStage::parse(Stage::Certificates, 0x39).is_err());
        assert!(SubStage::parse(Stage::AuxData, 0x2f).is_err());
    }

    #[test]
    fn message_apdu() {
        let m = Message::new(
            Stage::Outputs,
            SubStage::Output(OutputStep::DatumChunk),
            vec![0xaa, 0xbb],
        );

        assert_eq!(m.response_len, 0);
        assert_eq!(
            m.to_apdu().unwrap(),
            vec![0xd7, 0x21, 0x03, 0x35, 0x02, 0xaa, 0xbb]
        );

        let m = Message::new(Stage::Confirm, SubStage::None, vec![]).with_response(TX_HASH_LEN);
        assert_eq!(m.response_len, 32);
        assert_eq!(m.to_apdu().unwrap(), vec![0xd7, 0x21, 0x0a, 0x00, 0x00]);
    }
}
