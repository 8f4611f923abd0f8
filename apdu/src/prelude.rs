// Copyright (c) 2022-2023 The MobileCoin Foundation

//! Prelude to simplify downstream use of APDU objects
//!

pub use crate::{
    chunk::{Chunked, MAX_CHUNK_SIZE},
    status::{split_status, StatusCode},
    tx::{
        AuxDataSupplementResp, Message, OutputStep, PoolStep, Stage, SubStage, TxHashResp,
        VotingStep, WitnessResp,
    },
    version::{AppFlags, Version, VersionReq, VersionResp},
    Instruction,
};
