// Copyright (c) 2022-2023 The MobileCoin Foundation

//! The [Ceremony] sequences every message of a transaction signing operation.
//!
//! Requests are validated and the full message plan built on construction,
//! so [Error::VersionIncompatible], [Error::UnsupportedFeature] and
//! [Error::MalformedRequest] are returned before any message is produced.
//! The driver then alternates [Ceremony::next_message] and [Ceremony::resume]
//! with exactly one message outstanding, see [Ceremony::run] for a synchronous
//! driver over a [Transport].

use encdec::Decode;
use strum::Display;

#[cfg(feature = "log")]
use log::{debug, trace, warn};

use ledger_ada_apdu::{
    tx::{AuxDataSupplementResp, Message, Stage, SubStage, TxHashResp, WitnessResp},
    version::{AppFlags, Version},
};

use crate::{
    compat::Compatibility,
    encode,
    tx::{AuxDataSupplement, SignedTx, SigningRequest, Witness, TX_HASH_LEN},
    validate::validate,
    witness::collect_witness_paths,
    Bip32Path,
};

mod aux_data;

mod cert;

mod error;
pub use error::Error;

mod interaction;
pub use interaction::{Plan, Reply, Request};

mod output;

/// [Transport] executes a single message against the device
pub trait Transport {
    type Error: std::error::Error + Send + Sync + 'static;

    /// Send a message, returning the response payload (without status word)
    fn send(&mut self, msg: &Message) -> Result<Vec<u8>, Self::Error>;
}

impl<T: Transport> Transport for &mut T {
    type Error = T::Error;

    fn send(&mut self, msg: &Message) -> Result<Vec<u8>, Self::Error> {
        T::send(self, msg)
    }
}

/// Ceremony state enumeration
#[derive(Copy, Clone, PartialEq, Eq, Debug, Display)]
pub enum State {
    /// Ready to produce the next message
    Ready,
    /// Awaiting the response to a message
    Pending,
    /// All messages acknowledged
    Complete,
    /// Ceremony aborted
    Error,
}

/// Transaction signing ceremony
#[derive(Clone, Debug)]
pub struct Ceremony {
    state: State,
    plan: Plan,
    pending: Option<(Reply, usize)>,

    tx_hash: Option<[u8; TX_HASH_LEN]>,
    witnesses: Vec<Witness>,
    aux_data_supplement: Option<AuxDataSupplement>,
}

impl Ceremony {
    /// Validate a signing request against the firmware version and flags and
    /// build the ceremony message plan
    pub fn new(version: &Version, flags: AppFlags, req: &SigningRequest) -> Result<Self, Error> {
        validate(version, flags, req)?;

        let c = Compatibility::new(version, flags);
        let paths = collect_witness_paths(req);
        let plan = build_plan(&c, req, &paths)?;

        #[cfg(feature = "log")]
        debug!(
            "ceremony for {} mode on {version}: {} messages, {} witnesses",
            req.signing_mode,
            plan.len(),
            paths.len()
        );

        Ok(Self {
            state: State::Ready,
            plan,
            pending: None,
            tx_hash: None,
            witnesses: Vec::with_capacity(paths.len()),
            aux_data_supplement: None,
        })
    }

    /// Fetch the ceremony state
    pub fn state(&self) -> State {
        self.state
    }

    /// Iterate over messages not yet produced
    pub fn remaining(&self) -> impl Iterator<Item = &Message> {
        self.plan.messages()
    }

    /// Take the next message, returning `None` once all messages are acknowledged
    pub fn next_message(&mut self) -> Result<Option<Message>, Error> {
        match self.state {
            State::Ready => (),
            State::Complete => return Ok(None),
            State::Pending | State::Error => return Err(Error::InvalidState),
        }

        let Request { message, reply } = match self.plan.pop() {
            Some(r) => r,
            None => {
                self.state = State::Complete;
                return Ok(None);
            }
        };

        #[cfg(feature = "log")]
        {
            debug!("{} / {}", message.stage, message.sub_stage);
            trace!("data: {}", hex::encode(&message.data));
        }

        self.pending = Some((reply, message.response_len));
        self.state = State::Pending;

        Ok(Some(message))
    }

    /// Resume the ceremony with the response to the outstanding message
    pub fn resume(&mut self, resp: &[u8]) -> Result<(), Error> {
        let (reply, expected) = match (self.state, self.pending.take()) {
            (State::Pending, Some(p)) => p,
            _ => return Err(Error::InvalidState),
        };

        if expected != 0 && resp.len() != expected {
            #[cfg(feature = "log")]
            warn!("unexpected response length {} (expected {expected})", resp.len());

            self.state = State::Error;
            return Err(Error::UnexpectedResponse {
                expected,
                actual: resp.len(),
            });
        }

        let r = self.handle_reply(reply, resp);

        self.state = match (&r, self.plan.is_empty()) {
            (Err(_), _) => State::Error,
            (Ok(_), true) => State::Complete,
            (Ok(_), false) => State::Ready,
        };

        r
    }

    fn handle_reply(&mut self, reply: Reply, resp: &[u8]) -> Result<(), Error> {
        let invalid = |_| Error::UnexpectedResponse {
            expected: reply.response_len(),
            actual: resp.len(),
        };

        match &reply {
            Reply::Ack => (),
            Reply::TxHash => {
                let (r, _) = TxHashResp::decode(resp).map_err(invalid)?;

                #[cfg(feature = "log")]
                debug!("tx hash: {}", hex::encode(r.hash));

                self.tx_hash = Some(r.hash);
            }
            Reply::AuxDataSupplement => {
                let (r, _) = AuxDataSupplementResp::decode(resp).map_err(invalid)?;

                self.aux_data_supplement = Some(AuxDataSupplement {
                    aux_data_hash: r.aux_data_hash,
                    signature: r.signature,
                });
            }
            Reply::Witness(path) => {
                let (r, _) = WitnessResp::decode(resp).map_err(invalid)?;

                #[cfg(feature = "log")]
                debug!("witness for {path}");

                self.witnesses.push(Witness {
                    path: path.clone(),
                    signature: r.signature,
                });
            }
        }

        Ok(())
    }

    /// Complete the ceremony, returning the signed transaction
    pub fn finish(self) -> Result<SignedTx, Error> {
        match (self.state, self.tx_hash) {
            (State::Complete, Some(tx_hash)) => Ok(SignedTx {
                tx_hash,
                witnesses: self.witnesses,
                aux_data_supplement: self.aux_data_supplement,
            }),
            _ => Err(Error::InvalidState),
        }
    }

    /// Execute the ceremony over the provided transport
    pub fn run(mut self, mut t: impl Transport) -> Result<SignedTx, Error> {
        while let Some(m) = self.next_message()? {
            let resp = match t.send(&m) {
                Ok(r) => r,
                Err(e) => {
                    self.state = State::Error;
                    return Err(Error::Transport(Box::new(e)));
                }
            };

            self.resume(&resp)?;
        }

        self.finish()
    }
}

/// Build the full ceremony message plan
fn build_plan(c: &Compatibility, req: &SigningRequest, paths: &[Bip32Path]) -> Result<Plan, Error> {
    let tx = &req.tx;
    let mut p = Plan::new();

    p.ack(Stage::Init, SubStage::None, encode::tx_init(c, req, paths.len()));

    if let Some(a) = tx.aux_data.as_ref().filter(|_| c.aux_data_before_tx_body) {
        p.append(aux_data::aux_data(c, a, &tx.network));
    }

    for i in &tx.inputs {
        p.ack(Stage::Inputs, SubStage::None, encode::tx_input(i));
    }

    for o in &tx.outputs {
        p.append(output::output(c, Stage::Outputs, o, &tx.network));
    }

    p.ack(Stage::Fee, SubStage::None, encode::uint64(tx.fee));

    if let Some(ttl) = tx.ttl {
        p.ack(Stage::Ttl, SubStage::None, encode::uint64(ttl));
    }

    for cert in &tx.certificates {
        p.append(cert::certificate(c, cert)?);
    }

    for w in &tx.withdrawals {
        p.ack(Stage::Withdrawals, SubStage::None, encode::withdrawal(w));
    }

    if let Some(a) = tx.aux_data.as_ref().filter(|_| !c.aux_data_before_tx_body) {
        p.append(aux_data::aux_data(c, a, &tx.network));
    }

    if let Some(s) = tx.validity_interval_start {
        p.ack(Stage::ValidityStart, SubStage::None, encode::uint64(s));
    }

    if let Some(m) = &tx.mint {
        p.append(output::mint(m));
    }

    if let Some(h) = &tx.script_data_hash {
        p.ack(Stage::ScriptDataHash, SubStage::None, encode::hash32(h));
    }

    for i in &tx.collateral_inputs {
        p.ack(Stage::CollateralInputs, SubStage::None, encode::tx_input(i));
    }

    for s in &tx.required_signers {
        p.ack(Stage::RequiredSigners, SubStage::None, encode::required_signer(s));
    }

    if let Some(o) = &tx.collateral_output {
        p.append(output::output(c, Stage::CollateralOutput, o, &tx.network));
    }

    if let Some(t) = tx.total_collateral {
        p.ack(Stage::TotalCollateral, SubStage::None, encode::uint64(t));
    }

    for i in &tx.reference_inputs {
        p.ack(Stage::ReferenceInputs, SubStage::None, encode::tx_input(i));
    }

    p.expect(Stage::Confirm, SubStage::None, vec![], Reply::TxHash);

    for w in paths {
        p.expect(
            Stage::Witnesses,
            SubStage::None,
            encode::witness(w),
            Reply::Witness(w.clone()),
        );
    }

    Ok(p)
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::tx::*;

    fn request() -> SigningRequest {
        let mut req = SigningRequest::default();
        req.tx.inputs.push(TxInput {
            tx_hash: [1; 32],
            output_index: 0,
            path: Some(Bip32Path::shelley(0, 0, 0)),
        });
        req.tx.outputs.push(TxOutput::new(
            OutputDestination::ThirdParty { address: vec![1; 29] },
            1,
        ));
        req.tx.fee = 10;
        req
    }

    #[test]
    fn drive_to_completion() {
        let req = request();
        let mut c = Ceremony::new(&Version::new(6, 0, 0), AppFlags::empty(), &req).unwrap();

        assert_eq!(c.state(), State::Ready);

        while let Some(m) = c.next_message().unwrap() {
            assert_eq!(c.state(), State::Pending);

            // Only one message outstanding
            assert!(matches!(c.next_message(), Err(Error::InvalidState)));

            let resp = vec![0xab; m.response_len];
            c.resume(&resp).unwrap();
        }

        assert_eq!(c.state(), State::Complete);

        let s = c.finish().unwrap();
        assert_eq!(s.tx_hash, [0xab; 32]);
        assert_eq!(s.witnesses.len(), 1);
        assert_eq!(s.witnesses[0].path, Bip32Path::shelley(0, 0, 0));
        assert_eq!(s.aux_data_supplement, None);
    }

    #[test]
    fn reject_response_length() {
        let req = request();
        let mut c = Ceremony::new(&Version::new(6, 0, 0), AppFlags::empty(), &req).unwrap();

        // Advance to CONFIRM
        while let Some(m) = c.next_message().unwrap() {
            if m.stage == Stage::Confirm {
                break;
            }
            c.resume(&[]).unwrap();
        }

        assert!(matches!(
            c.resume(&[0u8; 31]),
            Err(Error::UnexpectedResponse {
                expected: 32,
                actual: 31
            })
        ));
        assert_eq!(c.state(), State::Error);
        assert!(matches!(c.next_message(), Err(Error::InvalidState)));
    }

    #[test]
    fn resume_without_message() {
        let req = request();
        let mut c = Ceremony::new(&Version::new(6, 0, 0), AppFlags::empty(), &req).unwrap();

        let e = c.resume(&[]).unwrap_err();
        assert!(matches!(e, Error::InvalidState));
        assert!(!e.requires_reset());
    }

    #[test]
    fn finish_incomplete() {
        let req = request();
        let c = Ceremony::new(&Version::new(6, 0, 0), AppFlags::empty(), &req).unwrap();

        let e = c.finish().unwrap_err();
        assert!(matches!(e, Error::InvalidState));
        assert!(!e.requires_reset());
    }

    #[test]
    fn aux_data_placement() {
        let mut req = request();
        req.tx.aux_data = Some(AuxiliaryData::Hash([2; 32]));

        let stages = |v: Version| -> Vec<Stage> {
            Ceremony::new(&v, AppFlags::empty(), &req)
                .unwrap()
                .remaining()
                .map(|m| m.stage)
                .collect()
        };

        assert_eq!(stages(Version::new(2, 3, 0))[1], Stage::AuxData);

        let s = stages(Version::new(2, 2, 0));
        assert_eq!(s[1], Stage::Inputs);
        assert_eq!(s[s.len() - 3], Stage::AuxData);
    }
}
