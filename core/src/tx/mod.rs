// Copyright (c) 2022-2023 The MobileCoin Foundation

//! Typed transaction model consumed by the signing [Ceremony][crate::engine::Ceremony]
//!
//! Requests are assumed to be well-formed (hashes and addresses already
//! parsed), firmware compatibility is checked by [validate][crate::validate].

use strum::{Display, EnumIter};

use crate::Bip32Path;

mod aux_data;
pub use aux_data::*;

mod cert;
pub use cert::*;

/// Transaction hash length
pub const TX_HASH_LEN: usize = 32;

/// Key, script and policy hash length (blake2b-224)
pub const KEY_HASH_LEN: usize = 28;

/// Datum and script data hash length (blake2b-256)
pub const DATA_HASH_LEN: usize = 32;

/// Key or script hash
pub type KeyHash = [u8; KEY_HASH_LEN];

/// Minting policy identifier
pub type PolicyId = [u8; KEY_HASH_LEN];

/// Network descriptor
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub struct Network {
    pub network_id: u8,
    pub protocol_magic: u32,
}

impl Network {
    pub const MAINNET: Network = Network {
        network_id: 0x01,
        protocol_magic: 764824073,
    };

    pub const PREPROD: Network = Network {
        network_id: 0x00,
        protocol_magic: 1,
    };

    pub const PREVIEW: Network = Network {
        network_id: 0x00,
        protocol_magic: 2,
    };
}

impl Default for Network {
    fn default() -> Self {
        Self::MAINNET
    }
}

/// Transaction input, optionally owned by the device
#[derive(Clone, PartialEq, Debug)]
pub struct TxInput {
    pub tx_hash: [u8; TX_HASH_LEN],
    pub output_index: u32,
    /// Owning key path, required to witness the input
    pub path: Option<Bip32Path>,
}

/// Output serialisation format
#[derive(Copy, Clone, PartialEq, Eq, Debug, Default, Display)]
#[repr(u8)]
pub enum OutputFormat {
    /// Pre-babbage array output
    #[default]
    ArrayLegacy = 0x00,
    /// Babbage map output
    MapBabbage = 0x01,
}

/// Shelley address type (address header nibble)
#[derive(Copy, Clone, PartialEq, Eq, Debug, Display, EnumIter)]
#[repr(u8)]
pub enum AddressType {
    BasePaymentKeyStakeKey = 0x00,
    BasePaymentScriptStakeKey = 0x01,
    BasePaymentKeyStakeScript = 0x02,
    BasePaymentScriptStakeScript = 0x03,
    PointerKey = 0x04,
    PointerScript = 0x05,
    EnterpriseKey = 0x06,
    EnterpriseScript = 0x07,
    Byron = 0x08,
    RewardKey = 0x0e,
    RewardScript = 0x0f,
}

/// Spending part of a device-derived address
#[derive(Clone, PartialEq, Debug)]
pub enum SpendingData {
    Path(Bip32Path),
    ScriptHash(KeyHash),
    None,
}

/// Location of a stake registration certificate on chain
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub struct BlockchainPointer {
    pub block_index: u32,
    pub tx_index: u32,
    pub certificate_index: u32,
}

/// Staking part of a device-derived address
#[derive(Clone, PartialEq, Debug)]
pub enum StakingData {
    None,
    KeyPath(Bip32Path),
    KeyHash(KeyHash),
    Pointer(BlockchainPointer),
    ScriptHash(KeyHash),
}

/// Parameters for an address derived on the device
#[derive(Clone, PartialEq, Debug)]
pub struct AddressParams {
    pub address_type: AddressType,
    pub spending: SpendingData,
    pub staking: StakingData,
}

impl AddressParams {
    /// Check whether either address part is a script hash
    pub fn has_script_hash(&self) -> bool {
        matches!(self.spending, SpendingData::ScriptHash(_))
            || matches!(self.staking, StakingData::ScriptHash(_))
    }
}

/// Output (or payment) destination
#[derive(Clone, PartialEq, Debug)]
pub enum OutputDestination {
    /// Raw address bytes, displayed to the user for confirmation
    ThirdParty { address: Vec<u8> },
    /// Address derived on the device from the provided parameters
    DeviceOwned(AddressParams),
}

/// Named token quantity, `u64` for outputs and `i64` for mint
#[derive(Clone, PartialEq, Debug)]
pub struct Token<A> {
    pub name: Vec<u8>,
    pub amount: A,
}

/// Tokens sharing a minting policy
#[derive(Clone, PartialEq, Debug)]
pub struct AssetGroup<A> {
    pub policy_id: PolicyId,
    pub tokens: Vec<Token<A>>,
}

/// Datum attached to an output
#[derive(Clone, PartialEq, Debug)]
pub enum Datum {
    Hash([u8; DATA_HASH_LEN]),
    Inline(Vec<u8>),
}

/// Transaction output
#[derive(Clone, PartialEq, Debug)]
pub struct TxOutput {
    pub format: OutputFormat,
    pub destination: OutputDestination,
    pub amount: u64,
    pub token_bundle: Vec<AssetGroup<u64>>,
    pub datum: Option<Datum>,
    /// Serialised reference script
    pub reference_script: Option<Vec<u8>>,
}

impl TxOutput {
    /// Create an ada-only legacy output
    pub fn new(destination: OutputDestination, amount: u64) -> Self {
        Self {
            format: OutputFormat::ArrayLegacy,
            destination,
            amount,
            token_bundle: vec![],
            datum: None,
            reference_script: None,
        }
    }
}

/// Reward withdrawal
#[derive(Clone, PartialEq, Debug)]
pub struct Withdrawal {
    pub stake_credential: StakeCredential,
    pub amount: u64,
}

/// Required transaction signer
#[derive(Clone, PartialEq, Debug)]
pub enum RequiredSigner {
    Path(Bip32Path),
    Hash(KeyHash),
}

/// Fully-typed transaction body
#[derive(Clone, PartialEq, Debug, Default)]
pub struct Transaction {
    pub network: Network,
    pub inputs: Vec<TxInput>,
    pub outputs: Vec<TxOutput>,
    pub fee: u64,
    pub ttl: Option<u64>,
    pub certificates: Vec<Certificate>,
    pub withdrawals: Vec<Withdrawal>,
    pub aux_data: Option<AuxiliaryData>,
    pub validity_interval_start: Option<u64>,
    pub mint: Option<Vec<AssetGroup<i64>>>,
    pub script_data_hash: Option<[u8; DATA_HASH_LEN]>,
    pub collateral_inputs: Vec<TxInput>,
    pub required_signers: Vec<RequiredSigner>,
    pub include_network_id: bool,
    pub collateral_output: Option<TxOutput>,
    pub total_collateral: Option<u64>,
    pub reference_inputs: Vec<TxInput>,
}

/// Signing mode, determining witness collection and permitted transaction contents
#[derive(Copy, Clone, PartialEq, Eq, Debug, Default, Display, EnumIter)]
#[repr(u8)]
pub enum SigningMode {
    #[default]
    Ordinary = 0x03,
    PoolRegistrationAsOwner = 0x04,
    PoolRegistrationAsOperator = 0x05,
    Multisig = 0x06,
    Plutus = 0x07,
}

/// Transaction signing request
#[derive(Clone, PartialEq, Debug, Default)]
pub struct SigningRequest {
    pub tx: Transaction,
    pub signing_mode: SigningMode,
    /// Paths witnessed in addition to those collected from the transaction,
    /// the only witness source in [SigningMode::Multisig]
    pub additional_witness_paths: Vec<Bip32Path>,
}

/// Witness signature length
pub const SIGNATURE_LEN: usize = 64;

/// Signature under a single witness path
#[derive(Clone, PartialEq, Debug)]
pub struct Witness {
    pub path: Bip32Path,
    pub signature: [u8; SIGNATURE_LEN],
}

/// Voting registration auxiliary data hash and signature
#[derive(Clone, PartialEq, Debug)]
pub struct AuxDataSupplement {
    pub aux_data_hash: [u8; DATA_HASH_LEN],
    pub signature: [u8; SIGNATURE_LEN],
}

/// Signed transaction result
#[derive(Clone, PartialEq, Debug)]
pub struct SignedTx {
    pub tx_hash: [u8; TX_HASH_LEN],
    /// Witnesses in the order requested
    pub witnesses: Vec<Witness>,
    pub aux_data_supplement: Option<AuxDataSupplement>,
}
