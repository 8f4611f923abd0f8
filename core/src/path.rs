// Copyright (c) 2022-2023 The MobileCoin Foundation

//! BIP32 key derivation paths

use core::{fmt, str::FromStr};

use byteorder::{BigEndian, WriteBytesExt};

/// Hardened derivation index offset
pub const HARDENED: u32 = 0x8000_0000;

/// Shelley wallet purpose (CIP-1852)
pub const PURPOSE_SHELLEY: u32 = 1852 | HARDENED;

/// Multisig wallet purpose (CIP-1854)
pub const PURPOSE_MULTISIG: u32 = 1854 | HARDENED;

/// Pool cold key purpose (CIP-1853)
pub const PURPOSE_POOL_COLD: u32 = 1853 | HARDENED;

/// Cardano coin type
pub const COIN_TYPE_ADA: u32 = 1815 | HARDENED;

/// Maximum supported path depth
pub const MAX_PATH_DEPTH: usize = 10;

/// Key derivation path, identity is structural equality of the full index sequence
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Bip32Path(Vec<u32>);

/// Error parsing a [Bip32Path]
#[derive(Clone, PartialEq, Debug, thiserror::Error)]
pub enum ParsePathError {
    #[error("derivation path must start with 'm'")]
    MissingRoot,
    #[error("invalid path component '{0}'")]
    InvalidComponent(String),
    #[error("derivation path exceeds maximum depth")]
    TooLong,
}

impl Bip32Path {
    /// Create a path from raw derivation indices, at most [MAX_PATH_DEPTH] deep
    pub fn new(indices: impl Into<Vec<u32>>) -> Result<Self, ParsePathError> {
        let indices = indices.into();

        if indices.len() > MAX_PATH_DEPTH {
            return Err(ParsePathError::TooLong);
        }

        Ok(Self(indices))
    }

    /// Shelley address key path `m/1852'/1815'/account'/role/index`
    pub fn shelley(account: u32, role: u32, index: u32) -> Self {
        Self(vec![
            PURPOSE_SHELLEY,
            COIN_TYPE_ADA,
            account | HARDENED,
            role,
            index,
        ])
    }

    /// Shelley stake key path `m/1852'/1815'/account'/2/0`
    pub fn stake(account: u32) -> Self {
        Self::shelley(account, 2, 0)
    }

    /// Derivation indices
    pub fn indices(&self) -> &[u32] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Encode as `[DEPTH, INDEX_0 (u32 BE), ... INDEX_N (u32 BE)]`,
    /// depth fits a byte as paths are bounded on construction
    pub fn encode(&self, buff: &mut Vec<u8>) {
        buff.push(self.0.len() as u8);
        for i in &self.0 {
            // Writes to a Vec cannot fail
            let _ = buff.write_u32::<BigEndian>(*i);
        }
    }
}

impl TryFrom<&[u32]> for Bip32Path {
    type Error = ParsePathError;

    fn try_from(p: &[u32]) -> Result<Self, Self::Error> {
        Self::new(p)
    }
}

impl fmt::Display for Bip32Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "m")?;
        for i in &self.0 {
            match i & HARDENED != 0 {
                true => write!(f, "/{}'", i & !HARDENED)?,
                false => write!(f, "/{i}")?,
            }
        }
        Ok(())
    }
}

impl fmt::Debug for Bip32Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}

/// Parse a path from `m/1852'/1815'/0'/0/1` notation (`h` also marks hardened indices)
impl FromStr for Bip32Path {
    type Err = ParsePathError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.trim().split('/');

        if parts.next() != Some("m") {
            return Err(ParsePathError::MissingRoot);
        }

        let mut indices = vec![];
        for p in parts {
            let (n, hardened) = match p.strip_suffix(['\'', 'h']) {
                Some(n) => (n, true),
                None => (p, false),
            };

            let i = n
                .parse::<u32>()
                .ok()
                .filter(|i| i & HARDENED == 0)
                .ok_or_else(|| ParsePathError::InvalidComponent(p.to_string()))?;

            indices.push(match hardened {
                true => i | HARDENED,
                false => i,
            });
        }

        Self::new(indices)
    }
}
