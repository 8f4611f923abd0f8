// Copyright (c) 2022-2023 The MobileCoin Foundation

use super::{destination, Writer};
use crate::{compat::Compatibility, tx::*};

/// Datum hash
const DATUM_HASH: u8 = 0x00;
/// Inline datum
const DATUM_INLINE: u8 = 0x01;

/// Token quantity encoding, `u64` for outputs and `i64` for mint
pub trait Amount: Copy {
    fn write(self, w: Writer) -> Writer;
}

impl Amount for u64 {
    fn write(self, w: Writer) -> Writer {
        w.u64(self)
    }
}

impl Amount for i64 {
    fn write(self, w: Writer) -> Writer {
        w.i64(self)
    }
}

/// Encode output `BASIC_DATA`
pub fn output_basic(c: &Compatibility, o: &TxOutput, network: &Network) -> Vec<u8> {
    let w = match c.map_format {
        true => Writer::new().u8(o.format as u8),
        false => Writer::new(),
    };

    let w = destination(w, &o.destination, network)
        .u64(o.amount)
        .u32(o.token_bundle.len() as u32);

    match (c.map_format, &o.datum) {
        // Datum and script follow in their own messages
        (true, _) => w
            .presence(o.datum.is_some())
            .presence(o.reference_script.is_some()),
        // Datum hash is embedded in legacy basic data
        (false, Some(Datum::Hash(h))) if c.datum_hash => w.presence(true).bytes(h),
        (false, _) if c.datum_hash => w.presence(false),
        (false, _) => w,
    }
    .finish()
}

/// Encode an `ASSET_GROUP` header
pub fn asset_group<A>(g: &AssetGroup<A>) -> Vec<u8> {
    Writer::new()
        .bytes(&g.policy_id)
        .u32(g.tokens.len() as u32)
        .finish()
}

/// Encode a `TOKEN` entry
pub fn token<A: Amount>(t: &Token<A>) -> Vec<u8> {
    t.amount.write(Writer::new().var_bytes(&t.name)).finish()
}

/// Encode a `DATUM` hash message
pub fn datum_hash(h: &[u8; DATA_HASH_LEN]) -> Vec<u8> {
    Writer::new().u8(DATUM_HASH).bytes(h).finish()
}

/// Encode the initiating `DATUM` message for an inline datum
pub fn datum_inline(total_len: usize, head: &[u8]) -> Vec<u8> {
    Writer::new()
        .u8(DATUM_INLINE)
        .u32(total_len as u32)
        .var_bytes(head)
        .finish()
}

/// Encode the initiating `SCRIPT` message for a reference script
pub fn reference_script(total_len: usize, head: &[u8]) -> Vec<u8> {
    Writer::new()
        .u32(total_len as u32)
        .var_bytes(head)
        .finish()
}

/// Encode the top-level `MINT` message
pub fn mint(groups: &[AssetGroup<i64>]) -> Vec<u8> {
    Writer::new().u32(groups.len() as u32).finish()
}

#[cfg(test)]
mod test {
    use ledger_ada_apdu::version::{AppFlags, Version};

    use super::*;

    fn output() -> TxOutput {
        TxOutput::new(
            OutputDestination::ThirdParty {
                address: vec![0x71; 29],
            },
            2_000_000,
        )
    }

    #[test]
    fn basic_data_layouts() {
        let mut o = output();
        o.datum = Some(Datum::Hash([0xdd; 32]));

        // 2.x: no format, no datum
        let c = Compatibility::new(&Version::new(2, 4, 0), AppFlags::empty());
        assert_eq!(output_basic(&c, &o, &Network::MAINNET).len(), 1 + 4 + 29 + 8 + 4);

        // 4.x: embedded datum hash
        let c = Compatibility::new(&Version::new(4, 0, 0), AppFlags::empty());
        let b = output_basic(&c, &o, &Network::MAINNET);
        assert_eq!(b.len(), 1 + 4 + 29 + 8 + 4 + 1 + 32);
        assert_eq!(&b[b.len() - 32..], &[0xdd; 32]);

        // 5.x: format and presence flags
        let c = Compatibility::new(&Version::new(5, 0, 0), AppFlags::empty());
        let b = output_basic(&c, &o, &Network::MAINNET);
        assert_eq!(b.len(), 1 + 1 + 4 + 29 + 8 + 4 + 2);
        assert_eq!(b[0], OutputFormat::ArrayLegacy as u8);
        assert_eq!(&b[b.len() - 2..], &[0x02, 0x01]);
    }

    #[test]
    fn encode_tokens() {
        let t = Token {
            name: b"abc".to_vec(),
            amount: 5u64,
        };
        assert_eq!(token(&t), vec![0, 0, 0, 3, b'a', b'b', b'c', 0, 0, 0, 0, 0, 0, 0, 5]);

        let t = Token {
            name: vec![],
            amount: -2i64,
        };
        assert_eq!(token(&t), vec![0, 0, 0, 0, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xfe]);
    }

    #[test]
    fn encode_script_head() {
        let b = reference_script(300, &[0xab; 240]);

        assert_eq!(&b[..8], &[0, 0, 0x01, 0x2c, 0, 0, 0, 240]);
        assert_eq!(b.len(), 8 + 240);
    }
}
