//! Output script template matching
//!
//! Two carrier templates are recognised, checked in this order:
//!
//! 1. **NULL_DATA** - `OP_RETURN <push>` where the single push covers every
//!    remaining byte of the script. Direct pushes (`0x01..=0x4b`) and
//!    `OP_PUSHDATA1/2/4` are accepted.
//! 2. **P2PKH** - `OP_DUP OP_HASH160 <20 bytes> OP_EQUALVERIFY OP_CHECKSIG`.
//!    The hash itself is the payload; a genuine payment address and a
//!    graffiti carrier look identical here.
//!
//! Anything else is `Location::None`. Matching is purely structural.

use crate::types::graffiti::Location;

pub const OP_RETURN: u8 = 0x6a;
pub const OP_PUSHDATA1: u8 = 0x4c;
pub const OP_PUSHDATA2: u8 = 0x4d;
pub const OP_PUSHDATA4: u8 = 0x4e;
pub const OP_DUP: u8 = 0x76;
pub const OP_HASH160: u8 = 0xa9;
pub const OP_EQUALVERIFY: u8 = 0x88;
pub const OP_CHECKSIG: u8 = 0xac;

/// Size of a hash160 digest
pub const HASH160_LEN: usize = 20;

/// Full length of a P2PKH script
pub const P2PKH_SCRIPT_LEN: usize = 25;

/// Offset of the hash within a P2PKH script (after `OP_DUP OP_HASH160 0x14`)
pub const P2PKH_HASH_OFFSET: usize = 3;

/// Outcome of classifying a single output script
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Classification {
    None,
    Match {
        location: Location,
        /// Payload start, relative to the first script byte
        relative_offset: usize,
        length: usize,
    },
}

impl Classification {
    /// Payload bytes within `script`, if this is a match
    pub fn payload<'a>(&self, script: &'a [u8]) -> Option<&'a [u8]> {
        match *self {
            Classification::None => None,
            Classification::Match {
                relative_offset,
                length,
                ..
            } => script.get(relative_offset..relative_offset + length),
        }
    }
}

/// Classify one output script
pub fn classify_script(script: &[u8]) -> Classification {
    if let Some(found) = match_null_data(script) {
        return found;
    }
    if let Some(found) = match_p2pkh(script) {
        return found;
    }
    Classification::None
}

/// `OP_RETURN <push>` with an exact-length push
fn match_null_data(script: &[u8]) -> Option<Classification> {
    if script.first() != Some(&OP_RETURN) {
        return None;
    }

    let (prefix_len, declared_len) = match *script.get(1)? {
        op @ 0x01..=0x4b => (2, op as usize),
        OP_PUSHDATA1 => (3, *script.get(2)? as usize),
        OP_PUSHDATA2 => {
            let len = script.get(2..4)?;
            (4, u16::from_le_bytes([len[0], len[1]]) as usize)
        }
        OP_PUSHDATA4 => {
            let len = script.get(2..6)?;
            let len = u32::from_le_bytes([len[0], len[1], len[2], len[3]]);
            (6, usize::try_from(len).ok()?)
        }
        _ => return None,
    };

    if script.len() - prefix_len != declared_len {
        return None;
    }

    Some(Classification::Match {
        location: Location::NullData,
        relative_offset: prefix_len,
        length: declared_len,
    })
}

/// Exact 25-byte pay-to-pubkey-hash skeleton
fn match_p2pkh(script: &[u8]) -> Option<Classification> {
    if script.len() != P2PKH_SCRIPT_LEN {
        return None;
    }

    let skeleton_ok = script[0] == OP_DUP
        && script[1] == OP_HASH160
        && script[2] == HASH160_LEN as u8
        && script[23] == OP_EQUALVERIFY
        && script[24] == OP_CHECKSIG;

    skeleton_ok.then_some(Classification::Match {
        location: Location::P2pkh,
        relative_offset: P2PKH_HASH_OFFSET,
        length: HASH160_LEN,
    })
}
