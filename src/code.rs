// src/code.rs

//! Defines the `CharCode` type and the printable-ASCII classification
//! behind it.
//!
//! A `CharCode` identifies the content of a single cell in an encoded
//! text grid: 0 is the padding sentinel, 1 through 95 name the printable
//! ASCII characters (space through `~`). Grid assembly lives in
//! `crate::grid`; this module owns only the per-character mapping.

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// Number of distinct codes: the padding sentinel plus the 95 printable
/// ASCII characters. Downstream embedding tables are sized by this.
pub const VOCAB_SIZE: usize = 96;

/// First byte of the printable ASCII range (space).
pub const FIRST_PRINTABLE: u8 = 0x20;

/// Last byte of the printable ASCII range (`~`).
pub const LAST_PRINTABLE: u8 = 0x7E;

/// Offset between a printable byte and its code, so that space maps to 1
/// and `~` maps to 95.
pub const PRINTABLE_OFFSET: u8 = 31;

/// Returns true iff `byte` is printable ASCII (space through `~`).
pub fn is_printable(byte: u8) -> bool {
    (FIRST_PRINTABLE..=LAST_PRINTABLE).contains(&byte)
}

/// The content of one grid cell.
///
/// Codes are small integers in `[0, 95]`. They compare and hash but carry
/// no arithmetic; offsets into grids are computed in `usize`, never in
/// code space.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize,
)]
#[serde(transparent)]
pub struct CharCode(u8);

impl CharCode {
    /// The padding sentinel. Also the image of every non-printable byte.
    pub const PAD: CharCode = CharCode(0);

    /// Classifies a byte. Total over all 256 byte values: printable bytes
    /// map to `1..=95`, everything else (control bytes, DEL, and any byte
    /// outside the ASCII range) maps to [`CharCode::PAD`].
    pub fn from_byte(byte: u8) -> CharCode {
        if is_printable(byte) {
            CharCode(byte - PRINTABLE_OFFSET)
        } else {
            CharCode::PAD
        }
    }

    /// Raw code value, always in `[0, 95]`.
    pub fn as_u8(self) -> u8 {
        self.0
    }

    /// True for the padding sentinel.
    pub fn is_pad(self) -> bool {
        self.0 == 0
    }

    /// Inverse of [`CharCode::from_byte`] restricted to the printable
    /// alphabet. [`CharCode::PAD`] has no single preimage and yields
    /// `None`.
    pub fn to_char(self) -> Option<char> {
        if self.0 == 0 {
            None
        } else {
            Some((self.0 + PRINTABLE_OFFSET) as char)
        }
    }
}

// Hand-written so that out-of-range values are rejected at the
// deserialization boundary instead of producing codes the rest of the
// crate assumes cannot exist.
impl<'de> Deserialize<'de> for CharCode {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = u8::deserialize(deserializer)?;
        if usize::from(value) < VOCAB_SIZE {
            Ok(CharCode(value))
        } else {
            Err(serde::de::Error::custom(format!(
                "character code {} is out of range (max {})",
                value,
                VOCAB_SIZE - 1
            )))
        }
    }
}

impl fmt::Display for CharCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn printable_range_boundaries() {
        assert!(!is_printable(31));
        assert!(is_printable(32));
        assert!(is_printable(65));
        assert!(is_printable(126));
        assert!(!is_printable(127));
    }

    #[test]
    fn classifies_known_characters() {
        assert_eq!(CharCode::from_byte(b' ').as_u8(), 1);
        assert_eq!(CharCode::from_byte(b'A').as_u8(), 34);
        assert_eq!(CharCode::from_byte(b'~').as_u8(), 95);
        assert_eq!(CharCode::from_byte(b'\n'), CharCode::PAD);
        assert_eq!(CharCode::from_byte(b'\t'), CharCode::PAD);
    }

    #[test]
    fn classification_is_total_and_bounded() {
        for byte in 0..=u8::MAX {
            let code = CharCode::from_byte(byte);
            assert!(usize::from(code.as_u8()) < VOCAB_SIZE);
            assert_eq!(code.is_pad(), !is_printable(byte));
        }
    }

    #[test]
    fn printable_round_trip_is_identity() {
        for byte in FIRST_PRINTABLE..=LAST_PRINTABLE {
            let code = CharCode::from_byte(byte);
            assert_eq!(code.to_char(), Some(byte as char));
        }
        assert_eq!(CharCode::PAD.to_char(), None);
    }

    #[test]
    fn codes_order_like_their_bytes() {
        assert!(CharCode::from_byte(b'a') < CharCode::from_byte(b'b'));
        assert!(CharCode::PAD < CharCode::from_byte(b' '));
    }

    #[test]
    fn serde_rejects_out_of_range_codes() {
        let ok: CharCode = serde_json::from_str("95").unwrap();
        assert_eq!(ok, CharCode::from_byte(b'~'));
        assert!(serde_json::from_str::<CharCode>("96").is_err());
        assert_eq!(serde_json::to_string(&CharCode::PAD).unwrap(), "0");
    }
}
