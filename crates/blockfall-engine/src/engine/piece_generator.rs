use std::{fmt, str::FromStr};

use rand::{
    Rng, SeedableRng as _,
    distr::{Distribution, StandardUniform},
};
use rand_pcg::Pcg32;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::{ParsePieceSeedError, Piece};

/// Produces new pieces, each kind drawn uniformly and independently.
///
/// There is no bag or history: the same kind may come up any number of times
/// in a row.
///
/// # Example
///
/// ```
/// use blockfall_engine::{PieceGenerator, PieceSeed};
///
/// let seed: PieceSeed = "000102030405060708090a0b0c0d0e0f".parse().unwrap();
/// let mut a = PieceGenerator::with_seed(seed);
/// let mut b = PieceGenerator::with_seed(seed);
///
/// for _ in 0..10 {
///     assert_eq!(a.next_piece(), b.next_piece());
/// }
/// ```
#[derive(Debug, Clone)]
pub struct PieceGenerator {
    rng: Pcg32,
}

impl Default for PieceGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl PieceGenerator {
    /// Creates a generator seeded from the thread-local RNG.
    #[must_use]
    pub fn new() -> Self {
        Self::with_seed(rand::rng().random())
    }

    /// Like [`Self::new`], but with a specific seed for a reproducible sequence.
    #[must_use]
    pub fn with_seed(seed: PieceSeed) -> Self {
        Self {
            rng: Pcg32::from_seed(seed.0),
        }
    }

    /// Draws a new piece at its spawn position.
    pub fn next_piece(&mut self) -> Piece {
        Piece::new(self.rng.random())
    }
}

/// Seed for deterministic piece generation.
///
/// A 128-bit value, written as 32 hex digits (big-endian) in configuration
/// files, on the command line and in logs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PieceSeed([u8; 16]);

impl fmt::Display for PieceSeed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:032x}", u128::from_be_bytes(self.0))
    }
}

impl FromStr for PieceSeed {
    type Err = ParsePieceSeedError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.len() != 32 {
            return Err(ParsePieceSeedError::InvalidLength { len: s.len() });
        }
        // `from_str_radix` alone would also take a leading sign.
        if !s.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(ParsePieceSeedError::InvalidDigit { text: s.to_owned() });
        }
        let num = u128::from_str_radix(s, 16).map_err(|_| ParsePieceSeedError::InvalidDigit {
            text: s.to_owned(),
        })?;
        Ok(Self(num.to_be_bytes()))
    }
}

impl Serialize for PieceSeed {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for PieceSeed {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let hex_str = String::deserialize(deserializer)?;
        hex_str.parse().map_err(serde::de::Error::custom)
    }
}

/// Allows generating random `PieceSeed` values with `rng.random()`.
impl Distribution<PieceSeed> for StandardUniform {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> PieceSeed {
        let mut seed = [0; 16];
        rng.fill(&mut seed);
        PieceSeed(seed)
    }
}

#[cfg(test)]
mod tests {
    use crate::PieceKind;

    use super::*;

    const SEED: PieceSeed = PieceSeed([
        0x12, 0x34, 0x56, 0x78, 0x9A, 0xBC, 0xDE, 0xF0, 0x11, 0x22, 0x33, 0x44, 0x55, 0x66, 0x77,
        0x88,
    ]);

    #[test]
    fn test_same_seed_same_sequence() {
        let mut a = PieceGenerator::with_seed(SEED);
        let mut b = PieceGenerator::with_seed(SEED);
        for _ in 0..50 {
            assert_eq!(a.next_piece(), b.next_piece());
        }
    }

    #[test]
    fn test_every_kind_is_drawn() {
        let mut generator = PieceGenerator::with_seed(SEED);
        let mut counts = [0_usize; PieceKind::LEN];
        for _ in 0..7000 {
            counts[generator.next_piece().kind() as usize] += 1;
        }
        // Uniform draw: each kind lands near 1000; the bounds are loose.
        for (kind, count) in PieceKind::ALL.iter().zip(counts) {
            assert!((700..1300).contains(&count), "{kind}: {count}");
        }
    }

    #[test]
    fn test_next_piece_spawns_at_top() {
        let mut generator = PieceGenerator::with_seed(SEED);
        for _ in 0..20 {
            let piece = generator.next_piece();
            assert_eq!(piece, Piece::new(piece.kind()));
            assert_eq!(piece.position().y(), 0);
        }
    }

    #[test]
    fn test_seed_text_format() {
        assert_eq!(SEED.to_string(), "123456789abcdef01122334455667788");
        assert_eq!(
            "123456789ABCDEF01122334455667788".parse::<PieceSeed>(),
            Ok(SEED)
        );

        assert_eq!(
            "123".parse::<PieceSeed>(),
            Err(ParsePieceSeedError::InvalidLength { len: 3 })
        );
        assert!(matches!(
            "ghijklmnopqrstuvwxyzghijklmnopqr".parse::<PieceSeed>(),
            Err(ParsePieceSeedError::InvalidDigit { .. })
        ));
    }

    #[test]
    fn test_seed_rejects_sign() {
        for text in [
            "+23456789abcdef01122334455667788",
            "-23456789abcdef01122334455667788",
        ] {
            assert_eq!(
                text.parse::<PieceSeed>(),
                Err(ParsePieceSeedError::InvalidDigit {
                    text: text.to_owned()
                })
            );
        }
    }

    #[test]
    fn test_seed_json() {
        let json = serde_json::to_string(&SEED).unwrap();
        assert_eq!(json, "\"123456789abcdef01122334455667788\"");

        let err = serde_json::from_str::<PieceSeed>("\"0123\"").unwrap_err();
        assert!(err.to_string().contains("invalid hex"));
    }
}
