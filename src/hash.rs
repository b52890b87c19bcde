//! Zobrist hashing for positions.
//!
//! Each applied move appends a fixed-size 3-byte digest of the new
//! position to an append-only history; repetition detection compares
//! the newest digest against past digests of positions with the same
//! side to move (every second entry).

use std::sync::LazyLock;

use rand::prelude::*;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Bytes per digest entry.
pub(crate) const ENTRY_SIZE: usize = 3;

pub(crate) struct ZobristKeys {
    // piece_keys[role][color][square]
    pub(crate) piece_keys: [[[u64; 64]; 2]; 6],
    pub(crate) black_to_move_key: u64,
    // castling_keys[bit]: WK, WQ, BK, BQ
    pub(crate) castling_keys: [u64; 4],
    // en_passant_keys[file]
    pub(crate) en_passant_keys: [u64; 8],
    // check_keys[color][checks given - 1] (Three-check)
    pub(crate) check_keys: [[u64; 3]; 2],
    // pocket_keys[color][role][count - 1] (Crazyhouse, roles pawn..queen)
    pub(crate) pocket_keys: [[[u64; 16]; 5]; 2],
    // promoted_keys[square] (Crazyhouse promoted-piece markers)
    pub(crate) promoted_keys: [u64; 64],
}

impl ZobristKeys {
    fn new() -> Self {
        // Fixed seed: the keys are part of the engine's observable
        // behavior (digests are compared across positions), so they
        // must be identical on every run.
        let mut rng = StdRng::seed_from_u64(0x5ca1_ab1e_0ddba11);

        let mut piece_keys = [[[0; 64]; 2]; 6];
        for role in &mut piece_keys {
            for color in role.iter_mut() {
                for key in color.iter_mut() {
                    *key = rng.gen();
                }
            }
        }

        let black_to_move_key = rng.gen();

        let mut castling_keys = [0; 4];
        for key in &mut castling_keys {
            *key = rng.gen();
        }

        let mut en_passant_keys = [0; 8];
        for key in &mut en_passant_keys {
            *key = rng.gen();
        }

        let mut check_keys = [[0; 3]; 2];
        for color in &mut check_keys {
            for key in color.iter_mut() {
                *key = rng.gen();
            }
        }

        let mut pocket_keys = [[[0; 16]; 5]; 2];
        for color in &mut pocket_keys {
            for role in color.iter_mut() {
                for key in role.iter_mut() {
                    *key = rng.gen();
                }
            }
        }

        let mut promoted_keys = [0; 64];
        for key in &mut promoted_keys {
            *key = rng.gen();
        }

        ZobristKeys {
            piece_keys,
            black_to_move_key,
            castling_keys,
            en_passant_keys,
            check_keys,
            pocket_keys,
            promoted_keys,
        }
    }
}

pub(crate) static ZOBRIST: LazyLock<ZobristKeys> = LazyLock::new(ZobristKeys::new);

/// Truncate a full hash to the stored digest width.
#[inline]
pub(crate) fn digest(hash: u64) -> [u8; ENTRY_SIZE] {
    [hash as u8, (hash >> 8) as u8, (hash >> 16) as u8]
}

/// Append-only sequence of position digests, newest last.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PositionHashes {
    bytes: Vec<u8>,
}

impl PositionHashes {
    #[must_use]
    pub(crate) fn new() -> Self {
        PositionHashes { bytes: Vec::new() }
    }

    pub(crate) fn push(&mut self, entry: [u8; ENTRY_SIZE]) {
        self.bytes.extend_from_slice(&entry);
    }

    /// Number of digest entries recorded.
    #[must_use]
    pub fn len(&self) -> usize {
        self.bytes.len() / ENTRY_SIZE
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Returns true if the newest digest occurs at least `k` times
    /// among recorded positions with the same side to move (sampling
    /// every second entry, newest first).
    #[must_use]
    pub(crate) fn k_fold(&self, k: usize) -> bool {
        let mut samples = self.bytes.chunks_exact(ENTRY_SIZE).rev().step_by(2);
        let Some(newest) = samples.next() else {
            return false;
        };
        let mut count = 1;
        for entry in samples {
            if entry == newest {
                count += 1;
                if count >= k {
                    return true;
                }
            }
        }
        count >= k
    }
}
