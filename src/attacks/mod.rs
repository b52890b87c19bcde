//! Attack tables for move generation.
//!
//! Sliding piece attacks (bishop, rook, queen) use magic bitboards: the
//! relevant blocker subset is hashed by a per-square multiplier into a
//! shared attack table, giving O(1) lookups. Knight, king and pawn
//! attacks are plain per-square tables, and two 64x64 matrices provide
//! the ray and open-segment geometry used for pins and check blocking.
//!
//! Everything is initialized exactly once behind a `LazyLock`, so the
//! tables are safe to share across threads; call [`init`] to pay the
//! setup cost eagerly at startup.

#![allow(clippy::needless_range_loop)] // Index loops are clearer for square pairs

mod magics;
mod tables;

use std::sync::LazyLock;

use crate::types::{Bitboard, Color, Piece, Role, Square};

use self::magics::{BISHOP_BITS, BISHOP_MAGICS, ROOK_BITS, ROOK_MAGICS};
use self::tables::{
    sliding_attacks, step_attacks, BISHOP_DELTAS, BLACK_PAWN_DELTAS, KING_DELTAS, KNIGHT_DELTAS,
    ROOK_DELTAS, WHITE_PAWN_DELTAS,
};

/// Per-square magic entry: relevant-occupancy mask, multiplier, shift,
/// and base index into the shared attack table.
struct Magic {
    mask: u64,
    factor: u64,
    shift: u32,
    offset: usize,
}

const EMPTY_MAGIC: Magic = Magic {
    mask: 0,
    factor: 0,
    shift: 0,
    offset: 0,
};

struct AttackTables {
    /// Shared sliding attack table, rook entries first, bishops after.
    attacks: Vec<u64>,
    rook_magics: [Magic; 64],
    bishop_magics: [Magic; 64],

    knight_attacks: [u64; 64],
    king_attacks: [u64; 64],
    pawn_attacks: [[u64; 64]; 2],

    /// Full line through two aligned squares, clipped to the board,
    /// endpoints included. Empty for unaligned pairs.
    rays: [[u64; 64]; 64],
    /// Open segment strictly between two aligned squares. Empty for
    /// unaligned or adjacent pairs.
    between: [[u64; 64]; 64],
}

impl AttackTables {
    fn new() -> Self {
        let mut t = AttackTables {
            attacks: Vec::new(),
            rook_magics: [EMPTY_MAGIC; 64],
            bishop_magics: [EMPTY_MAGIC; 64],
            knight_attacks: [0; 64],
            king_attacks: [0; 64],
            pawn_attacks: [[0; 64]; 2],
            rays: [[0; 64]; 64],
            between: [[0; 64]; 64],
        };

        for s in 0..64 {
            let sq = Square::from_index(s);
            t.knight_attacks[s] = step_attacks(sq, &KNIGHT_DELTAS).0;
            t.king_attacks[s] = step_attacks(sq, &KING_DELTAS).0;
            t.pawn_attacks[Color::White.index()][s] = step_attacks(sq, &WHITE_PAWN_DELTAS).0;
            t.pawn_attacks[Color::Black.index()][s] = step_attacks(sq, &BLACK_PAWN_DELTAS).0;
        }

        init_magics(
            &mut t.attacks,
            &mut t.rook_magics,
            &ROOK_MAGICS,
            &ROOK_BITS,
            &ROOK_DELTAS,
        );
        init_magics(
            &mut t.attacks,
            &mut t.bishop_magics,
            &BISHOP_MAGICS,
            &BISHOP_BITS,
            &BISHOP_DELTAS,
        );

        for a in 0..64 {
            let sa = Square::from_index(a);
            let bishop_range = sliding_attacks(sa, Bitboard::EMPTY, &BISHOP_DELTAS);
            let rook_range = sliding_attacks(sa, Bitboard::EMPTY, &ROOK_DELTAS);

            for b in 0..64 {
                let sb = Square::from_index(b);
                let deltas: &[i32] = if bishop_range.contains(sb) {
                    &BISHOP_DELTAS
                } else if rook_range.contains(sb) {
                    &ROOK_DELTAS
                } else {
                    continue;
                };

                let range_a = sliding_attacks(sa, Bitboard::EMPTY, deltas);
                let range_b = sliding_attacks(sb, Bitboard::EMPTY, deltas);
                t.rays[a][b] = (range_a & range_b).with(sa).with(sb).0;
                t.between[a][b] = (sliding_attacks(sa, Bitboard::from_square(sb), deltas)
                    & sliding_attacks(sb, Bitboard::from_square(sa), deltas))
                .0;
            }
        }

        #[cfg(feature = "logging")]
        log::debug!(
            "attack tables initialized: {} sliding entries",
            t.attacks.len()
        );

        t
    }
}

/// Fill the shared attack table for one slider type, enumerating every
/// blocker subset of each square's mask with the carry-rippler loop.
/// Writing through the magic index doubles as verification: a factor
/// that maps two subsets with different attack sets to one slot stops
/// initialization immediately.
fn init_magics(
    attacks: &mut Vec<u64>,
    magics: &mut [Magic; 64],
    factors: &[u64; 64],
    bits: &[u32; 64],
    deltas: &[i32],
) {
    for s in 0..64 {
        let sq = Square::from_index(s);
        let range = sliding_attacks(sq, Bitboard::EMPTY, deltas);

        let edges = ((Bitboard::RANK_1 | Bitboard::RANK_8) & !Bitboard::rank(sq.rank()))
            | ((Bitboard::FILE_A | Bitboard::FILE_H) & !Bitboard::file(sq.file()));
        let mask = range & !edges;

        let magic = Magic {
            mask: mask.0,
            factor: factors[s],
            shift: 64 - bits[s],
            offset: attacks.len(),
        };
        attacks.resize(magic.offset + (1usize << bits[s]), 0);

        for subset in mask.carry_rippler() {
            let attack = sliding_attacks(sq, subset, deltas);
            let idx = magic.offset + (subset.0.wrapping_mul(magic.factor) >> magic.shift) as usize;
            let slot = &mut attacks[idx];
            assert!(
                *slot == 0 || *slot == attack.0,
                "magic collision on square {sq}"
            );
            *slot = attack.0;
        }

        magics[s] = magic;
    }
}

static TABLES: LazyLock<AttackTables> = LazyLock::new(AttackTables::new);

/// Force table initialization now instead of on first query. Optional:
/// any query initializes on demand, but callers that care about startup
/// latency can do it here, before spawning workers.
pub fn init() {
    LazyLock::force(&TABLES);
}

/// Squares a knight on `sq` attacks.
#[inline]
#[must_use]
pub fn knight_attacks(sq: Square) -> Bitboard {
    Bitboard(TABLES.knight_attacks[sq.index()])
}

/// Squares a king on `sq` attacks.
#[inline]
#[must_use]
pub fn king_attacks(sq: Square) -> Bitboard {
    Bitboard(TABLES.king_attacks[sq.index()])
}

/// Squares a pawn of `color` on `sq` attacks.
#[inline]
#[must_use]
pub fn pawn_attacks(color: Color, sq: Square) -> Bitboard {
    Bitboard(TABLES.pawn_attacks[color.index()][sq.index()])
}

/// Squares a rook on `sq` attacks with the given occupancy.
#[inline]
#[must_use]
pub fn rook_attacks(sq: Square, occupied: Bitboard) -> Bitboard {
    let t = &*TABLES;
    let m = &t.rook_magics[sq.index()];
    let idx = ((occupied.0 & m.mask).wrapping_mul(m.factor) >> m.shift) as usize;
    Bitboard(t.attacks[m.offset + idx])
}

/// Squares a bishop on `sq` attacks with the given occupancy.
#[inline]
#[must_use]
pub fn bishop_attacks(sq: Square, occupied: Bitboard) -> Bitboard {
    let t = &*TABLES;
    let m = &t.bishop_magics[sq.index()];
    let idx = ((occupied.0 & m.mask).wrapping_mul(m.factor) >> m.shift) as usize;
    Bitboard(t.attacks[m.offset + idx])
}

/// Squares a queen on `sq` attacks with the given occupancy.
#[inline]
#[must_use]
pub fn queen_attacks(sq: Square, occupied: Bitboard) -> Bitboard {
    rook_attacks(sq, occupied) | bishop_attacks(sq, occupied)
}

/// Attack set for an arbitrary piece.
#[inline]
#[must_use]
pub fn attacks(piece: Piece, sq: Square, occupied: Bitboard) -> Bitboard {
    match piece.role {
        Role::Pawn => pawn_attacks(piece.color, sq),
        Role::Knight => knight_attacks(sq),
        Role::Bishop => bishop_attacks(sq, occupied),
        Role::Rook => rook_attacks(sq, occupied),
        Role::Queen => queen_attacks(sq, occupied),
        Role::King => king_attacks(sq),
    }
}

/// The full line through `a` and `b` clipped to the board, endpoints
/// included; empty when the squares do not share a rank, file or
/// diagonal.
#[inline]
#[must_use]
pub fn ray(a: Square, b: Square) -> Bitboard {
    Bitboard(TABLES.rays[a.index()][b.index()])
}

/// The open segment strictly between `a` and `b`; empty for unaligned
/// or adjacent squares.
#[inline]
#[must_use]
pub fn between(a: Square, b: Square) -> Bitboard {
    Bitboard(TABLES.between[a.index()][b.index()])
}

/// Returns true if `c` lies on the line through `a` and `b`.
#[inline]
#[must_use]
pub fn aligned(a: Square, b: Square, c: Square) -> bool {
    ray(a, b).contains(c)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rook_attacks_empty_board() {
        let attack = rook_attacks(Square::E4, Bitboard::EMPTY);
        let expected =
            (Bitboard::rank(3) | Bitboard::file(4)).without(Square::E4);
        assert_eq!(attack, expected);
        assert_eq!(attack.count(), 14);
    }

    #[test]
    fn test_rook_attacks_with_blockers() {
        let blockers = Bitboard::from_square(Square::E6).with(Square::C4);
        let attack = rook_attacks(Square::E4, blockers);
        assert!(attack.contains(Square::E6)); // first blocker included
        assert!(!attack.contains(Square::E7)); // stopped behind it
        assert!(attack.contains(Square::C4));
        assert!(!attack.contains(Square::B4));
        assert!(attack.contains(Square::H4));
    }

    #[test]
    fn test_bishop_attacks() {
        let attack = bishop_attacks(Square::E4, Bitboard::EMPTY);
        assert_eq!(attack.count(), 13);
        assert!(attack.contains(Square::B1));
        assert!(attack.contains(Square::H7));
        assert!(attack.contains(Square::A8));
        assert!(attack.contains(Square::H1));

        let blocked = bishop_attacks(Square::E4, Bitboard::from_square(Square::G6));
        assert!(blocked.contains(Square::G6));
        assert!(!blocked.contains(Square::H7));
    }

    #[test]
    fn test_rook_attacks_reference_position() {
        assert_eq!(
            rook_attacks(Square::D6, Bitboard(0x3f7f28802826f5b9)),
            Bitboard(0x8370808000000)
        );
    }

    #[test]
    fn test_queen_is_rook_xor_bishop() {
        for s in 0..64 {
            let sq = Square::from_index(s);
            for occ in [
                Bitboard::EMPTY,
                Bitboard(0xFF00_FF00_FF00_FF00),
                Bitboard(0x00FF_00FF_00FF_00FF),
                Bitboard(0x3f7f_2880_2826_f5b9),
            ] {
                assert_eq!(
                    rook_attacks(sq, occ) ^ bishop_attacks(sq, occ),
                    queen_attacks(sq, occ)
                );
            }
        }
    }

    #[test]
    fn test_magic_mask_ignores_irrelevant_occupancy() {
        // occupancy outside the relevant mask must not change the result
        let occ = Bitboard::from_square(Square::A4).with(Square::E8).with(Square::E1);
        assert_eq!(
            rook_attacks(Square::E4, occ),
            rook_attacks(Square::E4, Bitboard::EMPTY)
        );
    }

    #[test]
    fn test_ray_endpoints() {
        let r = ray(Square::A1, Square::C3);
        assert!(r.contains(Square::A1));
        assert!(r.contains(Square::C3));
        assert!(r.contains(Square::H8)); // extends past both endpoints
        assert!(!r.contains(Square::B1));

        assert_eq!(ray(Square::A1, Square::B3), Bitboard::EMPTY);
    }

    #[test]
    fn test_between_is_open_segment() {
        let b = between(Square::A1, Square::D4);
        assert_eq!(
            b,
            Bitboard::from_square(Square::B2).with(Square::C3)
        );
        assert_eq!(between(Square::A1, Square::B2), Bitboard::EMPTY);
        assert_eq!(between(Square::A1, Square::B3), Bitboard::EMPTY);
        assert_eq!(
            between(Square::H1, Square::A1),
            between(Square::A1, Square::H1)
        );
    }

    #[test]
    fn test_between_subset_of_ray() {
        for a in 0..64 {
            for b in 0..64 {
                let sa = Square::from_index(a);
                let sb = Square::from_index(b);
                let seg = between(sa, sb);
                let line = ray(sa, sb);
                assert_eq!(seg & !line, Bitboard::EMPTY);
                assert!(!seg.contains(sa));
                assert!(!seg.contains(sb));
            }
        }
    }

    #[test]
    fn test_aligned() {
        assert!(aligned(Square::A1, Square::H8, Square::D4));
        assert!(aligned(Square::A1, Square::D4, Square::H8));
        assert!(!aligned(Square::A1, Square::H8, Square::D5));
    }

    #[test]
    fn test_pawn_attack_tables() {
        assert_eq!(
            pawn_attacks(Color::White, Square::E4),
            Bitboard::from_square(Square::D5).with(Square::F5)
        );
        assert_eq!(
            pawn_attacks(Color::Black, Square::E4),
            Bitboard::from_square(Square::D3).with(Square::F3)
        );
        assert_eq!(
            pawn_attacks(Color::White, Square::A2),
            Bitboard::from_square(Square::B3)
        );
    }
}
