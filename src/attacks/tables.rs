//! Reference attack generation used to fill the lookup tables.
//!
//! Deltas are raw square-index steps; a step is valid only while the
//! Chebyshev distance between consecutive squares stays within 2, which
//! is what stops rays and leaps from wrapping around the board edge.

use crate::types::{Bitboard, Square};

pub(crate) const ROOK_DELTAS: [i32; 4] = [8, 1, -8, -1];
pub(crate) const BISHOP_DELTAS: [i32; 4] = [9, 7, -9, -7];
pub(crate) const KING_DELTAS: [i32; 8] = [9, 8, 7, 1, -9, -8, -7, -1];
pub(crate) const KNIGHT_DELTAS: [i32; 8] = [17, 15, 10, 6, -17, -15, -10, -6];
pub(crate) const WHITE_PAWN_DELTAS: [i32; 2] = [7, 9];
pub(crate) const BLACK_PAWN_DELTAS: [i32; 2] = [-7, -9];

/// Walk every delta from `sq`, emitting each destination (first blocker
/// included) until the board edge or a blocker stops the ray.
pub(crate) fn sliding_attacks(sq: Square, occupied: Bitboard, deltas: &[i32]) -> Bitboard {
    let mut attack = Bitboard::EMPTY;

    for &delta in deltas {
        let mut previous = sq;
        while let Some(s) = previous.offset(delta) {
            if s.distance(previous) > 2 {
                break;
            }
            attack.add(s);
            if occupied.contains(s) {
                break;
            }
            previous = s;
        }
    }

    attack
}

/// Single-step (leaper) attacks: a fully occupied board truncates every
/// ray after its first square.
pub(crate) fn step_attacks(sq: Square, deltas: &[i32]) -> Bitboard {
    sliding_attacks(sq, Bitboard::ALL, deltas)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sliding_rook_attacks() {
        let attack = sliding_attacks(Square::D6, Bitboard(0x3f7f28802826f5b9), &ROOK_DELTAS);
        assert_eq!(attack, Bitboard(0x8370808000000));
    }

    #[test]
    fn test_knight_attacks_center() {
        // e4 knight reaches 8 squares
        assert_eq!(step_attacks(Square::E4, &KNIGHT_DELTAS).count(), 8);
    }

    #[test]
    fn test_knight_attacks_corner_no_wrap() {
        let attack = step_attacks(Square::A1, &KNIGHT_DELTAS);
        assert_eq!(
            attack,
            Bitboard::from_square(Square::B3).with(Square::C2)
        );
    }

    #[test]
    fn test_king_attacks_edge() {
        let attack = step_attacks(Square::H4, &KING_DELTAS);
        assert_eq!(attack.count(), 5);
        assert!(!attack.contains(Square::A4));
        assert!(!attack.contains(Square::A5));
    }

    #[test]
    fn test_pawn_attacks() {
        assert_eq!(
            step_attacks(Square::E4, &WHITE_PAWN_DELTAS),
            Bitboard::from_square(Square::D5).with(Square::F5)
        );
        assert_eq!(
            step_attacks(Square::A2, &WHITE_PAWN_DELTAS),
            Bitboard::from_square(Square::B3)
        );
        assert_eq!(
            step_attacks(Square::E5, &BLACK_PAWN_DELTAS),
            Bitboard::from_square(Square::D4).with(Square::F4)
        );
    }
}
