//! Castling rights: the four-bit mask plus the unmoved-rook set that
//! backs it (the rook set is what makes Chess960 castling work, since
//! rooks need not start on the a- and h-files).

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::bitboard::Bitboard;
use super::piece::Color;
use super::square::Square;

pub(crate) const CASTLE_WHITE_K: u8 = 1 << 0;
pub(crate) const CASTLE_WHITE_Q: u8 = 1 << 1;
pub(crate) const CASTLE_BLACK_K: u8 = 1 << 2;
pub(crate) const CASTLE_BLACK_Q: u8 = 1 << 3;

/// The side of the board a castling move goes toward.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Side {
    King,
    Queen,
}

impl Side {
    pub(crate) const ALL: [Side; 2] = [Side::King, Side::Queen];

    /// The file the king lands on (g for kingside, c for queenside).
    #[inline]
    #[must_use]
    pub const fn king_to_file(self) -> u8 {
        match self {
            Side::King => 6,
            Side::Queen => 2,
        }
    }

    /// The file the rook lands on (f for kingside, d for queenside).
    #[inline]
    #[must_use]
    pub const fn rook_to_file(self) -> u8 {
        match self {
            Side::King => 5,
            Side::Queen => 3,
        }
    }
}

/// Castling rights: a cached four-bit mask over (color, side), plus the
/// bitboard of rooks that have not yet moved and so still carry their
/// right.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Castles {
    mask: u8,
    rooks: Bitboard,
}

impl Castles {
    /// No castling rights at all.
    #[must_use]
    pub const fn none() -> Self {
        Castles {
            mask: 0,
            rooks: Bitboard::EMPTY,
        }
    }

    /// The standard-chess starting rights: both colors, both sides,
    /// rooks in the corners.
    #[must_use]
    pub const fn standard() -> Self {
        Castles {
            mask: CASTLE_WHITE_K | CASTLE_WHITE_Q | CASTLE_BLACK_K | CASTLE_BLACK_Q,
            rooks: Bitboard::CORNERS,
        }
    }

    /// Build rights from an unmoved-rook set, deriving the mask from
    /// each rook's position relative to its king.
    #[must_use]
    pub fn from_rooks(rooks: Bitboard, kings: [Option<Square>; 2]) -> Self {
        let mut castles = Castles {
            mask: 0,
            rooks,
        };
        for color in [Color::White, Color::Black] {
            let Some(king) = kings[color.index()] else {
                continue;
            };
            let back = Bitboard::rank(color.back_rank());
            for rook in rooks & back {
                let side = if rook.file() > king.file() {
                    Side::King
                } else {
                    Side::Queen
                };
                castles.mask |= Self::bit_for(color, side);
            }
        }
        castles
    }

    /// Check whether a specific right is still held.
    #[inline]
    #[must_use]
    pub const fn has(self, color: Color, side: Side) -> bool {
        self.mask & Self::bit_for(color, side) != 0
    }

    /// Returns true if neither color holds any right.
    #[inline]
    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.mask == 0
    }

    /// The set of rooks still carrying a right.
    #[inline]
    #[must_use]
    pub const fn unmoved_rooks(self) -> Bitboard {
        self.rooks
    }

    /// The raw mask (for hashing).
    #[inline]
    #[must_use]
    pub const fn mask(self) -> u8 {
        self.mask
    }

    /// The rook carrying the right for this color and side, relative to
    /// the given king square.
    #[must_use]
    pub fn rook_for(self, color: Color, side: Side, king: Square) -> Option<Square> {
        if !self.has(color, side) {
            return None;
        }
        let candidates = self.rooks & Bitboard::rank(color.back_rank());
        match side {
            Side::King => candidates.iter().find(|r| r.file() > king.file()),
            Side::Queen => candidates.iter().filter(|r| r.file() < king.file()).last(),
        }
    }

    /// Drop any right carried by a rook on this square. Used when a
    /// rook moves away or is captured.
    pub fn discard_rook(&mut self, sq: Square, color: Color, king: Option<Square>) {
        if !self.rooks.contains(sq) {
            return;
        }
        self.rooks.discard(sq);
        if let Some(king) = king {
            if sq.rank() == color.back_rank() {
                let side = if sq.file() > king.file() {
                    Side::King
                } else {
                    Side::Queen
                };
                self.mask &= !Self::bit_for(color, side);
            }
        }
    }

    /// Drop every right held by a color. Used when its king moves.
    pub fn discard_color(&mut self, color: Color) {
        self.rooks &= !Bitboard::rank(color.back_rank());
        self.mask &= match color {
            Color::White => !(CASTLE_WHITE_K | CASTLE_WHITE_Q),
            Color::Black => !(CASTLE_BLACK_K | CASTLE_BLACK_Q),
        };
    }

    #[inline]
    const fn bit_for(color: Color, side: Side) -> u8 {
        match (color, side) {
            (Color::White, Side::King) => CASTLE_WHITE_K,
            (Color::White, Side::Queen) => CASTLE_WHITE_Q,
            (Color::Black, Side::King) => CASTLE_BLACK_K,
            (Color::Black, Side::Queen) => CASTLE_BLACK_Q,
        }
    }
}

impl Default for Castles {
    fn default() -> Self {
        Castles::none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_rights() {
        let castles = Castles::standard();
        for color in [Color::White, Color::Black] {
            for side in Side::ALL {
                assert!(castles.has(color, side));
            }
        }
        assert_eq!(castles.unmoved_rooks(), Bitboard::CORNERS);
    }

    #[test]
    fn test_rook_for_standard() {
        let castles = Castles::standard();
        assert_eq!(
            castles.rook_for(Color::White, Side::King, Square::E1),
            Some(Square::H1)
        );
        assert_eq!(
            castles.rook_for(Color::White, Side::Queen, Square::E1),
            Some(Square::A1)
        );
        assert_eq!(
            castles.rook_for(Color::Black, Side::King, Square::E8),
            Some(Square::H8)
        );
    }

    #[test]
    fn test_discard_rook() {
        let mut castles = Castles::standard();
        castles.discard_rook(Square::H1, Color::White, Some(Square::E1));
        assert!(!castles.has(Color::White, Side::King));
        assert!(castles.has(Color::White, Side::Queen));
        assert!(castles.has(Color::Black, Side::King));
    }

    #[test]
    fn test_discard_color() {
        let mut castles = Castles::standard();
        castles.discard_color(Color::White);
        assert!(!castles.has(Color::White, Side::King));
        assert!(!castles.has(Color::White, Side::Queen));
        assert!(castles.has(Color::Black, Side::King));
        assert!(castles.has(Color::Black, Side::Queen));
    }

    #[test]
    fn test_from_rooks_chess960() {
        // king on g1, rooks on f1 and h1: both rights derivable
        let rooks = Bitboard::from_square(Square::F1).with(Square::H1);
        let castles = Castles::from_rooks(rooks, [Some(Square::G1), None]);
        assert!(castles.has(Color::White, Side::King));
        assert!(castles.has(Color::White, Side::Queen));
        assert_eq!(
            castles.rook_for(Color::White, Side::King, Square::G1),
            Some(Square::H1)
        );
        assert_eq!(
            castles.rook_for(Color::White, Side::Queen, Square::G1),
            Some(Square::F1)
        );
    }

    #[test]
    fn test_target_files() {
        assert_eq!(Side::King.king_to_file(), 6);
        assert_eq!(Side::King.rook_to_file(), 5);
        assert_eq!(Side::Queen.king_to_file(), 2);
        assert_eq!(Side::Queen.rook_to_file(), 3);
    }
}
