//! Piece placement: the twelve piece bitboards and their derived
//! occupancy, with the queries move generation is built on.

use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::attacks;
use crate::types::{Bitboard, Color, Piece, Role, Square, ROLES};

/// Piece placement container.
///
/// Invariants, re-established by every mutator: the per-role bitboards
/// of one color are pairwise disjoint, the two per-color occupancies
/// are disjoint, and `occupied` is always their union.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Board {
    pieces: [[Bitboard; 6]; 2],
    by_color: [Bitboard; 2],
    occupied: Bitboard,
}

impl Board {
    /// An empty board.
    #[must_use]
    pub fn empty() -> Self {
        Board {
            pieces: [[Bitboard::EMPTY; 6]; 2],
            by_color: [Bitboard::EMPTY; 2],
            occupied: Bitboard::EMPTY,
        }
    }

    /// The standard-chess starting placement.
    #[must_use]
    pub fn standard() -> Self {
        let mut board = Board::empty();
        let back_rank = [
            Role::Rook,
            Role::Knight,
            Role::Bishop,
            Role::Queen,
            Role::King,
            Role::Bishop,
            Role::Knight,
            Role::Rook,
        ];
        for (file, role) in back_rank.into_iter().enumerate() {
            let file = file as u8;
            board.set_piece_at(Square::new(file, 0), Color::White.of(role));
            board.set_piece_at(Square::new(file, 1), Color::White.of(Role::Pawn));
            board.set_piece_at(Square::new(file, 6), Color::Black.of(Role::Pawn));
            board.set_piece_at(Square::new(file, 7), Color::Black.of(role));
        }
        board
    }

    /// Bitboard of all pieces.
    #[inline]
    #[must_use]
    pub const fn occupied(&self) -> Bitboard {
        self.occupied
    }

    /// Bitboard of all pieces of one color.
    #[inline]
    #[must_use]
    pub const fn by_color(&self, color: Color) -> Bitboard {
        self.by_color[color.index()]
    }

    /// Bitboard of all pieces of one role, both colors.
    #[inline]
    #[must_use]
    pub const fn by_role(&self, role: Role) -> Bitboard {
        Bitboard(self.pieces[0][role.index()].0 | self.pieces[1][role.index()].0)
    }

    /// Bitboard of one piece kind.
    #[inline]
    #[must_use]
    pub const fn by_piece(&self, piece: Piece) -> Bitboard {
        self.pieces[piece.color.index()][piece.role.index()]
    }

    /// The piece on a square, if any.
    #[must_use]
    pub fn piece_at(&self, sq: Square) -> Option<Piece> {
        let color = self.color_at(sq)?;
        for role in ROLES {
            if self.pieces[color.index()][role.index()].contains(sq) {
                return Some(color.of(role));
            }
        }
        None
    }

    /// The role on a square, if any, ignoring color.
    #[must_use]
    pub fn role_at(&self, sq: Square) -> Option<Role> {
        self.piece_at(sq).map(|piece| piece.role)
    }

    /// The color on a square, if any.
    #[inline]
    #[must_use]
    pub fn color_at(&self, sq: Square) -> Option<Color> {
        if self.by_color[0].contains(sq) {
            Some(Color::White)
        } else if self.by_color[1].contains(sq) {
            Some(Color::Black)
        } else {
            None
        }
    }

    /// Put a piece on a square, replacing whatever was there.
    pub fn set_piece_at(&mut self, sq: Square, piece: Piece) {
        self.discard_piece_at(sq);
        self.pieces[piece.color.index()][piece.role.index()].add(sq);
        self.by_color[piece.color.index()].add(sq);
        self.occupied.add(sq);
    }

    /// Remove and return the piece on a square.
    pub fn discard_piece_at(&mut self, sq: Square) -> Option<Piece> {
        let piece = self.piece_at(sq)?;
        self.pieces[piece.color.index()][piece.role.index()].discard(sq);
        self.by_color[piece.color.index()].discard(sq);
        self.occupied.discard(sq);
        Some(piece)
    }

    /// Move a piece between squares, capturing whatever sat on `to`.
    pub fn move_piece(&mut self, from: Square, to: Square) {
        if let Some(piece) = self.discard_piece_at(from) {
            self.set_piece_at(to, piece);
        }
    }

    /// The king square of a color, if that color has one.
    #[inline]
    #[must_use]
    pub fn king_of(&self, color: Color) -> Option<Square> {
        self.pieces[color.index()][Role::King.index()].first()
    }

    /// All pieces of `by` that attack `sq`, computed against an
    /// explicit occupancy so callers can lift pieces (x-ray checks).
    #[must_use]
    pub fn attackers_to(&self, sq: Square, by: Color, occupied: Bitboard) -> Bitboard {
        let c = by.index();
        let rooks_queens =
            self.pieces[c][Role::Rook.index()] | self.pieces[c][Role::Queen.index()];
        let bishops_queens =
            self.pieces[c][Role::Bishop.index()] | self.pieces[c][Role::Queen.index()];

        (attacks::rook_attacks(sq, occupied) & rooks_queens)
            | (attacks::bishop_attacks(sq, occupied) & bishops_queens)
            | (attacks::knight_attacks(sq) & self.pieces[c][Role::Knight.index()])
            | (attacks::king_attacks(sq) & self.pieces[c][Role::King.index()])
            | (attacks::pawn_attacks(by.opponent(), sq) & self.pieces[c][Role::Pawn.index()])
    }

    /// Enemy pieces giving check to `color`'s king. Empty when the king
    /// is absent (Horde's white side).
    #[must_use]
    pub fn checkers_of(&self, color: Color) -> Bitboard {
        match self.king_of(color) {
            Some(king) => self.attackers_to(king, color.opponent(), self.occupied),
            None => Bitboard::EMPTY,
        }
    }

    /// Friendly pieces of `color` that are the sole shield between
    /// their king and an enemy slider: the pinned set.
    #[must_use]
    pub fn slider_blockers(&self, king: Square, color: Color) -> Bitboard {
        let them = color.opponent().index();
        let rooks_queens =
            self.pieces[them][Role::Rook.index()] | self.pieces[them][Role::Queen.index()];
        let bishops_queens =
            self.pieces[them][Role::Bishop.index()] | self.pieces[them][Role::Queen.index()];

        let snipers = (attacks::rook_attacks(king, Bitboard::EMPTY) & rooks_queens)
            | (attacks::bishop_attacks(king, Bitboard::EMPTY) & bishops_queens);

        let mut blockers = Bitboard::EMPTY;
        for sniper in snipers {
            let shield = attacks::between(king, sniper) & self.occupied;
            if !shield.more_than_one() {
                blockers |= shield & self.by_color(color);
            }
        }
        blockers
    }
}

impl Default for Board {
    fn default() -> Self {
        Board::standard()
    }
}

#[cfg(test)]
impl Board {
    /// Test helper: an empty board with the given pieces placed.
    pub(crate) fn empty_with(pieces: &[(Square, Piece)]) -> Self {
        let mut board = Board::empty();
        for &(sq, piece) in pieces {
            board.set_piece_at(sq, piece);
        }
        board
    }
}

impl fmt::Display for Board {
    /// Render an 8x8 diagram, rank 8 first, FEN piece letters.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for rank in (0..8).rev() {
            for file in 0..8 {
                let sq = Square::new(file, rank);
                match self.piece_at(sq) {
                    Some(piece) => write!(f, " {piece}")?,
                    None => write!(f, " .")?,
                }
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
