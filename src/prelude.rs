//! Convenience re-exports for typical use.

pub use crate::{
    Bitboard, Board, Color, Move, MoveList, Outcome, Piece, Position, Role, Side, Square,
    Termination, Variant,
};
