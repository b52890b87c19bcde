//! Chess move generation and rules engine.
//!
//! Bitboard-based legal move generation, pure-functional position
//! updates, and terminal-state classification for standard chess and
//! several variants: Chess960, Three-check, Antichess, Atomic,
//! Crazyhouse, Racing Kings and Horde.
//!
//! Positions are immutable snapshots: applying a move returns a new
//! [`Position`] and leaves the original untouched, so they can be
//! shared freely across threads. The attack tables behind move
//! generation are process-wide and initialized once on first use (or
//! eagerly via [`attacks::init`]).
//!
//! # Example
//! ```
//! use chess_rules::{Position, Variant};
//!
//! let pos = Position::new(Variant::Standard);
//! assert_eq!(pos.legal_moves().len(), 20);
//!
//! let next = pos.play_uci("e2e4").unwrap();
//! assert!(!next.is_terminal());
//! ```

pub mod attacks;
mod board;
mod error;
mod fen;
mod hash;
mod movegen;
mod perft;
pub mod prelude;
mod position;
mod types;
mod uci;
mod variant;

#[cfg(test)]
mod tests;

pub use board::Board;
pub use error::{FenError, PlayError, PositionError, SquareError};
pub use hash::PositionHashes;
pub use perft::{perft, perft_divide};
pub use position::{CheckCount, History, Outcome, Pockets, Position, Setup, Termination};
pub use types::{
    Bitboard, BitboardIter, CarryRippler, Castles, Color, Move, MoveList, MoveListIntoIter,
    Piece, Role, Side, Square,
};
pub use uci::CastlingMode;
pub use variant::Variant;
