//! Error types. All failures are returned as values; the engine never
//! panics on malformed input and never uses errors for control flow.

use std::fmt;

use crate::position::Position;
use crate::types::Move;

/// Error type for square parsing failures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SquareError {
    /// Invalid algebraic notation
    InvalidNotation { notation: String },
}

impl fmt::Display for SquareError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SquareError::InvalidNotation { notation } => {
                write!(f, "Invalid square notation '{notation}'")
            }
        }
    }
}

impl std::error::Error for SquareError {}

/// Error type for FEN parsing failures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FenError {
    /// FEN string has too few parts (needs at least 4)
    TooFewParts { found: usize },
    /// Invalid piece character in position string
    InvalidPiece { char: char },
    /// Invalid castling character
    InvalidCastling { char: char },
    /// Invalid side to move (must be 'w' or 'b')
    InvalidSideToMove { found: String },
    /// Invalid en passant square
    InvalidEnPassant { found: String },
    /// Placement string does not describe exactly 8 ranks
    BadRankCount { found: usize },
    /// Too many files in a rank
    TooManyFiles { rank: usize },
    /// Invalid pocket section (Crazyhouse)
    InvalidPocket { found: String },
    /// Invalid check-count section (Three-check)
    InvalidCheckCount { found: String },
    /// Invalid clock field
    InvalidClock { found: String },
}

impl fmt::Display for FenError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FenError::TooFewParts { found } => {
                write!(f, "FEN must have at least 4 parts, found {found}")
            }
            FenError::InvalidPiece { char } => {
                write!(f, "Invalid piece character '{char}' in FEN")
            }
            FenError::InvalidCastling { char } => {
                write!(f, "Invalid castling character '{char}' in FEN")
            }
            FenError::InvalidSideToMove { found } => {
                write!(f, "Invalid side to move '{found}', expected 'w' or 'b'")
            }
            FenError::InvalidEnPassant { found } => {
                write!(f, "Invalid en passant square '{found}'")
            }
            FenError::BadRankCount { found } => {
                write!(f, "FEN placement must have 8 ranks, found {found}")
            }
            FenError::TooManyFiles { rank } => {
                write!(f, "Too many files in rank {rank}")
            }
            FenError::InvalidPocket { found } => {
                write!(f, "Invalid pocket section '{found}'")
            }
            FenError::InvalidCheckCount { found } => {
                write!(f, "Invalid check count section '{found}'")
            }
            FenError::InvalidClock { found } => {
                write!(f, "Invalid clock field '{found}'")
            }
        }
    }
}

impl std::error::Error for FenError {}

/// Error type for setups that decode structurally but violate a
/// position invariant. Construction never partially succeeds: a
/// rejected setup produces no `Position`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PositionError {
    /// The FEN text itself was malformed
    Fen(FenError),
    /// A color is missing its king (variant-dependent)
    MissingKing { white: bool },
    /// A color has more kings than the variant allows
    TooManyKings,
    /// Pawns sit on a rank they can never legally occupy
    PawnsOnBackRank,
    /// A castling right names a square without a friendly rook
    BadCastlingRights { square: String },
    /// The en passant target is inconsistent with the side to move or
    /// the pawn structure
    BadEnPassant { square: String },
    /// The side not to move is already in check
    OppositeCheck,
}

impl fmt::Display for PositionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PositionError::Fen(err) => write!(f, "{err}"),
            PositionError::MissingKing { white } => {
                let color = if *white { "White" } else { "Black" };
                write!(f, "{color} has no king")
            }
            PositionError::TooManyKings => write!(f, "Too many kings"),
            PositionError::PawnsOnBackRank => {
                write!(f, "Pawns on an impossible rank")
            }
            PositionError::BadCastlingRights { square } => {
                write!(f, "Castling right without a rook on {square}")
            }
            PositionError::BadEnPassant { square } => {
                write!(f, "Impossible en passant target {square}")
            }
            PositionError::OppositeCheck => {
                write!(f, "Side not to move is in check")
            }
        }
    }
}

impl std::error::Error for PositionError {}

impl From<FenError> for PositionError {
    fn from(err: FenError) -> Self {
        PositionError::Fen(err)
    }
}

/// Error type for rejected moves.
#[derive(Debug, Clone)]
pub enum PlayError {
    /// The move is not in the legal set for the position. Carries both
    /// so the caller can recover and pick another move.
    IllegalMove {
        mv: Move,
        position: Box<Position>,
    },
    /// Move notation did not parse
    InvalidNotation { notation: String },
}

impl fmt::Display for PlayError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlayError::IllegalMove { mv, position } => {
                write!(f, "Illegal move {mv} in {}", position.fen())
            }
            PlayError::InvalidNotation { notation } => {
                write!(f, "Invalid move notation '{notation}'")
            }
        }
    }
}

impl std::error::Error for PlayError {}
