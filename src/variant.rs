//! The variant rules layer.
//!
//! A [`Variant`] is a small value; rule overrides dispatch on it at a
//! handful of fixed points: starting material, legal-move filtering
//! (wired in `movegen`), capture effects (wired in move application),
//! promotion choices, terminal detection and the dead-position rule.

use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::board::Board;
use crate::position::{Position, Termination};
use crate::types::{Bitboard, Castles, Color, Role, Square};

/// The rule set in force for a game.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Variant {
    Standard,
    /// Standard rules from a randomized back rank; castling targets
    /// stay fixed regardless of where king and rooks started.
    Chess960,
    /// Giving check three times wins.
    ThreeCheck,
    /// Captures are compulsory, there is no royal king, and running
    /// out of pieces or moves wins.
    Antichess,
    /// Captures explode the surrounding non-pawns; removing the enemy
    /// king wins.
    Atomic,
    /// Captured pieces switch sides and can be dropped back.
    Crazyhouse,
    /// First king to the eighth rank wins; checks are forbidden.
    RacingKings,
    /// White is a kingless pawn horde; Black wins by eliminating it.
    Horde,
}

const STANDARD_PROMOTIONS: [Role; 4] = [Role::Queen, Role::Rook, Role::Bishop, Role::Knight];
const ANTICHESS_PROMOTIONS: [Role; 5] = [
    Role::Queen,
    Role::Rook,
    Role::Bishop,
    Role::Knight,
    Role::King,
];

impl Variant {
    pub const ALL: [Variant; 8] = [
        Variant::Standard,
        Variant::Chess960,
        Variant::ThreeCheck,
        Variant::Antichess,
        Variant::Atomic,
        Variant::Crazyhouse,
        Variant::RacingKings,
        Variant::Horde,
    ];

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Variant::Standard => "standard",
            Variant::Chess960 => "chess960",
            Variant::ThreeCheck => "threecheck",
            Variant::Antichess => "antichess",
            Variant::Atomic => "atomic",
            Variant::Crazyhouse => "crazyhouse",
            Variant::RacingKings => "racingkings",
            Variant::Horde => "horde",
        }
    }

    /// Look a variant up by name, tolerating hyphens and case.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        let normalized: String = name
            .chars()
            .filter(|c| *c != '-' && *c != '_')
            .map(|c| c.to_ascii_lowercase())
            .collect();
        Variant::ALL
            .into_iter()
            .find(|variant| variant.name() == normalized)
    }

    /// Castling exists in every variant except Antichess and Racing
    /// Kings.
    #[must_use]
    pub(crate) const fn allows_castling(self) -> bool {
        !matches!(self, Variant::Antichess | Variant::RacingKings)
    }

    /// The roles a pawn may promote to.
    #[must_use]
    pub fn promotion_roles(self) -> &'static [Role] {
        match self {
            Variant::Antichess => &ANTICHESS_PROMOTIONS,
            _ => &STANDARD_PROMOTIONS,
        }
    }

    /// May a pawn of `color` on `rank` advance two squares? Horde
    /// pawns start on their own first rank and keep the double step
    /// there.
    #[must_use]
    pub(crate) fn double_push_from(self, color: Color, rank: u8) -> bool {
        match (self, color) {
            (Variant::Horde, Color::White) => rank <= 1,
            _ => rank == color.fold(1, 6),
        }
    }

    /// Starting placement and castling rights.
    #[must_use]
    pub(crate) fn starting_material(self) -> (Board, Castles) {
        match self {
            Variant::RacingKings => (racing_kings_board(), Castles::none()),
            Variant::Horde => {
                let rooks = Bitboard::from_square(Square::A8).with(Square::H8);
                (
                    horde_board(),
                    Castles::from_rooks(rooks, [None, Some(Square::E8)]),
                )
            }
            Variant::Antichess => (Board::standard(), Castles::none()),
            _ => (Board::standard(), Castles::standard()),
        }
    }

    /// Neither side can force a win from this material.
    #[must_use]
    pub(crate) fn insufficient_material(self, board: &Board) -> bool {
        match self {
            // pocketed material can always come back
            Variant::Crazyhouse => false,
            Variant::RacingKings | Variant::Horde => false,
            // a lone minor still delivers checks
            Variant::ThreeCheck => board.occupied() == board.by_role(Role::King),
            Variant::Antichess => antichess_insufficient(board),
            _ => standard_insufficient(board),
        }
    }

    /// Terminal detection: the termination kind and the winner (`None`
    /// for a draw), or `None` while the game goes on.
    #[must_use]
    pub(crate) fn end(self, pos: &Position) -> Option<(Termination, Option<Color>)> {
        if let Some(end) = self.variant_end(pos) {
            return Some(end);
        }

        if pos.legal_moves().is_empty() {
            return Some(if pos.in_check() {
                (Termination::Checkmate, Some(pos.turn().opponent()))
            } else {
                (Termination::Stalemate, None)
            });
        }
        if self.insufficient_material(pos.board()) {
            return Some((Termination::InsufficientMaterial, None));
        }
        if pos.seventy_five_move_rule() {
            return Some((Termination::SeventyFiveMoves, None));
        }
        if pos.fivefold_repetition() {
            return Some((Termination::FivefoldRepetition, None));
        }
        None
    }

    fn variant_end(self, pos: &Position) -> Option<(Termination, Option<Color>)> {
        match self {
            Variant::ThreeCheck => {
                let count = pos.check_count();
                if count.white >= 3 {
                    Some((Termination::VariantEnd, Some(Color::White)))
                } else if count.black >= 3 {
                    Some((Termination::VariantEnd, Some(Color::Black)))
                } else {
                    None
                }
            }
            Variant::Atomic => {
                if pos.board().king_of(Color::White).is_none() {
                    Some((Termination::VariantEnd, Some(Color::Black)))
                } else if pos.board().king_of(Color::Black).is_none() {
                    Some((Termination::VariantEnd, Some(Color::White)))
                } else {
                    None
                }
            }
            Variant::RacingKings => {
                // Evaluated only with White to move: if White finished
                // first, Black has had the equalizing reply; if both
                // kings stand on the goal rank the race is drawn.
                if pos.turn() != Color::White {
                    return None;
                }
                let reached = |color| {
                    pos.board()
                        .king_of(color)
                        .is_some_and(|king| king.rank() == 7)
                };
                match (reached(Color::White), reached(Color::Black)) {
                    (true, true) => Some((Termination::VariantEnd, None)),
                    (true, false) => Some((Termination::VariantEnd, Some(Color::White))),
                    (false, true) => Some((Termination::VariantEnd, Some(Color::Black))),
                    (false, false) => None,
                }
            }
            Variant::Horde => {
                if pos.board().by_color(Color::White).is_empty() {
                    Some((Termination::VariantEnd, Some(Color::Black)))
                } else {
                    None
                }
            }
            Variant::Antichess => {
                // losing all pieces or all moves wins
                let us = pos.turn();
                if pos.board().by_color(us).is_empty() || pos.legal_moves().is_empty() {
                    Some((Termination::VariantEnd, Some(us)))
                } else {
                    None
                }
            }
            _ => None,
        }
    }
}

impl Default for Variant {
    fn default() -> Self {
        Variant::Standard
    }
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

fn standard_insufficient(board: &Board) -> bool {
    let heavy = board.by_role(Role::Pawn) | board.by_role(Role::Rook) | board.by_role(Role::Queen);
    if heavy.any() {
        return false;
    }

    let knights = board.by_role(Role::Knight);
    let bishops = board.by_role(Role::Bishop);
    let minors = knights.count() + bishops.count();

    if minors <= 1 {
        return true;
    }
    if knights.is_empty() && bishops.count() == 2 {
        // K+B vs K+B with both bishops on one square color
        return (bishops & Bitboard::LIGHT_SQUARES).is_empty()
            || (bishops & Bitboard::DARK_SQUARES).is_empty();
    }
    false
}

/// The antichess fortress: one bishop each on opposite square colors
/// and nothing else can never force a win on either side.
fn antichess_insufficient(board: &Board) -> bool {
    let white_bishops = board.by_piece(Color::White.of(Role::Bishop));
    let black_bishops = board.by_piece(Color::Black.of(Role::Bishop));
    if board.by_color(Color::White) != white_bishops
        || board.by_color(Color::Black) != black_bishops
    {
        return false;
    }
    if white_bishops.count() != 1 || black_bishops.count() != 1 {
        return false;
    }
    let white_on_light = white_bishops.intersects(Bitboard::LIGHT_SQUARES);
    let black_on_light = black_bishops.intersects(Bitboard::LIGHT_SQUARES);
    white_on_light != black_on_light
}

fn racing_kings_board() -> Board {
    let mut board = Board::empty();
    let rank2 = [
        Color::Black.of(Role::King),
        Color::Black.of(Role::Rook),
        Color::Black.of(Role::Bishop),
        Color::Black.of(Role::Knight),
        Color::White.of(Role::Knight),
        Color::White.of(Role::Bishop),
        Color::White.of(Role::Rook),
        Color::White.of(Role::King),
    ];
    let rank1 = [
        Color::Black.of(Role::Queen),
        Color::Black.of(Role::Rook),
        Color::Black.of(Role::Bishop),
        Color::Black.of(Role::Knight),
        Color::White.of(Role::Knight),
        Color::White.of(Role::Bishop),
        Color::White.of(Role::Rook),
        Color::White.of(Role::Queen),
    ];
    for (file, piece) in rank1.into_iter().enumerate() {
        board.set_piece_at(Square::new(file as u8, 0), piece);
    }
    for (file, piece) in rank2.into_iter().enumerate() {
        board.set_piece_at(Square::new(file as u8, 1), piece);
    }
    board
}

fn horde_board() -> Board {
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
        board.set_piece_at(Square::new(file, 7), Color::Black.of(role));
        board.set_piece_at(Square::new(file, 6), Color::Black.of(Role::Pawn));
        for rank in 0..4 {
            board.set_piece_at(Square::new(file, rank), Color::White.of(Role::Pawn));
        }
    }
    for file in [1, 2, 5, 6] {
        board.set_piece_at(Square::new(file, 4), Color::White.of(Role::Pawn));
    }
    board
}
