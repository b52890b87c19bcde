//! Position state and pure-functional move application.
//!
//! A [`Position`] is a snapshot: board, side to move, history and the
//! variant in force. Applying a move never mutates the original; it
//! returns a fresh `Position`, so snapshots can be shared freely across
//! threads.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::attacks;
use crate::board::Board;
use crate::error::{PlayError, PositionError};
use crate::fen;
use crate::hash::{digest, PositionHashes, ZOBRIST};
use crate::movegen;
use crate::types::{Bitboard, Castles, Color, Move, MoveList, Role, Square, ROLES};
use crate::variant::Variant;

/// Checks given by each color, for Three-check. Monotonically
/// non-decreasing; every variant maintains it, Three-check reads it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CheckCount {
    pub white: u8,
    pub black: u8,
}

impl CheckCount {
    pub(crate) fn add(&mut self, by: Color) {
        match by {
            Color::White => self.white = self.white.saturating_add(1),
            Color::Black => self.black = self.black.saturating_add(1),
        }
    }

    #[must_use]
    pub fn by(self, color: Color) -> u8 {
        color.fold(self.white, self.black)
    }
}

/// Captured-piece reserves for Crazyhouse, indexed by color and role
/// (pawn through queen; kings are never pocketed).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Pockets {
    counts: [[u8; 5]; 2],
}

impl Pockets {
    /// Pieces of one role held by a color.
    #[must_use]
    pub fn count(&self, color: Color, role: Role) -> u8 {
        match role {
            Role::King => 0,
            _ => self.counts[color.index()][role.index()],
        }
    }

    pub(crate) fn add(&mut self, color: Color, role: Role) {
        if role != Role::King {
            self.counts[color.index()][role.index()] =
                self.counts[color.index()][role.index()].saturating_add(1);
        }
    }

    pub(crate) fn remove(&mut self, color: Color, role: Role) {
        if role != Role::King {
            self.counts[color.index()][role.index()] =
                self.counts[color.index()][role.index()].saturating_sub(1);
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.counts == [[0; 5]; 2]
    }
}

/// Everything a position carries beyond the placement itself: the move
/// that produced it, digests of all ancestors, castling rights with
/// their unmoved rooks, check counters, and the half-move clock.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct History {
    pub(crate) last_move: Option<Move>,
    pub(crate) hashes: PositionHashes,
    pub(crate) castles: Castles,
    pub(crate) check_count: CheckCount,
    pub(crate) halfmove_clock: u32,
}

impl History {
    pub(crate) fn new(castles: Castles) -> Self {
        History {
            last_move: None,
            hashes: PositionHashes::new(),
            castles,
            check_count: CheckCount::default(),
            halfmove_clock: 0,
        }
    }
}

/// Decoded external form of a position, as provided by a FEN layer.
/// [`Position::from_setup`] re-validates every invariant before
/// constructing anything.
#[derive(Clone, Debug)]
pub struct Setup {
    pub board: Board,
    pub turn: Color,
    /// Rook squares named by the castling field.
    pub castling_rooks: Bitboard,
    pub ep_square: Option<Square>,
    pub halfmove_clock: u32,
    pub fullmoves: u32,
    pub pockets: Pockets,
    pub promoted: Bitboard,
    pub check_count: CheckCount,
}

/// How the game ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Outcome {
    Decisive { winner: Color },
    Draw,
}

/// Why the game ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Termination {
    Checkmate,
    Stalemate,
    InsufficientMaterial,
    SeventyFiveMoves,
    FivefoldRepetition,
    /// A variant-specific end: third check, exploded king, king on the
    /// goal rank, eliminated horde, emptied antichess army.
    VariantEnd,
}

/// A complete game state for one variant.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Position {
    pub(crate) board: Board,
    pub(crate) turn: Color,
    pub(crate) history: History,
    pub(crate) variant: Variant,
    pub(crate) fullmoves: u32,
    pub(crate) pockets: Pockets,
    pub(crate) promoted: Bitboard,
}

impl Position {
    /// The starting position of a variant.
    #[must_use]
    pub fn new(variant: Variant) -> Self {
        let (board, castles) = variant.starting_material();
        let mut pos = Position {
            board,
            turn: Color::White,
            history: History::new(castles),
            variant,
            fullmoves: 1,
            pockets: Pockets::default(),
            promoted: Bitboard::EMPTY,
        };
        pos.history.hashes.push(digest(pos.zobrist_hash()));
        pos
    }

    /// Decode a position from FEN. The variant decides how auxiliary
    /// fields (pockets, check counters) are read.
    pub fn from_fen(fen_str: &str, variant: Variant) -> Result<Self, PositionError> {
        let setup = fen::parse_fen(fen_str, variant)?;
        Position::from_setup(setup, variant)
    }

    /// Build a position from decoded parts, re-validating every
    /// invariant. Never partially constructs: any violation returns an
    /// error and no `Position`.
    pub fn from_setup(setup: Setup, variant: Variant) -> Result<Self, PositionError> {
        validate_kings(&setup, variant)?;
        validate_pawn_ranks(&setup, variant)?;
        let castles = validate_castling(&setup, variant)?;
        let last_move = validate_ep(&setup)?;

        let mut history = History::new(castles);
        history.last_move = last_move;
        history.halfmove_clock = setup.halfmove_clock;
        history.check_count = setup.check_count;

        let mut pos = Position {
            board: setup.board,
            turn: setup.turn,
            history,
            variant,
            fullmoves: setup.fullmoves.max(1),
            pockets: setup.pockets,
            promoted: setup.promoted,
        };

        if pos.is_check_on(pos.turn.opponent()) {
            return Err(PositionError::OppositeCheck);
        }

        pos.history.hashes.push(digest(pos.zobrist_hash()));
        Ok(pos)
    }

    /// Render this position as FEN.
    #[must_use]
    pub fn fen(&self) -> String {
        fen::render_fen(self)
    }

    #[inline]
    #[must_use]
    pub const fn board(&self) -> &Board {
        &self.board
    }

    #[inline]
    #[must_use]
    pub const fn turn(&self) -> Color {
        self.turn
    }

    #[inline]
    #[must_use]
    pub const fn variant(&self) -> Variant {
        self.variant
    }

    #[inline]
    #[must_use]
    pub const fn castles(&self) -> Castles {
        self.history.castles
    }

    #[inline]
    #[must_use]
    pub const fn halfmove_clock(&self) -> u32 {
        self.history.halfmove_clock
    }

    #[inline]
    #[must_use]
    pub const fn fullmoves(&self) -> u32 {
        self.fullmoves
    }

    #[inline]
    #[must_use]
    pub const fn check_count(&self) -> CheckCount {
        self.history.check_count
    }

    #[inline]
    #[must_use]
    pub const fn pockets(&self) -> &Pockets {
        &self.pockets
    }

    /// Crazyhouse promoted-piece markers.
    #[inline]
    #[must_use]
    pub const fn promoted(&self) -> Bitboard {
        self.promoted
    }

    #[inline]
    #[must_use]
    pub const fn last_move(&self) -> Option<Move> {
        self.history.last_move
    }

    /// Digests of this position and all its ancestors.
    #[inline]
    #[must_use]
    pub const fn position_hashes(&self) -> &PositionHashes {
        &self.history.hashes
    }

    /// The en passant target square, reconstructed from the last move.
    #[must_use]
    pub fn ep_square(&self) -> Option<Square> {
        match self.history.last_move {
            Some(mv @ Move::Normal { from, to, .. }) if mv.is_double_push() => Some(
                Square::new(from.file(), (from.rank() + to.rank()) / 2),
            ),
            _ => None,
        }
    }

    /// Enemy pieces currently attacking the side to move's king.
    #[must_use]
    pub fn checkers(&self) -> Bitboard {
        self.board.checkers_of(self.turn)
    }

    /// Returns true if the side to move is in check, under the
    /// variant's check rules (Antichess has none; Atomic suspends check
    /// while the kings touch).
    #[must_use]
    pub fn in_check(&self) -> bool {
        self.is_check_on(self.turn)
    }

    pub(crate) fn is_check_on(&self, color: Color) -> bool {
        match self.variant {
            Variant::Antichess => false,
            Variant::Atomic => match (
                self.board.king_of(color),
                self.board.king_of(color.opponent()),
            ) {
                (Some(king), Some(other)) => {
                    !attacks::king_attacks(king).contains(other)
                        && self
                            .board
                            .attackers_to(king, color.opponent(), self.board.occupied())
                            .any()
                }
                _ => false,
            },
            _ => self.board.checkers_of(color).any(),
        }
    }

    /// Every legal move for the side to move. Empty at terminal
    /// positions; that is not an error.
    #[must_use]
    pub fn legal_moves(&self) -> MoveList {
        movegen::legal_moves(self)
    }

    /// Returns true if the move is in the current legal set.
    #[must_use]
    pub fn is_legal(&self, mv: &Move) -> bool {
        self.legal_moves().contains(mv)
    }

    /// Apply a move, producing the next position. Rejects moves outside
    /// the legal set; the original position is untouched either way.
    pub fn play(&self, mv: &Move) -> Result<Self, PlayError> {
        if self.is_legal(mv) {
            Ok(self.apply_unchecked(mv))
        } else {
            #[cfg(feature = "logging")]
            log::debug!("rejected illegal move {mv}");
            Err(PlayError::IllegalMove {
                mv: *mv,
                position: Box::new(self.clone()),
            })
        }
    }

    /// Parse a move in coordinate notation ("e2e4", "e7e8q", "N@f3",
    /// king-takes-rook or two-file castling) and play it.
    pub fn play_uci(&self, notation: &str) -> Result<Self, PlayError> {
        let mv = crate::uci::parse_move(self, notation)?;
        self.play(&mv)
    }

    /// Apply a move that is known to be legal (comes from
    /// [`Position::legal_moves`]).
    #[must_use]
    pub(crate) fn apply_unchecked(&self, mv: &Move) -> Self {
        let mut next = self.clone();
        let us = self.turn;
        let them = us.opponent();

        match *mv {
            Move::Normal {
                role,
                from,
                capture,
                to,
                promotion,
            } => {
                if role == Role::King {
                    next.history.castles.discard_color(us);
                }
                next.history
                    .castles
                    .discard_rook(from, us, self.board.king_of(us));
                next.history
                    .castles
                    .discard_rook(to, them, self.board.king_of(them));

                next.board.discard_piece_at(to);
                next.board.discard_piece_at(from);
                next.board
                    .set_piece_at(to, us.of(promotion.unwrap_or(role)));

                if self.variant == Variant::Crazyhouse {
                    if capture.is_some() {
                        let role_won = if self.promoted.contains(to) {
                            Role::Pawn
                        } else {
                            capture.unwrap_or(Role::Pawn)
                        };
                        next.pockets.add(us, role_won);
                    }
                    next.promoted.discard(to);
                    if self.promoted.contains(from) {
                        next.promoted.discard(from);
                        next.promoted.add(to);
                    }
                    if promotion.is_some() {
                        next.promoted.add(to);
                    }
                }

                if self.variant == Variant::Atomic && capture.is_some() {
                    next.explode(to);
                }
            }
            Move::EnPassant { from, to } => {
                let captured = Square::new(to.file(), from.rank());
                next.board.discard_piece_at(captured);
                next.board.discard_piece_at(from);
                next.board.set_piece_at(to, us.of(Role::Pawn));

                if self.variant == Variant::Crazyhouse {
                    next.pockets.add(us, Role::Pawn);
                }
                if self.variant == Variant::Atomic {
                    next.explode(to);
                }
            }
            Move::Castle { king, rook, side } => {
                let back = us.back_rank();
                next.board.discard_piece_at(king);
                next.board.discard_piece_at(rook);
                next.board
                    .set_piece_at(Square::new(side.king_to_file(), back), us.of(Role::King));
                next.board
                    .set_piece_at(Square::new(side.rook_to_file(), back), us.of(Role::Rook));
                next.history.castles.discard_color(us);
            }
            Move::Drop { role, to } => {
                next.board.set_piece_at(to, us.of(role));
                next.pockets.remove(us, role);
            }
        }

        next.history.halfmove_clock = if mv.is_zeroing() {
            0
        } else {
            self.history.halfmove_clock + 1
        };
        if us == Color::Black {
            next.fullmoves += 1;
        }
        next.history.last_move = Some(*mv);
        next.turn = them;

        if next.is_check_on(them) {
            next.history.check_count.add(us);
        }

        next.history.hashes.push(digest(next.zobrist_hash()));
        next
    }

    /// Atomic capture effect: the capturer and every non-pawn on the
    /// king-ring of the capture square are removed along with the
    /// captured piece.
    fn explode(&mut self, center: Square) {
        let ring =
            attacks::king_attacks(center) & self.board.occupied() & !self.board.by_role(Role::Pawn);

        for sq in ring.with(center) {
            if let Some(piece) = self.board.piece_at(sq) {
                match piece.role {
                    Role::King => self.history.castles.discard_color(piece.color),
                    Role::Rook => self.history.castles.discard_rook(
                        sq,
                        piece.color,
                        self.board.king_of(piece.color),
                    ),
                    _ => {}
                }
                self.board.discard_piece_at(sq);
            }
        }
    }

    /// Returns true if applying the move would leave the opponent in
    /// check.
    #[must_use]
    pub fn gives_check(&self, mv: &Move) -> bool {
        self.apply_unchecked(mv).in_check()
    }

    /// Full 64-bit hash of placement, side to move, castling rights,
    /// relevant en passant, check counters and pockets. The stored
    /// digest keeps the low three bytes.
    #[must_use]
    pub fn zobrist_hash(&self) -> u64 {
        let keys = &*ZOBRIST;
        let mut hash = 0u64;

        for color in [Color::White, Color::Black] {
            for role in ROLES {
                for sq in self.board.by_piece(color.of(role)) {
                    hash ^= keys.piece_keys[role.index()][color.index()][sq.index()];
                }
            }
        }

        if self.turn == Color::Black {
            hash ^= keys.black_to_move_key;
        }

        let mask = self.history.castles.mask();
        for bit in 0..4 {
            if mask & (1 << bit) != 0 {
                hash ^= keys.castling_keys[bit];
            }
        }

        // An en passant square only distinguishes positions when the
        // capture is actually playable; an irrelevant marker must not
        // change the hash.
        if let Some(ep) = self.legal_ep_square() {
            hash ^= keys.en_passant_keys[ep.file() as usize];
        }

        for color in [Color::White, Color::Black] {
            let given = self.history.check_count.by(color).min(3);
            for i in 0..given {
                hash ^= keys.check_keys[color.index()][i as usize];
            }
            for role in [Role::Pawn, Role::Knight, Role::Bishop, Role::Rook, Role::Queen] {
                let held = self.pockets.count(color, role).min(16);
                for i in 0..held {
                    hash ^= keys.pocket_keys[color.index()][role.index()][i as usize];
                }
            }
        }

        for sq in self.promoted {
            hash ^= keys.promoted_keys[sq.index()];
        }

        hash
    }

    /// The en passant square, but only when a legal en passant capture
    /// is available from this position.
    #[must_use]
    pub fn legal_ep_square(&self) -> Option<Square> {
        let ep = self.ep_square()?;
        let candidates = self.board.by_piece(self.turn.of(Role::Pawn))
            & attacks::pawn_attacks(self.turn.opponent(), ep);
        if candidates.is_empty() {
            return None;
        }
        match self.variant {
            // every capture is playable when there is no check to respect
            Variant::Antichess => Some(ep),
            Variant::Atomic => {
                let playable = candidates.iter().any(|from| {
                    movegen::atomic_legal(self, &Move::EnPassant { from, to: ep })
                });
                playable.then_some(ep)
            }
            _ => {
                for from in candidates {
                    let captured = Square::new(ep.file(), from.rank());
                    if movegen::ep_safe(self, from, ep, captured) {
                        return Some(ep);
                    }
                }
                None
            }
        }
    }

    /// Threefold repetition of the current position (claimable draw).
    #[must_use]
    pub fn threefold_repetition(&self) -> bool {
        self.history.hashes.k_fold(3)
    }

    /// Fivefold repetition (automatic draw).
    #[must_use]
    pub fn fivefold_repetition(&self) -> bool {
        self.history.hashes.k_fold(5)
    }

    /// Fifty full moves without a pawn move or capture (claimable
    /// draw).
    #[must_use]
    pub fn fifty_move_rule(&self) -> bool {
        self.history.halfmove_clock >= 100
    }

    /// Seventy-five full moves without a pawn move or capture
    /// (automatic draw).
    #[must_use]
    pub fn seventy_five_move_rule(&self) -> bool {
        self.history.halfmove_clock >= 150
    }

    /// Variant-aware dead-position rule.
    #[must_use]
    pub fn insufficient_material(&self) -> bool {
        self.variant.insufficient_material(&self.board)
    }

    /// Checkmate under the variant's check rules.
    #[must_use]
    pub fn is_checkmate(&self) -> bool {
        self.in_check() && self.legal_moves().is_empty()
    }

    /// No legal moves while not in check.
    #[must_use]
    pub fn is_stalemate(&self) -> bool {
        !self.in_check() && self.legal_moves().is_empty()
    }

    /// Why this position is terminal, or `None` while the game goes
    /// on.
    #[must_use]
    pub fn termination(&self) -> Option<Termination> {
        self.variant.end(self).map(|(termination, _)| termination)
    }

    /// The result at this position, or `None` while the game goes on.
    #[must_use]
    pub fn outcome(&self) -> Option<Outcome> {
        self.variant.end(self).map(|(_, winner)| match winner {
            Some(color) => Outcome::Decisive { winner: color },
            None => Outcome::Draw,
        })
    }

    /// Returns true if the game is over.
    #[must_use]
    pub fn is_terminal(&self) -> bool {
        self.variant.end(self).is_some()
    }
}

impl Default for Position {
    fn default() -> Self {
        Position::new(Variant::Standard)
    }
}

fn validate_kings(setup: &Setup, variant: Variant) -> Result<(), PositionError> {
    let white_kings = setup.board.by_piece(Color::White.of(Role::King)).count();
    let black_kings = setup.board.by_piece(Color::Black.of(Role::King)).count();

    match variant {
        Variant::Antichess => Ok(()),
        Variant::Atomic => {
            if white_kings > 1 || black_kings > 1 {
                Err(PositionError::TooManyKings)
            } else {
                Ok(())
            }
        }
        Variant::Horde => {
            if white_kings != 0 {
                Err(PositionError::TooManyKings)
            } else if black_kings != 1 {
                Err(PositionError::MissingKing { white: false })
            } else {
                Ok(())
            }
        }
        _ => {
            if white_kings > 1 || black_kings > 1 {
                Err(PositionError::TooManyKings)
            } else if white_kings == 0 {
                Err(PositionError::MissingKing { white: true })
            } else if black_kings == 0 {
                Err(PositionError::MissingKing { white: false })
            } else {
                Ok(())
            }
        }
    }
}

fn validate_pawn_ranks(setup: &Setup, variant: Variant) -> Result<(), PositionError> {
    let white_pawns = setup.board.by_piece(Color::White.of(Role::Pawn));
    let black_pawns = setup.board.by_piece(Color::Black.of(Role::Pawn));

    let white_forbidden = if variant == Variant::Horde {
        // horde pawns legally stand on their own first rank
        Bitboard::RANK_8
    } else {
        Bitboard::BACK_RANKS
    };

    if (white_pawns & white_forbidden).any() || (black_pawns & Bitboard::BACK_RANKS).any() {
        Err(PositionError::PawnsOnBackRank)
    } else {
        Ok(())
    }
}

fn validate_castling(setup: &Setup, variant: Variant) -> Result<Castles, PositionError> {
    if !variant.allows_castling() {
        return Ok(Castles::none());
    }

    let kings = [
        setup.board.king_of(Color::White),
        setup.board.king_of(Color::Black),
    ];

    for sq in setup.castling_rooks {
        let color = if sq.rank() == 0 {
            Color::White
        } else {
            Color::Black
        };
        if setup.board.piece_at(sq) != Some(color.of(Role::Rook)) {
            return Err(PositionError::BadCastlingRights {
                square: sq.to_string(),
            });
        }
    }

    Ok(Castles::from_rooks(setup.castling_rooks, kings))
}

/// Check the en passant target against the side to move and the pawn
/// structure, then reconstruct the double push that produced it.
fn validate_ep(setup: &Setup) -> Result<Option<Move>, PositionError> {
    let Some(ep) = setup.ep_square else {
        return Ok(None);
    };

    let bad = || PositionError::BadEnPassant {
        square: ep.to_string(),
    };

    let (expected_rank, mover) = match setup.turn {
        Color::White => (5, Color::Black),
        Color::Black => (2, Color::White),
    };
    if ep.rank() != expected_rank {
        return Err(bad());
    }

    let from = Square::new(ep.file(), setup.turn.fold(6, 1));
    let to = Square::new(ep.file(), setup.turn.fold(4, 3));

    if setup.board.piece_at(to) != Some(mover.of(Role::Pawn)) {
        return Err(bad());
    }
    if setup.board.occupied().contains(ep) || setup.board.occupied().contains(from) {
        return Err(bad());
    }

    Ok(Some(Move::Normal {
        role: Role::Pawn,
        from,
        capture: None,
        to,
        promotion: None,
    }))
}
