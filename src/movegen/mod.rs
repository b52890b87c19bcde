//! Legal move generation.
//!
//! The standard path generates pseudo-legal moves per piece family and
//! filters with the checker/pin machinery: with no checkers, pinned
//! pieces stay on their pin ray and the king avoids attacked squares;
//! with one checker, non-king moves must capture it or block its ray
//! and pinned pieces stand still; with two, only the king moves.
//! Antichess and Atomic replace the filter wholesale, Racing Kings and
//! Crazyhouse refine its output.

mod drops;
mod kings;
mod knights;
mod pawns;
mod sliders;

pub(crate) use pawns::ep_safe;

use crate::attacks;
use crate::position::Position;
use crate::types::{Bitboard, Move, MoveList, Role, Square};
use crate::variant::Variant;

/// Shared generation context for the non-king piece families.
pub(super) struct GenCtx {
    /// Allowed destination squares for non-king moves.
    pub target_mask: Bitboard,
    /// Friendly pieces pinned to the king.
    pub pinned: Bitboard,
    /// Our king, for pin-ray restriction. `None` for kingless armies.
    pub king: Option<Square>,
    /// Single-check evasion mode: pinned pieces may not move at all.
    pub in_check: bool,
    /// Validate en passant with the removal simulation. Disabled for
    /// paths that do their own whole-move filtering.
    pub check_ep: bool,
}

impl GenCtx {
    fn unrestricted(check_ep: bool) -> Self {
        GenCtx {
            target_mask: Bitboard::ALL,
            pinned: Bitboard::EMPTY,
            king: None,
            in_check: false,
            check_ep,
        }
    }
}

pub(crate) fn legal_moves(pos: &Position) -> MoveList {
    let mut moves = MoveList::new();
    match pos.variant() {
        Variant::Antichess => antichess_moves(pos, &mut moves),
        Variant::Atomic => atomic_moves(pos, &mut moves),
        _ => {
            standard_moves(pos, &mut moves);
            match pos.variant() {
                Variant::RacingKings => moves.retain(|mv| !pos.gives_check(mv)),
                Variant::Crazyhouse => drops::gen_drops(pos, &mut moves),
                _ => {}
            }
        }
    }
    moves
}

fn standard_moves(pos: &Position, moves: &mut MoveList) {
    let us = pos.turn();
    let board = pos.board();

    let Some(king) = board.king_of(us) else {
        // a kingless army (Horde's attackers) has no check to respect
        let ctx = GenCtx::unrestricted(true);
        pawns::gen_pawn_moves(pos, moves, &ctx);
        knights::gen_knight_moves(pos, moves, &ctx);
        sliders::gen_slider_moves(pos, moves, &ctx);
        return;
    };

    let checkers = board.attackers_to(king, us.opponent(), board.occupied());

    if checkers.is_empty() {
        let ctx = GenCtx {
            target_mask: Bitboard::ALL,
            pinned: board.slider_blockers(king, us),
            king: Some(king),
            in_check: false,
            check_ep: true,
        };
        pawns::gen_pawn_moves(pos, moves, &ctx);
        knights::gen_knight_moves(pos, moves, &ctx);
        sliders::gen_slider_moves(pos, moves, &ctx);
        kings::gen_king_moves(pos, moves, king);
        kings::gen_castling(pos, moves, king);
    } else if let Some(checker) = checkers.single_square() {
        let ctx = GenCtx {
            target_mask: attacks::between(king, checker).with(checker),
            pinned: board.slider_blockers(king, us),
            king: Some(king),
            in_check: true,
            check_ep: true,
        };
        pawns::gen_pawn_moves(pos, moves, &ctx);
        knights::gen_knight_moves(pos, moves, &ctx);
        sliders::gen_slider_moves(pos, moves, &ctx);
        kings::gen_king_moves(pos, moves, king);
    } else {
        kings::gen_king_moves(pos, moves, king);
    }
}

/// Antichess: no royal king, so every pseudo-legal move stands, but
/// when any capture is available only captures are playable.
fn antichess_moves(pos: &Position, moves: &mut MoveList) {
    let ctx = GenCtx::unrestricted(false);
    pawns::gen_pawn_moves(pos, moves, &ctx);
    knights::gen_knight_moves(pos, moves, &ctx);
    sliders::gen_slider_moves(pos, moves, &ctx);
    for from in pos.board().by_piece(pos.turn().of(Role::King)) {
        kings::gen_king_pseudo(pos, moves, from, true);
    }

    if moves.iter().any(Move::is_capture) {
        moves.retain(Move::is_capture);
    }
}

/// Atomic: kings never capture, and a move is legal when our king
/// survives the explosion and either the enemy king is gone or we are
/// not left in (atomic) check. The explosion makes incremental
/// filtering unreliable, so each candidate is applied and inspected.
fn atomic_moves(pos: &Position, moves: &mut MoveList) {
    let mut pseudo = MoveList::new();
    let ctx = GenCtx::unrestricted(false);
    pawns::gen_pawn_moves(pos, &mut pseudo, &ctx);
    knights::gen_knight_moves(pos, &mut pseudo, &ctx);
    sliders::gen_slider_moves(pos, &mut pseudo, &ctx);
    if let Some(king) = pos.board().king_of(pos.turn()) {
        kings::gen_king_pseudo(pos, &mut pseudo, king, false);
        if !pos.in_check() {
            kings::gen_castling(pos, &mut pseudo, king);
        }
    }

    for mv in &pseudo {
        if atomic_legal(pos, mv) {
            moves.push(*mv);
        }
    }
}

pub(crate) fn atomic_legal(pos: &Position, mv: &Move) -> bool {
    let us = pos.turn();
    let next = pos.apply_unchecked(mv);
    if next.board().king_of(us).is_none() {
        return false;
    }
    if next.board().king_of(us.opponent()).is_none() {
        return true;
    }
    !next.is_check_on(us)
}
