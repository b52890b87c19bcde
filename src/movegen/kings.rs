//! King move and castling generation.

use crate::attacks;
use crate::position::Position;
use crate::types::{Move, MoveList, Role, Side, Square};

/// King moves with the attacked-square filter. Attacks are recomputed
/// with the king lifted off the board so sliders x-raying through it
/// are not mistaken for blocked.
pub(super) fn gen_king_moves(pos: &Position, moves: &mut MoveList, from: Square) {
    let us = pos.turn();
    let them = us.opponent();
    let board = pos.board();
    let occ_no_king = board.occupied().without(from);

    for to in attacks::king_attacks(from) & !board.by_color(us) {
        if board.attackers_to(to, them, occ_no_king).is_empty() {
            moves.push(Move::Normal {
                role: Role::King,
                from,
                capture: board.role_at(to),
                to,
                promotion: None,
            });
        }
    }
}

/// Unfiltered king moves, for variants with their own whole-move
/// legality pass. `captures` is false in Atomic, where a king capture
/// would blow up its own side.
pub(super) fn gen_king_pseudo(pos: &Position, moves: &mut MoveList, from: Square, captures: bool) {
    let us = pos.turn();
    let board = pos.board();
    let mut targets = attacks::king_attacks(from) & !board.by_color(us);
    if !captures {
        targets &= !board.occupied();
    }

    for to in targets {
        moves.push(Move::Normal {
            role: Role::King,
            from,
            capture: board.role_at(to),
            to,
            promotion: None,
        });
    }
}

/// Chess960-compatible castling. The target squares are fixed by side;
/// the king's walk must be unattacked, the squares vacated and entered
/// by king and rook must hold no other piece, and the king must be
/// safe on arrival even once the rook has left its shielding square.
/// Callers only invoke this when not in check.
pub(super) fn gen_castling(pos: &Position, moves: &mut MoveList, king: Square) {
    if !pos.variant().allows_castling() {
        return;
    }
    let us = pos.turn();
    let them = us.opponent();
    let board = pos.board();
    let back = us.back_rank();
    if king.rank() != back {
        return;
    }

    let castles = pos.castles();
    for side in Side::ALL {
        let Some(rook) = castles.rook_for(us, side, king) else {
            continue;
        };
        if !board.by_piece(us.of(Role::Rook)).contains(rook) {
            continue;
        }

        let king_to = Square::new(side.king_to_file(), back);
        let rook_to = Square::new(side.rook_to_file(), back);

        let occ_cleared = board.occupied().without(king).without(rook);
        let path = attacks::between(king, king_to).with(king_to)
            | attacks::between(rook, rook_to).with(rook_to);
        if (path & occ_cleared).any() {
            continue;
        }

        let occ_no_king = board.occupied().without(king);
        let king_path = attacks::between(king, king_to).with(king_to);
        if king_path
            .iter()
            .any(|sq| board.attackers_to(sq, them, occ_no_king).any())
        {
            continue;
        }

        let occ_after = occ_cleared.with(king_to).with(rook_to);
        if board.attackers_to(king_to, them, occ_after).any() {
            continue;
        }

        moves.push(Move::Castle { king, rook, side });
    }
}
