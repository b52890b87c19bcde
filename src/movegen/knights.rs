//! Knight move generation.

use super::GenCtx;
use crate::attacks;
use crate::position::Position;
use crate::types::{Move, MoveList, Role};

pub(super) fn gen_knight_moves(pos: &Position, moves: &mut MoveList, ctx: &GenCtx) {
    let us = pos.turn();
    let board = pos.board();

    for from in board.by_piece(us.of(Role::Knight)) {
        let mut allowed = ctx.target_mask & !board.by_color(us);
        if ctx.pinned.contains(from) {
            if ctx.in_check {
                continue;
            }
            // a knight jump always leaves the pin ray, so this empties
            // its targets
            if let Some(king) = ctx.king {
                allowed &= attacks::ray(king, from);
            }
        }

        for to in attacks::knight_attacks(from) & allowed {
            moves.push(Move::Normal {
                role: Role::Knight,
                from,
                capture: board.role_at(to),
                to,
                promotion: None,
            });
        }
    }
}
