//! Bishop, rook and queen move generation via the magic tables.

use super::GenCtx;
use crate::attacks;
use crate::position::Position;
use crate::types::{Bitboard, Move, MoveList, Role, Square};

fn slider_targets(role: Role, from: Square, occupied: Bitboard) -> Bitboard {
    match role {
        Role::Bishop => attacks::bishop_attacks(from, occupied),
        Role::Rook => attacks::rook_attacks(from, occupied),
        _ => attacks::queen_attacks(from, occupied),
    }
}

pub(super) fn gen_slider_moves(pos: &Position, moves: &mut MoveList, ctx: &GenCtx) {
    let us = pos.turn();
    let board = pos.board();
    let occupied = board.occupied();

    for role in [Role::Bishop, Role::Rook, Role::Queen] {
        for from in board.by_piece(us.of(role)) {
            let mut allowed = ctx.target_mask & !board.by_color(us);
            if ctx.pinned.contains(from) {
                if ctx.in_check {
                    continue;
                }
                if let Some(king) = ctx.king {
                    allowed &= attacks::ray(king, from);
                }
            }

            for to in slider_targets(role, from, occupied) & allowed {
                moves.push(Move::Normal {
                    role,
                    from,
                    capture: board.role_at(to),
                    to,
                    promotion: None,
                });
            }
        }
    }
}
