//! Crazyhouse drop generation.

use crate::attacks;
use crate::position::Position;
use crate::types::{Bitboard, Move, MoveList, Role};

/// Drops land on empty squares (pawns never on a back rank). In check,
/// a drop can only block a lone slider's ray; adding a piece can never
/// expose our own king, so no further filtering is needed.
pub(super) fn gen_drops(pos: &Position, moves: &mut MoveList) {
    let us = pos.turn();
    let board = pos.board();
    let pockets = pos.pockets();
    let empty = !board.occupied();

    let targets = match board.king_of(us) {
        Some(king) => {
            let checkers = board.attackers_to(king, us.opponent(), board.occupied());
            if checkers.is_empty() {
                empty
            } else if let Some(checker) = checkers.single_square() {
                attacks::between(king, checker) & empty
            } else {
                return;
            }
        }
        None => empty,
    };

    for role in [Role::Pawn, Role::Knight, Role::Bishop, Role::Rook, Role::Queen] {
        if pockets.count(us, role) == 0 {
            continue;
        }
        let role_targets = if role == Role::Pawn {
            targets & !Bitboard::BACK_RANKS
        } else {
            targets
        };
        for to in role_targets {
            moves.push(Move::Drop { role, to });
        }
    }
}
