//! Coordinate move notation.
//!
//! Renders the canonical from-to-promotion form ("e2e4", "e7e8q",
//! "N@f3" for drops). Castling is written king-takes-own-rook in
//! Chess960 contexts and as the two-file king move in classical
//! contexts; both forms are accepted on input.

use crate::error::PlayError;
use crate::position::Position;
use crate::types::{Move, Role, Square};

/// How castling moves are written.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CastlingMode {
    /// King moves two files: "e1g1".
    Standard,
    /// King takes its own rook: "e1h1".
    Chess960,
}

impl Move {
    /// Render this move in coordinate notation.
    #[must_use]
    pub fn to_uci(&self, mode: CastlingMode) -> String {
        match *self {
            Move::Normal {
                from,
                to,
                promotion,
                ..
            } => match promotion {
                Some(role) => format!("{from}{to}{}", role.to_char()),
                None => format!("{from}{to}"),
            },
            Move::EnPassant { from, to } => format!("{from}{to}"),
            Move::Castle { king, rook, .. } => match mode {
                CastlingMode::Chess960 => format!("{king}{rook}"),
                CastlingMode::Standard => format!("{king}{}", self.to()),
            },
            Move::Drop { role, to } => {
                format!("{}@{to}", role.to_char().to_ascii_uppercase())
            }
        }
    }
}

/// Parse coordinate notation against the position's legal moves.
pub(crate) fn parse_move(pos: &Position, notation: &str) -> Result<Move, PlayError> {
    let err = || PlayError::InvalidNotation {
        notation: notation.to_string(),
    };

    let legal = pos.legal_moves();

    if let Some((role_part, square_part)) = notation.split_once('@') {
        let role = role_part
            .chars()
            .next()
            .and_then(Role::from_char)
            .ok_or_else(err)?;
        let to: Square = square_part.parse().map_err(|_| err())?;
        return legal
            .iter()
            .copied()
            .find(|mv| matches!(mv, Move::Drop { role: r, to: t } if *r == role && *t == to))
            .ok_or_else(err);
    }

    if !notation.is_ascii() || notation.len() < 4 || notation.len() > 5 {
        return Err(err());
    }
    let from: Square = notation[..2].parse().map_err(|_| err())?;
    let to: Square = notation[2..4].parse().map_err(|_| err())?;
    let promotion = match notation.as_bytes().get(4) {
        Some(&c) => Some(Role::from_char(c as char).ok_or_else(err)?),
        None => None,
    };

    // ordinary moves first, so a Chess960 king stepping next to its own
    // rook is not mistaken for castling
    for mv in &legal {
        match *mv {
            Move::Normal {
                from: f,
                to: t,
                promotion: p,
                ..
            } if f == from && t == to && p == promotion => return Ok(*mv),
            Move::EnPassant { from: f, to: t } if f == from && t == to && promotion.is_none() => {
                return Ok(*mv)
            }
            _ => {}
        }
    }

    if promotion.is_none() {
        for mv in &legal {
            if let Move::Castle { king, rook, .. } = *mv {
                if king == from && (rook == to || mv.to() == to) {
                    return Ok(*mv);
                }
            }
        }
    }

    Err(err())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Side;
    use crate::variant::Variant;

    #[test]
    fn test_to_uci_normal_and_promotion() {
        let mv = Move::Normal {
            role: Role::Pawn,
            from: Square::E7,
            capture: None,
            to: Square::E8,
            promotion: Some(Role::Queen),
        };
        assert_eq!(mv.to_uci(CastlingMode::Standard), "e7e8q");
    }

    #[test]
    fn test_to_uci_castle_modes() {
        let mv = Move::Castle {
            king: Square::E1,
            rook: Square::H1,
            side: Side::King,
        };
        assert_eq!(mv.to_uci(CastlingMode::Standard), "e1g1");
        assert_eq!(mv.to_uci(CastlingMode::Chess960), "e1h1");
    }

    #[test]
    fn test_to_uci_drop() {
        let mv = Move::Drop {
            role: Role::Knight,
            to: Square::F3,
        };
        assert_eq!(mv.to_uci(CastlingMode::Standard), "N@f3");
    }

    #[test]
    fn test_parse_normal() {
        let pos = Position::new(Variant::Standard);
        let mv = parse_move(&pos, "e2e4").unwrap();
        assert_eq!(mv.from(), Some(Square::E2));
        assert_eq!(mv.to(), Square::E4);
    }

    #[test]
    fn test_parse_castling_both_forms() {
        let pos = Position::from_fen(
            "r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1",
            Variant::Standard,
        )
        .unwrap();
        let two_file = parse_move(&pos, "e1g1").unwrap();
        assert!(two_file.is_castle());
        let king_takes_rook = parse_move(&pos, "e1h1").unwrap();
        assert_eq!(two_file, king_takes_rook);
    }

    #[test]
    fn test_parse_rejects_garbage() {
        let pos = Position::new(Variant::Standard);
        assert!(parse_move(&pos, "e9e4").is_err());
        assert!(parse_move(&pos, "e2").is_err());
        assert!(parse_move(&pos, "e2e4x").is_err());
        // legal square pair but not a legal move
        assert!(parse_move(&pos, "e2e5").is_err());
    }
}
