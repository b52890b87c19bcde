//! FEN decoding and rendering.
//!
//! Variant-aware: Crazyhouse carries a pocket section in brackets and
//! `~` markers on promoted pieces, Three-check a remaining-checks field
//! between the en passant target and the clocks ("3+3", with the
//! engine-style "+0+0" given-checks form accepted on input), and
//! Chess960 castling rights may name rook files directly.

use crate::board::Board;
use crate::error::{FenError, PositionError};
use crate::position::{CheckCount, Pockets, Position, Setup};
use crate::types::{Bitboard, Color, Piece, Role, Side, Square};
use crate::variant::Variant;

pub(crate) fn parse_fen(fen: &str, variant: Variant) -> Result<Setup, PositionError> {
    let parts: Vec<&str> = fen.split_whitespace().collect();
    if parts.len() < 4 {
        return Err(FenError::TooFewParts { found: parts.len() }.into());
    }

    let (board, pockets, promoted) = parse_placement(parts[0], variant)?;

    let turn = match parts[1] {
        "w" => Color::White,
        "b" => Color::Black,
        other => {
            return Err(FenError::InvalidSideToMove {
                found: other.to_string(),
            }
            .into())
        }
    };

    let castling_rooks = parse_castling(parts[2], &board)?;

    let ep_square = if parts[3] == "-" {
        None
    } else {
        Some(parts[3].parse::<Square>().map_err(|_| {
            FenError::InvalidEnPassant {
                found: parts[3].to_string(),
            }
        })?)
    };

    let mut check_count = CheckCount::default();
    let mut clocks = Vec::new();
    for part in &parts[4..] {
        if part.contains('+') {
            check_count = parse_check_count(part)?;
        } else {
            clocks.push(*part);
        }
    }

    let halfmove_clock = match clocks.first() {
        Some(text) => text.parse().map_err(|_| FenError::InvalidClock {
            found: text.to_string(),
        })?,
        None => 0,
    };
    let fullmoves = match clocks.get(1) {
        Some(text) => text.parse().map_err(|_| FenError::InvalidClock {
            found: text.to_string(),
        })?,
        None => 1,
    };

    Ok(Setup {
        board,
        turn,
        castling_rooks,
        ep_square,
        halfmove_clock,
        fullmoves,
        pockets,
        promoted,
        check_count,
    })
}

fn parse_placement(
    placement: &str,
    variant: Variant,
) -> Result<(Board, Pockets, Bitboard), FenError> {
    let (ranks_part, pocket_part) = match placement.find('[') {
        Some(open) => {
            let inner = placement[open + 1..]
                .strip_suffix(']')
                .ok_or(FenError::InvalidPocket {
                    found: placement.to_string(),
                })?;
            (&placement[..open], Some(inner))
        }
        None => (placement, None),
    };

    if pocket_part.is_some() && variant != Variant::Crazyhouse {
        return Err(FenError::InvalidPocket {
            found: placement.to_string(),
        });
    }

    let mut board = Board::empty();
    let mut promoted = Bitboard::EMPTY;
    let ranks: Vec<&str> = ranks_part.split('/').collect();
    if ranks.len() != 8 {
        return Err(FenError::BadRankCount { found: ranks.len() });
    }

    for (rank_idx, rank_str) in ranks.iter().enumerate() {
        let rank = 7 - rank_idx as u8;
        let mut file = 0u8;
        let mut last_placed = None;
        for c in rank_str.chars() {
            if let Some(step) = c.to_digit(10) {
                file += step as u8;
                last_placed = None;
            } else if c == '~' {
                if variant != Variant::Crazyhouse {
                    return Err(FenError::InvalidPiece { char: c });
                }
                let sq = last_placed.ok_or(FenError::InvalidPiece { char: c })?;
                promoted.add(sq);
            } else {
                let piece = Piece::from_char(c).ok_or(FenError::InvalidPiece { char: c })?;
                if file >= 8 {
                    return Err(FenError::TooManyFiles { rank: rank_idx });
                }
                let sq = Square::new(file, rank);
                board.set_piece_at(sq, piece);
                last_placed = Some(sq);
                file += 1;
            }
            if file > 8 {
                return Err(FenError::TooManyFiles { rank: rank_idx });
            }
        }
    }

    let mut pockets = Pockets::default();
    if let Some(pocket) = pocket_part {
        for c in pocket.chars() {
            let piece = Piece::from_char(c).ok_or(FenError::InvalidPocket {
                found: pocket.to_string(),
            })?;
            if piece.role == Role::King {
                return Err(FenError::InvalidPocket {
                    found: pocket.to_string(),
                });
            }
            pockets.add(piece.color, piece.role);
        }
    }

    Ok((board, pockets, promoted))
}

/// Resolve a castling field to the set of rook squares it names.
/// Accepts K/Q/k/q (outermost rook on that side) and Shredder-style
/// file letters. A right that names no rook is a position error.
fn parse_castling(field: &str, board: &Board) -> Result<Bitboard, PositionError> {
    let mut rooks = Bitboard::EMPTY;
    if field == "-" {
        return Ok(rooks);
    }

    for c in field.chars() {
        let color = if c.is_ascii_uppercase() {
            Color::White
        } else {
            Color::Black
        };
        let back = Bitboard::rank(color.back_rank());
        let candidates = board.by_piece(color.of(Role::Rook)) & back;
        let king_file = board.king_of(color).map(Square::file);

        let rook = match c.to_ascii_lowercase() {
            'k' => candidates
                .last()
                .filter(|rook| king_file.is_some_and(|king| rook.file() > king)),
            'q' => candidates
                .first()
                .filter(|rook| king_file.is_some_and(|king| rook.file() < king)),
            file @ 'a'..='h' => {
                let sq = Square::new(file as u8 - b'a', color.back_rank());
                candidates.contains(sq).then_some(sq)
            }
            _ => return Err(FenError::InvalidCastling { char: c }.into()),
        };

        match rook {
            Some(sq) => rooks.add(sq),
            None => {
                return Err(PositionError::BadCastlingRights {
                    square: c.to_string(),
                })
            }
        }
    }

    Ok(rooks)
}

fn parse_check_count(field: &str) -> Result<CheckCount, PositionError> {
    let invalid = || FenError::InvalidCheckCount {
        found: field.to_string(),
    };

    if let Some(rest) = field.strip_prefix('+') {
        // "+1+2": checks already given by white and black
        let (white, black) = rest.split_once('+').ok_or_else(invalid)?;
        Ok(CheckCount {
            white: white.parse().map_err(|_| invalid())?,
            black: black.parse().map_err(|_| invalid())?,
        })
    } else {
        // "3+3": remaining checks before each side wins
        let (white, black) = field.split_once('+').ok_or_else(invalid)?;
        let white: u8 = white.parse().map_err(|_| invalid())?;
        let black: u8 = black.parse().map_err(|_| invalid())?;
        if white > 3 || black > 3 {
            return Err(invalid().into());
        }
        Ok(CheckCount {
            white: 3 - white,
            black: 3 - black,
        })
    }
}

pub(crate) fn render_fen(pos: &Position) -> String {
    let mut fen = String::new();

    for rank in (0..8).rev() {
        let mut empty = 0;
        for file in 0..8 {
            let sq = Square::new(file, rank);
            match pos.board().piece_at(sq) {
                Some(piece) => {
                    if empty > 0 {
                        fen.push_str(&empty.to_string());
                        empty = 0;
                    }
                    fen.push(piece.to_char());
                    if pos.promoted().contains(sq) {
                        fen.push('~');
                    }
                }
                None => empty += 1,
            }
        }
        if empty > 0 {
            fen.push_str(&empty.to_string());
        }
        if rank > 0 {
            fen.push('/');
        }
    }

    if pos.variant() == Variant::Crazyhouse {
        fen.push('[');
        for color in [Color::White, Color::Black] {
            for role in [Role::Queen, Role::Rook, Role::Bishop, Role::Knight, Role::Pawn] {
                for _ in 0..pos.pockets().count(color, role) {
                    fen.push(color.of(role).to_char());
                }
            }
        }
        fen.push(']');
    }

    fen.push(' ');
    fen.push(pos.turn().fold('w', 'b'));

    fen.push(' ');
    fen.push_str(&render_castling(pos));

    fen.push(' ');
    match pos.ep_square() {
        Some(ep) => fen.push_str(&ep.to_string()),
        None => fen.push('-'),
    }

    if pos.variant() == Variant::ThreeCheck {
        let count = pos.check_count();
        fen.push_str(&format!(
            " {}+{}",
            3u8.saturating_sub(count.white),
            3u8.saturating_sub(count.black)
        ));
    }

    fen.push_str(&format!(
        " {} {}",
        pos.halfmove_clock(),
        pos.fullmoves()
    ));

    fen
}

fn render_castling(pos: &Position) -> String {
    let castles = pos.castles();
    if castles.is_empty() {
        return "-".to_string();
    }

    let mut field = String::new();
    for color in [Color::White, Color::Black] {
        let Some(king) = pos.board().king_of(color) else {
            continue;
        };
        for side in Side::ALL {
            let Some(rook) = castles.rook_for(color, side, king) else {
                continue;
            };
            let c = if pos.variant() == Variant::Chess960 {
                (b'a' + rook.file()) as char
            } else {
                match side {
                    Side::King => 'k',
                    Side::Queen => 'q',
                }
            };
            field.push(match color {
                Color::White => c.to_ascii_uppercase(),
                Color::Black => c,
            });
        }
    }

    if field.is_empty() {
        "-".to_string()
    } else {
        field
    }
}
