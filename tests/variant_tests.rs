//! Variant scenarios through the public API.

use chess_rules::{Color, Outcome, Position, Role, Square, Variant};

#[test]
fn test_atomic_scholar_explosion() {
    let pos = ["e2e4", "e7e5", "d1h5", "b8c6", "f1c4", "g8f6", "h5f7"]
        .iter()
        .fold(Position::new(Variant::Atomic), |pos, mv| {
            pos.play_uci(mv).unwrap()
        });
    assert!(pos.is_terminal());
    assert_eq!(
        pos.outcome(),
        Some(Outcome::Decisive {
            winner: Color::White
        })
    );
    assert_eq!(pos.board().king_of(Color::Black), None);
}

#[test]
fn test_three_check_full_game() {
    // three quick bishop checks
    let pos = [
        "e2e4", "e7e5", "f1c4", "f8c5", "c4f7", "e8f7", "d1h5", "f7f8", "h5f7",
    ]
    .iter()
    .fold(Position::new(Variant::ThreeCheck), |pos, mv| {
        pos.play_uci(mv).unwrap()
    });
    assert_eq!(pos.check_count().by(Color::White), 3);
    assert!(pos.is_terminal());
    assert_eq!(
        pos.outcome(),
        Some(Outcome::Decisive {
            winner: Color::White
        })
    );
}

#[test]
fn test_crazyhouse_drop_cycle() {
    let pos = ["e2e4", "d7d5", "e4d5", "d8d5"]
        .iter()
        .fold(Position::new(Variant::Crazyhouse), |pos, mv| {
            pos.play_uci(mv).unwrap()
        });
    // both sides pocketed a pawn
    assert_eq!(pos.pockets().count(Color::White, Role::Pawn), 1);
    assert_eq!(pos.pockets().count(Color::Black, Role::Pawn), 1);

    // white drops the pawn back
    let pos = pos.play_uci("P@e4").unwrap();
    assert_eq!(
        pos.board().piece_at(Square::E4),
        Some(Color::White.of(Role::Pawn))
    );
    assert_eq!(pos.pockets().count(Color::White, Role::Pawn), 0);
}

#[test]
fn test_antichess_forced_capture_chain() {
    let pos = ["e2e3", "b7b5", "f1b5", "c7c6"]
        .iter()
        .fold(Position::new(Variant::Antichess), |pos, mv| {
            pos.play_uci(mv).unwrap()
        });
    // Bxc6 is the only capture, hence the only move
    let moves = pos.legal_moves();
    assert_eq!(moves.len(), 1);
    assert_eq!(moves[0].to(), Square::C6);

    // and black must immediately take back, one way or another
    let pos = pos.play(&moves[0]).unwrap();
    let replies = pos.legal_moves();
    assert!(replies.len() >= 2);
    assert!(replies.iter().all(|mv| mv.is_capture()));
}

#[test]
fn test_variant_starting_positions_are_playable() {
    for variant in Variant::ALL {
        let pos = Position::new(variant);
        assert!(!pos.is_terminal(), "{variant} start is terminal");
        let moves = pos.legal_moves();
        assert!(!moves.is_empty(), "{variant} start has no moves");
        for mv in &moves {
            let next = pos.play(mv).unwrap();
            assert_eq!(
                next.position_hashes().len(),
                pos.position_hashes().len() + 1
            );
        }
    }
}

#[test]
fn test_variant_fen_roundtrip_from_start() {
    for variant in Variant::ALL {
        let pos = Position::new(variant);
        let fen = pos.fen();
        let rebuilt = Position::from_fen(&fen, variant)
            .unwrap_or_else(|err| panic!("{variant} start FEN rejected: {err}"));
        assert_eq!(rebuilt.fen(), fen, "{variant} FEN not stable");
    }
}
