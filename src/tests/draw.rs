//! Repetition, clock and dead-position draws.

use crate::position::{Outcome, Position, Termination};
use crate::variant::Variant;

fn play_all(pos: Position, moves: &[&str]) -> Position {
    moves.iter().fold(pos, |pos, mv| {
        pos.play_uci(mv)
            .unwrap_or_else(|err| panic!("move {mv} failed: {err}"))
    })
}

#[test]
fn test_threefold_by_knight_shuffle() {
    let pos = play_all(
        Position::default(),
        &[
            "g1f3", "g8f6", "f3g1", "f6g8", "g1f3", "g8f6", "f3g1", "f6g8",
        ],
    );
    assert!(pos.threefold_repetition());
    assert!(!pos.fivefold_repetition());
    // claimable, not automatic
    assert!(!pos.is_terminal());
}

#[test]
fn test_fivefold_is_automatic() {
    let shuffle = [
        "g1f3", "g8f6", "f3g1", "f6g8", "g1f3", "g8f6", "f3g1", "f6g8",
        "g1f3", "g8f6", "f3g1", "f6g8", "g1f3", "g8f6", "f3g1", "f6g8",
    ];
    let pos = play_all(Position::default(), &shuffle);
    assert!(pos.fivefold_repetition());
    assert_eq!(pos.termination(), Some(Termination::FivefoldRepetition));
    assert_eq!(pos.outcome(), Some(Outcome::Draw));
}

#[test]
fn test_repetition_distinguishes_side_to_move() {
    // after an odd shuffle the same placement with the other side to
    // move is not a repetition of the start
    let pos = play_all(Position::default(), &["g1f3", "g8f6", "f3g1"]);
    assert!(!pos.threefold_repetition());
}

#[test]
fn test_fifty_move_rule_claimable() {
    let pos = Position::from_fen("4k3/8/8/8/8/8/8/R3K3 w - - 99 80", Variant::Standard).unwrap();
    assert!(!pos.fifty_move_rule());
    let pos = pos.play_uci("a1a2").unwrap();
    assert!(pos.fifty_move_rule());
    assert!(!pos.seventy_five_move_rule());
    assert!(!pos.is_terminal());
}

#[test]
fn test_seventy_five_move_rule_is_automatic() {
    let pos = Position::from_fen("4k3/8/8/8/8/8/8/R3K3 w - - 149 100", Variant::Standard).unwrap();
    let pos = pos.play_uci("a1a2").unwrap();
    assert!(pos.seventy_five_move_rule());
    assert_eq!(pos.termination(), Some(Termination::SeventyFiveMoves));
    assert_eq!(pos.outcome(), Some(Outcome::Draw));
}

#[test]
fn test_clock_reset_interrupts_draw_countdown() {
    let pos = Position::from_fen(
        "4k3/7p/8/8/8/8/8/R3K3 b - - 99 80",
        Variant::Standard,
    )
    .unwrap();
    let pos = pos.play_uci("h7h6").unwrap();
    assert_eq!(pos.halfmove_clock(), 0);
    assert!(!pos.fifty_move_rule());
}

#[test]
fn test_insufficient_material_draws() {
    for fen in [
        "4k3/8/8/8/8/8/8/4K3 w - - 0 1",
        "4k3/8/8/8/8/8/2N5/4K3 w - - 0 1",
        "4k3/8/8/8/8/8/2B5/4K3 b - - 0 1",
        // bishops on the same square color
        "2b1k3/8/8/8/8/8/2B5/4K3 w - - 0 1",
    ] {
        let pos = Position::from_fen(fen, Variant::Standard).unwrap();
        assert_eq!(
            pos.termination(),
            Some(Termination::InsufficientMaterial),
            "expected dead position: {fen}"
        );
        assert_eq!(pos.outcome(), Some(Outcome::Draw));
    }
}

#[test]
fn test_sufficient_material_goes_on() {
    for fen in [
        "4k3/8/8/8/8/8/8/R3K3 w - - 0 1",
        "4k3/8/8/8/8/8/1NN5/4K3 w - - 0 1",
        // opposite-colored bishops
        "1b2k3/8/8/8/8/8/2B5/4K3 w - - 0 1",
        "4k3/7p/8/8/8/8/8/4K3 w - - 0 1",
    ] {
        let pos = Position::from_fen(fen, Variant::Standard).unwrap();
        assert_eq!(pos.termination(), None, "not a dead position: {fen}");
    }
}

#[test]
fn test_hash_history_grows_one_per_move() {
    let mut pos = Position::default();
    for (ply, mv) in ["e2e4", "e7e5", "g1f3", "b8c6"].iter().enumerate() {
        pos = pos.play_uci(mv).unwrap();
        assert_eq!(pos.position_hashes().len(), ply + 2);
    }
}
