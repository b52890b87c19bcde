//! Perft (performance test) for move generation correctness.

use crate::perft::perft;
use crate::position::Position;
use crate::variant::Variant;

struct TestPosition {
    name: &'static str,
    fen: &'static str,
    variant: Variant,
    depths: &'static [(u32, u64)],
}

fn run(positions: &[TestPosition]) {
    for position in positions {
        let pos = Position::from_fen(position.fen, position.variant)
            .unwrap_or_else(|err| panic!("bad FEN for '{}': {err}", position.name));

        for &(depth, expected) in position.depths {
            let nodes = perft(&pos, depth);
            assert_eq!(
                nodes, expected,
                "Perft failed for position '{}' at depth {}. Expected: {}, Got: {}",
                position.name, depth, expected, nodes
            );
        }
    }
}

#[test]
fn test_perft_initial_position() {
    run(&[TestPosition {
        name: "Initial Position",
        fen: "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1",
        variant: Variant::Standard,
        depths: &[(1, 20), (2, 400), (3, 8902), (4, 197_281), (5, 4_865_609)],
    }]);
}

#[test]
fn test_perft_kiwipete() {
    run(&[TestPosition {
        name: "Kiwipete",
        fen: "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1",
        variant: Variant::Standard,
        depths: &[(1, 48), (2, 2039), (3, 97_862), (4, 4_085_603)],
    }]);
}

#[test]
fn test_perft_endgame() {
    run(&[TestPosition {
        name: "Position 3",
        fen: "8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - - 0 1",
        variant: Variant::Standard,
        depths: &[(1, 14), (2, 191), (3, 2812), (4, 43_238), (5, 674_624)],
    }]);
}

#[test]
fn test_perft_position_4() {
    run(&[TestPosition {
        name: "Position 4",
        fen: "r3k2r/Pppp1ppp/1b3nbN/nP6/BBP1P3/q4N2/Pp1P2PP/R2Q1RK1 w kq - 0 1",
        variant: Variant::Standard,
        depths: &[(1, 6), (2, 264), (3, 9467), (4, 422_333)],
    }]);
}

#[test]
fn test_perft_position_5() {
    run(&[TestPosition {
        name: "Position 5",
        fen: "rnbq1k1r/pp1Pbppp/2p5/8/2B5/8/PPP1NnPP/RNBQK2R w KQ - 1 8",
        variant: Variant::Standard,
        depths: &[(1, 44), (2, 1486), (3, 62_379), (4, 2_103_487)],
    }]);
}

#[test]
fn test_perft_special_moves() {
    run(&[
        TestPosition {
            name: "En Passant Capture",
            fen: "rnbqkbnr/ppp1p1pp/8/3pPp2/8/8/PPPP1PPP/RNBQKBNR w KQkq f6 0 3",
            variant: Variant::Standard,
            depths: &[(1, 31), (2, 707), (3, 21_637)],
        },
        TestPosition {
            name: "Promotion",
            fen: "n1n5/PPPk4/8/8/8/8/4Kppp/5N1N b - - 0 1",
            variant: Variant::Standard,
            depths: &[(1, 24), (2, 496), (3, 9483)],
        },
        TestPosition {
            name: "Castling",
            fen: "r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1",
            variant: Variant::Standard,
            depths: &[(1, 26), (2, 568), (3, 13_744)],
        },
    ]);
}

#[test]
fn test_perft_chess960() {
    run(&[TestPosition {
        name: "Chess960 gentest-1",
        fen: "bqnb1rkr/pp3ppp/3ppn2/2p5/5P2/P2P4/NPP1P1PP/BQ1BNRKR w KQkq - 1 9",
        variant: Variant::Chess960,
        depths: &[(1, 21), (2, 528), (3, 12_189), (4, 326_672)],
    }]);
}

#[test]
fn test_perft_three_check() {
    // counting checks never changes the legal move set, so shallow
    // perft matches standard chess
    run(&[TestPosition {
        name: "Three-check initial",
        fen: "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 3+3 0 1",
        variant: Variant::ThreeCheck,
        depths: &[(1, 20), (2, 400), (3, 8902), (4, 197_281)],
    }]);
}

#[test]
fn test_perft_crazyhouse_opening() {
    // the first capture happens at ply 3, so the capturing side's
    // pocket cannot influence counts before ply 5
    run(&[TestPosition {
        name: "Crazyhouse initial",
        fen: "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR[] w KQkq - 0 1",
        variant: Variant::Crazyhouse,
        depths: &[(1, 20), (2, 400), (3, 8902), (4, 197_281)],
    }]);
}

#[test]
fn test_perft_atomic_opening() {
    run(&[TestPosition {
        name: "Atomic initial",
        fen: "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1",
        variant: Variant::Atomic,
        depths: &[(1, 20), (2, 400), (3, 8902)],
    }]);
}

#[test]
fn test_perft_horde_opening() {
    run(&[TestPosition {
        name: "Horde initial",
        fen: "rnbqkbnr/pppppppp/8/1PP2PP1/PPPPPPPP/PPPPPPPP/PPPPPPPP/PPPPPPPP w kq - 0 1",
        variant: Variant::Horde,
        depths: &[(1, 8), (2, 128)],
    }]);
}

#[test]
fn test_perft_antichess_opening() {
    // no captures are possible within two plies, so the first two
    // depths match unrestricted movement
    run(&[TestPosition {
        name: "Antichess initial",
        fen: "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w - - 0 1",
        variant: Variant::Antichess,
        depths: &[(1, 20), (2, 400)],
    }]);
}

#[test]
fn test_perft_racing_kings_start() {
    let pos = Position::new(Variant::RacingKings);
    assert_eq!(perft(&pos, 1), 21);
}
