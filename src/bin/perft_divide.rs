//! Per-root-move perft breakdown, for hunting down generator bugs.
//!
//! Usage: perft_divide [depth] [fen] [variant]

use std::time::Instant;

use chess_rules::{perft_divide, CastlingMode, Position, Variant};

fn main() {
    let args: Vec<String> = std::env::args().skip(1).collect();

    let depth: u32 = args
        .first()
        .and_then(|arg| arg.parse().ok())
        .unwrap_or(3);
    let fen = args
        .get(1)
        .map(String::as_str)
        .unwrap_or("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1");
    let variant = args
        .get(2)
        .and_then(|name| Variant::from_name(name))
        .unwrap_or(Variant::Standard);

    let pos = match Position::from_fen(fen, variant) {
        Ok(pos) => pos,
        Err(err) => {
            eprintln!("bad position: {err}");
            std::process::exit(1);
        }
    };

    let mode = if variant == Variant::Chess960 {
        CastlingMode::Chess960
    } else {
        CastlingMode::Standard
    };

    println!("Perft divide ({variant}) depth {depth}");
    let start = Instant::now();
    let mut total = 0u64;
    let mut divide = perft_divide(&pos, depth);
    divide.sort_by_key(|(mv, _)| mv.to_uci(mode));
    for (mv, nodes) in divide {
        println!("  {}: {nodes}", mv.to_uci(mode));
        total += nodes;
    }
    println!("Total: {total} in {:?}", start.elapsed());
}
