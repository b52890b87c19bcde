//! Central test suite: perft oracles, variant rules, draw detection,
//! edge cases and property-based invariants.

mod draw;
mod perft;
