/// The tap driven board interaction controller.
pub mod board;
/// Chess domain types.
pub mod chess;
/// Transforms between screen coordinates and board squares.
pub mod grid;
/// Puzzle race lifecycle.
pub mod race;
/// The rules engine capability interface.
pub mod rules;
