//! # River Crossing Solver Library
//!
//! This library models the farmer/wolf/sheep/cabbage river crossing puzzle as a
//! small state space and provides five search strategies to solve it.
//!
//! It is used by three binaries:
//! - `human_player`: Allows interactive play via the command line.
//! - `ai_solver`: Solves the puzzle with a chosen strategy and prints or animates
//!   the resulting path.
//! - `strategy_report`: Runs every strategy and compares path lengths and the number
//!   of states each one expanded.
//!
//! ## Modules
//! - `engine`: States (`State`, `Side`, `Passenger`), moves, the state space (`Puzzle`)
//!   with its validity rule and successor generation, and manual-play sessions (`Game`).
//! - `solver`: Breadth-first, depth-first, uniform-cost, iterative-deepening and
//!   heuristic best-first search, all behind `solve`.
//! - `heuristics`: The estimate used by heuristic best-first search.
//! - `playback`: Timed, stoppable playback of a solved path.
//! - `utils`: Parsing states and passenger names from text, formatting paths.

pub mod engine;
pub mod heuristics;
pub mod playback;
pub mod solver;
pub mod utils;
