//! Formats for exchanging formulas, results, and variable maps with other tools.
//!
//! - [descriptor] domains and problems, as JSON.
//! - [dimacs] formulas, read and written by every SAT solver.
//! - [solution] results, in the format of the SAT competitions.
//! - [map] variable maps, as JSON, so that a model found elsewhere can be decoded.

pub mod descriptor;
pub mod dimacs;
pub mod map;
pub mod solution;
