// LogAnalyzer - app/mod.rs
//
// Application layer: the concurrent execution engine and its parts.
// Dependencies: core layer, platform probe trait.

pub mod engine;
pub mod runner;
pub mod tracker;
