// LogAnalyzer - core/mod.rs
//
// Core business logic layer: data model, analysis step, reporting.
// Must NOT depend on: platform or app.

pub mod analysis;
pub mod export;
pub mod model;
pub mod report;
