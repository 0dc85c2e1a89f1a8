// LogAnalyzer - lib.rs
//
// Library entry point, exposing the engine and its adapters for
// integration testing and programmatic use.

pub mod app;
pub mod core;
pub mod platform;
pub mod util;
