// LogAnalyzer - platform/mod.rs
//
// Platform abstraction layer: filesystem probe, settings and task list files.
// Dependencies: standard library, directories crate, core model.

pub mod config;
pub mod fs;
pub mod tasks;
