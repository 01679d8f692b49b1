//! Session engine: dispatch, editing and the headless run loop

pub mod editing;
pub mod engine;
pub mod runner;

pub use editing::Brush;
pub use engine::Automaton;
pub use runner::{run, run_with, EndReason, RunSummary};
