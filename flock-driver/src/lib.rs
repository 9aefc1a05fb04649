//! Headless frame driver for the flock simulation: loads settings, owns the
//! frame loop and its timing, and exports what a renderer would read.

pub mod runner;
pub mod settings;
pub mod snapshot;

pub use runner::{Driver, FpsMeter, ResizeEvent, RunSummary};
pub use settings::{load_settings, to_config};
pub use snapshot::capture;
