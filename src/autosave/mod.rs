//! Debounced, single-flight auto-save of in-progress form data.

pub mod coordinator;
pub mod saver;
pub mod state;

pub use coordinator::AutoSaveCoordinator;
pub use saver::{Saver, StepSaver};
pub use state::{SaveIndicator, SaveState};
