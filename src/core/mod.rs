//! Core trigger algorithms and the detection pipeline

pub mod analysis;
pub mod detector;
pub mod dsp;
pub mod pickers;
pub mod trigger;

pub use analysis::CharacteristicFunction;
pub use detector::TriggerDetector;
pub use trigger::{trigger_onset, Pick, TriggerParams};
