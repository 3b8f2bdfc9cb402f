//! Detection module: report types produced by the trigger pipeline

mod result;

pub use result::{DetectionReport, TriggerEvent};
