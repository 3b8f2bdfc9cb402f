//! Configuration module for trigger profiles

mod profiles;

pub use profiles::{
    seconds_to_samples, AlgorithmKind, ProfileBuilder, ProfilePreset, TriggerProfile,
};
