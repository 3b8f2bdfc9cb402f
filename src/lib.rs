//! seistrigger - Characteristic functions and trigger picking for seismic traces
//!
//! Converts digitised ground motion into candidate arrival intervals. A
//! characteristic function turns the waveform into a trigger-likelihood
//! series, and a two-threshold automaton extracts `(on, off)` picks from it.
//!
//! ## Features
//!
//! - **Recursive STA/LTA**: exponentially weighted short/long averages
//! - **Classic STA/LTA**: trailing moving averages of squared amplitude
//! - **Delayed STA/LTA**: cumulative running sums with a muted warm-up
//! - **Carl-Johnson STA trigger**: `star - ratio * ltar - |sta - lta| - quiet`
//! - **Z-detector**: whole-trace standardised short-term energy
//! - **Trigger onset**: arm/disarm thresholds with a maximum event length
//! - **Native pickers**: call contracts for the Baer-Kradolfer and AR pickers
//!
//! ## Module Structure
//!
//! - `core` - Algorithms, trigger extraction, pipeline and native pickers
//! - `config` - Trigger profiles and presets
//! - `detection` - Detection report types
//! - `error` - Error type shared by every fallible call
//!
//! ## Quick Start
//!
//! ```rust
//! use seistrigger::{classic_sta_lta, trigger_onset, TriggerParams};
//!
//! let trace: Vec<f64> = (0..3000)
//!     .map(|i| {
//!         let amplitude = if (1500..1600).contains(&i) { 4.0 } else { 0.1 };
//!         amplitude * ((i as f64) * 0.7).sin()
//!     })
//!     .collect();
//!
//! let cf = classic_sta_lta(&trace, 20, 500)?;
//! let picks = trigger_onset(&cf, &TriggerParams::new(3.0, 1.0))?;
//! assert!(!picks.is_empty());
//! # Ok::<(), seistrigger::TriggerError>(())
//! ```
//!
//! ## Profiles
//!
//! | Profile     | Algorithm       | STA / LTA    | thres1 / thres2 |
//! |-------------|-----------------|--------------|-----------------|
//! | Local       | Recursive       | 0.5 s / 10 s | 3.5 / 1.0       |
//! | Regional    | Classic         | 2 s / 30 s   | 3.0 / 1.5       |
//! | Teleseismic | Recursive       | 5 s / 60 s   | 2.0 / 0.8       |

pub mod config;
pub mod core;
pub mod detection;
pub mod error;

pub use config::{AlgorithmKind, ProfileBuilder, ProfilePreset, TriggerProfile};
pub use crate::core::analysis::{
    carl_sta_trig, classic_sta_lta, delayed_sta_lta, recursive_sta_lta,
    recursive_sta_lta_elementwise, z_detect, CharacteristicFunction, CARL_WARM_UP_VALUE,
};
pub use crate::core::pickers::{
    ar_pick, pk_baer, ArParams, ArPick, BaerParams, BaerPick, NativePickers, Polarity,
    SharedLibraryPickers,
};
pub use crate::core::{trigger_onset, Pick, TriggerDetector, TriggerParams};
pub use detection::{DetectionReport, TriggerEvent};
pub use error::{Result, TriggerError};
