//! Characteristic function algorithms
//!
//! Each algorithm maps a waveform to a trigger-likelihood series of the same
//! length:
//! - Recursive STA/LTA (exponentially weighted averages)
//! - Classic STA/LTA (trailing moving averages)
//! - Delayed STA/LTA (cumulative running sums)
//! - Carl-Johnson STA trigger
//! - Z-detector (whole-trace normalised energy)

mod carl_sta_trig;
mod classic_sta_lta;
mod delayed_sta_lta;
mod recursive_sta_lta;
mod z_detect;

use serde::{Deserialize, Serialize};

use crate::error::Result;

pub use carl_sta_trig::{carl_sta_trig, CARL_WARM_UP_VALUE};
pub use classic_sta_lta::classic_sta_lta;
pub use delayed_sta_lta::delayed_sta_lta;
pub use recursive_sta_lta::{recursive_sta_lta, recursive_sta_lta_elementwise};
pub use z_detect::z_detect;

/// Algorithm selection together with its window parameters (in samples)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CharacteristicFunction {
    RecursiveStaLta { nsta: usize, nlta: usize },
    ClassicStaLta { nsta: usize, nlta: usize },
    DelayedStaLta { nsta: usize, nlta: usize },
    CarlStaTrig {
        nsta: usize,
        nlta: usize,
        ratio: f64,
        quiet: f64,
    },
    ZDetect { nsta: usize },
}

impl CharacteristicFunction {
    /// Compute the characteristic function of `waveform`
    pub fn compute(&self, waveform: &[f64]) -> Result<Vec<f64>> {
        match *self {
            Self::RecursiveStaLta { nsta, nlta } => recursive_sta_lta(waveform, nsta, nlta),
            Self::ClassicStaLta { nsta, nlta } => classic_sta_lta(waveform, nsta, nlta),
            Self::DelayedStaLta { nsta, nlta } => delayed_sta_lta(waveform, nsta, nlta),
            Self::CarlStaTrig {
                nsta,
                nlta,
                ratio,
                quiet,
            } => carl_sta_trig(waveform, nsta, nlta, ratio, quiet),
            Self::ZDetect { nsta } => z_detect(waveform, nsta),
        }
    }

    /// Snake_case identifier, the same string as the serialized `kind` tag
    pub fn name(&self) -> &'static str {
        match self {
            Self::RecursiveStaLta { .. } => "recursive_sta_lta",
            Self::ClassicStaLta { .. } => "classic_sta_lta",
            Self::DelayedStaLta { .. } => "delayed_sta_lta",
            Self::CarlStaTrig { .. } => "carl_sta_trig",
            Self::ZDetect { .. } => "z_detect",
        }
    }

    /// Number of leading samples that carry a warm-up value rather than data
    pub fn warm_up_len(&self) -> usize {
        match *self {
            Self::RecursiveStaLta { nlta, .. }
            | Self::ClassicStaLta { nlta, .. }
            | Self::CarlStaTrig { nlta, .. } => nlta,
            Self::DelayedStaLta { nsta, nlta } => nsta + nlta + delayed_sta_lta::DELAY_MARGIN,
            Self::ZDetect { .. } => 0,
        }
    }
}
