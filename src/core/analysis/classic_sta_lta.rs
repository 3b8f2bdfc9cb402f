//! Classic STA/LTA
//!
//! Ratio of two trailing moving averages of the squared amplitude. The short
//! window is zero padded before the trace start, the long window is padded
//! with ones so the denominator never vanishes while it is under-filled.

use crate::core::dsp::stats::{squared, trailing_mean};
use crate::error::{validate_windows, Result};

/// Classic STA/LTA characteristic function.
///
/// The first `nlta` samples are forced to zero. A zero long term average after
/// the warm-up (only possible on a silent stretch) yields zero.
///
/// # Arguments
///
/// * `waveform` - Seismic trace
/// * `nsta` - Length of the short time average window in samples
/// * `nlta` - Length of the long time average window in samples
pub fn classic_sta_lta(waveform: &[f64], nsta: usize, nlta: usize) -> Result<Vec<f64>> {
    validate_windows(waveform, nsta, nlta)?;
    log::debug!(
        "classic STA/LTA: {} samples, nsta={}, nlta={}",
        waveform.len(),
        nsta,
        nlta
    );

    let energy = squared(waveform);
    let sta = trailing_mean(&energy, nsta, 0.0);
    let lta = trailing_mean(&energy, nlta, 1.0);

    let charfct = sta
        .iter()
        .zip(&lta)
        .enumerate()
        .map(|(t, (&s, &l))| {
            if t < nlta || l == 0.0 {
                0.0
            } else {
                s / l
            }
        })
        .collect();

    Ok(charfct)
}
