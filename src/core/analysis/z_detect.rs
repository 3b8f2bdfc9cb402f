//! Z-detector (Swindell and Snell 1977, see Withers et al. 1998 p. 99)
//!
//! Normalises the short trailing energy by the mean and standard deviation of
//! the whole trace, so it only runs on complete traces.

use crate::core::dsp::stats::{mean_std, trailing_mean_of_squares};
use crate::error::{Result, TriggerError};

/// Z-detector characteristic function.
///
/// `z[t] = (sta[t] - mean(sta)) / std(sta)` with `sta` the zero padded
/// trailing mean of the squared amplitude over `nsta` samples and `std` the
/// population standard deviation.
///
/// When `std` is zero (a constant-energy trace, e.g. all zeros) every output
/// sample is `NaN`. `NaN` never exceeds a trigger threshold.
pub fn z_detect(waveform: &[f64], nsta: usize) -> Result<Vec<f64>> {
    if waveform.is_empty() {
        return Err(TriggerError::invalid("Empty waveform"));
    }
    if nsta == 0 {
        return Err(TriggerError::invalid("nsta must be positive"));
    }
    log::debug!("Z-detector: {} samples, nsta={}", waveform.len(), nsta);

    let sta = trailing_mean_of_squares(waveform, nsta, 0.0);
    let (mean, std) = mean_std(&sta);

    if std == 0.0 || !std.is_finite() {
        log::warn!(
            "Z-detector: energy has zero or non-finite spread (std={}), output is undefined",
            std
        );
        return Ok(vec![f64::NAN; waveform.len()]);
    }

    Ok(sta.into_iter().map(|s| (s - mean) / std).collect())
}
