//! Carl-Johnson STA trigger
//!
//! ```text
//! eta = star - ratio * ltar - |sta - lta| - quiet
//! ```
//!
//! `sta`/`lta` are trailing means of the squared amplitude, `star` is the
//! short trailing mean of `|a - lta|` and `ltar` the long trailing mean of
//! `star`. All windows are zero padded before the trace start.

use crate::core::dsp::stats::{trailing_mean, trailing_mean_of_squares};
use crate::error::{validate_windows, Result, TriggerError};

/// Value reported for samples inside the long window warm-up
pub const CARL_WARM_UP_VALUE: f64 = -1.0;

/// Carl-Johnson STA trigger characteristic function.
///
/// # Arguments
///
/// * `waveform` - Seismic trace
/// * `nsta` - Length of the short time average window in samples
/// * `nlta` - Length of the long time average window in samples
/// * `ratio` - Weight of `ltar`; smaller values make the trigger more sensitive
/// * `quiet` - Constant offset; smaller values make the trigger more sensitive
///
/// The first `nlta` samples are set to [`CARL_WARM_UP_VALUE`].
pub fn carl_sta_trig(
    waveform: &[f64],
    nsta: usize,
    nlta: usize,
    ratio: f64,
    quiet: f64,
) -> Result<Vec<f64>> {
    validate_windows(waveform, nsta, nlta)?;
    if !ratio.is_finite() || !quiet.is_finite() {
        return Err(TriggerError::invalid(format!(
            "ratio and quiet must be finite, got ratio={} quiet={}",
            ratio, quiet
        )));
    }
    log::debug!(
        "Carl STA trigger: {} samples, nsta={}, nlta={}, ratio={}, quiet={}",
        waveform.len(),
        nsta,
        nlta,
        ratio,
        quiet
    );

    let sta = trailing_mean_of_squares(waveform, nsta, 0.0);
    let lta = trailing_mean_of_squares(waveform, nlta, 0.0);

    let deviation: Vec<f64> = waveform
        .iter()
        .zip(&lta)
        .map(|(a, l)| (a - l).abs())
        .collect();
    let star = trailing_mean(&deviation, nsta, 0.0);
    let ltar = trailing_mean(&star, nlta, 0.0);

    let eta = (0..waveform.len())
        .map(|t| {
            if t < nlta {
                CARL_WARM_UP_VALUE
            } else {
                star[t] - ratio * ltar[t] - (sta[t] - lta[t]).abs() - quiet
            }
        })
        .collect();

    Ok(eta)
}
