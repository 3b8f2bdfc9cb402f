//! Delayed STA/LTA (Withers et al. 1998, p. 97)

use crate::error::{validate_windows, Result};

/// Extra samples muted after the `nsta + nlta` warm-up
pub(crate) const DELAY_MARGIN: usize = 50;

/// Running sums carried through the forward pass
#[derive(Debug, Clone, Copy, Default)]
struct DelayedState {
    sta: f64,
    lta: f64,
}

/// Delayed STA/LTA characteristic function.
///
/// Cumulative recurrences
///
/// ```text
/// sta[i] = (a[i]^2 + a[i-nsta]^2) / nsta + sta[i-1]
/// lta[i] = (a[i-nsta-1]^2 + a[i-nsta-nlta-1]^2) / nlta + lta[i-1]
/// ```
///
/// Samples before the trace start read as zero. The first
/// `nsta + nlta + 50` outputs are zero, as is any sample whose `lta` is zero.
pub fn delayed_sta_lta(waveform: &[f64], nsta: usize, nlta: usize) -> Result<Vec<f64>> {
    validate_windows(waveform, nsta, nlta)?;

    let muted = nsta + nlta + DELAY_MARGIN;
    if waveform.len() <= muted {
        log::warn!(
            "delayed STA/LTA: trace of {} samples is inside the {} sample warm-up",
            waveform.len(),
            muted
        );
    }

    let energy_at = |offset: Option<usize>| -> f64 {
        offset.map_or(0.0, |j| waveform[j] * waveform[j])
    };
    let sta_scale = 1.0 / nsta as f64;
    let lta_scale = 1.0 / nlta as f64;

    let mut state = DelayedState::default();
    let charfct = (0..waveform.len())
        .map(|i| {
            state.sta += (energy_at(Some(i)) + energy_at(i.checked_sub(nsta))) * sta_scale;
            state.lta += (energy_at(i.checked_sub(nsta + 1))
                + energy_at(i.checked_sub(nsta + nlta + 1)))
                * lta_scale;

            if i < muted || state.lta == 0.0 {
                0.0
            } else {
                state.sta / state.lta
            }
        })
        .collect();

    Ok(charfct)
}
