//! Recursive STA/LTA (Withers et al. 1998, p. 98)
//!
//! Short and long term averages are exponentially weighted running means of
//! the squared amplitude:
//!
//! ```text
//! sta_i = csta * a_i^2 + (1 - csta) * sta_{i-1}     csta = 1 / nsta
//! lta_i = clta * a_i^2 + (1 - clta) * lta_{i-1}     clta = 1 / nlta
//! ```
//!
//! The fold starts at sample 1; sample 0 and every index below `nlta` are
//! reported as zero while the long average warms up.

use crate::error::{validate_windows, Result};

/// Starting value of the long term average, keeps the first ratio finite
const LTA_SEED: f64 = 1e-99;

/// Accumulator threaded through the forward pass
#[derive(Debug, Clone, Copy)]
struct RecursiveState {
    sta: f64,
    lta: f64,
}

impl RecursiveState {
    fn new() -> Self {
        Self { sta: 0.0, lta: LTA_SEED }
    }

    #[inline]
    fn update(&mut self, sample: f64, coeffs: &Coefficients) {
        let sq = sample * sample;
        self.sta = coeffs.csta * sq + coeffs.icsta * self.sta;
        self.lta = coeffs.clta * sq + coeffs.iclta * self.lta;
    }

    #[inline]
    fn ratio(&self) -> f64 {
        // Zero after underflow on a silent trace, NaN once a NaN sample arrives
        if self.lta > 0.0 {
            self.sta / self.lta
        } else {
            0.0
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct Coefficients {
    csta: f64,
    clta: f64,
    icsta: f64,
    iclta: f64,
}

impl Coefficients {
    fn new(nsta: usize, nlta: usize) -> Self {
        let csta = 1.0 / nsta as f64;
        let clta = 1.0 / nlta as f64;
        Self {
            csta,
            clta,
            icsta: 1.0 - csta,
            iclta: 1.0 - clta,
        }
    }
}

/// Recursive STA/LTA characteristic function.
///
/// # Arguments
///
/// * `waveform` - Seismic trace
/// * `nsta` - Length of the short time average window in samples
/// * `nlta` - Length of the long time average window in samples
///
/// # Errors
///
/// Returns `TriggerError::InvalidInput` for an empty trace or zero window length
pub fn recursive_sta_lta(waveform: &[f64], nsta: usize, nlta: usize) -> Result<Vec<f64>> {
    validate_windows(waveform, nsta, nlta)?;
    log::debug!(
        "recursive STA/LTA: {} samples, nsta={}, nlta={}",
        waveform.len(),
        nsta,
        nlta
    );

    let coeffs = Coefficients::new(nsta, nlta);

    let mut charfct = Vec::with_capacity(waveform.len());
    charfct.push(0.0);
    charfct.extend(
        waveform
            .iter()
            .enumerate()
            .skip(1)
            .scan(RecursiveState::new(), |state, (i, &sample)| {
                state.update(sample, &coeffs);
                Some(if i < nlta { 0.0 } else { state.ratio() })
            }),
    );

    Ok(charfct)
}

/// Sample-by-sample version of [`recursive_sta_lta`].
///
/// Kept as a plain indexed loop over two scalars; both versions produce the
/// same values and are cross-checked in tests.
pub fn recursive_sta_lta_elementwise(
    waveform: &[f64],
    nsta: usize,
    nlta: usize,
) -> Result<Vec<f64>> {
    validate_windows(waveform, nsta, nlta)?;

    let ndat = waveform.len();
    let csta = 1.0 / nsta as f64;
    let clta = 1.0 / nlta as f64;
    let icsta = 1.0 - csta;
    let iclta = 1.0 - clta;

    let mut sta = 0.0f64;
    let mut lta = LTA_SEED;
    let mut charfct = vec![0.0; ndat];

    for i in 1..ndat {
        let sq = waveform[i] * waveform[i];
        sta = csta * sq + icsta * sta;
        lta = clta * sq + iclta * lta;
        charfct[i] = if i >= nlta && lta > 0.0 { sta / lta } else { 0.0 };
    }

    Ok(charfct)
}
