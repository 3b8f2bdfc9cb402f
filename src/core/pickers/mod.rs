//! Native phase pickers
//!
//! Two compiled picker routines are treated as external collaborators:
//! - `ppick`: Baer-Kradolfer P-phase picker (BSSA vol. 77, 4, pp. 1437-1445)
//! - `ar_picker`: autoregressive P/S picker working on three components
//!
//! The crate only owns their call contracts. A backend implementing
//! [`NativePickers`] performs the raw call and reports the routine's status
//! code; [`pk_baer`] and [`ar_pick`] validate inputs, adapt sample types and
//! index conventions, and turn a non-zero status into
//! [`TriggerError::NativeRoutine`].

mod library;

use serde::{Deserialize, Serialize};

use crate::error::{Result, TriggerError};

pub use library::SharedLibraryPickers;

/// Routine name reported for Baer picker failures
pub const PPICK_ROUTINE: &str = "ppick";
/// Routine name reported for AR picker failures
pub const AR_PICKER_ROUTINE: &str = "ar_picker";

/// Tuning parameters of the Baer-Kradolfer picker
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BaerParams {
    /// If the trigger stays down longer than this many samples it is re-examined
    pub tdownmax: i32,
    /// Minimum number of samples above threshold for a pick to be accepted
    pub tupevent: i32,
    /// Threshold to trigger a pick
    pub thr1: f32,
    /// Threshold for updating sigma
    pub thr2: f32,
    /// Number of samples used to estimate the initial variance
    pub preset_len: i32,
    /// Samples over which the maximum amplitude is evaluated
    pub p_dur: i32,
}

/// Tuning parameters of the AR picker. Window lengths are in seconds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ArParams {
    /// Lower bandpass corner frequency
    pub f1: f32,
    /// Upper bandpass corner frequency
    pub f2: f32,
    pub lta_p: f32,
    pub sta_p: f32,
    pub lta_s: f32,
    pub sta_s: f32,
    /// AR model order for the P arrival
    pub m_p: i32,
    /// AR model order for the S arrival
    pub m_s: i32,
    /// Variance window for the P arrival
    pub l_p: f64,
    /// Variance window for the S arrival
    pub l_s: f64,
    /// Also pick the S phase
    pub s_pick: bool,
}

/// First motion direction reported by the Baer picker
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Polarity {
    Up,
    Down,
    Unknown,
}

impl Polarity {
    /// Parse the picker's first-motion code (`"U"`, `"D"`, blanks otherwise)
    pub fn from_code(code: &str) -> Self {
        match code.trim().chars().next() {
            Some('U') | Some('u') => Polarity::Up,
            Some('D') | Some('d') => Polarity::Down,
            _ => Polarity::Unknown,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            Polarity::Up => "U",
            Polarity::Down => "D",
            Polarity::Unknown => "",
        }
    }
}

/// Result of the Baer picker
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BaerPick {
    /// Sample index of the P arrival
    pub sample: usize,
    pub polarity: Polarity,
}

/// Result of the AR picker
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ArPick {
    pub p_time: f32,
    pub s_time: f32,
}

/// Status code and outputs of one native call
#[derive(Debug, Clone, PartialEq)]
pub struct NativeOutcome<T> {
    /// Zero on success
    pub status: i32,
    pub value: T,
}

/// Raw outputs of `ppick`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PpickOutput {
    /// 1-based arrival index as written by the routine
    pub pptime: i32,
    /// First-motion code
    pub pfm: String,
}

/// Raw outputs of `ar_picker`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArPickerOutput {
    pub ptime: f32,
    pub stime: f32,
}

/// Call surface of the native picker routines
pub trait NativePickers {
    /// Call `ppick` on `reltrc`. The routine indexes from 1 and reads `npts`
    /// samples after the first one.
    fn ppick(
        &self,
        reltrc: &[f32],
        npts: i32,
        samp_int: f32,
        params: &BaerParams,
    ) -> Result<NativeOutcome<PpickOutput>>;

    /// Call `ar_picker` on the vertical, north and east components
    fn ar_picker(
        &self,
        z: &[f32],
        n: &[f32],
        e: &[f32],
        samp_rate: f32,
        params: &ArParams,
    ) -> Result<NativeOutcome<ArPickerOutput>>;
}

fn check_status<T>(routine: &'static str, outcome: NativeOutcome<T>) -> Result<T> {
    if outcome.status != 0 {
        log::error!("{} returned status code {}", routine, outcome.status);
        return Err(TriggerError::NativeRoutine {
            routine,
            code: outcome.status,
        });
    }
    Ok(outcome.value)
}

fn to_f32(samples: &[f64]) -> Vec<f32> {
    samples.iter().map(|&s| s as f32).collect()
}

/// Baer-Kradolfer P picker.
///
/// # Arguments
///
/// * `backend` - Native routine provider
/// * `trace` - Filtered trace, converted to 32-bit floats for the call
/// * `samp_int` - Number of samples per second
/// * `params` - Picker tuning
///
/// The routine ignores sample 0, so the returned index is shifted by one to
/// address the full trace.
///
/// # Errors
///
/// `TriggerError::InvalidInput` for traces shorter than two samples or a
/// non-positive sampling rate, `TriggerError::NativeRoutine` on a non-zero status
pub fn pk_baer<B: NativePickers + ?Sized>(
    backend: &B,
    trace: &[f64],
    samp_int: f32,
    params: &BaerParams,
) -> Result<BaerPick> {
    if trace.len() < 2 {
        return Err(TriggerError::invalid(format!(
            "Baer picker needs at least 2 samples, got {}",
            trace.len()
        )));
    }
    if !(samp_int.is_finite() && samp_int > 0.0) {
        return Err(TriggerError::invalid(format!(
            "Invalid sampling rate for Baer picker: {}",
            samp_int
        )));
    }
    let npts = i32::try_from(trace.len() - 1)
        .map_err(|_| TriggerError::invalid("Trace too long for native picker"))?;

    let reltrc = to_f32(trace);
    let output = check_status(
        PPICK_ROUTINE,
        backend.ppick(&reltrc, npts, samp_int, params)?,
    )?;

    let sample = output
        .pptime
        .checked_add(1)
        .and_then(|shifted| usize::try_from(shifted).ok())
        .ok_or_else(|| {
            TriggerError::invalid(format!("ppick reported invalid arrival {}", output.pptime))
        })?;

    Ok(BaerPick {
        sample,
        polarity: Polarity::from_code(&output.pfm),
    })
}

/// Autoregressive P/S picker on three components.
///
/// # Errors
///
/// `TriggerError::InvalidInput` for empty or mismatched components or a
/// non-positive sampling rate, `TriggerError::NativeRoutine` on a non-zero status
pub fn ar_pick<B: NativePickers + ?Sized>(
    backend: &B,
    z: &[f64],
    n: &[f64],
    e: &[f64],
    samp_rate: f32,
    params: &ArParams,
) -> Result<ArPick> {
    if z.is_empty() {
        return Err(TriggerError::invalid("Empty vertical component"));
    }
    if n.len() != z.len() || e.len() != z.len() {
        return Err(TriggerError::invalid(format!(
            "Component lengths differ: Z={}, N={}, E={}",
            z.len(),
            n.len(),
            e.len()
        )));
    }
    if !(samp_rate.is_finite() && samp_rate > 0.0) {
        return Err(TriggerError::invalid(format!(
            "Invalid sampling rate for AR picker: {}",
            samp_rate
        )));
    }

    let output = check_status(
        AR_PICKER_ROUTINE,
        backend.ar_picker(&to_f32(z), &to_f32(n), &to_f32(e), samp_rate, params)?,
    )?;

    Ok(ArPick {
        p_time: output.ptime,
        s_time: output.stime,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    struct FakePickers {
        status: i32,
        last_npts: Cell<i32>,
    }

    impl FakePickers {
        fn new(status: i32) -> Self {
            Self {
                status,
                last_npts: Cell::new(-1),
            }
        }
    }

    impl NativePickers for FakePickers {
        fn ppick(
            &self,
            reltrc: &[f32],
            npts: i32,
            _samp_int: f32,
            _params: &BaerParams,
        ) -> Result<NativeOutcome<PpickOutput>> {
            self.last_npts.set(npts);
            // Report the largest sample as the arrival, 1-based past sample 0
            let peak = reltrc
                .iter()
                .enumerate()
                .skip(1)
                .fold((0, f32::MIN), |best, (i, &v)| if v > best.1 { (i, v) } else { best });
            Ok(NativeOutcome {
                status: self.status,
                value: PpickOutput {
                    pptime: peak.0 as i32 - 1,
                    pfm: "U    ".to_string(),
                },
            })
        }

        fn ar_picker(
            &self,
            z: &[f32],
            _n: &[f32],
            _e: &[f32],
            samp_rate: f32,
            _params: &ArParams,
        ) -> Result<NativeOutcome<ArPickerOutput>> {
            Ok(NativeOutcome {
                status: self.status,
                value: ArPickerOutput {
                    ptime: z.len() as f32 / samp_rate / 4.0,
                    stime: z.len() as f32 / samp_rate / 2.0,
                },
            })
        }
    }

    fn baer_params() -> BaerParams {
        BaerParams {
            tdownmax: 20,
            tupevent: 60,
            thr1: 7.0,
            thr2: 12.0,
            preset_len: 100,
            p_dur: 100,
        }
    }

    fn ar_params() -> ArParams {
        ArParams {
            f1: 1.0,
            f2: 20.0,
            lta_p: 1.0,
            sta_p: 0.1,
            lta_s: 4.0,
            sta_s: 1.0,
            m_p: 2,
            m_s: 8,
            l_p: 0.1,
            l_s: 0.2,
            s_pick: true,
        }
    }

    #[test]
    fn test_pk_baer_index_shift_and_polarity() {
        let mut trace = vec![0.0; 50];
        trace[30] = 9.0;
        let backend = FakePickers::new(0);
        let pick = pk_baer(&backend, &trace, 100.0, &baer_params()).unwrap();
        assert_eq!(pick.sample, 30);
        assert_eq!(pick.polarity, Polarity::Up);
        assert_eq!(backend.last_npts.get(), 49);
    }

    #[test]
    fn test_pk_baer_status_is_fatal() {
        let trace = vec![1.0; 10];
        let err = pk_baer(&FakePickers::new(2), &trace, 100.0, &baer_params()).unwrap_err();
        assert_eq!(
            err,
            TriggerError::NativeRoutine {
                routine: PPICK_ROUTINE,
                code: 2
            }
        );
    }

    #[test]
    fn test_pk_baer_rejects_bad_input() {
        let backend = FakePickers::new(0);
        assert!(pk_baer(&backend, &[1.0], 100.0, &baer_params()).is_err());
        assert!(pk_baer(&backend, &[1.0, 2.0], 0.0, &baer_params()).is_err());
    }

    /// Backend reporting a fixed arrival regardless of the trace
    struct FixedArrival(i32);

    impl NativePickers for FixedArrival {
        fn ppick(
            &self,
            _reltrc: &[f32],
            _npts: i32,
            _samp_int: f32,
            _params: &BaerParams,
        ) -> Result<NativeOutcome<PpickOutput>> {
            Ok(NativeOutcome {
                status: 0,
                value: PpickOutput {
                    pptime: self.0,
                    pfm: String::new(),
                },
            })
        }

        fn ar_picker(
            &self,
            _z: &[f32],
            _n: &[f32],
            _e: &[f32],
            _samp_rate: f32,
            _params: &ArParams,
        ) -> Result<NativeOutcome<ArPickerOutput>> {
            Ok(NativeOutcome {
                status: 0,
                value: ArPickerOutput {
                    ptime: 0.0,
                    stime: 0.0,
                },
            })
        }
    }

    #[test]
    fn test_pk_baer_out_of_range_arrival() {
        let trace = vec![1.0; 10];
        for pptime in [i32::MAX, -2, i32::MIN] {
            let result = pk_baer(&FixedArrival(pptime), &trace, 100.0, &baer_params());
            assert!(
                matches!(result, Err(TriggerError::InvalidInput(_))),
                "pptime {} gave {:?}",
                pptime,
                result
            );
        }
        // -1 is the routine's "before sample 1" and maps to sample 0
        let pick = pk_baer(&FixedArrival(-1), &trace, 100.0, &baer_params()).unwrap();
        assert_eq!(pick.sample, 0);
        assert_eq!(pick.polarity, Polarity::Unknown);
    }

    #[test]
    fn test_ar_pick() {
        let z = vec![0.0; 400];
        let backend = FakePickers::new(0);
        let pick = ar_pick(&backend, &z, &z, &z, 100.0, &ar_params()).unwrap();
        assert!((pick.p_time - 1.0).abs() < 1e-6);
        assert!((pick.s_time - 2.0).abs() < 1e-6);
    }

    #[test]
    fn test_ar_pick_errors() {
        let z = vec![0.0; 400];
        let short = vec![0.0; 399];
        let backend = FakePickers::new(0);
        assert!(ar_pick(&backend, &z, &short, &z, 100.0, &ar_params()).is_err());
        assert!(ar_pick(&backend, &[], &[], &[], 100.0, &ar_params()).is_err());

        let err = ar_pick(&FakePickers::new(-1), &z, &z, &z, 100.0, &ar_params()).unwrap_err();
        assert!(matches!(
            err,
            TriggerError::NativeRoutine { routine: "ar_picker", code: -1 }
        ));
    }

    #[test]
    fn test_polarity_codes() {
        assert_eq!(Polarity::from_code("D    "), Polarity::Down);
        assert_eq!(Polarity::from_code("  U"), Polarity::Up);
        assert_eq!(Polarity::from_code("     "), Polarity::Unknown);
        assert_eq!(Polarity::Down.code(), "D");
    }
}
