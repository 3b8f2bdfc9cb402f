//! Picker routines loaded from a shared library at runtime
//!
//! The compiled pickers are resolved with `libloading`, so the crate builds
//! and runs without them; only callers that actually pick need the library.
//!
//! Expected C signatures:
//!
//! ```c
//! int ppick(float *reltrc, int npts, int *pptime, char *pfm, float samp_int,
//!           int tdownmax, int tupevent, float thr1, float thr2,
//!           int preset_len, int p_dur);
//!
//! int ar_picker(float *tr, float *tr_1, float *tr_2, int ndat, float sample_rate,
//!               float f1, float f2, float lta_p, float sta_p, float lta_s, float sta_s,
//!               int m_p, int m_s, float *ptime, float *stime,
//!               double l_p, double l_s, int s_pick);
//! ```

use std::ffi::{c_char, c_double, c_float, c_int, OsStr};

use libloading::{Library, Symbol};

use super::{
    ArParams, ArPickerOutput, BaerParams, NativeOutcome, NativePickers, PpickOutput,
    AR_PICKER_ROUTINE, PPICK_ROUTINE,
};
use crate::error::{Result, TriggerError};

type PpickFn = unsafe extern "C" fn(
    *const c_float,
    c_int,
    *mut c_int,
    *mut c_char,
    c_float,
    c_int,
    c_int,
    c_float,
    c_float,
    c_int,
    c_int,
) -> c_int;

type ArPickerFn = unsafe extern "C" fn(
    *const c_float,
    *const c_float,
    *const c_float,
    c_int,
    c_float,
    c_float,
    c_float,
    c_float,
    c_float,
    c_float,
    c_float,
    c_int,
    c_int,
    *mut c_float,
    *mut c_float,
    c_double,
    c_double,
    c_int,
) -> c_int;

const PPICK_SYMBOL: &[u8] = b"ppick\0";
const AR_PICKER_SYMBOL: &[u8] = b"ar_picker\0";

/// First-motion buffer: five blanks and a terminator
const PFM_LEN: usize = 6;

/// Native pickers resolved from a shared library
pub struct SharedLibraryPickers {
    lib: Library,
}

impl SharedLibraryPickers {
    /// Load the library at `path` and check that both routines are exported.
    ///
    /// # Safety
    ///
    /// Loading runs the library's initialisers, and the exported symbols must
    /// match the signatures documented at module level.
    pub unsafe fn load<P: AsRef<OsStr>>(path: P) -> Result<Self> {
        let lib = Library::new(path.as_ref())?;

        lib.get::<PpickFn>(PPICK_SYMBOL)
            .map_err(|e| TriggerError::LibraryLoad(format!("{}: {}", PPICK_ROUTINE, e)))?;
        lib.get::<ArPickerFn>(AR_PICKER_SYMBOL)
            .map_err(|e| TriggerError::LibraryLoad(format!("{}: {}", AR_PICKER_ROUTINE, e)))?;

        log::debug!("Loaded native pickers from {:?}", path.as_ref());
        Ok(Self { lib })
    }
}

impl NativePickers for SharedLibraryPickers {
    fn ppick(
        &self,
        reltrc: &[f32],
        npts: i32,
        samp_int: f32,
        params: &BaerParams,
    ) -> Result<NativeOutcome<PpickOutput>> {
        if usize::try_from(npts).map_or(true, |n| n >= reltrc.len()) {
            return Err(TriggerError::invalid(format!(
                "ppick: npts {} does not fit a trace of {} samples",
                npts,
                reltrc.len()
            )));
        }

        let mut pptime: c_int = 0;
        let mut pfm: [c_char; PFM_LEN] = [b' ' as c_char; PFM_LEN];
        pfm[PFM_LEN - 1] = 0;

        let status = unsafe {
            let func: Symbol<PpickFn> = self.lib.get(PPICK_SYMBOL)?;
            func(
                reltrc.as_ptr(),
                npts,
                &mut pptime,
                pfm.as_mut_ptr(),
                samp_int,
                params.tdownmax,
                params.tupevent,
                params.thr1,
                params.thr2,
                params.preset_len,
                params.p_dur,
            )
        };

        let code: Vec<u8> = pfm
            .iter()
            .take_while(|&&c| c != 0)
            .map(|&c| c as u8)
            .collect();

        Ok(NativeOutcome {
            status,
            value: PpickOutput {
                pptime,
                pfm: String::from_utf8_lossy(&code).into_owned(),
            },
        })
    }

    fn ar_picker(
        &self,
        z: &[f32],
        n: &[f32],
        e: &[f32],
        samp_rate: f32,
        params: &ArParams,
    ) -> Result<NativeOutcome<ArPickerOutput>> {
        if n.len() != z.len() || e.len() != z.len() {
            return Err(TriggerError::invalid("ar_picker: component lengths differ"));
        }
        let ndat = c_int::try_from(z.len())
            .map_err(|_| TriggerError::invalid("Trace too long for native picker"))?;

        let mut ptime: c_float = 0.0;
        let mut stime: c_float = 0.0;

        let status = unsafe {
            let func: Symbol<ArPickerFn> = self.lib.get(AR_PICKER_SYMBOL)?;
            func(
                z.as_ptr(),
                n.as_ptr(),
                e.as_ptr(),
                ndat,
                samp_rate,
                params.f1,
                params.f2,
                params.lta_p,
                params.sta_p,
                params.lta_s,
                params.sta_s,
                params.m_p,
                params.m_s,
                &mut ptime,
                &mut stime,
                params.l_p,
                params.l_s,
                c_int::from(params.s_pick),
            )
        };

        Ok(NativeOutcome {
            status,
            value: ArPickerOutput { ptime, stime },
        })
    }
}
