// tests/test_utils/mod.rs
//
// Shared helpers for integration tests: logger setup and deterministic
// synthetic traces.

#![allow(dead_code)]

/// Route `log` output through env_logger, once per test binary
pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Constant-amplitude trace
pub fn constant(len: usize, value: f64) -> Vec<f64> {
    vec![value; len]
}

/// Deterministic uniform noise in `[-amplitude, amplitude]` (64-bit LCG)
pub fn pseudo_noise(len: usize, seed: u64, amplitude: f64) -> Vec<f64> {
    let mut state = seed.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
    (0..len)
        .map(|_| {
            state = state
                .wrapping_mul(6364136223846793005)
                .wrapping_add(1442695040888963407);
            let unit = (state >> 11) as f64 / (1u64 << 53) as f64;
            (unit * 2.0 - 1.0) * amplitude
        })
        .collect()
}

/// Low-level noise with a sinusoidal burst on `[start, stop)`
pub fn noise_with_burst(len: usize, start: usize, stop: usize, burst_amplitude: f64) -> Vec<f64> {
    let mut trace = pseudo_noise(len, 7, 0.1);
    for (i, sample) in trace.iter_mut().enumerate().take(stop.min(len)).skip(start) {
        *sample += burst_amplitude * ((i as f64) * 0.8).sin();
    }
    trace
}

/// The two-event characteristic function used by the trigger scenarios
pub fn two_event_charfct() -> Vec<f64> {
    vec![0.0, 0.0, 2.0, 2.0, 2.0, 0.0, 0.0, 2.0, 2.0, 2.0, 0.0, 0.0]
}
