//! Windowed and global statistics over sample sequences

/// Square every sample
pub fn squared(samples: &[f64]) -> Vec<f64> {
    samples.iter().map(|s| s * s).collect()
}

/// Causal trailing window sum.
///
/// `out[t]` is the sum of `values[t + 1 - window ..= t]`. Any index below zero
/// contributes `pad` instead of a sample. The window slides in linear time and
/// is re-summed from scratch every `window` samples, so rounding error never
/// outlives the samples that caused it.
pub fn trailing_sum(values: &[f64], window: usize, pad: f64) -> Vec<f64> {
    if window == 0 {
        return vec![0.0; values.len()];
    }

    let mut sums = Vec::with_capacity(values.len());
    let mut acc = 0.0f64;
    for (t, &v) in values.iter().enumerate() {
        let end = t + 1;
        if end >= window && (end - window) % window == 0 {
            acc = values[end - window..end].iter().sum();
        } else {
            acc += v;
            if end > window {
                acc -= values[end - window - 1];
            }
        }

        if end >= window {
            sums.push(acc);
        } else {
            // Window reaches `window - end` samples before the trace start
            sums.push(acc + pad * (window - end) as f64);
        }
    }
    sums
}

/// Causal trailing window mean, see [`trailing_sum`] for the padding rule
pub fn trailing_mean(values: &[f64], window: usize, pad: f64) -> Vec<f64> {
    let scale = 1.0 / window.max(1) as f64;
    trailing_sum(values, window, pad)
        .into_iter()
        .map(|s| s * scale)
        .collect()
}

/// Trailing mean of squared amplitude with the given padding value
pub fn trailing_mean_of_squares(samples: &[f64], window: usize, pad: f64) -> Vec<f64> {
    trailing_mean(&squared(samples), window, pad)
}

/// Population mean and standard deviation.
///
/// Returns `(0.0, 0.0)` for empty input.
pub fn mean_std(values: &[f64]) -> (f64, f64) {
    if values.is_empty() {
        return (0.0, 0.0);
    }

    let n = values.len() as f64;
    let mean = values.iter().sum::<f64>() / n;
    let variance = values.iter().map(|v| (v - mean) * (v - mean)).sum::<f64>() / n;

    (mean, variance.sqrt())
}

/// Largest value of a slice, ignoring NaN. `None` if nothing comparable is present.
pub fn max_value(values: &[f64]) -> Option<f64> {
    values
        .iter()
        .copied()
        .filter(|v| !v.is_nan())
        .fold(None, |acc: Option<f64>, v| Some(acc.map_or(v, |a| a.max(v))))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trailing_sum_zero_pad() {
        let values = vec![1.0, 2.0, 3.0, 4.0, 5.0];
        let sums = trailing_sum(&values, 3, 0.0);
        assert_eq!(sums, vec![1.0, 3.0, 6.0, 9.0, 12.0]);
    }

    #[test]
    fn test_trailing_sum_one_pad() {
        let values = vec![1.0, 2.0, 3.0, 4.0];
        let sums = trailing_sum(&values, 3, 1.0);
        // t=0: 1 + 1 + 1, t=1: 1 + 1 + 2
        assert_eq!(sums, vec![3.0, 4.0, 6.0, 9.0]);
    }

    #[test]
    fn test_trailing_sum_forgets_loud_history() {
        // Quiet samples following values many orders of magnitude larger
        let mut values: Vec<f64> = (0..500).map(|i| 1e14 * (1.0 + (i % 7) as f64)).collect();
        values.extend((0..1000).map(|i| 0.25 + 0.01 * (i % 13) as f64));

        let window = 20;
        let sums = trailing_sum(&values, window, 0.0);
        for t in 520..values.len() {
            let direct: f64 = values[t + 1 - window..=t].iter().sum();
            assert!(
                (sums[t] - direct).abs() < 1e-9,
                "t={}: {} vs {}",
                t,
                sums[t],
                direct
            );
        }
    }

    #[test]
    fn test_trailing_window_longer_than_input() {
        let values = vec![2.0, 2.0];
        let means = trailing_mean(&values, 4, 0.0);
        assert!((means[0] - 0.5).abs() < 1e-12);
        assert!((means[1] - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_trailing_mean_of_squares() {
        let samples = vec![-2.0, 2.0, -2.0, 2.0];
        let means = trailing_mean_of_squares(&samples, 2, 0.0);
        assert_eq!(means, vec![2.0, 4.0, 4.0, 4.0]);
    }

    #[test]
    fn test_mean_std() {
        let (mean, std) = mean_std(&[2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0]);
        assert!((mean - 5.0).abs() < 1e-12);
        assert!((std - 2.0).abs() < 1e-12);

        let (mean, std) = mean_std(&[3.0; 16]);
        assert_eq!(mean, 3.0);
        assert_eq!(std, 0.0);
    }

    #[test]
    fn test_max_value_skips_nan() {
        assert_eq!(max_value(&[1.0, f64::NAN, 3.0, 2.0]), Some(3.0));
        assert_eq!(max_value(&[f64::NAN]), None);
        assert_eq!(max_value(&[]), None);
    }
}
