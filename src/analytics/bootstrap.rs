// src/analytics/bootstrap.rs
use rand::Rng;

pub const DEFAULT_BOOTSTRAP_SAMPLES: usize = 1000;

/// Point estimate plus a 95% bootstrap interval.
/// All three fields are NaN when there was nothing to estimate from.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Estimate {
    pub mean: f64,
    pub lower: f64,
    pub upper: f64,
}

impl Estimate {
    pub fn undefined() -> Self {
        Self {
            mean: f64::NAN,
            lower: f64::NAN,
            upper: f64::NAN,
        }
    }

    pub fn is_defined(&self) -> bool {
        !self.mean.is_nan()
    }
}

/// Mean and 95% CI using a fresh thread-local generator.
/// This is what the service should call.
pub fn mean_ci95(values: &[f64], samples: usize) -> Estimate {
    let mut rng = rand::thread_rng();
    mean_ci95_with_rng(values, samples, &mut rng)
}

/// Mean and 95% CI drawing resample indices from `rng`.
/// - Empty input gives the undefined estimate.
/// - A single value is returned as-is for all three fields; `rng` is not touched.
pub fn mean_ci95_with_rng<R: Rng>(values: &[f64], samples: usize, rng: &mut R) -> Estimate {
    match values {
        [] => Estimate::undefined(),
        [only] => Estimate {
            mean: *only,
            lower: *only,
            upper: *only,
        },
        _ => {
            let means = resample_means(values, samples, rng);
            let mean = mean_of(values);
            match ci95_ranks(samples) {
                Some((lo, hi)) => Estimate {
                    mean,
                    lower: means[lo],
                    upper: means[hi],
                },
                None => Estimate {
                    mean,
                    lower: f64::NAN,
                    upper: f64::NAN,
                },
            }
        }
    }
}

/// Sorted means of `samples` with-replacement resamples of `values`.
pub fn resample_means<R: Rng>(values: &[f64], samples: usize, rng: &mut R) -> Vec<f64> {
    let n = values.len();
    let mut means = Vec::with_capacity(samples);
    if n == 0 {
        return means;
    }
    for _ in 0..samples {
        let total: f64 = (0..n).map(|_| values[rng.gen_range(0..n)]).sum();
        means.push(total / n as f64);
    }
    means.sort_by(f64::total_cmp);
    means
}

/// Ranks into the sorted resample means used for the interval bounds.
///
/// Lower is `floor(2.5% of samples) - 1` clamped at 0, upper is
/// `floor(97.5% of samples) - 1` clamped to the last rank; 1000 samples gives (24, 974).
/// `None` when there are no samples to index.
pub fn ci95_ranks(samples: usize) -> Option<(usize, usize)> {
    if samples == 0 {
        return None;
    }
    let count = samples as f64;
    let lower = ((0.025 * count).floor() as usize).saturating_sub(1);
    let upper = ((0.975 * count).floor() as usize)
        .saturating_sub(1)
        .min(samples - 1);
    Some((lower, upper))
}

fn mean_of(values: &[f64]) -> f64 {
    values.iter().sum::<f64>() / values.len() as f64
}
