use super::statistic::RunningStatistic;
use crate::Confidence;
use serde::Serialize;

/// Two-sided normal quantile for a confidence level in percent,
/// e.g. 95.0 gives about 1.96.
pub fn z(confidence: Confidence) -> f64 {
    let p = 1. - (1. - confidence / 100.) / 2.;
    quantile(p)
}

/// Inverse of the standard normal CDF, by Acklam's rational
/// approximation (relative error below 1.2e-9).
fn quantile(p: f64) -> f64 {
    const A: [f64; 6] = [
        -3.969683028665376e+01,
        2.209460984245205e+02,
        -2.759285104469687e+02,
        1.383577518672690e+02,
        -3.066479806614716e+01,
        2.506628277459239e+00,
    ];
    const B: [f64; 5] = [
        -5.447609879822406e+01,
        1.615858368580409e+02,
        -1.556989798598866e+02,
        6.680131188771972e+01,
        -1.328068155288572e+01,
    ];
    const C: [f64; 6] = [
        -7.784894002430293e-03,
        -3.223964580411365e-01,
        -2.400758277161838e+00,
        -2.549732539343734e+00,
        4.374664141464968e+00,
        2.938163982698783e+00,
    ];
    const D: [f64; 4] = [
        7.784695709041462e-03,
        3.224671290700398e-01,
        2.445134137142996e+00,
        3.754408661907416e+00,
    ];
    const LOW: f64 = 0.02425;
    let tail = |q: f64| {
        (((((C[0] * q + C[1]) * q + C[2]) * q + C[3]) * q + C[4]) * q + C[5])
            / ((((D[0] * q + D[1]) * q + D[2]) * q + D[3]) * q + 1.)
    };
    match p {
        p if p <= 0. => f64::NEG_INFINITY,
        p if p >= 1. => f64::INFINITY,
        p if p < LOW => tail((-2. * p.ln()).sqrt()),
        p if p > 1. - LOW => -tail((-2. * (1. - p).ln()).sqrt()),
        p => {
            let q = p - 0.5;
            let r = q * q;
            (((((A[0] * r + A[1]) * r + A[2]) * r + A[3]) * r + A[4]) * r + A[5]) * q
                / (((((B[0] * r + B[1]) * r + B[2]) * r + B[3]) * r + B[4]) * r + 1.)
        }
    }
}

/// mean ± z standard errors
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Interval {
    pub mean: f64,
    pub half: f64,
    pub n: usize,
}

impl Interval {
    pub fn new(stat: &RunningStatistic, confidence: Confidence) -> Self {
        Self {
            mean: stat.mean(),
            half: z(confidence) * stat.stderr(),
            n: stat.count(),
        }
    }
    pub fn lo(&self) -> f64 {
        self.mean - self.half
    }
    pub fn hi(&self) -> f64 {
        self.mean + self.half
    }
}

impl std::fmt::Display for Interval {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self.n {
            0 | 1 => write!(f, "{:+.4}", self.mean),
            _ => write!(f, "{:+.4} ± {:.4}", self.mean, self.half),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn familiar_quantiles() {
        assert!((z(95.) - 1.959964).abs() < 1e-5);
        assert!((z(99.) - 2.575829).abs() < 1e-5);
        assert!((z(68.2689492) - 1.).abs() < 1e-5);
        assert!((z(99.99) - 3.890592).abs() < 1e-5);
    }

    #[test]
    fn single_sample_has_no_interval() {
        let stat = [2.5].into_iter().collect::<RunningStatistic>();
        let interval = Interval::new(&stat, 95.);
        assert_eq!(interval.half, 0.);
        assert_eq!(interval.to_string(), "+2.5000");
        let stat = [1., 3.].into_iter().collect::<RunningStatistic>();
        let interval = Interval::new(&stat, 95.);
        assert!(interval.lo() < 2. && interval.hi() > 2.);
        assert!(interval.to_string().contains('±'));
    }
}
