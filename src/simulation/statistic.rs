use serde::Serialize;

/// Count, mean and sum of squared deviations of a sample, kept
/// incrementally (Welford) and combined in O(1) (Chan et al.).
/// Merging is associative, so workers can fold partial statistics
/// into the shared aggregate in any grouping.
#[derive(Debug, Default, Clone, Copy, PartialEq, Serialize)]
pub struct RunningStatistic {
    n: usize,
    mean: f64,
    m2: f64,
}

impl RunningStatistic {
    pub fn new() -> Self {
        Self::default()
    }
    pub fn push(&mut self, x: f64) {
        self.n += 1;
        let delta = x - self.mean;
        self.mean += delta / self.n as f64;
        self.m2 += delta * (x - self.mean);
    }
    pub fn merge(&mut self, other: &Self) {
        match (self.n, other.n) {
            (_, 0) => {}
            (0, _) => *self = *other,
            (a, b) => {
                let n = a + b;
                let delta = other.mean - self.mean;
                self.mean += delta * b as f64 / n as f64;
                self.m2 += other.m2 + delta * delta * (a as f64 * b as f64) / n as f64;
                self.n = n;
            }
        }
    }
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    pub fn count(&self) -> usize {
        self.n
    }
    pub fn mean(&self) -> f64 {
        self.mean
    }
    /// sample variance; zero below two samples
    pub fn variance(&self) -> f64 {
        match self.n {
            0 | 1 => 0.,
            n => self.m2 / (n - 1) as f64,
        }
    }
    pub fn stddev(&self) -> f64 {
        self.variance().sqrt()
    }
    /// standard error of the mean
    pub fn stderr(&self) -> f64 {
        match self.n {
            0 => 0.,
            n => self.stddev() / (n as f64).sqrt(),
        }
    }
}

impl FromIterator<f64> for RunningStatistic {
    fn from_iter<I: IntoIterator<Item = f64>>(iter: I) -> Self {
        iter.into_iter().fold(Self::new(), |mut stat, x| {
            stat.push(x);
            stat
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::Rng;
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    fn close(a: &RunningStatistic, b: &RunningStatistic) -> bool {
        a.count() == b.count()
            && (a.mean() - b.mean()).abs() < 1e-9
            && (a.variance() - b.variance()).abs() < 1e-9
    }

    #[test]
    fn matches_two_pass() {
        let xs = [2., 4., 4., 4., 5., 5., 7., 9.];
        let stat = xs.iter().copied().collect::<RunningStatistic>();
        assert_eq!(stat.count(), 8);
        assert!((stat.mean() - 5.).abs() < 1e-12);
        assert!((stat.variance() - 32. / 7.).abs() < 1e-12);
        assert!((stat.stderr() - (32f64 / 7.).sqrt() / 8f64.sqrt()).abs() < 1e-12);
    }

    #[test]
    fn merge_is_associative_and_commutative() {
        let ref mut rng = SmallRng::seed_from_u64(42);
        let xs = (0..300).map(|_| rng.random_range(-30..30) as f64).collect::<Vec<_>>();
        let a = xs[..50].iter().copied().collect::<RunningStatistic>();
        let b = xs[50..220].iter().copied().collect::<RunningStatistic>();
        let c = xs[220..].iter().copied().collect::<RunningStatistic>();
        let whole = xs.iter().copied().collect::<RunningStatistic>();
        let mut left = a;
        left.merge(&b);
        left.merge(&c);
        let mut bc = b;
        bc.merge(&c);
        let mut right = a;
        right.merge(&bc);
        let mut swapped = c;
        swapped.merge(&a);
        swapped.merge(&b);
        assert!(close(&left, &whole));
        assert!(close(&right, &whole));
        assert!(close(&swapped, &whole));
    }

    #[test]
    fn empty_and_single() {
        let mut stat = RunningStatistic::new();
        stat.merge(&RunningStatistic::new());
        assert_eq!(stat.count(), 0);
        stat.push(3.);
        assert_eq!(stat.variance(), 0.);
        assert_eq!(stat.stderr(), 0.);
        stat.clear();
        assert_eq!(stat, RunningStatistic::new());
    }
}
