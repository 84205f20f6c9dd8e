use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// A point counts as a hit when it lies inside or on the unit quarter circle.
pub fn is_hit(x: f64, y: f64) -> bool {
    x * x + y * y <= 1.0
}

/// Throws `count` darts at the unit square and returns how many land inside the
/// quarter circle. The result is always in `0..=count`.
pub fn throw_darts<R: Rng + ?Sized>(rng: &mut R, count: u64) -> u64 {
    let mut hits = 0;
    for _ in 0..count {
        let x: f64 = rng.gen();
        let y: f64 = rng.gen();
        if is_hit(x, y) {
            hits += 1;
        }
    }
    hits
}

/// Mixes the run seed with a worker index so every worker draws its own stream.
pub fn worker_seed(seed: u64, id: usize) -> u64 {
    let mut z = seed ^ (id as u64).wrapping_mul(0x9E37_79B9_7F4A_7C15);
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^ (z >> 31)
}

pub fn worker_rng(seed: u64, id: usize) -> ChaCha8Rng {
    ChaCha8Rng::seed_from_u64(worker_seed(seed, id))
}

/// Estimated value of pi from a hit/sample tally, with its error against a reference.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PiEstimate {
    pub approx: f64,
    pub reference: f64,
    /// Absolute error in percent of `reference`.
    pub error_pct: f64,
}

impl PiEstimate {
    pub fn new(hits: u64, samples: u64, reference: f64) -> Self {
        let approx = if samples == 0 {
            0.0
        } else {
            4.0 * hits as f64 / samples as f64
        };
        PiEstimate {
            approx,
            reference,
            error_pct: ((reference - approx) * (100.0 / reference)).abs(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn hit_boundaries() {
        assert!(is_hit(0.0, 0.0));
        assert!(!is_hit(1.0, 1.0));
        assert!(is_hit(1.0, 0.0));
        assert!(is_hit(0.0, 1.0));
        assert!(!is_hit(0.8, 0.8));
    }

    #[test]
    fn zero_darts_never_hit() {
        let mut rng = worker_rng(1, 0);
        assert_eq!(throw_darts(&mut rng, 0), 0);
    }

    #[test]
    fn same_seed_same_hits() {
        let a = throw_darts(&mut worker_rng(999, 2), 10_000);
        let b = throw_darts(&mut worker_rng(999, 2), 10_000);
        assert_eq!(a, b);
    }

    #[test]
    fn workers_get_distinct_streams() {
        assert_ne!(worker_seed(999, 0), worker_seed(999, 1));
        assert_ne!(worker_seed(999, 0), worker_seed(1000, 0));
    }

    #[test]
    fn estimate_is_reproducible() {
        let a = PiEstimate::new(785_398, 1_000_000, 3.14159);
        let b = PiEstimate::new(785_398, 1_000_000, 3.14159);
        assert_eq!(a.approx.to_bits(), b.approx.to_bits());
        assert_eq!(a.error_pct.to_bits(), b.error_pct.to_bits());
        assert!((a.approx - 3.141592).abs() < 1e-9);
    }

    #[test]
    fn estimate_of_empty_tally_is_zero() {
        let estimate = PiEstimate::new(0, 0, 3.14159);
        assert_eq!(estimate.approx, 0.0);
        assert!((estimate.error_pct - 100.0).abs() < 1e-9);
    }

    proptest! {
        #[test]
        fn hits_never_exceed_darts(seed in any::<u64>(), id in 0usize..64, count in 0u64..2_000) {
            let mut rng = worker_rng(seed, id);
            let hits = throw_darts(&mut rng, count);
            prop_assert!(hits <= count);
        }
    }
}
