use rand::Rng;

/// Sample from a standard normal distribution (mean 0, deviation 1)
pub fn gaussian<R: Rng + ?Sized>(rng: &mut R) -> f32 {
    // Box-Muller; 1 - u keeps the log argument in (0, 1]
    let u1: f32 = 1.0 - rng.gen::<f32>();
    let u2: f32 = rng.gen::<f32>();
    (-2.0 * u1.ln()).sqrt() * (2.0 * std::f32::consts::PI * u2).cos()
}

/// Uniform sample in `[low, low + span)`
pub fn spread<R: Rng + ?Sized>(rng: &mut R, low: f32, span: f32) -> f32 {
    low + span * rng.gen::<f32>()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_gaussian_is_finite() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..10_000 {
            assert!(gaussian(&mut rng).is_finite());
        }
    }

    #[test]
    fn test_gaussian_mean_near_zero() {
        let mut rng = StdRng::seed_from_u64(42);
        let n = 20_000;
        let mean: f32 = (0..n).map(|_| gaussian(&mut rng)).sum::<f32>() / n as f32;
        assert!(mean.abs() < 0.05, "mean was {}", mean);
    }

    #[test]
    fn test_spread_bounds() {
        let mut rng = StdRng::seed_from_u64(1);
        for _ in 0..1000 {
            let v = spread(&mut rng, -25.0, 50.0);
            assert!((-25.0..25.0).contains(&v));
        }
    }

    #[test]
    fn test_same_seed_same_sequence() {
        let mut a = StdRng::seed_from_u64(99);
        let mut b = StdRng::seed_from_u64(99);
        for _ in 0..100 {
            assert_eq!(gaussian(&mut a), gaussian(&mut b));
        }
    }
}
