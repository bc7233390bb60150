//! Initial state generators

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::WorldError;

/// Default probability that a cell starts alive
pub const DEFAULT_DENSITY: f64 = 0.1;

/// Bernoulli cell generator
///
/// Each call returns `true` with probability `density`. A fixed `seed` makes
/// the sequence reproducible; `None` seeds from the OS.
pub fn bernoulli(density: f64, seed: Option<u64>) -> Result<impl FnMut() -> bool, WorldError> {
    if !(0.0..=1.0).contains(&density) {
        return Err(WorldError::InvalidDensity(density));
    }
    let mut rng = match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };
    Ok(move || rng.random_bool(density))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_density_never_alive() {
        let mut draw = bernoulli(0.0, Some(1)).unwrap();
        assert!((0..1000).all(|_| !draw()));
    }

    #[test]
    fn test_full_density_always_alive() {
        let mut draw = bernoulli(1.0, Some(1)).unwrap();
        assert!((0..1000).all(|_| draw()));
    }

    #[test]
    fn test_seeded_is_reproducible() {
        let mut a = bernoulli(0.3, Some(42)).unwrap();
        let mut b = bernoulli(0.3, Some(42)).unwrap();
        let run_a: Vec<bool> = (0..256).map(|_| a()).collect();
        let run_b: Vec<bool> = (0..256).map(|_| b()).collect();
        assert_eq!(run_a, run_b);
    }

    #[test]
    fn test_density_roughly_respected() {
        let mut draw = bernoulli(0.1, Some(7)).unwrap();
        let alive = (0..10_000).filter(|_| draw()).count();
        assert!((700..1300).contains(&alive), "got {alive} live cells");
    }

    #[test]
    fn test_invalid_density_rejected() {
        assert!(matches!(bernoulli(-0.1, None), Err(WorldError::InvalidDensity(_))));
        assert!(matches!(bernoulli(1.1, None), Err(WorldError::InvalidDensity(_))));
        assert!(matches!(bernoulli(f64::NAN, None), Err(WorldError::InvalidDensity(_))));
    }
}
