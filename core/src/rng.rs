//! Deterministic random number generation.
//!
//! RULE: Nothing in the simulation may call any platform RNG.
//! All randomness flows through the single EntropySource owned by
//! the engine instance, seeded once from the run seed.
//!
//! Every sub-model draws from the same stream in the fixed execution
//! order documented in engine.rs. This means:
//!   - Same seed + same tick count = bit-identical trajectory.
//!   - Changing the number or order of draws in any sub-model
//!     changes every draw after it. Treat draw order as part of
//!     the model.

use crate::error::{SimError, SimResult};
use rand::SeedableRng;
use rand_pcg::Pcg64Mcg;
use std::collections::VecDeque;

/// A source of uniform draws in [0.0, 1.0).
///
/// Implementations report exhaustion or corruption as errors instead of
/// panicking so the engine can abort a tick without committing it.
pub trait EntropySource {
    /// Raw draw, expected in [0.0, 1.0).
    fn next_f64(&mut self) -> SimResult<f64>;

    /// Draw an integer in [0, n).
    fn next_u64_below(&mut self, n: u64) -> SimResult<u64>;

    /// Validated draw in [0.0, 1.0).
    fn unit(&mut self) -> SimResult<f64> {
        let value = self.next_f64()?;
        if (0.0..1.0).contains(&value) {
            Ok(value)
        } else {
            Err(SimError::EntropyCorrupted { value })
        }
    }

    /// Roll a float in [min, max). A degenerate range consumes no draw.
    fn uniform(&mut self, min: f64, max: f64) -> SimResult<f64> {
        if min == max {
            return Ok(min);
        }
        Ok(min + (max - min) * self.unit()?)
    }

    /// Bernoulli trial: returns true with probability p.
    fn chance(&mut self, p: f64) -> SimResult<bool> {
        Ok(self.unit()? < p)
    }
}

fn check_bound(n: u64) -> SimResult<()> {
    if n == 0 {
        return Err(SimError::InvalidConfig {
            reason: "integer draw requested from an empty range".into(),
        });
    }
    Ok(())
}

/// The production stream: a seeded PCG generator.
#[derive(Clone, Debug)]
pub struct PlanetRng {
    inner: Pcg64Mcg,
}

impl PlanetRng {
    pub fn new(seed: u64) -> Self {
        Self { inner: Pcg64Mcg::seed_from_u64(seed) }
    }
}

impl EntropySource for PlanetRng {
    fn next_f64(&mut self) -> SimResult<f64> {
        use rand::RngCore;
        let bits = self.inner.next_u64();
        Ok((bits >> 11) as f64 * (1.0 / (1u64 << 53) as f64))
    }

    fn next_u64_below(&mut self, n: u64) -> SimResult<u64> {
        use rand::RngCore;
        check_bound(n)?;
        Ok(self.inner.next_u64() % n)
    }
}

/// Replays a fixed list of draws, then reports exhaustion.
///
/// Used to pin down classification thresholds and to exercise the
/// abort path of a tick.
#[derive(Clone, Debug, Default)]
pub struct SequenceRng {
    draws: VecDeque<f64>,
}

impl SequenceRng {
    pub fn new(draws: impl IntoIterator<Item = f64>) -> Self {
        Self { draws: draws.into_iter().collect() }
    }

    pub fn remaining(&self) -> usize {
        self.draws.len()
    }
}

impl EntropySource for SequenceRng {
    fn next_f64(&mut self) -> SimResult<f64> {
        self.draws.pop_front().ok_or(SimError::EntropyExhausted)
    }

    fn next_u64_below(&mut self, n: u64) -> SimResult<u64> {
        check_bound(n)?;
        let u = self.unit()?;
        Ok(((u * n as f64) as u64).min(n - 1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_seed_same_stream() {
        let mut a = PlanetRng::new(12345);
        let mut b = PlanetRng::new(12345);
        for _ in 0..100 {
            assert_eq!(a.next_f64().unwrap().to_bits(), b.next_f64().unwrap().to_bits());
        }
    }

    #[test]
    fn uniform_stays_in_range() {
        let mut rng = PlanetRng::new(7);
        for _ in 0..1_000 {
            let v = rng.uniform(-10.0, 10.0).unwrap();
            assert!((-10.0..10.0).contains(&v), "draw out of range: {v}");
        }
    }

    #[test]
    fn degenerate_range_consumes_nothing() {
        let mut rng = SequenceRng::new([0.5]);
        assert_eq!(rng.uniform(3.0, 3.0).unwrap(), 3.0);
        assert_eq!(rng.remaining(), 1);
    }

    #[test]
    fn sequence_reports_exhaustion() {
        let mut rng = SequenceRng::new([0.25]);
        assert_eq!(rng.unit().unwrap(), 0.25);
        assert!(matches!(rng.unit(), Err(SimError::EntropyExhausted)));
    }

    #[test]
    fn out_of_range_draw_is_corruption() {
        let mut rng = SequenceRng::new([1.5, f64::NAN]);
        assert!(matches!(rng.unit(), Err(SimError::EntropyCorrupted { .. })));
        assert!(matches!(rng.unit(), Err(SimError::EntropyCorrupted { .. })));
    }

    #[test]
    fn empty_integer_range_is_an_error() {
        let mut rng = PlanetRng::new(3);
        assert!(matches!(rng.next_u64_below(0), Err(SimError::InvalidConfig { .. })));
        let mut rng = SequenceRng::new([0.5]);
        assert!(matches!(rng.next_u64_below(0), Err(SimError::InvalidConfig { .. })));
        assert_eq!(rng.remaining(), 1);
    }

    #[test]
    fn sequence_integer_draw_maps_onto_range() {
        let mut rng = SequenceRng::new([0.0, 0.999_999]);
        assert_eq!(rng.next_u64_below(30).unwrap(), 0);
        assert_eq!(rng.next_u64_below(30).unwrap(), 29);
    }
}
