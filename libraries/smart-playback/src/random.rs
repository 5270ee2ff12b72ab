//! Injectable randomness and time
//!
//! Smart-next selection and shuffle draw from a [`RandomSource`], and
//! recency/freshness signals read a [`Clock`], so both can be pinned in tests.

use chrono::{DateTime, Utc};
use rand::rngs::StdRng;
use rand::{Rng, RngCore, SeedableRng};

/// Source of uniform random numbers
pub trait RandomSource: Send {
    /// Uniform value in `[0, 1)`
    fn next_f64(&mut self) -> f64;
}

impl<R: RngCore + Send> RandomSource for R {
    fn next_f64(&mut self) -> f64 {
        self.gen::<f64>()
    }
}

/// Entropy-seeded generator used outside tests
pub fn default_random() -> Box<dyn RandomSource> {
    Box::new(StdRng::from_entropy())
}

/// Deterministic generator for reproducible runs
pub fn seeded_random(seed: u64) -> Box<dyn RandomSource> {
    Box::new(StdRng::seed_from_u64(seed))
}

/// Uniform index in `[0, len)`; `len` must be non-zero
pub(crate) fn random_index(rng: &mut dyn RandomSource, len: usize) -> usize {
    debug_assert!(len > 0);
    ((rng.next_f64() * len as f64) as usize).min(len - 1)
}

/// Wall clock abstraction
pub trait Clock: Send + Sync {
    /// Current time
    fn now(&self) -> DateTime<Utc>;
}

/// Clock backed by the system time
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Clock frozen at a fixed instant
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}
