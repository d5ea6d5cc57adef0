//! Loaders that wrap another loader without changing its interface.

use std::time::Duration;

use async_trait::async_trait;
use parking_lot::Mutex;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use tracing::debug;

use crate::config::FaultConfig;
use crate::domain::{Episode, Page};
use crate::loader::{LoadError, Loader};

/// The draw in `[1, failure_one_in]` that triggers a failure.
const FAILURE_SENTINEL: u32 = 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FaultPolicy {
    /// Fail roughly once every `failure_one_in` loads. 0 never fails.
    pub failure_one_in: u32,
    /// Upper bound of the uniform latency added before delegating.
    pub max_delay: Duration,
}

impl Default for FaultPolicy {
    fn default() -> Self {
        Self {
            failure_one_in: 10,
            max_delay: Duration::from_secs(1),
        }
    }
}

impl From<&FaultConfig> for FaultPolicy {
    fn from(config: &FaultConfig) -> Self {
        Self {
            failure_one_in: config.failure_one_in,
            max_delay: config.max_delay(),
        }
    }
}

/// Randomly fails or delays loads to exercise retry paths.
///
/// A failing draw returns [`LoadError::Simulated`] immediately, without
/// touching the inner loader. Otherwise the load sleeps for a random duration
/// up to `max_delay` and returns the inner result unchanged.
pub struct FaultInjecting<L> {
    inner: L,
    policy: FaultPolicy,
    rng: Mutex<StdRng>,
}

impl<L> FaultInjecting<L> {
    pub fn new(inner: L, policy: FaultPolicy) -> Self {
        Self::with_rng(inner, policy, StdRng::from_entropy())
    }

    pub fn seeded(inner: L, policy: FaultPolicy, seed: u64) -> Self {
        Self::with_rng(inner, policy, StdRng::seed_from_u64(seed))
    }

    fn with_rng(inner: L, policy: FaultPolicy, rng: StdRng) -> Self {
        Self {
            inner,
            policy,
            rng: Mutex::new(rng),
        }
    }

    /// Draws the outcome for one load: `None` to fail, otherwise the delay.
    fn draw(&self) -> Option<Duration> {
        let mut rng = self.rng.lock();

        if self.policy.failure_one_in > 0
            && rng.gen_range(1..=self.policy.failure_one_in) == FAILURE_SENTINEL
        {
            return None;
        }

        if self.policy.max_delay.is_zero() {
            return Some(Duration::ZERO);
        }
        Some(self.policy.max_delay.mul_f64(rng.gen_range(0.0..=1.0)))
    }
}

#[async_trait]
impl<L> Loader for FaultInjecting<L>
where
    L: Loader,
{
    type Item = L::Item;

    async fn load(&self) -> Result<Self::Item, LoadError> {
        let Some(delay) = self.draw() else {
            debug!("Injecting simulated load failure");
            return Err(LoadError::Simulated);
        };

        if !delay.is_zero() {
            debug!("Injecting {:?} of latency", delay);
            tokio::time::sleep(delay).await;
        }

        self.inner.load().await
    }
}

/// Shuffles one sub-collection of every item in a loaded page.
///
/// Page-level order and every other field pass through unchanged.
pub struct ShuffleEach<L, T, U> {
    inner: L,
    field: fn(&mut T) -> &mut Vec<U>,
    rng: Mutex<StdRng>,
}

impl<L, T, U> ShuffleEach<L, T, U> {
    pub fn new(inner: L, field: fn(&mut T) -> &mut Vec<U>) -> Self {
        Self {
            inner,
            field,
            rng: Mutex::new(StdRng::from_entropy()),
        }
    }

    pub fn seeded(inner: L, field: fn(&mut T) -> &mut Vec<U>, seed: u64) -> Self {
        Self {
            inner,
            field,
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }
}

impl<L> ShuffleEach<L, Episode, url::Url> {
    /// Shuffles each episode's character references.
    pub fn characters(inner: L) -> Self {
        Self::new(inner, episode_characters)
    }
}

fn episode_characters(episode: &mut Episode) -> &mut Vec<url::Url> {
    &mut episode.characters
}

#[async_trait]
impl<L, T, U> Loader for ShuffleEach<L, T, U>
where
    L: Loader<Item = Page<T>>,
    T: Send,
    U: Send + Sync,
{
    type Item = Page<T>;

    async fn load(&self) -> Result<Page<T>, LoadError> {
        let mut page = self.inner.load().await?;

        let mut rng = self.rng.lock();
        for item in &mut page.results {
            (self.field)(item).shuffle(&mut *rng);
        }

        Ok(page)
    }
}
