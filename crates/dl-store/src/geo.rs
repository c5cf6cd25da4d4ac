//! Street geolocation: a seeded placeholder resolver and a retrying wrapper.

use std::thread;
use std::time::Duration;

use tracing::{debug, warn};

use dl_core::{CoreError, Location, SimRng};

use crate::{GeoClient, StoreResult};

// ── RandomGeoClient ───────────────────────────────────────────────────────────

/// Resolves every street to a random cell.  Deterministic for a given seed.
#[derive(Debug)]
pub struct RandomGeoClient {
    rng: SimRng,
}

impl RandomGeoClient {
    pub fn new(rng: SimRng) -> Self {
        Self { rng }
    }
}

impl GeoClient for RandomGeoClient {
    fn resolve(&mut self, street: &str) -> StoreResult<Location> {
        if street.trim().is_empty() {
            return Err(CoreError::ValueRequired("street").into());
        }
        let location = Location::random(&mut self.rng);
        debug!(street, %location, "street resolved");
        Ok(location)
    }
}

// ── RetryPolicy ───────────────────────────────────────────────────────────────

/// Bounded exponential backoff.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RetryPolicy {
    /// Total attempts including the first.  Zero behaves like one.
    pub max_attempts:    u32,
    pub initial_backoff: Duration,
    pub max_backoff:     Duration,
    pub multiplier:      f64,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts:    5,
            initial_backoff: Duration::from_secs(1),
            max_backoff:     Duration::from_secs(5),
            multiplier:      1.5,
        }
    }
}

impl RetryPolicy {
    /// `max_attempts` attempts with no sleeping in between.
    pub fn immediate(max_attempts: u32) -> Self {
        Self {
            max_attempts,
            initial_backoff: Duration::ZERO,
            max_backoff: Duration::ZERO,
            ..Self::default()
        }
    }

    /// Delay before retry number `retry` (1-based).
    pub fn backoff(&self, retry: u32) -> Duration {
        let exp = retry.saturating_sub(1).min(i32::MAX as u32) as i32;
        let secs = self.initial_backoff.as_secs_f64() * self.multiplier.powi(exp);
        Duration::try_from_secs_f64(secs)
            .unwrap_or(self.max_backoff)
            .min(self.max_backoff)
    }
}

// ── RetryingGeoClient ─────────────────────────────────────────────────────────

/// Retries the inner client on transient ([`StoreError::Unavailable`]) errors.
///
/// Any other error is returned immediately.  After the last attempt the last
/// transient error is returned.
///
/// [`StoreError::Unavailable`]: crate::StoreError::Unavailable
#[derive(Debug)]
pub struct RetryingGeoClient<G> {
    inner:  G,
    policy: RetryPolicy,
}

impl<G: GeoClient> RetryingGeoClient<G> {
    pub fn new(inner: G) -> Self {
        Self::with_policy(inner, RetryPolicy::default())
    }

    pub fn with_policy(inner: G, policy: RetryPolicy) -> Self {
        Self { inner, policy }
    }

    pub fn into_inner(self) -> G {
        self.inner
    }
}

impl<G: GeoClient> GeoClient for RetryingGeoClient<G> {
    fn resolve(&mut self, street: &str) -> StoreResult<Location> {
        let attempts = self.policy.max_attempts.max(1);
        let mut attempt = 1;
        loop {
            match self.inner.resolve(street) {
                Err(e) if e.is_transient() && attempt < attempts => {
                    let delay = self.policy.backoff(attempt);
                    warn!(street, attempt, ?delay, error = %e, "geolocation unavailable, retrying");
                    if !delay.is_zero() {
                        thread::sleep(delay);
                    }
                    attempt += 1;
                }
                result => return result,
            }
        }
    }
}
