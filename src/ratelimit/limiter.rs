//! Keyed token-bucket limiter
//!
//! Every caller key owns an independent bucket with the same sustained rate
//! and burst size. Buckets live in a sharded concurrent map, so checks on
//! unrelated keys do not contend, and a check never blocks beyond taking a
//! shard lock.

use std::fmt::Display;
use std::hash::Hash;
use std::num::NonZeroU32;

use governor::{DefaultKeyedRateLimiter, Quota, RateLimiter};
use tracing::debug;

/// Admission control keyed by caller identity.
///
/// A key is cloned into the bucket map only the first time it is seen.
pub struct KeyedRateLimiter<K = String>
where
    K: Hash + Eq + Clone,
{
    limiter: DefaultKeyedRateLimiter<K>,
    requests_per_second: NonZeroU32,
    burst: NonZeroU32,
}

impl<K> KeyedRateLimiter<K>
where
    K: Hash + Eq + Clone + Display,
{
    /// Creates a limiter refilling `requests_per_second` tokens per second
    /// up to `burst`. Zero values are raised to one.
    pub fn new(requests_per_second: u32, burst: u32) -> Self {
        let requests_per_second = NonZeroU32::new(requests_per_second).unwrap_or(NonZeroU32::MIN);
        let burst = NonZeroU32::new(burst).unwrap_or(NonZeroU32::MIN);
        let quota = Quota::per_second(requests_per_second).allow_burst(burst);

        Self {
            limiter: RateLimiter::keyed(quota),
            requests_per_second,
            burst,
        }
    }

    // == Admit ==
    /// Consumes one token from `key`'s bucket.
    ///
    /// An unseen key starts with a full bucket. Returns false when the bucket
    /// is empty; the caller must reject, not retry.
    pub fn admit(&self, key: &K) -> bool {
        let allowed = self.limiter.check_key(key).is_ok();
        if !allowed {
            debug!(caller = %key, "rate limit exceeded");
        }
        allowed
    }

    // == Sweep ==
    /// Drops buckets that have refilled completely since their last use.
    ///
    /// Such a bucket is indistinguishable from a fresh one, so forgetting it
    /// changes no admission decision. Returns the number of keys removed.
    pub fn sweep(&self) -> usize {
        let before = self.limiter.len();
        self.limiter.retain_recent();
        self.limiter.shrink_to_fit();
        before.saturating_sub(self.limiter.len())
    }

    /// Number of caller keys currently tracked.
    pub fn len(&self) -> usize {
        self.limiter.len()
    }

    pub fn is_empty(&self) -> bool {
        self.limiter.is_empty()
    }

    pub fn requests_per_second(&self) -> u32 {
        self.requests_per_second.get()
    }

    pub fn burst(&self) -> u32 {
        self.burst.get()
    }
}

impl<K> std::fmt::Debug for KeyedRateLimiter<K>
where
    K: Hash + Eq + Clone,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KeyedRateLimiter")
            .field("requests_per_second", &self.requests_per_second)
            .field("burst", &self.burst)
            .field("keys", &self.limiter.len())
            .finish()
    }
}
