//! Cache Entry Module
//!
//! Defines individual cache entries and the relative/absolute expiration types.

use std::time::{Duration, Instant};

use crate::cache::NO_EXPIRE;

// == Time To Live ==
/// Relative lifetime requested for an entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Ttl {
    /// The entry never expires
    Never,
    /// The entry expires once this much time has passed since the write
    After(Duration),
}

impl Ttl {
    /// Converts a seconds value using the `NO_EXPIRE` (-1) sentinel.
    ///
    /// Returns `None` for negative values other than the sentinel.
    pub fn from_secs(secs: i64) -> Option<Self> {
        match secs {
            NO_EXPIRE => Some(Ttl::Never),
            s if s >= 0 => Some(Ttl::After(Duration::from_secs(s as u64))),
            _ => None,
        }
    }

    /// Resolves this TTL into an absolute expiry relative to `now`.
    ///
    /// A TTL too large for `Instant` is halved until it fits, so it lands on
    /// a far-future instant; a finite TTL never becomes [`Expiry::Never`].
    pub fn expire_at(self, now: Instant) -> Expiry {
        match self {
            Ttl::Never => Expiry::Never,
            Ttl::After(mut ttl) => loop {
                if let Some(at) = now.checked_add(ttl) {
                    break Expiry::At(at);
                }
                ttl /= 2;
            },
        }
    }
}

// == Expiry ==
/// Absolute expiration marker stored on an entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Expiry {
    /// Never expires
    Never,
    /// Expires at this instant
    At(Instant),
}

impl Expiry {
    // == Is Elapsed ==
    /// Checks whether the expiry has passed as of `now`.
    ///
    /// Boundary condition: an entry is expired once `now >= expire_at`, so a
    /// zero TTL is expired immediately.
    pub fn is_elapsed(&self, now: Instant) -> bool {
        match self {
            Expiry::Never => false,
            Expiry::At(at) => now >= *at,
        }
    }
}

// == Cache Entry ==
/// A single cache entry: key, value and expiration marker.
#[derive(Debug, Clone, PartialEq)]
pub struct Entry<V> {
    pub(crate) key: String,
    pub(crate) value: V,
    pub(crate) expire_at: Expiry,
}

impl<V> Entry<V> {
    pub(crate) fn new(key: String, value: V, expire_at: Expiry) -> Self {
        Self {
            key,
            value,
            expire_at,
        }
    }

    /// The entry's key.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// The stored value.
    pub fn value(&self) -> &V {
        &self.value
    }

    /// Absolute expiration marker, `Expiry::Never` when the entry has no TTL.
    pub fn expire_at(&self) -> Expiry {
        self.expire_at
    }

    /// Returns true if the entry's TTL has elapsed as of `now`.
    pub fn is_expired(&self, now: Instant) -> bool {
        self.expire_at.is_elapsed(now)
    }

    // == Time To Live ==
    /// Returns remaining lifetime as of `now`, or None if the entry never expires.
    ///
    /// # Returns
    /// - `Some(Duration::ZERO)` if the entry has expired
    /// - `Some(remaining)` if the entry has a TTL and hasn't expired
    /// - `None` if the entry never expires
    pub fn ttl_remaining(&self, now: Instant) -> Option<Duration> {
        match self.expire_at {
            Expiry::Never => None,
            Expiry::At(at) => Some(at.saturating_duration_since(now)),
        }
    }
}
