//! Configuration Module
//!
//! Describes how a cache instance is built: capacity, default expiration and
//! eviction policy. Values can come from serde, environment variables or code.

use std::env;
use std::fmt;
use std::num::NonZeroUsize;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::cache::{Ttl, DEFAULT_CAPACITY, DEFAULT_EXPIRE};
use crate::error::{CacheError, Result};

// == Eviction Policy ==
/// Strategy used to pick the entry displaced when the cache is full.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EvictionPolicy {
    /// Least recently used (reads and writes refresh an entry)
    #[default]
    Lru,
    /// First in, first out (only writes refresh an entry)
    Fifo,
}

impl FromStr for EvictionPolicy {
    type Err = CacheError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "lru" => Ok(EvictionPolicy::Lru),
            "fifo" => Ok(EvictionPolicy::Fifo),
            _ => Err(CacheError::UnknownPolicy(s.to_string())),
        }
    }
}

impl fmt::Display for EvictionPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EvictionPolicy::Lru => f.write_str("lru"),
            EvictionPolicy::Fifo => f.write_str("fifo"),
        }
    }
}

/// Cache configuration parameters.
///
/// Missing fields fall back to the defaults when deserialized.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Maximum number of entries the cache can hold
    pub capacity: usize,
    /// Default TTL in seconds for `set`, or `NO_EXPIRE` (-1)
    pub expire: i64,
    /// Eviction policy
    pub eviction_policy: EvictionPolicy,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `CACHE_CAPACITY` - Maximum cache entries (default: 100)
    /// - `CACHE_EXPIRE` - Default TTL in seconds, -1 for none (default: 1200)
    /// - `CACHE_EVICTION_POLICY` - `lru` or `fifo` (default: lru)
    ///
    /// Unparsable numbers fall back to their default; an unknown policy is an error.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let eviction_policy = match lookup("CACHE_EVICTION_POLICY") {
            Some(raw) => raw.parse()?,
            None => defaults.eviction_policy,
        };

        Ok(Self {
            capacity: parse_or(&lookup, "CACHE_CAPACITY", defaults.capacity),
            expire: parse_or(&lookup, "CACHE_EXPIRE", defaults.expire),
            eviction_policy,
        })
    }

    /// Checks that the values describe a buildable cache.
    pub fn validate(&self) -> Result<()> {
        self.resolve().map(|_| ())
    }

    /// Converts the raw values into the types the engines take.
    pub(crate) fn resolve(&self) -> Result<(NonZeroUsize, Ttl)> {
        let capacity = NonZeroUsize::new(self.capacity)
            .ok_or_else(|| CacheError::InvalidConfig("capacity must be positive".to_string()))?;

        let ttl = Ttl::from_secs(self.expire).ok_or_else(|| {
            CacheError::InvalidConfig(format!(
                "expire must be non-negative or -1, got {}",
                self.expire
            ))
        })?;

        Ok((capacity, ttl))
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            capacity: DEFAULT_CAPACITY,
            expire: DEFAULT_EXPIRE,
            eviction_policy: EvictionPolicy::default(),
        }
    }
}

fn parse_or<F, T>(lookup: &F, name: &str, default: T) -> T
where
    F: Fn(&str) -> Option<String>,
    T: FromStr + fmt::Display,
{
    match lookup(name) {
        Some(raw) => raw.trim().parse().unwrap_or_else(|_| {
            warn!(variable = name, value = %raw, fallback = %default, "ignoring unparsable config value");
            default
        }),
        None => default,
    }
}
