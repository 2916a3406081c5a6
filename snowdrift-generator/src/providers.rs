//! ready made [`Provider`](crate::config::Provider)s
//!
//! anything that can produce an i64 once works as a provider, these cover
//! the common sources.

use crate::config::Provider;
use crate::error::BoxError;

/// always returns the given value
pub fn fixed(value: i64) -> Provider<i64> {
    Box::new(move || Ok(value))
}

/// parses the named environment variable as an i64
///
/// ```rust
/// use snowdrift_generator::{Config, providers};
///
/// let config = Config::new()
///     .node_id_with(providers::from_env("SNOWDRIFT_NODE_ID"));
/// ```
pub fn from_env(key: impl Into<String>) -> Provider<i64> {
    let key = key.into();

    Box::new(move || {
        let value = std::env::var(&key)
            .map_err(|err| -> BoxError { format!("{}: {}", key, err).into() })?;

        value.trim()
            .parse::<i64>()
            .map_err(|err| -> BoxError { format!("{}: {}", key, err).into() })
    })
}
