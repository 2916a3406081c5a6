//! generator configuration
//!
//! [`Config`] is what a generator is built from. [`Settings`] is a plain data
//! version of it (with the `serde` feature) for loading from files or the
//! environment.

use std::fmt;
use std::time::Duration;

use crate::error::BoxError;
use crate::providers;

/// lazily resolved configuration value
///
/// called once during construction. an error is surfaced as
/// [`Error::Provider`](crate::error::Error::Provider)
pub type Provider<T> = Box<dyn FnOnce() -> Result<T, BoxError> + Send>;

/// configuration for [`Generator`](crate::Generator) and
/// [`MutexGenerator`](crate::sync::MutexGenerator)
///
/// ```rust
/// use std::time::Duration;
/// use snowdrift_generator::Config;
///
/// let config = Config::new()
///     .start_time(1679587200000)
///     .max_tolerate_millis(10)
///     .max_spin(Duration::from_millis(50))
///     .node_id(7);
/// ```
#[derive(Default)]
pub struct Config {
    /// epoch in milliseconds since UNIX epoch. defaults to
    /// [`DEFAULT_START_TIME`](snowdrift_flake::DEFAULT_START_TIME)
    pub start_time: Option<i64>,

    /// how far, in milliseconds, the clock may fall behind the last used
    /// millisecond before generating fails instead of waiting
    pub max_tolerate_millis: i64,

    /// upper bound on how long a call may spin waiting for the clock. `None`
    /// spins until the clock advances
    pub max_spin: Option<Duration>,

    /// milliseconds since UNIX epoch of the last id issued by a previous run.
    /// a value of `0` is treated as absent
    pub last_generate_time: Option<Provider<i64>>,

    /// node id for this generator. defaults to `0`
    pub node_id: Option<Provider<i64>>,
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    /// sets the epoch in milliseconds since UNIX epoch
    pub fn start_time(mut self, millis: i64) -> Self {
        self.start_time = Some(millis);
        self
    }

    pub fn max_tolerate_millis(mut self, millis: i64) -> Self {
        self.max_tolerate_millis = millis;
        self
    }

    pub fn max_spin(mut self, dur: Duration) -> Self {
        self.max_spin = Some(dur);
        self
    }

    /// uses a fixed node id
    pub fn node_id(self, node_id: i64) -> Self {
        self.node_id_with(providers::fixed(node_id))
    }

    /// resolves the node id from the given provider
    pub fn node_id_with(mut self, provider: Provider<i64>) -> Self {
        self.node_id = Some(provider);
        self
    }

    /// uses a fixed last generate time
    pub fn last_generate_time(self, millis: i64) -> Self {
        self.last_generate_time_with(providers::fixed(millis))
    }

    /// resolves the last generate time from the given provider
    pub fn last_generate_time_with(mut self, provider: Provider<i64>) -> Self {
        self.last_generate_time = Some(provider);
        self
    }
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("start_time", &self.start_time)
            .field("max_tolerate_millis", &self.max_tolerate_millis)
            .field("max_spin", &self.max_spin)
            .field("last_generate_time", &self.last_generate_time.is_some())
            .field("node_id", &self.node_id.is_some())
            .finish()
    }
}

/// plain data form of [`Config`]
///
/// every field is optional when deserializing.
///
/// ```rust
/// # #[cfg(feature = "serde")] {
/// use snowdrift_generator::{Config, config::Settings};
///
/// let settings: Settings = serde_json::from_str(r#"{
///     "node_id": 3,
///     "max_tolerate_millis": 10,
///     "max_spin_millis": 100
/// }"#).unwrap();
///
/// let config: Config = settings.into();
/// # }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Settings {
    pub start_time: Option<i64>,
    pub max_tolerate_millis: i64,
    pub last_generate_time: Option<i64>,
    pub node_id: Option<i64>,
    pub max_spin_millis: Option<u64>,
}

impl From<Settings> for Config {
    fn from(settings: Settings) -> Config {
        let mut config = Config {
            start_time: settings.start_time,
            max_tolerate_millis: settings.max_tolerate_millis,
            max_spin: settings.max_spin_millis.map(Duration::from_millis),
            last_generate_time: None,
            node_id: None,
        };

        if let Some(node_id) = settings.node_id {
            config = config.node_id(node_id);
        }

        if let Some(millis) = settings.last_generate_time {
            config = config.last_generate_time(millis);
        }

        config
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn settings_into_config() {
        let config: Config = Settings {
            start_time: Some(100),
            max_tolerate_millis: 5,
            last_generate_time: Some(200),
            node_id: Some(9),
            max_spin_millis: Some(30),
        }.into();

        assert_eq!(config.start_time, Some(100));
        assert_eq!(config.max_tolerate_millis, 5);
        assert_eq!(config.max_spin, Some(Duration::from_millis(30)));
        assert_eq!((config.node_id.unwrap())().unwrap(), 9);
        assert_eq!((config.last_generate_time.unwrap())().unwrap(), 200);
    }

    #[test]
    fn empty_settings_leave_defaults() {
        let config: Config = Settings::default().into();

        assert!(config.start_time.is_none());
        assert!(config.node_id.is_none());
        assert!(config.last_generate_time.is_none());
        assert!(config.max_spin.is_none());
    }

    #[cfg(feature = "serde")]
    #[test]
    fn settings_from_json() {
        let settings: Settings = serde_json::from_str(r#"{"node_id": 3}"#).unwrap();

        assert_eq!(settings, Settings {
            node_id: Some(3),
            ..Settings::default()
        });
    }
}
