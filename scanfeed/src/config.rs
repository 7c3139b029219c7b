use crate::{arguments::Arguments, broadcaster::MAX_SUBSCRIBER_BUFFER};
use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::{net::SocketAddr, path::Path};

/// Bounded queues allocate their whole capacity up front.
pub const MAX_QUEUE_CAPACITY: usize = 1 << 20;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub listen: SocketAddr,
    /// Unbounded when absent.
    pub queue_capacity: Option<usize>,
    pub max_body_bytes: usize,
    /// Events buffered per viewer before it starts skipping.
    pub subscriber_buffer: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            listen: SocketAddr::from(([0, 0, 0, 0], 5000)),
            queue_capacity: None,
            max_body_bytes: 16 * 1024 * 1024,
            subscriber_buffer: 64,
        }
    }
}

impl Config {
    pub fn from_file(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let config = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config: Self = toml::from_str(&config).context("Failed to parse config toml file")?;
        config
            .validate()
            .with_context(|| format!("Invalid config file {}", path.display()))?;
        Ok(config)
    }

    /// Loads the file named on the command line, if any, then applies flag overrides.
    pub fn load(args: &Arguments) -> anyhow::Result<Self> {
        let config = match &args.config {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        let config = config.with_overrides(args);
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        anyhow::ensure!(
            (1..=MAX_SUBSCRIBER_BUFFER).contains(&self.subscriber_buffer),
            "subscriber_buffer must be between 1 and {MAX_SUBSCRIBER_BUFFER}, got {}",
            self.subscriber_buffer
        );
        if let Some(capacity) = self.queue_capacity {
            anyhow::ensure!(
                (1..=MAX_QUEUE_CAPACITY).contains(&capacity),
                "queue_capacity must be between 1 and {MAX_QUEUE_CAPACITY}, got {capacity}"
            );
        }
        anyhow::ensure!(self.max_body_bytes > 0, "max_body_bytes must not be zero");
        Ok(())
    }

    pub fn with_overrides(mut self, args: &Arguments) -> Self {
        if let Some(listen) = args.listen {
            self.listen = listen;
        }
        if let Some(capacity) = args.queue_capacity {
            self.queue_capacity = Some(capacity);
        }
        if let Some(max_body) = args.max_body {
            self.max_body_bytes = max_body;
        }
        self
    }
}
