//! # Runtime Configuration
//!
//! Everything the runtime needs to wire the approval core, loaded from
//! `AG_*` environment variables with defaults for anything unset.

use ag_01_correlation_queue::QueueConfig;
use ag_02_surface_arbiter::SurfaceConfig;
use shared_bus::DEFAULT_CHANNEL_CAPACITY;
use std::str::FromStr;
use thiserror::Error;
use tracing::warn;

/// Complete runtime configuration.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    /// Logging configuration.
    pub log: LogConfig,
    /// Correlation queue configuration.
    pub queue: QueueConfig,
    /// Interactive surface geometry and entry point.
    pub surface: SurfaceConfig,
    /// Snapshots buffered per mirror subscriber.
    pub mirror_capacity: usize,
    /// Lines buffered for stdout before writers wait.
    pub output_buffer: usize,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            log: LogConfig::default(),
            queue: QueueConfig::default(),
            surface: SurfaceConfig::default(),
            mirror_capacity: DEFAULT_CHANNEL_CAPACITY,
            output_buffer: 256,
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone)]
pub struct LogConfig {
    /// `EnvFilter` directive, e.g. `info` or `ag_01_correlation_queue=debug`.
    pub level: String,
    /// Emit JSON lines instead of the human-readable format.
    pub json: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: false,
        }
    }
}

impl RuntimeConfig {
    /// Load configuration from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary key lookup.
    ///
    /// Values that fail to parse are logged and replaced by the default.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(level) = lookup("AG_LOG_LEVEL").or_else(|| lookup("RUST_LOG")) {
            config.log.level = level;
        }
        if let Some(raw) = lookup("AG_JSON_LOGS") {
            config.log.json = matches!(raw.trim(), "1" | "true" | "yes");
        }

        override_parsed(&lookup, "AG_MIRROR_CAPACITY", &mut config.mirror_capacity);
        override_parsed(&lookup, "AG_COMMAND_BUFFER", &mut config.queue.command_buffer);
        override_parsed(&lookup, "AG_OUTPUT_BUFFER", &mut config.output_buffer);

        if let Some(entry) = lookup("AG_SURFACE_ENTRY") {
            config.surface.entry = entry;
        }
        override_parsed(&lookup, "AG_SURFACE_WIDTH", &mut config.surface.width);
        override_parsed(&lookup, "AG_SURFACE_HEIGHT", &mut config.surface.height);

        config
    }

    /// Reject configurations the runtime cannot start with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.surface.entry.trim().is_empty() {
            return Err(ConfigError::EmptySurfaceEntry);
        }
        if self.surface.width == 0 || self.surface.height == 0 {
            return Err(ConfigError::InvalidSurfaceSize {
                width: self.surface.width,
                height: self.surface.height,
            });
        }
        for (name, value) in [
            ("mirror_capacity", self.mirror_capacity),
            ("command_buffer", self.queue.command_buffer),
            ("output_buffer", self.output_buffer),
        ] {
            if value == 0 {
                return Err(ConfigError::ZeroCapacity { name });
            }
        }
        Ok(())
    }
}

fn override_parsed<T: FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &str,
    target: &mut T,
) {
    let Some(raw) = lookup(key) else {
        return;
    };
    match raw.trim().parse() {
        Ok(value) => *target = value,
        Err(_) => warn!(key, value = %raw, "Ignoring unparsable configuration value"),
    }
}

/// Configuration errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("AG_SURFACE_ENTRY must not be empty")]
    EmptySurfaceEntry,

    #[error("Surface size {width}x{height} is not drawable")]
    InvalidSurfaceSize { width: u32, height: u32 },

    #[error("{name} must be at least 1")]
    ZeroCapacity { name: &'static str },
}
