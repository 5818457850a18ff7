//! Configuration system for the scheduling simulator.
//!
//! This module defines the knobs fixed for the duration of a run. It provides:
//! 1. **Defaults:** I/O length, policies, and the loader's PRNG seed.
//! 2. **Policies:** When the CPU switches process and what happens when an I/O completes.
//! 3. **Structures:** Scheduler and loader settings under a single root [`Config`].
//!
//! Configuration is built by the CLI from flags, or deserialized from JSON with
//! [`Config::from_json_str`] / [`Config::from_json_file`].

use std::fmt;
use std::fs;
use std::path::Path;
use std::str::FromStr;

use serde::Deserialize;

use crate::common::ConfigError;

/// Default configuration constants for the simulator.
mod defaults {
    /// Ticks an I/O occupies before it completes.
    pub const IO_LENGTH: u64 = 5;

    /// Seed of the program loader's PRNG when none is supplied.
    ///
    /// The CLI passes its own `--seed` (default 0) and that value wins.
    pub const SEED: u64 = 42;
}

/// When the scheduler hands the CPU to another process.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
pub enum SwitchPolicy {
    /// Switch when the current process finishes or issues an I/O.
    #[default]
    #[serde(rename = "SWITCH_ON_IO")]
    SwitchOnIo,
    /// Switch only when the current process finishes.
    #[serde(rename = "SWITCH_ON_END")]
    SwitchOnEnd,
}

impl SwitchPolicy {
    /// Canonical upper-case name used on the command line and in JSON.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::SwitchOnIo => "SWITCH_ON_IO",
            Self::SwitchOnEnd => "SWITCH_ON_END",
        }
    }
}

impl fmt::Display for SwitchPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for SwitchPolicy {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "SWITCH_ON_IO" => Ok(Self::SwitchOnIo),
            "SWITCH_ON_END" => Ok(Self::SwitchOnEnd),
            other => Err(ConfigError::UnknownSwitchPolicy(other.to_string())),
        }
    }
}

/// What happens to a process whose I/O has just completed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
pub enum IoDonePolicy {
    /// The process becomes ready and runs when its turn comes.
    #[default]
    #[serde(rename = "IO_RUN_LATER")]
    RunLater,
    /// The process preempts whatever is running and runs at once.
    #[serde(rename = "IO_RUN_IMMEDIATE")]
    RunImmediate,
}

impl IoDonePolicy {
    /// Canonical upper-case name used on the command line and in JSON.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::RunLater => "IO_RUN_LATER",
            Self::RunImmediate => "IO_RUN_IMMEDIATE",
        }
    }
}

impl fmt::Display for IoDonePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for IoDonePolicy {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "IO_RUN_LATER" => Ok(Self::RunLater),
            "IO_RUN_IMMEDIATE" => Ok(Self::RunImmediate),
            other => Err(ConfigError::UnknownIoDonePolicy(other.to_string())),
        }
    }
}

/// Root configuration structure for the simulator.
///
/// # Example
///
/// ```
/// use procsim_core::config::{Config, IoDonePolicy, SwitchPolicy};
///
/// let json = r#"{
///     "scheduler": {
///         "switch_policy": "SWITCH_ON_END",
///         "io_done_policy": "IO_RUN_IMMEDIATE",
///         "io_length": 3
///     },
///     "loader": { "seed": 7 }
/// }"#;
///
/// let config = Config::from_json_str(json).unwrap();
/// assert_eq!(config.scheduler.switch_policy, SwitchPolicy::SwitchOnEnd);
/// assert_eq!(config.scheduler.io_done_policy, IoDonePolicy::RunImmediate);
/// assert_eq!(config.scheduler.io_length, 3);
/// assert_eq!(config.loader.seed, 7);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Config {
    /// Scheduling policies and I/O timing.
    #[serde(default)]
    pub scheduler: SchedulerConfig,
    /// Program loader settings.
    #[serde(default)]
    pub loader: LoaderConfig,
}

impl Config {
    /// Parses a configuration from a JSON string; missing fields take their defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::ConfigParse`] if the JSON is malformed or names an unknown policy.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Reads and parses a JSON configuration file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::ConfigFile`] if the file cannot be read, or
    /// [`ConfigError::ConfigParse`] if its contents are invalid.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| ConfigError::ConfigFile {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&text)
    }
}

/// Scheduler settings, fixed for a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct SchedulerConfig {
    /// When to switch between processes.
    #[serde(default)]
    pub switch_policy: SwitchPolicy,

    /// What to do when an I/O completes.
    #[serde(default)]
    pub io_done_policy: IoDonePolicy,

    /// Ticks an I/O occupies before completion.
    #[serde(default = "SchedulerConfig::default_io_length")]
    pub io_length: u64,
}

impl SchedulerConfig {
    fn default_io_length() -> u64 {
        defaults::IO_LENGTH
    }

    /// Human-readable description of both policies, as printed before a trace is solved.
    pub fn describe(&self) -> String {
        let switch = match self.switch_policy {
            SwitchPolicy::SwitchOnIo => "the current process is FINISHED or ISSUES AN IO",
            SwitchPolicy::SwitchOnEnd => "the current process is FINISHED",
        };
        let io_done = match self.io_done_policy {
            IoDonePolicy::RunImmediate => "run IMMEDIATELY",
            IoDonePolicy::RunLater => "run LATER (when it is its turn)",
        };
        format!(
            "Important behaviors:\n  System will switch when {switch}\n  \
             After IOs, the process issuing the IO will {io_done}\n"
        )
    }
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            switch_policy: SwitchPolicy::default(),
            io_done_policy: IoDonePolicy::default(),
            io_length: defaults::IO_LENGTH,
        }
    }
}

/// Program loader settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct LoaderConfig {
    /// Seed for the PRNG behind randomized process descriptors.
    #[serde(default = "LoaderConfig::default_seed")]
    pub seed: u64,
}

impl LoaderConfig {
    fn default_seed() -> u64 {
        defaults::SEED
    }
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            seed: defaults::SEED,
        }
    }
}
