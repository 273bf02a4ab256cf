//! Configuration system for the issue simulator.
//!
//! This module defines the configuration tree used to parameterize a run. It provides:
//! 1. **Defaults:** Baseline issue width, register file shape, and scheduling flags.
//! 2. **Structures:** Hierarchical config for general, scheduler, register, and latency settings.
//! 3. **Loading:** JSON parsing from a string or file, followed by validation.
//!
//! Every section and field is optional in JSON; use `Config::default()` for the
//! single-issue implicit-hazard machine with the standard cost model.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::common::error::{ConfigError, SimError};
use crate::core::hazards::HazardMode;
use crate::core::resources::ResourceTable;
use crate::core::scheduler::{IssueOrder, SchedulerOptions};
use crate::isa::latency::LatencyTable;

/// Default configuration constants for the simulator.
mod defaults {
    use crate::common::constants;

    /// Single issue.
    pub const ISSUE_WIDTH: usize = constants::DEFAULT_ISSUE_WIDTH;

    /// Eight general registers.
    pub const REGISTER_COUNT: usize = constants::DEFAULT_REGISTER_COUNT;

    /// Registers are named `R0`, `R1`, ...
    pub const REGISTER_PREFIX: &str = constants::DEFAULT_REGISTER_PREFIX;

    /// Explicit mode derives dependency lists when the program declares none.
    pub const DERIVE_DEPENDENCIES: bool = true;
}

/// Root configuration.
///
/// # Examples
///
/// ```
/// use issuesim_core::config::Config;
/// use issuesim_core::core::{HazardMode, IssueOrder};
///
/// let json = r#"{
///     "scheduler": { "mode": "explicit", "issue_width": 2 },
///     "registers": { "initial": { "R0": 3 } },
///     "latency": { "mul": 4 }
/// }"#;
///
/// let config = Config::from_json(json).unwrap();
/// assert_eq!(config.scheduler.mode, HazardMode::Explicit);
/// assert_eq!(config.scheduler.effective_order(), IssueOrder::FirstFit);
/// assert_eq!(config.registers.count, 8);
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    /// General simulation settings
    #[serde(default)]
    pub general: GeneralConfig,
    /// Hazard model and issue parameters
    #[serde(default)]
    pub scheduler: SchedulerConfig,
    /// Register file shape and initial values
    #[serde(default)]
    pub registers: RegisterConfig,
    /// Operation latencies; missing entries keep their defaults
    #[serde(default)]
    pub latency: LatencyTable,
}

impl Config {
    /// Parses and validates a JSON configuration.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads, parses and validates a JSON configuration file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, SimError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| SimError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Self::from_json(&text)?)
    }

    /// Checks the invariants serde cannot express.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.scheduler.issue_width == 0 {
            return Err(ConfigError::ZeroIssueWidth);
        }
        if self.registers.count == 0 {
            return Err(ConfigError::ZeroRegisters);
        }
        self.latency.validate()
    }
}

/// General simulation settings.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct GeneralConfig {
    /// Log every cycle's event at debug level
    #[serde(default)]
    pub trace_cycles: bool,
}

/// Hazard model and issue parameters.
#[derive(Debug, Clone, Deserialize)]
pub struct SchedulerConfig {
    /// Readiness policy
    #[serde(default)]
    pub mode: HazardMode,

    /// Instructions issued per cycle, and in-flight window size
    #[serde(default = "SchedulerConfig::default_issue_width")]
    pub issue_width: usize,

    /// Scan order override; `None` picks the mode's natural order
    #[serde(default)]
    pub issue_order: Option<IssueOrder>,

    /// Suppress issue in any cycle where an instruction retired
    #[serde(default)]
    pub settle_after_retire: bool,

    /// Derive explicit dependencies from register hazards when the program lists none
    #[serde(default = "SchedulerConfig::default_derive_dependencies")]
    pub derive_dependencies: bool,
}

impl SchedulerConfig {
    fn default_issue_width() -> usize {
        defaults::ISSUE_WIDTH
    }

    fn default_derive_dependencies() -> bool {
        defaults::DERIVE_DEPENDENCIES
    }

    /// Issue order in effect: the override, or in-order for implicit mode
    /// and first-fit for explicit mode.
    pub fn effective_order(&self) -> IssueOrder {
        self.issue_order.unwrap_or(match self.mode {
            HazardMode::Implicit => IssueOrder::InOrder,
            HazardMode::Explicit => IssueOrder::FirstFit,
        })
    }

    /// Engine parameters for this configuration.
    pub fn options(&self) -> SchedulerOptions {
        SchedulerOptions {
            issue_width: self.issue_width,
            issue_order: self.effective_order(),
            settle_after_retire: self.settle_after_retire,
        }
    }
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            mode: HazardMode::default(),
            issue_width: defaults::ISSUE_WIDTH,
            issue_order: None,
            settle_after_retire: false,
            derive_dependencies: defaults::DERIVE_DEPENDENCIES,
        }
    }
}

/// Register file shape and initial values.
#[derive(Debug, Clone, Deserialize)]
pub struct RegisterConfig {
    /// Number of registers
    #[serde(default = "RegisterConfig::default_count")]
    pub count: usize,

    /// Register name prefix
    #[serde(default = "RegisterConfig::default_prefix")]
    pub prefix: String,

    /// Initial values by register name; unlisted registers start at zero
    #[serde(default)]
    pub initial: BTreeMap<String, i64>,
}

impl RegisterConfig {
    fn default_count() -> usize {
        defaults::REGISTER_COUNT
    }

    fn default_prefix() -> String {
        defaults::REGISTER_PREFIX.to_string()
    }

    /// Builds the resource table, applying the initial values.
    ///
    /// # Errors
    ///
    /// `UnknownResource` when an initial value names a register outside the file.
    pub fn build_table(&self) -> Result<ResourceTable, SimError> {
        let mut table = ResourceTable::with_registers(self.count, &self.prefix);
        for (name, &value) in &self.initial {
            table.set_value(name, value)?;
        }
        Ok(table)
    }
}

impl Default for RegisterConfig {
    fn default() -> Self {
        Self {
            count: defaults::REGISTER_COUNT,
            prefix: defaults::REGISTER_PREFIX.to_string(),
            initial: BTreeMap::new(),
        }
    }
}
