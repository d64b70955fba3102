//! Configuration options for normalization.

use serde::{Deserialize, Serialize};

/// Fill value for a missing temperature column when humidity is unavailable.
pub const DEFAULT_TEMPERATURE: f64 = 25.0;

/// Fill value for a missing humidity column.
pub const DEFAULT_HUMIDITY: f64 = 50.0;

/// How a missing humidity column is synthesized.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HumidityDefault {
    /// Fixed constant (`default_humidity`).
    #[default]
    Constant,
    /// Mean of the temperature column, falling back to the constant.
    TemperatureMean,
}

/// What to do when two source columns map to the same canonical column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AliasCollisionPolicy {
    /// Later column (by position) wins; the earlier one is dropped with a warning.
    #[default]
    LastWins,
    /// Abort with a validation error.
    Reject,
}

/// How valve states outside {0, 1} are treated after rounding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValveStatePolicy {
    /// Keep the rounded value and report a warning.
    #[default]
    PassThrough,
    /// Clamp into {0, 1}.
    Clamp,
    /// Abort with a validation error.
    Reject,
}

/// Options controlling one normalization pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NormalizeOptions {
    pub humidity_default: HumidityDefault,
    pub alias_collision: AliasCollisionPolicy,
    pub valve_state: ValveStatePolicy,
    /// Temperature fill when no humidity values exist.
    pub default_temperature: f64,
    /// Humidity fill for the constant policy and the mean fallback.
    pub default_humidity: f64,
}

impl Default for NormalizeOptions {
    fn default() -> Self {
        Self {
            humidity_default: HumidityDefault::default(),
            alias_collision: AliasCollisionPolicy::default(),
            valve_state: ValveStatePolicy::default(),
            default_temperature: DEFAULT_TEMPERATURE,
            default_humidity: DEFAULT_HUMIDITY,
        }
    }
}

impl NormalizeOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Options that turn every ambiguous input into an error.
    pub fn strict() -> Self {
        Self {
            alias_collision: AliasCollisionPolicy::Reject,
            valve_state: ValveStatePolicy::Reject,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_humidity_default(mut self, policy: HumidityDefault) -> Self {
        self.humidity_default = policy;
        self
    }

    #[must_use]
    pub fn with_alias_collision(mut self, policy: AliasCollisionPolicy) -> Self {
        self.alias_collision = policy;
        self
    }

    #[must_use]
    pub fn with_valve_state(mut self, policy: ValveStatePolicy) -> Self {
        self.valve_state = policy;
        self
    }

    #[must_use]
    pub fn with_default_temperature(mut self, value: f64) -> Self {
        self.default_temperature = value;
        self
    }

    #[must_use]
    pub fn with_default_humidity(mut self, value: f64) -> Self {
        self.default_humidity = value;
        self
    }
}
