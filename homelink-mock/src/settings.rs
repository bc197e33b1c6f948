use std::fs;
use std::path::Path;

use homelink_api::Circuit;
use serde::{Deserialize, Serialize};

use crate::error::SimulationError;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Logger {
    pub level: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Link {
    /// Tick rate of both nodes in Hz.
    pub tick_hz: u32,
    /// The status screen is redrawn every this many ticks.
    pub display_divisor: u32,
    /// Probability that any single byte is lost on the wire.
    pub loss_rate: f64,
    pub seed: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KeyPress {
    pub tick: u64,
    pub key: char,
    /// Ticks the key stays down.
    pub hold: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PresenceChange {
    pub tick: u64,
    pub circuit: Circuit,
    pub present: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Simulation {
    pub ticks: u64,
    pub realtime: bool,
    /// Chance per tick that a random PIR sensor flips level.
    pub motion_probability: f64,
    #[serde(default)]
    pub keys: Vec<KeyPress>,
    #[serde(default)]
    pub presence: Vec<PresenceChange>,
    /// Ticks at which the Slave is power-cycled.
    #[serde(default)]
    pub slave_reboots: Vec<u64>,
    /// Raw bytes pushed onto the Master's receive line, for replaying
    /// traffic the Slave would not produce itself.
    #[serde(default)]
    pub injected: Vec<InjectedByte>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InjectedByte {
    pub tick: u64,
    pub byte: char,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    pub logger: Logger,
    pub link: Link,
    pub simulation: Simulation,
}

impl Settings {
    /// Built-in settings from `configs/default.toml`.
    pub fn new() -> Result<Self, SimulationError> {
        Self::parse(include_str!(concat!(
            env!("CARGO_MANIFEST_DIR"),
            "/../",
            "configs/default.toml"
        )))
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, SimulationError> {
        Self::parse(&fs::read_to_string(path)?)
    }

    pub fn parse(source: &str) -> Result<Self, SimulationError> {
        let settings: Settings = toml::from_str(source)?;
        settings.validate()?;
        Ok(settings)
    }

    fn validate(&self) -> Result<(), SimulationError> {
        if self.link.tick_hz == 0 {
            return Err(SimulationError::InvalidSetting("link.tick_hz must be positive".into()));
        }
        if self.link.display_divisor == 0 {
            return Err(SimulationError::InvalidSetting(
                "link.display_divisor must be positive".into(),
            ));
        }
        for (name, value) in [
            ("link.loss_rate", self.link.loss_rate),
            ("simulation.motion_probability", self.simulation.motion_probability),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(SimulationError::InvalidSetting(format!(
                    "{name} must be within 0..=1, got {value}"
                )));
            }
        }
        Ok(())
    }
}
