// Home layout configuration
//
// A home is described in RON: the devices, the named commands built on top of
// them, and which commands are bound to which remote slot.

pub mod home;

pub use home::Home;

use crate::command::SlotId;
use crate::device::thermostat::DEFAULT_TEMPERATURE;
use ron::ser::PrettyConfig;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Configuration error types
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("RON parse error: {0}")]
    Parse(#[from] ron::error::SpannedError),

    #[error("RON error: {0}")]
    Ron(#[from] ron::Error),

    #[error("Unknown device: {0}")]
    UnknownDevice(String),

    #[error("Unknown command: {0}")]
    UnknownCommand(String),

    #[error("Duplicate name: {0}")]
    DuplicateName(String),
}

pub type ConfigResult<T> = Result<T, ConfigError>;

/// A light in the home
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LightConfig {
    pub id: String,
    pub location: String,
}

/// A thermostat in the home
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThermostatConfig {
    pub id: String,
    pub location: String,
    #[serde(default = "default_temperature")]
    pub temperature: f64,
}

fn default_temperature() -> f64 {
    DEFAULT_TEMPERATURE
}

/// What a named command does
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ActionConfig {
    TurnOn { device: String },
    TurnOff { device: String },
    SetTemperature { device: String, value: f64 },
    /// Names of previously declared commands, run in order
    Macro(Vec<String>),
}

/// A named command. Macros may only refer to commands declared before them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommandConfig {
    pub name: String,
    pub action: ActionConfig,
}

/// Binding of two named commands to a slot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SlotConfig {
    pub slot: SlotId,
    pub on: String,
    pub off: String,
}

/// Complete home layout
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HomeConfig {
    #[serde(default)]
    pub lights: Vec<LightConfig>,
    #[serde(default)]
    pub thermostats: Vec<ThermostatConfig>,
    #[serde(default)]
    pub commands: Vec<CommandConfig>,
    #[serde(default)]
    pub slots: Vec<SlotConfig>,
}

impl HomeConfig {
    /// Parse a layout from RON text
    pub fn from_ron_str(data: &str) -> ConfigResult<Self> {
        Ok(ron::from_str(data)?)
    }

    /// Serialize the layout to pretty RON
    pub fn to_ron_string(&self) -> ConfigResult<String> {
        Ok(ron::ser::to_string_pretty(self, PrettyConfig::default())?)
    }

    /// Load a layout from a RON file
    pub fn load<P: AsRef<Path>>(path: P) -> ConfigResult<Self> {
        let data = fs::read_to_string(path.as_ref())?;
        tracing::debug!(path = %path.as_ref().display(), "loading home layout");
        Self::from_ron_str(&data)
    }

    /// Write the layout to a RON file, creating parent directories as needed
    pub fn save<P: AsRef<Path>>(&self, path: P) -> ConfigResult<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, self.to_ron_string()?)?;
        Ok(())
    }

    /// Per-user layout location, e.g. `~/.config/smart_remote/home.ron` on Linux
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("smart_remote").join("home.ron"))
    }

    /// Built-in demo home: two lights, one thermostat, and two scene macros
    pub fn demo() -> Self {
        fn light(id: &str, location: &str) -> LightConfig {
            LightConfig {
                id: id.into(),
                location: location.into(),
            }
        }

        fn command(name: &str, action: ActionConfig) -> CommandConfig {
            CommandConfig {
                name: name.into(),
                action,
            }
        }

        fn slot(slot: SlotId, on: &str, off: &str) -> SlotConfig {
            SlotConfig {
                slot,
                on: on.into(),
                off: off.into(),
            }
        }

        Self {
            lights: vec![
                light("living_room", "living room"),
                light("bedroom", "bedroom"),
            ],
            thermostats: vec![ThermostatConfig {
                id: "main".into(),
                location: "living room".into(),
                temperature: DEFAULT_TEMPERATURE,
            }],
            commands: vec![
                command("living_on", ActionConfig::TurnOn { device: "living_room".into() }),
                command("living_off", ActionConfig::TurnOff { device: "living_room".into() }),
                command("bedroom_on", ActionConfig::TurnOn { device: "bedroom".into() }),
                command("bedroom_off", ActionConfig::TurnOff { device: "bedroom".into() }),
                command(
                    "warm",
                    ActionConfig::SetTemperature {
                        device: "main".into(),
                        value: 25.0,
                    },
                ),
                command(
                    "cool",
                    ActionConfig::SetTemperature {
                        device: "main".into(),
                        value: 20.0,
                    },
                ),
                command(
                    "cinema",
                    ActionConfig::Macro(vec![
                        "living_off".into(),
                        "bedroom_off".into(),
                        "warm".into(),
                    ]),
                ),
                command(
                    "morning",
                    ActionConfig::Macro(vec!["living_on".into(), "cool".into()]),
                ),
            ],
            slots: vec![
                slot(0, "living_on", "living_off"),
                slot(1, "bedroom_on", "bedroom_off"),
                slot(2, "warm", "cool"),
                slot(3, "cinema", "morning"),
            ],
        }
    }
}
