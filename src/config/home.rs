// Home - devices and a bound dispatcher built from a HomeConfig

use crate::command::{Command, CommandHandle, Dispatcher};
use crate::config::{ActionConfig, ConfigError, ConfigResult, HomeConfig};
use crate::device::{Light, Thermostat, shared};
use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::sync::{Arc, Mutex};

/// A live home: devices, named commands and the remote that drives them
///
/// Each named command is built once. Slots and macros referring to the same
/// name share that single instance.
pub struct Home {
    lights: HashMap<String, Arc<Mutex<Light>>>,
    thermostats: HashMap<String, Arc<Mutex<Thermostat>>>,
    commands: HashMap<String, CommandHandle>,
    dispatcher: Dispatcher,
}

/// Insert `value` under `key`, rejecting names that are already taken
fn insert_unique<V>(map: &mut HashMap<String, V>, key: &str, value: V) -> ConfigResult<()> {
    match map.entry(key.to_owned()) {
        Entry::Occupied(_) => Err(ConfigError::DuplicateName(key.to_owned())),
        Entry::Vacant(slot) => {
            slot.insert(value);
            Ok(())
        }
    }
}

impl Home {
    /// Build the devices, commands and slot bindings described by `config`
    ///
    /// # Errors
    /// Fails on duplicate ids/names and on references to unknown devices or
    /// commands (including macros referring to themselves or to later commands).
    pub fn build(config: &HomeConfig) -> ConfigResult<Self> {
        let mut lights = HashMap::new();
        for light in &config.lights {
            insert_unique(&mut lights, &light.id, shared(Light::new(&light.location)))?;
        }

        let mut thermostats = HashMap::new();
        for thermostat in &config.thermostats {
            insert_unique(
                &mut thermostats,
                &thermostat.id,
                shared(Thermostat::with_temperature(
                    &thermostat.location,
                    thermostat.temperature,
                )),
            )?;
        }

        let find_light = |id: &str| {
            lights
                .get(id)
                .cloned()
                .ok_or_else(|| ConfigError::UnknownDevice(format!("no light named '{}'", id)))
        };
        let find_thermostat = |id: &str| {
            thermostats.get(id).cloned().ok_or_else(|| {
                ConfigError::UnknownDevice(format!("no thermostat named '{}'", id))
            })
        };

        let mut commands: HashMap<String, CommandHandle> = HashMap::new();
        for entry in &config.commands {
            let command = match &entry.action {
                ActionConfig::TurnOn { device } => Command::turn_on(find_light(device)?),
                ActionConfig::TurnOff { device } => Command::turn_off(find_light(device)?),
                ActionConfig::SetTemperature { device, value } => {
                    Command::set_temperature(find_thermostat(device)?, *value)
                }
                ActionConfig::Macro(names) => {
                    let members = names
                        .iter()
                        .map(|name| {
                            commands.get(name).cloned().ok_or_else(|| {
                                ConfigError::UnknownCommand(format!(
                                    "'{}' used by macro '{}' before it is declared",
                                    name, entry.name
                                ))
                            })
                        })
                        .collect::<ConfigResult<Vec<_>>>()?;
                    Command::macro_of(members)
                }
            };
            insert_unique(&mut commands, &entry.name, command.into_handle())?;
        }

        let find_command = |name: &str| {
            commands
                .get(name)
                .cloned()
                .ok_or_else(|| ConfigError::UnknownCommand(name.to_owned()))
        };

        let mut dispatcher = Dispatcher::new();
        for slot in &config.slots {
            if dispatcher.is_bound(slot.slot) {
                return Err(ConfigError::DuplicateName(format!("slot {}", slot.slot)));
            }
            dispatcher.bind(slot.slot, find_command(&slot.on)?, find_command(&slot.off)?);
        }

        tracing::info!(
            lights = lights.len(),
            thermostats = thermostats.len(),
            commands = commands.len(),
            slots = config.slots.len(),
            "home layout ready"
        );

        Ok(Self {
            lights,
            thermostats,
            commands,
            dispatcher,
        })
    }

    pub fn light(&self, id: &str) -> Option<&Arc<Mutex<Light>>> {
        self.lights.get(id)
    }

    pub fn thermostat(&self, id: &str) -> Option<&Arc<Mutex<Thermostat>>> {
        self.thermostats.get(id)
    }

    pub fn command(&self, name: &str) -> Option<&CommandHandle> {
        self.commands.get(name)
    }

    pub fn dispatcher(&self) -> &Dispatcher {
        &self.dispatcher
    }

    pub fn dispatcher_mut(&mut self) -> &mut Dispatcher {
        &mut self.dispatcher
    }
}
