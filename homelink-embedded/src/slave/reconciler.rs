use heapless::Vec;
use homelink_api::{Circuit, Command, Origin};

use crate::brightness::{Brightness, OFF_DUTY};
use crate::device::SlaveDevices;

pub const MAX_EFFECTS: usize = 4;

pub type SlaveEffects = Vec<SlaveEffect, MAX_EFFECTS>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlaveEffect {
    Duty(Circuit, u16),
    Transmit(Command),
}

/// Pure state machine behind the Slave's tick and edge handlers.
#[derive(Debug, Clone, Default)]
pub struct SlaveReconciler {
    devices: SlaveDevices,
    hallway: Brightness,
    bathroom: Brightness,
    previous: Option<u8>,
}

impl SlaveReconciler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn devices(&self) -> &SlaveDevices {
        &self.devices
    }

    pub fn brightness(&self, circuit: Circuit) -> Brightness {
        match circuit {
            Circuit::Hallway => self.hallway,
            Circuit::Bathroom => self.bathroom,
        }
    }

    /// Power-on sequence: both lamps dark, default levels, announce the
    /// restart to the Master.
    pub fn boot(&mut self) -> SlaveEffects {
        *self = Self::new();
        let mut effects = SlaveEffects::new();
        for circuit in Circuit::ALL {
            push(&mut effects, SlaveEffect::Duty(circuit, OFF_DUTY));
        }
        push(&mut effects, SlaveEffect::Transmit(Command::SlaveBooted));
        effects
    }

    /// Tick handler body. `byte` is whatever the link produced this tick;
    /// a command only acts when it differs from the previous tick's byte.
    pub fn tick(&mut self, byte: Option<u8>) -> SlaveEffects {
        let mut effects = SlaveEffects::new();
        let previous = core::mem::replace(&mut self.previous, byte);
        if byte == previous {
            return effects;
        }
        let Some(byte) = byte else {
            return effects;
        };
        let Some(command) = Command::from_byte(byte) else {
            log::debug!("Ignoring unknown byte {:#04x}", byte);
            return effects;
        };
        if command.origin() != Origin::Master {
            log::debug!("Ignoring command {} from the wrong side", command);
            return effects;
        }

        match command {
            Command::HallwayOff => self.power(Circuit::Hallway, false, &mut effects),
            Command::HallwayOn => self.power(Circuit::Hallway, true, &mut effects),
            Command::BathroomOff => self.power(Circuit::Bathroom, false, &mut effects),
            Command::BathroomOn => self.power(Circuit::Bathroom, true, &mut effects),
            Command::HallwayBrighter => {
                let duty = self.hallway.brighten();
                push(&mut effects, SlaveEffect::Duty(Circuit::Hallway, duty));
            }
            Command::HallwayDimmer => {
                let duty = self.hallway.dim();
                push(&mut effects, SlaveEffect::Duty(Circuit::Hallway, duty));
            }
            Command::BathroomBrighter => {
                let duty = self.bathroom.brighten();
                push(&mut effects, SlaveEffect::Duty(Circuit::Bathroom, duty));
            }
            Command::BathroomDimmer => {
                let duty = self.bathroom.dim();
                push(&mut effects, SlaveEffect::Duty(Circuit::Bathroom, duty));
            }
            Command::AllOff => {
                for circuit in Circuit::ALL {
                    self.power(circuit, false, &mut effects);
                }
            }
            _ => {}
        }

        effects
    }

    /// Edge handler body for one sensor whose edge has already been
    /// acknowledged. Sensors are ignored while their circuit is switched on.
    pub fn presence_edge(&self, circuit: Circuit, present: bool) -> SlaveEffects {
        let mut effects = SlaveEffects::new();
        if self.devices.is_on(circuit) {
            return effects;
        }

        push(&mut effects, SlaveEffect::Transmit(Command::presence(circuit, present)));
        let duty = if present {
            self.brightness(circuit).duty()
        } else {
            OFF_DUTY
        };
        push(&mut effects, SlaveEffect::Duty(circuit, duty));
        effects
    }

    fn power(&mut self, circuit: Circuit, on: bool, effects: &mut SlaveEffects) {
        self.devices.set(circuit, on);
        let duty = if on {
            self.brightness(circuit).duty()
        } else {
            OFF_DUTY
        };
        push(effects, SlaveEffect::Duty(circuit, duty));
    }
}

fn push(effects: &mut SlaveEffects, effect: SlaveEffect) {
    if effects.push(effect).is_err() {
        log::warn!("Effect queue full, dropped {:?}", effect);
    }
}
