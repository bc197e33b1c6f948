use heapless::Vec;
use homelink_api::{Circuit, Command, Origin};

use super::speaker::{SpeakerAction, SpeakerGate};
use crate::actuator::Relay;
use crate::device::{MasterDevice, MasterDevices};
use crate::keypad::Key;

/// Room for the all-off key: every relay, the buzzer, one transmit and the
/// speaker's own effect.
pub const MAX_EFFECTS: usize = 12;

pub type MasterEffects = Vec<MasterEffect, MAX_EFFECTS>;

/// One tick's worth of input. A received byte pre-empts the keypad.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MasterInput {
    Serial(u8),
    Keypad(Option<Key>),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MasterEffect {
    Relay(Relay, bool),
    Buzzer(bool),
    Transmit(Command),
}

/// Pure state machine behind the Master's tick handler.
#[derive(Debug, Clone, Default)]
pub struct MasterReconciler {
    devices: MasterDevices,
    selected: Option<Circuit>,
    key: Option<Key>,
    buzzer: bool,
    speaker: SpeakerGate,
}

impl MasterReconciler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn devices(&self) -> &MasterDevices {
        &self.devices
    }

    pub fn selected(&self) -> Option<Circuit> {
        self.selected
    }

    pub fn buzzer(&self) -> bool {
        self.buzzer
    }

    pub fn tick(&mut self, input: MasterInput) -> MasterEffects {
        let mut effects = MasterEffects::new();

        match input {
            MasterInput::Serial(byte) => self.on_serial(byte),
            MasterInput::Keypad(key) => {
                let previous = core::mem::replace(&mut self.key, key);
                if key != previous {
                    if let Some(key) = key {
                        self.on_key(key, &mut effects);
                    }
                }
            }
        }

        match self.speaker.advance(self.devices.speaker) {
            SpeakerAction::Idle => {}
            SpeakerAction::Toggle => {
                self.buzzer = !self.buzzer;
                push(&mut effects, MasterEffect::Buzzer(self.buzzer));
            }
            SpeakerAction::Silence => {
                self.buzzer = false;
                self.devices.speaker = false;
                push(&mut effects, MasterEffect::Buzzer(false));
            }
        }

        effects
    }

    fn on_serial(&mut self, byte: u8) {
        let Some(command) = Command::from_byte(byte) else {
            log::debug!("Ignoring unknown byte {:#04x}", byte);
            return;
        };
        if command.origin() != Origin::Slave {
            log::debug!("Ignoring command {} from the wrong side", command);
            return;
        }

        match command {
            Command::SlaveBooted => {
                log::info!("Slave restarted, clearing lighting state");
                self.devices.hallway = false;
                self.devices.bathroom = false;
                self.selected = None;
            }
            Command::HallwayMotion | Command::BathroomMotion => {
                if let Some(circuit) = command.circuit() {
                    self.devices.set(MasterDevice::from_circuit(circuit), true);
                }
            }
            Command::HallwayClear | Command::BathroomClear => {
                if let Some(circuit) = command.circuit() {
                    self.devices.set(MasterDevice::from_circuit(circuit), false);
                }
            }
            _ => {}
        }
    }

    fn on_key(&mut self, key: Key, effects: &mut MasterEffects) {
        match key {
            Key::Num1 => {
                self.devices.speaker = true;
                self.speaker.restart();
            }
            Key::Num2 => self.toggle_relay(Relay::Desk1, effects),
            Key::Num3 => self.toggle_relay(Relay::Desk2, effects),
            Key::Num4 => self.toggle_relay(Relay::Lamp, effects),
            Key::Num5 => self.toggle_relay(Relay::Pole, effects),
            Key::Num6 => self.toggle_relay(Relay::Desk3, effects),
            Key::Num7 => self.toggle_relay(Relay::Relay3, effects),
            Key::Num8 => self.toggle_relay(Relay::Relay4, effects),
            Key::Num9 => self.toggle_relay(Relay::Fan, effects),
            Key::Star => self.toggle_circuit(Circuit::Hallway, effects),
            Key::Num0 => self.toggle_circuit(Circuit::Bathroom, effects),
            Key::A => self.adjust(Command::brighter, effects),
            Key::B => self.adjust(Command::dimmer, effects),
            Key::C => {
                self.devices.toggle(MasterDevice::ButtonC);
            }
            Key::D => {
                self.devices.toggle(MasterDevice::ButtonD);
            }
            Key::Hash => self.all_off(effects),
        }
    }

    fn toggle_relay(&mut self, relay: Relay, effects: &mut MasterEffects) {
        let on = self.devices.toggle(relay.device());
        push(effects, MasterEffect::Relay(relay, on));
    }

    fn toggle_circuit(&mut self, circuit: Circuit, effects: &mut MasterEffects) {
        let on = self.devices.toggle(MasterDevice::from_circuit(circuit));
        self.selected = Some(circuit);
        push(effects, MasterEffect::Transmit(Command::power(circuit, on)));
    }

    fn adjust(&mut self, command: fn(Circuit) -> Command, effects: &mut MasterEffects) {
        if !self.devices.any_circuit_on() {
            return;
        }
        if let Some(circuit) = self.selected {
            push(effects, MasterEffect::Transmit(command(circuit)));
        }
    }

    fn all_off(&mut self, effects: &mut MasterEffects) {
        for device in MasterDevice::TOGGLEABLE {
            self.devices.set(device, false);
        }
        self.selected = None;
        self.buzzer = false;

        for relay in Relay::ALL {
            push(effects, MasterEffect::Relay(relay, false));
        }
        push(effects, MasterEffect::Buzzer(false));
        push(effects, MasterEffect::Transmit(Command::AllOff));
    }
}

fn push(effects: &mut MasterEffects, effect: MasterEffect) {
    if effects.push(effect).is_err() {
        log::warn!("Effect queue full, dropped {:?}", effect);
    }
}
