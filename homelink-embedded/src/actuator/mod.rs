mod pwm;
mod relays;

pub use pwm::PwmLighting;
pub use relays::GpioRelays;

use homelink_api::Circuit;
use serde::{Deserialize, Serialize};

use crate::device::MasterDevice;

/// Switched outputs on the Master board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Relay {
    Lamp,
    Pole,
    Fan,
    Desk1,
    Desk2,
    Desk3,
    Relay3,
    Relay4,
}

impl Relay {
    pub const ALL: [Relay; 8] = [
        Relay::Lamp,
        Relay::Pole,
        Relay::Fan,
        Relay::Desk1,
        Relay::Desk2,
        Relay::Desk3,
        Relay::Relay3,
        Relay::Relay4,
    ];

    pub fn device(&self) -> MasterDevice {
        match self {
            Relay::Lamp => MasterDevice::Lamp,
            Relay::Pole => MasterDevice::Pole,
            Relay::Fan => MasterDevice::Fan,
            Relay::Desk1 => MasterDevice::Desk1,
            Relay::Desk2 => MasterDevice::Desk2,
            Relay::Desk3 => MasterDevice::Desk3,
            Relay::Relay3 => MasterDevice::Relay3,
            Relay::Relay4 => MasterDevice::Relay4,
        }
    }
}

/// Discrete outputs driven by the Master.
pub trait MasterOutputs {
    fn set_relay(&mut self, relay: Relay, on: bool);

    fn set_buzzer(&mut self, on: bool);
}

/// Dimmer channels driven by the Slave. `duty` is in counts out of
/// [`crate::brightness::PWM_PERIOD`].
pub trait LightingOutputs {
    fn set_duty(&mut self, circuit: Circuit, duty: u16);
}

impl<O: MasterOutputs + ?Sized> MasterOutputs for &mut O {
    fn set_relay(&mut self, relay: Relay, on: bool) {
        (**self).set_relay(relay, on)
    }

    fn set_buzzer(&mut self, on: bool) {
        (**self).set_buzzer(on)
    }
}

impl<L: LightingOutputs + ?Sized> LightingOutputs for &mut L {
    fn set_duty(&mut self, circuit: Circuit, duty: u16) {
        (**self).set_duty(circuit, duty)
    }
}
