#![cfg_attr(not(any(test, feature = "std")), no_std)]

//! Device logic for the Master and Slave nodes.
//!
//! Each node is split into a pure reconciler, which turns one tick's input
//! into a list of effects, and a node controller, which owns the peripherals
//! and applies those effects. Peripherals are reached through small traits
//! with `embedded-hal` adapters so the same logic runs on target and host.

pub mod actuator;
pub mod brightness;
pub mod device;
pub mod display;
pub mod error;
pub mod keypad;
pub mod link;
pub mod master;
pub mod sensor;
pub mod shared;
pub mod slave;

#[cfg(test)]
mod mock;

pub use actuator::{GpioRelays, LightingOutputs, MasterOutputs, PwmLighting, Relay};
pub use brightness::{Brightness, OFF_DUTY, PWM_PERIOD};
pub use device::{MasterDevice, MasterDevices, SlaveDevices};
pub use display::StatusDisplay;
pub use error::{Error, Result};
pub use keypad::{Key, Keypad, MatrixKeypad};
pub use link::{NbSerialLink, SerialLink};
pub use master::MasterNode;
pub use sensor::{PirPair, PresenceSensors};
pub use shared::SharedNode;
pub use slave::SlaveNode;
