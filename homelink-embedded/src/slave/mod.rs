mod reconciler;

pub use reconciler::{MAX_EFFECTS, SlaveEffect, SlaveEffects, SlaveReconciler};

use homelink_api::Circuit;

use crate::actuator::LightingOutputs;
use crate::brightness::Brightness;
use crate::device::SlaveDevices;
use crate::link::SerialLink;
use crate::sensor::PresenceSensors;

/// Slave tick rate in Hz.
pub const TICK_HZ: u32 = 30;

/// Owns everything the Slave's tick and edge handlers touch.
pub struct SlaveNode<L, P, S>
where
    L: SerialLink,
    P: LightingOutputs,
    S: PresenceSensors,
{
    link: L,
    lighting: P,
    sensors: S,
    reconciler: SlaveReconciler,
}

impl<L, P, S> SlaveNode<L, P, S>
where
    L: SerialLink,
    P: LightingOutputs,
    S: PresenceSensors,
{
    pub fn new(link: L, lighting: P, sensors: S) -> Self {
        Self {
            link,
            lighting,
            sensors,
            reconciler: SlaveReconciler::new(),
        }
    }

    /// Runs once after peripherals are up, before interrupts are enabled.
    pub fn start(&mut self) {
        log::info!("Slave starting, announcing restart");
        let effects = self.reconciler.boot();
        self.apply(effects);
    }

    pub fn on_tick(&mut self) {
        let byte = self.link.try_receive();
        if let Some(byte) = byte {
            log::debug!("Received {:?}", byte as char);
        }
        let effects = self.reconciler.tick(byte);
        self.apply(effects);
    }

    /// Edge interrupt handler. The hallway sensor is fully handled before
    /// the bathroom sensor is looked at.
    pub fn on_edge_interrupt(&mut self) {
        for circuit in Circuit::ALL {
            if !self.sensors.take_edge(circuit) {
                continue;
            }
            let present = self.sensors.is_present(circuit);
            log::debug!("{} presence edge, present: {}", circuit, present);
            let effects = self.reconciler.presence_edge(circuit, present);
            self.apply(effects);
        }
    }

    fn apply(&mut self, effects: SlaveEffects) {
        for effect in effects {
            match effect {
                SlaveEffect::Duty(circuit, duty) => self.lighting.set_duty(circuit, duty),
                SlaveEffect::Transmit(command) => self.link.send(command),
            }
        }
    }

    pub fn devices(&self) -> &SlaveDevices {
        self.reconciler.devices()
    }

    pub fn brightness(&self, circuit: Circuit) -> Brightness {
        self.reconciler.brightness(circuit)
    }

    pub fn link(&self) -> &L {
        &self.link
    }

    pub fn link_mut(&mut self) -> &mut L {
        &mut self.link
    }

    pub fn lighting(&self) -> &P {
        &self.lighting
    }

    pub fn sensors_mut(&mut self) -> &mut S {
        &mut self.sensors
    }
}
