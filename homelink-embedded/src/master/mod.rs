mod reconciler;
mod speaker;

pub use reconciler::{MAX_EFFECTS, MasterEffect, MasterEffects, MasterInput, MasterReconciler};
pub use speaker::{SpeakerAction, SpeakerGate};

use homelink_api::Circuit;

use crate::actuator::MasterOutputs;
use crate::device::MasterDevices;
use crate::display::{self, StatusDisplay};
use crate::keypad::Keypad;
use crate::link::SerialLink;

/// Master tick rate in Hz.
pub const TICK_HZ: u32 = 30;
/// Status screen refresh rate in Hz.
pub const DISPLAY_HZ: u32 = 60;

/// Owns everything the Master's interrupt handlers touch.
pub struct MasterNode<L, K, O, D>
where
    L: SerialLink,
    K: Keypad,
    O: MasterOutputs,
    D: StatusDisplay,
{
    link: L,
    keypad: K,
    outputs: O,
    display: D,
    reconciler: MasterReconciler,
}

impl<L, K, O, D> MasterNode<L, K, O, D>
where
    L: SerialLink,
    K: Keypad,
    O: MasterOutputs,
    D: StatusDisplay,
{
    pub fn new(link: L, keypad: K, outputs: O, display: D) -> Self {
        Self {
            link,
            keypad,
            outputs,
            display,
            reconciler: MasterReconciler::new(),
        }
    }

    pub fn start(&mut self) {
        log::info!("Starting...");
        self.refresh_display();
    }

    /// Periodic tick handler. The keypad is only scanned when no byte
    /// arrived on this tick.
    pub fn on_tick(&mut self) {
        let input = match self.link.try_receive() {
            Some(byte) => {
                log::debug!("Received {:?}", byte as char);
                MasterInput::Serial(byte)
            }
            None => MasterInput::Keypad(self.keypad.read_key()),
        };

        for effect in self.reconciler.tick(input) {
            match effect {
                MasterEffect::Relay(relay, on) => self.outputs.set_relay(relay, on),
                MasterEffect::Buzzer(on) => self.outputs.set_buzzer(on),
                MasterEffect::Transmit(command) => self.link.send(command),
            }
        }
    }

    /// Display timer handler.
    pub fn refresh_display(&mut self) {
        display::refresh(&mut self.display, self.reconciler.devices());
    }

    pub fn devices(&self) -> &MasterDevices {
        self.reconciler.devices()
    }

    pub fn selected(&self) -> Option<Circuit> {
        self.reconciler.selected()
    }

    pub fn buzzer(&self) -> bool {
        self.reconciler.buzzer()
    }

    pub fn link(&self) -> &L {
        &self.link
    }

    pub fn link_mut(&mut self) -> &mut L {
        &mut self.link
    }

    pub fn keypad_mut(&mut self) -> &mut K {
        &mut self.keypad
    }

    pub fn outputs(&self) -> &O {
        &self.outputs
    }

    pub fn display(&self) -> &D {
        &self.display
    }
}
