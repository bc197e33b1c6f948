use embedded_hal::digital::OutputPin;

use super::{MasterOutputs, Relay};

/// Master outputs on plain GPIO. Lamp, pole, fan and buzzer are always
/// wired; the remaining relays are optional and silently skipped when absent.
pub struct GpioRelays<Pin>
where
    Pin: OutputPin,
{
    relays: [Option<Pin>; 8],
    buzzer: Pin,
    relay_inverted: bool,
}

impl<Pin> GpioRelays<Pin>
where
    Pin: OutputPin,
{
    pub fn new(lamp: Pin, pole: Pin, fan: Pin, buzzer: Pin) -> Self {
        let mut outputs = Self {
            relays: [None, None, None, None, None, None, None, None],
            buzzer,
            relay_inverted: false,
        };
        outputs.relays[Relay::Lamp as usize] = Some(lamp);
        outputs.relays[Relay::Pole as usize] = Some(pole);
        outputs.relays[Relay::Fan as usize] = Some(fan);
        outputs.all_off();
        outputs
    }

    pub fn with_relay(mut self, relay: Relay, pin: Pin) -> Self {
        self.relays[relay as usize] = Some(pin);
        self.set_relay(relay, false);
        self
    }

    /// For relay boards that energise on a low input.
    pub fn with_inverted_relays(mut self, inverted: bool) -> Self {
        self.relay_inverted = inverted;
        self.all_off();
        self
    }

    fn all_off(&mut self) {
        for relay in Relay::ALL {
            self.set_relay(relay, false);
        }
        self.set_buzzer(false);
    }

    fn drive(pin: &mut Pin, high: bool) {
        let result = if high { pin.set_high() } else { pin.set_low() };
        if result.is_err() {
            log::warn!("Failed to drive output pin");
        }
    }
}

impl<Pin> MasterOutputs for GpioRelays<Pin>
where
    Pin: OutputPin,
{
    fn set_relay(&mut self, relay: Relay, on: bool) {
        let inverted = self.relay_inverted;
        if let Some(pin) = self.relays[relay as usize].as_mut() {
            Self::drive(pin, on != inverted);
        }
    }

    fn set_buzzer(&mut self, on: bool) {
        Self::drive(&mut self.buzzer, on);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::MockPin;

    #[test]
    fn test_outputs_start_off() {
        let lamp = MockPin::new();
        let buzzer = MockPin::new();
        let _outputs = GpioRelays::new(lamp.clone(), MockPin::new(), MockPin::new(), buzzer.clone());

        assert_eq!(lamp.get_states(), vec![false]);
        assert_eq!(buzzer.get_states(), vec![false]);
    }

    #[test]
    fn test_set_relay_drives_pin() {
        let fan = MockPin::new();
        let mut outputs = GpioRelays::new(MockPin::new(), MockPin::new(), fan.clone(), MockPin::new());

        outputs.set_relay(Relay::Fan, true);
        assert_eq!(fan.last_state(), Some(true));

        outputs.set_relay(Relay::Fan, false);
        assert_eq!(fan.last_state(), Some(false));
    }

    #[test]
    fn test_unwired_relay_is_skipped() {
        let mut outputs = GpioRelays::new(MockPin::new(), MockPin::new(), MockPin::new(), MockPin::new());
        outputs.set_relay(Relay::Desk2, true);

        let desk2 = MockPin::new();
        let mut outputs = outputs.with_relay(Relay::Desk2, desk2.clone());
        outputs.set_relay(Relay::Desk2, true);
        assert_eq!(desk2.get_states(), vec![false, true]);
    }

    #[test]
    fn test_inverted_relays() {
        let pole = MockPin::new();
        let buzzer = MockPin::new();
        let mut outputs = GpioRelays::new(MockPin::new(), pole.clone(), MockPin::new(), buzzer.clone())
            .with_inverted_relays(true);
        assert_eq!(pole.last_state(), Some(true));

        outputs.set_relay(Relay::Pole, true);
        assert_eq!(pole.last_state(), Some(false));

        outputs.set_buzzer(true);
        assert_eq!(buzzer.last_state(), Some(true), "Buzzer is never inverted");
    }
}
