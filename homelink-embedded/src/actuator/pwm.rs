use embedded_hal::pwm::SetDutyCycle;
use homelink_api::Circuit;

use super::LightingOutputs;
use crate::brightness::{OFF_DUTY, PWM_PERIOD};

/// Two PWM dimmer channels. Duties are given against the fixed
/// [`PWM_PERIOD`] and scaled onto whatever range the channel exposes.
pub struct PwmLighting<H, B>
where
    H: SetDutyCycle,
    B: SetDutyCycle,
{
    hallway: H,
    bathroom: B,
}

impl<H, B> PwmLighting<H, B>
where
    H: SetDutyCycle,
    B: SetDutyCycle,
{
    pub fn new(hallway: H, bathroom: B) -> Self {
        Self { hallway, bathroom }
    }

    pub fn release(self) -> (H, B) {
        (self.hallway, self.bathroom)
    }
}

fn apply<P: SetDutyCycle>(channel: &mut P, circuit: Circuit, duty: u16) {
    let duty = duty.clamp(OFF_DUTY, PWM_PERIOD - 1);
    if channel.set_duty_cycle_fraction(duty, PWM_PERIOD).is_err() {
        log::warn!("Failed to set {} duty to {}", circuit, duty);
    }
}

impl<H, B> LightingOutputs for PwmLighting<H, B>
where
    H: SetDutyCycle,
    B: SetDutyCycle,
{
    fn set_duty(&mut self, circuit: Circuit, duty: u16) {
        match circuit {
            Circuit::Hallway => apply(&mut self.hallway, circuit, duty),
            Circuit::Bathroom => apply(&mut self.bathroom, circuit, duty),
        }
    }
}
