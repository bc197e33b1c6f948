use embedded_hal::digital::InputPin;
use homelink_api::Circuit;

use super::PresenceSensors;

/// Two PIR inputs with edges latched in software.
///
/// An edge is pending whenever a pin's level differs from the level seen at
/// the last acknowledgement, so both rising and falling transitions count.
pub struct PirPair<H, B>
where
    H: InputPin,
    B: InputPin,
{
    hallway: H,
    bathroom: B,
    acknowledged: [bool; 2],
}

fn level<P: InputPin>(pin: &mut P, circuit: Circuit) -> bool {
    match pin.is_high() {
        Ok(high) => high,
        Err(_) => {
            log::warn!("Failed to read {} presence sensor", circuit);
            false
        }
    }
}

impl<H, B> PirPair<H, B>
where
    H: InputPin,
    B: InputPin,
{
    pub fn new(mut hallway: H, mut bathroom: B) -> Self {
        let acknowledged = [
            level(&mut hallway, Circuit::Hallway),
            level(&mut bathroom, Circuit::Bathroom),
        ];
        Self {
            hallway,
            bathroom,
            acknowledged,
        }
    }

    /// True if either sensor has an unacknowledged edge.
    pub fn any_pending(&mut self) -> bool {
        Circuit::ALL
            .iter()
            .any(|&circuit| self.is_present(circuit) != self.acknowledged[index(circuit)])
    }
}

fn index(circuit: Circuit) -> usize {
    match circuit {
        Circuit::Hallway => 0,
        Circuit::Bathroom => 1,
    }
}

impl<H, B> PresenceSensors for PirPair<H, B>
where
    H: InputPin,
    B: InputPin,
{
    fn take_edge(&mut self, circuit: Circuit) -> bool {
        let current = self.is_present(circuit);
        let seen = &mut self.acknowledged[index(circuit)];
        let pending = current != *seen;
        *seen = current;
        pending
    }

    fn is_present(&mut self, circuit: Circuit) -> bool {
        match circuit {
            Circuit::Hallway => level(&mut self.hallway, circuit),
            Circuit::Bathroom => level(&mut self.bathroom, circuit),
        }
    }
}
