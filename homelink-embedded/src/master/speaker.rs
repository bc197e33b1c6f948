/// What the buzzer should do on the current tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpeakerAction {
    Idle,
    Toggle,
    /// Last tick of the beep: buzzer off, speaker flag cleared.
    Silence,
}

/// Free-running tick counter that bounds how long the buzzer sounds.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SpeakerGate {
    counter: u8,
}

impl SpeakerGate {
    pub const PERIOD: u8 = 60;

    pub fn new() -> Self {
        Self::default()
    }

    pub fn counter(&self) -> u8 {
        self.counter
    }

    pub fn restart(&mut self) {
        self.counter = 0;
    }

    /// Decides the buzzer action for this tick, then advances the counter.
    /// The counter runs whether or not the speaker is active.
    pub fn advance(&mut self, active: bool) -> SpeakerAction {
        let action = if !active {
            SpeakerAction::Idle
        } else if self.counter < Self::PERIOD - 1 {
            SpeakerAction::Toggle
        } else {
            SpeakerAction::Silence
        };
        self.counter = (self.counter + 1) % Self::PERIOD;
        action
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counter_wraps() {
        let mut gate = SpeakerGate::new();
        for _ in 0..SpeakerGate::PERIOD {
            assert_eq!(gate.advance(false), SpeakerAction::Idle);
        }
        assert_eq!(gate.counter(), 0);
    }

    #[test]
    fn test_beep_lasts_one_period() {
        let mut gate = SpeakerGate::new();
        gate.advance(false);
        gate.advance(false);
        gate.restart();

        for tick in 0..59 {
            assert_eq!(gate.advance(true), SpeakerAction::Toggle, "tick {}", tick);
        }
        assert_eq!(gate.advance(true), SpeakerAction::Silence);
        assert_eq!(gate.counter(), 0);
    }
}
