use serde::{Deserialize, Serialize};

/// PWM period in counts shared by both dimmer channels.
pub const PWM_PERIOD: u16 = 50_000;
/// Duty written to a channel to switch its lamp off. Never stored as a level.
pub const OFF_DUTY: u16 = 2;

/// On-duty of a dimmable circuit, in counts out of [`PWM_PERIOD`].
///
/// Levels only move in whole steps and are clamped to
/// [`Brightness::MIN`]..=[`Brightness::MAX`]. The level outlives on/off
/// cycles of its circuit so switching a lamp back on restores it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Brightness(u16);

impl Brightness {
    pub const MIN: u16 = 3_500;
    pub const MAX: u16 = PWM_PERIOD - 1;
    pub const STEP: u16 = 3_500;
    pub const DEFAULT: u16 = 40_000;

    pub fn new(duty: u16) -> Self {
        Self(duty.clamp(Self::MIN, Self::MAX))
    }

    pub fn duty(&self) -> u16 {
        self.0
    }

    pub fn brighten(&mut self) -> u16 {
        self.0 = self.0.saturating_add(Self::STEP).min(Self::MAX);
        self.0
    }

    pub fn dim(&mut self) -> u16 {
        self.0 = self.0.saturating_sub(Self::STEP).max(Self::MIN);
        self.0
    }
}

impl Default for Brightness {
    fn default() -> Self {
        Self(Self::DEFAULT)
    }
}
