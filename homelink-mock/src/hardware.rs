use std::cell::{Cell, RefCell};
use std::convert::Infallible;
use std::rc::Rc;

use embedded_hal::digital::{self, InputPin, OutputPin};
use embedded_hal::pwm::{self, SetDutyCycle};
use homelink_embedded::{Key, Keypad, StatusDisplay};

/// A GPIO line shared between a driver and the simulator.
#[derive(Debug, Clone, Default)]
pub struct VirtualPin {
    level: Rc<Cell<bool>>,
    edges: Rc<Cell<u32>>,
}

impl VirtualPin {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_set(&self) -> bool {
        self.level.get()
    }

    /// Level changes seen so far.
    pub fn edges(&self) -> u32 {
        self.edges.get()
    }

    pub fn drive(&self, high: bool) {
        if self.level.replace(high) != high {
            self.edges.set(self.edges.get() + 1);
        }
    }
}

impl digital::ErrorType for VirtualPin {
    type Error = Infallible;
}

impl OutputPin for VirtualPin {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        self.drive(false);
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        self.drive(true);
        Ok(())
    }
}

impl InputPin for VirtualPin {
    fn is_high(&mut self) -> Result<bool, Self::Error> {
        Ok(self.level.get())
    }

    fn is_low(&mut self) -> Result<bool, Self::Error> {
        Ok(!self.level.get())
    }
}

/// A PWM channel that remembers its current duty.
#[derive(Debug, Clone)]
pub struct VirtualPwm {
    duty: Rc<Cell<u16>>,
    max_duty: u16,
}

impl VirtualPwm {
    pub fn new(max_duty: u16) -> Self {
        Self {
            duty: Rc::new(Cell::new(0)),
            max_duty,
        }
    }

    pub fn duty(&self) -> u16 {
        self.duty.get()
    }
}

impl pwm::ErrorType for VirtualPwm {
    type Error = Infallible;
}

impl SetDutyCycle for VirtualPwm {
    fn max_duty_cycle(&self) -> u16 {
        self.max_duty
    }

    fn set_duty_cycle(&mut self, duty: u16) -> Result<(), Self::Error> {
        self.duty.set(duty);
        Ok(())
    }
}

/// Keypad whose held key is set by the simulator.
#[derive(Debug, Clone, Default)]
pub struct VirtualKeypad {
    held: Rc<Cell<Option<Key>>>,
}

impl VirtualKeypad {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn press(&self, key: Key) {
        self.held.set(Some(key));
    }

    pub fn release(&self) {
        self.held.set(None);
    }
}

impl Keypad for VirtualKeypad {
    fn read_key(&mut self) -> Option<Key> {
        self.held.get()
    }
}

/// Status screen that logs rows as they change.
#[derive(Debug, Clone, Default)]
pub struct LogDisplay {
    rows: Rc<RefCell<Vec<String>>>,
}

impl LogDisplay {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn rows(&self) -> Vec<String> {
        self.rows.borrow().clone()
    }
}

impl StatusDisplay for LogDisplay {
    fn write_line(&mut self, row: usize, text: &str) {
        let mut rows = self.rows.borrow_mut();
        if rows.len() <= row {
            rows.resize(row + 1, String::new());
        }
        if rows[row] != text {
            tracing::info!("Display row {}: {}", row, text);
            rows[row] = text.to_string();
        }
    }
}
