//! Recording doubles for pins, PWM channels and the UART.

use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::convert::Infallible;
use std::rc::Rc;
use std::vec::Vec;

use embedded_hal::digital::{ErrorType, InputPin, OutputPin};
use embedded_hal::pwm::{self, SetDutyCycle};
use embedded_hal_nb::nb;
use embedded_hal_nb::serial;

use crate::error::Error;

#[derive(Debug, Clone, Default)]
pub struct MockPin {
    pub states: Rc<RefCell<Vec<bool>>>,
    pub level: Rc<Cell<bool>>,
}

impl MockPin {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get_states(&self) -> Vec<bool> {
        self.states.borrow().clone()
    }

    pub fn last_state(&self) -> Option<bool> {
        self.states.borrow().last().copied()
    }

    pub fn set_level(&self, high: bool) {
        self.level.set(high);
    }
}

impl ErrorType for MockPin {
    type Error = Infallible;
}

impl OutputPin for MockPin {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        self.states.borrow_mut().push(false);
        self.level.set(false);
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        self.states.borrow_mut().push(true);
        self.level.set(true);
        Ok(())
    }
}

impl InputPin for MockPin {
    fn is_high(&mut self) -> Result<bool, Self::Error> {
        Ok(self.level.get())
    }

    fn is_low(&mut self) -> Result<bool, Self::Error> {
        Ok(!self.level.get())
    }
}

#[derive(Debug, Clone)]
pub struct MockPwm {
    pub duties: Rc<RefCell<Vec<u16>>>,
    max_duty: u16,
}

impl MockPwm {
    pub fn new(max_duty: u16) -> Self {
        Self {
            duties: Rc::new(RefCell::new(Vec::new())),
            max_duty,
        }
    }

    pub fn get_duties(&self) -> Vec<u16> {
        self.duties.borrow().clone()
    }

    pub fn last_duty(&self) -> Option<u16> {
        self.duties.borrow().last().copied()
    }
}

impl pwm::ErrorType for MockPwm {
    type Error = Infallible;
}

impl SetDutyCycle for MockPwm {
    fn max_duty_cycle(&self) -> u16 {
        self.max_duty
    }

    fn set_duty_cycle(&mut self, duty: u16) -> Result<(), Self::Error> {
        self.duties.borrow_mut().push(duty);
        Ok(())
    }
}

#[derive(Debug, Clone, Default)]
pub struct MockSerial {
    rx: Rc<RefCell<VecDeque<u8>>>,
    tx: Rc<RefCell<Vec<u8>>>,
    busy: bool,
    faulty: bool,
}

impl MockSerial {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_rx(&self, bytes: &[u8]) {
        self.rx.borrow_mut().extend(bytes.iter().copied());
    }

    pub fn sent(&self) -> Vec<u8> {
        self.tx.borrow().clone()
    }

    pub fn clear_sent(&self) {
        self.tx.borrow_mut().clear();
    }

    pub fn set_busy(&mut self, busy: bool) {
        self.busy = busy;
    }

    pub fn set_faulty(&mut self, faulty: bool) {
        self.faulty = faulty;
    }
}

impl serial::ErrorType for MockSerial {
    type Error = Error;
}

impl serial::Read<u8> for MockSerial {
    fn read(&mut self) -> nb::Result<u8, Self::Error> {
        if self.faulty {
            return Err(nb::Error::Other(Error::LinkFault));
        }
        self.rx.borrow_mut().pop_front().ok_or(nb::Error::WouldBlock)
    }
}

impl serial::Write<u8> for MockSerial {
    fn write(&mut self, word: u8) -> nb::Result<(), Self::Error> {
        if self.faulty {
            return Err(nb::Error::Other(Error::LinkFault));
        }
        if self.busy {
            return Err(nb::Error::WouldBlock);
        }
        self.tx.borrow_mut().push(word);
        Ok(())
    }

    fn flush(&mut self) -> nb::Result<(), Self::Error> {
        Ok(())
    }
}
