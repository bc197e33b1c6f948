use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::rc::Rc;

use embedded_hal_nb::nb;
use embedded_hal_nb::serial::{ErrorType, Read, Write};
use homelink_embedded::Error;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::Serialize;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct WireStats {
    pub delivered: u32,
    pub lost: u32,
}

struct Lossy {
    rng: StdRng,
    loss_rate: f64,
}

/// One end of an in-memory UART pair.
///
/// Writes land in the peer's receive queue unless the wire decides to lose
/// the byte. Reads never block.
#[derive(Clone)]
pub struct SerialPort {
    name: &'static str,
    rx: Rc<RefCell<VecDeque<u8>>>,
    tx: Rc<RefCell<VecDeque<u8>>>,
    lossy: Rc<RefCell<Lossy>>,
    stats: Rc<Cell<WireStats>>,
}

/// Builds the two cross-connected ends of the link.
pub fn pair(loss_rate: f64, seed: u64) -> (SerialPort, SerialPort) {
    let a_to_b = Rc::new(RefCell::new(VecDeque::new()));
    let b_to_a = Rc::new(RefCell::new(VecDeque::new()));
    let lossy = Rc::new(RefCell::new(Lossy {
        rng: StdRng::seed_from_u64(seed),
        loss_rate,
    }));

    let master = SerialPort {
        name: "master",
        rx: b_to_a.clone(),
        tx: a_to_b.clone(),
        lossy: lossy.clone(),
        stats: Rc::new(Cell::new(WireStats::default())),
    };
    let slave = SerialPort {
        name: "slave",
        rx: a_to_b,
        tx: b_to_a,
        lossy,
        stats: Rc::new(Cell::new(WireStats::default())),
    };
    (master, slave)
}

impl SerialPort {
    /// Traffic written by this end.
    pub fn stats(&self) -> WireStats {
        self.stats.get()
    }

    /// Bytes waiting to be read on this end.
    pub fn pending(&self) -> usize {
        self.rx.borrow().len()
    }

    /// Pushes a byte straight into this end's receive queue.
    pub fn inject(&self, byte: u8) {
        self.rx.borrow_mut().push_back(byte);
    }

    /// Drops anything still waiting in the receive queue, as a UART reset does.
    pub fn flush_rx(&self) {
        self.rx.borrow_mut().clear();
    }
}

impl ErrorType for SerialPort {
    type Error = Error;
}

impl Read<u8> for SerialPort {
    fn read(&mut self) -> nb::Result<u8, Self::Error> {
        self.rx.borrow_mut().pop_front().ok_or(nb::Error::WouldBlock)
    }
}

impl Write<u8> for SerialPort {
    fn write(&mut self, word: u8) -> nb::Result<(), Self::Error> {
        let mut stats = self.stats.get();
        let lost = {
            let mut lossy = self.lossy.borrow_mut();
            let rate = lossy.loss_rate;
            rate > 0.0 && lossy.rng.random_bool(rate)
        };

        if lost {
            stats.lost += 1;
            tracing::debug!("Wire lost {:?} from {}", word as char, self.name);
        } else {
            stats.delivered += 1;
            self.tx.borrow_mut().push_back(word);
        }
        self.stats.set(stats);
        Ok(())
    }

    fn flush(&mut self) -> nb::Result<(), Self::Error> {
        Ok(())
    }
}
