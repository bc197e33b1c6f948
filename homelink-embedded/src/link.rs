use embedded_hal_nb::nb;
use embedded_hal_nb::serial::{Error as _, Read, Write};
use homelink_api::Command;

/// Byte-wide, non-blocking view of the serial line between the two nodes.
pub trait SerialLink {
    /// Takes one byte off the line, or `None` when nothing is waiting.
    ///
    /// A received zero byte is reported as `None`: the protocol cannot tell
    /// it apart from an empty receive.
    fn try_receive(&mut self) -> Option<u8>;

    /// Hands one command to the transmitter without waiting for it.
    fn send(&mut self, command: Command);
}

/// [`SerialLink`] over an `embedded-hal-nb` UART.
pub struct NbSerialLink<S> {
    serial: S,
    dropped: u32,
}

impl<S> NbSerialLink<S>
where
    S: Read<u8> + Write<u8>,
{
    pub fn new(serial: S) -> Self {
        Self { serial, dropped: 0 }
    }

    /// Commands discarded because the transmitter was busy.
    pub fn dropped(&self) -> u32 {
        self.dropped
    }

    pub fn inner(&self) -> &S {
        &self.serial
    }

    pub fn inner_mut(&mut self) -> &mut S {
        &mut self.serial
    }

    pub fn release(self) -> S {
        self.serial
    }
}

impl<S> SerialLink for NbSerialLink<S>
where
    S: Read<u8> + Write<u8>,
{
    fn try_receive(&mut self) -> Option<u8> {
        match self.serial.read() {
            Ok(0) => None,
            Ok(byte) => Some(byte),
            Err(nb::Error::WouldBlock) => None,
            Err(nb::Error::Other(e)) => {
                log::warn!("Serial receive failed: {:?}", e.kind());
                None
            }
        }
    }

    fn send(&mut self, command: Command) {
        match self.serial.write(command.as_byte()) {
            Ok(()) => {}
            Err(nb::Error::WouldBlock) => {
                self.dropped = self.dropped.wrapping_add(1);
                log::warn!("Transmitter busy, dropped command {}", command);
            }
            Err(nb::Error::Other(e)) => {
                self.dropped = self.dropped.wrapping_add(1);
                log::warn!("Failed to send command {}: {:?}", command, e.kind());
            }
        }
    }
}
