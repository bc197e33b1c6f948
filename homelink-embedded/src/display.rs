use core::fmt::Write;

use heapless::String;

use crate::device::{MasterDevice, MasterDevices};

pub const COLUMNS: usize = 12;
pub const ROWS: usize = 6;

pub type Line = String<COLUMNS>;

const TITLE: &str = "___MASTER___";

/// Rows below the title, in screen order.
const STATUS_ROWS: [(&str, MasterDevice); 5] = [
    ("HALLWAY:", MasterDevice::Hallway),
    ("BATHROOM:", MasterDevice::Bathroom),
    ("LAMP:", MasterDevice::Lamp),
    ("POLE:", MasterDevice::Pole),
    ("FAN:", MasterDevice::Fan),
];

/// Character screen attached to the Master.
pub trait StatusDisplay {
    fn write_line(&mut self, row: usize, text: &str);
}

impl<D: StatusDisplay + ?Sized> StatusDisplay for &mut D {
    fn write_line(&mut self, row: usize, text: &str) {
        (**self).write_line(row, text)
    }
}

fn status_line(label: &str, on: bool) -> Line {
    let mut line = Line::new();
    let state = if on { " ON" } else { "OFF" };
    write!(line, "{:<9}{}", label, state).ok();
    line
}

/// Lays out the status screen for the given device register.
pub fn render(devices: &MasterDevices) -> [Line; ROWS] {
    let mut lines: [Line; ROWS] = Default::default();
    lines[0].push_str(TITLE).ok();
    for (row, (label, device)) in STATUS_ROWS.iter().enumerate() {
        lines[row + 1] = status_line(label, devices.is_on(*device));
    }
    lines
}

/// Renders the register and pushes every row to the display.
pub fn refresh<D: StatusDisplay>(display: &mut D, devices: &MasterDevices) {
    for (row, line) in render(devices).iter().enumerate() {
        display.write_line(row, line.as_str());
    }
}
