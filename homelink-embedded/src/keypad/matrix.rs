use embedded_hal::digital::{InputPin, OutputPin};

use super::{Key, Keypad};

/// 4x4 matrix keypad: columns are driven outputs, rows are pulled-up inputs.
///
/// A column is grounded at a time; a row reading low means the key at that
/// crossing is held.
pub struct MatrixKeypad<Col, Row>
where
    Col: OutputPin,
    Row: InputPin,
{
    columns: [Col; 4],
    rows: [Row; 4],
}

impl<Col, Row> MatrixKeypad<Col, Row>
where
    Col: OutputPin,
    Row: InputPin,
{
    pub fn new(columns: [Col; 4], rows: [Row; 4]) -> Self {
        let mut keypad = Self { columns, rows };
        keypad.release_columns();
        keypad
    }

    fn drive_columns(&mut self, grounded: Option<usize>) {
        for (i, pin) in self.columns.iter_mut().enumerate() {
            let low = match grounded {
                Some(column) => i == column,
                None => true,
            };
            if low {
                pin.set_low().ok();
            } else {
                pin.set_high().ok();
            }
        }
    }

    fn release_columns(&mut self) {
        for pin in self.columns.iter_mut() {
            pin.set_high().ok();
        }
    }

    fn pressed_row(&mut self) -> Option<usize> {
        self.rows
            .iter_mut()
            .position(|pin| pin.is_low().unwrap_or(false))
    }

    pub fn release(self) -> ([Col; 4], [Row; 4]) {
        (self.columns, self.rows)
    }
}

impl<Col, Row> Keypad for MatrixKeypad<Col, Row>
where
    Col: OutputPin,
    Row: InputPin,
{
    fn read_key(&mut self) -> Option<Key> {
        // All columns low: an idle pad needs one pass over the rows
        self.drive_columns(None);
        if self.pressed_row().is_none() {
            self.release_columns();
            return None;
        }

        let mut found = None;
        for column in 0..4 {
            self.drive_columns(Some(column));
            if let Some(row) = self.pressed_row() {
                found = Some(Key::LAYOUT[row][column]);
                break;
            }
        }

        self.release_columns();
        found
    }
}
