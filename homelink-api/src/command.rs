use core::fmt;

use serde::{Deserialize, Serialize};

use crate::circuit::Circuit;
use crate::error::ProtocolError;

/// Which node puts a command on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Origin {
    Master,
    Slave,
}

#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Command {
    HallwayOff = b'0',
    HallwayOn = b'1',
    BathroomOff = b'2',
    BathroomOn = b'3',
    HallwayBrighter = b'A',
    HallwayDimmer = b'B',
    BathroomBrighter = b'C',
    BathroomDimmer = b'D',
    AllOff = b'#',

    HallwayMotion = b'%',
    HallwayClear = b'_',
    BathroomMotion = b'$',
    BathroomClear = b'-',
    SlaveBooted = b'@',
}

impl Command {
    pub const fn as_byte(self) -> u8 {
        self as u8
    }

    /// Decodes a received byte. Anything outside the alphabet, including the
    /// zero byte, yields `None` and must be ignored by the receiver.
    pub const fn from_byte(byte: u8) -> Option<Self> {
        let command = match byte {
            b'0' => Command::HallwayOff,
            b'1' => Command::HallwayOn,
            b'2' => Command::BathroomOff,
            b'3' => Command::BathroomOn,
            b'A' => Command::HallwayBrighter,
            b'B' => Command::HallwayDimmer,
            b'C' => Command::BathroomBrighter,
            b'D' => Command::BathroomDimmer,
            b'#' => Command::AllOff,
            b'%' => Command::HallwayMotion,
            b'_' => Command::HallwayClear,
            b'$' => Command::BathroomMotion,
            b'-' => Command::BathroomClear,
            b'@' => Command::SlaveBooted,
            _ => return None,
        };
        Some(command)
    }

    pub const fn origin(self) -> Origin {
        match self {
            Command::HallwayMotion
            | Command::HallwayClear
            | Command::BathroomMotion
            | Command::BathroomClear
            | Command::SlaveBooted => Origin::Slave,
            _ => Origin::Master,
        }
    }

    /// The circuit a command addresses, `None` for the global ones.
    pub const fn circuit(self) -> Option<Circuit> {
        match self {
            Command::HallwayOff
            | Command::HallwayOn
            | Command::HallwayBrighter
            | Command::HallwayDimmer
            | Command::HallwayMotion
            | Command::HallwayClear => Some(Circuit::Hallway),
            Command::BathroomOff
            | Command::BathroomOn
            | Command::BathroomBrighter
            | Command::BathroomDimmer
            | Command::BathroomMotion
            | Command::BathroomClear => Some(Circuit::Bathroom),
            Command::AllOff | Command::SlaveBooted => None,
        }
    }

    pub const fn power(circuit: Circuit, on: bool) -> Self {
        match (circuit, on) {
            (Circuit::Hallway, true) => Command::HallwayOn,
            (Circuit::Hallway, false) => Command::HallwayOff,
            (Circuit::Bathroom, true) => Command::BathroomOn,
            (Circuit::Bathroom, false) => Command::BathroomOff,
        }
    }

    pub const fn brighter(circuit: Circuit) -> Self {
        match circuit {
            Circuit::Hallway => Command::HallwayBrighter,
            Circuit::Bathroom => Command::BathroomBrighter,
        }
    }

    pub const fn dimmer(circuit: Circuit) -> Self {
        match circuit {
            Circuit::Hallway => Command::HallwayDimmer,
            Circuit::Bathroom => Command::BathroomDimmer,
        }
    }

    /// Status report for a PIR level on the given circuit.
    pub const fn presence(circuit: Circuit, present: bool) -> Self {
        match (circuit, present) {
            (Circuit::Hallway, true) => Command::HallwayMotion,
            (Circuit::Hallway, false) => Command::HallwayClear,
            (Circuit::Bathroom, true) => Command::BathroomMotion,
            (Circuit::Bathroom, false) => Command::BathroomClear,
        }
    }
}

impl TryFrom<u8> for Command {
    type Error = ProtocolError;

    fn try_from(byte: u8) -> Result<Self, Self::Error> {
        if byte == 0 {
            return Err(ProtocolError::NullByte);
        }
        Command::from_byte(byte).ok_or(ProtocolError::UnknownCommand(byte))
    }
}

impl From<Command> for u8 {
    fn from(command: Command) -> u8 {
        command.as_byte()
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "'{}'", self.as_byte() as char)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALPHABET: &[(u8, Command)] = &[
        (b'0', Command::HallwayOff),
        (b'1', Command::HallwayOn),
        (b'2', Command::BathroomOff),
        (b'3', Command::BathroomOn),
        (b'A', Command::HallwayBrighter),
        (b'B', Command::HallwayDimmer),
        (b'C', Command::BathroomBrighter),
        (b'D', Command::BathroomDimmer),
        (b'#', Command::AllOff),
        (b'%', Command::HallwayMotion),
        (b'_', Command::HallwayClear),
        (b'$', Command::BathroomMotion),
        (b'-', Command::BathroomClear),
        (b'@', Command::SlaveBooted),
    ];

    #[test]
    fn test_alphabet_bytes() {
        for &(byte, command) in ALPHABET {
            assert_eq!(Command::from_byte(byte), Some(command));
            assert_eq!(command.as_byte(), byte);
        }
    }

    #[test]
    fn test_unknown_bytes_are_ignored() {
        assert_eq!(Command::from_byte(b'4'), None);
        assert_eq!(Command::from_byte(b'*'), None);
        assert_eq!(Command::from_byte(b'a'), None);
        assert_eq!(Command::from_byte(0), None);

        assert_eq!(Command::try_from(0), Err(ProtocolError::NullByte));
        assert_eq!(
            Command::try_from(b'x'),
            Err(ProtocolError::UnknownCommand(b'x'))
        );
    }

    #[test]
    fn test_origin() {
        let from_slave: Vec<Command> = ALPHABET
            .iter()
            .map(|&(_, c)| c)
            .filter(|c| c.origin() == Origin::Slave)
            .collect();

        assert_eq!(
            from_slave,
            vec![
                Command::HallwayMotion,
                Command::HallwayClear,
                Command::BathroomMotion,
                Command::BathroomClear,
                Command::SlaveBooted,
            ]
        );
    }

    #[test]
    fn test_circuit_constructors() {
        for circuit in Circuit::ALL {
            for on in [true, false] {
                assert_eq!(Command::power(circuit, on).circuit(), Some(circuit));
                assert_eq!(Command::presence(circuit, on).circuit(), Some(circuit));
            }
            assert_eq!(Command::brighter(circuit).circuit(), Some(circuit));
            assert_eq!(Command::dimmer(circuit).circuit(), Some(circuit));
        }

        assert_eq!(Command::power(Circuit::Bathroom, true).as_byte(), b'3');
        assert_eq!(Command::dimmer(Circuit::Bathroom).as_byte(), b'D');
        assert_eq!(Command::presence(Circuit::Hallway, false).as_byte(), b'_');
        assert_eq!(Command::AllOff.circuit(), None);
    }

    #[test]
    fn test_display_and_serde() {
        assert_eq!(Command::SlaveBooted.to_string(), "'@'");

        let json = serde_json::to_string(&Command::HallwayOn).unwrap();
        assert_eq!(json, "\"HallwayOn\"");
        let parsed: Command = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, Command::HallwayOn);
    }
}
