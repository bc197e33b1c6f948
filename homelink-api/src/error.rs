use core::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProtocolError {
    /// Byte is not part of the command alphabet
    UnknownCommand(u8),
    /// Zero byte, indistinguishable from an empty receive
    NullByte,
}

impl fmt::Display for ProtocolError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownCommand(b) => write!(f, "Unknown command byte: 0x{:02x}", b),
            Self::NullByte => write!(f, "Null byte carries no command"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for ProtocolError {}

pub type Result<T> = core::result::Result<T, ProtocolError>;
