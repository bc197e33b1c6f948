use core::fmt;

use homelink_api::ProtocolError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    InvalidKey(char),
    Protocol(ProtocolError),
    LinkFault,
    NotStarted,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::InvalidKey(c) => write!(f, "Invalid keypad key: {:?}", c),
            Error::Protocol(e) => write!(f, "Protocol error: {}", e),
            Error::LinkFault => write!(f, "Serial link fault"),
            Error::NotStarted => write!(f, "Node not started"),
        }
    }
}

impl From<ProtocolError> for Error {
    fn from(err: ProtocolError) -> Self {
        Error::Protocol(err)
    }
}

impl embedded_hal_nb::serial::Error for Error {
    fn kind(&self) -> embedded_hal_nb::serial::ErrorKind {
        embedded_hal_nb::serial::ErrorKind::Other
    }
}

#[cfg(feature = "std")]
impl std::error::Error for Error {}

pub type Result<T> = core::result::Result<T, Error>;
