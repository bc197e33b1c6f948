#![cfg_attr(not(feature = "std"), no_std)]

//! Single-byte command alphabet spoken between the Master and Slave nodes.
//!
//! Every message on the link is exactly one byte. There is no framing, no
//! addressing and no acknowledgement: a byte either maps onto a [`Command`]
//! or is ignored by the receiver.

#[cfg(feature = "std")]
extern crate std;

pub mod circuit;
pub mod command;
pub mod error;

pub use circuit::Circuit;
pub use command::{Command, Origin};
pub use error::{ProtocolError, Result};
