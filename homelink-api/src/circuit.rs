use core::fmt;

use serde::{Deserialize, Serialize};

/// A dimmable lighting circuit driven by the Slave.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Circuit {
    Hallway,
    Bathroom,
}

impl Circuit {
    /// Both circuits in the order the Slave services them.
    pub const ALL: [Circuit; 2] = [Circuit::Hallway, Circuit::Bathroom];

    pub fn name(&self) -> &'static str {
        match self {
            Circuit::Hallway => "hallway",
            Circuit::Bathroom => "bathroom",
        }
    }
}

impl fmt::Display for Circuit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
