mod pir;

pub use pir::PirPair;

use homelink_api::Circuit;

/// The Slave's two occupancy sensors, one per lighting circuit.
pub trait PresenceSensors {
    /// Reports whether an edge is pending on the circuit's sensor and
    /// acknowledges it in the same call.
    fn take_edge(&mut self, circuit: Circuit) -> bool;

    /// Current sensor level; `true` means someone is there.
    fn is_present(&mut self, circuit: Circuit) -> bool;
}

impl<S: PresenceSensors + ?Sized> PresenceSensors for &mut S {
    fn take_edge(&mut self, circuit: Circuit) -> bool {
        (**self).take_edge(circuit)
    }

    fn is_present(&mut self, circuit: Circuit) -> bool {
        (**self).is_present(circuit)
    }
}
