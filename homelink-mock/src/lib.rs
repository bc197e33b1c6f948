use crate::settings::Settings;

mod error;
pub mod hardware;
pub mod settings;
mod simulator;
pub mod wire;

pub use error::SimulationError;
pub use simulator::{CircuitLevels, MasterReport, RelayState, Report, Simulator, SlaveReport};

/// Builds a simulator from `settings` and runs it to completion.
pub async fn run(settings: &Settings) -> Result<Report, SimulationError> {
    let mut simulator = Simulator::new(settings)?;
    simulator.run().await
}
