use homelink_api::ProtocolError;

#[derive(Debug, thiserror::Error)]
pub enum SimulationError {
    #[error("Failed to read settings: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse settings: {0}")]
    Settings(#[from] toml::de::Error),

    #[error("Invalid setting: {0}")]
    InvalidSetting(String),

    #[error("Node error: {0}")]
    Node(#[from] homelink_embedded::Error),

    #[error("Protocol error: {0}")]
    Protocol(#[from] ProtocolError),

    #[error("Failed to encode report: {0}")]
    Report(#[from] serde_json::Error),
}
