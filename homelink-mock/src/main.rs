use std::env;

use homelink_mock::settings::Settings;
use homelink_mock::{SimulationError, run};

#[tokio::main]
async fn main() -> Result<(), SimulationError> {
    let settings = match env::args().nth(1) {
        Some(path) => Settings::from_path(path)?,
        None => Settings::new()?,
    };

    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            let app_name = env!("CARGO_PKG_NAME").replace('-', "_");
            let level = settings.logger.level.as_str();

            format!("{app_name}={level},homelink_embedded={level}").into()
        }))
        .init();

    let report = run(&settings).await?;
    println!("{}", serde_json::to_string_pretty(&report)?);

    Ok(())
}
