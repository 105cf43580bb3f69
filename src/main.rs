//! Download the configured video with yt-dlp, reporting on stdout
//!
//! Diagnostics go to stderr through `tracing` (`RUST_LOG` to adjust); stdout
//! carries only the start line and what the engine reports.

use media_fetch::{Config, Console, engine, orchestrator};
use tracing_subscriber::{EnvFilter, fmt};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .init();

    let config = Config::default();
    config.validate()?;

    let engine = engine::from_config(&config.tools);
    orchestrator::run(&config, engine.as_ref(), &Console::stdout()).await?;
    Ok(())
}
