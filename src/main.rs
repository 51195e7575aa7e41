use anyhow::Context as _;
use dotenvy::dotenv;
use std::path::PathBuf;
use tracing::info;

mod config;
mod narration;
mod pipeline;
mod speech;

use config::Settings;
use pipeline::Pipeline;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();
    tracing_subscriber::fmt::init();

    let mut args = std::env::args().skip(1);
    let input = args
        .next()
        .map(PathBuf::from)
        .context("Usage: demovoice <transcript-file> [output-file]")?;
    let output = args
        .next()
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("narration.mp3"));

    let raw_transcript = std::fs::read_to_string(&input)
        .with_context(|| format!("Failed to read transcript from {}", input.display()))?;
    info!(
        "Loaded transcript ({} chars) from {}",
        raw_transcript.len(),
        input.display()
    );

    let settings = Settings::from_env();
    let pipeline = Pipeline::from_settings(&settings).context("Failed to configure pipeline")?;

    let audio = pipeline
        .run(&raw_transcript)
        .await
        .context("Pipeline failed")?;

    if audio.is_empty() {
        info!("No narration to synthesize, nothing written");
        return Ok(());
    }

    std::fs::write(&output, &audio)
        .with_context(|| format!("Failed to write audio to {}", output.display()))?;
    info!("Wrote {} bytes of audio to {}", audio.len(), output.display());

    Ok(())
}
