//! CLI command implementations.

use std::path::Path;

use anyhow::Context;
use console::style;

use immidoc::config::Settings;
use immidoc::pipeline::DocumentPipeline;

/// Process one image file and print the result JSON to stdout.
///
/// Exits non-zero only on I/O problems; a `success = false` pipeline
/// outcome is still a valid result and prints normally.
pub fn cmd_process(
    settings: &Settings,
    image: &Path,
    pretty: bool,
    username: Option<&str>,
) -> anyhow::Result<()> {
    if let Some(username) = username {
        tracing::info!(username = %username, image = %image.display(), "processing document");
    }

    let bytes = std::fs::read(image)
        .with_context(|| format!("Failed to read image file: {}", image.display()))?;

    let pipeline = DocumentPipeline::new(settings);
    let result = pipeline.process_bytes(&bytes);

    let json = if pretty {
        serde_json::to_string_pretty(&result)?
    } else {
        serde_json::to_string(&result)?
    };
    println!("{}", json);

    Ok(())
}

/// Start the HTTP server.
pub async fn cmd_serve(
    settings: &Settings,
    host: Option<String>,
    port: Option<u16>,
) -> anyhow::Result<()> {
    let host = host.unwrap_or_else(|| settings.host.clone());
    let port = port.unwrap_or(settings.port);

    println!(
        "{} Starting ImmiDoc server at http://{}:{}",
        style("→").cyan(),
        host,
        port
    );
    println!("  Press Ctrl+C to stop");

    immidoc::server::serve(settings, &host, port).await
}

/// Report engine availability and the effective OCR configuration.
pub fn cmd_status(settings: &Settings) -> anyhow::Result<()> {
    let pipeline = DocumentPipeline::new(settings);

    if pipeline.engine_available() {
        println!("{} Tesseract OCR is ready", style("✓").green());
    } else {
        println!(
            "{} OCR engine not available - requests answer with placeholder text",
            style("⚠").yellow()
        );
        println!("  {}", pipeline.availability_hint());
    }

    println!();
    println!("OCR configuration:");
    println!("  binary:              {}", settings.tesseract_bin);
    println!("  languages:           {}", settings.ocr_languages);
    println!("  fallback languages:  {}", settings.ocr_fallback_languages);
    println!("  engine mode (--oem): {}", settings.ocr_engine_mode);
    println!("  page mode (--psm):   {}", settings.page_segmentation_mode);

    Ok(())
}
