//! pcx2sms - convert a PCX image into SMS 4bpp planar tiles
//!
//! Usage: `pcx2sms <INPUT> <OUTPUT>`

use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use pcx2sms::{ConvertRequest, Unstoppable};

#[derive(Parser)]
#[command(name = "pcx2sms")]
#[command(about = "Convert a PCX image into Sega Master System tiles")]
#[command(version)]
struct Cli {
    /// Input PCX file
    input: PathBuf,

    /// Output raw tile file
    output: PathBuf,
}

fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let input = File::open(&cli.input)
        .with_context(|| format!("Failed to open input {:?}", cli.input))?;
    let output = File::create(&cli.output)
        .with_context(|| format!("Failed to create output {:?}", cli.output))?;

    tracing::info!("Converting {:?} -> {:?}", cli.input, cli.output);
    let summary = ConvertRequest::new()
        .convert(input, BufWriter::new(output), Unstoppable)
        .with_context(|| format!("Failed to convert {:?}", cli.input))?;

    tracing::info!(
        "Image is {}x{}: wrote {} tiles ({} bytes)",
        summary.header.width,
        summary.header.height,
        summary.tiles,
        summary.bytes_written
    );
    Ok(())
}
