// vizstream_scenarios/src/cli.rs

use clap::Parser;
use std::path::PathBuf;

/// Vizstream: deterministic telemetry-visualization stream generators.
///
/// This struct defines the command-line arguments for the `vizstream`
/// binary, which streams protocol envelopes as JSON lines on stdout.
#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// The path to the scenario TOML file to stream.
    #[arg(short, long, default_value = "assets/scenarios/orbit.toml")]
    pub scenario: PathBuf,

    /// Override the number of state updates to emit (0 streams the whole
    /// configured duration).
    #[arg(long)]
    pub frames: Option<u32>,

    /// Override the configured update rate, in Hz.
    #[arg(long)]
    pub rate: Option<f64>,

    /// Pretty-print each envelope instead of emitting compact JSON lines.
    #[arg(long, default_value_t = false)]
    pub pretty: bool,
}
