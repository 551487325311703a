// vizstream_scenarios/src/main.rs

use std::io::Write;

use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use vizstream_scenarios::cli::Cli;
use vizstream_scenarios::config::load_scenario_file;
use vizstream_scenarios::prelude::*;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Diagnostics go to stderr so stdout stays a clean envelope stream.
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let file = load_scenario_file(&cli.scenario)?;

    let rate_hz = cli.rate.unwrap_or(file.stream.rate_hz);
    let mut frames = cli.frames.unwrap_or(file.stream.frames);
    if frames == 0 {
        // Stream the whole configured duration.
        frames = (file.scenario.get_duration_seconds() * rate_hz).ceil() as u32;
    }

    info!(
        scenario = file.scenario.get_kind_str(),
        rate_hz, frames, "streaming scenario"
    );

    let mut scenario = build_scenario(&file.scenario);
    let mut out = std::io::stdout().lock();

    emit(&mut out, &scenario.get_metadata()?, cli.pretty)?;
    for frame in 0..frames {
        let time_offset = f64::from(frame) / rate_hz;
        emit(&mut out, &scenario.get_message(time_offset)?, cli.pretty)?;
    }

    Ok(())
}

fn emit(
    out: &mut impl Write,
    envelope: &Envelope,
    pretty: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let json = if pretty {
        envelope.to_json_string_pretty()?
    } else {
        envelope.to_json_string()?
    };
    writeln!(out, "{json}")?;
    Ok(())
}
