// vizstream_scenarios/examples/01_orbit_stream.rs

//! Minimal end-to-end run: build the orbit scenario directly (no TOML, no
//! CLI) and print the metadata plus the first few state updates.

use vizstream_scenarios::prelude::*;

fn main() -> Result<(), BuildError> {
    let mut scenario = OrbitScenario::new(OrbitConfig::default());

    println!("{}", scenario.get_metadata()?.to_json_string_pretty()?);

    // One full draw followed by incremental updates at 10 Hz.
    for frame in 0..5 {
        let envelope = scenario.get_message(f64::from(frame) * 0.1)?;
        println!("{}", envelope.to_json_string_pretty()?);
    }

    Ok(())
}
