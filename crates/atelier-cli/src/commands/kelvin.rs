//! Color temperature lookup

use anyhow::Result;
use atelier_core::kelvin_to_color;
use atelier_core::lighting::{MAX_KELVIN, MIN_KELVIN};

pub fn run(kelvin: f64) -> Result<()> {
    if !kelvin.is_finite() {
        anyhow::bail!("Temperature must be a finite number");
    }

    let clamped = kelvin.clamp(MIN_KELVIN, MAX_KELVIN);
    let color = kelvin_to_color(kelvin);

    if clamped != kelvin {
        println!("{}K is out of range, using {}K", kelvin, clamped);
    }
    println!(
        "{}K -> {} (r: {}, g: {}, b: {})",
        clamped,
        color.to_hex_string(),
        color.r,
        color.g,
        color.b
    );

    Ok(())
}
