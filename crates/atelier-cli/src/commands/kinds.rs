//! Object kind listing

use anyhow::Result;
use atelier_core::{Color, ObjectKind, Vec3};
use serde::Serialize;

#[derive(Serialize)]
struct KindInfo {
    kind: ObjectKind,
    footprint: Vec3,
    position: Vec3,
    color: Color,
}

pub fn run(format: &str) -> Result<()> {
    let kinds: Vec<KindInfo> = ObjectKind::ALL
        .iter()
        .map(|kind| {
            let defaults = kind.defaults();
            KindInfo {
                kind: *kind,
                footprint: defaults.footprint,
                position: defaults.position(),
                color: defaults.color,
            }
        })
        .collect();

    match format {
        "text" => {
            for info in &kinds {
                println!(
                    "{:<12} footprint {:.2} x {:.2} x {:.2}  rests at y = {:.3}  {}",
                    info.kind.as_str(),
                    info.footprint.x,
                    info.footprint.y,
                    info.footprint.z,
                    info.position.y,
                    info.color.to_hex_string()
                );
            }
        }
        "json" => println!("{}", serde_json::to_string_pretty(&kinds)?),
        "toml" => {
            #[derive(Serialize)]
            struct Kinds<'a> {
                kind: &'a [KindInfo],
            }
            println!("{}", toml::to_string_pretty(&Kinds { kind: &kinds })?);
        }
        _ => anyhow::bail!("Unknown format: {}", format),
    }

    Ok(())
}
