use anyhow::{Context as _, Result};
use bi4::reader::{discover, snapshot_file_name, Bi4Reader};
use bi4::registry::{self, CountKey, ScalarSpec};
use log::info;
use serde_json::json;

use super::output::{heading, print_json, result_json, unavailable};
use super::Context;

/// Properties shown for a single snapshot
const SHOWN_PROPERTIES: [ScalarSpec; 7] = [
    registry::VISCO_TYPE,
    registry::VISCO_VALUE,
    registry::VISCO_BOUND_FACTOR,
    registry::CASE_POS_MIN,
    registry::CASE_POS_MAX,
    registry::DATA_2D,
    registry::DATA_2D_POS_Y,
];

/// Print time, particle counts and simulation constants for one part
pub fn run(ctx: &Context, part: u32) -> Result<()> {
    let name = snapshot_file_name(part);
    let path = ctx.dir.join(&name);
    let found = discover(&ctx.dir)
        .with_context(|| format!("Failed to scan {}", ctx.dir.display()))?;
    info!("Reading {}", path.display());

    let reader = Bi4Reader::from_paths([(name.clone(), path)], found.head, ctx.reader);

    let time = reader
        .time_of(&name)
        .with_context(|| format!("Failed to read time from {}", name))?;
    let mut counts = Vec::with_capacity(CountKey::ALL.len());
    for key in CountKey::ALL {
        let count = reader
            .count_of(&name, key.marker())
            .with_context(|| format!("Failed to read {} from {}", key, name))?;
        counts.push((key, count));
    }

    // Properties missing from this file version are reported, not fatal
    let mut properties = Vec::with_capacity(SHOWN_PROPERTIES.len());
    for spec in SHOWN_PROPERTIES.iter() {
        match reader.property(spec) {
            Err(e) if !e.is_not_found() => {
                return Err(e).with_context(|| format!("Failed to read {}", spec.name));
            }
            result => properties.push((spec, result)),
        }
    }

    if ctx.json {
        let counts_json: serde_json::Map<_, _> = counts
            .iter()
            .map(|(key, n)| (key.marker().to_string(), json!(n)))
            .collect();
        let props_json: serde_json::Map<_, _> = properties
            .iter()
            .map(|(spec, r)| (spec.name.to_string(), result_json(r)))
            .collect();
        return print_json(&json!({
            "file": name,
            "time": time,
            "counts": counts_json,
            "properties": props_json,
        }));
    }

    println!("{}", heading(&format!("BI4 Snapshot {}", name)));
    println!("{} time: {}", name, time);
    println!();
    for (key, n) in &counts {
        println!("{} number of {} particles: {}", name, key.label(), n);
    }
    println!();
    for (spec, result) in &properties {
        let shown = match result {
            Ok(value) => value.to_string(),
            Err(_) => unavailable(),
        };
        println!("{:<18} {:<24} # {}", spec.name, shown, spec.description);
    }

    Ok(())
}

