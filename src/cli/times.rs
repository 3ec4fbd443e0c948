use anyhow::{Context as _, Result};
use bi4::reader::Bi4Reader;
use log::info;
use serde_json::json;

use super::output::{heading, inline_error, print_json, result_json};
use super::Context;

/// Print the simulation time of every snapshot
///
/// Files that fail to decode are listed with their error; they do not stop
/// the rest of the listing.
pub fn run(ctx: &Context) -> Result<()> {
    let reader = Bi4Reader::open_with_config(&ctx.dir, ctx.reader)
        .with_context(|| format!("Failed to open {}", ctx.dir.display()))?;
    info!("{} snapshots", reader.len());

    let times = reader.times();

    if ctx.json {
        let map: serde_json::Map<_, _> = times
            .iter()
            .map(|(file, t)| (file.clone(), result_json(t)))
            .collect();
        return print_json(&json!(map));
    }

    println!("{}", heading("Snapshot Times"));
    for (file, time) in &times {
        match time {
            Ok(t) => println!("{}  {:>14.6}", file, t),
            Err(e) => println!("{}  {}", file, inline_error(e)),
        }
    }

    let failed = times.values().filter(|t| t.is_err()).count();
    if failed > 0 {
        println!();
        println!("{} of {} snapshots could not be read", failed, times.len());
    }

    Ok(())
}
