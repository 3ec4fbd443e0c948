use anyhow::{Context as _, Result};
use bi4::array::ArrayKey;
use bi4::reader::snapshot_file_name;
use bi4::snapshot::Snapshot;
use log::info;
use serde_json::json;

use super::output::{heading, print_json};
use super::Context;

/// Print the first `rows` rows of one array from one snapshot
pub fn run(ctx: &Context, part: u32, key: ArrayKey, rows: usize) -> Result<()> {
    let path = ctx.dir.join(snapshot_file_name(part));
    info!("Reading {} from {}", key.name, path.display());

    let snapshot = Snapshot::open(&path)?;
    let array = snapshot
        .array(&key)
        .with_context(|| format!("Failed to decode {} from {}", key.name, snapshot.name()))?;
    let shown = rows.min(array.row_count());
    let head = array.rows(0, shown)?;

    if ctx.json {
        return print_json(&json!({
            "file": snapshot.name(),
            "array": key.name,
            "rows": array.row_count(),
            "columns": array.columns,
            "data": head.data,
        }));
    }

    println!(
        "{}",
        heading(&format!("{} in {}", key.name, snapshot.name()))
    );
    println!(
        "{} rows x {} columns ({:?})",
        array.row_count(),
        array.columns,
        key.element_type
    );
    for i in 0..shown {
        if let Some(row) = array.row(i) {
            let cells: Vec<String> = row.iter().map(|v| v.to_string()).collect();
            println!("{:>8}  {}", i, cells.join("  "));
        }
    }
    if shown < array.row_count() {
        println!("... {} more rows", array.row_count() - shown);
    }

    Ok(())
}
