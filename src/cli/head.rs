use anyhow::{Context as _, Result};
use bi4::reader::{discover, Bi4Reader};
use log::info;
use serde_json::json;

use super::output::{heading, print_json};
use super::Context;

/// Print the particle groups of the head file
pub fn run(ctx: &Context) -> Result<()> {
    let found = discover(&ctx.dir)
        .with_context(|| format!("Failed to scan {}", ctx.dir.display()))?;
    let Some(head_path) = found.head else {
        anyhow::bail!("No Part_Head file in {}", ctx.dir.display());
    };
    info!("Reading {}", head_path.display());

    let reader = Bi4Reader::from_paths(Vec::new(), Some(head_path), ctx.reader);
    let groups = reader
        .particle_groups()
        .context("Failed to parse particle groups")?;

    if ctx.json {
        return print_json(&json!(groups));
    }

    println!("{}", heading("Particle Groups"));
    println!(
        "{:>4}  {:<9} {:>7} {:>5} {:>10} {:>10}",
        "#", "Type", "MkType", "Mk", "Begin", "Count"
    );
    for (i, group) in groups.iter().enumerate() {
        let kind = group
            .particle_type
            .map(|t| t.to_string())
            .unwrap_or_else(|| "?".to_string());
        println!(
            "{:>4}  {:<9} {:>7} {:>5} {:>10} {:>10}",
            i, kind, group.mk_type, group.mk, group.begin, group.count
        );
    }
    let total: i64 = groups.iter().map(|g| g.count as i64).sum();
    println!();
    println!("{} groups, {} particles", groups.len(), total);

    Ok(())
}
