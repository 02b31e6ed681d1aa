//! Merge tool registered by `dvcs merge`.
//!
//! Usage: `dvcs-mergetool <base> <local> <other> <output>`
//!
//! Prints `{"base":..,"local":..,"other":..,"tar":..}` on stdout.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use dvcswrap::tools::merge_tool::record_conflict;

#[derive(Parser, Debug)]
#[command(name = "dvcs-mergetool", version, about = "Snapshot a merge conflict as JSON")]
struct Args {
    /// Common ancestor version
    base: PathBuf,
    /// Local version
    local: PathBuf,
    /// Other version
    other: PathBuf,
    /// File the merge result belongs in
    output: PathBuf,
}

fn main() -> Result<()> {
    let args = Args::parse();
    let conflict = record_conflict(&args.base, &args.local, &args.other, &args.output, None)
        .context("failed to record merge conflict")?;
    println!("{}", serde_json::to_string(&conflict)?);
    Ok(())
}
