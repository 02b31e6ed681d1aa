//! Diff tool run through `extdiff` by `dvcs diff-html`.
//!
//! Usage: `dvcs-difftool <old> <new>`
//!
//! Prints a side-by-side HTML table. A missing side (added or removed
//! file) is treated as empty.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;

use dvcswrap::tools::html_diff::make_table;

#[derive(Parser, Debug)]
#[command(name = "dvcs-difftool", version, about = "Render a file diff as an HTML table")]
struct Args {
    /// Old version
    old: PathBuf,
    /// New version
    new: PathBuf,
}

fn read(path: &Path) -> Result<String> {
    if !path.exists() {
        return Ok(String::new());
    }
    let bytes = std::fs::read(path).with_context(|| format!("failed to read {}", path.display()))?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

fn main() -> Result<()> {
    let args = Args::parse();
    println!("{}", make_table(&read(&args.old)?, &read(&args.new)?));
    Ok(())
}
