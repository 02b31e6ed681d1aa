//! Working-copy commands: clone, init, branch, add, commit, update, status.

use anyhow::Result;

use super::Context;
use crate::adapter::{CommitOptions, UpdateOptions};
use crate::ui::output;

pub fn clone(ctx: &Context, remote: &str) -> Result<()> {
    let out = ctx.open()?.clone_repo(remote)?;
    ctx.show_output(&out)
}

pub fn init(ctx: &Context) -> Result<()> {
    let out = ctx.open()?.init_repo()?;
    ctx.show_output(&out)
}

/// Print the current branch, or set a new one.
pub fn branch(ctx: &Context, name: Option<&str>) -> Result<()> {
    let out = ctx.open()?.branch(name.unwrap_or_default())?;
    match name {
        // Querying is the point of the command; never suppressed.
        None => ctx.show(&serde_json::json!({ "branch": out }), || out.clone()),
        Some(_) => ctx.show_output(&out),
    }
}

pub fn add(ctx: &Context, paths: &[String]) -> Result<()> {
    let out = ctx.open()?.add(paths)?;
    ctx.show_output(&out)
}

pub fn commit(
    ctx: &Context,
    message: String,
    user: Option<String>,
    addremove: bool,
    files: Vec<String>,
) -> Result<()> {
    let options = CommitOptions {
        message,
        user,
        addremove,
        files,
    };
    let out = ctx.open()?.commit(&options)?;
    ctx.show_output(&out)
}

pub fn update(
    ctx: &Context,
    branch: Option<String>,
    revision: Option<String>,
    clean: bool,
) -> Result<()> {
    let options = UpdateOptions {
        branch,
        revision,
        clean,
    };
    let out = ctx.open()?.update(&options)?;
    ctx.show_output(&out)
}

pub fn status(ctx: &Context) -> Result<()> {
    let report = ctx.open()?.status()?;
    ctx.show(&report, || output::format_status(&report))
}

pub fn changed(ctx: &Context, start: &str, end: &str) -> Result<()> {
    let report = ctx.open()?.changed_between_nodes(start, end)?;
    ctx.show(&report, || output::format_status(&report))
}
