//! diff commands - unified and HTML diffs of one file

use anyhow::Result;

use super::Context;

pub fn unified(ctx: &Context, path: &str, revision: Option<&str>) -> Result<()> {
    let diff = ctx.open()?.diff_unified(path, revision)?;
    ctx.show(&serde_json::json!({ "path": path, "diff": diff }), || {
        diff.trim_end().to_string()
    })
}

pub fn html(ctx: &Context, path: &str, revision: Option<&str>) -> Result<()> {
    let html = ctx.open()?.diff_html(path, revision)?;
    ctx.show(&serde_json::json!({ "path": path, "html": html }), || {
        html.trim_end().to_string()
    })
}
