//! config command - Show the resolved configuration

use anyhow::Result;
use serde::Serialize;

use super::Context;
use crate::adapter::LogFormat;

#[derive(Debug, Serialize)]
struct Resolved {
    backend: String,
    binary: Option<String>,
    log_format: LogFormat,
    merge_tool: String,
    diff_tool: String,
    global_config: Vec<String>,
    binary_overrides: std::collections::BTreeMap<String, String>,
    global_file: Option<String>,
    repo_file: Option<String>,
}

/// Show effective values and the files they were read from.
pub fn show(ctx: &Context) -> Result<()> {
    let config = ctx.load_config()?;
    let adapter = ctx.adapter_config(&config)?;

    let resolved = Resolved {
        backend: ctx
            .backend
            .clone()
            .unwrap_or_else(|| config.backend().to_string()),
        binary: adapter.binary.clone(),
        log_format: adapter.log_format,
        merge_tool: adapter.merge_tool.display().to_string(),
        diff_tool: adapter.diff_tool.display().to_string(),
        global_config: adapter.global_config.clone(),
        binary_overrides: adapter.binary_overrides.clone(),
        global_file: config
            .global_config_loaded_from()
            .map(|p| p.display().to_string()),
        repo_file: config
            .repo_config_loaded_from()
            .map(|p| p.display().to_string()),
    };

    ctx.show(&resolved, || {
        let mut lines = vec![
            "# Resolved configuration".to_string(),
            format!("backend = {}", resolved.backend),
            format!("binary = {}", resolved.binary.as_deref().unwrap_or("(backend default)")),
            format!("log_format = {}", resolved.log_format),
            format!("merge_tool = {}", resolved.merge_tool),
            format!("diff_tool = {}", resolved.diff_tool),
        ];
        for pair in &resolved.global_config {
            lines.push(format!("global_config += {pair}"));
        }
        for (operation, binary) in &resolved.binary_overrides {
            lines.push(format!("binary_overrides.{operation} = {binary}"));
        }
        lines.push(format!(
            "# global file: {}",
            resolved.global_file.as_deref().unwrap_or("(none)")
        ));
        lines.push(format!(
            "# repo file: {}",
            resolved.repo_file.as_deref().unwrap_or("(none)")
        ));
        lines.join("\n")
    })
}
