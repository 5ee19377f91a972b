//! Script replay command

use crate::script::{Script, ScriptRunner};
use anyhow::{Context, Result};
use atelier_viewport::Editor;
use std::path::Path;

pub struct RunArgs {
    pub script: String,
    pub config: Option<String>,
    pub format: String,
    pub frame: bool,
}

pub fn run(args: RunArgs) -> Result<()> {
    if !Path::new(&args.script).exists() {
        anyhow::bail!("Script not found: {}", args.script);
    }

    let config = super::load_config(args.config.as_deref())?;
    let content = std::fs::read_to_string(&args.script)
        .with_context(|| format!("Failed to read script: {}", args.script))?;
    let script = Script::parse(&content).context("Failed to parse script")?;

    let mut runner = ScriptRunner::new(Editor::new(&config));
    let steps = runner.run(&script);
    let failed = steps.iter().filter(|s| s.error.is_some()).count();
    let report = runner.report(steps, args.frame);

    let output = match args.format.as_str() {
        "json" => serde_json::to_string_pretty(&report)?,
        "toml" => toml::to_string_pretty(&report)?,
        _ => anyhow::bail!("Unknown format: {}", args.format),
    };

    println!("{}", output);

    if failed > 0 {
        eprintln!("{} of {} steps failed", failed, script.steps.len());
    }

    Ok(())
}
