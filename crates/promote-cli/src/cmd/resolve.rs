use crate::output::{print_fields, print_json};
use anyhow::Context;
use clap::ValueEnum;
use promote_core::config::Config;
use promote_core::gate::normalize_ref;
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Format {
    /// Aligned `key: value` lines
    Text,
    /// `key=value` lines, suitable for a CI step's environment file
    Env,
}

pub fn run(
    root: &Path,
    choice: &str,
    ref_name: &str,
    format: Format,
    json: bool,
) -> anyhow::Result<()> {
    let config = Config::load_or_default(root).context("failed to load config")?;
    let ref_name = normalize_ref(ref_name);
    let action = promote_core::resolve(choice, ref_name, &config.default_branches)?;
    tracing::debug!(?action, "resolved");

    if json {
        return print_json(&action);
    }

    let fields = action.fields();
    match format {
        Format::Text => print_fields(&fields),
        Format::Env => {
            for (key, value) in &fields {
                println!("{key}={value}");
            }
        }
    }
    Ok(())
}
