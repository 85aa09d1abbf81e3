use crate::output::print_json;
use anyhow::Context;
use promote_core::config::Config;
use promote_core::{io, paths};
use std::path::Path;

pub fn run(root: &Path, packages: Vec<String>, json: bool) -> anyhow::Result<()> {
    let path = paths::config_path(root);
    let config = Config::new(packages);
    let data = serde_yaml::to_string(&config)?;
    let written = io::write_if_missing(&path, data.as_bytes())
        .with_context(|| format!("failed to write {}", path.display()))?;

    if json {
        return print_json(&serde_json::json!({
            "path": path,
            "created": written,
        }));
    }

    if written {
        println!("Created {}", path.display());
    } else {
        println!("{} already exists; left unchanged", path.display());
    }
    Ok(())
}
