use crate::error::{PromoteError, Result};
use regex::Regex;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

// ---------------------------------------------------------------------------
// Directory constants
// ---------------------------------------------------------------------------

pub const PROMOTE_DIR: &str = ".promote";
pub const CONFIG_FILE: &str = ".promote/config.yaml";

// ---------------------------------------------------------------------------
// Path helpers
// ---------------------------------------------------------------------------

pub fn promote_dir(root: &Path) -> PathBuf {
    root.join(PROMOTE_DIR)
}

pub fn config_path(root: &Path) -> PathBuf {
    root.join(CONFIG_FILE)
}

// ---------------------------------------------------------------------------
// Ref name validation
// ---------------------------------------------------------------------------

static REF_RE: OnceLock<Regex> = OnceLock::new();

fn ref_re() -> &'static Regex {
    REF_RE.get_or_init(|| Regex::new(r"^[A-Za-z0-9][A-Za-z0-9._/\-]*$").unwrap())
}

/// Branch and tag names become track names, so they are limited to a
/// conservative character set.
pub fn validate_ref(name: &str) -> Result<()> {
    if name.len() > 128 || !ref_re().is_match(name) || name.contains("..") {
        return Err(PromoteError::InvalidRef(name.to_string()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_refs() {
        for r in ["main", "1.6", "release/2.0", "feature-x_y", "v1"] {
            validate_ref(r).unwrap_or_else(|_| panic!("expected valid: {r}"));
        }
    }

    #[test]
    fn invalid_refs() {
        for r in ["", "-main", "/main", "has space", "a..b", "tab\t", "x;rm"] {
            assert!(validate_ref(r).is_err(), "expected invalid: {r:?}");
        }
    }

    #[test]
    fn config_path_is_under_promote_dir() {
        let root = Path::new("/tmp/project");
        assert_eq!(config_path(root), promote_dir(root).join("config.yaml"));
    }
}
