use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Ref normalization
// ---------------------------------------------------------------------------

const REF_PREFIXES: &[&str] = &["refs/heads/", "refs/tags/"];

/// Strip a fully-qualified git ref down to its short name, so both
/// `refs/heads/main` and `main` gate the same way.
pub fn normalize_ref(raw: &str) -> &str {
    REF_PREFIXES
        .iter()
        .find_map(|p| raw.strip_prefix(p))
        .unwrap_or(raw)
}

pub fn default_allowed_refs() -> Vec<String> {
    vec!["1.6".to_string(), "main".to_string()]
}

// ---------------------------------------------------------------------------
// GateDecision
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "decision", rename_all = "snake_case")]
pub enum GateDecision {
    Allowed { ref_name: String },
    Skipped { ref_name: String, allowed: Vec<String> },
}

impl GateDecision {
    pub fn is_allowed(&self) -> bool {
        matches!(self, GateDecision::Allowed { .. })
    }
}

// ---------------------------------------------------------------------------
// RefGate
// ---------------------------------------------------------------------------

/// Allow-list of refs permitted to run promotions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RefGate {
    allowed_refs: Vec<String>,
}

impl RefGate {
    pub fn new(allowed_refs: Vec<String>) -> Self {
        Self { allowed_refs }
    }

    pub fn evaluate(&self, raw_ref: &str) -> GateDecision {
        let ref_name = normalize_ref(raw_ref).to_string();
        if self.allowed_refs.iter().any(|r| *r == ref_name) {
            GateDecision::Allowed { ref_name }
        } else {
            GateDecision::Skipped {
                ref_name,
                allowed: self.allowed_refs.clone(),
            }
        }
    }
}

impl Default for RefGate {
    fn default() -> Self {
        Self::new(default_allowed_refs())
    }
}
