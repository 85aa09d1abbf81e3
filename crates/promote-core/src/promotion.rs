use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::config::Config;
use crate::error::{PromoteError, Result};
use crate::gate::{normalize_ref, GateDecision};
use crate::paths;
use crate::publisher::{PromoteOutcome, PromoteRequest, Publisher};
use crate::resolve::resolve;
use crate::types::PromotionAction;

// ---------------------------------------------------------------------------
// Request / report
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct PromotionRequest {
    pub choice: String,
    pub ref_name: String,
    /// Overrides `Config::packages` when non-empty.
    pub packages: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PromotionStatus {
    Promoted,
    Skipped,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PromotionReport {
    pub status: PromotionStatus,
    pub ref_name: String,
    pub gate: GateDecision,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub action: Option<PromotionAction>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub outcomes: Vec<PromoteOutcome>,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
}

// ---------------------------------------------------------------------------
// execute
// ---------------------------------------------------------------------------

/// Gate, resolve and promote.
///
/// A ref outside the allow-list yields a `Skipped` report without touching
/// the publisher. An unrecognized choice fails before any publisher call.
/// Publisher errors stop the run at the first failing package.
pub fn execute(
    config: &Config,
    request: &PromotionRequest,
    publisher: &dyn Publisher,
) -> Result<PromotionReport> {
    let started_at = Utc::now();
    let ref_name = normalize_ref(&request.ref_name).to_string();

    let gate = config.gate().evaluate(&ref_name);
    if !gate.is_allowed() {
        tracing::info!(ref_name = %ref_name, "ref is not allowed to promote; skipping");
        return Ok(PromotionReport {
            status: PromotionStatus::Skipped,
            ref_name,
            gate,
            action: None,
            outcomes: Vec::new(),
            started_at,
            finished_at: Utc::now(),
        });
    }

    paths::validate_ref(&ref_name)?;
    let action = resolve(&request.choice, &ref_name, &config.default_branches)?;
    tracing::info!(
        from = %action.from_ref(),
        to = %action.to_ref(),
        "resolved promotion"
    );

    let packages = if request.packages.is_empty() {
        &config.packages
    } else {
        &request.packages
    };
    if packages.is_empty() {
        return Err(PromoteError::NoPackages);
    }

    let mut outcomes = Vec::with_capacity(packages.len());
    for package in packages {
        let outcome = publisher.promote(&PromoteRequest {
            package,
            action: &action,
        })?;
        outcomes.push(outcome);
    }

    Ok(PromotionReport {
        status: PromotionStatus::Promoted,
        ref_name,
        gate,
        action: Some(action),
        outcomes,
        started_at,
        finished_at: Utc::now(),
    })
}
