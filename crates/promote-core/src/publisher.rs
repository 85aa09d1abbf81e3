//! The seam between a resolved promotion and the hosting platform.
//!
//! The platform's own promote operation is an external program (by default
//! `charmcraft`). `CommandPublisher` runs it once per package with the
//! argument template from `PublisherConfig`; `DryRunPublisher` only renders
//! the command line.

use std::path::Path;
use std::process::{Command, Stdio};

use serde::{Deserialize, Serialize};

use crate::config::PublisherConfig;
use crate::error::{PromoteError, Result};
use crate::types::PromotionAction;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromoteRequest<'a> {
    pub package: &'a str,
    pub action: &'a PromotionAction,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PromoteOutcome {
    pub package: String,
    pub from_ref: String,
    pub to_ref: String,
    pub command: Vec<String>,
    pub executed: bool,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub output: String,
}

pub trait Publisher {
    fn promote(&self, request: &PromoteRequest<'_>) -> Result<PromoteOutcome>;
}

/// Expand `{placeholder}` tokens in the argument template.
///
/// Substituted values are never rescanned, and unknown placeholders are
/// left as written.
pub fn render_args(template: &[String], request: &PromoteRequest<'_>) -> Vec<String> {
    let action = request.action;
    let from = action.from_channel.to_string();
    let to = action.to_channel.to_string();
    let track = action.track.to_string();
    let from_ref = action.from_ref();
    let to_ref = action.to_ref();
    let lookup = |key: &str| -> Option<&str> {
        match key {
            "package" => Some(request.package),
            "track" => Some(track.as_str()),
            "from" => Some(from.as_str()),
            "to" => Some(to.as_str()),
            "from_ref" => Some(from_ref.as_str()),
            "to_ref" => Some(to_ref.as_str()),
            _ => None,
        }
    };
    template.iter().map(|arg| expand(arg, &lookup)).collect()
}

fn expand<'v>(arg: &str, lookup: &dyn Fn(&str) -> Option<&'v str>) -> String {
    let mut out = String::with_capacity(arg.len());
    let mut rest = arg;
    while let Some(start) = rest.find('{') {
        out.push_str(&rest[..start]);
        let tail = &rest[start..];
        let substituted = tail
            .find('}')
            .and_then(|end| lookup(&tail[1..end]).map(|value| (end, value)));
        match substituted {
            Some((end, value)) => {
                out.push_str(value);
                rest = &tail[end + 1..];
            }
            None => {
                out.push('{');
                rest = &tail[1..];
            }
        }
    }
    out.push_str(rest);
    out
}

fn outcome(
    request: &PromoteRequest<'_>,
    command: Vec<String>,
    executed: bool,
    output: String,
) -> PromoteOutcome {
    PromoteOutcome {
        package: request.package.to_string(),
        from_ref: request.action.from_ref(),
        to_ref: request.action.to_ref(),
        command,
        executed,
        output,
    }
}

// ---------------------------------------------------------------------------
// CommandPublisher
// ---------------------------------------------------------------------------

pub struct CommandPublisher<'a> {
    config: &'a PublisherConfig,
    workdir: &'a Path,
}

impl<'a> CommandPublisher<'a> {
    pub fn new(config: &'a PublisherConfig, workdir: &'a Path) -> Self {
        Self { config, workdir }
    }
}

impl Publisher for CommandPublisher<'_> {
    fn promote(&self, request: &PromoteRequest<'_>) -> Result<PromoteOutcome> {
        let program = which::which(&self.config.program)
            .map_err(|_| PromoteError::PublisherNotFound(self.config.program.clone()))?;
        let args = render_args(&self.config.args, request);

        tracing::info!(
            package = request.package,
            from = %request.action.from_ref(),
            to = %request.action.to_ref(),
            "invoking {}",
            self.config.program
        );

        let output = Command::new(&program)
            .args(&args)
            .current_dir(self.workdir)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()
            .map_err(|e| PromoteError::PublisherSpawnFailed(e.to_string()))?;

        if !output.status.success() {
            return Err(PromoteError::PublisherFailed {
                package: request.package.to_string(),
                status: output.status.to_string(),
                stderr: String::from_utf8_lossy(&output.stderr).trim_end().to_string(),
            });
        }

        let mut command = vec![self.config.program.clone()];
        command.extend(args);
        let stdout = String::from_utf8_lossy(&output.stdout).trim_end().to_string();
        Ok(outcome(request, command, true, stdout))
    }
}

// ---------------------------------------------------------------------------
// DryRunPublisher
// ---------------------------------------------------------------------------

pub struct DryRunPublisher<'a> {
    config: &'a PublisherConfig,
}

impl<'a> DryRunPublisher<'a> {
    pub fn new(config: &'a PublisherConfig) -> Self {
        Self { config }
    }
}

impl Publisher for DryRunPublisher<'_> {
    fn promote(&self, request: &PromoteRequest<'_>) -> Result<PromoteOutcome> {
        let mut command = vec![self.config.program.clone()];
        command.extend(render_args(&self.config.args, request));
        tracing::info!(package = request.package, "dry run: {}", command.join(" "));
        Ok(outcome(request, command, false, String::new()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Channel, Track};
    use tempfile::TempDir;

    fn action() -> PromotionAction {
        PromotionAction {
            from_channel: Channel::Candidate,
            to_channel: Channel::Stable,
            track: Track::Named("1.6".to_string()),
        }
    }

    #[test]
    fn render_default_template() {
        let action = action();
        let request = PromoteRequest {
            package: "demo",
            action: &action,
        };
        let args = render_args(&PublisherConfig::default().args, &request);
        assert_eq!(
            args,
            vec![
                "promote",
                "demo",
                "--from-channel",
                "1.6/candidate",
                "--to-channel",
                "1.6/stable"
            ]
        );
    }

    #[test]
    fn render_short_placeholders() {
        let action = action();
        let request = PromoteRequest {
            package: "demo",
            action: &action,
        };
        let template = vec!["{track}:{from}->{to}".to_string()];
        assert_eq!(render_args(&template, &request), vec!["1.6:candidate->stable"]);
    }

    #[test]
    fn substituted_values_are_not_rescanned() {
        let action = action();
        let request = PromoteRequest {
            package: "pkg-{to}",
            action: &action,
        };
        let template = vec!["{package}@{to_ref}".to_string(), "{unknown}-{".to_string()];
        assert_eq!(
            render_args(&template, &request),
            vec!["pkg-{to}@1.6/stable", "{unknown}-{"]
        );
    }

    #[test]
    fn dry_run_does_not_execute() {
        let config = PublisherConfig {
            program: "definitely-not-a-real-program".to_string(),
            args: vec!["{to_ref}".to_string()],
        };
        let action = action();
        let outcome = DryRunPublisher::new(&config)
            .promote(&PromoteRequest {
                package: "demo",
                action: &action,
            })
            .unwrap();
        assert!(!outcome.executed);
        assert_eq!(outcome.command, vec!["definitely-not-a-real-program", "1.6/stable"]);
    }

    #[test]
    fn missing_program_is_reported() {
        let dir = TempDir::new().unwrap();
        let config = PublisherConfig {
            program: "definitely-not-a-real-program".to_string(),
            args: vec![],
        };
        let action = action();
        let err = CommandPublisher::new(&config, dir.path())
            .promote(&PromoteRequest {
                package: "demo",
                action: &action,
            })
            .unwrap_err();
        assert!(matches!(err, PromoteError::PublisherNotFound(p) if p == "definitely-not-a-real-program"));
    }

    #[cfg(unix)]
    #[test]
    fn command_publisher_captures_stdout() {
        let dir = TempDir::new().unwrap();
        let config = PublisherConfig {
            program: "echo".to_string(),
            args: vec!["{package}".to_string(), "{to_ref}".to_string()],
        };
        let action = action();
        let outcome = CommandPublisher::new(&config, dir.path())
            .promote(&PromoteRequest {
                package: "demo",
                action: &action,
            })
            .unwrap();
        assert!(outcome.executed);
        assert_eq!(outcome.output, "demo 1.6/stable");
        assert_eq!(outcome.to_ref, "1.6/stable");
    }

    #[cfg(unix)]
    #[test]
    fn command_publisher_surfaces_failure() {
        let dir = TempDir::new().unwrap();
        let config = PublisherConfig {
            program: "false".to_string(),
            args: vec![],
        };
        let action = action();
        let err = CommandPublisher::new(&config, dir.path())
            .promote(&PromoteRequest {
                package: "demo",
                action: &action,
            })
            .unwrap_err();
        assert!(matches!(err, PromoteError::PublisherFailed { ref package, .. } if package == "demo"));
    }
}
