use crate::output::{print_json, print_table};
use anyhow::Context;
use promote_core::config::Config;
use promote_core::gate::GateDecision;
use promote_core::promotion::{self, PromotionReport, PromotionRequest, PromotionStatus};
use promote_core::publisher::{CommandPublisher, DryRunPublisher, Publisher};
use std::path::Path;

pub fn run(
    root: &Path,
    choice: String,
    ref_name: String,
    packages: Vec<String>,
    dry_run: bool,
    json: bool,
) -> anyhow::Result<()> {
    // Packages on the command line make the config file optional.
    let config = if packages.is_empty() {
        Config::load(root).context("failed to load config")?
    } else {
        Config::load_or_default(root).context("failed to load config")?
    };

    let request = PromotionRequest {
        choice,
        ref_name,
        packages,
    };

    let command_publisher;
    let dry_run_publisher;
    let publisher: &dyn Publisher = if dry_run {
        dry_run_publisher = DryRunPublisher::new(&config.publisher);
        &dry_run_publisher
    } else {
        command_publisher = CommandPublisher::new(&config.publisher, root);
        &command_publisher
    };

    let report = promotion::execute(&config, &request, publisher)?;

    if json {
        return print_json(&report);
    }
    print_report(&report);
    Ok(())
}

fn print_report(report: &PromotionReport) {
    if let GateDecision::Skipped { ref_name, allowed } = &report.gate {
        println!(
            "Skipped: ref '{}' is not allowed to promote (allowed: {})",
            ref_name,
            allowed.join(", ")
        );
        return;
    }

    if let Some(action) = &report.action {
        println!("Promoting {} -> {}", action.from_ref(), action.to_ref());
    }

    let rows = report
        .outcomes
        .iter()
        .map(|o| {
            let state = if o.executed { "promoted" } else { "dry-run" };
            vec![
                o.package.clone(),
                o.from_ref.clone(),
                o.to_ref.clone(),
                state.to_string(),
                o.command.join(" "),
            ]
        })
        .collect();
    print_table(&["PACKAGE", "FROM", "TO", "STATE", "COMMAND"], rows);

    if report.status == PromotionStatus::Promoted {
        let elapsed = report.finished_at - report.started_at;
        tracing::info!(
            packages = report.outcomes.len(),
            elapsed_ms = elapsed.num_milliseconds(),
            "promotion finished"
        );
    }
}
