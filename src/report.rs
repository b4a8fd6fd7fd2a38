use super::apply::{ApplyMode, ApplyResult, Status};
use super::check::CheckReport;
use super::functions::items;
use super::plan::RenamePlan;

/// Lines describing the plan, the way `nfx normalize` prints it.
pub fn plan_lines(plan: &RenamePlan, dry_run: bool) -> Vec<String> {
    let mut lines = vec![format!(
        "Processed {}... (found {} to rename)",
        items(plan.scanned),
        plan.renames.len()
    )];
    if plan.renames.is_empty() {
        if plan.skipped.is_empty() {
            lines.push("All names are already normalized!".to_owned());
        }
        return lines;
    }

    lines.push(String::new());
    lines.push(format!(
        "{}Found {} to rename:",
        if dry_run { "DRY RUN - " } else { "" },
        items(plan.renames.len())
    ));
    for entry in plan.renames.iter() {
        lines.push(format!(
            "  {} -> {}",
            entry.path.display(),
            entry.target_path().display()
        ));
    }
    lines
}

/// Warnings for entries left alone, meant for stderr.
pub fn skipped_lines(plan: &RenamePlan) -> Vec<String> {
    plan.skipped
        .iter()
        .filter_map(|entry| {
            entry.skip.as_ref().map(|reason| {
                format!(
                    "Warning: Skipping {} -> {} ({})",
                    entry.path.display(),
                    entry.proposed,
                    reason
                )
            })
        })
        .collect()
}

/// Closing lines after apply.
pub fn apply_lines(result: &ApplyResult, duration: &str) -> Vec<String> {
    let mut lines = Vec::new();
    match result.mode {
        ApplyMode::DryRun => {
            if result.pending > 0 {
                lines.push(
                    "Dry run mode: No changes were made. Use --no-dry-run --confirm to apply changes."
                        .to_owned(),
                );
            }
        }
        ApplyMode::Unconfirmed => {
            if result.pending > 0 {
                lines.push(
                    "No changes were made. Use --confirm to actually perform the renames."
                        .to_owned(),
                );
            }
        }
        ApplyMode::Applied => {
            for outcome in result.failures() {
                if let Status::Failed(e) = &outcome.status {
                    lines.push(format!(
                        "Error renaming {} -> {}: {}",
                        outcome.from.display(),
                        outcome.to.display(),
                        e
                    ));
                }
            }
            lines.push(format!("{} renamed. [{}]", items(result.renamed), duration));
            if result.skipped > 0 {
                lines.push(format!("{} skipped.", items(result.skipped)));
            }
            if result.failed > 0 {
                lines.push(format!("Failed to rename {}.", items(result.failed)));
            }
        }
    }
    lines
}

pub fn check_lines(report: &CheckReport) -> Vec<String> {
    let mut lines = vec![format!(
        "Checked {}... (found {} invalid, {} ignored)",
        items(report.checked),
        report.invalid.len(),
        report.ignored
    )];
    if report.invalid.is_empty() {
        lines.push("All paths are valid!".to_owned());
    }
    lines
}
