use super::entry::{NameEntry, SkipReason};
use super::errors::NfError;
use super::plan::RenamePlan;

use log::{error, info};
use std::fs;
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApplyMode {
    DryRun,
    /// Dry run was turned off but the renames were not confirmed.
    Unconfirmed,
    Applied,
}

impl ApplyMode {
    pub fn new(dry_run: bool, confirmed: bool) -> Self {
        if dry_run {
            ApplyMode::DryRun
        } else if confirmed {
            ApplyMode::Applied
        } else {
            ApplyMode::Unconfirmed
        }
    }
}

#[derive(Debug)]
pub enum Status {
    /// Would be renamed, but nothing was touched.
    Pending,
    Renamed,
    Skipped(SkipReason),
    Failed(NfError),
}

#[derive(Debug)]
pub struct Outcome {
    pub from: PathBuf,
    pub to: PathBuf,
    pub status: Status,
}

#[derive(Debug)]
pub struct ApplyResult {
    pub mode: ApplyMode,
    pub renamed: usize,
    pub skipped: usize,
    pub failed: usize,
    pub pending: usize,
    pub outcomes: Vec<Outcome>,
}

impl ApplyResult {
    fn new(mode: ApplyMode) -> Self {
        ApplyResult {
            mode,
            renamed: 0,
            skipped: 0,
            failed: 0,
            pending: 0,
            outcomes: Vec::new(),
        }
    }

    pub fn failures(&self) -> impl Iterator<Item = &Outcome> {
        self.outcomes
            .iter()
            .filter(|o| matches!(o.status, Status::Failed(_)))
    }
}

/// Carry out the plan in its order.
/// Nothing on disk changes unless `dry_run` is off and `confirmed` is on.
/// A failing entry is recorded and the rest still run.
pub fn apply(plan: &RenamePlan, dry_run: bool, confirmed: bool) -> ApplyResult {
    let mode = ApplyMode::new(dry_run, confirmed);
    let mut result = ApplyResult::new(mode);

    for entry in plan.skipped.iter() {
        if let Some(reason) = &entry.skip {
            result.skipped += 1;
            result.outcomes.push(Outcome {
                from: entry.path.clone(),
                to: entry.target_path(),
                status: Status::Skipped(reason.clone()),
            });
        }
    }

    for entry in plan.renames.iter() {
        let to = entry.target_path();
        let status = if mode != ApplyMode::Applied {
            result.pending += 1;
            Status::Pending
        } else {
            match rename_entry(entry) {
                Ok(()) => {
                    info!("RENAME: {:?} -> {:?}", entry.path, to);
                    result.renamed += 1;
                    Status::Renamed
                }
                Err(e) => {
                    error!("RENAME: {:?} -> {:?}: {}", entry.path, to, e);
                    result.failed += 1;
                    Status::Failed(e)
                }
            }
        };
        result.outcomes.push(Outcome {
            from: entry.path.clone(),
            to,
            status,
        });
    }

    if mode == ApplyMode::Applied {
        info!(
            "APPLY: {:?} renamed {}, skipped {}, failed {}",
            plan.root, result.renamed, result.skipped, result.failed
        );
    }
    result
}

/// Rename one entry, never overwriting an existing name.
fn rename_entry(entry: &NameEntry) -> Result<(), NfError> {
    let to = entry.target_path();
    match entry.temp_path() {
        Some(temp) => {
            if temp.symlink_metadata().is_ok() {
                return Err(NfError::CollisionDetected(temp));
            }
            fs::rename(&entry.path, &temp).map_err(|e| NfError::from_io(e, &entry.path))?;
            if let Err(e) = fs::rename(&temp, &to) {
                if let Err(back) = fs::rename(&temp, &entry.path) {
                    error!("RENAME: cannot restore {:?} from {:?}: {}", entry.path, temp, back);
                }
                return Err(NfError::from_io(e, &to));
            }
        }
        None => {
            if to.symlink_metadata().is_ok() {
                return Err(NfError::CollisionDetected(to));
            }
            fs::rename(&entry.path, &to).map_err(|e| NfError::from_io(e, &entry.path))?;
        }
    }
    Ok(())
}
