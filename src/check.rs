use super::entry::EntryKind;
use super::errors::NfError;
use super::functions::progress;
use super::ignore::{is_ignored, IgnoreRuleSet};
use super::normalize::split_extension;

use chrono::{DateTime, Local};
use log::{info, warn};
use regex::Regex;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

#[derive(Debug, Clone, Default)]
pub struct CheckReport {
    pub checked: usize,
    pub ignored: usize,
    pub invalid: Vec<PathBuf>,
}

/// Part of the name the pattern is tested against: files lose their extension.
pub fn name_to_check(name: &str, kind: EntryKind) -> &str {
    match kind {
        EntryKind::Directory => name,
        EntryKind::File | EntryKind::Symlink => split_extension(name).0,
    }
}

/// The pattern must match at the start of the name; the end is left to the pattern.
pub fn matches_from_start(pattern: &Regex, name: &str) -> bool {
    pattern.find(name).map_or(false, |m| m.start() == 0)
}

/// Walk the whole tree and collect names that do not match `pattern`.
pub fn check_names(root: &Path, pattern: &Regex, rules: &IgnoreRuleSet) -> Result<CheckReport, NfError> {
    if !root.exists() {
        return Err(NfError::InvalidPath(root.to_path_buf()));
    }
    if !root.is_dir() {
        return Err(NfError::NotDirectory(root.to_path_buf()));
    }

    let mut report = CheckReport::default();
    let mut walker = WalkDir::new(root)
        .min_depth(1)
        .sort_by_file_name()
        .into_iter();
    while let Some(item) = walker.next() {
        let dir_entry = match item {
            Ok(dir_entry) => dir_entry,
            Err(e) if e.depth() == 0 => return Err(e.into()),
            Err(e) => {
                warn!("SKIP: {}", e);
                continue;
            }
        };
        let kind = EntryKind::from(dir_entry.file_type());
        let rel = dir_entry.path().strip_prefix(root).unwrap_or(dir_entry.path());
        if is_ignored(rel, kind.is_dir(), rules) {
            report.ignored += 1;
            if kind.is_dir() {
                walker.skip_current_dir();
            }
            continue;
        }

        report.checked += 1;
        progress(report.checked, || {
            format!(
                "Checked {} items... (found {} invalid)",
                report.checked,
                report.invalid.len()
            )
        });
        let name = dir_entry.file_name().to_string_lossy();
        if !matches_from_start(pattern, name_to_check(&name, kind)) {
            report.invalid.push(dir_entry.path().to_path_buf());
        }
    }

    info!(
        "CHECK: {:?} checked {}, invalid {}",
        root,
        report.checked,
        report.invalid.len()
    );
    Ok(report)
}

pub fn report_file_name(now: &DateTime<Local>) -> String {
    format!("invalid_paths_{}.txt", now.format("%Y%m%d_%H%M%S"))
}

/// Write the invalid paths, one per line. Nothing is written for a clean report.
pub fn write_report(
    report: &CheckReport,
    output_dir: &Path,
    now: &DateTime<Local>,
) -> Result<Option<PathBuf>, NfError> {
    if report.invalid.is_empty() {
        return Ok(None);
    }
    std::fs::create_dir_all(output_dir).map_err(|e| NfError::from_io(e, output_dir))?;
    let output_file = output_dir.join(report_file_name(now));
    let file = File::create(&output_file).map_err(|e| NfError::from_io(e, &output_file))?;
    let mut writer = BufWriter::new(file);
    for path in report.invalid.iter() {
        writeln!(writer, "{}", path.display())?;
    }
    writer.flush()?;
    info!("REPORT: {:?}", output_file);
    Ok(Some(output_file))
}
