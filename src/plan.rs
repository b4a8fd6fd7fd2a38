use super::entry::*;
use super::errors::NfError;
use super::functions::{fold_key, progress, temp_name};
use super::ignore::IgnoreRuleSet;
use super::normalize::normalize_entry;

use log::{info, warn};
use std::collections::{BTreeMap, HashMap, HashSet};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

#[derive(Debug, Clone, Copy, Default)]
pub struct PlanOptions {
    pub recursive: bool,
    /// Whether the target filesystem treats names differing only by case as one.
    pub case_insensitive: bool,
}

/// Renames to perform, deepest paths first, plus what was left alone.
#[derive(Debug, Clone, Default)]
pub struct RenamePlan {
    pub root: PathBuf,
    pub renames: Vec<NameEntry>,
    pub skipped: Vec<NameEntry>,
    pub scanned: usize,
    pub ignored: usize,
}

impl RenamePlan {
    pub fn is_empty(&self) -> bool {
        self.renames.is_empty()
    }
}

/// A name present in a directory listing.
enum Slot {
    Candidate(NameEntry),
    /// Ignored entry: never renamed, but its name stays taken.
    Reserved(String),
}

/// Scan `root` and build the rename plan.
pub fn plan(root: &Path, rules: &IgnoreRuleSet, options: PlanOptions) -> Result<RenamePlan, NfError> {
    if !root.exists() {
        return Err(NfError::InvalidPath(root.to_path_buf()));
    }
    if !root.is_dir() {
        return Err(NfError::NotDirectory(root.to_path_buf()));
    }
    std::fs::read_dir(root).map_err(|e| NfError::from_io(e, root))?;

    let mut result = RenamePlan {
        root: root.to_path_buf(),
        ..Default::default()
    };
    let mut groups: BTreeMap<PathBuf, Vec<Slot>> = BTreeMap::new();

    let max_depth = if options.recursive { usize::MAX } else { 1 };
    let mut walker = WalkDir::new(root)
        .min_depth(1)
        .max_depth(max_depth)
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
        result.scanned += 1;
        progress(result.scanned, || format!("Processed {} items...", result.scanned));

        let path = dir_entry.path().to_path_buf();
        let kind = EntryKind::from(dir_entry.file_type());
        let ignored = {
            let rel = path.strip_prefix(root).unwrap_or(&path);
            rules.is_ignored(rel, kind.is_dir())
        };
        let slots = groups
            .entry(path.parent().map(Path::to_path_buf).unwrap_or_default())
            .or_default();

        if ignored {
            result.ignored += 1;
            if kind.is_dir() {
                walker.skip_current_dir();
            }
            slots.push(Slot::Reserved(
                dir_entry.file_name().to_string_lossy().into_owned(),
            ));
            continue;
        }

        let depth = dir_entry.depth();
        let entry = match dir_entry.file_name().to_str() {
            Some(name) => {
                let proposed = normalize_entry(name, kind);
                NameEntry::new(path, name.to_owned(), proposed, kind, depth)
            }
            None => {
                let name = dir_entry.file_name().to_string_lossy().into_owned();
                let mut entry = NameEntry::new(path, name.clone(), name, kind, depth);
                entry.skip = Some(SkipReason::NotUtf8);
                entry
            }
        };
        slots.push(Slot::Candidate(entry));
    }

    for slots in groups.into_values() {
        resolve_dir(slots, options.case_insensitive, &mut result);
    }
    sort_deepest_first(&mut result.renames);
    sort_deepest_first(&mut result.skipped);

    info!(
        "PLAN: {:?} scanned {}, ignored {}, rename {}, skipped {}",
        root,
        result.scanned,
        result.ignored,
        result.renames.len(),
        result.skipped.len()
    );
    Ok(result)
}

/// Decide every entry of one directory level.
/// Each name claims a key (its proposal if it changes, itself otherwise);
/// a key claimed twice, involving at least one change, is a conflict for all claimants.
/// A change onto a name another entry still holds is a conflict too.
fn resolve_dir(slots: Vec<Slot>, case_insensitive: bool, plan: &mut RenamePlan) {
    let fold = |s: &str| fold_key(s, case_insensitive);

    let mut taken: HashSet<String> = HashSet::new();
    let mut claims: HashMap<String, Vec<usize>> = HashMap::new();
    let mut holders: HashMap<String, Vec<usize>> = HashMap::new();
    let mut names = Vec::with_capacity(slots.len());
    let mut changing = Vec::with_capacity(slots.len());
    for (i, slot) in slots.iter().enumerate() {
        let (original, claimed, changes) = match slot {
            Slot::Candidate(e) if !e.is_skipped() => {
                (e.name.as_str(), e.proposed.as_str(), e.is_changed())
            }
            Slot::Candidate(e) => (e.name.as_str(), e.name.as_str(), false),
            Slot::Reserved(name) => (name.as_str(), name.as_str(), false),
        };
        taken.insert(fold(original));
        taken.insert(fold(claimed));
        claims.entry(fold(claimed)).or_default().push(i);
        holders.entry(fold(original)).or_default().push(i);
        names.push(original.to_owned());
        changing.push(changes);
    }

    for (i, slot) in slots.into_iter().enumerate() {
        let mut entry = match slot {
            Slot::Candidate(entry) => entry,
            Slot::Reserved(_) => continue,
        };
        if entry.is_skipped() {
            warn!("SKIP: {:?}: {}", entry.path, SkipReason::NotUtf8);
            plan.skipped.push(entry);
            continue;
        }

        let key = fold(&entry.proposed);
        let claimants = claims.get(&key).map(Vec::as_slice).unwrap_or(&[]);
        let occupied = entry.is_changed()
            && holders
                .get(&key)
                .map_or(false, |held| held.iter().any(|&j| j != i));
        if occupied || (claimants.len() > 1 && claimants.iter().any(|&j| changing[j])) {
            let mut others: Vec<usize> = claimants
                .iter()
                .chain(holders.get(&key).into_iter().flatten())
                .copied()
                .filter(|&j| j != i)
                .collect();
            others.sort_unstable();
            others.dedup();
            let others = others.into_iter().map(|j| names[j].clone()).collect();
            let reason = SkipReason::Conflict(others);
            warn!("CONFLICT: {:?} -> {:?}: {}", entry.path, entry.proposed, reason);
            entry.skip = Some(reason);
            plan.skipped.push(entry);
            continue;
        }

        if !entry.is_changed() {
            continue;
        }
        if case_insensitive && fold(&entry.name) == key {
            let temp = temp_name(&entry.proposed, &taken, fold);
            taken.insert(fold(&temp));
            entry.temp = Some(temp);
        }
        plan.renames.push(entry);
    }
}

fn sort_deepest_first(entries: &mut [NameEntry]) {
    entries.sort_by(|a, b| {
        b.depth.cmp(&a.depth).then_with(|| {
            natord::compare(&a.path.to_string_lossy(), &b.path.to_string_lossy())
        })
    });
}
