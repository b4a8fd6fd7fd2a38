use std::fmt;
use std::path::{Path, PathBuf};

#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum EntryKind {
    Directory,
    File,
    Symlink,
}

impl EntryKind {
    pub fn is_dir(self) -> bool {
        self == EntryKind::Directory
    }
}

impl From<std::fs::FileType> for EntryKind {
    fn from(file_type: std::fs::FileType) -> Self {
        if file_type.is_dir() {
            EntryKind::Directory
        } else if file_type.is_symlink() {
            EntryKind::Symlink
        } else {
            EntryKind::File
        }
    }
}

/// Why a planned entry is left alone.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    /// Other names in the same directory that claim the same target.
    Conflict(Vec<String>),
    /// The name cannot be read as UTF-8.
    NotUtf8,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            SkipReason::Conflict(others) => write!(f, "conflicts with {}", others.join(", ")),
            SkipReason::NotUtf8 => write!(f, "name is not valid UTF-8"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NameEntry {
    pub path: PathBuf,
    pub name: String,
    pub proposed: String,
    pub kind: EntryKind,
    /// Number of components below the scan root.
    pub depth: usize,
    pub skip: Option<SkipReason>,
    /// Intermediate name for renames that only change case on a
    /// case-insensitive filesystem.
    pub temp: Option<String>,
}

impl NameEntry {
    pub fn new(path: PathBuf, name: String, proposed: String, kind: EntryKind, depth: usize) -> Self {
        NameEntry {
            path,
            name,
            proposed,
            kind,
            depth,
            skip: None,
            temp: None,
        }
    }

    pub fn is_changed(&self) -> bool {
        self.name != self.proposed
    }

    pub fn is_skipped(&self) -> bool {
        self.skip.is_some()
    }

    pub fn parent(&self) -> &Path {
        self.path.parent().unwrap_or_else(|| Path::new(""))
    }

    pub fn target_path(&self) -> PathBuf {
        self.parent().join(&self.proposed)
    }

    pub fn temp_path(&self) -> Option<PathBuf> {
        self.temp.as_ref().map(|t| self.parent().join(t))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_target_path() {
        let entry = NameEntry::new(
            PathBuf::from("root/Sub Dir/My File.TXT"),
            "My File.TXT".to_string(),
            "my_file.txt".to_string(),
            EntryKind::File,
            2,
        );
        assert!(entry.is_changed());
        assert!(!entry.is_skipped());
        assert_eq!(entry.target_path(), PathBuf::from("root/Sub Dir/my_file.txt"));
        assert_eq!(entry.temp_path(), None);
    }

    #[test]
    fn test_skip_reason_display() {
        let reason = SkipReason::Conflict(vec!["Foo.txt".to_string(), "foo.txt".to_string()]);
        assert_eq!(reason.to_string(), "conflicts with Foo.txt, foo.txt");
    }
}
