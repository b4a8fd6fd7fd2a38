use super::errors::NfError;

use globset::{GlobBuilder, GlobMatcher};
use log::info;
use std::fs::read_to_string;
use std::path::{Path, PathBuf};

pub const DEFAULT_IGNORE_FILE: &str = ".ignore";
pub const DEFAULT_HIDDEN_MARKER: &str = ".";

/// One line of an ignore file.
#[derive(Debug, Clone)]
pub struct IgnoreRule {
    pub pattern: String,
    matcher: GlobMatcher,
    pub negated: bool,
    pub dir_only: bool,
    pub anchored: bool,
}

impl IgnoreRule {
    /// Parse a single gitignore-style line.
    /// Returns `Ok(None)` for blank lines and comments.
    pub fn parse(line: &str) -> Result<Option<Self>, globset::Error> {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            return Ok(None);
        }

        let (negated, rest) = match line.strip_prefix('!') {
            Some(rest) => (true, rest.trim_start()),
            None => (false, line),
        };
        let rest = rest
            .strip_prefix("\\#")
            .map(|r| format!("#{}", r))
            .or_else(|| rest.strip_prefix("\\!").map(|r| format!("!{}", r)))
            .unwrap_or_else(|| rest.to_owned());

        let (root_relative, rest) = match rest.strip_prefix('/') {
            Some(r) => (true, r),
            None => (false, rest.as_str()),
        };
        let (dir_only, pattern) = match rest.strip_suffix('/') {
            Some(r) => (true, r),
            None => (false, rest),
        };
        if pattern.is_empty() {
            return Ok(None);
        }

        let matcher = GlobBuilder::new(pattern)
            .literal_separator(true)
            .build()?
            .compile_matcher();
        Ok(Some(IgnoreRule {
            pattern: pattern.to_owned(),
            matcher,
            negated,
            dir_only,
            anchored: root_relative || pattern.contains('/'),
        }))
    }

    /// `rel` is relative to the scan root.
    pub fn is_match(&self, rel: &Path, is_dir: bool) -> bool {
        if self.dir_only && !is_dir {
            return false;
        }
        if self.anchored {
            self.matcher.is_match(rel)
        } else {
            match rel.file_name() {
                Some(name) => self.matcher.is_match(name),
                None => false,
            }
        }
    }
}

#[derive(Debug, Clone)]
pub struct IgnoreRuleSet {
    rules: Vec<IgnoreRule>,
    hidden_markers: Vec<String>,
}

impl Default for IgnoreRuleSet {
    fn default() -> Self {
        Self::new(vec![DEFAULT_HIDDEN_MARKER.to_owned()])
    }
}

impl IgnoreRuleSet {
    pub fn new(hidden_markers: Vec<String>) -> Self {
        IgnoreRuleSet {
            rules: Vec::new(),
            hidden_markers,
        }
    }

    /// Parse ignore file contents. `source` is only used in error messages.
    pub fn parse(
        text: &str,
        source: &Path,
        hidden_markers: Vec<String>,
    ) -> Result<Self, NfError> {
        let mut set = Self::new(hidden_markers);
        for (i, line) in text.lines().enumerate() {
            match IgnoreRule::parse(line) {
                Ok(Some(rule)) => set.rules.push(rule),
                Ok(None) => {}
                Err(e) => {
                    return Err(NfError::IgnoreFile(format!(
                        "Error: Invalid pattern in {}:{}: {}",
                        source.display(),
                        i + 1,
                        e
                    )))
                }
            }
        }
        Ok(set)
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    pub fn is_hidden(&self, name: &str) -> bool {
        self.hidden_markers
            .iter()
            .any(|marker| !marker.is_empty() && name.starts_with(marker.as_str()))
    }

    /// Whether `rel` (relative to the scan root) is excluded.
    /// An excluded ancestor directory excludes everything below it.
    pub fn is_ignored(&self, rel: &Path, is_dir: bool) -> bool {
        let components: Vec<_> = rel.components().collect();
        let mut prefix = PathBuf::new();
        for (i, component) in components.iter().enumerate() {
            prefix.push(component);
            let last = i + 1 == components.len();
            if self.excludes(&prefix, if last { is_dir } else { true }) {
                return true;
            }
        }
        false
    }

    /// Last matching rule wins; hidden names start out excluded.
    fn excludes(&self, rel: &Path, is_dir: bool) -> bool {
        let mut excluded = rel
            .file_name()
            .and_then(|n| n.to_str())
            .map(|n| self.is_hidden(n))
            .unwrap_or(false);
        for rule in self.rules.iter() {
            if rule.is_match(rel, is_dir) {
                excluded = !rule.negated;
            }
        }
        excluded
    }
}

/// Contract-level helper.
pub fn is_ignored(rel: &Path, is_dir: bool, ruleset: &IgnoreRuleSet) -> bool {
    ruleset.is_ignored(rel, is_dir)
}

/// Find the ignore file to use.
/// A relative name that is not in the working directory is looked up
/// in the config directory, then in the scan root.
/// A missing default file is fine; a missing requested one is an error.
pub fn locate_ignore_file(
    requested: &Path,
    explicit: bool,
    root: &Path,
    config_dir: Option<&Path>,
) -> Result<Option<PathBuf>, NfError> {
    if requested.exists() {
        return Ok(Some(requested.to_path_buf()));
    }
    if requested.is_relative() {
        let candidates = config_dir
            .map(|dir| dir.join(requested))
            .into_iter()
            .chain(std::iter::once(root.join(requested)));
        for candidate in candidates {
            if candidate.exists() {
                return Ok(Some(candidate));
            }
        }
    }
    if explicit {
        Err(NfError::InvalidPath(requested.to_path_buf()))
    } else {
        Ok(None)
    }
}

pub fn load_ignore_file(path: &Path, hidden_markers: Vec<String>) -> Result<IgnoreRuleSet, NfError> {
    let text = read_to_string(path).map_err(|e| {
        NfError::IgnoreFile(format!("Error: Cannot read {}: {}", path.display(), e))
    })?;
    let set = IgnoreRuleSet::parse(&text, path, hidden_markers)?;
    info!(
        "IGNORE: {:?} from {:?}",
        set.rules.iter().map(|r| r.pattern.as_str()).collect::<Vec<_>>(),
        path
    );
    Ok(set)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rules(text: &str) -> IgnoreRuleSet {
        IgnoreRuleSet::parse(text, Path::new(".ignore"), vec![".".to_string()]).unwrap()
    }

    #[test]
    fn test_parse_rule() {
        assert!(IgnoreRule::parse("").unwrap().is_none());
        assert!(IgnoreRule::parse("   # comment").unwrap().is_none());
        assert!(IgnoreRule::parse("!").unwrap().is_none());

        let rule = IgnoreRule::parse("! /build/").unwrap().unwrap();
        assert!(rule.negated);
        assert!(rule.dir_only);
        assert!(rule.anchored);
        assert_eq!(rule.pattern, "build");

        let rule = IgnoreRule::parse("\\#literal").unwrap().unwrap();
        assert!(!rule.negated);
        assert_eq!(rule.pattern, "#literal");
    }

    #[test]
    fn test_invalid_pattern() {
        let err = IgnoreRuleSet::parse("*.log\nfoo[\n", Path::new("x.ignore"), vec![]);
        match err {
            Err(NfError::IgnoreFile(msg)) => assert!(msg.contains("x.ignore:2")),
            other => panic!("unexpected: {:?}", other),
        }
    }

    #[test]
    fn test_last_match_wins() {
        let set = rules("*.log\n!keep.log\n");
        assert!(set.is_ignored(Path::new("debug.log"), false));
        assert!(set.is_ignored(Path::new("sub/debug.log"), false));
        assert!(!set.is_ignored(Path::new("keep.log"), false));
        assert!(!set.is_ignored(Path::new("sub/keep.log"), false));
        assert!(!set.is_ignored(Path::new("notes.txt"), false));

        let set = rules("!keep.log\n*.log\n");
        assert!(set.is_ignored(Path::new("keep.log"), false));
    }

    #[test]
    fn test_hidden_by_default() {
        let set = rules("");
        assert!(set.is_ignored(Path::new(".git"), true));
        assert!(set.is_ignored(Path::new(".git/config"), false));
        assert!(set.is_ignored(Path::new("src/.env"), false));
        assert!(!set.is_ignored(Path::new("src/main.rs"), false));

        let set = rules("!.github\n");
        assert!(!set.is_ignored(Path::new(".github"), true));
        assert!(!set.is_ignored(Path::new(".github/workflows"), true));
        assert!(set.is_ignored(Path::new(".git"), true));

        let set = IgnoreRuleSet::new(vec!["~$".to_string()]);
        assert!(set.is_ignored(Path::new("~$report.docx"), false));
        assert!(!set.is_ignored(Path::new(".env"), false));
    }

    #[test]
    fn test_dir_only_and_anchored() {
        let set = rules("build/\n/target\ndocs/*.md\n");
        assert!(set.is_ignored(Path::new("build"), true));
        assert!(!set.is_ignored(Path::new("build"), false));
        assert!(set.is_ignored(Path::new("a/build/out.o"), false));

        assert!(set.is_ignored(Path::new("target"), true));
        assert!(set.is_ignored(Path::new("target/debug"), true));
        assert!(!set.is_ignored(Path::new("crate/target"), true));

        assert!(set.is_ignored(Path::new("docs/readme.md"), false));
        assert!(!set.is_ignored(Path::new("docs/sub/readme.md"), false));
        assert!(!set.is_ignored(Path::new("other/docs/readme.md"), false));
    }

    #[test]
    fn test_double_star() {
        let set = rules("**/cache/**\n");
        assert!(set.is_ignored(Path::new("cache/a.bin"), false));
        assert!(set.is_ignored(Path::new("x/y/cache/a.bin"), false));
        assert!(!set.is_ignored(Path::new("x/cache.bin"), false));
    }

    #[test]
    fn test_locate_ignore_file() {
        let root = tempfile::tempdir().unwrap();
        let config = tempfile::tempdir().unwrap();
        let name = Path::new("namefix-test-missing.ignore");

        assert_eq!(
            locate_ignore_file(name, false, root.path(), Some(config.path())).unwrap(),
            None
        );
        assert!(matches!(
            locate_ignore_file(name, true, root.path(), Some(config.path())),
            Err(NfError::InvalidPath(_))
        ));

        std::fs::write(root.path().join(name), "*.tmp\n").unwrap();
        assert_eq!(
            locate_ignore_file(name, true, root.path(), Some(config.path())).unwrap(),
            Some(root.path().join(name))
        );

        std::fs::write(config.path().join(name), "*.bak\n").unwrap();
        assert_eq!(
            locate_ignore_file(name, true, root.path(), Some(config.path())).unwrap(),
            Some(config.path().join(name))
        );
    }

    #[test]
    fn test_load_ignore_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(".ignore");
        std::fs::write(&path, "# tmp files\n*.tmp\n\n!important.tmp\n").unwrap();
        let set = load_ignore_file(&path, vec![".".to_string()]).unwrap();
        assert_eq!(set.len(), 2);
        assert!(set.is_ignored(Path::new("a.tmp"), false));
        assert!(!set.is_ignored(Path::new("important.tmp"), false));
    }
}
