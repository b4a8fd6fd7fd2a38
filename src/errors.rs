use std::io::ErrorKind;
use std::path::{Path, PathBuf};

#[derive(Debug)]
pub enum NfError {
    InvalidPath(PathBuf),
    NotDirectory(PathBuf),
    IgnoreFile(String),
    CollisionDetected(PathBuf),
    PermissionDenied(PathBuf),
    Filesystem(PathBuf, String),
    Io(String),
    Dirs(String),
    Yaml(String),
    WalkDir(String),
    Regex(String),
    Log(String),
}

impl NfError {
    /// Attach the path to an io error raised while touching it.
    pub fn from_io(err: std::io::Error, path: &Path) -> Self {
        match err.kind() {
            ErrorKind::PermissionDenied => NfError::PermissionDenied(path.to_path_buf()),
            ErrorKind::NotFound => NfError::InvalidPath(path.to_path_buf()),
            _ => NfError::Filesystem(path.to_path_buf(), err.to_string()),
        }
    }
}

impl std::error::Error for NfError {}

impl std::fmt::Display for NfError {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        let printable = match self {
            NfError::InvalidPath(p) => format!("Error: Path {:?} does not exist.", p),
            NfError::NotDirectory(p) => format!("Error: {:?} is not a directory.", p),
            NfError::IgnoreFile(s) => s.to_owned(),
            NfError::CollisionDetected(p) => format!("Error: Target already exists -> {:?}", p),
            NfError::PermissionDenied(p) => format!("Error: Permission denied -> {:?}", p),
            NfError::Filesystem(p, s) => format!("Error: {} -> {:?}", s, p),
            NfError::Io(s) => s.to_owned(),
            NfError::Dirs(s) => s.to_owned(),
            NfError::Yaml(s) => s.to_owned(),
            NfError::WalkDir(s) => s.to_owned(),
            NfError::Regex(s) => format!("Error: Invalid regex pattern: {}", s),
            NfError::Log(s) => s.to_owned(),
        };
        write!(f, "{}", printable)
    }
}

impl From<std::io::Error> for NfError {
    fn from(err: std::io::Error) -> Self {
        NfError::Io(err.to_string())
    }
}

impl From<serde_yaml::Error> for NfError {
    fn from(err: serde_yaml::Error) -> Self {
        NfError::Yaml(err.to_string())
    }
}

impl From<walkdir::Error> for NfError {
    fn from(err: walkdir::Error) -> Self {
        let path = err.path().map(Path::to_path_buf);
        match (err.io_error().map(|e| e.kind()), path) {
            (Some(ErrorKind::PermissionDenied), Some(p)) => NfError::PermissionDenied(p),
            (Some(ErrorKind::NotFound), Some(p)) => NfError::InvalidPath(p),
            _ => NfError::WalkDir(err.to_string()),
        }
    }
}

impl From<regex::Error> for NfError {
    fn from(err: regex::Error) -> Self {
        NfError::Regex(err.to_string())
    }
}

impl From<log::SetLoggerError> for NfError {
    fn from(err: log::SetLoggerError) -> Self {
        NfError::Log(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_io_keeps_path() {
        let p = PathBuf::from("a/b.txt");
        let denied = std::io::Error::new(ErrorKind::PermissionDenied, "denied");
        assert!(matches!(
            NfError::from_io(denied, &p),
            NfError::PermissionDenied(q) if q == p
        ));
        let other = std::io::Error::new(ErrorKind::Other, "boom");
        assert_eq!(
            NfError::from_io(other, &p).to_string(),
            "Error: boom -> \"a/b.txt\"".to_string()
        );
    }
}
