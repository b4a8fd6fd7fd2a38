use crate::errors::NfError;

use log::info;
use simplelog::{ConfigBuilder, LevelFilter, WriteLogger};
use std::collections::HashSet;
use std::path::Path;
use std::time::Duration;

/// Log progress every this many scanned entries.
pub const PROGRESS_STEP: usize = 1000;
const TEMP_SUFFIX: &str = ".nfx-tmp";

/// Pick an intermediate name that is not taken, for two-step renames.
/// `taken` holds the folded keys of the directory's names.
pub fn temp_name(name: &str, taken: &HashSet<String>, fold: impl Fn(&str) -> String) -> String {
    let mut candidate = format!("{}{}", name, TEMP_SUFFIX);
    let mut n = 1;
    while taken.contains(&fold(&candidate)) {
        candidate = format!("{}{}{}", name, TEMP_SUFFIX, n);
        n += 1;
    }
    candidate
}

/// Comparison key of a name on the target filesystem.
pub fn fold_key(name: &str, case_insensitive: bool) -> String {
    if case_insensitive {
        name.to_lowercase()
    } else {
        name.to_owned()
    }
}

/// "1 item" / "3 items".
pub fn items(n: usize) -> String {
    if n == 1 {
        "1 item".to_owned()
    } else {
        format!("{} items", n)
    }
}

/// Print and log a progress line every `PROGRESS_STEP` entries.
/// Returns whether a line was emitted.
pub fn progress(count: usize, message: impl FnOnce() -> String) -> bool {
    if count == 0 || count % PROGRESS_STEP != 0 {
        return false;
    }
    let message = message();
    println!("{}", message);
    info!("{}", message);
    true
}

/// Create the duration as String.
pub fn duration_to_string(duration: Duration) -> String {
    let s = duration.as_secs_f32();
    let mut result: String = s.to_string().chars().take(4).collect();
    result.push('s');
    result
}

pub fn init_log(data_local_path: &Path) -> Result<(), NfError> {
    let mut log_name = chrono::Local::now().format("%F-%H-%M-%S").to_string();
    log_name.push_str(".log");
    let mut builder = ConfigBuilder::new();
    let config = match builder.set_time_offset_to_local() {
        Ok(b) => b.build(),
        Err(b) => b.build(),
    };
    let log_path = data_local_path.join("log");
    if !log_path.exists() {
        std::fs::create_dir_all(&log_path)?;
    }
    let log_path = log_path.join(log_name);
    WriteLogger::init(LevelFilter::Info, config, std::fs::File::create(log_path)?)?;
    info!("===START===");

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_temp_name() {
        let mut taken = HashSet::new();
        taken.insert("foo.txt".to_string());
        assert_eq!(
            temp_name("foo.txt", &taken, |s| s.to_owned()),
            "foo.txt.nfx-tmp".to_string()
        );
        taken.insert("foo.txt.nfx-tmp".to_string());
        taken.insert("foo.txt.nfx-tmp1".to_string());
        assert_eq!(
            temp_name("foo.txt", &taken, |s| s.to_owned()),
            "foo.txt.nfx-tmp2".to_string()
        );
        assert_eq!(
            temp_name("FOO.txt", &taken, |s| fold_key(s, true)),
            "FOO.txt.nfx-tmp2".to_string()
        );
    }

    #[test]
    fn test_fold_key() {
        assert_eq!(fold_key("Foo.TXT", true), "foo.txt");
        assert_eq!(fold_key("Foo.TXT", false), "Foo.TXT");
    }

    #[test]
    fn test_items() {
        assert_eq!(items(0), "0 items".to_string());
        assert_eq!(items(1), "1 item".to_string());
        assert_eq!(items(12), "12 items".to_string());
    }

    #[test]
    fn test_progress() {
        let mut built = 0;
        for count in 0..=2 * PROGRESS_STEP {
            progress(count, || {
                built += 1;
                format!("Processed {} items...", count)
            });
        }
        assert_eq!(built, 2);
        assert!(progress(PROGRESS_STEP, String::new));
        assert!(!progress(PROGRESS_STEP + 1, String::new));
    }

    #[test]
    fn test_duration_to_string() {
        assert_eq!(
            duration_to_string(Duration::from_millis(5432)),
            "5.43s".to_string()
        );
    }
}
