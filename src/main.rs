mod apply;
mod check;
mod config;
mod entry;
mod errors;
mod functions;
mod ignore;
mod normalize;
mod plan;
mod report;
mod script;

use config::{config_dir, default_output_dir, read_config_or_default, Config, NAMEFIX};
use errors::NfError;
use functions::{duration_to_string, init_log};
use ignore::{load_ignore_file, locate_ignore_file, IgnoreRuleSet, DEFAULT_IGNORE_FILE};
use plan::PlanOptions;

use clap::{Parser, Subcommand};
use log::info;
use regex::Regex;
use std::path::{Path, PathBuf};
use std::time::Instant;

#[derive(Parser, Debug)]
#[command(name = "nfx", version, about = "Check and normalize file and folder names")]
struct Cli {
    /// Write a log file to the local data directory
    #[arg(short, long, global = true)]
    log: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Rename files and folders to lowercase ASCII joined by underscores
    Normalize {
        /// Root directory to normalize
        path: PathBuf,

        /// Process subdirectories recursively
        #[arg(short, long)]
        nested: bool,

        /// Disable dry run mode (default: dry run)
        #[arg(long)]
        no_dry_run: bool,

        /// Actually perform the renames (requires --no-dry-run)
        #[arg(long)]
        confirm: bool,

        /// Ignore file with gitignore-style patterns (default: .ignore)
        #[arg(short, long)]
        ignore: Option<PathBuf>,

        /// Treat names that differ only by case as the same name
        #[arg(long, conflicts_with = "case_sensitive")]
        case_insensitive: bool,

        /// Treat names that differ only by case as different names
        #[arg(long)]
        case_sensitive: bool,
    },
    /// Report file and folder names that do not match a regex
    Check {
        /// Root directory to check
        path: PathBuf,

        /// Regex pattern names must match (default: ^[a-z0-9_]+$)
        #[arg(short, long)]
        regex: Option<String>,

        /// Ignore file with gitignore-style patterns (default: .ignore)
        #[arg(short, long)]
        ignore: Option<PathBuf>,

        /// Output directory for the report (default: Downloads)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

fn main() {
    let cli = Cli::parse();
    if let Err(e) = run(cli) {
        eprintln!("{}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), NfError> {
    if cli.log {
        let data_local_path = {
            let mut path = dirs::data_local_dir().ok_or_else(|| {
                NfError::Dirs("Cannot read the data local directory.".to_string())
            })?;
            path.push(NAMEFIX);
            path
        };
        init_log(&data_local_path)?;
    }

    let config = read_config_or_default()?;

    match cli.command {
        Commands::Normalize {
            path,
            nested,
            no_dry_run,
            confirm,
            ignore,
            case_insensitive,
            case_sensitive,
        } => {
            let root = validate_root(&path)?;
            let rules = load_rules(ignore, &root, &config)?;
            let options = PlanOptions {
                recursive: nested,
                case_insensitive: resolve_case_insensitive(
                    case_insensitive,
                    case_sensitive,
                    &config,
                ),
            };
            normalize_names(&root, &rules, options, !no_dry_run, confirm)
        }
        Commands::Check {
            path,
            regex,
            ignore,
            output,
        } => {
            let root = validate_root(&path)?;
            let pattern = regex.as_deref().unwrap_or_else(|| config.regex());
            println!("Using regex pattern: {}", pattern);
            let pattern = Regex::new(pattern)?;
            let rules = load_rules(ignore, &root, &config)?;
            let output_dir = match output.or_else(|| config.output_dir.clone()) {
                Some(dir) => dir,
                None => default_output_dir()?,
            };
            check_names(&root, &pattern, &rules, &output_dir)
        }
    }
}

/// The target must be an existing directory.
fn validate_root(path: &Path) -> Result<PathBuf, NfError> {
    if !path.exists() {
        return Err(NfError::InvalidPath(path.to_path_buf()));
    }
    if !path.is_dir() {
        return Err(NfError::NotDirectory(path.to_path_buf()));
    }
    if cfg!(not(windows)) {
        // On windows, "//?" would be inserted at the beginning of the path.
        path.canonicalize().map_err(|e| NfError::from_io(e, path))
    } else {
        Ok(path.to_path_buf())
    }
}

/// Flags win over the config file, which wins over the platform default.
fn resolve_case_insensitive(insensitive: bool, sensitive: bool, config: &Config) -> bool {
    if insensitive {
        true
    } else if sensitive {
        false
    } else {
        config.case_insensitive()
    }
}

fn load_rules(
    requested: Option<PathBuf>,
    root: &Path,
    config: &Config,
) -> Result<IgnoreRuleSet, NfError> {
    let explicit = requested.is_some() || config.ignore_file.is_some();
    let requested = requested
        .or_else(|| config.ignore_file.clone())
        .unwrap_or_else(|| PathBuf::from(DEFAULT_IGNORE_FILE));

    match locate_ignore_file(&requested, explicit, root, config_dir().as_deref())? {
        Some(p) => {
            let rules = load_ignore_file(&p, config.hidden_markers())?;
            if !rules.is_empty() {
                println!(
                    "Loaded {} ignore pattern(s) from {}",
                    rules.len(),
                    p.display()
                );
            }
            Ok(rules)
        }
        None => Ok(IgnoreRuleSet::new(config.hidden_markers())),
    }
}

fn normalize_names(
    root: &Path,
    rules: &IgnoreRuleSet,
    options: PlanOptions,
    dry_run: bool,
    confirm: bool,
) -> Result<(), NfError> {
    println!("Scanning files and directories...");
    let start = Instant::now();
    let plan = plan::plan(root, rules, options)?;

    for line in report::skipped_lines(&plan) {
        eprintln!("{}", line);
    }
    for line in report::plan_lines(&plan, dry_run) {
        println!("{}", line);
    }
    if plan.is_empty() {
        return Ok(());
    }

    if !dry_run && confirm {
        println!();
        println!("Applying renames...");
    }
    let result = apply::apply(&plan, dry_run, confirm);
    let duration = duration_to_string(start.elapsed());
    println!();
    for line in report::apply_lines(&result, &duration) {
        if line.starts_with("Error") || line.starts_with("Failed") {
            eprintln!("{}", line);
        } else {
            println!("{}", line);
        }
    }
    info!("NORMALIZE: done in {}", duration);
    Ok(())
}

fn check_names(
    root: &Path,
    pattern: &Regex,
    rules: &IgnoreRuleSet,
    output_dir: &Path,
) -> Result<(), NfError> {
    println!("Checking files and directories...");
    let report = check::check_names(root, pattern, rules)?;
    for line in report::check_lines(&report) {
        println!("{}", line);
    }
    if let Some(file) = check::write_report(&report, output_dir, &chrono::Local::now())? {
        println!("Results saved to: {}", file.display());
    }
    Ok(())
}
