//! Command-line interface for texscrub.

#[cfg(feature = "cli")]
use clap::{Parser, Subcommand};
#[cfg(feature = "cli")]
use std::fs;
#[cfg(feature = "cli")]
use std::io::{self, Read, Write};
#[cfg(feature = "cli")]
use std::path::{Path, PathBuf};

#[cfg(feature = "cli")]
use texscrub::{audit, deep_sanitize, sanitize, AuditReport};

#[cfg(feature = "cli")]
#[derive(Parser)]
#[command(
    name = "texscrub",
    version,
    about = "Sanitize LaTeX-flavored math markup embedded in prose"
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Input file (reads stdin when omitted)
    input: Option<PathBuf>,

    /// Output file (writes stdout when omitted)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Treat the input as JSON and sanitize every string leaf
    #[arg(long)]
    json: bool,
}

#[cfg(feature = "cli")]
#[derive(Subcommand)]
enum Commands {
    /// Sanitize files and report residual defects
    Audit {
        /// Files or directories to audit (directories are walked recursively)
        paths: Vec<PathBuf>,

        /// Emit full reports as JSON instead of one line per finding
        #[arg(long)]
        json: bool,

        /// Report findings without a failing exit status
        #[arg(long)]
        warn_only: bool,
    },
}

#[cfg(feature = "cli")]
fn main() -> io::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Audit {
            paths,
            json,
            warn_only,
        }) => run_audit(&paths, json, warn_only),
        None => run_sanitize(cli.input.as_deref(), cli.output.as_deref(), cli.json),
    }
}

#[cfg(feature = "cli")]
fn run_sanitize(input: Option<&Path>, output: Option<&Path>, as_json: bool) -> io::Result<()> {
    let source = match input {
        Some(path) => fs::read_to_string(path)?,
        None => {
            let mut buffer = String::new();
            io::stdin().read_to_string(&mut buffer)?;
            buffer
        }
    };

    let result = if as_json {
        let value: serde_json::Value = serde_json::from_str(&source)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
        let cleaned = deep_sanitize(&value);
        serde_json::to_string_pretty(&cleaned)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?
    } else {
        sanitize(&source)
    };

    match output {
        Some(path) => {
            let mut file = fs::File::create(path)?;
            writeln!(file, "{}", result)?;
            eprintln!("✓ Output written to: {}", path.display());
        }
        None => println!("{}", result),
    }
    Ok(())
}

#[cfg(feature = "cli")]
fn run_audit(paths: &[PathBuf], as_json: bool, warn_only: bool) -> io::Result<()> {
    let mut files = Vec::new();
    for path in paths {
        collect_files(path, &mut files)?;
    }
    files.sort();

    let mut reports: Vec<(PathBuf, AuditReport)> = Vec::new();
    let mut finding_count = 0;
    for file in files {
        let source = fs::read_to_string(&file)?;
        let report = audit(&source);
        finding_count += report.issues.len();
        if as_json {
            reports.push((file, report));
        } else {
            for issue in &report.issues {
                println!("{}: {}: {}", file.display(), issue.kind, issue.message);
            }
        }
    }

    if as_json {
        let listing: Vec<_> = reports
            .iter()
            .map(|(file, report)| {
                serde_json::json!({
                    "file": file.display().to_string(),
                    "report": report,
                })
            })
            .collect();
        let rendered = serde_json::to_string_pretty(&listing)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
        println!("{}", rendered);
    }

    if finding_count > 0 {
        eprintln!("{} finding(s)", finding_count);
        if !warn_only {
            std::process::exit(1);
        }
    }
    Ok(())
}

#[cfg(feature = "cli")]
fn collect_files(path: &Path, files: &mut Vec<PathBuf>) -> io::Result<()> {
    if path.is_dir() {
        for entry in fs::read_dir(path)? {
            collect_files(&entry?.path(), files)?;
        }
        return Ok(());
    }
    let auditable = matches!(
        path.extension().and_then(|ext| ext.to_str()),
        Some("txt" | "md" | "tex" | "json")
    );
    if auditable {
        files.push(path.to_path_buf());
    }
    Ok(())
}

#[cfg(not(feature = "cli"))]
fn main() {
    eprintln!("texscrub was built without the `cli` feature");
    std::process::exit(1);
}
