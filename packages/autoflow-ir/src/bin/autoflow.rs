//! Autoflow CLI
//!
//! # Usage
//!
//! ```bash
//! # Print rewritten sources to stdout
//! cargo run --bin autoflow -- transform src/store.ts
//!
//! # Mirror each input's path under out/, with a JSON report
//! cargo run --bin autoflow -- transform src/*.ts --out-dir out --report
//!
//! # Fail when any file still needs rewriting
//! cargo run --bin autoflow -- transform src/*.ts --check
//!
//! # Show the effective configuration as YAML
//! cargo run --bin autoflow -- print-config --config autoflow.yaml
//! ```
//!
//! Logging is off unless `AUTOFLOW_LOG` holds a filter (`AUTOFLOW_LOG=debug`).

use autoflow_ir::pipeline::{BatchSummary, OutputTree};
use autoflow_ir::{NamePolicy, TransformConfig, TransformOptions, UnitProcessor};
use clap::{Parser, Subcommand};
use serde_json::json;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "autoflow")]
#[command(about = "Rewrite autoFlow/autoModel members into mobx-keystone flows and models", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Rewrite source files
    Transform {
        /// TypeScript files to rewrite
        #[arg(required = true)]
        files: Vec<PathBuf>,

        #[command(flatten)]
        settings: Settings,

        /// Write outputs into this directory, mirroring each input's path
        #[arg(short, long)]
        out_dir: Option<PathBuf>,

        /// Only report; exit with 1 if any file would change
        #[arg(long)]
        check: bool,

        /// Print a JSON report instead of the rewritten sources
        #[arg(long)]
        report: bool,
    },

    /// Print the effective configuration as YAML
    PrintConfig {
        #[command(flatten)]
        settings: Settings,
    },
}

#[derive(clap::Args)]
struct Settings {
    /// YAML configuration file (schema version 1)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override the target package name
    #[arg(short, long)]
    package: Option<String>,

    /// Override the identity naming policy (path, strip_extension, file_stem)
    #[arg(long)]
    identity_name: Option<String>,
}

impl Settings {
    fn resolve(&self) -> Result<TransformConfig, Box<dyn std::error::Error>> {
        let mut config = match &self.config {
            Some(path) => TransformConfig::from_yaml(path)?,
            None => TransformConfig::default(),
        };
        if let Some(package) = &self.package {
            config = config.target_package_name(package.clone());
        }
        if let Some(policy) = &self.identity_name {
            config = config.identity_name(NamePolicy::from_str(policy)?);
        }
        Ok(config)
    }
}

fn main() -> ExitCode {
    if let Ok(filter) = EnvFilter::try_from_env("AUTOFLOW_LOG") {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(true)
            .with_writer(std::io::stderr)
            .init();
    }

    let cli = Cli::parse();

    let outcome = match cli.command {
        Commands::Transform {
            files,
            settings,
            out_dir,
            check,
            report,
        } => run_transform(&files, &settings, out_dir.as_deref(), check, report),
        Commands::PrintConfig { settings } => print_config(&settings),
    };

    match outcome {
        Ok(code) => code,
        Err(e) => {
            eprintln!("error: {}", e);
            ExitCode::from(2)
        }
    }
}

fn run_transform(
    files: &[PathBuf],
    settings: &Settings,
    out_dir: Option<&Path>,
    check: bool,
    report: bool,
) -> Result<ExitCode, Box<dyn std::error::Error>> {
    let processor = UnitProcessor::new(TransformOptions::new(settings.resolve()?))?;
    let mut results = processor.process_batch(files);

    if !check {
        let mut tree = out_dir.map(OutputTree::new);
        for (path, result) in files.iter().zip(results.iter_mut()) {
            let Ok(processed) = result else {
                continue;
            };
            let written = match tree.as_mut() {
                Some(tree) => tree.write(path, &processed.output).map(|_| ()),
                None if !report => {
                    print!("{}", processed.output);
                    Ok(())
                }
                None => Ok(()),
            };
            if let Err(e) = written {
                *result = Err(e);
            }
        }
    }

    let summary = BatchSummary::from_results(&results);
    let mut entries = Vec::with_capacity(results.len());
    for (path, result) in files.iter().zip(&results) {
        match result {
            Ok(processed) => entries.push(serde_json::to_value(processed)?),
            Err(e) => {
                if e.is_internal() {
                    eprintln!("{}: internal error: {}", path.display(), e);
                } else {
                    eprintln!("{}: {}", path.display(), e);
                }
                entries.push(json!({
                    "file_path": path.display().to_string(),
                    "error": e.to_string(),
                    "internal": e.is_internal(),
                }));
            }
        }
    }

    if report || check {
        let document = json!({ "files": entries, "summary": summary });
        println!("{}", serde_json::to_string_pretty(&document)?);
    }

    let code = if summary.failed > 0 {
        ExitCode::from(2)
    } else if check && summary.changed > 0 {
        ExitCode::from(1)
    } else {
        ExitCode::SUCCESS
    };
    Ok(code)
}

fn print_config(settings: &Settings) -> Result<ExitCode, Box<dyn std::error::Error>> {
    print!("{}", settings.resolve()?.to_yaml()?);
    Ok(ExitCode::SUCCESS)
}
