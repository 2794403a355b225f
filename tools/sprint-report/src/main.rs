//! Sprint report CLI
//!
//! Renders the same spreadsheet and PDF reports as the dashboard, writing
//! them to disk instead of handing them to a browser.

mod sink;
mod summary;

use anyhow::{anyhow, bail, Context, Result};
use chrono::{DateTime, Local, Utc};
use clap::{Parser, Subcommand};
use std::fs;
use std::path::{Path, PathBuf};

use sprint_pulse::export::{self, ExportFormat};
use sprint_pulse::{Project, SnapshotCatalog, SprintSnapshot};

use sink::DirectorySink;
use summary::SprintSummary;

#[derive(Parser)]
#[command(name = "sprint-report")]
#[command(version = "0.1.0")]
#[command(about = "Export and summarize sprint health snapshots")]
struct Cli {
    /// Show debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Write a report file for a project
    Export {
        /// Report format (xlsx, pdf)
        #[arg(short, long, default_value = "xlsx", value_parser = parse_format)]
        format: ExportFormat,

        /// Project id (see `projects`)
        #[arg(short, long)]
        project: Option<String>,

        /// Read the snapshot from a JSON file instead of the built-in catalog
        #[arg(short, long)]
        snapshot: Option<PathBuf>,

        /// Directory for the report file
        #[arg(short, long, default_value = ".")]
        out_dir: PathBuf,
    },

    /// Print a short sprint summary
    Summary {
        /// Project id (see `projects`)
        #[arg(short, long)]
        project: Option<String>,

        /// Read the snapshot from a JSON file instead of the built-in catalog
        #[arg(short, long)]
        snapshot: Option<PathBuf>,

        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// List the known projects
    Projects,
}

fn parse_format(name: &str) -> Result<ExportFormat, String> {
    ExportFormat::from_name(name).ok_or_else(|| format!("unknown format '{}' (expected xlsx or pdf)", name))
}

/// Pick the project and its snapshot, optionally replacing the snapshot with
/// one read from disk.
fn resolve(
    catalog: &SnapshotCatalog,
    project_id: Option<&str>,
    snapshot_path: Option<&Path>,
) -> Result<(Project, SprintSnapshot)> {
    let project = match project_id {
        Some(id) => catalog.project(id).cloned().ok_or_else(|| {
            let known: Vec<_> = catalog.projects().map(|p| p.id.as_str()).collect();
            anyhow!("unknown project '{}' (known: {})", id, known.join(", "))
        })?,
        None => catalog.default_project().clone(),
    };

    let snapshot = match snapshot_path {
        Some(path) => {
            let json = fs::read_to_string(path)
                .with_context(|| format!("failed to read {}", path.display()))?;
            let snapshot: SprintSnapshot = serde_json::from_str(&json)
                .with_context(|| format!("{} is not a sprint snapshot", path.display()))?;
            log::info!("loaded snapshot '{}' from {}", snapshot.sprint_name, path.display());
            snapshot
        }
        None => catalog
            .snapshot(&project.id)
            .cloned()
            .ok_or_else(|| anyhow!("no snapshot for project '{}'", project.id))?,
    };

    Ok((project, snapshot))
}

fn run_export(
    snapshot: &SprintSnapshot,
    format: ExportFormat,
    out_dir: &Path,
    generated_at: DateTime<Utc>,
) -> Result<PathBuf> {
    let mut sink = DirectorySink::new(out_dir);
    export::export(snapshot, format, generated_at, &mut sink)?;
    match sink.written().last() {
        Some(path) => Ok(path.clone()),
        None => bail!("export finished without writing a file"),
    }
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .format_timestamp(None)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let catalog = SnapshotCatalog::authored(Local::now().date_naive());

    match cli.command {
        Commands::Export {
            format,
            project,
            snapshot,
            out_dir,
        } => {
            let (project, snapshot) = resolve(&catalog, project.as_deref(), snapshot.as_deref())?;
            log::info!("exporting {} for {}", format.label(), project.name);
            let path = run_export(&snapshot, format, &out_dir, Utc::now())?;
            println!("Report written to: {}", path.display());
        }

        Commands::Summary {
            project,
            snapshot,
            json,
        } => {
            let (project, snapshot) = resolve(&catalog, project.as_deref(), snapshot.as_deref())?;
            let summary = SprintSummary::new(&project, &snapshot);
            if json {
                println!("{}", summary.to_json()?);
            } else {
                print!("{}", summary.render_text());
            }
        }

        Commands::Projects => {
            for project in catalog.projects() {
                println!("{:<16} {:<20} {}", project.id, project.name, project.team);
            }
        }
    }

    Ok(())
}
