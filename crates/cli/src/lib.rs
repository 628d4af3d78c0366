//! # Ermine CLI
//!
//! Command-line interface for Ermine.
//!
//! The CLI drives the diagram engine headlessly: importing schema text,
//! exporting diagram-language and HTML snapshots, and inspecting or
//! validating project files.
//!
//! ## Commands
//!
//! - `import` - Parse schema text into a project file
//! - `export` - Render a project file as diagram-language text
//! - `snapshot` - Render a project file as a standalone HTML document
//! - `info` - Display information about a project file
//! - `validate` - Validate a project file
//!

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use ermine_core::Validatable;
use ermine_engine::EditorSession;
use std::path::{Path, PathBuf};
use tracing::info;

// Re-export the engine stack for use by the binary crate
pub use ermine_core;
pub use ermine_engine;
pub use ermine_model;

/// CLI version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// ============================================================================
// Argument Definitions
// ============================================================================

/// Entity-Relationship Schema Diagram Engine
#[derive(Debug, Parser)]
#[command(name = "ermine", version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Parse schema text into a project file
    Import {
        /// Input text file
        input: PathBuf,

        /// Output project file
        #[arg(short, long)]
        output: PathBuf,

        /// Input format
        #[arg(long, value_enum, default_value_t = ImportFormat::Diagram)]
        format: ImportFormat,

        /// Table name for column-list imports
        #[arg(long, default_value = "")]
        name: String,
    },

    /// Render a project file as diagram-language text
    Export {
        /// Input project file
        project: PathBuf,

        /// Output text file
        #[arg(short, long)]
        output: PathBuf,
    },

    /// Render a project file as a standalone HTML document
    Snapshot {
        /// Input project file
        project: PathBuf,

        /// Output HTML file
        #[arg(short, long)]
        output: PathBuf,
    },

    /// Display information about a project file
    Info {
        /// Input project file
        project: PathBuf,
    },

    /// Validate a project file
    Validate {
        /// Input project file
        project: PathBuf,
    },
}

/// Supported text import formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum ImportFormat {
    /// Entity-relationship mini-language
    Diagram,
    /// Whitespace-delimited `type name` column list
    Columns,
}

// ============================================================================
// Entry Point
// ============================================================================

/// Parse arguments and run the selected command
pub async fn run() -> Result<()> {
    let cli = Cli::parse();
    run_command(cli).await
}

async fn run_command(cli: Cli) -> Result<()> {
    match cli.command {
        Command::Import {
            input,
            output,
            format,
            name,
        } => import(&input, &output, format, &name).await,
        Command::Export { project, output } => export(&project, &output).await,
        Command::Snapshot { project, output } => snapshot(&project, &output).await,
        Command::Info { project } => print_info(&project).await,
        Command::Validate { project } => validate(&project).await,
    }
}

// ============================================================================
// Commands
// ============================================================================

async fn import(input: &Path, output: &Path, format: ImportFormat, name: &str) -> Result<()> {
    let text = read(input).await?;
    let mut session = EditorSession::new(stem(output));

    match format {
        ImportFormat::Diagram => {
            let report = session
                .import_er_diagram(&text)
                .with_context(|| format!("importing {}", input.display()))?;
            println!(
                "{} {} tables, {} relationships",
                "Imported".green().bold(),
                report.tables.len(),
                report.relationships.len()
            );
            if report.skipped_links > 0 || report.skipped_entities > 0 {
                println!(
                    "{} skipped {} links, {} entities",
                    "Warning:".yellow(),
                    report.skipped_links,
                    report.skipped_entities
                );
            }
        }
        ImportFormat::Columns => {
            let id = session
                .import_column_list(name, &text)
                .with_context(|| format!("importing {}", input.display()))?;
            let table = session
                .document()
                .table(id)
                .context("imported table missing from document")?;
            println!(
                "{} table '{}' with {} columns",
                "Imported".green().bold(),
                table.name,
                table.column_count()
            );
        }
    }

    let json = session.save_project()?;
    write(output, &json).await?;
    println!("{} {}", "Wrote".green().bold(), output.display());
    Ok(())
}

async fn export(project: &Path, output: &Path) -> Result<()> {
    let session = open(project).await?;
    let text = session.export_er_diagram();
    write(output, &text).await?;
    println!("{} {}", "Wrote".green().bold(), output.display());
    Ok(())
}

async fn snapshot(project: &Path, output: &Path) -> Result<()> {
    let session = open(project).await?;
    let html = session
        .export_snapshot()
        .with_context(|| format!("rendering {}", project.display()))?;
    write(output, &html).await?;
    println!("{} {}", "Wrote".green().bold(), output.display());
    Ok(())
}

async fn print_info(project: &Path) -> Result<()> {
    let session = open(project).await?;
    let document = session.document();

    println!("{}", "Tables".bold());
    for table in document.tables() {
        println!(
            "  {} {} ({} columns)",
            "•".cyan(),
            table.name,
            table.column_count()
        );
    }

    println!("{}", "Relationships".bold());
    for rel in document.relationships() {
        let from = document
            .table(rel.from_table)
            .map(|t| t.name.as_str())
            .unwrap_or("?");
        let to = document
            .table(rel.to_table)
            .map(|t| t.name.as_str())
            .unwrap_or("?");
        println!(
            "  {} {}.{} {} {}.{} [{}]",
            "•".cyan(),
            from,
            rel.from_column,
            "->".dimmed(),
            to,
            rel.to_column,
            rel.label()
        );
    }

    println!(
        "{} {} tables, {} relationships",
        "Total:".bold(),
        document.table_count(),
        document.relationship_count()
    );
    Ok(())
}

async fn validate(project: &Path) -> Result<()> {
    let session = open(project).await?;
    let document = session.document();
    let mut problems = Vec::new();

    for table in document.tables() {
        if let Err(err) = table.validate() {
            problems.push(err.to_string());
        }
    }
    for rel in document.relationships() {
        if let Err(err) = document.check_relationship(rel) {
            problems.push(err.to_string());
        }
    }

    if problems.is_empty() {
        println!("{} {}", "Valid".green().bold(), project.display());
        Ok(())
    } else {
        for problem in &problems {
            println!("{} {}", "Problem:".red().bold(), problem);
        }
        anyhow::bail!("{} validation problems found", problems.len());
    }
}

// ============================================================================
// Helpers
// ============================================================================

/// Load a project file into a fresh session
///
/// File reading is the async boundary; the parse-and-merge step runs
/// once the content is available.
async fn open(project: &Path) -> Result<EditorSession> {
    let json = read(project).await?;
    let mut session = EditorSession::new(stem(project));
    session
        .load_project(&json)
        .with_context(|| format!("loading {}", project.display()))?;
    info!(project = %project.display(), "project loaded");
    Ok(session)
}

async fn read(path: &Path) -> Result<String> {
    tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("reading {}", path.display()))
}

async fn write(path: &Path, content: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            tokio::fs::create_dir_all(parent)
                .await
                .with_context(|| format!("creating {}", parent.display()))?;
        }
    }
    tokio::fs::write(path, content)
        .await
        .with_context(|| format!("writing {}", path.display()))
}

fn stem(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "Untitled Schema".to_string())
}

// ============================================================================
// Tests
// ============================================================================
