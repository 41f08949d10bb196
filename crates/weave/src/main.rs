//! Command-line interface for the `weave` content pipeline.

use std::{
    collections::BTreeMap,
    fs, io,
    path::{Path, PathBuf},
    process::ExitCode,
};

use clap::{Parser, Subcommand};
use comfy_table::Table;
use weave_artifacts::{ContentSet, read_documents, read_index, write_artifacts};
use weave_document::{Document, LANDING_PAGES, Routes, transform_all};
use weave_link::{AliasIndex, build_backlinks, build_index, wiki_links};
use weave_render::render_html;
use weave_store::{DocumentStore, StoreConfig};

#[derive(Parser)]
#[command(name = "weave")]
#[command(about = "Content pipeline - documents, wiki-links, and backlinks for a static site")]
/// Top-level CLI options.
struct Cli {
    #[command(subcommand)]
    /// Subcommand to execute.
    command: Commands,
}

#[derive(Subcommand)]
/// Supported `weave` subcommands.
enum Commands {
    /// Fetch documents and write the JSON artifacts
    Build {
        /// Output directory for artifacts
        #[arg(long, default_value = "data")]
        out: PathBuf,

        /// TOML file overriding the content-type route table
        #[arg(long)]
        routes: Option<PathBuf>,
    },

    /// Diagnose alias collisions and unresolved wiki-links in built artifacts
    Check {
        /// Artifact directory
        #[arg(long, default_value = "data")]
        dir: PathBuf,
    },

    /// Render a markdown body to HTML using the built alias index
    Render {
        /// Markdown file to render; stdin when omitted
        file: Option<PathBuf>,

        /// Artifact directory
        #[arg(long, default_value = "data")]
        dir: PathBuf,
    },

    /// Show artifact statistics
    Status {
        /// Artifact directory
        #[arg(long, default_value = "data")]
        dir: PathBuf,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    match cli.command {
        Commands::Build { out, routes } => cmd_build(&out, routes.as_deref()),
        Commands::Check { dir } => cmd_check(&dir),
        Commands::Render { file, dir } => cmd_render(file.as_deref(), &dir),
        Commands::Status { dir } => cmd_status(&dir),
    }
}

/// Implements the `weave build` command.
fn cmd_build(out: &Path, routes_file: Option<&Path>) -> ExitCode {
    let routes = match routes_file {
        Some(path) => match Routes::from_toml_file(path) {
            Ok(routes) => routes,
            Err(e) => {
                eprintln!("error: {e}");
                return ExitCode::FAILURE;
            }
        },
        None => Routes::default(),
    };

    let config = match StoreConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("error: {e}");
            return ExitCode::FAILURE;
        }
    };

    println!("Fetching documents from the store...");
    let rows = match DocumentStore::new(config).fetch_published() {
        Ok(rows) => rows,
        Err(e) => {
            eprintln!("error: {e}");
            return ExitCode::FAILURE;
        }
    };

    if rows.is_empty() {
        println!("warning: store returned no documents; writing empty artifacts");
    }

    let documents = match transform_all(rows, &routes) {
        Ok(documents) => documents,
        Err(e) => {
            eprintln!("error: {e}");
            return ExitCode::FAILURE;
        }
    };

    let index_build = build_index(&documents);
    for collision in &index_build.collisions {
        println!("warning: {collision}");
    }

    let backlinks = build_backlinks(&documents, &index_build.index);

    if let Err(e) = write_artifacts(out, &documents, &index_build.index, &backlinks) {
        eprintln!("error: {e}");
        return ExitCode::FAILURE;
    }

    println!(
        "Built content: {} documents, {} aliases, {} backlink entries",
        documents.len(),
        index_build.index.len(),
        backlinks.entry_count()
    );
    for (content_type, count) in count_by_type(&documents) {
        println!("  - {content_type}: {count}");
    }

    ExitCode::SUCCESS
}

/// Counts documents per content type.
fn count_by_type(documents: &[Document]) -> BTreeMap<&str, usize> {
    let mut counts = BTreeMap::new();
    for doc in documents {
        *counts.entry(doc.content_type.as_str()).or_insert(0) += 1;
    }
    counts
}

/// Implements the `weave check` command.
fn cmd_check(dir: &Path) -> ExitCode {
    let documents = match read_documents(dir) {
        Ok(documents) => documents,
        Err(e) => {
            eprintln!("error: {e}");
            return ExitCode::FAILURE;
        }
    };
    let index = match read_index(dir) {
        Ok(index) => index,
        Err(e) => {
            eprintln!("error: {e}");
            return ExitCode::FAILURE;
        }
    };

    println!("Checking artifacts in {}...", dir.display());
    println!();

    let collisions = build_index(&documents).collisions;
    let unresolved = unresolved_references(&documents, &index);

    if collisions.is_empty() && unresolved.is_empty() {
        println!("No issues found.");
        return ExitCode::SUCCESS;
    }

    if !collisions.is_empty() {
        println!("Alias collisions ({}):", collisions.len());
        for collision in &collisions {
            println!("  - {collision}");
        }
        println!();
    }

    if !unresolved.is_empty() {
        println!("Unresolved references ({}):", unresolved.len());
        for (source, target) in &unresolved {
            println!("  - {source} -> [[{target}]]");
        }
        println!();
    }

    println!("Hints:");
    if !collisions.is_empty() {
        println!("  - Rename one of the colliding documents, or accept that the later one wins.");
    }
    if !unresolved.is_empty() {
        println!("  - Unresolved references render as broken-link markers, not errors.");
    }

    ExitCode::FAILURE
}

/// Collects (source canonical, target) pairs for wiki-links that do not
/// resolve against the index.
fn unresolved_references(documents: &[Document], index: &AliasIndex) -> Vec<(String, String)> {
    let mut missing = Vec::new();
    for doc in documents {
        if !doc.is_eligible() || doc.body_md.is_empty() {
            continue;
        }
        for link in wiki_links(&doc.body_md) {
            if index.resolve(link.target).is_none() {
                missing.push((doc.canonical.clone(), link.target.to_string()));
            }
        }
    }
    missing
}

/// Implements the `weave render` command.
fn cmd_render(file: Option<&Path>, dir: &Path) -> ExitCode {
    let index = match read_index(dir) {
        Ok(index) => index,
        Err(e) => {
            eprintln!("error: {e}");
            return ExitCode::FAILURE;
        }
    };

    let body = match file {
        Some(path) => fs::read_to_string(path),
        None => io::read_to_string(io::stdin()),
    };
    let body = match body {
        Ok(body) => body,
        Err(e) => {
            eprintln!("error: could not read input: {e}");
            return ExitCode::FAILURE;
        }
    };

    print!("{}", render_html(&body, &index));
    ExitCode::SUCCESS
}

/// Implements the `weave status` command.
fn cmd_status(dir: &Path) -> ExitCode {
    let content = match ContentSet::load(dir) {
        Ok(content) => content,
        Err(e) => {
            eprintln!("error: {e}");
            return ExitCode::FAILURE;
        }
    };

    let mut table = Table::new();
    table.set_header(vec!["Content type", "Documents", "Inbound links"]);
    for (content_type, count) in count_by_type(content.documents()) {
        let inbound: usize = content
            .documents()
            .iter()
            .filter(|doc| doc.content_type == content_type)
            .map(|doc| content.backlinks_for(&doc.canonical).len())
            .sum();
        table.add_row(vec![
            content_type.to_string(),
            count.to_string(),
            inbound.to_string(),
        ]);
    }
    println!("{table}");

    println!("Landing pages:");
    let routes = Routes::default();
    for landing in LANDING_PAGES {
        let count: usize = routes
            .content_types_for_landing(landing)
            .iter()
            .map(|content_type| content.by_content_type(content_type).len())
            .sum();
        println!("  {landing}: {count} documents");
    }
    println!();

    let recent = content.recent(5);
    if !recent.is_empty() {
        println!("Most recent:");
        for doc in recent {
            println!("  {} ({})", doc.title, doc.canonical);
        }
        println!();
    }

    println!(
        "{} documents, {} backlink entries",
        content.documents().len(),
        content.backlinks().entry_count()
    );

    ExitCode::SUCCESS
}
