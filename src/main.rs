use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::{info, warn};

use resume_md::config::Settings;
use resume_md::db::{self, DocumentRow};
use resume_md::{parse_resume_with, read_document, Headings, Resume};

#[derive(Parser)]
#[command(name = "resume_md", about = "Markdown résumé parser and memory store")]
struct Cli {
    /// Configuration file (default: ./resume.{toml,yaml,json} if present)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse one résumé and print it as JSON
    Parse {
        file: PathBuf,
        /// Single-line JSON
        #[arg(long)]
        compact: bool,
    },
    /// Show how a document splits into sections
    Sections { file: PathBuf },
    /// Parse many files in parallel, writing <stem>.json for each
    Batch {
        #[arg(required = true)]
        files: Vec<PathBuf>,
        #[arg(short, long)]
        out_dir: PathBuf,
    },
    /// Parse files and upsert them into the memory store
    Store {
        #[arg(required = true)]
        files: Vec<PathBuf>,
        /// Memory name (default from config)
        #[arg(short, long)]
        memory: Option<String>,
    },
    /// List documents in a memory
    List {
        #[arg(short, long)]
        memory: Option<String>,
    },
    /// Print a stored document's résumé JSON
    Show {
        name: String,
        #[arg(short, long)]
        memory: Option<String>,
    },
    /// Show store statistics
    Stats,
}

fn init_tracing(level: &str) {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| level.into()),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let settings = Settings::load(cli.config.as_deref()).context("failed to load configuration")?;
    init_tracing(&settings.log_level);

    let t0 = Instant::now();
    let headings = settings.headings();

    match cli.command {
        Commands::Parse { file, compact } => {
            let resume = parse_path(&file, &headings)?;
            let json = if compact {
                serde_json::to_string(&resume)?
            } else {
                serde_json::to_string_pretty(&resume)?
            };
            println!("{}", json);
        }
        Commands::Sections { file } => {
            let markdown = read_document(&file)?;
            let markdown = resume_md::parser::text::repair_encoding(&markdown);
            let sections = resume_md::parser::sections::split_sections(&markdown, &headings);
            for (kind, text) in sections.iter() {
                println!("── {} ({} lines)", kind, text.lines().count());
                if !text.trim().is_empty() {
                    println!("{}", text.trim_end());
                }
            }
        }
        Commands::Batch { files, out_dir } => {
            fs::create_dir_all(&out_dir)
                .with_context(|| format!("failed to create {:?}", out_dir))?;
            let counts = batch_parse(&files, &out_dir, &headings);
            println!("Done: {} parsed ({} ok, {} errors).", files.len(), counts.ok, counts.errors);
        }
        Commands::Store { files, memory } => {
            let memory = memory.unwrap_or_else(|| settings.memory_name.clone());
            let conn = open_store(&settings)?;
            for file in &files {
                let markdown = read_document(file)?;
                let resume = parse_resume_with(&markdown, &headings);
                let mut row = DocumentRow::markdown(&memory, &document_name(file), markdown, resume);
                row.description = Some(settings.description.clone()).filter(|d| !d.is_empty());
                let id = db::save_document(&conn, &row)?;
                info!(id, memory = %memory, document = %row.document_name, "stored document");
            }
            println!("Stored {} documents in memory '{}'.", files.len(), memory);
        }
        Commands::List { memory } => {
            let memory = memory.unwrap_or_else(|| settings.memory_name.clone());
            let conn = open_store(&settings)?;
            let docs = db::list_documents(&conn, &memory)?;
            if docs.is_empty() {
                println!("No documents in memory '{}'. Run 'store' first.", memory);
                return Ok(());
            }

            println!("{:>3} | {:<28} | {:<24} | {:>4} | {:>4} | {}", "#", "Document", "Candidate", "Work", "Edu", "Stored");
            println!("{}", "-".repeat(100));
            for (i, d) in docs.iter().enumerate() {
                println!(
                    "{:>3} | {:<28} | {:<24} | {:>4} | {:>4} | {}",
                    i + 1,
                    truncate(&d.document_name, 28),
                    truncate(&d.candidate, 24),
                    d.work,
                    d.education,
                    d.stored_at
                );
            }
        }
        Commands::Show { name, memory } => {
            let memory = memory.unwrap_or_else(|| settings.memory_name.clone());
            let conn = open_store(&settings)?;
            let doc = db::fetch_document(&conn, &memory, &name)?;
            println!("{}", serde_json::to_string_pretty(&doc.resume)?);
        }
        Commands::Stats => {
            let conn = open_store(&settings)?;
            let s = db::get_stats(&conn)?;
            println!("Memories:   {}", s.memories);
            println!("Documents:  {}", s.documents);
            println!("Candidates: {}", s.candidates);
        }
    }

    let elapsed = t0.elapsed();
    if elapsed.as_secs() >= 1 {
        println!("\nDone in {:.1}s", elapsed.as_secs_f64());
    }

    Ok(())
}

fn parse_path(file: &Path, headings: &Headings) -> Result<Resume> {
    resume_md::parse_file(file, headings).with_context(|| format!("failed to load {:?}", file))
}

fn open_store(settings: &Settings) -> Result<rusqlite::Connection> {
    if let Some(parent) = settings.db_path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).with_context(|| format!("failed to create {:?}", parent))?;
    }
    let conn = db::connect(&settings.db_path)
        .with_context(|| format!("failed to open {:?}", settings.db_path))?;
    db::init_schema(&conn)?;
    Ok(conn)
}

fn document_name(file: &Path) -> String {
    file.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| file.display().to_string())
}

struct BatchCounts {
    ok: usize,
    errors: usize,
}

fn batch_parse(files: &[PathBuf], out_dir: &Path, headings: &Headings) -> BatchCounts {
    use indicatif::{ProgressBar, ProgressStyle};
    use rayon::prelude::*;

    let pb = ProgressBar::new(files.len() as u64);
    if let Ok(style) = ProgressStyle::default_bar()
        .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({per_sec})")
    {
        pb.set_style(style.progress_chars("#>-"));
    }

    let results: Vec<Result<()>> = files
        .par_iter()
        .map(|file| {
            let result = write_json(file, out_dir, headings);
            pb.inc(1);
            result
        })
        .collect();
    pb.finish_and_clear();

    let mut counts = BatchCounts { ok: 0, errors: 0 };
    for (file, result) in files.iter().zip(results) {
        match result {
            Ok(()) => counts.ok += 1,
            Err(e) => {
                let error = format!("{:#}", e);
                warn!(file = ?file, error = %error, "failed to parse");
                counts.errors += 1;
            }
        }
    }
    counts
}

fn write_json(file: &Path, out_dir: &Path, headings: &Headings) -> Result<()> {
    let resume = parse_path(file, headings)?;
    let stem = file.file_stem().map(|s| s.to_string_lossy().into_owned()).unwrap_or_else(|| "resume".into());
    let out = out_dir.join(format!("{}.json", stem));
    fs::write(&out, serde_json::to_string_pretty(&resume)?).with_context(|| format!("failed to write {:?}", out))?;
    Ok(())
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let truncated: String = s.chars().take(max).collect();
        format!("{}...", truncated)
    }
}
