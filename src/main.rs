use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, ValueEnum};

use alice_seo::analysis::recommend::Priority;
use alice_seo::engine::pipeline::{BatchEntry, BatchOutcome};
use alice_seo::{AnalysisConfig, AuditEngine, PageAudit, PageSource};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Format {
    Json,
    Summary,
}

/// Content quality, readability and on-page SEO report for web pages.
#[derive(Debug, Parser)]
#[command(name = "alice-seo", version, about)]
struct Cli {
    /// HTML files or http(s) URLs
    #[arg(required = true)]
    inputs: Vec<String>,

    /// Page origin used to tell internal from external links
    /// (defaults to the origin of each fetched URL)
    #[arg(long)]
    origin: Option<String>,

    /// TOML file overriding analysis thresholds
    #[arg(long)]
    config: Option<PathBuf>,

    #[arg(long, value_enum, default_value_t = Format::Json)]
    format: Format,

    /// Single-line JSON
    #[arg(long)]
    compact: bool,
}

fn main() -> ExitCode {
    env_logger::init();
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => match AnalysisConfig::load(path) {
            Ok(c) => c,
            Err(e) => {
                eprintln!("alice-seo: {e}");
                return ExitCode::from(2);
            }
        },
        None => AnalysisConfig::default(),
    };

    let mut engine = AuditEngine::new(config);
    if let Some(origin) = cli.origin.clone() {
        engine = engine.with_origin(origin);
    }

    let sources: Vec<PageSource> = cli.inputs.iter().map(|i| PageSource::from_arg(i)).collect();
    let entries = engine.audit_batch(&sources);
    let failed = entries
        .iter()
        .filter(|e| matches!(e.outcome, BatchOutcome::Error(_)))
        .count();

    match cli.format {
        Format::Json => {
            let rendered = if cli.compact {
                serde_json::to_string(&entries)
            } else {
                serde_json::to_string_pretty(&entries)
            };
            match rendered {
                Ok(json) => println!("{json}"),
                Err(e) => {
                    eprintln!("alice-seo: cannot serialize report: {e}");
                    return ExitCode::FAILURE;
                }
            }
        }
        Format::Summary => {
            for entry in &entries {
                print_summary(entry);
            }
        }
    }

    if failed > 0 {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}

fn print_summary(entry: &BatchEntry) {
    match &entry.outcome {
        BatchOutcome::Error(e) => println!("{}\n  error: {}\n", entry.source, e),
        BatchOutcome::Audit(audit) => print_audit(&entry.source, audit),
    }
}

fn print_audit(source: &str, audit: &PageAudit) {
    let c = &audit.content;
    println!("{source}");
    if !audit.title.is_empty() {
        println!("  title:       {}", audit.title);
    }
    println!("  score:       {}/100", c.score);
    println!(
        "  words:       {} ({} content), {} min read",
        c.text.total_words, c.text.content_words, c.text.reading_time_minutes
    );
    println!(
        "  readability: {} ({:?}, fog {:.1})",
        c.readability.score, c.readability.level, c.readability.fog_index
    );
    for rec in &c.recommendations {
        let tag = match rec.priority {
            Priority::Critical => "CRIT",
            Priority::Warning => "WARN",
            Priority::Info => "INFO",
        };
        println!("  [{tag}] {} ({})", rec.title, rec.id);
    }
    println!();
}
