//! Batch command - process many documents into one JSON array.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use clap::Args;
use console::style;
use glob::glob;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{debug, warn};

use formsift_core::{BatchEntry, ExtractionRecord, Pipeline};

use super::{load_config, write_output};

/// Arguments for the batch command.
#[derive(Args)]
pub struct BatchArgs {
    /// Sources: paths, glob patterns, file:// or http(s) URLs
    sources: Vec<String>,

    /// File with one source per line
    #[arg(short, long)]
    list: Option<PathBuf>,

    /// Output file for the JSON array (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Also write a summary CSV to this path
    #[arg(long)]
    summary: Option<PathBuf>,

    /// Number of documents processed at once (overrides config)
    #[arg(short = 'j', long)]
    jobs: Option<usize>,

    /// Pretty-print JSON output
    #[arg(long)]
    pretty: bool,
}

pub async fn run(args: BatchArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();

    let mut config = load_config(config_path)?;
    if let Some(jobs) = args.jobs {
        config.pipeline.concurrency = jobs;
    }

    let sources = collect_sources(&args.sources, args.list.as_deref())?;
    if sources.is_empty() {
        anyhow::bail!("No sources to process");
    }

    eprintln!(
        "{} Found {} documents to process",
        style("ℹ").blue(),
        sources.len()
    );

    let pipeline = Pipeline::new(config)?;

    let pb = ProgressBar::new(sources.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} documents")
            .unwrap()
            .progress_chars("=>-"),
    );

    let entries = pipeline
        .process_batch_with_progress(&sources, |_, entry| {
            if entry.is_error() {
                debug!("{} failed", entry.source);
            }
            pb.inc(1);
        })
        .await;

    pb.finish_and_clear();

    let output = if args.pretty {
        serde_json::to_string_pretty(&entries)?
    } else {
        serde_json::to_string(&entries)?
    };
    write_output(args.output.as_deref(), &output)?;

    if let Some(summary_path) = &args.summary {
        write_summary(summary_path, &entries)?;
        eprintln!(
            "{} Summary written to {}",
            style("✓").green(),
            summary_path.display()
        );
    }

    let failed: Vec<&BatchEntry> = entries.iter().filter(|e| e.is_error()).collect();

    eprintln!();
    eprintln!(
        "{} Processed {} documents in {:?}",
        style("✓").green(),
        entries.len(),
        start.elapsed()
    );
    eprintln!(
        "   {} successful, {} failed",
        style(entries.len() - failed.len()).green(),
        style(failed.len()).red()
    );

    if !failed.is_empty() {
        eprintln!();
        eprintln!("{}", style("Failed documents:").red());
        for entry in &failed {
            eprintln!(
                "  - {}: {}",
                entry.source,
                entry.error().unwrap_or("unknown error")
            );
        }
    }

    Ok(())
}

/// Build the ordered source list from arguments and an optional list file.
///
/// Glob patterns expand to their matches in sorted order. Everything else,
/// including URLs and paths that do not exist, passes through unchanged so
/// it shows up as an entry in the output.
pub fn collect_sources(args: &[String], list: Option<&Path>) -> anyhow::Result<Vec<String>> {
    let mut raw: Vec<String> = args.to_vec();

    if let Some(list) = list {
        let content = fs::read_to_string(list)
            .map_err(|e| anyhow::anyhow!("Failed to read source list {}: {}", list.display(), e))?;
        raw.extend(
            content
                .lines()
                .map(str::trim)
                .filter(|line| !line.is_empty() && !line.starts_with('#'))
                .map(String::from),
        );
    }

    let mut sources = Vec::with_capacity(raw.len());
    for source in raw {
        if !is_glob_pattern(&source) {
            sources.push(source);
            continue;
        }

        let mut matches: Vec<String> = glob(&source)?
            .filter_map(|r| r.ok())
            .filter(|p| p.is_file())
            .map(|p| p.to_string_lossy().into_owned())
            .collect();
        matches.sort();

        if matches.is_empty() {
            warn!("No files match pattern {}", source);
        }
        sources.extend(matches);
    }

    Ok(sources)
}

fn is_glob_pattern(source: &str) -> bool {
    !source.contains("://") && source.contains(['*', '?', '['])
}

fn write_summary(path: &Path, entries: &[BatchEntry]) -> anyhow::Result<()> {
    let mut wtr = csv::Writer::from_path(path)?;

    wtr.write_record(["source", "status", "form_type", "name", "ein", "error"])?;

    for entry in entries {
        let form_type = entry.form_type().map(|t| t.as_str()).unwrap_or("");

        if let Some(document) = entry.document() {
            let (name, ein) = match &document.data {
                ExtractionRecord::Form990(record) => (
                    record.organization_info.name.clone().unwrap_or_default(),
                    record.organization_info.ein.clone().unwrap_or_default(),
                ),
                ExtractionRecord::Form1023(_) => (String::new(), String::new()),
            };
            wtr.write_record([entry.source.as_str(), "success", form_type, &name, &ein, ""])?;
        } else {
            wtr.write_record([
                entry.source.as_str(),
                "error",
                form_type,
                "",
                "",
                entry.error().unwrap_or(""),
            ])?;
        }
    }

    wtr.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::tempdir;

    #[test]
    fn test_collect_sources_expands_globs_in_order() {
        let dir = tempdir().unwrap();
        for name in ["b.pdf", "a.pdf", "notes.txt"] {
            fs::write(dir.path().join(name), b"x").unwrap();
        }
        let pattern = dir.path().join("*.pdf").to_string_lossy().into_owned();

        let sources = collect_sources(
            &["https://example.org/990.pdf".to_string(), pattern],
            None,
        )
        .unwrap();

        assert_eq!(sources.len(), 3);
        assert_eq!(sources[0], "https://example.org/990.pdf");
        assert!(sources[1].ends_with("a.pdf"));
        assert!(sources[2].ends_with("b.pdf"));
    }

    #[test]
    fn test_collect_sources_reads_list_file() {
        let dir = tempdir().unwrap();
        let list = dir.path().join("sources.txt");
        fs::write(&list, "# filings\nfirst.pdf\n\n  second.pdf  \n").unwrap();

        let sources = collect_sources(&["zero.pdf".to_string()], Some(&list)).unwrap();
        assert_eq!(sources, vec!["zero.pdf", "first.pdf", "second.pdf"]);
    }

    #[test]
    fn test_urls_are_not_globs() {
        assert!(!is_glob_pattern("https://example.org/search?q=990"));
        assert!(is_glob_pattern("filings/*.pdf"));
        assert!(!is_glob_pattern("filings/990.pdf"));
    }
}
