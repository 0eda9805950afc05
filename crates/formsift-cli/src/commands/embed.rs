//! Embed command - extract a document and embed its narrative fields.

use std::path::PathBuf;

use clap::Args;
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use serde::Serialize;
use tracing::info;

use formsift_core::{Embedding, EmbeddingClient, Pipeline, embedding_inputs};

use super::{load_config, write_output};

/// Arguments for the embed command.
#[derive(Args)]
pub struct EmbedArgs {
    /// Source document: local path, file:// URL or http(s) URL
    #[arg(required = true)]
    source: String,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Model id (overrides config)
    #[arg(short, long)]
    model: Option<String>,

    /// Only print the texts that would be embedded
    #[arg(long)]
    dry_run: bool,
}

#[derive(Serialize)]
struct EmbeddedField {
    label: String,
    text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    dimension: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    embedding: Option<Embedding>,
}

pub async fn run(args: EmbedArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let mut config = load_config(config_path)?;
    if let Some(model) = args.model {
        config.embedding.model = model;
    }

    let embedding_config = config.embedding.clone();
    let pipeline = Pipeline::new(config)?;
    let document = pipeline.process_source(&args.source).await?;

    let inputs = embedding_inputs(&document.data, embedding_config.max_chars);
    if inputs.is_empty() {
        anyhow::bail!("No embeddable text found in {}", args.source);
    }
    info!("Embedding {} fields from {}", inputs.len(), args.source);

    let mut fields = Vec::with_capacity(inputs.len());

    if args.dry_run {
        for input in inputs {
            fields.push(EmbeddedField {
                label: input.label,
                text: input.text,
                dimension: None,
                embedding: None,
            });
        }
    } else {
        let client = EmbeddingClient::new(&embedding_config)?;

        let pb = ProgressBar::new(inputs.len() as u64);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} [{elapsed_precise}] {bar:40.cyan/blue} {msg}")
                .unwrap()
                .progress_chars("##-"),
        );

        for input in inputs {
            pb.set_message(input.label.clone());
            let embedding = client.embed(&input.text).await?;
            fields.push(EmbeddedField {
                dimension: Some(embedding.dimension()),
                embedding: Some(embedding),
                label: input.label,
                text: input.text,
            });
            pb.inc(1);
        }

        pb.finish_and_clear();
        eprintln!(
            "{} Embedded {} fields with {}",
            style("✓").green(),
            fields.len(),
            embedding_config.model
        );
    }

    write_output(args.output.as_deref(), &serde_json::to_string_pretty(&fields)?)?;
    Ok(())
}
