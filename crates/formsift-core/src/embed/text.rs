//! Selecting the record fields that are meant for embedding.

use serde::Serialize;

use crate::models::record::{ExtractionRecord, Form1023Record, Form990Record};

/// A labelled piece of text ready to send to an embedding model.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EmbeddingInput {
    /// Record field the text came from.
    pub label: String,
    pub text: String,
}

impl EmbeddingInput {
    fn new(label: &str, text: impl Into<String>) -> Self {
        Self {
            label: label.to_string(),
            text: text.into(),
        }
    }
}

/// Texts to embed for a record, skipping empty fields.
///
/// Form 1023 contributes its bounded summaries rather than raw spans. Each
/// text is cut to `max_chars` characters (0 = unlimited).
pub fn embedding_inputs(record: &ExtractionRecord, max_chars: usize) -> Vec<EmbeddingInput> {
    let inputs = match record {
        ExtractionRecord::Form990(record) => form990_inputs(record),
        ExtractionRecord::Form1023(record) => form1023_inputs(record),
    };
    inputs
        .into_iter()
        .filter(|i| !i.text.trim().is_empty())
        .map(|mut input| {
            truncate_chars(&mut input.text, max_chars);
            input
        })
        .collect()
}

/// Cut `text` to at most `max_chars` characters on a char boundary.
fn truncate_chars(text: &mut String, max_chars: usize) {
    if max_chars == 0 {
        return;
    }
    if let Some((end, _)) = text.char_indices().nth(max_chars) {
        text.truncate(end);
    }
}

fn form990_inputs(record: &Form990Record) -> Vec<EmbeddingInput> {
    let programs = record
        .programs
        .iter()
        .map(|p| format!("{}: {}", p.name, p.expenses))
        .collect::<Vec<_>>()
        .join("; ");

    vec![
        EmbeddingInput::new("mission", record.mission.clone()),
        EmbeddingInput::new("programs", programs),
        EmbeddingInput::new("schedule_o", record.schedule_o.clone()),
    ]
}

fn form1023_inputs(record: &Form1023Record) -> Vec<EmbeddingInput> {
    let mut inputs: Vec<EmbeddingInput> = record
        .sections()
        .iter()
        .map(|(name, narrative)| EmbeddingInput::new(name, narrative.summary.clone()))
        .collect();

    let breakdown = record
        .program_allocation_breakdown
        .iter()
        .map(|(program, pct)| format!("{program}: {pct}"))
        .collect::<Vec<_>>()
        .join("; ");
    inputs.push(EmbeddingInput::new("program_allocation_breakdown", breakdown));

    inputs
}
