//! Extraction records for IRS Form 990 and Form 1023 filings.

use std::fmt;

use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Layout a document follows, decided from its first page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FormType {
    /// IRS Form 990 (annual information return).
    #[serde(rename = "990")]
    Form990,
    /// IRS Form 1023 (application for exemption).
    #[serde(rename = "1023")]
    Form1023,
    /// Any other layout.
    #[serde(rename = "generic")]
    Generic,
}

impl FormType {
    /// Short tag used in output records.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Form990 => "990",
            Self::Form1023 => "1023",
            Self::Generic => "generic",
        }
    }
}

impl fmt::Display for FormType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Structured data pulled out of one document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ExtractionRecord {
    Form990(Form990Record),
    Form1023(Form1023Record),
}

impl ExtractionRecord {
    /// Form type this record was extracted as.
    pub fn form_type(&self) -> FormType {
        match self {
            Self::Form990(_) => FormType::Form990,
            Self::Form1023(_) => FormType::Form1023,
        }
    }
}

/// Fields extracted from a Form 990.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Form990Record {
    /// Organization identity.
    pub organization_info: OrganizationInfo,

    /// Mission statement, title-cased.
    pub mission: String,

    /// Program service accomplishments paired with their expenses.
    pub programs: Vec<Program>,

    /// Headline financial figures.
    pub financials: Financials,

    /// Role titles found in the officer/director listing, in document order.
    pub governance: Vec<String>,

    /// Roles together with any compensation figure captured next to them.
    pub officers: Vec<Officer>,

    /// Supplemental information (Schedule O).
    pub schedule_o: String,
}

/// Organization identity block of a Form 990.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrganizationInfo {
    /// Legal name, title-cased.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Employer identification number (NN-NNNNNNN).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ein: Option<String>,

    /// Website, lower-cased.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
}

impl OrganizationInfo {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.ein.is_none() && self.website.is_none()
    }
}

/// A program service and its reported expenses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Program {
    #[serde(rename = "program")]
    pub name: String,
    pub expenses: String,
}

/// Financial totals as they appear in the filing (digits and commas).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Financials {
    pub total_revenue: String,
    pub total_expenses: String,
    pub net_assets: String,
}

/// An officer, director, trustee or key employee entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Officer {
    /// Role title, title-cased.
    pub role: String,

    /// Compensation figure as printed, if one followed the role.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub compensation: Option<String>,
}

/// A narrative block: the matched text and its bounded preview.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Narrative {
    pub raw: String,
    pub summary: String,
}

impl Narrative {
    pub fn is_empty(&self) -> bool {
        self.raw.is_empty()
    }
}

/// Narrative sections extracted from a Form 1023.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Form1023Record {
    pub mission_narrative: Narrative,
    pub program_allocation: Narrative,
    /// Program name to allocation percentage, in first-seen order.
    pub program_allocation_breakdown: IndexMap<String, String>,
    pub membership_model: Narrative,
    pub fiscal_sponsorship: Narrative,
    pub conflict_policy: Narrative,
    pub compensation_policy: Narrative,
    pub governance_framework: Narrative,
    pub fiscal_controls: Narrative,
    pub irs_compliance: Narrative,
}

impl Form1023Record {
    /// All narrative sections with their output names, in record order.
    pub fn sections(&self) -> [(&'static str, &Narrative); 9] {
        [
            ("mission_narrative", &self.mission_narrative),
            ("program_allocation", &self.program_allocation),
            ("membership_model", &self.membership_model),
            ("fiscal_sponsorship", &self.fiscal_sponsorship),
            ("conflict_policy", &self.conflict_policy),
            ("compensation_policy", &self.compensation_policy),
            ("governance_framework", &self.governance_framework),
            ("fiscal_controls", &self.fiscal_controls),
            ("irs_compliance", &self.irs_compliance),
        ]
    }
}

/// A successfully extracted document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProcessedDocument {
    pub form_type: FormType,
    pub data: ExtractionRecord,
    pub processed_at: DateTime<Utc>,
}

/// One entry of a batch result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchEntry {
    /// Source identifier exactly as given.
    pub source: String,

    #[serde(flatten)]
    pub outcome: EntryOutcome,
}

/// Outcome of processing a single batch entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum EntryOutcome {
    Extracted(ProcessedDocument),
    Failed {
        #[serde(skip_serializing_if = "Option::is_none")]
        form_type: Option<FormType>,
        error: String,
    },
}

impl BatchEntry {
    pub fn is_error(&self) -> bool {
        matches!(self.outcome, EntryOutcome::Failed { .. })
    }

    pub fn document(&self) -> Option<&ProcessedDocument> {
        match &self.outcome {
            EntryOutcome::Extracted(doc) => Some(doc),
            EntryOutcome::Failed { .. } => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match &self.outcome {
            EntryOutcome::Failed { error, .. } => Some(error),
            EntryOutcome::Extracted(_) => None,
        }
    }

    pub fn form_type(&self) -> Option<FormType> {
        match &self.outcome {
            EntryOutcome::Extracted(doc) => Some(doc.form_type),
            EntryOutcome::Failed { form_type, .. } => *form_type,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_form_type_tags() {
        assert_eq!(serde_json::to_string(&FormType::Form990).unwrap(), "\"990\"");
        assert_eq!(serde_json::to_string(&FormType::Generic).unwrap(), "\"generic\"");
        assert_eq!(FormType::Form1023.to_string(), "1023");
    }

    #[test]
    fn test_org_info_skips_absent_fields() {
        let info = OrganizationInfo {
            name: Some("Acme Foundation".to_string()),
            ein: None,
            website: None,
        };
        let json = serde_json::to_value(&info).unwrap();
        assert_eq!(json, serde_json::json!({ "name": "Acme Foundation" }));
    }

    #[test]
    fn test_failed_entry_shape() {
        let entry = BatchEntry {
            source: "https://example.org/a.pdf".to_string(),
            outcome: EntryOutcome::Failed {
                form_type: None,
                error: "fetch error: timed out after 30s".to_string(),
            },
        };
        let json = serde_json::to_value(&entry).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "source": "https://example.org/a.pdf",
                "error": "fetch error: timed out after 30s"
            })
        );
        assert!(entry.is_error());
        assert_eq!(entry.form_type(), None);
    }

    #[test]
    fn test_program_serializes_with_program_key() {
        let program = Program {
            name: "Youth Literacy".to_string(),
            expenses: "120,000".to_string(),
        };
        let json = serde_json::to_value(&program).unwrap();
        assert_eq!(json["program"], "Youth Literacy");
        assert_eq!(json["expenses"], "120,000");
    }
}
