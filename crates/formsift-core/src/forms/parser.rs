//! Layout-specific parsers assembling extraction records.

use tracing::{debug, info};

use super::rules::{
    FieldExtractor, NarrativeSection, extract_allocation_breakdown, extract_financials,
    extract_governance, extract_mission, extract_officers, extract_org_info, extract_programs,
    extract_schedule_o,
};
use super::{FormExtractor, Summarizer};
use crate::models::record::{
    ExtractionRecord, Form1023Record, Form990Record, FormType, Narrative,
};
use crate::text::NormalizedText;

/// Parser for IRS Form 990 information returns.
#[derive(Debug, Clone, Default)]
pub struct Form990Parser;

impl Form990Parser {
    pub fn new() -> Self {
        Self
    }

    pub fn parse(&self, text: &NormalizedText) -> Form990Record {
        info!("Parsing Form 990 from {} characters of text", text.len());

        let record = Form990Record {
            organization_info: extract_org_info(text),
            mission: extract_mission(text),
            programs: extract_programs(text),
            financials: extract_financials(text),
            governance: extract_governance(text),
            officers: extract_officers(text),
            schedule_o: extract_schedule_o(text),
        };

        debug!(
            "Form 990: name={:?}, ein={:?}, {} programs, {} officers",
            record.organization_info.name,
            record.organization_info.ein,
            record.programs.len(),
            record.officers.len()
        );

        record
    }
}

impl FormExtractor for Form990Parser {
    fn form_type(&self) -> FormType {
        FormType::Form990
    }

    fn extract(&self, text: &NormalizedText) -> ExtractionRecord {
        ExtractionRecord::Form990(self.parse(text))
    }
}

/// Parser for IRS Form 1023 exemption applications.
///
/// Produces the raw span and a bounded summary for every narrative section.
#[derive(Debug, Clone, Default)]
pub struct Form1023Parser {
    summarizer: Summarizer,
}

impl Form1023Parser {
    pub fn new(summarizer: Summarizer) -> Self {
        Self { summarizer }
    }

    fn narrative(&self, section: NarrativeSection, text: &str) -> Narrative {
        let raw = section.extract(text).unwrap_or_default();
        let summary = self.summarizer.summarize(&raw);
        Narrative { raw, summary }
    }

    pub fn parse(&self, text: &NormalizedText) -> Form1023Record {
        info!("Parsing Form 1023 from {} characters of text", text.len());

        let record = Form1023Record {
            mission_narrative: self.narrative(NarrativeSection::MissionNarrative, text),
            program_allocation: self.narrative(NarrativeSection::ProgramAllocation, text),
            program_allocation_breakdown: extract_allocation_breakdown(text),
            membership_model: self.narrative(NarrativeSection::MembershipModel, text),
            fiscal_sponsorship: self.narrative(NarrativeSection::FiscalSponsorship, text),
            conflict_policy: self.narrative(NarrativeSection::ConflictPolicy, text),
            compensation_policy: self.narrative(NarrativeSection::CompensationPolicy, text),
            governance_framework: self.narrative(NarrativeSection::GovernanceFramework, text),
            fiscal_controls: self.narrative(NarrativeSection::FiscalControls, text),
            irs_compliance: self.narrative(NarrativeSection::IrsCompliance, text),
        };

        let found = record.sections().iter().filter(|(_, n)| !n.is_empty()).count();
        debug!("Form 1023: {} of 9 narrative sections found", found);

        record
    }
}

impl FormExtractor for Form1023Parser {
    fn form_type(&self) -> FormType {
        FormType::Form1023
    }

    fn extract(&self, text: &NormalizedText) -> ExtractionRecord {
        ExtractionRecord::Form1023(self.parse(text))
    }
}
