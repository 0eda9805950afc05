//! Narrative section extraction for IRS Form 1023.
//!
//! Each section starts at a marker and runs up to (not including) the first
//! boundary marker after it. Membership model and governance framework keep
//! their closing marker in the span.

use indexmap::IndexMap;
use regex::Regex;

use super::patterns::{
    ALLOCATION_ENTRY, COMPENSATION_POLICY, CONFLICT_POLICY, FISCAL_CONTROLS, FISCAL_SPONSORSHIP,
    GOVERNANCE_FRAMEWORK, IRS_COMPLIANCE, MEMBERSHIP_MODEL, MISSION_NARRATIVE, PROGRAM_ALLOCATION,
};
use super::FieldExtractor;
use crate::text::title_case;

/// Narrative categories of a Form 1023 application.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NarrativeSection {
    MissionNarrative,
    ProgramAllocation,
    MembershipModel,
    FiscalSponsorship,
    ConflictPolicy,
    CompensationPolicy,
    GovernanceFramework,
    FiscalControls,
    IrsCompliance,
}

impl NarrativeSection {
    pub const ALL: [NarrativeSection; 9] = [
        Self::MissionNarrative,
        Self::ProgramAllocation,
        Self::MembershipModel,
        Self::FiscalSponsorship,
        Self::ConflictPolicy,
        Self::CompensationPolicy,
        Self::GovernanceFramework,
        Self::FiscalControls,
        Self::IrsCompliance,
    ];

    fn pattern(&self) -> &'static Regex {
        match self {
            Self::MissionNarrative => &MISSION_NARRATIVE,
            Self::ProgramAllocation => &PROGRAM_ALLOCATION,
            Self::MembershipModel => &MEMBERSHIP_MODEL,
            Self::FiscalSponsorship => &FISCAL_SPONSORSHIP,
            Self::ConflictPolicy => &CONFLICT_POLICY,
            Self::CompensationPolicy => &COMPENSATION_POLICY,
            Self::GovernanceFramework => &GOVERNANCE_FRAMEWORK,
            Self::FiscalControls => &FISCAL_CONTROLS,
            Self::IrsCompliance => &IRS_COMPLIANCE,
        }
    }

    /// Raw span of this section, empty when the markers are not found.
    pub fn extract_raw(&self, text: &str) -> String {
        self.extract(text).unwrap_or_default()
    }
}

impl FieldExtractor for NarrativeSection {
    type Output = String;

    fn extract(&self, text: &str) -> Option<String> {
        let caps = self.pattern().captures(text)?;
        caps.name("span")
            .or_else(|| caps.name("range"))
            .map(|m| m.as_str().trim().to_string())
            .filter(|s| !s.is_empty())
    }

    fn extract_all(&self, text: &str) -> Vec<String> {
        self.pattern()
            .captures_iter(text)
            .filter_map(|caps| caps.name("span").or_else(|| caps.name("range")))
            .map(|m| m.as_str().trim().to_string())
            .filter(|s| !s.is_empty())
            .collect()
    }
}

/// Program name to allocation percentage.
///
/// A program named more than once keeps its first position and its last
/// percentage.
pub fn extract_allocation_breakdown(text: &str) -> IndexMap<String, String> {
    let mut breakdown = IndexMap::new();
    for caps in ALLOCATION_ENTRY.captures_iter(text) {
        breakdown.insert(title_case(&caps[1]), caps[2].to_string());
    }
    breakdown
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const APPLICATION: &str = "FORM 1023 PART IV NARRATIVE DESCRIPTION OF ACTIVITIES THE \
        ORGANIZATION PUBLISHES LOCAL NEWS. NEWSROOM OPERATIONS 60% WRITING SEMINARS 25% \
        PUBLIC FORUMS 15% FISCAL SPONSORSHIP AGREEMENT THE SPONSOR HOLDS FUNDS. \
        CONFLICT OF INTEREST POLICY DIRECTORS DISCLOSE INTERESTS. BYLAWS ARTICLE I NAME \
        ARTICLE VIII AMENDMENTS. SUPPORTER TIERS $25 $100 $500+ FINANCIAL PROCEDURES \
        TWO SIGNATURES ARE REQUIRED. COMPLIANCE NO POLITICAL ACTIVITY IS PERMITTED";

    #[test]
    fn test_mission_narrative_stops_before_boundary() {
        assert_eq!(
            NarrativeSection::MissionNarrative.extract_raw(APPLICATION),
            "NARRATIVE DESCRIPTION OF ACTIVITIES THE ORGANIZATION PUBLISHES LOCAL NEWS. \
             NEWSROOM OPERATIONS 60% WRITING SEMINARS 25% PUBLIC FORUMS 15%"
        );
    }

    #[test]
    fn test_program_allocation_starts_at_percentage() {
        assert_eq!(
            NarrativeSection::ProgramAllocation.extract_raw(APPLICATION),
            "60% WRITING SEMINARS 25% PUBLIC FORUMS 15%"
        );
    }

    #[test]
    fn test_membership_model_includes_closing_marker() {
        assert_eq!(
            NarrativeSection::MembershipModel.extract_raw(APPLICATION),
            "SUPPORTER TIERS $25 $100 $500+"
        );
    }

    #[test]
    fn test_policy_sections() {
        assert_eq!(
            NarrativeSection::FiscalSponsorship.extract_raw(APPLICATION),
            "FISCAL SPONSORSHIP AGREEMENT THE SPONSOR HOLDS FUNDS."
        );
        assert_eq!(
            NarrativeSection::ConflictPolicy.extract_raw(APPLICATION),
            "CONFLICT OF INTEREST POLICY DIRECTORS DISCLOSE INTERESTS."
        );
        assert_eq!(
            NarrativeSection::GovernanceFramework.extract_raw(APPLICATION),
            "BYLAWS ARTICLE I NAME ARTICLE VIII"
        );
        assert_eq!(
            NarrativeSection::FiscalControls.extract_raw(APPLICATION),
            "FINANCIAL PROCEDURES TWO SIGNATURES ARE REQUIRED."
        );
    }

    #[test]
    fn test_irs_compliance_runs_to_end_of_text() {
        assert_eq!(
            NarrativeSection::IrsCompliance.extract_raw(APPLICATION),
            "NO POLITICAL ACTIVITY IS PERMITTED"
        );
        assert_eq!(
            NarrativeSection::IrsCompliance.extract_raw("EXEMPT UNDER 501(C)(3) OF THE CODE"),
            "501(C)(3)"
        );
    }

    #[test]
    fn test_compensation_alternatives() {
        assert_eq!(
            NarrativeSection::CompensationPolicy.extract_raw("NO COMPENSATION IS PAID"),
            "COMPENSATION"
        );
        assert_eq!(
            NarrativeSection::CompensationPolicy.extract_raw(
                "SECTION 4.12 OFFICERS SERVE UNPAID. SECTION 6.14 REVIEW. ARTICLE VII"
            ),
            "SECTION 4.12 OFFICERS SERVE UNPAID. SECTION 6.14 REVIEW."
        );
        assert_eq!(NarrativeSection::CompensationPolicy.extract_raw(APPLICATION), "");
    }

    #[test]
    fn test_missing_sections_are_empty() {
        for section in NarrativeSection::ALL {
            assert_eq!(section.extract_raw("UNRELATED TEXT"), "", "{section:?}");
        }
    }

    #[test]
    fn test_allocation_breakdown() {
        let breakdown = extract_allocation_breakdown(APPLICATION);
        let entries: Vec<(&str, &str)> = breakdown
            .iter()
            .map(|(k, v)| (k.as_str(), v.as_str()))
            .collect();
        assert_eq!(
            entries,
            vec![("Newsroom", "60%"), ("Writing Seminars", "25%"), ("Public Forums", "15%")]
        );
    }

    #[test]
    fn test_allocation_breakdown_repeated_program() {
        let breakdown = extract_allocation_breakdown("NEWSROOM 50% PUBLIC FORUMS 10 % NEWSROOM 40%");
        assert_eq!(breakdown.len(), 2);
        assert_eq!(breakdown.get_index(0).map(|(k, v)| (k.as_str(), v.as_str())), Some(("Newsroom", "40%")));
        assert_eq!(breakdown["Public Forums"], "10 %");
    }
}
