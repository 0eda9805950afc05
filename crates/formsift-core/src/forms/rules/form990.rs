//! Field extraction for IRS Form 990.
//!
//! Every field is an independent search over normalized text. A field that
//! cannot be found comes back empty; nothing here fails.

use tracing::trace;

use super::patterns::{
    EIN, GOVERNANCE_ROLE, MISSION, NET_ASSETS, OFFICER, ORG_NAME, PROGRAM_EXPENSES, PROGRAM_NAME, SCHEDULE_O,
    TOTAL_EXPENSES, TOTAL_REVENUE, WEBSITE,
};
use super::{FieldExtractor, all_captures, first_capture};
use crate::models::record::{Financials, Officer, OrganizationInfo, Program};
use crate::text::title_case;

/// Name, EIN and website of the filing organization.
pub fn extract_org_info(text: &str) -> OrganizationInfo {
    OrganizationInfo {
        name: extract_org_name(text),
        ein: first_capture(&EIN, text, 1),
        website: WEBSITE.find(text).map(|m| m.as_str().to_lowercase()),
    }
}

/// Organization name, title-cased.
///
/// A single letter before the next field label is a box label unless the
/// name would otherwise be one word (`PLAN B`).
fn extract_org_name(text: &str) -> Option<String> {
    let caps = ORG_NAME.captures(text)?;
    let mut name = caps.get(1)?.as_str().trim().to_string();
    if let Some(letter) = caps.get(2) {
        if !name.contains(' ') {
            name.push(' ');
            name.push_str(letter.as_str());
        }
    }
    Some(title_case(&name)).filter(|n| !n.is_empty())
}

/// Mission statement between the `MISSION` label and the next section marker.
pub fn extract_mission(text: &str) -> String {
    first_capture(&MISSION, text, 1)
        .map(|mission| title_case(&mission))
        .unwrap_or_default()
}

/// Program names paired with expense amounts by position.
///
/// Names and amounts are found by two separate searches. When the counts
/// differ the pairing stops at the shorter list and the surplus is dropped.
pub fn extract_programs(text: &str) -> Vec<Program> {
    let names = all_captures(&PROGRAM_NAME, text, 1);
    let expenses = all_captures(&PROGRAM_EXPENSES, text, 1);

    if names.len() != expenses.len() {
        trace!(
            "Program names ({}) and expense amounts ({}) differ, pairing the first {}",
            names.len(),
            expenses.len(),
            names.len().min(expenses.len())
        );
    }

    names
        .into_iter()
        .zip(expenses)
        .map(|(name, expenses)| Program {
            name: title_case(&name),
            expenses,
        })
        .collect()
}

/// Total revenue, total expenses and net assets.
pub fn extract_financials(text: &str) -> Financials {
    Financials {
        total_revenue: first_capture(&TOTAL_REVENUE, text, 1).unwrap_or_default(),
        total_expenses: first_capture(&TOTAL_EXPENSES, text, 1).unwrap_or_default(),
        net_assets: first_capture(&NET_ASSETS, text, 1).unwrap_or_default(),
    }
}

/// Officer entry extractor.
pub struct OfficerExtractor;

impl FieldExtractor for OfficerExtractor {
    type Output = Officer;

    fn extract(&self, text: &str) -> Option<Officer> {
        self.extract_all(text).into_iter().next()
    }

    fn extract_all(&self, text: &str) -> Vec<Officer> {
        OFFICER
            .captures_iter(text)
            .map(|caps| Officer {
                role: title_case(&caps[1]),
                compensation: caps
                    .get(2)
                    .map(|m| m.as_str().to_string())
                    .filter(|s| !s.is_empty()),
            })
            .collect()
    }
}

/// Role titles with their compensation figures, in document order.
pub fn extract_officers(text: &str) -> Vec<Officer> {
    OfficerExtractor.extract_all(text)
}

/// Role titles only, in document order, duplicates kept.
pub fn extract_governance(text: &str) -> Vec<String> {
    all_captures(&GOVERNANCE_ROLE, text, 1)
        .iter()
        .map(|role| title_case(role))
        .collect()
}

/// Schedule O text up to the next schedule heading.
pub fn extract_schedule_o(text: &str) -> String {
    first_capture(&SCHEDULE_O, text, 1).unwrap_or_default()
}
