//! Regex patterns for IRS form extraction.
//!
//! All patterns run against normalized text: upper-case, one line, single
//! spaces. Boundary markers that the layouts use as "section ends here" are
//! matched as a trailing group; callers take the span before that group.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    // Classification markers
    pub static ref FORM_990_MARKER: Regex = Regex::new(r"FORM 990").unwrap();
    pub static ref FORM_1023_MARKER: Regex = Regex::new(r"FORM 1023").unwrap();

    // Form 990: organization identity. Group 2 is a trailing single letter,
    // either a form box label or the last word of the name.
    pub static ref ORG_NAME: Regex = Regex::new(
        r"NAME OF ORGANIZATION\s+([A-Z0-9 ,.&'-]+?)(?:(?:\s+([A-Z]))?\s+(?:EMPLOYER IDENTIFICATION NUMBER|DOING BUSINESS AS|NUMBER AND STREET)|[^A-Z0-9 ,.&'-]|$)"
    ).unwrap();

    pub static ref EIN: Regex = Regex::new(
        r"EMPLOYER IDENTIFICATION NUMBER\s+(\d{2}-\d{7})"
    ).unwrap();

    pub static ref WEBSITE: Regex = Regex::new(r"WWW\.[A-Z0-9.-]+").unwrap();

    // Form 990: mission
    pub static ref MISSION: Regex = Regex::new(
        r"MISSION:? ?([A-Z ,.'-]+?)(?:PROGRAM SERVICE|PART III|CHECKLIST)"
    ).unwrap();

    // Form 990: program service accomplishments
    pub static ref PROGRAM_NAME: Regex = Regex::new(
        r"PROGRAM\s+\d+\s*[-:]\s*([A-Z0-9 ,.'-]+?)\s+\(?EXPENSES"
    ).unwrap();

    pub static ref PROGRAM_EXPENSES: Regex = Regex::new(
        r"EXPENSES\s*\$?\s*([\d,]+)"
    ).unwrap();

    // Form 990: financial totals, amount terminated by a period
    pub static ref TOTAL_REVENUE: Regex = Regex::new(r"TOTAL REVENUE.*?([\d,]+)\.").unwrap();
    pub static ref TOTAL_EXPENSES: Regex = Regex::new(r"TOTAL EXPENSES.*?([\d,]+)\.").unwrap();
    pub static ref NET_ASSETS: Regex = Regex::new(r"NET ASSETS.*?([\d,]+)\.").unwrap();

    // Form 990: officers, directors, trustees, key employees
    pub static ref GOVERNANCE_ROLE: Regex = Regex::new(
        r"(TRUSTEE|EMPLOYEE|DIRECTOR|CHAIRMAN|CEO|CFO)[A-Z ,.'-]+?\s+(\d{1,3},?\d{0,3})?\s*0?\s*\d{0,3}"
    ).unwrap();

    // Same roles, with the whole compensation figure (grouped or plain digits)
    pub static ref OFFICER: Regex = Regex::new(
        r"(TRUSTEE|EMPLOYEE|DIRECTOR|CHAIRMAN|CEO|CFO)[A-Z ,.'-]+?\s+(\d{1,3}(?:,\d{3})+|\d+)?"
    ).unwrap();

    // Form 990: supplemental information
    pub static ref SCHEDULE_O: Regex = Regex::new(r"SCHEDULE O(.*?)SCHEDULE [A-Z]").unwrap();

    // Form 1023: narrative sections
    pub static ref MISSION_NARRATIVE: Regex = Regex::new(
        r"(?P<span>(?:NARRATIVE DESCRIPTION OF ACTIVITIES|PART VI).*?)(?:PART V|FISCAL SPONSORSHIP|CONFLICT)"
    ).unwrap();

    pub static ref PROGRAM_ALLOCATION: Regex = Regex::new(
        r"(?P<span>(?:60 ?%|25 ?%|15 ?%).*?)(?:FISCAL SPONSORSHIP|CONFLICT)"
    ).unwrap();

    pub static ref MEMBERSHIP_MODEL: Regex = Regex::new(
        r"(?P<span>SUPPORTER.*?\$?500\+)"
    ).unwrap();

    pub static ref FISCAL_SPONSORSHIP: Regex = Regex::new(
        r"(?P<span>FISCAL SPONSORSHIP AGREEMENT.*?)(?:CONFLICT|BYLAWS|ARTICLE)"
    ).unwrap();

    pub static ref CONFLICT_POLICY: Regex = Regex::new(
        r"(?P<span>CONFLICTS? OF INTEREST POLICY.*?)(?:BYLAWS|FISCAL SPONSORSHIP|ARTICLE)"
    ).unwrap();

    // Either the bare keyword or the bylaw section range, whichever comes first.
    pub static ref COMPENSATION_POLICY: Regex = Regex::new(
        r"(?P<span>COMPENSATION)|(?P<range>SECTION 4\.12.*?SECTION 6\.14.*?)(?:ARTICLE|FISCAL)"
    ).unwrap();

    pub static ref GOVERNANCE_FRAMEWORK: Regex = Regex::new(
        r"(?P<span>BYLAWS.*?(?:ARTICLE VIII|FISCAL YEAR))"
    ).unwrap();

    pub static ref FISCAL_CONTROLS: Regex = Regex::new(
        r"(?P<span>(?:FINANCIAL PROCEDURES|REPORTING).*?)(?:ARTICLE|FISCAL YEAR|COMPLIANCE)"
    ).unwrap();

    pub static ref IRS_COMPLIANCE: Regex = Regex::new(
        r"(?P<span>501\(C\)\(3\))|(?P<range>NO POLITICAL ACTIVITY.*?)(?:END|$)"
    ).unwrap();

    // Form 1023: percentage allocation per program
    pub static ref ALLOCATION_ENTRY: Regex = Regex::new(
        r"(NEWSROOM|WRITING SEMINARS|PUBLIC FORUMS).*?(\d{1,2} ?%)"
    ).unwrap();
}
