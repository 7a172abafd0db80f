//! Document-level metadata extraction.
//!
//! A small fixed set of single-shot pattern tests applied to the full raw
//! text (not the line-split form). Each test is independent and optional:
//! no match leaves the field `None`, which is never an error.

use std::sync::LazyLock;

use chrono::NaiveDate;
use regex::Regex;

use crate::error::LabParseError;
use crate::models::LabDocumentMetadata;

/// Known vendor signatures: detection pattern paired with the canonical
/// display name stored downstream.
static VENDOR_SIGNATURES: LazyLock<Vec<(Regex, &'static str)>> = LazyLock::new(|| {
    vec![
        (
            Regex::new(r"(?i)quest\s*diagnostics").unwrap(),
            "Quest Diagnostics",
        ),
        (
            Regex::new(r"(?i)labcorp|laboratory\s+corporation").unwrap(),
            "Labcorp",
        ),
    ]
});

/// Collection-date label variants, in priority order. First match wins.
/// The date is captured verbatim (MM/DD/YYYY); conversion to ISO happens
/// caller-side via [`test_date_to_iso`].
static COLLECTION_DATE_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    vec![
        Regex::new(r"(?i)Collected[:\s]+(\d{2}/\d{2}/\d{4})").unwrap(),
        Regex::new(r"(?i)Specimen\s+Collected[:\s]+(\d{2}/\d{2}/\d{4})").unwrap(),
        Regex::new(r"(?i)Date\s+Collected[:\s]+(\d{2}/\d{2}/\d{4})").unwrap(),
        Regex::new(r"(?i)Report\s+Date[:\s]+(\d{2}/\d{2}/\d{4})").unwrap(),
    ]
});

/// Patient name layouts ("Last, First"), in priority order.
static PATIENT_NAME_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    vec![
        Regex::new(r"(?i)Patient[:\s]+([A-Z][A-Za-z]+,\s*[A-Z][A-Za-z]+)").unwrap(),
        Regex::new(r"(?i)Name[:\s]+([A-Z][A-Za-z]+,\s*[A-Z][A-Za-z]+)").unwrap(),
        Regex::new(r"(?i)([A-Z][A-Za-z]+,\s*[A-Z][A-Za-z]+)\s+DOB").unwrap(),
    ]
});

/// Date-of-birth layouts, in priority order.
static PATIENT_DOB_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    vec![
        Regex::new(r"(?i)DOB[:\s]+(\d{2}/\d{2}/\d{4})").unwrap(),
        Regex::new(r"(?i)Date\s+of\s+Birth[:\s]+(\d{2}/\d{2}/\d{4})").unwrap(),
        Regex::new(r"(?i)(\d{2}/\d{2}/\d{4})\s+(?:Sex|Gender|Male|Female)").unwrap(),
    ]
});

/// Scan the full text for vendor signature, collection date, and the
/// optional patient identity block. Runs once per document.
pub fn extract_metadata(raw_text: &str) -> LabDocumentMetadata {
    LabDocumentMetadata {
        patient_name: first_capture(&PATIENT_NAME_PATTERNS, raw_text).map(|s| s.trim().to_string()),
        patient_dob: first_capture(&PATIENT_DOB_PATTERNS, raw_text),
        test_date: first_capture(&COLLECTION_DATE_PATTERNS, raw_text),
        lab_name: VENDOR_SIGNATURES
            .iter()
            .find(|(pattern, _)| pattern.is_match(raw_text))
            .map(|(_, canonical)| (*canonical).to_string()),
    }
}

fn first_capture(patterns: &[Regex], text: &str) -> Option<String> {
    patterns
        .iter()
        .find_map(|p| p.captures(text))
        .map(|caps| caps[1].to_string())
}

/// Convert a verbatim `testDate` (MM/DD/YYYY) to ISO 8601 (YYYY-MM-DD).
///
/// Caller-side helper for the persistence step; the engine itself never
/// rewrites the captured date.
pub fn test_date_to_iso(test_date: &str) -> Result<String, LabParseError> {
    NaiveDate::parse_from_str(test_date.trim(), "%m/%d/%Y")
        .map(|d| d.format("%Y-%m-%d").to_string())
        .map_err(|_| LabParseError::InvalidDate(test_date.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detects_quest_signature() {
        let meta = extract_metadata("QUEST DIAGNOSTICS INCORPORATED\nGLUCOSE 88");
        assert_eq!(meta.lab_name.as_deref(), Some("Quest Diagnostics"));
    }

    #[test]
    fn detects_labcorp_signature() {
        let meta = extract_metadata("Laboratory Corporation of America\n");
        assert_eq!(meta.lab_name.as_deref(), Some("Labcorp"));
    }

    #[test]
    fn captures_collection_date_verbatim() {
        let meta = extract_metadata("Collected: 11/02/2025 09:41 ET");
        assert_eq!(meta.test_date.as_deref(), Some("11/02/2025"));
    }

    #[test]
    fn falls_back_to_report_date_label() {
        let meta = extract_metadata("Report Date: 01/15/2025");
        assert_eq!(meta.test_date.as_deref(), Some("01/15/2025"));
    }

    #[test]
    fn captures_patient_block() {
        let meta = extract_metadata("Patient: DOE, JOHN   DOB: 03/14/1985  Sex: Male");
        assert_eq!(meta.patient_name.as_deref(), Some("DOE, JOHN"));
        assert_eq!(meta.patient_dob.as_deref(), Some("03/14/1985"));
    }

    #[test]
    fn absent_fields_stay_unset() {
        let meta = extract_metadata("SOME UNRELATED FOOTER TEXT 2024");
        assert!(meta.lab_name.is_none());
        assert!(meta.test_date.is_none());
        assert!(meta.patient_name.is_none());
        assert!(meta.patient_dob.is_none());
    }

    #[test]
    fn test_date_converts_to_iso() {
        assert_eq!(test_date_to_iso("11/02/2025").unwrap(), "2025-11-02");
        assert_eq!(test_date_to_iso(" 03/14/1985 ").unwrap(), "1985-03-14");
    }

    #[test]
    fn invalid_test_date_is_rejected() {
        assert!(matches!(
            test_date_to_iso("2025-11-02"),
            Err(LabParseError::InvalidDate(_))
        ));
        assert!(test_date_to_iso("not a date").is_err());
    }
}
