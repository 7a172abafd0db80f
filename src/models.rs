//! Result types returned by the extraction engine.
//!
//! Field names serialize to the camelCase JSON shape the consuming platform
//! stores and renders (`biomarker`, `referenceRange`, `testDate`, ...).

use serde::{Deserialize, Serialize};

/// Coarse abnormality classification for one observation.
///
/// The engine currently emits `Normal` for every observation: the H/L flag
/// letters printed on report lines are tolerated by the capture patterns but
/// are not mapped to a status (see DESIGN.md, open questions). Treat this
/// field as a placeholder, not a clinical signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BiomarkerStatus {
    Normal,
    High,
    Low,
    Critical,
}

impl BiomarkerStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Normal => "normal",
            Self::High => "high",
            Self::Low => "low",
            Self::Critical => "critical",
        }
    }
}

/// One measured analyte pulled off a report line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BiomarkerObservation {
    /// Canonical label from the rule table (e.g. "Testosterone Total"),
    /// never free text from the report.
    #[serde(rename = "biomarker")]
    pub name: String,
    /// Parsed magnitude. Integer-valued labs (cell counts) parse to a whole
    /// float; no rounding or unit conversion is applied.
    pub value: f64,
    /// Unit of measure as printed on the source line, verbatim.
    pub unit: String,
    /// Printed normal range, normalized to "A-B", "<=B"/"<B" or ">=B"/">B".
    /// Empty for layouts that print no range next to the value.
    pub reference_range: String,
    pub status: BiomarkerStatus,
}

/// Document-level facts extracted independently of any biomarker.
///
/// Every field is optional: a report with no recognizable vendor signature,
/// no collection-date label, or no patient block is still a valid document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LabDocumentMetadata {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub patient_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub patient_dob: Option<String>,
    /// Specimen collection date in the literal form the report prints
    /// (MM/DD/YYYY). Callers convert to ISO via [`crate::test_date_to_iso`]
    /// before persistence; the engine never normalizes it.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub test_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lab_name: Option<String>,
}

/// The engine's sole output: metadata plus observations in order of first
/// match in the source text. Within one result, observation names are unique.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ParsedLabResult {
    #[serde(flatten)]
    pub metadata: LabDocumentMetadata,
    pub biomarkers: Vec<BiomarkerObservation>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_serializes_lowercase() {
        for (status, s) in [
            (BiomarkerStatus::Normal, "normal"),
            (BiomarkerStatus::High, "high"),
            (BiomarkerStatus::Low, "low"),
            (BiomarkerStatus::Critical, "critical"),
        ] {
            assert_eq!(status.as_str(), s);
            assert_eq!(serde_json::to_string(&status).unwrap(), format!("\"{s}\""));
        }
    }

    #[test]
    fn observation_uses_platform_field_names() {
        let obs = BiomarkerObservation {
            name: "TSH".into(),
            value: 1.8,
            unit: "mIU/L".into(),
            reference_range: "0.5-2.5".into(),
            status: BiomarkerStatus::Normal,
        };
        let json = serde_json::to_value(&obs).unwrap();
        assert_eq!(json["biomarker"], "TSH");
        assert_eq!(json["referenceRange"], "0.5-2.5");
        assert_eq!(json["status"], "normal");
    }

    #[test]
    fn absent_metadata_fields_are_omitted() {
        let result = ParsedLabResult::default();
        let json = serde_json::to_value(&result).unwrap();
        assert!(json.get("labName").is_none());
        assert!(json.get("testDate").is_none());
        assert_eq!(json["biomarkers"], serde_json::json!([]));
    }

    #[test]
    fn result_round_trips_through_json() {
        let result = ParsedLabResult {
            metadata: LabDocumentMetadata {
                lab_name: Some("Quest Diagnostics".into()),
                test_date: Some("11/02/2025".into()),
                ..Default::default()
            },
            biomarkers: vec![BiomarkerObservation {
                name: "Glucose".into(),
                value: 88.0,
                unit: "mg/dL".into(),
                reference_range: "65-99".into(),
                status: BiomarkerStatus::Normal,
            }],
        };
        let json = serde_json::to_string(&result).unwrap();
        let back: ParsedLabResult = serde_json::from_str(&json).unwrap();
        assert_eq!(back, result);
    }
}
