//! Lab report extraction pipeline.
//!
//! Data flows one way: raw text → normalized lines → rule-table sweep →
//! assembled result. Metadata extraction runs on the full text,
//! independently of the line sweep. The whole pipeline runs once per
//! document; a per-call seen-set guarantees each biomarker is emitted at
//! most once even when a line format repeats (cumulative summary pages).

pub mod metadata;
pub mod normalize;

mod capture;
mod rules;

use std::collections::HashSet;

use crate::models::{BiomarkerObservation, BiomarkerStatus, LabDocumentMetadata, ParsedLabResult};

/// Extract a structured lab result from the text layer of a report.
///
/// Never fails: unrecognized lines are inert, a recognized line without a
/// capturable measurement yields nothing, and an empty document yields an
/// empty result. Callers treat zero biomarkers as a soft failure (manual
/// entry fallback), not as an engine fault.
///
/// The engine holds no state across calls; concurrent invocations for
/// unrelated documents need no coordination.
pub fn parse_lab_report(raw_text: &str) -> ParsedLabResult {
    tracing::debug!(text_length = raw_text.len(), "lab report extraction starting");

    let doc_metadata = metadata::extract_metadata(raw_text);
    let lines = normalize::normalize_lines(raw_text);

    let mut seen: HashSet<&'static str> = HashSet::new();
    let mut biomarkers: Vec<BiomarkerObservation> = Vec::new();

    for line in &lines {
        // Uppercased once per line; recognition tokens are stored uppercase.
        let upper = line.to_uppercase();

        for (idx, rule) in rules::RULES.iter().enumerate() {
            if !rule.recognizes(&upper) {
                continue;
            }
            // Recognized but uncapturable means the line did not actually
            // match this rule; later rules still get a chance.
            let Some(cap) = capture::capture(idx, line) else {
                continue;
            };
            // Emission gate: at most one observation per biomarker name
            // per document. A duplicate line is consumed silently.
            if seen.insert(rule.name) {
                biomarkers.push(BiomarkerObservation {
                    name: rule.name.to_string(),
                    value: cap.value,
                    unit: cap.unit,
                    reference_range: cap.reference_range,
                    status: BiomarkerStatus::Normal,
                });
            }
            // First satisfied rule for a line wins.
            break;
        }
    }

    tracing::info!(
        biomarkers = biomarkers.len(),
        lines = lines.len(),
        lab_name = ?doc_metadata.lab_name,
        test_date = ?doc_metadata.test_date,
        "lab report extraction complete"
    );

    assemble(doc_metadata, biomarkers)
}

/// Single well-defined exit point: no computation beyond construction.
fn assemble(
    metadata: LabDocumentMetadata,
    biomarkers: Vec<BiomarkerObservation>,
) -> ParsedLabResult {
    ParsedLabResult {
        metadata,
        biomarkers,
    }
}
