//! Laboratory report extraction engine.
//!
//! Takes the unstructured text recovered from a scanned/generated blood-test
//! PDF and converts it into a structured set of biomarker observations plus
//! document-level metadata (lab vendor, collection date, patient identity
//! when the layout carries it).
//!
//! The PDF → text step is the caller's responsibility (an external
//! text-layer extraction library); this crate consumes an opaque string and
//! owns no file, network, or storage surface. The engine is a pure,
//! synchronous, single-pass computation and is safe to call concurrently
//! for unrelated documents.

pub mod error;
pub mod models;
pub mod parser;

pub use error::LabParseError;
pub use models::{BiomarkerObservation, BiomarkerStatus, LabDocumentMetadata, ParsedLabResult};
pub use parser::metadata::test_date_to_iso;
pub use parser::parse_lab_report;
