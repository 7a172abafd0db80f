//! The biomarker rule table.
//!
//! One entry per known biomarker, applied to every normalized line in table
//! order; the first satisfied rule for a line wins. Each rule carries a
//! recognition test (required substrings plus explicit exclusions) and the
//! shape of its capture pattern (accepted unit spellings, range form).
//!
//! Near-neighbor biomarkers are disambiguated through the exclusion set
//! rather than through pattern tricks: "Testosterone Free" refuses
//! BIOAVAILABLE lines, percent differentials refuse ABSOLUTE lines, MCH
//! refuses MCHC, and so on. This keeps the disambiguation auditable as the
//! table grows.

/// How a rule's reference range is printed on the source line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum RangeForm {
    /// Plain bound pair, e.g. "264-916".
    Pair,
    /// Upper-bound qualifier, e.g. "<5.7" or "< OR = 4.0".
    UpperBound,
    /// Lower-bound qualifier, e.g. "> OR = 60".
    LowerBound,
    /// Any printed form when present; some layouts omit the range entirely
    /// (CBC differential percentages, insulin).
    Optional,
}

pub(crate) struct BiomarkerRule {
    /// Canonical label emitted into the observation.
    pub name: &'static str,
    /// Uppercase substrings that must all appear in the line.
    pub all_of: &'static [&'static str],
    /// Uppercase substrings that disqualify the line even when `all_of`
    /// holds.
    pub none_of: &'static [&'static str],
    /// Unit spellings accepted for this biomarker, as printed.
    pub units: &'static [&'static str],
    pub range: RangeForm,
}

impl BiomarkerRule {
    /// Recognition test. `upper_line` is the line already uppercased once
    /// by the engine loop.
    pub fn recognizes(&self, upper_line: &str) -> bool {
        self.all_of.iter().all(|token| upper_line.contains(token))
            && !self.none_of.iter().any(|token| upper_line.contains(token))
    }
}

macro_rules! rule {
    ($name:literal, [$($all:literal),+], [$($none:literal),*], [$($unit:literal),+], $range:ident) => {
        BiomarkerRule {
            name: $name,
            all_of: &[$($all),+],
            none_of: &[$($none),*],
            units: &[$($unit),+],
            range: RangeForm::$range,
        }
    };
}

pub(crate) static RULES: &[BiomarkerRule] = &[
    // ── Hormones ────────────────────────────────────────────────────────
    // "TESTOSTERONE, TOTAL, MALE": the MALE qualifier keeps panel header
    // lines like "TESTOSTERONE, FREE" from cross-matching.
    rule!("Testosterone Total", ["TESTOSTERONE", "TOTAL", "MALE"], [], ["ng/dL"], Pair),
    rule!("Testosterone Free", ["TESTOSTERONE", "FREE"], ["BIOAVAILABLE"], ["pg/mL"], Pair),
    rule!("Testosterone Bioavailable", ["TESTOSTERONE", "BIOAVAILABLE"], [], ["ng/dL"], Pair),
    rule!("SHBG", ["SEX HORMONE BINDING GLOBULIN"], [], ["nmol/L"], Pair),
    rule!("Estradiol", ["ESTRADIOL"], [], ["pg/mL"], UpperBound),
    rule!("DHEA-S", ["DHEA"], [], ["mcg/dL"], Pair),
    rule!("Cortisol", ["CORTISOL"], [], ["mcg/dL", "ug/dL"], Pair),
    rule!("Prolactin", ["PROLACTIN"], [], ["ng/mL"], Pair),
    rule!("IGF-1", ["IGF"], [], ["ng/mL"], Pair),
    rule!("Insulin", ["INSULIN"], [], ["uIU/mL"], Optional),
    rule!("FSH", ["FSH"], [], ["mIU/mL"], Pair),
    rule!("LH", ["LH"], [], ["mIU/mL"], Pair),
    rule!("PSA", ["PSA"], [], ["ng/mL"], UpperBound),
    rule!("Vitamin D", ["VITAMIN D"], [], ["ng/mL"], Pair),
    rule!("Vitamin B12", ["B12"], [], ["pg/mL"], Pair),
    // ── Thyroid ─────────────────────────────────────────────────────────
    rule!("TSH", ["TSH"], [], ["mIU/L"], Pair),
    rule!("T4 Free", ["T4", "FREE"], [], ["ng/dL"], Pair),
    rule!("T3 Free", ["T3", "FREE"], [], ["pg/mL"], Pair),
    // ── Lipid panel ─────────────────────────────────────────────────────
    rule!("Cholesterol Total", ["CHOLESTEROL", "TOTAL"], ["HDL", "LDL"], ["mg/dL"], UpperBound),
    rule!("HDL Cholesterol", ["HDL"], ["NON HDL"], ["mg/dL"], LowerBound),
    rule!("LDL Cholesterol", ["LDL"], [], ["mg/dL"], UpperBound),
    rule!("Triglycerides", ["TRIGLYCERIDES"], [], ["mg/dL"], UpperBound),
    // ── Metabolic panel ─────────────────────────────────────────────────
    rule!("Glucose", ["GLUCOSE"], [], ["mg/dL"], Pair),
    rule!("Hemoglobin A1c", ["HEMOGLOBIN", "A1C"], [], ["%"], UpperBound),
    rule!("BUN", ["UREA NITROGEN"], [], ["mg/dL"], Pair),
    rule!("Creatinine", ["CREATININE"], ["RATIO", "EGFR"], ["mg/dL"], Pair),
    rule!("eGFR", ["EGFR"], [], ["mL/min/1.73m2"], LowerBound),
    rule!("Uric Acid", ["URIC ACID"], [], ["mg/dL"], Pair),
    // ── Electrolytes ────────────────────────────────────────────────────
    rule!("Sodium", ["SODIUM"], [], ["mmol/L"], Pair),
    rule!("Potassium", ["POTASSIUM"], [], ["mmol/L"], Pair),
    rule!("Chloride", ["CHLORIDE"], [], ["mmol/L"], Pair),
    rule!("Carbon Dioxide", ["CARBON DIOXIDE"], [], ["mmol/L"], Pair),
    rule!("Calcium", ["CALCIUM"], [], ["mg/dL"], Pair),
    rule!("Magnesium", ["MAGNESIUM"], [], ["mg/dL"], Pair),
    // ── Liver panel ─────────────────────────────────────────────────────
    rule!("Protein Total", ["PROTEIN", "TOTAL"], [], ["g/dL"], Pair),
    // The A/G ratio line carries both ALBUMIN and GLOBULIN, and the SHBG
    // line carries GLOBULIN; both are refused here.
    rule!("Albumin", ["ALBUMIN"], ["GLOBULIN", "RATIO"], ["g/dL"], Pair),
    rule!("Globulin", ["GLOBULIN"], ["SEX HORMONE", "RATIO"], ["g/dL"], Pair),
    rule!("Bilirubin Total", ["BILIRUBIN", "TOTAL"], [], ["mg/dL"], Pair),
    rule!("Alkaline Phosphatase", ["ALKALINE PHOSPHATASE"], [], ["U/L"], Pair),
    // "AST" is a substring of "FASTING" (glucose lines).
    rule!("AST", ["AST"], ["FASTING"], ["U/L"], Pair),
    rule!("ALT", ["ALT"], [], ["U/L"], Pair),
    // ── CBC ─────────────────────────────────────────────────────────────
    rule!("WBC", ["WHITE BLOOD CELL"], [], ["Thousand/uL"], Pair),
    rule!("RBC", ["RED BLOOD CELL"], [], ["Million/uL"], Pair),
    rule!("Hemoglobin", ["HEMOGLOBIN"], ["A1C"], ["g/dL"], Pair),
    rule!("Hematocrit", ["HEMATOCRIT"], [], ["%"], Pair),
    rule!("MCV", ["MCV"], [], ["fL"], Pair),
    rule!("MCH", ["MCH"], ["MCHC"], ["pg"], Pair),
    rule!("MCHC", ["MCHC"], [], ["g/dL"], Pair),
    rule!("RDW", ["RDW"], [], ["%"], Pair),
    rule!("Platelet Count", ["PLATELET"], ["MPV"], ["Thousand/uL"], Pair),
    rule!("MPV", ["MPV"], [], ["fL"], Pair),
    // ── CBC differential ────────────────────────────────────────────────
    // Percent rules refuse ABSOLUTE lines so they never double-count
    // against the absolute-count variants of the same cell type.
    rule!("Neutrophils", ["NEUTROPHILS"], ["ABSOLUTE"], ["%"], Optional),
    rule!("Lymphocytes", ["LYMPHOCYTES"], ["ABSOLUTE"], ["%"], Optional),
    rule!("Monocytes", ["MONOCYTES"], ["ABSOLUTE"], ["%"], Optional),
    rule!("Eosinophils", ["EOSINOPHILS"], ["ABSOLUTE"], ["%"], Optional),
    rule!("Basophils", ["BASOPHILS"], ["ABSOLUTE"], ["%"], Optional),
    rule!("Absolute Neutrophils", ["ABSOLUTE", "NEUTROPHILS"], [], ["cells/uL"], Pair),
    rule!("Absolute Lymphocytes", ["ABSOLUTE", "LYMPHOCYTES"], [], ["cells/uL"], Pair),
    rule!("Absolute Monocytes", ["ABSOLUTE", "MONOCYTES"], [], ["cells/uL"], Pair),
    rule!("Absolute Eosinophils", ["ABSOLUTE", "EOSINOPHILS"], [], ["cells/uL"], Pair),
    rule!("Absolute Basophils", ["ABSOLUTE", "BASOPHILS"], [], ["cells/uL"], Pair),
    // ── Iron studies ────────────────────────────────────────────────────
    rule!("Iron Total", ["IRON"], ["BINDING", "SATURATION"], ["mcg/dL"], Pair),
    rule!("TIBC", ["IRON BINDING CAPACITY"], [], ["mcg/dL"], Pair),
    rule!("Transferrin Saturation", ["SATURATION"], [], ["%"], Pair),
    rule!("Ferritin", ["FERRITIN"], [], ["ng/mL"], Pair),
    // ── Inflammatory markers ────────────────────────────────────────────
    rule!("hs-CRP", ["C-REACTIVE PROTEIN"], [], ["mg/L"], UpperBound),
    rule!("Homocysteine", ["HOMOCYSTEINE"], [], ["umol/L"], UpperBound),
];
