//! Value/unit/range capture for recognized lines.
//!
//! One pattern per rule, compiled once and aligned with the rule table by
//! index. Every pattern tolerates an optional H/L abnormality-flag letter
//! between the value and the range; the letter is consumed and discarded
//! (see DESIGN.md on the status field).

use std::sync::LazyLock;

use regex::Regex;

use super::rules::{BiomarkerRule, RangeForm, RULES};

pub(crate) struct Capture {
    pub value: f64,
    pub unit: String,
    pub reference_range: String,
}

/// Compiled capture patterns, one per entry in [`RULES`], same order.
static CAPTURE_PATTERNS: LazyLock<Vec<Regex>> =
    LazyLock::new(|| RULES.iter().map(build_capture_pattern).collect());

const PAIR: &str = r"\d+(?:\.\d+)?\s*-\s*\d+(?:\.\d+)?";
// "< OR = 4.0" (Quest's spelling), "<= 4.0", "<4.0"
const UPPER: &str = r"<\s*OR\s*=\s*\d+(?:\.\d+)?|<=?\s*\d+(?:\.\d+)?";
const LOWER: &str = r">\s*OR\s*=\s*\d+(?:\.\d+)?|>=?\s*\d+(?:\.\d+)?";

fn build_capture_pattern(rule: &BiomarkerRule) -> Regex {
    let units = rule
        .units
        .iter()
        .map(|u| regex::escape(u))
        .collect::<Vec<_>>()
        .join("|");

    let range = match rule.range {
        RangeForm::Pair => format!(r"(?P<range>{PAIR})\s+"),
        RangeForm::UpperBound => format!(r"(?P<range>{UPPER})\s+"),
        RangeForm::LowerBound => format!(r"(?P<range>{LOWER})\s+"),
        // Range may be absent entirely (CBC differential percentages).
        // When one IS printed, every spelling must be consumed here:
        // leaving a qualifier range unmatched would let the value token
        // shift onto the range bound and emit a garbage observation.
        RangeForm::Optional => format!(r"(?:(?P<range>{PAIR}|{UPPER}|{LOWER})\s+)?"),
    };

    let pattern = format!(
        r"(?i)(?P<value>\d+(?:\.\d+)?)\s+(?:[HL]\s+)?{range}(?P<unit>{units})"
    );
    Regex::new(&pattern).unwrap()
}

/// Pull value, unit, and reference range out of a recognized line.
///
/// Returns `None` when the line does not carry a capturable measurement;
/// per the engine contract that is "this line did not actually match",
/// never an error and never a partial record.
pub(crate) fn capture(rule_index: usize, line: &str) -> Option<Capture> {
    let caps = CAPTURE_PATTERNS[rule_index].captures(line)?;
    let value: f64 = caps.name("value")?.as_str().parse().ok()?;
    let unit = caps.name("unit")?.as_str().to_string();
    let reference_range = caps
        .name("range")
        .map(|m| normalize_range(m.as_str()))
        .unwrap_or_default();
    Some(Capture {
        value,
        unit,
        reference_range,
    })
}

/// Collapse the printed range to its canonical spelling: whitespace removed,
/// "< OR =" / "> OR =" folded to "<=" / ">=". Strict bounds keep their bare
/// "<" / ">" so the inclusive/strict distinction the lab prints survives.
fn normalize_range(raw: &str) -> String {
    let compact: String = raw.chars().filter(|c| !c.is_whitespace()).collect();
    let upper = compact.to_uppercase();

    if let Some(bound) = upper.strip_prefix("<OR=").or_else(|| upper.strip_prefix("<=")) {
        return format!("<={bound}");
    }
    if let Some(bound) = upper.strip_prefix(">OR=").or_else(|| upper.strip_prefix(">=")) {
        return format!(">={bound}");
    }
    compact
}
