//! Rule-based severity classifier

use log_insight_core::Classification;

pub const ALERT: &str = "alert";
pub const WARNING: &str = "warning";
pub const NORMAL: &str = "normal";

/// Terms that put a single line in the alert class
const ALERT_TERMS: &[&str] = &[
    "error",
    "fail",
    "fatal",
    "critical",
    "panic",
    "crash",
    "corruption",
    "breach",
    "timeout",
];

const WARNING_TERMS: &[&str] = &["warning", "warn"];

/// Classify a piece of log text.
///
/// The severity comes from the whole text: `alert` if it mentions "error",
/// else `warning` if it mentions "warning", else `normal`. Probabilities are
/// Laplace-smoothed shares of non-blank lines per class, so the severity is
/// not necessarily the most probable label.
pub fn classify_log(text: &str) -> Classification {
    let lowered = text.to_lowercase();
    let severity = if lowered.contains("error") {
        ALERT
    } else if lowered.contains("warning") {
        WARNING
    } else {
        NORMAL
    };

    let mut counts = [0u32; 3];
    for line in lowered.lines().map(str::trim).filter(|l| !l.is_empty()) {
        counts[line_class(line)] += 1;
    }
    let total: u32 = counts.iter().sum();
    let share = |count: u32| f64::from(count + 1) / f64::from(total + 3);

    Classification::new(severity)
        .with_probability(ALERT, share(counts[0]))
        .with_probability(WARNING, share(counts[1]))
        .with_probability(NORMAL, share(counts[2]))
}

/// Index into `[alert, warning, normal]` for one lowercased line
fn line_class(line: &str) -> usize {
    if ALERT_TERMS.iter().any(|t| line.contains(t)) {
        0
    } else if WARNING_TERMS.iter().any(|t| line.contains(t)) {
        1
    } else {
        2
    }
}
