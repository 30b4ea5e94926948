//! Plain-text rendering of analysis results for the terminal.

use log_insight_core::{AnalysisResult, ChatRole, ChatTurn, Classification, KeywordHit};

/// Width of the longest keyword bar
const BAR_WIDTH: usize = 30;

/// Width of a full probability bar
const PROBABILITY_BAR_WIDTH: usize = 20;

/// Render a complete analysis result.
pub fn render_analysis(result: &AnalysisResult) -> String {
    let mut out = format!("Summary\n-------\n{}\n\n", result.summary);

    match (&result.classification, &result.classification_error) {
        (Some(classification), _) => out.push_str(&render_classification(classification)),
        (None, Some(err)) => {
            out.push_str("Classification unavailable\n");
            out.push_str(&format!("  {}\n", err.user_notice()));
        }
        (None, None) => out.push_str("Classification unavailable\n"),
    }
    out.push('\n');

    out.push_str(&render_keywords(&result.keywords));
    out
}

/// Render a severity verdict with one bar per label.
pub fn render_classification(classification: &Classification) -> String {
    let mut out = format!("Severity: {}\n", classification.severity);

    let label_width = classification
        .probabilities
        .keys()
        .map(|label| label.chars().count())
        .max()
        .unwrap_or(0);
    for (label, probability) in &classification.probabilities {
        let filled = (probability.clamp(0.0, 1.0) * PROBABILITY_BAR_WIDTH as f64).round() as usize;
        out.push_str(&format!(
            "  {:<width$}  {:<bar$}  {:>5.1}%\n",
            label,
            "#".repeat(filled),
            probability * 100.0,
            width = label_width,
            bar = PROBABILITY_BAR_WIDTH,
        ));
    }
    out
}

/// Render the keyword ranking as a horizontal bar chart.
pub fn render_keywords(keywords: &[KeywordHit]) -> String {
    let mut out = String::from("Critical keywords\n");
    if keywords.is_empty() {
        out.push_str("  (none found)\n");
        return out;
    }

    let max_count = keywords.iter().map(|k| k.count).max().unwrap_or(1).max(1);
    let label_width = keywords
        .iter()
        .map(|k| k.keyword.chars().count())
        .max()
        .unwrap_or(0);
    for hit in keywords {
        let filled = ((hit.count as usize * BAR_WIDTH) / max_count as usize).max(1);
        out.push_str(&format!(
            "  {:<width$}  {} {}\n",
            hit.keyword,
            "#".repeat(filled),
            hit.count,
            width = label_width,
        ));
    }
    out
}

/// One transcript line, e.g. `assistant> Hello!`
pub fn render_turn(turn: &ChatTurn) -> String {
    match turn.role {
        ChatRole::User => format!("you> {}", turn.text),
        ChatRole::Assistant => format!("assistant> {}", turn.text),
    }
}
