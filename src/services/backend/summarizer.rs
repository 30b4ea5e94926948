//! Extractive TF-IDF summarizer
//!
//! Scores every sentence by the sum of its L2-normalized TF-IDF weights and
//! keeps the highest scoring ones, in their original order.

use std::collections::HashMap;

use once_cell::sync::Lazy;
use regex::Regex;

/// Sentences kept in a summary
pub const SUMMARY_SENTENCES: usize = 2;

/// Lowercase runs of two or more word characters
static TOKEN_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\b\w\w+\b").unwrap());

/// Summarize `text` down to [`SUMMARY_SENTENCES`] sentences.
pub fn summarize_log(text: &str) -> String {
    summarize_sentences(text, SUMMARY_SENTENCES)
}

/// Summarize `text` down to `keep` sentences. Text with `keep` or fewer
/// sentences is returned unchanged.
pub fn summarize_sentences(text: &str, keep: usize) -> String {
    let sentences = split_sentences(text);
    if sentences.len() <= keep {
        return text.to_string();
    }

    let scores = sentence_scores(&sentences);
    let mut ranked: Vec<usize> = (0..sentences.len()).collect();
    // stable sort: equal scores keep the earlier sentence first
    ranked.sort_by(|&a, &b| scores[b].total_cmp(&scores[a]));
    ranked.truncate(keep);
    ranked.sort_unstable();

    ranked
        .into_iter()
        .map(|i| sentences[i])
        .collect::<Vec<_>>()
        .join(" ")
}

/// Split on `.`, `!` or `?` followed by whitespace, and on line breaks.
/// Terminal punctuation stays with its sentence; empty pieces are dropped.
pub fn split_sentences(text: &str) -> Vec<&str> {
    let mut sentences = Vec::new();
    let mut start = 0;
    let mut chars = text.char_indices().peekable();

    while let Some((idx, ch)) = chars.next() {
        let end = match ch {
            '\n' | '\r' => Some(idx),
            '.' | '!' | '?' => match chars.peek() {
                Some((_, next)) if next.is_whitespace() => Some(idx + ch.len_utf8()),
                _ => None,
            },
            _ => None,
        };
        if let Some(end) = end {
            push_trimmed(&mut sentences, &text[start..end]);
            start = end;
            if matches!(ch, '\n' | '\r') {
                start += ch.len_utf8();
            }
        }
    }
    push_trimmed(&mut sentences, &text[start..]);
    sentences
}

fn push_trimmed<'a>(sentences: &mut Vec<&'a str>, piece: &'a str) {
    let piece = piece.trim();
    if !piece.is_empty() {
        sentences.push(piece);
    }
}

fn tokenize(sentence: &str) -> Vec<String> {
    TOKEN_RE
        .find_iter(sentence)
        .map(|m| m.as_str().to_lowercase())
        .collect()
}

/// Row sums of the L2-normalized TF-IDF matrix, one per sentence.
fn sentence_scores(sentences: &[&str]) -> Vec<f64> {
    let term_counts: Vec<HashMap<String, u32>> = sentences
        .iter()
        .map(|s| {
            let mut counts = HashMap::new();
            for token in tokenize(s) {
                *counts.entry(token).or_insert(0) += 1;
            }
            counts
        })
        .collect();

    let mut document_frequency: HashMap<&str, u32> = HashMap::new();
    for counts in &term_counts {
        for term in counts.keys() {
            *document_frequency.entry(term.as_str()).or_insert(0) += 1;
        }
    }

    let n = sentences.len() as f64;
    let idf = |term: &str| {
        let df = document_frequency.get(term).copied().unwrap_or(0) as f64;
        ((1.0 + n) / (1.0 + df)).ln() + 1.0
    };

    term_counts
        .iter()
        .map(|counts| {
            let weights: Vec<f64> = counts
                .iter()
                .map(|(term, &tf)| tf as f64 * idf(term))
                .collect();
            let norm = weights.iter().map(|w| w * w).sum::<f64>().sqrt();
            if norm == 0.0 {
                0.0
            } else {
                weights.iter().sum::<f64>() / norm
            }
        })
        .collect()
}
