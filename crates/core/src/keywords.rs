//! Critical Keyword Extraction
//!
//! Ranks a fixed vocabulary of critical terms by the number of log lines
//! that mention them. Pure and synchronous; never fails.

use crate::model::KeywordHit;

/// Default vocabulary, in tie-breaking order.
pub const DEFAULT_VOCABULARY: [&str; 10] = [
    "error",
    "fail",
    "warning",
    "timeout",
    "critical",
    "fatal",
    "panic",
    "crash",
    "corruption",
    "breach",
];

/// Default number of hits kept.
pub const DEFAULT_KEYWORD_LIMIT: usize = 5;

/// Counts vocabulary terms per non-blank line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeywordExtractor {
    vocabulary: Vec<String>,
    limit: usize,
}

impl Default for KeywordExtractor {
    fn default() -> Self {
        Self::new(DEFAULT_VOCABULARY, DEFAULT_KEYWORD_LIMIT)
    }
}

impl KeywordExtractor {
    /// Build an extractor. Terms are lowercased; repeats keep their first
    /// position.
    pub fn new<I, S>(vocabulary: I, limit: usize) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut terms: Vec<String> = Vec::new();
        for term in vocabulary {
            let term = term.as_ref().trim().to_lowercase();
            if !term.is_empty() && !terms.contains(&term) {
                terms.push(term);
            }
        }
        Self {
            vocabulary: terms,
            limit,
        }
    }

    pub fn vocabulary(&self) -> &[String] {
        &self.vocabulary
    }

    pub fn limit(&self) -> usize {
        self.limit
    }

    /// Rank vocabulary terms by how many lines contain them.
    ///
    /// A term counts at most once per line. Ties keep vocabulary order.
    pub fn extract(&self, text: &str) -> Vec<KeywordHit> {
        let mut counts = vec![0u32; self.vocabulary.len()];

        for line in text.lines().filter(|l| !l.trim().is_empty()) {
            let line = line.to_lowercase();
            for (idx, term) in self.vocabulary.iter().enumerate() {
                if line.contains(term.as_str()) {
                    counts[idx] += 1;
                }
            }
        }

        let mut hits: Vec<KeywordHit> = self
            .vocabulary
            .iter()
            .zip(counts)
            .filter(|(_, count)| *count > 0)
            .map(|(term, count)| KeywordHit::new(term.clone(), count))
            .collect();

        // sort_by is stable, so equal counts stay in vocabulary order
        hits.sort_by(|a, b| b.count.cmp(&a.count));
        hits.truncate(self.limit);
        hits
    }
}

/// Extract with the default vocabulary and limit.
pub fn extract_keywords(text: &str) -> Vec<KeywordHit> {
    KeywordExtractor::default().extract(text)
}
