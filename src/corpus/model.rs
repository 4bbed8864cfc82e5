/*!
 * Data model for the bilingual corpus.
 *
 * The central invariant protected by the whole pipeline lives here: the
 * `chinese_text` and `english_text` fields of an [`ExtractionResult`],
 * split on newlines, always yield arrays of equal length, with matching
 * indices referring to the same logical pair.
 */

use serde::{Deserialize, Serialize};

/// One aligned sentence or word/phrase pair.
///
/// Both fields are non-empty after trimming by the time a pair is accepted
/// into any result set; the extractor enforces this on construction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BilingualPair {
    /// English side of the pair
    pub en: String,
    /// Chinese side of the pair
    pub zh: String,
}

impl BilingualPair {
    /// Create a new pair. Callers are expected to pass trimmed text.
    pub fn new(en: impl Into<String>, zh: impl Into<String>) -> Self {
        Self {
            en: en.into(),
            zh: zh.into(),
        }
    }

    /// Both sides carry text after trimming.
    pub fn is_complete(&self) -> bool {
        !self.en.trim().is_empty() && !self.zh.trim().is_empty()
    }
}

/// An accepted extraction: the verbatim transcription plus the newline-joined
/// projections of the ordered pair list.
///
/// Field names serialize in the camelCase wire shape the model emits, so CLI
/// output and merge input files round-trip without renaming.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractionResult {
    /// Verbatim (or near-verbatim) transcription of the source material.
    /// Not required to be line-aligned with the pair projections.
    pub original_text: String,

    /// One Chinese line per pair, newline-joined
    pub chinese_text: String,

    /// One English line per pair, newline-joined
    pub english_text: String,
}

impl ExtractionResult {
    /// Build a result from an ordered pair list.
    pub fn from_pairs(original_text: impl Into<String>, pairs: &[BilingualPair]) -> Self {
        let english_text = pairs
            .iter()
            .map(|p| p.en.trim())
            .collect::<Vec<_>>()
            .join("\n");
        let chinese_text = pairs
            .iter()
            .map(|p| p.zh.trim())
            .collect::<Vec<_>>()
            .join("\n");

        Self {
            original_text: original_text.into(),
            chinese_text,
            english_text,
        }
    }

    /// English projection split back into lines. Empty text yields no lines,
    /// not a single empty line.
    pub fn english_lines(&self) -> Vec<String> {
        split_lines(&self.english_text)
    }

    /// Chinese projection split back into lines.
    pub fn chinese_lines(&self) -> Vec<String> {
        split_lines(&self.chinese_text)
    }

    /// Re-zip the two projections into pairs.
    ///
    /// Relies on the alignment invariant; indices beyond the shorter
    /// projection are dropped rather than fabricated.
    pub fn pairs(&self) -> Vec<BilingualPair> {
        self.english_lines()
            .into_iter()
            .zip(self.chinese_lines())
            .map(|(en, zh)| BilingualPair::new(en, zh))
            .collect()
    }

    /// Number of aligned lines in the English projection.
    pub fn line_count(&self) -> usize {
        self.english_lines().len()
    }

    /// True when all three fields are blank, e.g. a corpus that has not
    /// accumulated anything yet.
    pub fn is_empty(&self) -> bool {
        self.original_text.trim().is_empty()
            && self.chinese_text.trim().is_empty()
            && self.english_text.trim().is_empty()
    }
}

fn split_lines(text: &str) -> Vec<String> {
    if text.is_empty() {
        return Vec::new();
    }
    text.split('\n').map(|line| line.to_string()).collect()
}
