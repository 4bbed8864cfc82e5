/*!
 * Positional sentence/word classification of aligned pairs.
 *
 * A pure heuristic, not a model call: the same predicate is restated inside
 * the merge prompt, so the merge model and downstream consumers agree on the
 * same boundary. The threshold is a policy value rather than a literal so
 * deployments can tune it.
 */

use serde::{Deserialize, Serialize};

use crate::corpus::model::BilingualPair;

fn default_sentence_min_chars() -> usize {
    15
}

/// Policy for telling sentences apart from words and phrases.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassifyPolicy {
    /// An English line longer than this (and containing a space) is a sentence
    #[serde(default = "default_sentence_min_chars")]
    pub sentence_min_chars: usize,
}

impl Default for ClassifyPolicy {
    fn default() -> Self {
        Self {
            sentence_min_chars: default_sentence_min_chars(),
        }
    }
}

impl ClassifyPolicy {
    /// The classification predicate: at least one space and longer than the
    /// threshold.
    pub fn is_sentence(&self, english: &str) -> bool {
        english.contains(' ') && english.chars().count() > self.sentence_min_chars
    }

    /// The predicate restated as prose for the merge prompt.
    pub fn describe_for_prompt(&self) -> String {
        format!(
            "treat a pair as a sentence pair when its English text contains at least one \
             space and is longer than {} characters; otherwise treat it as a word pair",
            self.sentence_min_chars
        )
    }
}

/// Partition aligned pairs into (sentences, words/phrases).
///
/// Total over its input: every pair lands in exactly one of the two lists,
/// none are dropped, and relative order is preserved within each list.
pub fn partition(
    pairs: &[BilingualPair],
    policy: &ClassifyPolicy,
) -> (Vec<BilingualPair>, Vec<BilingualPair>) {
    pairs
        .iter()
        .cloned()
        .partition(|pair| policy.is_sentence(&pair.en))
}
