/*!
 * Language-purity validation for aligned bilingual line arrays.
 *
 * The model producing the content is unreliable in different ways: it
 * sometimes glosses English into the Chinese column, and sometimes leaks
 * phonetic transcriptions into either column. Each failure mode is a named
 * rule so that a retry prompt can reference one concrete, reproducible
 * offending line instead of an aggregate of many.
 *
 * Rules are line-local and order-sensitive; the first failure wins. Callers
 * must guarantee equal-length arrays before invoking the validator.
 */

use std::fmt;

use once_cell::sync::Lazy;
use regex::Regex;

/// Characters that identify IPA phonetic notation outright.
const IPA_SYMBOLS: &[char] = &[
    'ə', 'ɪ', 'ʊ', 'ɛ', 'æ', 'ɔ', 'ɑ', 'ʌ', 'ɒ', 'ɜ', 'ɡ', 'ŋ', 'θ', 'ð', 'ʃ', 'ʒ', 'ɹ', 'ɫ',
    'ˈ', 'ˌ', 'ː',
];

/// Short slash-delimited phonetic token, e.g. `/wɜːd/`. Lowercase-only and
/// space-free to avoid matching prose like "and/or business km/h".
static IPA_SLASH_TOKEN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"/[a-zəɪʊɛæɔɑʌɒɜɡŋθðʃʒɹɫˈˌː'.]{1,24}/").expect("Invalid IPA token regex")
});

/// Typographic punctuation permitted in English lines beyond printable ASCII:
/// curly quotes and en/em dashes.
const ENGLISH_EXTRA_PUNCT: &[char] =
    &['\u{2018}', '\u{2019}', '\u{201C}', '\u{201D}', '\u{2013}', '\u{2014}'];

/// A CJK ideograph in the unified range the validator cares about.
fn is_cjk(c: char) -> bool {
    matches!(c, '\u{3400}'..='\u{9FFF}')
}

fn contains_cjk(line: &str) -> bool {
    line.chars().any(is_cjk)
}

fn contains_ipa(line: &str) -> bool {
    line.chars().any(|c| IPA_SYMBOLS.contains(&c)) || IPA_SLASH_TOKEN.is_match(line)
}

fn english_char_permitted(c: char) -> bool {
    (' '..='~').contains(&c) || ENGLISH_EXTRA_PUNCT.contains(&c)
}

/// The named purity rules, in the order they are checked per line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PurityRule {
    /// The Chinese line contains no CJK character at all
    ChineseLineAllAscii,
    /// The Chinese line contains IPA/phonetic notation
    ChineseLineContainsIpa,
    /// The English line contains a CJK character
    EnglishLineContainsCjk,
    /// The English line contains a character outside the permitted set
    EnglishLineIllegalChar(char),
    /// The English line contains IPA/phonetic notation
    EnglishLineContainsIpa,
}

impl PurityRule {
    /// User-facing rule description, matching the application locale.
    fn describe(&self) -> String {
        match self {
            Self::ChineseLineAllAscii => "中文行不含任何中文字符".to_string(),
            Self::ChineseLineContainsIpa => "中文行包含音标".to_string(),
            Self::EnglishLineContainsCjk => "英文行包含中文字符".to_string(),
            Self::EnglishLineIllegalChar(c) => format!("英文行包含非法字符 '{c}'"),
            Self::EnglishLineContainsIpa => "英文行包含音标".to_string(),
        }
    }
}

/// The first offending line found by [`validate_purity`].
///
/// A transient control-flow value: created here, consumed by the orchestrator
/// to build a retry prompt, and discarded afterwards. Never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PurityViolation {
    /// Which rule failed
    pub rule: PurityRule,
    /// 1-based index of the offending line
    pub line_number: usize,
    /// Content of the offending line
    pub line: String,
}

impl fmt::Display for PurityViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "第{}行{}: \u{300C}{}\u{300D}",
            self.line_number,
            self.rule.describe(),
            self.line
        )
    }
}

impl PurityViolation {
    /// Model-facing correction, phrased as an instruction rather than a log
    /// message. Embedded verbatim into the retry prompt.
    pub fn retry_instruction(&self) -> String {
        let line = &self.line;
        let n = self.line_number;
        match self.rule {
            PurityRule::ChineseLineAllAscii => format!(
                "Line {n} of the Chinese column (\"{line}\") contains no Chinese characters. \
                 Every \"zh\" value must be written in Chinese; put English text only in the \
                 \"en\" field."
            ),
            PurityRule::ChineseLineContainsIpa => format!(
                "Line {n} of the Chinese column (\"{line}\") contains phonetic notation. \
                 Remove all IPA transcriptions from the \"zh\" values."
            ),
            PurityRule::EnglishLineContainsCjk => format!(
                "Line {n} of the English column (\"{line}\") contains Chinese characters. \
                 Every \"en\" value must be pure English; put Chinese text only in the \
                 \"zh\" field."
            ),
            PurityRule::EnglishLineIllegalChar(c) => format!(
                "Line {n} of the English column (\"{line}\") contains the character '{c}', \
                 which is not plain English text. Use only ordinary English letters, digits \
                 and punctuation in the \"en\" values."
            ),
            PurityRule::EnglishLineContainsIpa => format!(
                "Line {n} of the English column (\"{line}\") contains phonetic notation. \
                 Remove all IPA transcriptions from the \"en\" values."
            ),
        }
    }
}

/// Check every aligned line pair against the purity rules.
///
/// Precondition: `english` and `chinese` have equal length; a length mismatch
/// is the orchestrator's job to report before this is called.
pub fn validate_purity(english: &[String], chinese: &[String]) -> Result<(), PurityViolation> {
    debug_assert_eq!(english.len(), chinese.len());

    for (index, (en, zh)) in english.iter().zip(chinese.iter()).enumerate() {
        let line_number = index + 1;

        if !contains_cjk(zh) {
            return Err(PurityViolation {
                rule: PurityRule::ChineseLineAllAscii,
                line_number,
                line: zh.clone(),
            });
        }
        if contains_ipa(zh) {
            return Err(PurityViolation {
                rule: PurityRule::ChineseLineContainsIpa,
                line_number,
                line: zh.clone(),
            });
        }
        if contains_cjk(en) {
            return Err(PurityViolation {
                rule: PurityRule::EnglishLineContainsCjk,
                line_number,
                line: en.clone(),
            });
        }
        if let Some(c) = en.chars().find(|c| !english_char_permitted(*c)) {
            return Err(PurityViolation {
                rule: PurityRule::EnglishLineIllegalChar(c),
                line_number,
                line: en.clone(),
            });
        }
        if contains_ipa(en) {
            return Err(PurityViolation {
                rule: PurityRule::EnglishLineContainsIpa,
                line_number,
                line: en.clone(),
            });
        }
    }

    Ok(())
}
