// Usage detection
//
// A type "uses" another known type when that type's name appears as a whole
// word anywhere in its body once comments and literal contents are blanked
// out. This is a textual containment test, not a semantic reference check.

use crate::error::Result;
use regex::{Captures, Regex};
use std::collections::{BTreeSet, HashSet};

/// Comments, string literals and char literals, leftmost first
const NEUTRALIZE_PATTERN: &str =
    r#"//[^\n]*|(?s:/\*.*?\*/)|"(?:\\.|[^"\\])*"|'(?:\\.|[^'\\])*'"#;

/// Maximal runs of word characters; a name is a whole-word match exactly
/// when it equals one of these runs
const WORD_PATTERN: &str = r"\w+";

/// Finds references from a type body to other known type names
pub struct UsageDetector {
    neutralize: Regex,
    words: Regex,
}

impl UsageDetector {
    pub fn new() -> Result<Self> {
        Ok(Self {
            neutralize: Regex::new(NEUTRALIZE_PATTERN)?,
            words: Regex::new(WORD_PATTERN)?,
        })
    }

    /// Blank out comments and the contents of string/char literals.
    ///
    /// Comments become a single space so tokens on either side stay apart;
    /// literals keep their quotes and lose their contents.
    pub fn neutralize(&self, body: &str) -> String {
        self.neutralize
            .replace_all(body, |caps: &Captures| {
                let matched = &caps[0];
                if matched.starts_with('"') {
                    "\"\""
                } else if matched.starts_with('\'') {
                    "''"
                } else {
                    " "
                }
            })
            .into_owned()
    }

    /// Names from `known` referenced in `body`, excluding `owner` itself
    pub fn detect(&self, body: &str, owner: &str, known: &BTreeSet<String>) -> BTreeSet<String> {
        let cleaned = self.neutralize(body);
        let words: HashSet<&str> = self.words.find_iter(&cleaned).map(|m| m.as_str()).collect();

        known
            .iter()
            .filter(|name| name.as_str() != owner && words.contains(name.as_str()))
            .cloned()
            .collect()
    }
}
