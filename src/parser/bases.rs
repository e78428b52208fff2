// Base-list parsing
//
// Turns the raw text between a type name and its opening brace into the set
// of direct base names. Only the first identifier of each comma-separated
// clause is kept, so `public Base<T>` yields `Base` and template arguments
// are ignored.

use crate::error::Result;
use regex::Regex;
use std::collections::BTreeSet;

const QUALIFIER_PATTERN: &str = r"\b(public|protected|private|virtual|final)\b";
const IDENTIFIER_PATTERN: &str = r"[A-Za-z_][A-Za-z0-9_:]*";

/// Extracts direct base names from a declaration's base clause
pub struct BaseListParser {
    qualifiers: Regex,
    identifier: Regex,
}

impl BaseListParser {
    pub fn new() -> Result<Self> {
        Ok(Self {
            qualifiers: Regex::new(QUALIFIER_PATTERN)?,
            identifier: Regex::new(IDENTIFIER_PATTERN)?,
        })
    }

    /// Parse a base clause such as ` final : public ns::Base, virtual Mixin `
    pub fn parse(&self, base_clause: &str) -> BTreeSet<String> {
        let Some((_, list)) = base_clause.split_once(':') else {
            return BTreeSet::new();
        };

        list.split(',')
            .filter_map(|clause| self.parse_clause(clause))
            .collect()
    }

    fn parse_clause(&self, clause: &str) -> Option<String> {
        let cleaned = self.qualifiers.replace_all(clause, " ");
        let first = self.identifier.find(&cleaned)?.as_str();

        if first == "class" || first == "struct" {
            return None;
        }

        // `ns::Type` is known by its last segment
        let name = first.rsplit("::").next().unwrap_or(first);
        (!name.is_empty()).then(|| name.to_string())
    }
}
