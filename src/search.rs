//! Name search over an in-memory ATT&CK bundle
//!
//! The search term is compiled as a case-insensitive regular expression and
//! tested against each object's name. Every canonical (`mitre-attack`)
//! external reference of a matching object becomes one [`MatchRecord`], and
//! the records are returned sorted by lower-cased name.
//!
//! The term is used as a pattern as-is, so `cmd.exe` also matches `cmd_exe`.

use regex::{Regex, RegexBuilder};

use crate::error::{Error, Result};
use crate::models::{AttackObject, MatchRecord};

/// Optional restrictions applied before name matching
#[derive(Debug, Clone, Default)]
pub struct SearchFilter {
    /// Only consider objects of this STIX type (None = all types)
    pub object_type: Option<String>,
    /// Drop revoked and deprecated objects
    pub skip_revoked: bool,
}

impl SearchFilter {
    fn admits(&self, object: &AttackObject) -> bool {
        if let Some(ref kind) = self.object_type {
            if object.kind != *kind {
                return false;
            }
        }

        !(self.skip_revoked && object.is_retired())
    }
}

/// Compiled search term
#[derive(Debug, Clone)]
pub struct Matcher {
    regex: Regex,
}

impl Matcher {
    /// Compile `term` into a case-insensitive pattern
    pub fn new(term: &str) -> Result<Self> {
        let regex = RegexBuilder::new(term)
            .case_insensitive(true)
            .build()
            .map_err(|source| Error::InvalidPattern {
                pattern: term.to_string(),
                source,
            })?;

        Ok(Self { regex })
    }

    /// Test an object's name; objects without a name never match
    pub fn is_match(&self, object: &AttackObject) -> bool {
        object
            .display_name()
            .is_some_and(|name| self.regex.is_match(name))
    }

    /// Collect and sort the match records for `objects`
    pub fn extract(&self, objects: &[AttackObject], filter: &SearchFilter) -> Vec<MatchRecord> {
        let mut records = Vec::new();

        for object in objects.iter().filter(|o| filter.admits(o)) {
            if !self.is_match(object) {
                continue;
            }

            let name = object.display_name().unwrap_or_default();
            for reference in object.canonical_references() {
                records.push(MatchRecord::new(
                    name,
                    reference.url.clone().unwrap_or_default(),
                ));
            }
        }

        // Stable: objects sharing a name keep discovery order
        records.sort_by_cached_key(|record| record.name.to_lowercase());

        log::debug!(
            "Pattern '{}' produced {} records from {} objects",
            self.regex.as_str(),
            records.len(),
            objects.len()
        );
        records
    }
}

/// Search `objects` for names matching `term`
pub fn search(term: &str, objects: &[AttackObject]) -> Result<Vec<MatchRecord>> {
    search_with_filter(term, objects, &SearchFilter::default())
}

/// Search with type and retirement restrictions
pub fn search_with_filter(
    term: &str,
    objects: &[AttackObject],
    filter: &SearchFilter,
) -> Result<Vec<MatchRecord>> {
    log::info!("Searching {} objects: term='{}', filter={:?}", objects.len(), term, filter);

    let matcher = Matcher::new(term)?;
    Ok(matcher.extract(objects, filter))
}
