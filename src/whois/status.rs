//! Registration-status inference for domain-name queries.

use crate::config::{AVAILABILITY_PHRASES_V1, AVAILABILITY_PHRASES_VERSION};

use super::types::{Analysis, FieldValue, ParsedFields};

/// Substring heuristic deciding whether a domain is registered.
///
/// A domain is treated as available when the lower-cased resolver output
/// contains any of the configured phrases anywhere, not only in a field.
/// Registries with unlisted phrasing are misclassified as registered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegistrationHeuristic {
    version: String,
    phrases: Vec<String>,
}

impl Default for RegistrationHeuristic {
    fn default() -> Self {
        Self::new(AVAILABILITY_PHRASES_VERSION, AVAILABILITY_PHRASES_V1)
    }
}

impl RegistrationHeuristic {
    /// Builds a heuristic from a phrase table. Phrases are lower-cased so
    /// they match the lower-cased output; blank phrases are dropped since
    /// they would match everything.
    pub fn new<S: AsRef<str>>(version: impl Into<String>, phrases: &[S]) -> Self {
        Self {
            version: version.into(),
            phrases: phrases
                .iter()
                .map(|p| p.as_ref().trim().to_lowercase())
                .filter(|p| !p.is_empty())
                .collect(),
        }
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    pub fn phrases(&self) -> &[String] {
        &self.phrases
    }

    /// True unless the output contains an availability phrase.
    pub fn is_registered(&self, raw_output: &str) -> bool {
        let lowered = raw_output.to_lowercase();
        !self
            .phrases
            .iter()
            .any(|phrase| lowered.contains(phrase.as_str()))
    }

    /// Registration status plus which key facts the record carries.
    pub fn analyze(&self, raw_output: &str, fields: &ParsedFields) -> Analysis {
        Analysis {
            registered: self.is_registered(raw_output),
            has_registrar: has_any(fields, &["registrar"]),
            has_creation_date: has_any(fields, &["creation_date", "created"]),
            has_expiry_date: has_any(fields, &["expiry_date", "expires"]),
        }
    }
}

fn has_any(fields: &ParsedFields, keys: &[&str]) -> bool {
    keys.iter()
        .filter_map(|key| fields.get(*key))
        .any(|value: &FieldValue| !value.is_empty())
}
