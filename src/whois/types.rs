//! WHOIS result data structures.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::error_handling::WhoisError;

/// Value of a parsed WHOIS field.
///
/// Most fields appear once. Fields such as `name_server` or `domain_status`
/// repeat, and keep every value in the order they appeared.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum FieldValue {
    Single(String),
    Multiple(Vec<String>),
}

impl FieldValue {
    /// Adds another occurrence, promoting a single value to a list.
    pub fn push(&mut self, value: String) {
        match self {
            FieldValue::Single(first) => {
                let first = std::mem::take(first);
                *self = FieldValue::Multiple(vec![first, value]);
            }
            FieldValue::Multiple(values) => values.push(value),
        }
    }

    /// First occurrence of the field.
    pub fn first(&self) -> Option<&str> {
        match self {
            FieldValue::Single(value) => Some(value.as_str()),
            FieldValue::Multiple(values) => values.first().map(String::as_str),
        }
    }

    /// All occurrences in order.
    pub fn values(&self) -> Vec<&str> {
        match self {
            FieldValue::Single(value) => vec![value.as_str()],
            FieldValue::Multiple(values) => values.iter().map(String::as_str).collect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        match self {
            FieldValue::Single(value) => value.is_empty(),
            FieldValue::Multiple(values) => values.iter().all(String::is_empty),
        }
    }
}

/// Normalized field name (e.g. `creation_date`) to value(s).
pub type ParsedFields = BTreeMap<String, FieldValue>;

/// What a query produced: either an error message or resolver output.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum QueryOutcome {
    Failed {
        error: String,
    },
    Answered {
        raw_output: String,
        parsed_fields: ParsedFields,
    },
}

/// Derived registration facts for domain-name queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Analysis {
    pub registered: bool,
    pub has_registrar: bool,
    pub has_creation_date: bool,
    pub has_expiry_date: bool,
}

/// Result of a single WHOIS lookup.
///
/// Serializes to a flat object: `query`, `timestamp`, then either `error` or
/// `raw_output` + `parsed_fields`, then `is_registered` and `analysis` for
/// successful domain lookups.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QueryResult {
    /// The exact string passed to the resolver
    pub query: String,
    /// When the result was produced
    pub timestamp: DateTime<Utc>,
    #[serde(flatten)]
    pub outcome: QueryOutcome,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_registered: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub analysis: Option<Analysis>,
}

impl QueryResult {
    pub fn failed(query: impl Into<String>, error: &WhoisError) -> Self {
        Self {
            query: query.into(),
            timestamp: Utc::now(),
            outcome: QueryOutcome::Failed {
                error: error.to_string(),
            },
            is_registered: None,
            analysis: None,
        }
    }

    pub fn answered(
        query: impl Into<String>,
        raw_output: String,
        parsed_fields: ParsedFields,
    ) -> Self {
        Self {
            query: query.into(),
            timestamp: Utc::now(),
            outcome: QueryOutcome::Answered {
                raw_output,
                parsed_fields,
            },
            is_registered: None,
            analysis: None,
        }
    }

    /// Attaches registration status. Ignored on failed results, which never
    /// carry status.
    pub fn with_analysis(mut self, analysis: Analysis) -> Self {
        if !self.is_error() {
            self.is_registered = Some(analysis.registered);
            self.analysis = Some(analysis);
        }
        self
    }

    pub fn error(&self) -> Option<&str> {
        match &self.outcome {
            QueryOutcome::Failed { error } => Some(error),
            QueryOutcome::Answered { .. } => None,
        }
    }

    pub fn is_error(&self) -> bool {
        self.error().is_some()
    }

    pub fn raw_output(&self) -> Option<&str> {
        match &self.outcome {
            QueryOutcome::Answered { raw_output, .. } => Some(raw_output),
            QueryOutcome::Failed { .. } => None,
        }
    }

    pub fn parsed_fields(&self) -> Option<&ParsedFields> {
        match &self.outcome {
            QueryOutcome::Answered { parsed_fields, .. } => Some(parsed_fields),
            QueryOutcome::Failed { .. } => None,
        }
    }
}

/// Aggregate counts for a bulk domain lookup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BulkSummary {
    pub total_domains: usize,
    pub registered_domains: usize,
    pub available_domains: usize,
    pub errors: usize,
    pub timestamp: DateTime<Utc>,
}

/// Result of a bulk domain lookup.
///
/// Domains whose task failed outright are counted in `summary.errors` but
/// have no entry in `results`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BulkResult {
    /// Keyed by cleaned domain name
    pub results: BTreeMap<String, QueryResult>,
    pub summary: BulkSummary,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_value_promotion() {
        let mut value = FieldValue::Single("a".into());
        value.push("b".into());
        assert_eq!(value, FieldValue::Multiple(vec!["a".into(), "b".into()]));
        value.push("c".into());
        assert_eq!(value.values(), vec!["a", "b", "c"]);
        assert_eq!(value.first(), Some("a"));
    }

    #[test]
    fn test_failed_result_shape() {
        let result = QueryResult::failed(
            "example.com",
            &WhoisError::Internal("whois: No such file or directory".into()),
        );
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["query"], "example.com");
        assert_eq!(
            json["error"],
            "Internal error: whois: No such file or directory"
        );
        assert!(json.get("raw_output").is_none());
        assert!(json.get("parsed_fields").is_none());
        assert!(json.get("is_registered").is_none());
        assert!(json.get("analysis").is_none());
        assert!(json["timestamp"].as_str().unwrap().ends_with('Z'));
    }

    #[test]
    fn test_answered_result_shape() {
        let mut fields = ParsedFields::new();
        fields.insert("registrar".into(), FieldValue::Single("Example Inc".into()));
        fields.insert(
            "name_server".into(),
            FieldValue::Multiple(vec!["a.iana-servers.net".into(), "b.iana-servers.net".into()]),
        );
        let result = QueryResult::answered("example.com", "raw".into(), fields);
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["raw_output"], "raw");
        assert_eq!(json["parsed_fields"]["registrar"], "Example Inc");
        assert_eq!(json["parsed_fields"]["name_server"][1], "b.iana-servers.net");
        assert!(json.get("error").is_none());
    }

    #[test]
    fn test_analysis_not_attached_to_failures() {
        let analysis = Analysis {
            registered: true,
            has_registrar: true,
            has_creation_date: false,
            has_expiry_date: false,
        };
        let result = QueryResult::failed("x.com", &WhoisError::InvalidQuery("empty".into()))
            .with_analysis(analysis);
        assert_eq!(result.is_registered, None);
        assert_eq!(result.analysis, None);

        let ok = QueryResult::answered("x.com", String::new(), ParsedFields::new())
            .with_analysis(analysis);
        assert_eq!(ok.is_registered, Some(true));
        let json = serde_json::to_value(&ok).unwrap();
        assert_eq!(json["analysis"]["registered"], true);
        assert_eq!(json["analysis"]["has_creation_date"], false);
    }
}
