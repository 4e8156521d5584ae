//! Normalization of raw WHOIS text into fields.
//!
//! Registry output is free text with no reliable grammar. Parsing is
//! best-effort: anything that does not look like `Key: value` is skipped.

use crate::config::COMMENT_PREFIXES;

use super::types::{FieldValue, ParsedFields};

/// Parses `Key: value` lines into a normalized field map.
///
/// - Blank lines and lines starting with `%` or `#` are skipped.
/// - Lines are split on the first `:` only, so values keep their colons
///   (times, IPv6 addresses, URLs).
/// - Keys are lower-cased with spaces replaced by `_` (`Creation Date`
///   becomes `creation_date`).
/// - Empty keys and empty values are dropped.
/// - Repeated keys collect their values in order of appearance.
pub fn parse_fields(raw_text: &str) -> ParsedFields {
    let mut fields = ParsedFields::new();

    for line in raw_text.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with(COMMENT_PREFIXES) {
            continue;
        }

        let Some((key, value)) = line.split_once(':') else {
            continue;
        };

        let key = normalize_key(key);
        let value = value.trim();
        if key.is_empty() || value.is_empty() {
            continue;
        }

        match fields.get_mut(&key) {
            Some(existing) => existing.push(value.to_string()),
            None => {
                fields.insert(key, FieldValue::Single(value.to_string()));
            }
        }
    }

    log::trace!("Parsed {} WHOIS fields", fields.len());
    fields
}

/// `"  Registrar WHOIS Server "` -> `"registrar_whois_server"`
fn normalize_key(key: &str) -> String {
    key.trim().to_lowercase().replace(' ', "_")
}
