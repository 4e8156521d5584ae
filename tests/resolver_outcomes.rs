//! End-to-end lookups against fake resolver scripts.
#![cfg(unix)]

mod helpers;

use helpers::{client_for, fake_whois, test_config, REGISTRY_SCRIPT};
use whois_mcp::whois::FieldValue;
use whois_mcp::{init_stats, AsnInput, DecodePolicy, WhoisClient};

#[tokio::test]
async fn test_registered_domain_is_parsed() {
    let fake = fake_whois(
        r#"printf 'Domain Name: EXAMPLE.COM\nRegistrar: Example Inc\nCreation Date: 1995-08-14\n'"#,
    );
    let result = client_for(&fake).lookup_domain("example.com").await;

    assert!(result.error().is_none());
    let fields = result.parsed_fields().unwrap();
    assert_eq!(fields.len(), 3);
    assert_eq!(
        fields.get("domain_name"),
        Some(&FieldValue::Single("EXAMPLE.COM".into()))
    );
    assert_eq!(
        fields.get("registrar"),
        Some(&FieldValue::Single("Example Inc".into()))
    );
    assert_eq!(
        fields.get("creation_date"),
        Some(&FieldValue::Single("1995-08-14".into()))
    );
    assert_eq!(result.is_registered, Some(true));
    let analysis = result.analysis.unwrap();
    assert!(analysis.has_registrar);
    assert!(analysis.has_creation_date);
    assert!(!analysis.has_expiry_date);
}

#[tokio::test]
async fn test_unregistered_domain() {
    let fake = fake_whois(REGISTRY_SCRIPT);
    let result = client_for(&fake).lookup_domain("NOPE123XYZ-free.COM").await;
    assert_eq!(result.query, "nope123xyz-free.com");
    assert_eq!(result.is_registered, Some(false));
    assert_eq!(result.analysis.map(|a| a.registered), Some(false));
}

#[tokio::test]
async fn test_repeated_fields_kept_in_order() {
    let fake = fake_whois(REGISTRY_SCRIPT);
    let result = client_for(&fake).lookup_domain("example.com").await;
    let name_servers = result.parsed_fields().unwrap().get("name_server").unwrap();
    assert_eq!(
        name_servers.values(),
        vec!["A.IANA-SERVERS.NET", "B.IANA-SERVERS.NET"]
    );
    assert!(!result
        .parsed_fields()
        .unwrap()
        .keys()
        .any(|k| k.starts_with('%')));
}

#[tokio::test]
async fn test_nonzero_exit_reports_stderr() {
    let fake = fake_whois(REGISTRY_SCRIPT);
    let result = client_for(&fake).lookup_domain("broken.com").await;
    assert_eq!(
        result.error(),
        Some("WHOIS command failed: connect: Connection refused")
    );
    assert!(result.raw_output().is_none());
    assert!(result.is_registered.is_none());
}

#[tokio::test]
async fn test_nonzero_exit_without_stderr() {
    let fake = fake_whois("exit 1");
    let result = client_for(&fake).lookup_ip("8.8.8.8").await;
    assert_eq!(result.error(), Some("WHOIS command failed: Unknown error"));
}

#[tokio::test]
async fn test_invalid_utf8_dropped_by_default() {
    let fake = fake_whois(r#"printf 'Registrant Organization: Caf\351 SARL\n'"#);
    let result = client_for(&fake).lookup_ip("192.0.2.1").await;
    assert_eq!(
        result
            .parsed_fields()
            .unwrap()
            .get("registrant_organization")
            .and_then(FieldValue::first),
        Some("Caf SARL")
    );
}

#[tokio::test]
async fn test_invalid_utf8_replaced_when_configured() {
    let fake = fake_whois(r#"printf 'Registrant Organization: Caf\351 SARL\n'"#);
    let mut config = test_config(&fake);
    config.decode_policy = DecodePolicy::Replace;
    let client = WhoisClient::new(&config, init_stats());
    let result = client.lookup_ip("192.0.2.1").await;
    assert!(result.raw_output().unwrap().contains("Caf\u{FFFD} SARL"));
}

#[tokio::test]
async fn test_tld_query_gets_leading_dot() {
    let fake = fake_whois(r#"echo "domain: $1""#);
    let result = client_for(&fake).lookup_tld("COM").await;
    assert_eq!(result.query, ".com");
    assert_eq!(
        result
            .parsed_fields()
            .unwrap()
            .get("domain")
            .and_then(FieldValue::first),
        Some(".com")
    );
    assert!(result.is_registered.is_none());
}

#[tokio::test]
async fn test_asn_forms_reach_resolver_identically() {
    let fake = fake_whois(r#"echo "aut-num: $1""#);
    let client = client_for(&fake);
    let from_number = client.lookup_asn(&AsnInput::Numeric(15169)).await;
    let from_text = client.lookup_asn(&AsnInput::from("as15169")).await;
    assert_eq!(from_number.query, "AS15169");
    assert_eq!(from_text.query, "AS15169");
    assert_eq!(from_number.parsed_fields(), from_text.parsed_fields());
}

#[tokio::test]
async fn test_stats_track_outcomes() {
    let fake = fake_whois(REGISTRY_SCRIPT);
    let client = client_for(&fake);
    client.lookup_domain("ok.com").await;
    client.lookup_domain("broken.com").await;
    assert_eq!(client.stats().total_queries(), 2);
    assert_eq!(client.stats().total_successes(), 1);
    assert_eq!(client.stats().total_errors(), 1);
}
