//! A full MCP session over in-memory pipes.
#![cfg(unix)]

mod helpers;

use serde_json::{json, Value};
use tokio::io::BufReader;

use helpers::{client_for, fake_whois, REGISTRY_SCRIPT};
use whois_mcp::McpServer;

async fn run_session(requests: &[Value]) -> Vec<Value> {
    let fake = fake_whois(REGISTRY_SCRIPT);
    let server = McpServer::new(client_for(&fake));

    let input: String = requests
        .iter()
        .map(|r| format!("{}\n", r))
        .collect();
    let mut output = Vec::new();
    server
        .serve(BufReader::new(input.as_bytes()), &mut output)
        .await
        .expect("session failed");

    String::from_utf8(output)
        .unwrap()
        .lines()
        .map(|line| serde_json::from_str(line).unwrap())
        .collect()
}

fn response_for(responses: &[Value], id: i64) -> &Value {
    responses
        .iter()
        .find(|r| r["id"] == id)
        .unwrap_or_else(|| panic!("no response for id {}", id))
}

#[tokio::test]
async fn test_tool_calls() {
    let responses = run_session(&[
        json!({"jsonrpc": "2.0", "id": 1, "method": "initialize", "params": {}}),
        json!({"jsonrpc": "2.0", "method": "notifications/initialized"}),
        json!({"jsonrpc": "2.0", "id": 2, "method": "tools/call",
               "params": {"name": "whois_asn", "arguments": {"asn": 15169}}}),
        json!({"jsonrpc": "2.0", "id": 3, "method": "tools/call",
               "params": {"name": "whois_domains",
                          "arguments": {"domains": ["a.com", "b-free.com", "broken.com"]}}}),
        json!({"jsonrpc": "2.0", "id": 4, "method": "tools/call",
               "params": {"name": "whois_tld", "arguments": {"tld": "com"}}}),
    ])
    .await;

    assert_eq!(responses.len(), 4);

    let asn = &response_for(&responses, 2)["result"]["structuredContent"];
    assert_eq!(asn["query"], "AS15169");
    assert!(asn.get("is_registered").is_none());

    let bulk = &response_for(&responses, 3)["result"];
    let summary = &bulk["structuredContent"]["summary"];
    assert_eq!(summary["total_domains"], 3);
    assert_eq!(summary["registered_domains"], 1);
    assert_eq!(summary["available_domains"], 1);
    assert_eq!(summary["errors"], 1);
    let text = bulk["content"][0]["text"].as_str().unwrap();
    let reparsed: Value = serde_json::from_str(text).unwrap();
    assert_eq!(reparsed, bulk["structuredContent"]);

    let tld = &response_for(&responses, 4)["result"]["structuredContent"];
    assert_eq!(tld["query"], ".com");
}

#[tokio::test]
async fn test_bad_arguments_are_rpc_errors() {
    let responses = run_session(&[json!({
        "jsonrpc": "2.0", "id": 7, "method": "tools/call",
        "params": {"name": "whois_domains", "arguments": {"domains": "a.com"}}
    })])
    .await;
    assert_eq!(response_for(&responses, 7)["error"]["code"], -32602);
}
