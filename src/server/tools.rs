//! MCP tool definitions and dispatch.

use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::{json, Value};
use strum::IntoEnumIterator;
use strum_macros::EnumIter as EnumIterMacro;

use crate::config::SERVER_NAME;
use crate::whois::{AsnInput, WhoisClient};

use super::protocol::{RpcError, INTERNAL_ERROR};

/// The tools this server exposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIterMacro)]
pub enum Tool {
    WhoisDomain,
    WhoisDomains,
    WhoisTld,
    WhoisIp,
    WhoisAsn,
    SetupGuide,
}

#[derive(Debug, Deserialize)]
struct DomainArgs {
    domain: String,
}

#[derive(Debug, Deserialize)]
struct DomainsArgs {
    domains: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct TldArgs {
    tld: String,
}

#[derive(Debug, Deserialize)]
struct IpArgs {
    ip_address: String,
}

#[derive(Debug, Deserialize)]
struct AsnArgs {
    asn: AsnInput,
}

impl Tool {
    pub fn name(&self) -> &'static str {
        match self {
            Tool::WhoisDomain => "whois_domain",
            Tool::WhoisDomains => "whois_domains",
            Tool::WhoisTld => "whois_tld",
            Tool::WhoisIp => "whois_ip",
            Tool::WhoisAsn => "whois_asn",
            Tool::SetupGuide => "setup_domain_lookup_mcp_server",
        }
    }

    pub fn from_name(name: &str) -> Option<Tool> {
        Tool::iter().find(|tool| tool.name() == name)
    }

    pub fn description(&self) -> &'static str {
        match self {
            Tool::WhoisDomain => {
                "Look up WHOIS information for a single domain, including registration \
                 status, registrar and key dates."
            }
            Tool::WhoisDomains => {
                "Look up WHOIS information for multiple domains efficiently, with summary \
                 statistics."
            }
            Tool::WhoisTld => "Look up WHOIS information for a Top Level Domain (TLD) registry.",
            Tool::WhoisIp => {
                "Look up WHOIS information for an IPv4 or IPv6 address (ISP, organization, \
                 country)."
            }
            Tool::WhoisAsn => {
                "Look up WHOIS information for an Autonomous System Number (e.g. 'AS15169' \
                 or 15169)."
            }
            Tool::SetupGuide => "Get a guide and examples for using the domain lookup tools.",
        }
    }

    fn example(&self) -> &'static str {
        match self {
            Tool::WhoisDomain => "whois_domain('example.com')",
            Tool::WhoisDomains => "whois_domains(['example.com', 'test.org', 'demo.net'])",
            Tool::WhoisTld => "whois_tld('com')",
            Tool::WhoisIp => "whois_ip('8.8.8.8')",
            Tool::WhoisAsn => "whois_asn('AS15169')",
            Tool::SetupGuide => "setup_domain_lookup_mcp_server()",
        }
    }

    fn use_case(&self) -> &'static str {
        match self {
            Tool::WhoisDomain => "Check if a domain is registered, find registrar info",
            Tool::WhoisDomains => "Bulk domain availability checking",
            Tool::WhoisTld => "Get information about TLD registry and policies",
            Tool::WhoisIp => "Find ISP, organization, and location info for an IP",
            Tool::WhoisAsn => "Get organization info for network infrastructure",
            Tool::SetupGuide => "Discover the available tools",
        }
    }

    /// JSON schema of the tool's arguments.
    pub fn input_schema(&self) -> Value {
        let string_arg = |name: &str, description: &str| {
            json!({
                "type": "object",
                "properties": { name: { "type": "string", "description": description } },
                "required": [name],
            })
        };
        match self {
            Tool::WhoisDomain => string_arg("domain", "The domain name to look up (e.g. 'example.com')"),
            Tool::WhoisDomains => json!({
                "type": "object",
                "properties": {
                    "domains": {
                        "type": "array",
                        "items": { "type": "string" },
                        "description": "List of domain names to look up",
                    }
                },
                "required": ["domains"],
            }),
            Tool::WhoisTld => string_arg("tld", "The TLD to look up (e.g. 'com', '.org')"),
            Tool::WhoisIp => string_arg("ip_address", "The IP address to look up (IPv4 or IPv6)"),
            Tool::WhoisAsn => json!({
                "type": "object",
                "properties": {
                    "asn": {
                        "type": ["string", "integer"],
                        "description": "The ASN to look up (e.g. 'AS15169' or 15169)",
                    }
                },
                "required": ["asn"],
            }),
            Tool::SetupGuide => json!({ "type": "object", "properties": {} }),
        }
    }

    /// Entry for the `tools/list` response.
    pub fn descriptor(&self) -> Value {
        json!({
            "name": self.name(),
            "description": self.description(),
            "inputSchema": self.input_schema(),
        })
    }

    /// Runs the tool and returns its structured result.
    ///
    /// # Errors
    ///
    /// Only malformed arguments are errors. Lookup failures are reported in
    /// the returned value's `error` field.
    pub async fn call(&self, client: &WhoisClient, arguments: Value) -> Result<Value, RpcError> {
        let value = match self {
            Tool::WhoisDomain => {
                let args: DomainArgs = parse_args(self, arguments)?;
                to_value(&client.lookup_domain(&args.domain).await)?
            }
            Tool::WhoisDomains => {
                let args: DomainsArgs = parse_args(self, arguments)?;
                to_value(&client.lookup_domains(&args.domains).await)?
            }
            Tool::WhoisTld => {
                let args: TldArgs = parse_args(self, arguments)?;
                to_value(&client.lookup_tld(&args.tld).await)?
            }
            Tool::WhoisIp => {
                let args: IpArgs = parse_args(self, arguments)?;
                to_value(&client.lookup_ip(&args.ip_address).await)?
            }
            Tool::WhoisAsn => {
                let args: AsnArgs = parse_args(self, arguments)?;
                to_value(&client.lookup_asn(&args.asn).await)?
            }
            Tool::SetupGuide => server_guide(),
        };
        Ok(value)
    }
}

fn parse_args<T: DeserializeOwned>(tool: &Tool, arguments: Value) -> Result<T, RpcError> {
    let arguments = if arguments.is_null() {
        json!({})
    } else {
        arguments
    };
    serde_json::from_value(arguments).map_err(|e| {
        RpcError::invalid_params(format!("invalid arguments for {}: {}", tool.name(), e))
    })
}

fn to_value<T: serde::Serialize>(value: &T) -> Result<Value, RpcError> {
    serde_json::to_value(value)
        .map_err(|e| RpcError::new(INTERNAL_ERROR, format!("failed to serialize result: {}", e)))
}

/// Static usage guide returned by `setup_domain_lookup_mcp_server`.
pub fn server_guide() -> Value {
    let tools: Vec<Value> = Tool::iter()
        .filter(|tool| *tool != Tool::SetupGuide)
        .map(|tool| {
            json!({
                "name": tool.name(),
                "description": tool.description(),
                "example": tool.example(),
                "use_case": tool.use_case(),
            })
        })
        .collect();

    json!({
        "server_info": {
            "name": SERVER_NAME,
            "version": env!("CARGO_PKG_VERSION"),
            "description": "Provides efficient domain lookup tools for WHOIS information",
        },
        "available_tools": tools,
        "best_practices": [
            "Use whois_domains for bulk lookups to respect rate limits",
            "Results include 'is_registered' boolean for quick domain availability checks",
            "Raw WHOIS output is included for detailed analysis when needed",
            "All timestamps are in UTC ISO format",
            "Check for an 'error' field: failed lookups are reported in the result, not as tool errors",
        ],
        "common_use_cases": [
            "Domain availability checking for registration",
            "Investigating domain ownership and registration history",
            "IP address and network infrastructure analysis",
            "Security investigations and threat intelligence",
            "Domain portfolio management and monitoring",
        ],
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::initialization::init_stats;

    #[test]
    fn test_tool_names_round_trip() {
        for tool in Tool::iter() {
            assert_eq!(Tool::from_name(tool.name()), Some(tool));
        }
        assert_eq!(Tool::from_name("whois_everything"), None);
    }

    #[test]
    fn test_descriptor_schema_requires_arguments() {
        let descriptor = Tool::WhoisIp.descriptor();
        assert_eq!(descriptor["name"], "whois_ip");
        assert_eq!(descriptor["inputSchema"]["required"][0], "ip_address");
        assert_eq!(
            descriptor["inputSchema"]["properties"]["ip_address"]["type"],
            "string"
        );
    }

    #[test]
    fn test_server_guide_lists_lookup_tools() {
        let guide = server_guide();
        assert_eq!(guide["server_info"]["name"], "Domain Lookup MCP Server");
        let tools = guide["available_tools"].as_array().unwrap();
        assert_eq!(tools.len(), 5);
        assert!(tools.iter().any(|t| t["name"] == "whois_asn"));
    }

    #[tokio::test]
    async fn test_missing_argument_is_invalid_params() {
        let client = WhoisClient::new(&Config::default(), init_stats());
        let err = Tool::WhoisDomain
            .call(&client, json!({ "name": "example.com" }))
            .await
            .unwrap_err();
        assert_eq!(err.code, crate::server::protocol::INVALID_PARAMS);
        assert!(err.message.contains("whois_domain"));
    }

    #[tokio::test]
    async fn test_asn_argument_rejects_negative_number() {
        let client = WhoisClient::new(&Config::default(), init_stats());
        let err = Tool::WhoisAsn
            .call(&client, json!({ "asn": -1 }))
            .await
            .unwrap_err();
        assert_eq!(err.code, crate::server::protocol::INVALID_PARAMS);
    }

    #[tokio::test]
    async fn test_setup_guide_ignores_arguments() {
        let client = WhoisClient::new(&Config::default(), init_stats());
        let value = Tool::SetupGuide.call(&client, Value::Null).await.unwrap();
        assert!(value["best_practices"].is_array());
    }
}
