//! Main application entry point (CLI binary).
//!
//! This is a thin wrapper around the `whois_mcp` library that handles:
//! - Command-line argument parsing
//! - Logger initialization
//! - Serving MCP over stdio, or running a one-shot lookup
//!
//! All core functionality is implemented in the library crate.

use anyhow::{Context, Result};
use clap::Parser;
use serde::Serialize;
use std::process;

use whois_mcp::server::tools::server_guide;
use whois_mcp::{init_logger_with, init_stats, AsnInput, Command, Config, McpServer, Opt, WhoisClient};

#[tokio::main]
async fn main() -> Result<()> {
    let opt = Opt::parse();
    let config = Config::from(&opt);

    init_logger_with(config.log_level.clone().into(), config.log_format.clone())
        .context("Failed to initialize logger")?;

    let stats = init_stats();
    let client = WhoisClient::new(&config, stats.clone());

    let outcome = match opt.command.unwrap_or(Command::Serve) {
        Command::Serve => McpServer::new(client).run_stdio().await,
        Command::Domain { domain } => print_json(&client.lookup_domain(&domain).await),
        Command::Domains { domains } => print_json(&client.lookup_domains(&domains).await),
        Command::Tld { tld } => print_json(&client.lookup_tld(&tld).await),
        Command::Ip { ip_address } => print_json(&client.lookup_ip(&ip_address).await),
        Command::Asn { asn } => print_json(&client.lookup_asn(&AsnInput::from(asn)).await),
        Command::Info => print_json(&server_guide()),
    };

    stats.log_summary();

    if let Err(e) = outcome {
        eprintln!("whois_mcp error: {:#}", e);
        process::exit(1);
    }
    Ok(())
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    let rendered = serde_json::to_string_pretty(value).context("Failed to serialize result")?;
    println!("{}", rendered);
    Ok(())
}
