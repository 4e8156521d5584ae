// Shared test helpers: fake resolver scripts and client construction.
//
// The fake resolvers are small `sh` scripts standing in for `whois`, so the
// real process-spawning path is exercised without network access.

#![allow(dead_code)] // Not every test file uses every helper

use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::PathBuf;
use std::time::Duration;

use tempfile::TempDir;
use whois_mcp::{init_stats, Config, WhoisClient};

/// A fake resolver script. Keep the value alive for as long as the script is used.
pub struct FakeWhois {
    pub dir: TempDir,
    pub path: PathBuf,
}

/// Writes an executable `sh` script whose body receives the query as `$1`.
pub fn fake_whois(body: &str) -> FakeWhois {
    let dir = TempDir::new().expect("Failed to create temp directory");
    let path = dir.path().join("whois");
    fs::write(&path, format!("#!/bin/sh\n{}\n", body)).expect("Failed to write fake whois");
    fs::set_permissions(&path, fs::Permissions::from_mode(0o755))
        .expect("Failed to make fake whois executable");
    FakeWhois { dir, path }
}

pub fn test_config(fake: &FakeWhois) -> Config {
    Config {
        whois_binary: fake.path.clone(),
        timeout: Duration::from_secs(5),
        grace_delay: Duration::ZERO,
        ..Default::default()
    }
}

pub fn client_for(fake: &FakeWhois) -> WhoisClient {
    WhoisClient::new(&test_config(fake), init_stats())
}

/// Resolver that answers like a registry: registered unless the query
/// contains "free", failing for queries containing "broken".
pub const REGISTRY_SCRIPT: &str = r#"
case "$1" in
  *broken*)
    echo "connect: Connection refused" >&2
    exit 2
    ;;
  *free*)
    echo "No match for domain \"$1\"."
    ;;
  *)
    echo "% registry banner: ignore me"
    echo "Domain Name: $1"
    echo "Registrar: Example Registrar, Inc."
    echo "Creation Date: 1995-08-14T04:00:00Z"
    echo "Registry Expiry Date: 2030-08-13T04:00:00Z"
    echo "Name Server: A.IANA-SERVERS.NET"
    echo "Name Server: B.IANA-SERVERS.NET"
    ;;
esac
"#;
