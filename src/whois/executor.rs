//! Execution of the external `whois` resolver.

use std::path::{Path, PathBuf};
use std::process::{ExitStatus, Stdio};
use std::time::Duration;

use tokio::io::AsyncReadExt;
use tokio::process::Command;

use crate::config::{Config, DecodePolicy};
use crate::error_handling::WhoisError;

/// Runs one resolver process per query.
///
/// There are no retries here; a query gets exactly one attempt.
#[derive(Debug, Clone)]
pub struct WhoisExecutor {
    binary: PathBuf,
    timeout: Duration,
    decode_policy: DecodePolicy,
}

impl WhoisExecutor {
    pub fn new(binary: impl Into<PathBuf>, timeout: Duration, decode_policy: DecodePolicy) -> Self {
        Self {
            binary: binary.into(),
            timeout,
            decode_policy,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(
            config.whois_binary.clone(),
            config.timeout,
            config.decode_policy,
        )
    }

    pub fn binary(&self) -> &Path {
        &self.binary
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Runs `<binary> <query>` and returns its decoded stdout.
    ///
    /// # Errors
    ///
    /// - `WhoisError::Timeout` if the process outlives the timeout. The
    ///   process is killed and reaped before returning.
    /// - `WhoisError::ResolverFailure` on a non-zero exit, carrying the
    ///   trimmed stderr text (or "Unknown error").
    /// - `WhoisError::Internal` if the process cannot be spawned or its
    ///   pipes cannot be read.
    pub async fn execute(&self, query: &str) -> Result<String, WhoisError> {
        log::debug!("Running {} {}", self.binary.display(), query);

        let mut child = Command::new(&self.binary)
            .arg(query)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| WhoisError::Internal(format!("{}: {}", self.binary.display(), e)))?;

        let mut stdout = child
            .stdout
            .take()
            .ok_or_else(|| WhoisError::Internal("resolver stdout was not captured".into()))?;
        let mut stderr = child
            .stderr
            .take()
            .ok_or_else(|| WhoisError::Internal("resolver stderr was not captured".into()))?;

        // Drain both pipes while waiting, so a chatty resolver can't block on a full pipe
        let communicate = async {
            let mut out = Vec::new();
            let mut err = Vec::new();
            let (out_read, err_read, status) = tokio::join!(
                stdout.read_to_end(&mut out),
                stderr.read_to_end(&mut err),
                child.wait()
            );
            let collected: std::io::Result<(ExitStatus, Vec<u8>, Vec<u8>)> =
                match (out_read, err_read, status) {
                    (Ok(_), Ok(_), Ok(status)) => Ok((status, out, err)),
                    (Err(e), _, _) | (_, Err(e), _) | (_, _, Err(e)) => Err(e),
                };
            collected
        };

        let waited = tokio::time::timeout(self.timeout, communicate).await;

        let (status, out, err) = match waited {
            Ok(Ok(output)) => output,
            Ok(Err(e)) => {
                log::error!("I/O error talking to resolver for {}: {}", query, e);
                return Err(WhoisError::from(e));
            }
            Err(_) => {
                log::warn!(
                    "WHOIS query for {} exceeded {:?}, killing resolver",
                    query,
                    self.timeout
                );
                // kill() also waits, so the process is reaped before we return
                if let Err(e) = child.kill().await {
                    log::error!("Failed to kill timed-out resolver for {}: {}", query, e);
                }
                return Err(WhoisError::Timeout {
                    timeout: self.timeout,
                });
            }
        };

        if !status.success() {
            let stderr_text = self.decode_policy.decode(&err);
            log::warn!(
                "Resolver exited with {} for {}: {}",
                status,
                query,
                stderr_text.trim()
            );
            return Err(WhoisError::resolver_failure(&stderr_text));
        }

        Ok(self.decode_policy.decode(&out))
    }
}
