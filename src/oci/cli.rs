//! OCI CLI runner
//!
//! Every call spawns the CLI once with `--output json` appended and parses
//! stdout. An optional payload is fed through stdin so that secrets such as
//! SSH keys never appear in the argument list.

use std::process::Stdio;

use async_trait::async_trait;
use serde_json::Value;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;

use crate::config::oci::OUTPUT_ARGS;
use crate::config::OciConfig;
use crate::error::{OciCliError, Result};

/// One CLI call
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CliInvocation {
    /// Subcommand and flags, without the output format
    pub args: Vec<String>,

    /// Written to the child's stdin, which is then closed
    pub stdin: Option<String>,
}

impl CliInvocation {
    pub fn new<I, S>(args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            args: args.into_iter().map(Into::into).collect(),
            stdin: None,
        }
    }

    /// Append `flag value`
    pub fn arg_pair(mut self, flag: &str, value: impl Into<String>) -> Self {
        self.args.push(flag.to_string());
        self.args.push(value.into());
        self
    }

    /// Append `flag value` when a value is present
    pub fn opt_pair(self, flag: &str, value: Option<impl Into<String>>) -> Self {
        match value {
            Some(value) => self.arg_pair(flag, value),
            None => self,
        }
    }

    pub fn with_stdin(mut self, payload: impl Into<String>) -> Self {
        self.stdin = Some(payload.into());
        self
    }

    /// Full argument list passed to the binary
    pub fn command_line(&self) -> Vec<String> {
        self.args
            .iter()
            .cloned()
            .chain(OUTPUT_ARGS.iter().map(|s| s.to_string()))
            .collect()
    }
}

/// Access to the OCI CLI
#[async_trait]
pub trait OciCli: Send + Sync {
    /// Run one invocation and return its parsed JSON output
    async fn execute(&self, invocation: CliInvocation) -> Result<Value>;
}

/// [`OciCli`] backed by a child process
pub struct OciCliRunner {
    program: String,
}

impl OciCliRunner {
    pub fn new(config: &OciConfig) -> Self {
        Self::with_program(config.cli_path.clone())
    }

    pub fn with_program(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }

    fn spawn_error(&self, source: std::io::Error) -> OciCliError {
        OciCliError::Spawn {
            program: self.program.clone(),
            source,
        }
    }
}

#[async_trait]
impl OciCli for OciCliRunner {
    async fn execute(&self, invocation: CliInvocation) -> Result<Value> {
        let args = invocation.command_line();
        tracing::debug!(program = %self.program, ?args, "Running OCI CLI");

        let mut child = Command::new(&self.program)
            .args(&args)
            .stdin(if invocation.stdin.is_some() {
                Stdio::piped()
            } else {
                Stdio::null()
            })
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| self.spawn_error(e))?;

        // A failed exit status takes precedence over a broken stdin pipe
        let mut write_error = None;
        if let Some(payload) = invocation.stdin {
            if let Some(mut stdin) = child.stdin.take() {
                if let Err(e) = stdin.write_all(payload.as_bytes()).await {
                    tracing::debug!("Writing OCI CLI stdin failed: {}", e);
                    write_error = Some(e);
                }
                // Dropping the handle closes the pipe
            }
        }

        let output = child
            .wait_with_output()
            .await
            .map_err(|e| self.spawn_error(e))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            return Err(match output.status.code() {
                Some(code) => OciCliError::NonZeroExit { code, stderr },
                None => OciCliError::Terminated,
            }
            .into());
        }

        if let Some(e) = write_error {
            return Err(self.spawn_error(e).into());
        }

        // The CLI prints nothing at all for an empty listing
        if output.stdout.iter().all(u8::is_ascii_whitespace) {
            return Ok(Value::Null);
        }

        serde_json::from_slice(&output.stdout)
            .map_err(|e| OciCliError::InvalidOutput(e).into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_line_appends_output_format() {
        let invocation = CliInvocation::new(["compute", "instance", "list"])
            .opt_pair("--compartment-id", Some("ocid1.compartment.oc1..x"))
            .opt_pair("--lifecycle-state", None::<String>);
        assert_eq!(
            invocation.command_line(),
            vec![
                "compute",
                "instance",
                "list",
                "--compartment-id",
                "ocid1.compartment.oc1..x",
                "--output",
                "json"
            ]
        );
        assert!(invocation.stdin.is_none());
    }

    #[cfg(unix)]
    mod process {
        use super::*;
        use crate::error::CloudMcpError;

        // `sh -c <script> <args...>` ignores the extra arguments
        fn shell(script: &str) -> (OciCliRunner, CliInvocation) {
            (
                OciCliRunner::with_program("sh"),
                CliInvocation::new(["-c", script]),
            )
        }

        #[tokio::test]
        async fn test_stdin_is_forwarded() {
            let (runner, invocation) = shell("cat");
            let value = runner
                .execute(invocation.with_stdin(r#"{"data": {"id": "ocid1.instance"}}"#))
                .await
                .unwrap();
            assert_eq!(value["data"]["id"], "ocid1.instance");
        }

        #[tokio::test]
        async fn test_non_zero_exit_reports_code_and_stderr() {
            let (runner, invocation) = shell("echo 'NotAuthorized' >&2; exit 3");
            let err = runner.execute(invocation).await.unwrap_err();
            assert!(matches!(
                err,
                CloudMcpError::Oci(OciCliError::NonZeroExit { code: 3, .. })
            ));
            assert_eq!(
                err.to_string(),
                "OCI CLI error: Process exited with code 3: NotAuthorized"
            );
        }

        #[tokio::test]
        async fn test_early_exit_reports_exit_code_not_broken_pipe() {
            let (runner, invocation) = shell("echo 'InvalidParameter' >&2; exit 4");
            let payload = "ssh-ed25519 AAAA".repeat(64 * 1024);
            let err = runner
                .execute(invocation.with_stdin(payload))
                .await
                .unwrap_err();
            assert_eq!(
                err.to_string(),
                "OCI CLI error: Process exited with code 4: InvalidParameter"
            );
        }

        #[tokio::test]
        async fn test_invalid_json_output() {
            let (runner, invocation) = shell("echo not-json");
            let err = runner.execute(invocation).await.unwrap_err();
            assert!(matches!(err, CloudMcpError::Oci(OciCliError::InvalidOutput(_))));
        }

        #[tokio::test]
        async fn test_empty_output_is_null() {
            let (runner, invocation) = shell("true");
            assert!(runner.execute(invocation).await.unwrap().is_null());
        }

        #[tokio::test]
        async fn test_missing_binary() {
            let runner = OciCliRunner::with_program("/nonexistent/oci-cli");
            let err = runner
                .execute(CliInvocation::new(["iam", "region", "list"]))
                .await
                .unwrap_err();
            assert!(matches!(err, CloudMcpError::Oci(OciCliError::Spawn { .. })));
        }
    }
}
