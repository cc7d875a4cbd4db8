//! AWS CLI command execution.
//!
//! Runs `aws` commands, classifies their failures and parses their JSON output.

use crate::error::{Error, Result};
use colored::Colorize;
use regex::Regex;
use serde::de::DeserializeOwned;
use std::io::Write;
use std::process::{Command, Stdio};
use std::sync::OnceLock;

/// Largest stdout accepted from a single command.
const MAX_OUTPUT_BYTES: usize = 5_000_000;

/// Regex for splitting command strings while preserving quoted substrings.
static COMMAND_REGEX: OnceLock<Regex> = OnceLock::new();

/// Regex for the `(ErrorCode) when calling the Operation operation` fragment.
static ERROR_CODE_REGEX: OnceLock<Regex> = OnceLock::new();

fn get_command_regex() -> &'static Regex {
    COMMAND_REGEX.get_or_init(|| {
        Regex::new(r#"'([^']*)'\s*|\"([^\"]*)\"\s*|([^'\s]*)\s*"#).expect("Invalid Regex")
    })
}

fn get_error_code_regex() -> &'static Regex {
    ERROR_CODE_REGEX.get_or_init(|| {
        Regex::new(r"\(([A-Za-z0-9.]+)\) when calling the (\w+) operation").expect("Invalid Regex")
    })
}

/// Client handle for one region and credential profile.
///
/// Holds no session state; every call spawns a fresh `aws` process.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AwsCli {
    region: String,
    profile: Option<String>,
}

impl AwsCli {
    pub fn new(region: impl Into<String>, profile: Option<String>) -> Self {
        AwsCli {
            region: region.into(),
            profile,
        }
    }

    pub fn region(&self) -> &str {
        &self.region
    }

    pub fn profile(&self) -> Option<&str> {
        self.profile.as_deref()
    }

    /// Full argument list for `aws <service> <operation> <args...>`.
    pub fn command_args(&self, service: &str, operation: &str, args: &[String]) -> Vec<String> {
        let mut all = vec![service.to_string(), operation.to_string()];
        all.extend(args.iter().cloned());
        all.extend(["--region".to_string(), self.region.clone()]);
        if let Some(profile) = &self.profile {
            all.extend(["--profile".to_string(), profile.clone()]);
        }
        all.extend(["--output".to_string(), "json".to_string()]);
        all
    }

    /// Run a command and return its raw stdout.
    pub fn call(&self, service: &str, operation: &str, args: &[String]) -> Result<String> {
        run_args("aws", &self.command_args(service, operation, args))
    }

    /// Run a command with `input` written to its stdin.
    pub fn call_with_input(
        &self,
        service: &str,
        operation: &str,
        args: &[String],
        input: &str,
    ) -> Result<String> {
        run_args_with_input("aws", &self.command_args(service, operation, args), Some(input))
    }

    /// Run a command and deserialize its JSON output.
    pub fn call_json<T: DeserializeOwned>(
        &self,
        service: &str,
        operation: &str,
        args: &[String],
    ) -> Result<T> {
        let output = self.call(service, operation, args)?;
        parse_json(&format!("{service} {operation}"), &output)
    }
}

/// Profiles configured for the `aws` CLI.
pub fn list_profiles() -> Result<Vec<String>> {
    let output = run("aws configure list-profiles")?;
    Ok(output
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .map(str::to_string)
        .collect())
}

/// Run a shell command and return its stdout.
///
/// The command string is split on spaces, with quoted substrings preserved.
pub fn run(cmd: &str) -> Result<String> {
    let cmds: Vec<String> = split_and_strip(cmd)
        .into_iter()
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect();
    log::trace!("split cmds={:?}", cmds);
    let (program, args) = cmds
        .split_first()
        .ok_or_else(|| Error::Config(format!("empty command: '{cmd}'")))?;
    run_args(program, args)
}

/// Run `program` with `args` and return its stdout.
pub fn run_args(program: &str, args: &[String]) -> Result<String> {
    run_args_with_input(program, args, None)
}

/// Run `program` with `args`, feeding `input` on stdin, and return its stdout.
///
/// Secrets go through `input` so they never show up in the process table.
pub fn run_args_with_input(program: &str, args: &[String], input: Option<&str>) -> Result<String> {
    let cmd = format!("{program} {}", args.join(" "));
    log::debug!("run({cmd})", cmd = cmd.on_blue());

    let exec_failed = |e: std::io::Error| {
        log::error!("Command execution failed: {}", e);
        Error::Upstream(format!("failed to execute {program}: {e}"))
    };
    let mut child = Command::new(program)
        .args(args)
        .stdin(if input.is_some() { Stdio::piped() } else { Stdio::null() })
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .map_err(exec_failed)?;
    if let (Some(input), Some(mut stdin)) = (input, child.stdin.take()) {
        stdin.write_all(input.as_bytes()).map_err(exec_failed)?;
    }
    let output = child.wait_with_output().map_err(exec_failed)?;

    if output.status.success() {
        log::debug!("Success output.stdout.len(): {}", output.stdout.len());
        if output.stdout.len() > MAX_OUTPUT_BYTES {
            return Err(Error::Upstream(format!(
                "response too large: {} bytes for command: {cmd}",
                output.stdout.len()
            )));
        }
    } else {
        let stderr = String::from_utf8_lossy(&output.stderr);
        log::trace!(
            "code={code:?}, status={status}\n┎######\nstderr=\n{stderr}\n┖######",
            code = output.status.code(),
            status = output.status,
            stderr = stderr.red()
        );
        log::warn!(
            "{failed} to run {cmd}",
            failed = "failed".on_red(),
            cmd = cmd.on_blue()
        );
        return Err(classify_failure(&stderr));
    }

    String::from_utf8(output.stdout).map_err(|e| Error::Upstream(format!("invalid UTF-8: {e}")))
}

/// Map the stderr of a failed `aws` call onto the error taxonomy.
pub fn classify_failure(stderr: &str) -> Error {
    let message = stderr.trim().to_string();

    if message.contains("Parameter validation failed") || message.starts_with("aws: error:") {
        return Error::Validation(message);
    }

    if let Some(caps) = get_error_code_regex().captures(&message) {
        let code = &caps[1];
        if code.contains("NotFound") || code.ends_with("NotFoundFault") {
            return Error::NotFound {
                kind: "resource",
                id: message,
            };
        }
        if code == "ValidationError"
            || code.starts_with("InvalidParameter")
            || code == "MissingParameter"
        {
            return Error::Validation(message);
        }
    }

    Error::Upstream(message)
}

/// Deserialize CLI output, reporting the JSON path of the first mismatch.
pub fn parse_json<T: DeserializeOwned>(what: &str, output: &str) -> Result<T> {
    let mut deserializer = serde_json::Deserializer::from_str(output);
    serde_path_to_error::deserialize(&mut deserializer).map_err(|e| {
        log::error!("OUTPUT START:\n\n{}\n\nOUTPUT END\n", output);
        Error::Json {
            what: what.to_string(),
            path: e.path().to_string(),
            message: e.inner().to_string(),
        }
    })
}

/// Split a command string on spaces, preserving quoted substrings.
fn split_and_strip(input: &str) -> Vec<&str> {
    get_command_regex()
        .find_iter(input)
        .map(|m| m.as_str().trim().trim_matches('\'').trim_matches('"'))
        .collect()
}
