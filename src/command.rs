//! Running external programs, synchronously
//!
//! Every run blocks until the child exits and its output is fully drained.
//! No timeout is applied.

use crate::errors::CommandError;
use std::{
    fmt,
    io::Write,
    process::{Command, Output, Stdio},
};

/// Shown in place of secret arguments wherever an [Invocation] is rendered
pub const REDACTED: &str = "<password>";

#[derive(Clone)]
enum Arg {
    Plain(String),
    Secret(String),
}

impl Arg {
    fn as_str(&self) -> &str {
        match self {
            Arg::Plain(s) | Arg::Secret(s) => s,
        }
    }

    fn display(&self) -> &str {
        match self {
            Arg::Plain(s) => s,
            Arg::Secret(_) => REDACTED,
        }
    }
}

/// A program and its arguments, some of which may be secret
///
/// Secret arguments are passed to the program as they are, but every
/// rendering of the invocation (its `Display`, `Debug`, errors, and any output
/// captured from a failed run) shows [REDACTED] instead.
#[derive(Clone)]
pub struct Invocation {
    program: String,
    args: Vec<Arg>,
}

impl Invocation {
    pub fn new<S: Into<String>>(program: S) -> Self {
        Invocation {
            program: program.into(),
            args: Vec::new(),
        }
    }

    pub fn arg<S: Into<String>>(mut self, arg: S) -> Self {
        self.args.push(Arg::Plain(arg.into()));
        self
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args
            .extend(args.into_iter().map(|arg| Arg::Plain(arg.into())));
        self
    }

    /// Add an argument that must never be shown
    pub fn secret<S: Into<String>>(mut self, arg: S) -> Self {
        self.args.push(Arg::Secret(arg.into()));
        self
    }

    /// The program and arguments joined by single spaces, secrets redacted
    pub fn redacted(&self) -> String {
        let mut line = self.program.clone();
        for arg in &self.args {
            line.push(' ');
            line.push_str(arg.display());
        }
        line
    }

    /// Run to completion, then relay the captured stdout and stderr
    pub fn run(&self) -> Result<(), CommandError> {
        let output = self.checked_output()?;
        relay(std::io::stdout(), &output.stdout);
        relay(std::io::stderr(), &output.stderr);
        Ok(())
    }

    /// Run to completion and return stdout without trailing whitespace
    pub fn output(&self) -> Result<String, CommandError> {
        let output = self.checked_output()?;
        let stdout = String::from_utf8(output.stdout).map_err(|_| CommandError::InvalidUtf8 {
            command: self.redacted(),
        })?;
        Ok(stdout.trim_end().to_owned())
    }

    fn checked_output(&self) -> Result<Output, CommandError> {
        let command = self.redacted();
        log::debug!("running {}", command);
        let output = Command::new(&self.program)
            .args(self.args.iter().map(Arg::as_str))
            .stdin(Stdio::null())
            .output()
            .map_err(|source| CommandError::Spawn {
                command: command.clone(),
                source,
            })?;
        if output.status.success() {
            Ok(output)
        } else {
            let mut captured = String::from_utf8_lossy(&output.stdout).into_owned();
            captured.push_str(&String::from_utf8_lossy(&output.stderr));
            Err(CommandError::Failed {
                command,
                code: output.status.code(),
                output: self.scrub(captured),
            })
        }
    }

    fn scrub(&self, mut text: String) -> String {
        for arg in &self.args {
            if let Arg::Secret(secret) = arg {
                if !secret.is_empty() {
                    text = text.replace(secret.as_str(), REDACTED);
                }
            }
        }
        text
    }
}

fn relay<W: Write>(mut dest: W, bytes: &[u8]) {
    if let Err(err) = dest.write_all(bytes).and_then(|()| dest.flush()) {
        log::warn!("couldn't relay command output: {}", err);
    }
}

impl fmt::Display for Invocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.redacted())
    }
}

impl fmt::Debug for Invocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Invocation({})", self.redacted())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn login() -> Invocation {
        Invocation::new("docker")
            .args(vec!["login", "--username", "janedoe", "--password"])
            .secret("pa55word")
    }

    #[test]
    fn redacted_rendering() {
        let invocation = login();
        assert_eq!(
            invocation.redacted(),
            "docker login --username janedoe --password <password>"
        );
        assert_eq!(invocation.to_string(), invocation.redacted());
        assert!(!format!("{:?}", invocation).contains("pa55word"));
    }

    #[test]
    fn output_is_trimmed() {
        let out = Invocation::new("echo").arg("hello").arg("world").output().unwrap();
        assert_eq!(out, "hello world");
    }

    #[test]
    fn failure_carries_status() {
        match Invocation::new("false").run() {
            Err(CommandError::Failed { command, code, .. }) => {
                assert_eq!(command, "false");
                assert_eq!(code, Some(1));
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn failure_scrubs_secrets() {
        let err = Invocation::new("sh")
            .arg("-c")
            .arg("echo \"$0\"; exit 3")
            .secret("pa55word")
            .run()
            .unwrap_err();
        let message = format!("{} {:?}", err, err);
        assert!(!message.contains("pa55word"), "{}", message);
        assert!(message.contains(REDACTED), "{}", message);
    }

    #[test]
    fn missing_program() {
        let err = Invocation::new("does-not-exist1234")
            .arg("--password")
            .secret("pa55word")
            .run()
            .unwrap_err();
        assert!(matches!(err, CommandError::Spawn { .. }));
        assert!(!err.to_string().contains("pa55word"));
    }
}
