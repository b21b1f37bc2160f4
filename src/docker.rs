//! The container tool that actually tags, logs in, and pushes

use crate::{
    command::{Invocation, REDACTED},
    errors::{CommandError, DeployError},
    sink::Sink,
};
use std::{fmt, str::FromStr};

/// Registry login details
///
/// The password is never shown: `Debug` prints a placeholder in its place.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    username: String,
    password: String,
}

impl Credentials {
    pub fn new<U: Into<String>, P: Into<String>>(username: U, password: P) -> Self {
        Credentials {
            username: username.into(),
            password: password.into(),
        }
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn password(&self) -> &str {
        &self.password
    }
}

/// Parse `<username>:<password>`, splitting at the first colon
///
/// ```
/// # use docker_ci_deploy::docker::Credentials;
/// let login: Credentials = "janedoe:pa55:word".parse().unwrap();
/// assert_eq!(login.username(), "janedoe");
/// assert_eq!(login.password(), "pa55:word");
/// assert!("janedoe".parse::<Credentials>().is_err());
/// ```
impl FromStr for Credentials {
    type Err = DeployError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.split_once(':') {
            Some((username, password)) => Ok(Credentials::new(username, password)),
            None => Err(DeployError::InvalidLogin),
        }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &REDACTED)
            .finish()
    }
}

/// Operations a deployment needs from the container tool
///
/// Implementations that only describe what they would do write their
/// description to the given sink.
pub trait ImageTool {
    /// Give the image at `source` the additional reference `destination`
    fn rename(
        &mut self,
        sink: &mut dyn Sink,
        source: &str,
        destination: &str,
    ) -> Result<(), CommandError>;

    /// Log in to `registry`, or the tool's default registry
    fn login(
        &mut self,
        sink: &mut dyn Sink,
        credentials: &Credentials,
        registry: Option<&str>,
    ) -> Result<(), CommandError>;

    /// Upload the image at `reference`
    fn push(&mut self, sink: &mut dyn Sink, reference: &str) -> Result<(), CommandError>;
}

/// The `docker` command line client, or anything that takes the same
/// arguments
#[derive(Debug, Clone)]
pub struct Docker {
    executable: String,
    dry_run: bool,
}

impl Default for Docker {
    fn default() -> Self {
        Docker::new()
    }
}

impl Docker {
    pub const DEFAULT_EXECUTABLE: &'static str = "docker";

    pub fn new() -> Self {
        Docker {
            executable: Docker::DEFAULT_EXECUTABLE.to_owned(),
            dry_run: false,
        }
    }

    /// Run a different program in place of `docker`
    pub fn executable<S: Into<String>>(mut self, executable: S) -> Self {
        self.executable = executable.into();
        self
    }

    /// Print each command instead of running it
    pub fn dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    fn invoke(&self, sink: &mut dyn Sink, invocation: Invocation) -> Result<(), CommandError> {
        if self.dry_run {
            sink.line(&invocation.redacted());
            Ok(())
        } else {
            invocation.run()
        }
    }
}

impl ImageTool for Docker {
    fn rename(
        &mut self,
        sink: &mut dyn Sink,
        source: &str,
        destination: &str,
    ) -> Result<(), CommandError> {
        let invocation = Invocation::new(&self.executable)
            .arg("tag")
            .arg(source)
            .arg(destination);
        self.invoke(sink, invocation)
    }

    fn login(
        &mut self,
        sink: &mut dyn Sink,
        credentials: &Credentials,
        registry: Option<&str>,
    ) -> Result<(), CommandError> {
        let invocation = Invocation::new(&self.executable)
            .arg("login")
            .arg("--username")
            .arg(credentials.username())
            .arg("--password")
            .secret(credentials.password())
            .args(registry);
        self.invoke(sink, invocation)
    }

    fn push(&mut self, sink: &mut dyn Sink, reference: &str) -> Result<(), CommandError> {
        let invocation = Invocation::new(&self.executable).arg("push").arg(reference);
        self.invoke(sink, invocation)
    }
}
