//! Error types you might see while computing tags or running the image tool

use thiserror::Error;

/// Errors while parsing image references and names
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ImageError {
    /// invalid image reference format
    #[error("Unable to parse image reference {0:?}")]
    InvalidReferenceFormat(String),

    /// invalid image name format
    #[error("Unable to parse image name {0:?}")]
    InvalidNameFormat(String),
}

/// Errors while building a tag policy
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TagError {
    /// requested semver precision is more than the version has
    #[error("minimum precision ({requested}) exceeds the precision of {version:?} ({available})")]
    InvalidPrecision {
        version: String,
        requested: usize,
        available: usize,
    },

    /// a policy option needs a version and none was given
    #[error("the {option} option requires a version")]
    MissingVersion { option: &'static str },
}

/// Errors from running an external program
///
/// The `command` field always holds the redacted rendering of the invocation,
/// so credentials never appear in these messages.
#[derive(Error, Debug)]
pub enum CommandError {
    /// the program could not be started
    #[error("failed to start {command:?}: {source}")]
    Spawn {
        command: String,
        #[source]
        source: std::io::Error,
    },

    /// the program exited unsuccessfully
    #[error("command {command:?} exited with {}\n{output}", exit_description(.code))]
    Failed {
        command: String,
        code: Option<i32>,
        output: String,
    },

    /// output from the program was not valid utf8
    #[error("output of {command:?} was not valid utf8")]
    InvalidUtf8 { command: String },
}

fn exit_description(code: &Option<i32>) -> String {
    match code {
        Some(code) => format!("status {}", code),
        None => "no status (terminated by signal)".to_owned(),
    }
}

/// Any error that stops a deployment
#[derive(Error, Debug)]
pub enum DeployError {
    /// image reference error
    #[error(transparent)]
    Image(#[from] ImageError),

    /// tag policy error
    #[error(transparent)]
    Tag(#[from] TagError),

    /// external command error
    #[error(transparent)]
    Command(#[from] CommandError),

    /// the target registry is not a host name with an optional port
    #[error("invalid registry {registry:?}, expected <host>[:<port>]")]
    InvalidRegistry {
        registry: String,
        #[source]
        source: ImageError,
    },

    /// login details are not in the form `<username>:<password>`
    #[error("login details must be in the form <username>:<password>")]
    InvalidLogin,
}
