//! Tag suffixes taken from the git checkout

use crate::{command::Invocation, errors::CommandError};
use std::{fmt, str::FromStr};

/// Which piece of git state to use as a tag suffix
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GitSuffix {
    /// Abbreviated hash of the current commit
    Commit,
    /// Name of the current branch
    Branch,
}

impl FromStr for GitSuffix {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "commit" => Ok(GitSuffix::Commit),
            "branch" => Ok(GitSuffix::Branch),
            _ => Err(()),
        }
    }
}

impl fmt::Display for GitSuffix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            GitSuffix::Commit => "commit",
            GitSuffix::Branch => "branch",
        })
    }
}

/// The `git` command line client
#[derive(Debug, Clone)]
pub struct Git {
    executable: String,
}

impl Default for Git {
    fn default() -> Self {
        Git::new(Git::DEFAULT_EXECUTABLE)
    }
}

impl Git {
    pub const DEFAULT_EXECUTABLE: &'static str = "git";

    pub fn new<S: Into<String>>(executable: S) -> Self {
        Git {
            executable: executable.into(),
        }
    }

    pub fn commit(&self) -> Result<String, CommandError> {
        self.rev_parse("--short")
    }

    pub fn branch(&self) -> Result<String, CommandError> {
        self.rev_parse("--abbrev-ref")
    }

    /// Look up the suffix and make it usable in a tag
    pub fn suffix(&self, which: GitSuffix) -> Result<String, CommandError> {
        let raw = match which {
            GitSuffix::Commit => self.commit()?,
            GitSuffix::Branch => self.branch()?,
        };
        let suffix = sanitize_tag(&raw);
        log::debug!("git {} {:?} gives suffix {:?}", which, raw, suffix);
        Ok(suffix)
    }

    fn rev_parse(&self, flag: &str) -> Result<String, CommandError> {
        Invocation::new(&self.executable)
            .arg("rev-parse")
            .arg(flag)
            .arg("HEAD")
            .output()
    }
}

/// Replace every character a tag can't contain with `-`
///
/// ```
/// # use docker_ci_deploy::vcs::sanitize_tag;
/// assert_eq!(sanitize_tag("feature/new_thing-2.0"), "feature-new_thing-2.0");
/// ```
pub fn sanitize_tag(s: &str) -> String {
    s.chars()
        .map(|c| match c {
            'a'..='z' | 'A'..='Z' | '0'..='9' | '_' | '.' | '-' => c,
            _ => '-',
        })
        .collect()
}
