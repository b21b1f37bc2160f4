use crate::errors::ImageError;
use regex::Regex;
use std::{fmt, str::FromStr};

/// The path part of an image name, after any registry
///
/// Repository paths are groupings of lowercase alphanumeric segments separated
/// by single slashes. Inside a segment, alphanumeric runs may be joined by a
/// single period, a single underscore, a double underscore, or any number of
/// dashes.
#[derive(Clone, PartialEq, Eq)]
pub struct Repository {
    serialized: String,
}

impl Repository {
    pub fn as_str(&self) -> &str {
        &self.serialized
    }

    /// Parse a [prim@str] as a [Repository]
    ///
    /// ```
    /// # use docker_ci_deploy::image::Repository;
    /// assert!(Repository::parse("praekeltorg/alpine-python").is_ok());
    /// assert!(Repository::parse("Upper/case").is_err());
    /// ```
    pub fn parse(s: &str) -> Result<Self, ImageError> {
        lazy_static! {
            static ref RE: Regex = Regex::new(&format!("^{}$", Repository::regex_str())).unwrap();
        }
        if RE.is_match(s) {
            Ok(Repository {
                serialized: s.to_owned(),
            })
        } else {
            Err(ImageError::InvalidNameFormat(s.to_owned()))
        }
    }

    pub(crate) fn regex_str() -> &'static str {
        concat!(
            "(?P<repo>",
            /*  */ "[a-z0-9]+(?:(?:[._]|__|[-]+)[a-z0-9]+)*", // first segment
            /*  */ "(?:/[a-z0-9]+(?:(?:[._]|__|[-]+)[a-z0-9]+)*)*", // more segments
            ")"
        )
    }
}

impl FromStr for Repository {
    type Err = ImageError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Repository::parse(s)
    }
}

impl fmt::Display for Repository {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Debug for Repository {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Repository({})", self.as_str())
    }
}
