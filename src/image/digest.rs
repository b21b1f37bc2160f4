use crate::errors::ImageError;
use regex::Regex;
use std::{fmt, ops::Range, str::FromStr};

/// A content digest suffix, such as `sha256:` followed by hex
///
/// Digests are recognised so a reference can be split correctly, and are
/// otherwise carried through untouched.
#[derive(Clone, PartialEq, Eq)]
pub struct ContentDigest {
    serialized: String,
    algorithm_pos: Range<usize>,
    hex_pos: Range<usize>,
}

impl ContentDigest {
    /// Returns a reference to the existing string representation
    ///
    /// This string always has a single colon. After the colon are 32 or more
    /// hexadecimal digits. The algorithm before the colon is alphanumeric
    /// starting with a letter, with plus, dash, underscore, or dot characters
    /// allowed as separators between groups.
    pub fn as_str(&self) -> &str {
        &self.serialized
    }

    /// Parse a [prim@str] as a [ContentDigest]
    ///
    /// ```
    /// # use docker_ci_deploy::image::ContentDigest;
    /// let digest = ContentDigest::parse("sha256:00112233445566778899aabbccddeeff").unwrap();
    /// assert_eq!(digest.algorithm_str(), "sha256");
    /// assert_eq!(digest.hex_str(), "00112233445566778899aabbccddeeff")
    /// ```
    pub fn parse(s: &str) -> Result<Self, ImageError> {
        lazy_static! {
            static ref RE: Regex =
                Regex::new(&format!("^{}$", ContentDigest::regex_str())).unwrap();
        }
        match RE.captures(s) {
            None => Err(ImageError::InvalidReferenceFormat(s.to_owned())),
            Some(captures) => Ok(ContentDigest {
                serialized: s.to_owned(),
                algorithm_pos: captures.name("dig_a").unwrap().range(),
                hex_pos: captures.name("dig_h").unwrap().range(),
            }),
        }
    }

    pub fn algorithm_str(&self) -> &str {
        &self.serialized[self.algorithm_pos.clone()]
    }

    pub fn hex_str(&self) -> &str {
        &self.serialized[self.hex_pos.clone()]
    }

    pub(crate) fn regex_str() -> &'static str {
        concat!(
            "(?P<dig>",
            /*  */ "(?P<dig_a>",
            /* -- */ "[a-zA-Z][a-zA-Z0-9]*",
            /* -- */ "(?:[-_+.][a-zA-Z][a-zA-Z0-9]*)*",
            /*  */ ")",
            /*  */ ":",
            /*  */ "(?P<dig_h>[a-fA-F0-9]{32,})",
            ")",
        )
    }
}

impl FromStr for ContentDigest {
    type Err = ImageError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ContentDigest::parse(s)
    }
}

impl fmt::Display for ContentDigest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Debug for ContentDigest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ContentDigest({})", self.as_str())
    }
}
