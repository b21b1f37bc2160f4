use crate::errors::ImageError;
use regex::Regex;
use std::{fmt, ops::Range, str::FromStr};

/// Network address of an image registry: a hostname with an optional port
///
/// Hostname components are mixed-case alphanumeric with internal dashes,
/// joined by single dots. A registry is the first path segment of a fully
/// qualified [crate::image::ImageName], but nothing here can tell a registry
/// apart from a repository path segment like `myuser`; that ambiguity is
/// resolved by [crate::image::ImageName::relocate].
#[derive(Clone, PartialEq, Eq)]
pub struct Registry {
    serialized: String,
    domain_pos: Range<usize>,
    port: Option<u16>,
}

impl Registry {
    pub fn as_str(&self) -> &str {
        &self.serialized
    }

    /// Parse a [prim@str] as a [Registry]
    ///
    /// ```
    /// # use docker_ci_deploy::image::Registry;
    /// let registry = Registry::parse("registry.example.com:5000").unwrap();
    /// assert_eq!(registry.domain_str(), "registry.example.com");
    /// assert_eq!(registry.port(), Some(5000));
    /// ```
    pub fn parse(s: &str) -> Result<Self, ImageError> {
        lazy_static! {
            static ref RE: Regex = Regex::new(&format!("^{}$", Registry::regex_str())).unwrap();
        }
        let invalid = || ImageError::InvalidNameFormat(s.to_owned());
        let captures = RE.captures(s).ok_or_else(invalid)?;
        let port = match captures.name("reg_p") {
            // Digits only, but may still overflow a u16
            Some(m) => Some(m.as_str().parse().map_err(|_| invalid())?),
            None => None,
        };
        Ok(Registry {
            serialized: s.to_owned(),
            domain_pos: captures.name("reg_d").unwrap().range(),
            port,
        })
    }

    /// The hostname without any port
    pub fn domain_str(&self) -> &str {
        &self.serialized[self.domain_pos.clone()]
    }

    pub fn port(&self) -> Option<u16> {
        self.port
    }

    pub(crate) fn regex_str() -> &'static str {
        concat!(
            "(?P<reg>",
            /*  */ "(?P<reg_d>",
            /* -- */ "(?:[a-zA-Z0-9]|[a-zA-Z0-9][a-zA-Z0-9-]*[a-zA-Z0-9])",
            /* -- */ "(?:", // more dot-separated components
            /* -- -- */ "\\.",
            /* -- -- */ "(?:[a-zA-Z0-9]|[a-zA-Z0-9][a-zA-Z0-9-]*[a-zA-Z0-9])",
            /* -- */ ")*",
            /*  */ ")",
            /*  */ "(?::(?P<reg_p>[0-9]+))?", // port
            ")",
        )
    }
}

impl FromStr for Registry {
    type Err = ImageError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Registry::parse(s)
    }
}

impl fmt::Display for Registry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Debug for Registry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Registry({})", self.as_str())
    }
}
