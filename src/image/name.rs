use crate::{
    errors::ImageError,
    image::{join_registry, Registry, Repository},
};
use regex::Regex;
use std::{fmt, ops::Range, str::FromStr};

/// An image name, without tag or digest
///
/// A name is a [Repository] path optionally preceded by a [Registry] and a
/// slash. The grammar alone can't say whether a leading segment is a registry
/// or part of the path: `myuser/myimage` parses with `myuser` in the registry
/// position, exactly like `registry:5000/myimage` does. Parsing always prefers
/// the registry reading when the first segment fits the hostname grammar and
/// something follows it.
#[derive(Clone, PartialEq, Eq)]
pub struct ImageName {
    serialized: String,
    registry_pos: Option<Range<usize>>,
    repository_pos: Range<usize>,
}

impl ImageName {
    pub fn as_str(&self) -> &str {
        &self.serialized
    }

    /// Parse a [prim@str] as an [ImageName]
    pub fn parse(s: &str) -> Result<Self, ImageError> {
        lazy_static! {
            static ref RE: Regex = Regex::new(&format!(
                "^(?:{}/)?{}$",
                Registry::regex_str(),
                Repository::regex_str()
            ))
            .unwrap();
        }
        match RE.captures(s) {
            None => Err(ImageError::InvalidNameFormat(s.to_owned())),
            Some(captures) => Ok(ImageName {
                serialized: s.to_owned(),
                registry_pos: captures.name("reg").map(|m| m.range()),
                repository_pos: captures.name("repo").unwrap().range(),
            }),
        }
    }

    /// Does this string match the name grammar?
    pub fn is_valid(s: &str) -> bool {
        ImageName::parse(s).is_ok()
    }

    /// Returns the leading hostname-shaped segment, if the parse found one
    pub fn registry_str(&self) -> Option<&str> {
        self.registry_pos
            .as_ref()
            .map(|pos| &self.serialized[pos.clone()])
    }

    /// Returns everything after the registry
    pub fn repository_str(&self) -> &str {
        &self.serialized[self.repository_pos.clone()]
    }

    /// The registry segment as a [Registry], unless its port is out of range
    pub fn registry(&self) -> Option<Registry> {
        self.registry_str().and_then(|s| Registry::parse(s).ok())
    }

    pub fn repository(&self) -> Repository {
        Repository::parse(self.repository_str()).expect("already parsed")
    }

    /// Rewrite a name so it points at another registry
    ///
    /// With no registry the name comes back unchanged. Otherwise the registry
    /// is simply prepended, as long as the result is still a valid name. A
    /// leading segment like `myuser` stays in place, since it may well be part
    /// of the repository path.
    ///
    /// Only when the prepended form is invalid (which is what happens when the
    /// name already starts with a host carrying a port, like
    /// `registry:5000/image`) is the existing registry stripped and replaced.
    ///
    /// ```
    /// # use docker_ci_deploy::image::ImageName;
    /// assert_eq!(ImageName::relocate("bar", Some("registry:5000")).unwrap(), "registry:5000/bar");
    /// assert_eq!(
    ///     ImageName::relocate("registry:5000/bar", Some("registry2:5000")).unwrap(),
    ///     "registry2:5000/bar"
    /// );
    /// ```
    pub fn relocate(name: &str, registry: Option<&str>) -> Result<String, ImageError> {
        let registry = match registry {
            None => return Ok(name.to_owned()),
            Some(registry) => registry,
        };

        let candidate = join_registry(registry, name);
        if ImageName::is_valid(&candidate) {
            return Ok(candidate);
        }

        log::debug!(
            "{:?} is not a valid name, replacing the registry of {:?} instead",
            candidate,
            name
        );
        let parsed = ImageName::parse(name)?;
        Ok(join_registry(registry, parsed.repository_str()))
    }
}

impl FromStr for ImageName {
    type Err = ImageError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ImageName::parse(s)
    }
}

impl fmt::Display for ImageName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Debug for ImageName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ImageName({})", self.as_str())
    }
}
