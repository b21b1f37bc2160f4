use crate::{
    errors::ImageError,
    image::{ContentDigest, ImageName, Registry, Repository, Tag},
};
use regex::Regex;
use std::{fmt, ops::Range, str::FromStr};

/// Parsed Docker-style image reference
///
/// A reference has the form `[registry/]path[:tag][@digest]`. Only the name
/// (registry and path) is mandatory. The [Tag] always begins with a `:` and
/// the [ContentDigest] with an `@`.
///
/// An absent tag is kept distinct from an empty one: `name:` does not parse,
/// and `name` parses with no tag at all.
#[derive(Clone, PartialEq, Eq)]
pub struct Reference {
    serialized: String,
    name_pos: Range<usize>,
    tag_pos: Option<Range<usize>>,
    digest_pos: Option<Range<usize>>,
}

impl Reference {
    pub fn as_str(&self) -> &str {
        &self.serialized
    }

    /// Parse a [prim@str] as a [Reference]
    ///
    /// The whole string must match; a port after the registry host is never
    /// mistaken for a tag because tags can't be followed by a slash.
    ///
    /// ```
    /// # use docker_ci_deploy::image::Reference;
    /// let reference = Reference::parse("registry.example.com:5000/user/name:tag").unwrap();
    /// assert_eq!(reference.name_str(), "registry.example.com:5000/user/name");
    /// assert_eq!(reference.tag_str(), Some("tag"));
    /// ```
    pub fn parse(s: &str) -> Result<Self, ImageError> {
        lazy_static! {
            static ref RE: Regex = Regex::new(&format!(
                "^(?P<name>(?:{}/)?{})(?::{})?(?:@{})?$",
                Registry::regex_str(),
                Repository::regex_str(),
                Tag::regex_str(),
                ContentDigest::regex_str()
            ))
            .unwrap();
        }
        match RE.captures(s) {
            None => Err(ImageError::InvalidReferenceFormat(s.to_owned())),
            Some(captures) => Ok(Reference {
                serialized: s.to_owned(),
                name_pos: captures.name("name").unwrap().range(),
                tag_pos: captures.name("tag").map(|m| m.range()),
                digest_pos: captures.name("dig").map(|m| m.range()),
            }),
        }
    }

    /// Build a [Reference] from its component pieces
    ///
    /// Fails if any piece is invalid, or if the joined string would parse back
    /// into different pieces.
    pub fn from_parts(
        name: &str,
        tag: Option<&str>,
        digest: Option<&str>,
    ) -> Result<Self, ImageError> {
        let mut combined = super::join_tag(name, tag);
        if let Some(digest) = digest {
            combined.push('@');
            combined.push_str(digest);
        }
        let parsed = Reference::parse(&combined)?;
        if parsed.as_parts() == (name, tag, digest) {
            Ok(parsed)
        } else {
            Err(ImageError::InvalidReferenceFormat(combined))
        }
    }

    /// Return references to the parsed name, tag, and digest
    pub fn as_parts(&self) -> (&str, Option<&str>, Option<&str>) {
        (self.name_str(), self.tag_str(), self.content_digest_str())
    }

    /// Everything before the tag and digest
    pub fn name_str(&self) -> &str {
        &self.serialized[self.name_pos.clone()]
    }

    pub fn tag_str(&self) -> Option<&str> {
        self.tag_pos.as_ref().map(|pos| &self.serialized[pos.clone()])
    }

    pub fn content_digest_str(&self) -> Option<&str> {
        self.digest_pos
            .as_ref()
            .map(|pos| &self.serialized[pos.clone()])
    }

    pub fn name(&self) -> ImageName {
        ImageName::parse(self.name_str()).expect("already parsed")
    }

    pub fn tag(&self) -> Option<Tag> {
        self.tag_str().map(|s| Tag::parse(s).expect("already parsed"))
    }

    pub fn content_digest(&self) -> Option<ContentDigest> {
        self.content_digest_str()
            .map(|s| ContentDigest::parse(s).expect("already parsed"))
    }
}

impl FromStr for Reference {
    type Err = ImageError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Reference::parse(s)
    }
}

impl fmt::Display for Reference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Debug for Reference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Reference({})", self.as_str())
    }
}
