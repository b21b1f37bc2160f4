use super::TagGenerator;
use crate::image::Tag;

/// Prefixes tags with one or more versions
///
/// The versions are ordered most precise first, like the output of
/// [super::semver::expand]. A tag that already starts with one of them is
/// stripped back to its remainder first, so tags are never versioned twice.
///
/// An empty remainder, no tag at all, and the tag `latest` all mean the same
/// thing here: the bare versions are produced. One consequence is that
/// `<version>-latest` can never come out of this stage, even with a floating
/// tag requested.
#[derive(Debug, Clone)]
pub struct VersionTags {
    versions: Vec<String>,
    floating: Option<String>,
}

impl VersionTags {
    /// Panics if `versions` is empty
    pub fn new(versions: Vec<String>) -> Self {
        assert!(!versions.is_empty(), "version list is empty");
        VersionTags {
            versions,
            floating: None,
        }
    }

    /// Also produce an unversioned tag
    ///
    /// That is the remainder of the input tag when there is one, otherwise
    /// `floating` itself (normally `latest`).
    pub fn floating<S: Into<String>>(mut self, floating: S) -> Self {
        self.floating = Some(floating.into());
        self
    }

    pub fn versions(&self) -> &[String] {
        &self.versions
    }

    fn remainder<'a>(&self, tag: Option<&'a str>) -> &'a str {
        let tag = match tag {
            None => return "",
            Some(tag) => tag,
        };
        let stripped = self.versions.iter().find_map(|version| {
            if tag == version {
                Some("")
            } else {
                tag.strip_prefix(version.as_str())
                    .and_then(|rest| rest.strip_prefix('-'))
            }
        });
        match stripped.unwrap_or(tag) {
            Tag::LATEST => "",
            remainder => remainder,
        }
    }
}

impl TagGenerator for VersionTags {
    fn generate(&self, tag: Option<&str>) -> Vec<String> {
        let remainder = self.remainder(tag);
        let mut tags: Vec<String> = if remainder.is_empty() {
            self.versions.clone()
        } else {
            self.versions
                .iter()
                .map(|version| format!("{}-{}", version, remainder))
                .collect()
        };
        if let Some(floating) = &self.floating {
            tags.push(if remainder.is_empty() {
                floating.clone()
            } else {
                remainder.to_owned()
            });
        }
        tags
    }
}
