//! Turning one existing tag into the list of tags to publish
//!
//! A [TagPolicy] is a fixed sequence of [TagGenerator] stages. The first stage
//! sees the tag the input image already has; each later stage runs over every
//! tag the previous one produced, and the results are flattened in order:
//!
//! ```text
//! replacement tags -> branch/commit suffix -> version (and semver)
//! ```
//!
//! ```
//! # use docker_ci_deploy::tagging::TagPolicy;
//! let policy = TagPolicy::builder()
//!     .version("1.2.3")
//!     .semver(1, false)
//!     .latest(true)
//!     .build()
//!     .unwrap();
//! assert_eq!(
//!     policy.compose(Some("alpine")),
//!     vec![
//!         Some("1.2.3-alpine".to_owned()),
//!         Some("1.2-alpine".to_owned()),
//!         Some("1-alpine".to_owned()),
//!         Some("alpine".to_owned()),
//!     ]
//! );
//! ```


mod replace;
pub mod semver;
mod suffix;
mod version;

pub use replace::ReplacementTags;
pub use suffix::SuffixTags;
pub use version::VersionTags;

use crate::{errors::TagError, image::Tag};
use std::fmt;

/// One stage of tag generation
///
/// Given a single tag (or none, for a reference without one), produce the tags
/// that should replace it. Implementations must always return at least one
/// tag, and must be pure: the same input always gives the same list.
pub trait TagGenerator: fmt::Debug {
    fn generate(&self, tag: Option<&str>) -> Vec<String>;
}

/// An immutable, ordered pipeline of [TagGenerator] stages
#[derive(Debug, Default)]
pub struct TagPolicy {
    stages: Vec<Box<dyn TagGenerator>>,
}

impl TagPolicy {
    /// Start describing a policy from command line style options
    pub fn builder() -> TagPolicyBuilder {
        TagPolicyBuilder::default()
    }

    /// A policy from arbitrary stages, run in the order given
    pub fn from_stages(stages: Vec<Box<dyn TagGenerator>>) -> Self {
        TagPolicy { stages }
    }

    /// Compute the output tags for one existing tag
    ///
    /// The result is never empty. A `None` entry only appears when the policy
    /// has no stages and the input had no tag; it means the output reference
    /// has no tag either.
    pub fn compose(&self, tag: Option<&str>) -> Vec<Option<String>> {
        let mut tags = vec![tag.map(str::to_owned)];
        for stage in &self.stages {
            tags = tags
                .iter()
                .flat_map(|tag| stage.generate(tag.as_deref()))
                .map(Some)
                .collect();
        }
        tags
    }
}

/// Semantic version expansion options
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Semver {
    /// Fewest version components any generated version may have
    pub precision: usize,
    /// Keep a bare major version of `0`
    pub zero: bool,
}

/// Builder for [TagPolicy], checking that options which depend on a version
/// actually have one
#[derive(Debug, Clone, Default)]
pub struct TagPolicyBuilder {
    tags: Vec<String>,
    suffix: Option<String>,
    version: Option<String>,
    semver: Option<Semver>,
    latest: bool,
}

impl TagPolicyBuilder {
    /// Replace the existing tag with these tags
    pub fn tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags.extend(tags.into_iter().map(Into::into));
        self
    }

    /// Append a branch or commit suffix to every tag
    pub fn suffix<S: Into<String>>(mut self, suffix: S) -> Self {
        self.suffix = Some(suffix.into()).filter(|s: &String| !s.is_empty());
        self
    }

    /// Prefix every tag with a version
    ///
    /// An empty version is the same as no version.
    pub fn version<S: Into<String>>(mut self, version: S) -> Self {
        self.version = Some(version.into()).filter(|v: &String| !v.is_empty());
        self
    }

    /// Expand the version into one tag per precision level
    pub fn semver(mut self, precision: usize, zero: bool) -> Self {
        self.semver = Some(Semver { precision, zero });
        self
    }

    /// Also publish the tag without the version
    pub fn latest(mut self, latest: bool) -> Self {
        self.latest = latest;
        self
    }

    pub fn build(self) -> Result<TagPolicy, TagError> {
        if self.version.is_none() {
            if self.latest {
                return Err(TagError::MissingVersion { option: "latest" });
            }
            if self.semver.is_some() {
                return Err(TagError::MissingVersion { option: "semver" });
            }
        }

        let mut stages: Vec<Box<dyn TagGenerator>> = Vec::new();
        if !self.tags.is_empty() {
            stages.push(Box::new(ReplacementTags::new(self.tags)));
        }
        if let Some(suffix) = &self.suffix {
            stages.push(Box::new(SuffixTags::new(suffix.clone())));
        }
        if let Some(version) = self.version {
            let versions = match self.semver {
                Some(Semver { precision, zero }) => semver::expand(&version, precision, zero)?,
                None => vec![version],
            };
            let mut stage = VersionTags::new(versions);
            if self.latest {
                let floating = self.suffix.unwrap_or_else(|| Tag::LATEST.to_owned());
                stage = stage.floating(floating);
            }
            stages.push(Box::new(stage));
        }

        log::debug!("tag policy with {} stages", stages.len());
        Ok(TagPolicy { stages })
    }
}
