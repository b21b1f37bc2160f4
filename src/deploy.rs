//! Computing the full set of references and publishing them

use crate::{
    docker::{Credentials, ImageTool},
    errors::DeployError,
    image::{join_tag, ImageName, Reference, Registry},
    sink::Sink,
    tagging::TagPolicy,
};

/// Every input image paired with the references it will be published as
///
/// Both the images and each image's references keep the order they were
/// given and generated in.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TagMap {
    entries: Vec<(String, Vec<String>)>,
}

impl TagMap {
    /// Work out the output references for each image
    ///
    /// Each image is parsed, moved to `registry` if one is given, and then
    /// has its tag replaced by everything `policy` generates from it.
    pub fn build<S: AsRef<str>>(
        images: &[S],
        policy: &TagPolicy,
        registry: Option<&str>,
    ) -> Result<Self, DeployError> {
        if let Some(registry) = registry {
            Registry::parse(registry).map_err(|source| DeployError::InvalidRegistry {
                registry: registry.to_owned(),
                source,
            })?;
        }
        let mut entries = Vec::with_capacity(images.len());
        for image in images {
            let image = image.as_ref();
            let reference = Reference::parse(image)?;
            let name = ImageName::relocate(reference.name_str(), registry)?;
            let outputs = policy
                .compose(reference.tag_str())
                .iter()
                .map(|tag| join_tag(&name, tag.as_deref()))
                .collect();
            entries.push((image.to_owned(), outputs));
        }
        Ok(TagMap { entries })
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.entries
            .iter()
            .map(|(source, outputs)| (source.as_str(), outputs.as_slice()))
    }

    /// All output references, in push order
    pub fn outputs(&self) -> impl Iterator<Item = &str> {
        self.entries
            .iter()
            .flat_map(|(_, outputs)| outputs.iter().map(String::as_str))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Tags, logs in, and pushes using an [ImageTool]
///
/// All the renames happen first, then at most one login, then every push.
/// The first failure stops everything.
pub struct Deployer<T: ImageTool, S: Sink> {
    tool: T,
    sink: S,
    verbose: bool,
}

impl<T: ImageTool, S: Sink> Deployer<T, S> {
    pub fn new(tool: T, sink: S) -> Self {
        Deployer {
            tool,
            sink,
            verbose: false,
        }
    }

    /// Describe each step on the sink before running it
    pub fn verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    pub fn tool(&self) -> &T {
        &self.tool
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn into_parts(self) -> (T, S) {
        (self.tool, self.sink)
    }

    /// Compute the [TagMap] for `images` and publish it
    pub fn run<I: AsRef<str>>(
        &mut self,
        images: &[I],
        policy: &TagPolicy,
        registry: Option<&str>,
        login: Option<&Credentials>,
    ) -> Result<TagMap, DeployError> {
        let tags = TagMap::build(images, policy, registry)?;
        self.publish(&tags, registry, login)?;
        Ok(tags)
    }

    /// Publish an already computed [TagMap]
    pub fn publish(
        &mut self,
        tags: &TagMap,
        registry: Option<&str>,
        login: Option<&Credentials>,
    ) -> Result<(), DeployError> {
        for (source, outputs) in tags.iter() {
            for output in outputs {
                if output == source {
                    self.progress(format!("Not tagging \"{}\" as itself", source));
                    continue;
                }
                self.progress(format!("Tagging \"{}\" as \"{}\"...", source, output));
                self.tool.rename(&mut self.sink, source, output)?;
            }
        }

        if let Some(login) = login {
            self.progress(format!("Logging in as \"{}\"...", login.username()));
            self.tool.login(&mut self.sink, login, registry)?;
        }

        for output in tags.outputs() {
            self.progress(format!("Pushing tag \"{}\"...", output));
            self.tool.push(&mut self.sink, output)?;
        }
        Ok(())
    }

    fn progress(&mut self, line: String) {
        log::info!("{}", line);
        if self.verbose {
            self.sink.line(&line);
        }
    }
}
