use super::TagGenerator;

/// Throws away the existing tag in favour of a fixed list
#[derive(Debug, Clone)]
pub struct ReplacementTags {
    tags: Vec<String>,
}

impl ReplacementTags {
    /// Panics if `tags` is empty, since a stage must always produce a tag
    pub fn new(tags: Vec<String>) -> Self {
        assert!(!tags.is_empty(), "replacement tag list is empty");
        ReplacementTags { tags }
    }
}

impl TagGenerator for ReplacementTags {
    fn generate(&self, _tag: Option<&str>) -> Vec<String> {
        self.tags.clone()
    }
}
