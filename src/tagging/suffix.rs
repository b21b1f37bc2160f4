use super::TagGenerator;
use crate::image::Tag;

/// Appends a branch name or commit hash to each tag
///
/// An absent tag, `latest`, or a tag that is already the suffix becomes the
/// bare suffix. A tag already ending in `-<suffix>` is left alone.
#[derive(Debug, Clone)]
pub struct SuffixTags {
    suffix: String,
}

impl SuffixTags {
    pub fn new(suffix: String) -> Self {
        SuffixTags { suffix }
    }

    pub fn suffix(&self) -> &str {
        &self.suffix
    }
}

impl TagGenerator for SuffixTags {
    fn generate(&self, tag: Option<&str>) -> Vec<String> {
        let tag = match tag {
            None => return vec![self.suffix.clone()],
            Some(tag) if tag == Tag::LATEST || tag == self.suffix => {
                return vec![self.suffix.clone()]
            }
            Some(tag) => tag,
        };
        let already_suffixed = tag
            .strip_suffix(self.suffix.as_str())
            .map_or(false, |rest| rest.ends_with('-'));
        if already_suffixed {
            vec![tag.to_owned()]
        } else {
            vec![format!("{}-{}", tag, self.suffix)]
        }
    }
}
