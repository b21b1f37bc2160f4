//! Image references and the pieces they are made of
//!
//! Parsing follows the Docker reference grammar, anchored to the whole input:
//!
//! ```text
//! reference := name (':' tag)? ('@' digest)?
//! name      := (registry '/')? repository
//! ```


mod digest;
mod name;
mod reference;
mod registry;
mod repository;
mod tag;

pub use digest::ContentDigest;
pub use name::ImageName;
pub use reference::Reference;
pub use registry::Registry;
pub use repository::Repository;
pub use tag::Tag;

/// Join a name and a tag into a reference string
///
/// A missing or empty tag leaves the name as it is.
pub fn join_tag(name: &str, tag: Option<&str>) -> String {
    match tag {
        Some(tag) if !tag.is_empty() => format!("{}:{}", name, tag),
        _ => name.to_owned(),
    }
}

/// Put a registry host in front of a name
pub fn join_registry(registry: &str, name: &str) -> String {
    format!("{}/{}", registry, name)
}
