//! Semantic version expansion

use crate::errors::TagError;
use regex::Regex;

/// Expand a version into successively less precise versions
///
/// The last `.` or `-` separated component is stripped off repeatedly, so
/// `1.2.3-alpha` gives `1.2.3-alpha`, `1.2.3`, `1.2`, `1`. The most precise
/// version always comes first.
///
/// `precision` is the fewest components any result may have, and fails with
/// [TagError::InvalidPrecision] when the version has fewer than that. A
/// precision of zero is treated as one.
///
/// Unless `zero` is set, a trailing bare `0` is dropped so pre-1.0 releases
/// don't claim the very generic `0` tag. A version that is just `0` keeps it.
///
/// ```
/// # use docker_ci_deploy::tagging::semver::expand;
/// assert_eq!(expand("5.4.1", 1, false).unwrap(), vec!["5.4.1", "5.4", "5"]);
/// assert_eq!(expand("0.6.11", 1, false).unwrap(), vec!["0.6.11", "0.6"]);
/// assert_eq!(expand("5.4.1", 2, false).unwrap(), vec!["5.4.1", "5.4"]);
/// ```
pub fn expand(version: &str, precision: usize, zero: bool) -> Result<Vec<String>, TagError> {
    lazy_static! {
        static ref LAST_COMPONENT: Regex = Regex::new(r"[.-]?[0-9A-Za-z_]+$").unwrap();
    }

    let mut versions = Vec::new();
    let mut remaining = version;
    while !remaining.is_empty() {
        versions.push(remaining.to_owned());
        match LAST_COMPONENT.find(remaining) {
            Some(m) => remaining = &remaining[..m.start()],
            // Ends in something other than a word character
            None => break,
        }
    }

    let precision = precision.max(1);
    let available = versions.len();
    if precision > available {
        return Err(TagError::InvalidPrecision {
            version: version.to_owned(),
            requested: precision,
            available,
        });
    }
    versions.truncate(available - precision + 1);

    if !zero && versions.len() > 1 && versions.last().map(String::as_str) == Some("0") {
        versions.pop();
    }
    Ok(versions)
}
