//! Wildcard scope matching

use crate::error::{RbacError, Result};

/// Decides whether a granted scope covers a requested concrete scope.
///
/// An exact string match always succeeds. A granted scope ending in the
/// wildcard marker `*` matches any requested scope sharing its literal
/// prefix up to the marker. Matching is case-sensitive and byte-exact on
/// the prefix.
///
/// An empty requested scope denotes an action that is not
/// scope-restricted; it matches trivially. A `*` anywhere but the trailing
/// position of the granted scope is a [`RbacError::MalformedScopePattern`],
/// surfaced at the point of matching rather than silently ignored.
pub fn matches(granted: &str, requested: &str) -> Result<bool> {
    if requested.is_empty() {
        return Ok(true);
    }

    match granted.find('*') {
        None => Ok(granted == requested),
        Some(marker) if marker + 1 == granted.len() => {
            Ok(requested.as_bytes().starts_with(granted[..marker].as_bytes()))
        }
        Some(_) => Err(RbacError::MalformedScopePattern(granted.to_string())),
    }
}
