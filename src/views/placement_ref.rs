//! Placement references
//!
//! Placements are namespaced, and routes address them as `namespace/name`.
//! [`PlacementRef::parse`] is the parse used at the command-line boundary.
//! Client calls still accept a concatenated `name` and go through
//! [`normalize_placement_params`], which marks a namespace it has already
//! derived with the `_PARSED_` sentinel so it is never split twice.

use std::fmt;
use thiserror::Error;

/// Suffix marking a namespace that was split out of a `namespace/name` value
pub const PARSED_SENTINEL: &str = "_PARSED_";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PlacementRefError {
    #[error("placement reference is empty")]
    Empty,

    #[error("placement '{0}' needs a namespace: use namespace/name or --namespace")]
    MissingNamespace(String),

    #[error("placement reference '{0}' has an empty namespace or name")]
    Malformed(String),
}

/// A fully qualified placement
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PlacementRef {
    pub namespace: String,
    pub name: String,
}

impl PlacementRef {
    pub fn new(namespace: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            namespace: namespace.into(),
            name: name.into(),
        }
    }

    /// Parse a `namespace/name` route value
    pub fn parse(route: &str) -> Result<Self, PlacementRefError> {
        Self::resolve(route, None)
    }

    /// Parse `namespace/name`, or a bare name qualified by `namespace`
    ///
    /// A namespace embedded in the route wins over the flag.
    pub fn resolve(route: &str, namespace: Option<&str>) -> Result<Self, PlacementRefError> {
        let route = route.trim();
        if route.is_empty() {
            return Err(PlacementRefError::Empty);
        }

        match route.split_once('/') {
            Some((ns, name)) if !ns.is_empty() && !name.is_empty() => Ok(Self::new(ns, name)),
            Some(_) => Err(PlacementRefError::Malformed(route.to_string())),
            None => match namespace.filter(|ns| !ns.is_empty()) {
                Some(ns) => Ok(Self::new(ns, route)),
                None => Err(PlacementRefError::MissingNamespace(route.to_string())),
            },
        }
    }

    /// Clean pair from client parameters that may carry `namespace/name`
    pub fn from_params(namespace: &str, name: &str) -> Self {
        let (namespace, name) = normalize_placement_params(namespace, name);
        let namespace = namespace
            .strip_suffix(PARSED_SENTINEL)
            .map(str::to_string)
            .unwrap_or(namespace);
        Self { namespace, name }
    }
}

impl fmt::Display for PlacementRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.namespace, self.name)
    }
}

/// Split a `namespace/name` value passed as `name`
///
/// The returned namespace carries the sentinel when it was derived here.
/// A namespace that already carries it is returned untouched, and its name
/// is never re-split.
pub fn normalize_placement_params(namespace: &str, name: &str) -> (String, String) {
    if !namespace.ends_with(PARSED_SENTINEL) {
        if let Some((ns, rest)) = name.split_once('/') {
            return (format!("{}{}", ns, PARSED_SENTINEL), rest.to_string());
        }
    }
    (namespace.to_string(), name.to_string())
}
