//! Link specifications: names, PD codes and braid words.
//!
//! A specification is one string:
//!
//! - a list of 4-element lists is a PD code, `[[1,4,2,5],[3,6,4,1],[5,2,6,3]]`;
//! - a list of integers is a braid word, `[1,1,1,-2,-2,-2]`;
//! - anything that is not a list is a link name, resolved through
//!   [`crate::knot_table`].
//!
//! Parentheses are accepted in place of brackets, so tuple-style PD codes
//! `[(1,4,2,5), ...]` parse as well. Braid words are closed and simplified
//! on resolution.

use std::path::{Path, PathBuf};

use ribbon_kernel::carrier::braid::braid_closure;
use ribbon_kernel::carrier::diagram::{Crossing, DiagramError, LinkDiagram};
use ribbon_kernel::invariants::simplify::simplify;
use ribbon_search::env::NamedLinkV1;

use crate::knot_table;

/// Error while reading or resolving link specifications.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputError {
    /// The link file could not be read.
    Io { path: PathBuf, detail: String },
    /// The specification is a list but neither a PD code nor a braid word.
    Malformed { spec: String, detail: String },
    /// The name is not in the built-in table.
    UnknownName { name: String },
    /// The PD code or braid word does not describe a valid diagram.
    InvalidDiagram { spec: String, source: DiagramError },
}

impl std::fmt::Display for InputError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io { path, detail } => write!(f, "cannot read {}: {detail}", path.display()),
            Self::Malformed { spec, detail } => write!(f, "malformed link {spec}: {detail}"),
            Self::UnknownName { name } => write!(f, "unknown link name {name:?}"),
            Self::InvalidDiagram { spec, source } => write!(f, "invalid diagram {spec}: {source}"),
        }
    }
}

impl std::error::Error for InputError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::InvalidDiagram { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// What a specification describes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LinkSource {
    Name(String),
    Pd(Vec<Crossing>),
    Braid(Vec<i32>),
}

/// A parsed specification and the text it came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkSpec {
    /// Display name: the link name, or the trimmed input text.
    pub label: String,
    pub source: LinkSource,
}

impl LinkSpec {
    /// Parse one specification.
    ///
    /// # Errors
    ///
    /// Returns [`InputError::Malformed`] for a list that is neither a PD
    /// code nor a braid word.
    pub fn parse(text: &str) -> Result<Self, InputError> {
        let label = text.trim().to_string();
        let json = label.replace('(', "[").replace(')', "]");
        let source = match serde_json::from_str::<serde_json::Value>(&json) {
            Ok(serde_json::Value::Array(items)) => parse_list(&label, &items)?,
            _ => LinkSource::Name(label.clone()),
        };
        Ok(Self { label, source })
    }

    /// Build the diagram this specification names.
    ///
    /// # Errors
    ///
    /// - [`InputError::UnknownName`] for a name not in the table.
    /// - [`InputError::InvalidDiagram`] for a bad PD code or braid word.
    pub fn resolve(&self) -> Result<NamedLinkV1, InputError> {
        let invalid = |source| InputError::InvalidDiagram {
            spec: self.label.clone(),
            source,
        };
        let diagram = match &self.source {
            LinkSource::Name(name) => knot_table::lookup(name)
                .map_err(invalid)?
                .ok_or_else(|| InputError::UnknownName { name: name.clone() })?,
            LinkSource::Pd(crossings) => LinkDiagram::from_pd(crossings.clone()).map_err(invalid)?,
            LinkSource::Braid(word) => simplify(&braid_closure(word).map_err(invalid)?),
        };
        Ok(NamedLinkV1::new(self.label.clone(), diagram))
    }
}

fn parse_list(spec: &str, items: &[serde_json::Value]) -> Result<LinkSource, InputError> {
    let malformed = |detail: &str| InputError::Malformed {
        spec: spec.to_string(),
        detail: detail.to_string(),
    };
    if items.iter().all(serde_json::Value::is_array) && !items.is_empty() {
        let crossings = items
            .iter()
            .map(|item| {
                let labels = item
                    .as_array()
                    .ok_or_else(|| malformed("PD entry is not a list"))?
                    .iter()
                    .map(|v| {
                        v.as_u64()
                            .and_then(|n| u32::try_from(n).ok())
                            .ok_or_else(|| malformed("PD labels must be non-negative integers"))
                    })
                    .collect::<Result<Vec<u32>, InputError>>()?;
                Crossing::try_from(labels).map_err(|_| malformed("PD entries need 4 labels"))
            })
            .collect::<Result<Vec<Crossing>, InputError>>()?;
        return Ok(LinkSource::Pd(crossings));
    }
    let word = items
        .iter()
        .map(|v| {
            v.as_i64()
                .and_then(|n| i32::try_from(n).ok())
                .ok_or_else(|| malformed("expected a PD code or a braid word of integers"))
        })
        .collect::<Result<Vec<i32>, InputError>>()?;
    Ok(LinkSource::Braid(word))
}

/// Parse one specification per line. Blank lines and `#` comments are
/// skipped.
///
/// # Errors
///
/// Returns the first [`InputError`] from [`LinkSpec::parse`].
pub fn parse_lines(text: &str) -> Result<Vec<LinkSpec>, InputError> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(LinkSpec::parse)
        .collect()
}

/// Read a link file, one specification per line.
///
/// # Errors
///
/// Returns [`InputError::Io`] if the file cannot be read, or a parse error.
pub fn read_link_file(path: &Path) -> Result<Vec<LinkSpec>, InputError> {
    let text = std::fs::read_to_string(path).map_err(|e| InputError::Io {
        path: path.to_path_buf(),
        detail: e.to_string(),
    })?;
    parse_lines(&text)
}

/// Resolve every specification, in order.
///
/// # Errors
///
/// Returns the first resolution failure.
pub fn resolve_all(specs: &[LinkSpec]) -> Result<Vec<NamedLinkV1>, InputError> {
    specs.iter().map(LinkSpec::resolve).collect()
}
