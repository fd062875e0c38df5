//! Solved-diagram artifacts.
//!
//! One JSON file per solved link:
//!
//! ```text
//! <dir>/
//!   000_6_1.json   -- original and final oriented PD, band string, history,
//!                    fingerprints
//!   001_square.json
//! ```
//!
//! Files are written with sorted keys and a trailing newline so repeated runs
//! with the same seed produce identical bytes.

use std::path::{Path, PathBuf};

use ribbon_kernel::carrier::oriented::oriented_pd;
use ribbon_kernel::invariants::fingerprint::diagram_fingerprint;
use ribbon_search::env::NamedLinkV1;
use ribbon_search::report::LinkOutcomeV1;

/// Longest link-name fragment used in a file name.
const MAX_STEM_CHARS: usize = 48;

/// Error exporting a solved diagram.
#[derive(Debug)]
pub enum ExportError {
    /// The outcome has no solution to export.
    NotSolved { name: String },
    /// I/O error during write.
    Io { path: PathBuf, detail: String },
    /// JSON serialization failed.
    Serialize { detail: String },
}

impl std::fmt::Display for ExportError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotSolved { name } => write!(f, "link {name} was not solved"),
            Self::Io { path, detail } => write!(f, "I/O error at {}: {detail}", path.display()),
            Self::Serialize { detail } => write!(f, "JSON error: {detail}"),
        }
    }
}

impl std::error::Error for ExportError {}

/// Destination for solved diagrams.
pub trait SolvedExporter {
    /// Export one solved link and return where it went.
    ///
    /// # Errors
    ///
    /// Returns [`ExportError`] if the outcome is unsolved or the write fails.
    fn export(&self, link: &NamedLinkV1, outcome: &LinkOutcomeV1) -> Result<PathBuf, ExportError>;
}

/// Writes one JSON artifact per solved link into a directory.
#[derive(Debug, Clone)]
pub struct JsonArtifactExporter {
    dir: PathBuf,
}

impl JsonArtifactExporter {
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// File name for an outcome: batch index plus a sanitized name.
    #[must_use]
    pub fn file_name(outcome: &LinkOutcomeV1) -> String {
        let stem: String = outcome
            .name
            .chars()
            .map(|c| {
                if c.is_ascii_alphanumeric() || c == '_' || c == '-' {
                    c
                } else {
                    '_'
                }
            })
            .take(MAX_STEM_CHARS)
            .collect();
        format!("{:03}_{stem}.json", outcome.index)
    }
}

/// The artifact body for a solved outcome.
///
/// # Errors
///
/// Returns [`ExportError::NotSolved`] if `outcome` has no solution.
pub fn artifact_json(
    link: &NamedLinkV1,
    outcome: &LinkOutcomeV1,
) -> Result<serde_json::Value, ExportError> {
    let state = outcome
        .solution
        .as_ref()
        .ok_or_else(|| ExportError::NotSolved {
            name: outcome.name.clone(),
        })?;
    Ok(serde_json::json!({
        "band_string": state.band_string(),
        "bands_completed": state.bands_completed(),
        "final": {
            "fingerprint": diagram_fingerprint(state.diagram()).as_str(),
            "free_loops": state.diagram().free_loops(),
            "pd": oriented_pd(state.diagram()),
        },
        "history": state.history().iter().map(ToString::to_string).collect::<Vec<_>>(),
        "name": link.name,
        "original": {
            "fingerprint": outcome.original_fingerprint.as_str(),
            "free_loops": link.diagram.free_loops(),
            "pd": oriented_pd(&link.diagram),
        },
        "tries": outcome.tries,
    }))
}

impl SolvedExporter for JsonArtifactExporter {
    fn export(&self, link: &NamedLinkV1, outcome: &LinkOutcomeV1) -> Result<PathBuf, ExportError> {
        let value = artifact_json(link, outcome)?;
        let mut bytes = serde_json::to_vec_pretty(&value).map_err(|e| ExportError::Serialize {
            detail: e.to_string(),
        })?;
        bytes.push(b'\n');
        std::fs::create_dir_all(&self.dir).map_err(|e| ExportError::Io {
            path: self.dir.clone(),
            detail: e.to_string(),
        })?;
        let path = self.dir.join(Self::file_name(outcome));
        std::fs::write(&path, &bytes).map_err(|e| ExportError::Io {
            path: path.clone(),
            detail: e.to_string(),
        })?;
        Ok(path)
    }
}
