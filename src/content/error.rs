//! Repository error types

use std::path::PathBuf;
use thiserror::Error;

use super::FrontMatterError;

/// Errors surfaced by the post repository
#[derive(Debug, Error)]
pub enum ContentError {
    /// No `<slug>/<slug>.mdx` exists under the posts root
    #[error("post not found: {slug}")]
    NotFound { slug: String },

    /// The document's front-matter block could not be parsed
    #[error("malformed front-matter in {}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: FrontMatterError,
    },

    /// A post directory must contain exactly one `.mdx` file
    #[error("expected exactly one .mdx file in {}, found {count}", dir.display())]
    AmbiguousContent { dir: PathBuf, count: usize },

    #[error("failed to read {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl ContentError {
    /// Whether this error means the requested post simply does not exist
    pub fn is_not_found(&self) -> bool {
        matches!(self, ContentError::NotFound { .. })
    }
}
