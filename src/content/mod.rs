//! Content module - the file-system backed post repository

mod error;
mod frontmatter;
mod markdown;
mod post;
pub mod repository;

pub use error::ContentError;
pub use frontmatter::{FrontMatter, FrontMatterError};
pub use markdown::MarkdownRenderer;
pub use post::{Post, PostSummary};
pub use repository::PostRepository;
