//! Post model

use chrono::NaiveDateTime;
use serde::Serialize;

use super::FrontMatter;

/// A blog post: front-matter, URL slug, and raw (un-rendered) body
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Post {
    pub meta: FrontMatter,
    pub slug: String,
    pub content: String,
}

impl Post {
    /// The post's publication date, if the front-matter carries one
    pub fn date(&self) -> Option<NaiveDateTime> {
        self.meta.parse_date()
    }

    /// Drop the body, keeping the fields listings need
    pub fn summary(&self) -> PostSummary {
        PostSummary {
            meta: self.meta.clone(),
            slug: self.slug.clone(),
        }
    }
}

/// A post without its body, for index pages and feeds
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PostSummary {
    pub meta: FrontMatter,
    pub slug: String,
}
