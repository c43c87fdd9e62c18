//! Page metadata projection for document heads and social previews

use serde::Serialize;

use crate::config::SiteConfig;
use crate::content::Post;
use crate::helpers::url::{full_url_for, query_string, url_for};

/// Head data derived from a post: page title, description, canonical URL,
/// and the social preview image URL
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PageMetadata {
    pub title: String,
    pub description: String,
    pub canonical_url: String,
    pub preview_image_url: String,
}

impl PageMetadata {
    /// Project a post into its page metadata. Pure; no side effects.
    pub fn for_post(config: &SiteConfig, post: &Post) -> Self {
        let title = post.meta.title.clone().unwrap_or_else(|| config.title.clone());
        let description = post
            .meta
            .description
            .clone()
            .unwrap_or_else(|| config.description.clone());

        Self {
            title,
            description,
            canonical_url: full_url_for(config, &format!("blog/{}", post.slug)),
            preview_image_url: preview_image_url(config, post),
        }
    }

    /// Metadata for a non-post page (home, blog index)
    pub fn for_page(config: &SiteConfig, title: &str, path: &str) -> Self {
        Self {
            title: title.to_string(),
            description: config.description.clone(),
            canonical_url: full_url_for(config, path),
            preview_image_url: String::new(),
        }
    }
}

/// The external image-rendering endpoint, parameterized by date, title,
/// and slug
fn preview_image_url(config: &SiteConfig, post: &Post) -> String {
    let endpoint = &config.og.endpoint;
    let base = if endpoint.starts_with("http://") || endpoint.starts_with("https://") {
        endpoint.clone()
    } else {
        format!(
            "{}{}",
            config.url.trim_end_matches('/'),
            url_for(config, endpoint)
        )
    };

    let query = query_string(&[
        ("date", post.meta.date.as_deref().unwrap_or("")),
        ("title", post.meta.title.as_deref().unwrap_or("")),
        ("slug", &post.slug),
    ]);

    format!("{}?{}", base, query)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::FrontMatter;

    fn test_post() -> Post {
        let (meta, body) = FrontMatter::parse(
            "---\ntitle: Hello World\ndescription: A test post\ndate: 2024-01-01\n---\nBody text here.\n",
        )
        .unwrap();
        Post {
            meta,
            slug: "my-post".to_string(),
            content: body.to_string(),
        }
    }

    fn test_config() -> SiteConfig {
        SiteConfig {
            url: "https://example.com".to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_canonical_url() {
        let meta = PageMetadata::for_post(&test_config(), &test_post());
        assert_eq!(meta.canonical_url, "https://example.com/blog/my-post");
    }

    #[test]
    fn test_title_and_description_come_from_front_matter() {
        let meta = PageMetadata::for_post(&test_config(), &test_post());
        assert_eq!(meta.title, "Hello World");
        assert_eq!(meta.description, "A test post");
    }

    #[test]
    fn test_preview_image_url_is_query_encoded() {
        let meta = PageMetadata::for_post(&test_config(), &test_post());
        assert!(meta
            .preview_image_url
            .starts_with("https://example.com/api/og?"));
        assert!(meta.preview_image_url.contains("title=Hello%20World"));
        assert!(meta.preview_image_url.contains("slug=my-post"));
        assert!(meta.preview_image_url.contains("date=2024-01-01"));
    }

    #[test]
    fn test_absolute_og_endpoint_is_used_verbatim() {
        let mut config = test_config();
        config.og.endpoint = "https://og.example.com/render".to_string();

        let meta = PageMetadata::for_post(&config, &test_post());
        assert!(meta
            .preview_image_url
            .starts_with("https://og.example.com/render?"));
    }

    #[test]
    fn test_missing_meta_falls_back_to_site() {
        let config = SiteConfig {
            title: "My Site".to_string(),
            description: "A personal site".to_string(),
            ..test_config()
        };
        let post = Post {
            meta: FrontMatter::default(),
            slug: "bare".to_string(),
            content: String::new(),
        };

        let meta = PageMetadata::for_post(&config, &post);
        assert_eq!(meta.title, "My Site");
        assert_eq!(meta.description, "A personal site");
        assert!(meta.preview_image_url.contains("date=&title=&slug=bare"));
    }
}
