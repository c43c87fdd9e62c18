//! Site configuration (site.yml)

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::Path;

/// Main site configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    // Site
    pub title: String,
    pub description: String,
    pub author: String,
    pub language: String,

    // URL
    pub url: String,
    pub root: String,

    // Directory
    pub posts_dir: String,
    pub static_dir: String,
    pub public_dir: String,

    // Layout chrome
    pub navigation: Vec<NavItem>,

    // Social preview images
    #[serde(default)]
    pub og: OgConfig,

    // Code highlighting
    #[serde(default)]
    pub highlight: HighlightConfig,

    /// chrono format string for displayed dates
    pub date_format: String,

    /// Additional custom fields
    #[serde(flatten)]
    pub extra: HashMap<String, serde_yaml::Value>,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            title: "My Site".to_string(),
            description: String::new(),
            author: "John Doe".to_string(),
            language: "en".to_string(),

            url: "http://example.com".to_string(),
            root: "/".to_string(),

            posts_dir: "posts".to_string(),
            static_dir: "static".to_string(),
            public_dir: "public".to_string(),

            navigation: vec![
                NavItem::new("blog", "/blog"),
                NavItem::new("about", "/about"),
                NavItem::new("contact", "/contact"),
            ],

            og: OgConfig::default(),
            highlight: HighlightConfig::default(),

            date_format: "%B %-d, %Y".to_string(),
            extra: HashMap::new(),
        }
    }
}

impl SiteConfig {
    /// Load configuration from a file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref())?;
        let config: SiteConfig = serde_yaml::from_str(&content)?;
        Ok(config)
    }
}

/// One entry in the navigation bar
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NavItem {
    pub name: String,
    pub path: String,
}

impl NavItem {
    pub fn new(name: &str, path: &str) -> Self {
        Self {
            name: name.to_string(),
            path: path.to_string(),
        }
    }
}

/// Open Graph preview image configuration
///
/// `endpoint` is the image-rendering service that rasterizes previews; it
/// may be a site-relative path or an absolute URL.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OgConfig {
    pub endpoint: String,
}

impl Default for OgConfig {
    fn default() -> Self {
        Self {
            endpoint: "/api/og".to_string(),
        }
    }
}

/// Syntax highlighting configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HighlightConfig {
    pub theme: String,
}

impl Default for HighlightConfig {
    fn default() -> Self {
        Self {
            theme: "base16-ocean.dark".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = SiteConfig::default();
        assert_eq!(config.posts_dir, "posts");
        assert_eq!(config.og.endpoint, "/api/og");
        assert_eq!(config.navigation.len(), 3);
        assert_eq!(config.navigation[0].name, "blog");
    }

    #[test]
    fn test_parse_config() {
        let yaml = r#"
title: francisudeji.dev
author: Francis Udeji
url: https://francisudeji.dev
navigation:
  - name: blog
    path: /blog
og:
  endpoint: https://og.example.com/render
"#;
        let config: SiteConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.title, "francisudeji.dev");
        assert_eq!(config.author, "Francis Udeji");
        assert_eq!(config.navigation.len(), 1);
        assert_eq!(config.og.endpoint, "https://og.example.com/render");
        // unset keys fall back to defaults
        assert_eq!(config.posts_dir, "posts");
    }
}
