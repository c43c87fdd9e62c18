//! mdxgen: a static site generator for MDX-based personal blogs
//!
//! This crate turns a `posts/<slug>/<slug>.mdx` tree plus a `site.yml`
//! into a static personal website: home page, blog index, one page per
//! post, an Atom feed, and a search index, with Open Graph preview
//! image URLs pointing at an external rendering endpoint.

pub mod commands;
pub mod config;
pub mod content;
pub mod generator;
pub mod helpers;
pub mod metadata;
pub mod server;
pub mod templates;

use anyhow::Result;
use std::path::Path;

use content::PostRepository;

/// Name of the configuration file at the site root
pub const CONFIG_FILE: &str = "site.yml";

/// The main site handle: configuration plus resolved directory roots
#[derive(Clone)]
pub struct Site {
    /// Site configuration
    pub config: config::SiteConfig,
    /// Base directory
    pub base_dir: std::path::PathBuf,
    /// Posts source directory
    pub posts_dir: std::path::PathBuf,
    /// Static assets directory
    pub static_dir: std::path::PathBuf,
    /// Public (output) directory
    pub public_dir: std::path::PathBuf,
}

impl Site {
    /// Create a new Site instance from a directory
    pub fn new<P: AsRef<Path>>(base_dir: P) -> Result<Self> {
        let base_dir = base_dir.as_ref().to_path_buf();
        let config_path = base_dir.join(CONFIG_FILE);

        let config = if config_path.exists() {
            config::SiteConfig::load(&config_path)?
        } else {
            config::SiteConfig::default()
        };

        let posts_dir = base_dir.join(&config.posts_dir);
        let static_dir = base_dir.join(&config.static_dir);
        let public_dir = base_dir.join(&config.public_dir);

        Ok(Self {
            config,
            base_dir,
            posts_dir,
            static_dir,
            public_dir,
        })
    }

    /// A repository over this site's posts directory
    pub fn repository(&self) -> PostRepository {
        PostRepository::new(self.posts_dir.clone())
    }

    /// Generate the static site
    pub fn generate(&self) -> Result<()> {
        commands::generate::run(self)
    }

    /// Clean the public directory
    pub fn clean(&self) -> Result<()> {
        commands::clean::run(self)
    }

    /// Create a new post
    pub fn new_post(&self, title: &str) -> Result<()> {
        commands::new::run(self, title)
    }
}
