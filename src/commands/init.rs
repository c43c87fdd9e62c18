//! Initialize a new site

use anyhow::Result;
use std::fs;
use std::path::Path;

use crate::CONFIG_FILE;

const DEFAULT_CONFIG: &str = r#"# Site
title: My Site
description: ''
author: John Doe
language: en

# URL
url: http://example.com
root: /

# Directory
posts_dir: posts
static_dir: static
public_dir: public

# Navigation bar
navigation:
  - name: blog
    path: /blog
  - name: about
    path: /about
  - name: contact
    path: /contact

# Social preview images (external rendering endpoint)
og:
  endpoint: /api/og

# Code highlighting
highlight:
  theme: base16-ocean.dark

# Displayed date format (chrono syntax)
date_format: '%B %-d, %Y'
"#;

const SAMPLE_POST: &str = r#"---
title: Hello World
description: The first post on this site
date: 2024-01-01
---
Welcome! Edit `posts/hello-world/hello-world.mdx` to make this post your own.
"#;

const DEFAULT_CSS: &str = r#"body {
  margin: 0;
  font-family: system-ui, sans-serif;
  color: #334155;
}

.container {
  width: 100%;
  margin: 0 auto;
  padding: 0 1rem;
}

.container-large {
  max-width: 64rem;
}

.site-nav {
  position: sticky;
  top: 0;
  border-bottom: 1px solid #e2e8f0;
  backdrop-filter: blur(12px);
}

.post-grid {
  display: grid;
  grid-template-columns: repeat(auto-fill, minmax(18rem, 1fr));
  gap: 1rem;
}

.post-card {
  border: 1px solid #e2e8f0;
  border-radius: 0.375rem;
  padding: 1rem;
  text-decoration: none;
  color: inherit;
}

.post-date {
  color: #94a3b8;
  font-size: 0.875rem;
}
"#;

/// Initialize a new site in the given directory
pub fn init_site(target_dir: &Path) -> Result<()> {
    fs::create_dir_all(target_dir)?;
    fs::create_dir_all(target_dir.join("posts/hello-world"))?;
    fs::create_dir_all(target_dir.join("static/css"))?;

    let config_path = target_dir.join(CONFIG_FILE);
    if config_path.exists() {
        anyhow::bail!("{} already exists in {:?}", CONFIG_FILE, target_dir);
    }
    fs::write(config_path, DEFAULT_CONFIG)?;

    fs::write(
        target_dir.join("posts/hello-world/hello-world.mdx"),
        SAMPLE_POST,
    )?;
    fs::write(target_dir.join("static/css/site.css"), DEFAULT_CSS)?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Site;
    use tempfile::TempDir;

    #[test]
    fn test_init_scaffolds_a_loadable_site() {
        let tmp = TempDir::new().unwrap();
        init_site(tmp.path()).unwrap();

        let site = Site::new(tmp.path()).unwrap();
        let posts = site.repository().list_posts().unwrap();
        assert_eq!(posts.len(), 1);
        assert_eq!(posts[0].slug, "hello-world");
    }

    #[test]
    fn test_init_refuses_to_overwrite() {
        let tmp = TempDir::new().unwrap();
        init_site(tmp.path()).unwrap();
        assert!(init_site(tmp.path()).is_err());
    }
}
