//! Create a new post

use anyhow::Result;
use std::fs;

use crate::Site;

/// Create `posts/<slug>/<slug>.mdx` with a front-matter scaffold
pub fn run(site: &Site, title: &str) -> Result<()> {
    let slug = slug::slugify(title);
    if slug.is_empty() {
        anyhow::bail!("title produces an empty slug: {:?}", title);
    }

    let post_dir = site.posts_dir.join(&slug);
    let file_path = post_dir.join(format!("{slug}.mdx"));
    if file_path.exists() {
        anyhow::bail!("File already exists: {:?}", file_path);
    }

    fs::create_dir_all(&post_dir)?;

    let now = chrono::Local::now();
    let content = format!(
        "---\ntitle: {}\ndescription: ''\ndate: {}\n---\n",
        title,
        now.format("%Y-%m-%d")
    );
    fs::write(&file_path, content)?;

    println!("Created: {:?}", file_path);

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_new_post_is_loadable() {
        let tmp = TempDir::new().unwrap();
        let site = Site::new(tmp.path()).unwrap();

        run(&site, "My Shiny Post").unwrap();

        let post = site.repository().get_post("my-shiny-post").unwrap();
        assert_eq!(post.meta.title, Some("My Shiny Post".to_string()));
        assert!(post.meta.parse_date().is_some());
    }

    #[test]
    fn test_new_post_refuses_duplicates() {
        let tmp = TempDir::new().unwrap();
        let site = Site::new(tmp.path()).unwrap();

        run(&site, "Twice").unwrap();
        assert!(run(&site, "Twice").is_err());
    }
}
