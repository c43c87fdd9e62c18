//! List site content

use anyhow::Result;

use crate::Site;

/// List posts or slugs
pub fn run(site: &Site, content_type: &str) -> Result<()> {
    let repository = site.repository();

    match content_type {
        "post" | "posts" => {
            let posts = repository.list_posts()?;
            println!("Posts ({}):", posts.len());
            for post in posts {
                println!(
                    "  {} - {} [{}]",
                    post.meta.date.as_deref().unwrap_or("undated"),
                    post.meta.title.as_deref().unwrap_or(&post.slug),
                    post.slug
                );
            }
        }
        "slug" | "slugs" => {
            let slugs = repository.list_slugs()?;
            println!("Slugs ({}):", slugs.len());
            for slug in slugs {
                println!("  {}", slug);
            }
        }
        _ => {
            anyhow::bail!("Unknown type: {}. Available: post, slug", content_type);
        }
    }

    Ok(())
}
