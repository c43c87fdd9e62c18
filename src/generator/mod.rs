//! Generator module - renders the site into the public directory

use anyhow::Result;
use std::fs;
use std::path::Path;
use tera::Context;
use walkdir::WalkDir;

use crate::content::{MarkdownRenderer, Post};
use crate::helpers::date::display_date;
use crate::helpers::url::url_for;
use crate::metadata::PageMetadata;
use crate::templates::{strip_html, PostCard, PostPageData, TemplateRenderer};
use crate::Site;

/// How many posts the home page teases
const HOME_POST_COUNT: usize = 4;

/// How many posts the Atom feed carries
const FEED_POST_COUNT: usize = 20;

/// Static site generator using the embedded templates
pub struct Generator {
    site: Site,
    renderer: TemplateRenderer,
    markdown: MarkdownRenderer,
}

impl Generator {
    /// Create a new generator
    pub fn new(site: &Site) -> Result<Self> {
        Ok(Self {
            site: site.clone(),
            renderer: TemplateRenderer::new()?,
            markdown: MarkdownRenderer::with_theme(&site.config.highlight.theme),
        })
    }

    /// Generate the entire site
    pub fn generate(&self) -> Result<()> {
        let start = std::time::Instant::now();

        fs::create_dir_all(&self.site.public_dir)?;

        let posts = self.site.repository().list_posts()?;
        tracing::info!("Loaded {} posts", posts.len());

        self.copy_static_assets()?;
        self.generate_home(&posts)?;
        self.generate_blog_index(&posts)?;
        self.generate_post_pages(&posts)?;
        self.generate_atom_feed(&posts)?;
        self.generate_search_index(&posts)?;

        tracing::info!("Generated site in {:.2}s", start.elapsed().as_secs_f64());
        Ok(())
    }

    /// Context shared by every page
    fn base_context(&self) -> Context {
        let mut context = Context::new();
        context.insert("config", &self.site.config);
        context.insert(
            "current_year",
            &chrono::Local::now().format("%Y").to_string(),
        );
        context
    }

    fn card(&self, post: &Post) -> PostCard {
        let date = post.meta.date.clone().unwrap_or_default();
        PostCard {
            title: post.meta.title.clone().unwrap_or_else(|| post.slug.clone()),
            description: post.meta.description.clone().unwrap_or_default(),
            date_display: display_date(&date, &self.site.config.date_format),
            date,
            url: url_for(&self.site.config, &format!("blog/{}/", post.slug)),
        }
    }

    /// Generate the home page
    fn generate_home(&self, posts: &[Post]) -> Result<()> {
        let cards: Vec<PostCard> = posts.iter().take(HOME_POST_COUNT).map(|p| self.card(p)).collect();

        let mut context = self.base_context();
        context.insert("posts", &cards);
        context.insert(
            "page",
            &PageMetadata::for_page(&self.site.config, &self.site.config.title, ""),
        );

        let html = self.renderer.render("home.html", &context)?;
        self.write_page(&self.site.public_dir.join("index.html"), &html)
    }

    /// Generate the blog index page
    fn generate_blog_index(&self, posts: &[Post]) -> Result<()> {
        let cards: Vec<PostCard> = posts.iter().map(|p| self.card(p)).collect();

        let mut context = self.base_context();
        context.insert("posts", &cards);
        context.insert(
            "page",
            &PageMetadata::for_page(
                &self.site.config,
                &format!("Blog | {}", self.site.config.title),
                "blog/",
            ),
        );

        let html = self.renderer.render("blog.html", &context)?;
        self.write_page(&self.site.public_dir.join("blog/index.html"), &html)
    }

    /// Generate one page per post. A post that fails to render is logged
    /// and skipped; it never blocks the others.
    fn generate_post_pages(&self, posts: &[Post]) -> Result<()> {
        for post in posts {
            if let Err(e) = self.generate_post_page(post) {
                tracing::warn!("skipping page for post '{}': {:#}", post.slug, e);
            }
        }
        Ok(())
    }

    fn generate_post_page(&self, post: &Post) -> Result<()> {
        let content = self.markdown.render(&post.content)?;
        let date = post.meta.date.clone().unwrap_or_default();

        let mut context = self.base_context();
        context.insert(
            "post",
            &PostPageData {
                title: post.meta.title.clone().unwrap_or_else(|| post.slug.clone()),
                date_display: display_date(&date, &self.site.config.date_format),
                date,
                content,
                url: url_for(&self.site.config, &format!("blog/{}/", post.slug)),
            },
        );
        context.insert("page", &PageMetadata::for_post(&self.site.config, post));

        let html = self.renderer.render("post.html", &context)?;
        self.write_page(
            &self
                .site
                .public_dir
                .join("blog")
                .join(&post.slug)
                .join("index.html"),
            &html,
        )
    }

    /// Generate the Atom feed
    fn generate_atom_feed(&self, posts: &[Post]) -> Result<()> {
        let url = self.site.config.url.trim_end_matches('/');

        let mut feed = String::new();
        feed.push_str("<?xml version=\"1.0\" encoding=\"utf-8\"?>\n");
        feed.push_str("<feed xmlns=\"http://www.w3.org/2005/Atom\">\n");
        feed.push_str(&format!(
            "  <title>{}</title>\n",
            escape_xml(&self.site.config.title)
        ));
        feed.push_str(&format!("  <link href=\"{}/atom.xml\" rel=\"self\"/>\n", url));
        feed.push_str(&format!("  <link href=\"{}/\"/>\n", url));
        feed.push_str(&format!(
            "  <updated>{}</updated>\n",
            chrono::Utc::now().to_rfc3339()
        ));
        feed.push_str(&format!("  <id>{}/</id>\n", url));
        feed.push_str(&format!(
            "  <author><name>{}</name></author>\n",
            escape_xml(&self.site.config.author)
        ));

        for post in posts.iter().take(FEED_POST_COUNT) {
            let permalink = format!("{}/blog/{}", url, post.slug);
            let title = post.meta.title.as_deref().unwrap_or(&post.slug);
            let published = post
                .date()
                .map(|d| d.format("%Y-%m-%dT%H:%M:%SZ").to_string());

            feed.push_str("  <entry>\n");
            feed.push_str(&format!("    <title>{}</title>\n", escape_xml(title)));
            feed.push_str(&format!("    <link href=\"{}\"/>\n", permalink));
            feed.push_str(&format!("    <id>{}</id>\n", permalink));
            if let Some(published) = &published {
                feed.push_str(&format!("    <published>{}</published>\n", published));
                feed.push_str(&format!("    <updated>{}</updated>\n", published));
            }
            if let Some(description) = &post.meta.description {
                feed.push_str(&format!(
                    "    <summary>{}</summary>\n",
                    escape_xml(description)
                ));
            }
            feed.push_str("  </entry>\n");
        }

        feed.push_str("</feed>\n");

        let output_path = self.site.public_dir.join("atom.xml");
        fs::write(&output_path, feed)?;
        tracing::info!("Generated atom.xml");

        Ok(())
    }

    /// Generate the search index (JSON)
    fn generate_search_index(&self, posts: &[Post]) -> Result<()> {
        let search_data: Vec<serde_json::Value> = posts
            .iter()
            .map(|p| {
                let rendered = self.markdown.render(&p.content).unwrap_or_default();
                serde_json::json!({
                    "title": p.meta.title.as_deref().unwrap_or(&p.slug),
                    "url": url_for(&self.site.config, &format!("blog/{}/", p.slug)),
                    "date": p.meta.date.as_deref().unwrap_or(""),
                    "description": p.meta.description.as_deref().unwrap_or(""),
                    "text": strip_html(&rendered),
                })
            })
            .collect();

        let output_path = self.site.public_dir.join("search.json");
        let json = serde_json::to_string_pretty(&search_data)?;
        fs::write(&output_path, json)?;
        tracing::info!("Generated search.json");

        Ok(())
    }

    /// Copy static assets (css, images, favicon) to the public directory
    fn copy_static_assets(&self) -> Result<()> {
        let static_dir = &self.site.static_dir;
        if !static_dir.exists() {
            return Ok(());
        }

        for entry in WalkDir::new(static_dir)
            .follow_links(true)
            .into_iter()
            .filter_map(|e| e.ok())
        {
            let path = entry.path();
            if path.is_file() {
                let relative = path.strip_prefix(static_dir)?;
                let dest = self.site.public_dir.join(relative);

                if let Some(parent) = dest.parent() {
                    fs::create_dir_all(parent)?;
                }
                fs::copy(path, &dest)?;
            }
        }

        Ok(())
    }

    fn write_page(&self, output_path: &Path, html: &str) -> Result<()> {
        if let Some(parent) = output_path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(output_path, html)?;
        tracing::debug!("Generated: {:?}", output_path);
        Ok(())
    }
}

/// Escape text for XML
fn escape_xml(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}
