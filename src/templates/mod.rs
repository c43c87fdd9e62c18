//! Built-in site templates using the Tera template engine
//!
//! All layout chrome (navigation, containers, post cards) is embedded
//! directly in the binary; there is no external theme directory.

use anyhow::Result;
use serde::Serialize;
use std::collections::HashMap;
use tera::{Context, Tera};

/// Template renderer with the embedded site theme
pub struct TemplateRenderer {
    tera: Tera,
}

impl TemplateRenderer {
    /// Create a new renderer with all templates loaded
    pub fn new() -> Result<Self> {
        let mut tera = Tera::default();

        // Rendered post bodies and preview URLs are inserted verbatim;
        // escaping happens at render time where needed
        tera.autoescape_on(vec![]);

        tera.add_raw_templates(vec![
            ("layout.html", include_str!("site/layout.html")),
            ("home.html", include_str!("site/home.html")),
            ("blog.html", include_str!("site/blog.html")),
            ("post.html", include_str!("site/post.html")),
            (
                "partials/head.html",
                include_str!("site/partials/head.html"),
            ),
            ("partials/nav.html", include_str!("site/partials/nav.html")),
            (
                "partials/card.html",
                include_str!("site/partials/card.html"),
            ),
            (
                "partials/footer.html",
                include_str!("site/partials/footer.html"),
            ),
        ])?;

        tera.register_filter("strip_html", strip_html_filter);

        Ok(Self { tera })
    }

    /// Render a template with the given context
    pub fn render(&self, template_name: &str, context: &Context) -> Result<String> {
        Ok(self.tera.render(template_name, context)?)
    }
}

/// A post card on the home page and blog index
#[derive(Debug, Clone, Serialize)]
pub struct PostCard {
    pub title: String,
    pub description: String,
    pub date: String,
    pub date_display: String,
    pub url: String,
}

/// Data for a single post page
#[derive(Debug, Clone, Serialize)]
pub struct PostPageData {
    pub title: String,
    pub date: String,
    pub date_display: String,
    pub content: String,
    pub url: String,
}

/// Remove HTML tags, keeping text content
pub fn strip_html(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    let mut in_tag = false;
    for c in s.chars() {
        match c {
            '<' => in_tag = true,
            '>' => in_tag = false,
            _ if !in_tag => result.push(c),
            _ => {}
        }
    }
    result
}

/// Tera filter: strip HTML tags
fn strip_html_filter(
    value: &tera::Value,
    _args: &HashMap<String, tera::Value>,
) -> tera::Result<tera::Value> {
    let s = tera::try_get_value!("strip_html", "value", String, value);
    Ok(tera::Value::String(strip_html(&s)))
}
