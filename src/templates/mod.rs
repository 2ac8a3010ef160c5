//! Site templates rendered with Tera
//!
//! A blog's templates live in `<source>/templates/`. The three templates the
//! build needs (`layout.html`, `index.html`, `post.html`) have built-in
//! defaults which are written to disk when a site does not provide its own.

use anyhow::{bail, Context as _, Result};
use serde::Serialize;
use std::fs;
use std::path::Path;
use tera::{Context, Tera};

use crate::config::BlogConfig;
use crate::content::{Post, PostCollection};

pub const LAYOUT_TEMPLATE: &str = "layout.html";
pub const INDEX_TEMPLATE: &str = "index.html";
pub const POST_TEMPLATE: &str = "post.html";

/// Built-in templates, by name
pub const DEFAULT_TEMPLATES: [(&str, &str); 3] = [
    (LAYOUT_TEMPLATE, include_str!("defaults/layout.html")),
    (INDEX_TEMPLATE, include_str!("defaults/index.html")),
    (POST_TEMPLATE, include_str!("defaults/post.html")),
];

/// Write the default for every required template missing from `templates_dir`.
///
/// Existing templates are left untouched. Returns the names written.
pub fn prepare_templates(templates_dir: &Path) -> Result<Vec<&'static str>> {
    fs::create_dir_all(templates_dir)
        .with_context(|| format!("Failed to create {:?}", templates_dir))?;

    let mut written = Vec::new();
    for (name, content) in DEFAULT_TEMPLATES {
        let path = templates_dir.join(name);
        if path.exists() {
            continue;
        }
        fs::write(&path, content).with_context(|| format!("Failed to write {:?}", path))?;
        tracing::info!("Created default template {:?}", path);
        written.push(name);
    }

    Ok(written)
}

/// Values exposed to the index template
#[derive(Debug, Serialize)]
struct IndexContext<'a> {
    config: &'a BlogConfig,
    posts: &'a PostCollection,
}

/// Values exposed to the post template
#[derive(Debug, Serialize)]
struct PostContext<'a> {
    config: &'a BlogConfig,
    post: &'a Post,
}

/// Renders pages from a fixed template set
pub struct SiteRenderer {
    tera: Tera,
}

impl SiteRenderer {
    /// Load every `*.html` template under `templates_dir`
    pub fn load(templates_dir: &Path) -> Result<Self> {
        let glob = format!("{}/**/*.html", templates_dir.display());
        let tera = Tera::new(&glob)
            .with_context(|| format!("Failed to load templates from {:?}", templates_dir))?;

        Self::with_tera(tera)
    }

    /// Renderer over the built-in templates only
    #[cfg(test)]
    pub(crate) fn with_defaults() -> Result<Self> {
        let mut tera = Tera::default();
        tera.add_raw_templates(DEFAULT_TEMPLATES.to_vec())?;

        Self::with_tera(tera)
    }

    fn with_tera(tera: Tera) -> Result<Self> {
        let loaded: Vec<&str> = tera.get_template_names().collect();
        for (name, _) in DEFAULT_TEMPLATES {
            if !loaded.contains(&name) {
                bail!("Template {:?} not found", name);
            }
        }
        tracing::debug!("Loaded templates: {:?}", loaded);

        Ok(Self { tera })
    }

    /// Render the index page listing every post
    pub fn render_index(&self, config: &BlogConfig, posts: &PostCollection) -> Result<String> {
        let context = Context::from_serialize(IndexContext { config, posts })?;
        self.render(INDEX_TEMPLATE, &context)
    }

    /// Render the page of a single post
    pub fn render_post(&self, config: &BlogConfig, post: &Post) -> Result<String> {
        let context = Context::from_serialize(PostContext { config, post })?;
        self.render(POST_TEMPLATE, &context)
    }

    fn render(&self, template_name: &str, context: &Context) -> Result<String> {
        self.tera
            .render(template_name, context)
            .with_context(|| format!("Failed to render template {:?}", template_name))
    }
}
