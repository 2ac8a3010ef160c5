//! Build the static site
//!
//! Stages run strictly in order: load config, prepare templates, discover
//! and parse posts, sort, render the index, render posts, copy assets. The
//! first error aborts the build.

use anyhow::{Context, Result};
use std::fs;
use std::path::PathBuf;

use crate::config::BlogConfig;
use crate::content::loader::ContentLoader;
use crate::generator::{self, Generator};
use crate::templates::{self, SiteRenderer};
use crate::Blog;

/// Outcome of a successful build
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildSummary {
    /// Where the site was written
    pub output_dir: PathBuf,
    /// Number of posts in the index
    pub post_count: usize,
    /// Number of post pages written (less than `post_count` on duplicate slugs)
    pub pages_written: usize,
    /// Number of asset files copied
    pub assets_copied: usize,
}

/// Run a full build of `blog`
pub fn run(blog: &Blog) -> Result<BuildSummary> {
    let start = std::time::Instant::now();
    tracing::info!("Building blog from {:?} to {:?}", blog.base_dir, blog.output_dir);

    // Nothing is written before the config is known to be good
    let config = BlogConfig::load(&blog.config_path)?;
    tracing::debug!("Loaded config: {:?}", config);

    templates::prepare_templates(&blog.templates_dir)?;
    let renderer = SiteRenderer::load(&blog.templates_dir)?;

    let mut posts = ContentLoader::new(blog).load_posts()?;
    tracing::info!("Loaded {} posts", posts.len());
    posts.sort_by_date();

    fs::create_dir_all(&blog.output_dir)
        .with_context(|| format!("Failed to create dir {:?}", blog.output_dir))?;

    let generator = Generator::new(&config, &renderer, &blog.output_dir);
    generator.generate_index(&posts)?;
    let pages_written = generator.generate_post_pages(&posts)?;

    let assets_copied = generator::copy_dir(&blog.assets_dir, &blog.output_dir.join("assets"))?;
    if assets_copied > 0 {
        tracing::debug!("Copied {} asset files", assets_copied);
    }

    let duration = start.elapsed();
    tracing::info!("Generated in {:.2}s", duration.as_secs_f64());

    Ok(BuildSummary {
        output_dir: blog.output_dir.clone(),
        post_count: posts.len(),
        pages_written,
        assets_copied,
    })
}
