//! alxblg: a simple static blog generator
//!
//! Markdown posts with a small front-matter header are rendered through
//! Tera templates into a static site that can be previewed locally.

pub mod commands;
pub mod config;
pub mod content;
pub mod generator;
pub mod server;
pub mod templates;

use std::path::{Path, PathBuf};

pub use commands::build::BuildSummary;

/// Paths of a blog project and its output
#[derive(Debug, Clone)]
pub struct Blog {
    /// Project root
    pub base_dir: PathBuf,
    /// blog.config.json
    pub config_path: PathBuf,
    /// Markdown posts
    pub posts_dir: PathBuf,
    /// Site templates
    pub templates_dir: PathBuf,
    /// Static assets, mirrored to `<output>/assets`
    pub assets_dir: PathBuf,
    /// Output directory
    pub output_dir: PathBuf,
}

impl Blog {
    /// Describe the blog rooted at `base_dir`, building into `output_dir`
    pub fn new<P: AsRef<Path>, Q: AsRef<Path>>(base_dir: P, output_dir: Q) -> Self {
        let base_dir = base_dir.as_ref().to_path_buf();

        Self {
            config_path: base_dir.join(config::CONFIG_FILE),
            posts_dir: base_dir.join("content").join("posts"),
            templates_dir: base_dir.join("templates"),
            assets_dir: base_dir.join("assets"),
            output_dir: output_dir.as_ref().to_path_buf(),
            base_dir,
        }
    }

    /// Build the static site
    pub fn build(&self) -> anyhow::Result<BuildSummary> {
        commands::build::run(self)
    }
}
