//! Generator module - renders pages and writes the output tree

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::config::BlogConfig;
use crate::content::PostCollection;
use crate::templates::SiteRenderer;

/// Static site generator writing into one output directory
pub struct Generator<'a> {
    config: &'a BlogConfig,
    renderer: &'a SiteRenderer,
    output_dir: PathBuf,
}

impl<'a> Generator<'a> {
    /// Create a new generator
    pub fn new(config: &'a BlogConfig, renderer: &'a SiteRenderer, output_dir: &Path) -> Self {
        Self {
            config,
            renderer,
            output_dir: output_dir.to_path_buf(),
        }
    }

    /// Generate `index.html` listing every post
    pub fn generate_index(&self, posts: &PostCollection) -> Result<PathBuf> {
        let html = self.renderer.render_index(self.config, posts)?;
        let output_path = self.output_dir.join("index.html");
        write_file(&output_path, &html)?;
        tracing::debug!("Generated: {:?}", output_path);
        Ok(output_path)
    }

    /// Generate `posts/<slug>.html` for every post.
    ///
    /// When several posts share a slug only one page is written, see
    /// [`PostCollection::pages`].
    pub fn generate_post_pages(&self, posts: &PostCollection) -> Result<usize> {
        let posts_dir = self.output_dir.join("posts");
        fs::create_dir_all(&posts_dir)
            .with_context(|| format!("Failed to create dir {:?}", posts_dir))?;

        let pages = posts.pages();
        for post in &pages {
            let html = self.renderer.render_post(self.config, post)?;
            let output_path = posts_dir.join(format!("{}.html", post.slug));
            write_file(&output_path, &html)?;
            tracing::debug!("Generated post: {:?}", output_path);
        }

        Ok(pages.len())
    }
}

/// Recursively copy `src` into `dest`, overwriting existing files.
///
/// Returns the number of files copied; a missing `src` copies nothing.
pub fn copy_dir(src: &Path, dest: &Path) -> Result<usize> {
    if !src.exists() {
        return Ok(0);
    }

    let mut copied = 0;
    for entry in WalkDir::new(src).follow_links(true).sort_by_file_name() {
        let entry = entry.with_context(|| format!("Failed to read {:?}", src))?;
        let relative = entry.path().strip_prefix(src)?;
        let target = dest.join(relative);

        if entry.file_type().is_dir() {
            fs::create_dir_all(&target)
                .with_context(|| format!("Failed to create dir {:?}", target))?;
        } else {
            fs::copy(entry.path(), &target)
                .with_context(|| format!("Failed to copy {:?} to {:?}", entry.path(), target))?;
            tracing::debug!("Copied: {:?} -> {:?}", entry.path(), target);
            copied += 1;
        }
    }

    Ok(copied)
}

fn write_file(path: &Path, content: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).with_context(|| format!("Failed to create dir {:?}", parent))?;
    }
    fs::write(path, content).with_context(|| format!("Failed to write {:?}", path))
}
