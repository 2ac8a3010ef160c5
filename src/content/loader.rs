//! Content loader - discovers and parses posts from content/posts

use anyhow::{Context, Result};
use std::fs;
use std::path::Path;
use walkdir::WalkDir;

use super::{Post, PostCollection};
use crate::Blog;

/// Loads posts from the posts source directory
pub struct ContentLoader<'a> {
    blog: &'a Blog,
}

impl<'a> ContentLoader<'a> {
    /// Create a new content loader
    pub fn new(blog: &'a Blog) -> Self {
        Self { blog }
    }

    /// Load every `.md` post, in file name order.
    ///
    /// A missing posts directory yields an empty collection. Files without
    /// front-matter are skipped, invalid UTF-8 is replaced with U+FFFD;
    /// unreadable files are an error.
    pub fn load_posts(&self) -> Result<PostCollection> {
        let posts_dir = &self.blog.posts_dir;
        if !posts_dir.exists() {
            tracing::debug!("No posts directory at {:?}", posts_dir);
            return Ok(PostCollection::default());
        }

        let mut posts = Vec::new();

        for entry in WalkDir::new(posts_dir)
            .min_depth(1)
            .max_depth(1)
            .follow_links(true)
            .sort_by_file_name()
        {
            let entry = entry.with_context(|| format!("Failed to read {:?}", posts_dir))?;
            let path = entry.path();
            if !entry.file_type().is_file() || !is_markdown_file(path) {
                continue;
            }

            match self.load_post(path)? {
                Some(post) => {
                    tracing::debug!("Loaded post {:?} ({})", post.slug, post.source);
                    posts.push(post);
                }
                None => {
                    tracing::warn!("Skipping {:?}: no front-matter block", path);
                }
            }
        }

        Ok(PostCollection::new(posts))
    }

    /// Load a single post from a file; `None` if it has no front-matter
    fn load_post(&self, path: &Path) -> Result<Option<Post>> {
        let bytes = fs::read(path).with_context(|| format!("Failed to read {:?}", path))?;
        let content = match String::from_utf8(bytes) {
            Ok(content) => content,
            Err(e) => {
                tracing::warn!("{:?} is not valid UTF-8, decoding lossily", path);
                String::from_utf8_lossy(e.as_bytes()).into_owned()
            }
        };

        let Some(mut post) = Post::parse(&content) else {
            return Ok(None);
        };

        post.source = path
            .file_name()
            .map(|name| name.to_string_lossy().to_string())
            .unwrap_or_default();
        post.slug = safe_slug(&post.slug, path);

        Ok(Some(post))
    }
}

/// Make sure a slug can be used as a file name under `posts/`.
///
/// A slug that would escape the output directory is slugified; an empty
/// slug (or one that slugifies to nothing) falls back to the file stem.
fn safe_slug(slug: &str, path: &Path) -> String {
    let unsafe_slug = slug == "." || slug == ".." || slug.contains(['/', '\\']);
    if !slug.is_empty() && !unsafe_slug {
        return slug.to_string();
    }

    let mut cleaned = slug::slugify(slug);
    if cleaned.is_empty() {
        let stem = path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("untitled");
        cleaned = slug::slugify(stem);
    }
    tracing::warn!("{:?} has slug {:?}, using {:?}", path, slug, cleaned);
    cleaned
}

/// Check if a file is a markdown post
fn is_markdown_file(path: &Path) -> bool {
    path.extension().map(|e| e == "md").unwrap_or(false)
}
