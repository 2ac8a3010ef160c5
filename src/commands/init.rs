//! Initialize a new blog project

use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

use crate::config::{BlogConfig, CONFIG_FILE};

/// Directories every project starts with
const PROJECT_DIRS: [&str; 5] = ["content/posts", "templates", "assets/css", "assets/js", "public"];

/// Scaffold a blog project in `target_dir`.
///
/// Existing directories and files are left untouched. `title` overrides the
/// default site title in a newly written config.
pub fn init_site(target_dir: &Path, title: Option<&str>) -> Result<()> {
    for dir in PROJECT_DIRS {
        let full_path = target_dir.join(dir);
        if !full_path.exists() {
            fs::create_dir_all(&full_path)
                .with_context(|| format!("Failed to create dir {:?}", full_path))?;
            println!("Created directory: {}", dir);
        }
    }

    let config_path = target_dir.join(CONFIG_FILE);
    if !config_path.exists() {
        let mut config = BlogConfig::default();
        if let Some(title) = title {
            config.title = title.to_string();
        }
        fs::write(&config_path, config.to_json_pretty()?)
            .with_context(|| format!("Failed to write {:?}", config_path))?;
        println!("Created {}", CONFIG_FILE);
    }

    let sample_post_path = target_dir.join("content/posts/welcome.md");
    if !sample_post_path.exists() {
        let today = chrono::Local::now().format("%Y-%m-%d");
        let sample_post = format!(
            r#"---
title: "Welcome to Your New Blog"
date: "{}"
slug: "welcome"
---

# Welcome to Your New Blog

This is your first blog post! You can edit this file and add more posts to the `content/posts` directory.

## Getting Started

1. Edit `blog.config.json` to customize your blog
2. Add more posts to `content/posts`
3. Run `alxblg build` to generate your blog
4. Run `alxblg serve` to start the development server
"#,
            today
        );
        fs::write(&sample_post_path, sample_post)
            .with_context(|| format!("Failed to write {:?}", sample_post_path))?;
        println!("Created sample post: content/posts/welcome.md");
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::Post;

    #[test]
    fn test_init_creates_project() {
        let dir = tempfile::tempdir().unwrap();
        init_site(dir.path(), Some("Notebook")).unwrap();

        for sub in PROJECT_DIRS {
            assert!(dir.path().join(sub).is_dir(), "missing {}", sub);
        }

        let config = BlogConfig::load(dir.path().join(CONFIG_FILE)).unwrap();
        assert_eq!(config.title, "Notebook");
        assert_eq!(config.posts_per_page.get(), 10);

        let welcome = fs::read_to_string(dir.path().join("content/posts/welcome.md")).unwrap();
        let post = Post::parse(&welcome).unwrap();
        assert_eq!(post.title, "Welcome to Your New Blog");
        assert_eq!(post.slug, "welcome");
        assert!(post.published().is_some());
    }

    #[test]
    fn test_init_keeps_existing_files() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join(CONFIG_FILE), "{}").unwrap();
        init_site(dir.path(), None).unwrap();

        assert_eq!(
            fs::read_to_string(dir.path().join(CONFIG_FILE)).unwrap(),
            "{}"
        );
    }
}
