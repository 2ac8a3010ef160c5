//! Content module - front-matter parsing, posts and post discovery

mod frontmatter;
pub mod loader;
mod post;

pub use frontmatter::FrontMatter;
pub use post::{derive_excerpt, Post, PostCollection};
