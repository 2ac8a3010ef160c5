//! Post model and post collection

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use indexmap::IndexMap;
use serde::Serialize;
use std::cmp::Reverse;
use std::ops::Deref;

use super::FrontMatter;

/// Number of body lines a derived excerpt is built from
const EXCERPT_LINES: usize = 3;

/// Maximum length of a derived excerpt, in `char`s, before the suffix
const EXCERPT_MAX_CHARS: usize = 200;

/// Appended to every derived excerpt
const EXCERPT_SUFFIX: &str = "...";

/// A blog post
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Post {
    /// Post title
    pub title: String,

    /// Publication date as written in the front-matter
    pub date: String,

    /// Output filename stem
    pub slug: String,

    /// Body text, passed through unprocessed
    pub content: String,

    /// Short summary shown in list views
    pub excerpt: Option<String>,

    /// Source file name (empty when built from memory)
    pub source: String,

    /// Unrecognized front-matter fields
    pub extra: IndexMap<String, String>,
}

impl Post {
    /// Build a post from parsed front-matter and its body.
    ///
    /// Missing title/date/slug become empty strings; a missing excerpt is
    /// derived from the body.
    pub fn from_parts(fm: FrontMatter, body: &str) -> Self {
        let excerpt = fm.excerpt.unwrap_or_else(|| derive_excerpt(body));

        Self {
            title: fm.title.unwrap_or_default(),
            date: fm.date.unwrap_or_default(),
            slug: fm.slug.unwrap_or_default(),
            content: body.to_string(),
            excerpt: Some(excerpt),
            source: String::new(),
            extra: fm.extra,
        }
    }

    /// Parse a raw document into a post; `None` if it has no front-matter
    pub fn parse(document: &str) -> Option<Self> {
        let (fm, body) = FrontMatter::parse(document)?;
        Some(Self::from_parts(fm, body))
    }

    /// Publication date as a sortable value; `None` if unparseable
    pub fn published(&self) -> Option<NaiveDateTime> {
        parse_date_string(&self.date)
    }
}

/// Derive an excerpt: the first three body lines joined by a space, cut to
/// 200 chars, followed by `...` (always, even when nothing was cut).
pub fn derive_excerpt(body: &str) -> String {
    let joined = body
        .split('\n')
        .take(EXCERPT_LINES)
        .collect::<Vec<_>>()
        .join(" ");

    let mut excerpt: String = joined.chars().take(EXCERPT_MAX_CHARS).collect();
    excerpt.push_str(EXCERPT_SUFFIX);
    excerpt
}

/// Parse a date string in the forms posts commonly use
fn parse_date_string(s: &str) -> Option<NaiveDateTime> {
    let s = s.trim();

    let datetime_formats = [
        "%Y-%m-%dT%H:%M:%S",
        "%Y-%m-%dT%H:%M:%S%.f",
        "%Y-%m-%d %H:%M:%S",
        "%Y-%m-%d %H:%M",
        "%Y/%m/%d %H:%M:%S",
    ];
    for fmt in datetime_formats {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(dt);
        }
    }

    for fmt in ["%Y-%m-%d", "%Y/%m/%d"] {
        if let Ok(d) = NaiveDate::parse_from_str(s, fmt) {
            return d.and_hms_opt(0, 0, 0);
        }
    }

    DateTime::parse_from_rfc3339(s).ok().map(|dt| dt.naive_utc())
}

/// An ordered sequence of posts
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct PostCollection {
    posts: Vec<Post>,
}

impl PostCollection {
    /// Create a collection in the given (discovery) order
    pub fn new(posts: Vec<Post>) -> Self {
        Self { posts }
    }

    /// Stable sort by date, newest first.
    ///
    /// Posts with an unparseable date are treated as the earliest and keep
    /// their relative order at the end of the collection.
    pub fn sort_by_date(&mut self) {
        self.posts.sort_by_cached_key(|p| Reverse(p.published()));
    }

    /// The posts whose pages get written: for a slug shared by several
    /// posts, only the one from the last source file in name order.
    pub fn pages(&self) -> Vec<&Post> {
        let mut winners: IndexMap<&str, &Post> = IndexMap::new();
        for post in &self.posts {
            match winners.get(post.slug.as_str()).copied() {
                Some(current) if current.source > post.source => {
                    tracing::warn!(
                        "Duplicate slug {:?}: {:?} is shadowed by {:?}",
                        post.slug,
                        post.source,
                        current.source
                    );
                }
                Some(current) => {
                    tracing::warn!(
                        "Duplicate slug {:?}: {:?} is shadowed by {:?}",
                        post.slug,
                        current.source,
                        post.source
                    );
                    winners.insert(&post.slug, post);
                }
                None => {
                    winners.insert(&post.slug, post);
                }
            }
        }
        winners.into_values().collect()
    }
}

impl Deref for PostCollection {
    type Target = [Post];

    fn deref(&self) -> &[Post] {
        &self.posts
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn post(title: &str, date: &str) -> Post {
        Post {
            title: title.to_string(),
            date: date.to_string(),
            slug: title.to_lowercase(),
            content: String::new(),
            excerpt: None,
            source: format!("{}.md", title.to_lowercase()),
            extra: IndexMap::new(),
        }
    }

    fn titles(posts: &PostCollection) -> Vec<&str> {
        posts.iter().map(|p| p.title.as_str()).collect()
    }

    #[test]
    fn test_missing_fields_default_to_empty() {
        let post = Post::from_parts(FrontMatter::default(), "Body");
        assert_eq!(post.title, "");
        assert_eq!(post.date, "");
        assert_eq!(post.slug, "");
        assert_eq!(post.content, "Body");
        assert_eq!(post.excerpt.as_deref(), Some("Body..."));
    }

    #[test]
    fn test_explicit_excerpt_kept() {
        let fm = FrontMatter {
            excerpt: Some("Given".to_string()),
            ..Default::default()
        };
        let post = Post::from_parts(fm, "line one\nline two");
        assert_eq!(post.excerpt.as_deref(), Some("Given"));
    }

    #[test]
    fn test_parse_document() {
        let post = Post::parse("---\ntitle: \"Hi\"\ndate: \"2024-01-01\"\nslug: \"hi\"\nmood: happy\n---\nHello").unwrap();
        assert_eq!(post.title, "Hi");
        assert_eq!(post.date, "2024-01-01");
        assert_eq!(post.slug, "hi");
        assert_eq!(post.content, "Hello");
        assert_eq!(post.excerpt.as_deref(), Some("Hello..."));
        assert_eq!(post.extra.get("mood").map(String::as_str), Some("happy"));

        assert!(Post::parse("Hello").is_none());
    }

    #[test]
    fn test_excerpt_uses_first_three_lines() {
        let excerpt = derive_excerpt("\n# Welcome\n\nThis is your first post.\n");
        assert_eq!(excerpt, " # Welcome ...");

        let excerpt = derive_excerpt("one\ntwo\nthree\nfour");
        assert_eq!(excerpt, "one two three...");
    }

    #[test]
    fn test_excerpt_suffix_is_unconditional() {
        assert_eq!(derive_excerpt(""), "...");
        assert_eq!(derive_excerpt("short"), "short...");
    }

    #[test]
    fn test_excerpt_truncates_to_200_chars() {
        let body = "a".repeat(250);
        let excerpt = derive_excerpt(&body);
        assert_eq!(excerpt, format!("{}...", "a".repeat(200)));

        let body = "é".repeat(201);
        let excerpt = derive_excerpt(&body);
        assert_eq!(excerpt.chars().count(), 203);
        assert!(excerpt.starts_with(&"é".repeat(200)));
    }

    #[test]
    fn test_excerpt_keeps_carriage_returns() {
        assert_eq!(derive_excerpt("a\r\nb"), "a\r b...");
    }

    #[test]
    fn test_sort_newest_first() {
        let mut posts = PostCollection::new(vec![
            post("Jan", "2024-01-01"),
            post("Mar", "2024-03-01"),
            post("Feb", "2024-02-01"),
        ]);
        posts.sort_by_date();
        assert_eq!(titles(&posts), vec!["Mar", "Feb", "Jan"]);
    }

    #[test]
    fn test_sort_is_stable_for_equal_dates() {
        let mut posts = PostCollection::new(vec![
            post("A", "2024-01-01"),
            post("B", "2024-02-01"),
            post("C", "2024-01-01"),
            post("D", "2024-01-01"),
        ]);
        posts.sort_by_date();
        assert_eq!(titles(&posts), vec!["B", "A", "C", "D"]);
    }

    #[test]
    fn test_invalid_dates_sort_last() {
        let mut posts = PostCollection::new(vec![
            post("Bad", "not a date"),
            post("Old", "1999-12-31"),
            post("Empty", ""),
            post("New", "2024-06-01"),
        ]);
        posts.sort_by_date();
        assert_eq!(titles(&posts), vec!["New", "Old", "Bad", "Empty"]);
    }

    #[test]
    fn test_datetimes_compare_with_dates() {
        let mut posts = PostCollection::new(vec![
            post("Morning", "2024-01-01"),
            post("Evening", "2024-01-01 18:30:00"),
            post("Rfc", "2024-01-02T08:00:00Z"),
        ]);
        posts.sort_by_date();
        assert_eq!(titles(&posts), vec!["Rfc", "Evening", "Morning"]);
    }

    #[test]
    fn test_duplicate_slugs_last_source_wins() {
        let mut first = post("First", "2024-03-01");
        first.slug = "same".to_string();
        first.source = "a.md".to_string();
        let mut second = post("Second", "2024-01-01");
        second.slug = "same".to_string();
        second.source = "b.md".to_string();
        let other = post("Other", "2024-02-01");

        let posts = PostCollection::new(vec![first, other, second]);
        let pages = posts.pages();
        assert_eq!(pages.len(), 2);
        assert_eq!(pages[0].title, "Second");
        assert_eq!(pages[1].title, "Other");
        assert_eq!(posts.len(), 3);
    }

    #[test]
    fn test_serializes_as_list() {
        let posts = PostCollection::new(vec![post("One", "2024-01-01")]);
        let value = serde_json::to_value(&posts).unwrap();
        assert_eq!(value[0]["title"], "One");
        assert_eq!(value[0]["slug"], "one");
    }
}
