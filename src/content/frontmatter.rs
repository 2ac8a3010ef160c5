//! Front-matter parsing
//!
//! The accepted format is deliberately narrow: a leading block between two
//! lines containing exactly `---`, holding one `key: value` or `key: "value"`
//! pair per line. There are no nested structures, lists, multi-line values or
//! escaped quotes; lines that do not fit the pattern are ignored.

use indexmap::IndexMap;
use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    /// `---\n<block>\n---\n<body>`, anchored at the start of the document
    static ref DOCUMENT_RE: Regex = Regex::new(r"(?s)\A---\n(.*?)\n---\n(.*)\z").unwrap();

    /// `key: value`, `key: "value"`; keys are ASCII word characters
    static ref FIELD_RE: Regex = Regex::new(r#"\A([A-Za-z0-9_]+):\s*"?([^"]*)"?\z"#).unwrap();
}

/// Front-matter data from a post
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FrontMatter {
    pub title: Option<String>,
    pub date: Option<String>,
    pub slug: Option<String>,
    pub excerpt: Option<String>,

    /// Keys outside the recognized set, in order of first appearance
    pub extra: IndexMap<String, String>,
}

impl FrontMatter {
    /// Split a raw document into its front-matter block and body.
    ///
    /// Returns `None` when the document does not start with a delimited block.
    pub fn split(document: &str) -> Option<(&str, &str)> {
        let caps = DOCUMENT_RE.captures(document)?;
        let block = caps.get(1)?.as_str();
        let body = caps.get(2).map_or("", |m| m.as_str());
        Some((block, body))
    }

    /// Parse the `key: value` lines of a front-matter block.
    ///
    /// A key appearing twice keeps its last value.
    pub fn parse_block(block: &str) -> Self {
        let mut fm = FrontMatter::default();

        for line in block.split('\n').filter(|l| !l.is_empty()) {
            let Some(caps) = FIELD_RE.captures(line) else {
                tracing::trace!("Ignoring front-matter line: {:?}", line);
                continue;
            };
            let key = &caps[1];
            let value = caps[2].to_string();

            match key {
                "title" => fm.title = Some(value),
                "date" => fm.date = Some(value),
                "slug" => fm.slug = Some(value),
                "excerpt" => fm.excerpt = Some(value),
                _ => {
                    fm.extra.insert(key.to_string(), value);
                }
            }
        }

        fm
    }

    /// Parse front-matter from a raw document.
    /// Returns (front_matter, body), or `None` if there is no front-matter.
    pub fn parse(document: &str) -> Option<(Self, &str)> {
        let (block, body) = Self::split(document)?;
        Some((Self::parse_block(block), body))
    }
}
