use serde::Deserialize;

/// YAML front matter block at the top of a post's `index.md`.
/// Both fields are optional; callers supply the fallbacks.
#[derive(Deserialize, Debug, Clone, Default)]
pub struct FrontMatter {
    pub title: Option<String>,
    pub date: Option<String>,
}

/// One row on the index page. Built fresh per request, never stored.
#[derive(Debug, Clone)]
pub struct PostSummary {
    pub slug: String,
    pub title: String,
    pub date: String,
}

/// A fully rendered post, ready for the detail template.
#[derive(Debug, Clone)]
pub struct PostDetail {
    pub title: String,
    pub date: String,
    pub content_html: String,
}
