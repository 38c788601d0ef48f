use std::path::Path;

use anyhow::{anyhow, Result};
use gray_matter::{engine::YAML, Matter};
use tokio::fs;

use crate::models::{FrontMatter, PostSummary};

/// Split a post source into its front matter and Markdown body.
/// A file with no front matter block yields the default (all-None) metadata.
pub fn parse_front_matter(source: &str) -> Result<(FrontMatter, String)> {
    let matter = Matter::<YAML>::new();
    let parsed = matter
        .parse::<FrontMatter>(source)
        .map_err(|e| anyhow!("failed to parse front matter: {}", e))?;
    Ok((parsed.data.unwrap_or_default(), parsed.content))
}

/// A slug is a single path component chosen by us from a directory name.
/// Anything that could escape the posts root is refused outright.
pub fn is_valid_slug(slug: &str) -> bool {
    !slug.is_empty()
        && slug != "."
        && slug != ".."
        && !slug.contains('/')
        && !slug.contains('\\')
}

/// Scan the posts root and build one summary per post directory.
/// Order follows filesystem enumeration; a subdirectory without a readable
/// `index.md` is skipped, a missing root is an error.
pub async fn list_posts(posts_dir: &Path) -> Result<Vec<PostSummary>> {
    let mut posts = Vec::new();
    let mut entries = fs::read_dir(posts_dir).await?;

    while let Some(entry) = entries.next_entry().await? {
        let path = entry.path();
        if !path.is_dir() {
            continue;
        }

        let source = match fs::read_to_string(path.join("index.md")).await {
            Ok(source) => source,
            Err(_) => continue,
        };

        let slug = entry.file_name().to_string_lossy().into_owned();
        let (front_matter, _) = parse_front_matter(&source)?;

        posts.push(PostSummary {
            title: front_matter.title.unwrap_or_else(|| slug.clone()),
            date: front_matter.date.unwrap_or_else(|| "No Date".to_string()),
            slug,
        });
    }

    Ok(posts)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs as std_fs;
    use tempfile::TempDir;

    fn write_post(root: &Path, slug: &str, source: &str) {
        let dir = root.join(slug);
        std_fs::create_dir_all(&dir).unwrap();
        std_fs::write(dir.join("index.md"), source).unwrap();
    }

    #[test]
    fn splits_front_matter_from_body() {
        let source = "---\ntitle: Hello\ndate: 2026-01-05\n---\n\n# Hi\n";
        let (fm, body) = parse_front_matter(source).unwrap();
        assert_eq!(fm.title.as_deref(), Some("Hello"));
        assert_eq!(fm.date.as_deref(), Some("2026-01-05"));
        assert!(body.contains("# Hi"));
    }

    #[test]
    fn body_without_front_matter_keeps_default_metadata() {
        let (fm, body) = parse_front_matter("just some markdown\n").unwrap();
        assert!(fm.title.is_none());
        assert!(fm.date.is_none());
        assert!(body.contains("just some markdown"));
    }

    #[test]
    fn rejects_traversal_slugs() {
        assert!(is_valid_slug("hello-world"));
        assert!(is_valid_slug("2026-retrospective"));
        assert!(!is_valid_slug(""));
        assert!(!is_valid_slug("."));
        assert!(!is_valid_slug(".."));
        assert!(!is_valid_slug("../secrets"));
        assert!(!is_valid_slug("a\\b"));
    }

    #[tokio::test]
    async fn lists_one_summary_per_post_directory() {
        let root = TempDir::new().unwrap();
        write_post(root.path(), "first", "---\ntitle: First\ndate: 2026-01-01\n---\nbody");
        write_post(root.path(), "second", "---\ntitle: Second\ndate: 2026-02-01\n---\nbody");
        write_post(root.path(), "third", "---\ntitle: Third\ndate: 2026-03-01\n---\nbody");

        let posts = list_posts(root.path()).await.unwrap();
        assert_eq!(posts.len(), 3);
    }

    #[tokio::test]
    async fn skips_directories_without_index_md() {
        let root = TempDir::new().unwrap();
        write_post(root.path(), "real", "---\ntitle: Real\n---\nbody");
        std_fs::create_dir_all(root.path().join("empty-dir")).unwrap();
        std_fs::write(root.path().join("stray.md"), "not a post").unwrap();

        let posts = list_posts(root.path()).await.unwrap();
        assert_eq!(posts.len(), 1);
        assert_eq!(posts[0].slug, "real");
    }

    #[tokio::test]
    async fn missing_title_and_date_get_listing_defaults() {
        let root = TempDir::new().unwrap();
        write_post(root.path(), "bare", "body with no front matter\n");

        let posts = list_posts(root.path()).await.unwrap();
        assert_eq!(posts[0].title, "bare");
        assert_eq!(posts[0].date, "No Date");
    }

    #[tokio::test]
    async fn missing_posts_root_is_an_error() {
        let root = TempDir::new().unwrap();
        let gone = root.path().join("nope");
        assert!(list_posts(&gone).await.is_err());
    }
}
