use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::warn;

/// Server configuration, read from `blog.toml` in the working directory.
/// Every field has a default so the file itself is optional.
#[derive(Deserialize, Debug, Clone)]
#[serde(default)]
pub struct BlogConfig {
    pub site_title: String,
    pub content_dir: PathBuf,
    pub port: u16,
}

impl Default for BlogConfig {
    fn default() -> Self {
        Self {
            site_title: "My Blog".to_string(),
            content_dir: PathBuf::from("content"),
            port: 8080,
        }
    }
}

impl BlogConfig {
    pub fn load(path: &Path) -> Self {
        let text = match std::fs::read_to_string(path) {
            Ok(text) => text,
            Err(_) => return Self::default(),
        };
        match toml::from_str(&text) {
            Ok(config) => config,
            Err(e) => {
                warn!("ignoring malformed {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    pub fn posts_dir(&self) -> PathBuf {
        self.content_dir.join("posts")
    }

    pub fn static_dir(&self) -> PathBuf {
        self.content_dir.join("static")
    }

    pub fn layout_path(&self) -> PathBuf {
        self.content_dir.join("layout.html")
    }
}
