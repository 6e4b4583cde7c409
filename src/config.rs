use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::{fs, io, path::Path};

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct SiteConfig {
    #[serde(default = "default_title")]
    pub title: String,
    pub author: Option<String>,
    pub description: Option<String>,
    /// Link to a downloadable resume, shown in the resume section.
    pub resume: Option<String>,
    /// Directory that content resources are read from.
    #[serde(default = "default_root")]
    pub root: String,
    #[serde(default = "default_posts_index")]
    pub posts_index: String,
    #[serde(default = "default_projects")]
    pub projects: String,
    #[serde(default = "default_about")]
    pub about: String,
    #[serde(default = "default_goals")]
    pub goals: String,
    #[serde(default = "default_posts_per_page")]
    pub posts_per_page: usize,
    /// `chrono` format string.
    #[serde(default = "default_date_format")]
    pub date_format: String,
    #[serde(default = "default_service_worker")]
    pub service_worker: Option<String>,
    #[serde(default = "default_preferences")]
    pub preferences: String,
    #[serde(default = "default_address")]
    pub address: String,
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("couldn't read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: io::Error,
    },
    #[error("invalid config {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: toml::de::Error,
    },
}

fn default_title() -> String {
    "Portfolio".to_owned()
}

fn default_root() -> String {
    String::from(".")
}

fn default_posts_index() -> String {
    String::from("blog/posts.json")
}

fn default_projects() -> String {
    String::from("data/projects.json")
}

fn default_about() -> String {
    String::from("data/about.json")
}

fn default_goals() -> String {
    String::from("data/goals.json")
}

fn default_posts_per_page() -> usize {
    5
}

fn default_date_format() -> String {
    String::from("%B %-d, %Y")
}

fn default_service_worker() -> Option<String> {
    Some(String::from("/sw.js"))
}

fn default_preferences() -> String {
    String::from(".folio-preferences.json")
}

fn default_address() -> String {
    String::from("0.0.0.0:8080")
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            title: default_title(),
            author: None,
            description: None,
            resume: None,
            root: default_root(),
            posts_index: default_posts_index(),
            projects: default_projects(),
            about: default_about(),
            goals: default_goals(),
            posts_per_page: default_posts_per_page(),
            date_format: default_date_format(),
            service_worker: default_service_worker(),
            preferences: default_preferences(),
            address: default_address(),
        }
    }
}

impl SiteConfig {
    /// A missing file yields the defaults.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = match fs::read_to_string(path) {
            Ok(text) => text,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "no config file, using defaults");
                return Ok(Self::default());
            }
            Err(source) => {
                return Err(ConfigError::Io {
                    path: path.display().to_string(),
                    source,
                })
            }
        };
        toml::from_str(&text).map_err(|source| ConfigError::Parse {
            path: path.display().to_string(),
            source,
        })
    }

    pub fn format_date(&self, date: NaiveDate) -> String {
        date.format(&self.date_format).to_string()
    }

    pub fn page_size(&self) -> usize {
        self.posts_per_page.max(1)
    }
}
