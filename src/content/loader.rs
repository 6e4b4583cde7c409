use serde::de::DeserializeOwned;
use std::{
    cell::RefCell,
    collections::HashMap,
    future::Future,
    io,
    path::{Component, Path, PathBuf},
};

#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("{0} not found")]
    NotFound(String),
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: io::Error,
    },
    #[error("failed to parse {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Fetches resources relative to the site root.
pub trait Loader {
    fn fetch(&self, path: &str) -> impl Future<Output = Result<String, LoadError>>;
}

pub async fn load_json<T: DeserializeOwned>(
    loader: &impl Loader,
    path: &str,
) -> Result<T, LoadError> {
    let text = loader.fetch(path).await?;
    serde_json::from_str(&text).map_err(|source| LoadError::Parse {
        path: path.to_owned(),
        source,
    })
}

/// Reads resources from a directory, the way a static host would serve them.
#[derive(Debug, Clone)]
pub struct FsLoader {
    root: PathBuf,
}

impl FsLoader {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// `None` if `path` would escape the root.
    pub fn resolve(&self, path: &str) -> Option<PathBuf> {
        let relative = Path::new(path.trim_start_matches('/'));
        if relative
            .components()
            .all(|c| matches!(c, Component::Normal(_) | Component::CurDir))
        {
            Some(self.root.join(relative))
        } else {
            None
        }
    }
}

impl Loader for FsLoader {
    async fn fetch(&self, path: &str) -> Result<String, LoadError> {
        let resolved = self
            .resolve(path)
            .ok_or_else(|| LoadError::NotFound(path.to_owned()))?;
        match tokio::fs::read_to_string(&resolved).await {
            Ok(text) => Ok(text),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                Err(LoadError::NotFound(path.to_owned()))
            }
            Err(source) => Err(LoadError::Io {
                path: path.to_owned(),
                source,
            }),
        }
    }
}

/// In-memory resources. Records every request.
#[derive(Debug, Default)]
pub struct MemoryLoader {
    resources: HashMap<String, String>,
    requests: RefCell<Vec<String>>,
}

impl MemoryLoader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, path: &str, content: impl Into<String>) -> Self {
        self.insert(path, content);
        self
    }

    pub fn insert(&mut self, path: &str, content: impl Into<String>) {
        self.resources.insert(path.to_owned(), content.into());
    }

    pub fn remove(&mut self, path: &str) {
        self.resources.remove(path);
    }

    pub fn requests(&self) -> Vec<String> {
        self.requests.borrow().clone()
    }

    pub fn request_count(&self, path: &str) -> usize {
        self.requests.borrow().iter().filter(|p| *p == path).count()
    }
}

impl Loader for MemoryLoader {
    async fn fetch(&self, path: &str) -> Result<String, LoadError> {
        self.requests.borrow_mut().push(path.to_owned());
        self.resources
            .get(path)
            .cloned()
            .ok_or_else(|| LoadError::NotFound(path.to_owned()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::executor::block_on;

    #[test]
    fn memory_loader_records_requests() {
        let loader = MemoryLoader::new().with("a.json", "[1, 2]");
        let numbers: Vec<u32> = block_on(load_json(&loader, "a.json")).unwrap();
        assert_eq!(numbers, vec![1, 2]);
        assert!(matches!(
            block_on(loader.fetch("b.json")),
            Err(LoadError::NotFound(_))
        ));
        assert_eq!(loader.requests(), vec!["a.json", "b.json"]);
    }

    #[test]
    fn load_json_reports_parse_errors() {
        let loader = MemoryLoader::new().with("a.json", "{");
        let result = block_on(load_json::<Vec<u32>>(&loader, "a.json"));
        assert!(matches!(result, Err(LoadError::Parse { path, .. }) if path == "a.json"));
    }

    #[test]
    fn fs_loader_stays_inside_root() {
        let loader = FsLoader::new("/srv/site");
        assert_eq!(
            loader.resolve("/blog/posts.json"),
            Some(PathBuf::from("/srv/site/blog/posts.json"))
        );
        assert_eq!(loader.resolve("../etc/passwd"), None);
        assert_eq!(loader.resolve("blog/../../x"), None);
    }

    #[tokio::test]
    async fn fs_loader_reads_files() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(dir.path().join("blog")).unwrap();
        std::fs::write(dir.path().join("blog/posts.json"), "[]").unwrap();

        let loader = FsLoader::new(dir.path());
        assert_eq!(loader.fetch("blog/posts.json").await.unwrap(), "[]");
        assert!(matches!(
            loader.fetch("blog/missing.json").await,
            Err(LoadError::NotFound(path)) if path == "blog/missing.json"
        ));
    }
}
