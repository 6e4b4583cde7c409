use std::{
    collections::BTreeMap,
    fs, io,
    path::{Path, PathBuf},
};

/// Key the theme is stored under.
pub const THEME_KEY: &str = "theme";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn name(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum PreferencesError {
    #[error("couldn't access preferences {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: io::Error,
    },
    #[error("corrupt preferences {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}

/// String key-value storage that outlives a page session.
pub trait Storage {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: &str) -> Result<(), PreferencesError>;
}

#[derive(Debug, Default)]
pub struct MemoryStorage(BTreeMap<String, String>);

impl Storage for MemoryStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.0.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), PreferencesError> {
        self.0.insert(key.to_owned(), value.to_owned());
        Ok(())
    }
}

/// JSON object on disk, rewritten on every `set`.
#[derive(Debug)]
pub struct FileStorage {
    path: PathBuf,
    values: BTreeMap<String, String>,
}

impl FileStorage {
    pub fn open(path: impl AsRef<Path>) -> Result<Self, PreferencesError> {
        let path = path.as_ref().to_path_buf();
        let values = match fs::read_to_string(&path) {
            Ok(text) => serde_json::from_str(&text).map_err(|source| PreferencesError::Parse {
                path: path.display().to_string(),
                source,
            })?,
            Err(e) if e.kind() == io::ErrorKind::NotFound => BTreeMap::new(),
            Err(source) => {
                return Err(PreferencesError::Io {
                    path: path.display().to_string(),
                    source,
                })
            }
        };
        Ok(Self { path, values })
    }
}

impl Storage for FileStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), PreferencesError> {
        self.values.insert(key.to_owned(), value.to_owned());
        let text = serde_json::to_string_pretty(&self.values).map_err(|source| {
            PreferencesError::Parse {
                path: self.path.display().to_string(),
                source,
            }
        })?;
        fs::write(&self.path, text).map_err(|source| PreferencesError::Io {
            path: self.path.display().to_string(),
            source,
        })
    }
}

/// Anything but `"dark"` is light.
pub fn load_theme(storage: &impl Storage) -> Theme {
    match storage.get(THEME_KEY).as_deref() {
        Some("dark") => Theme::Dark,
        _ => Theme::Light,
    }
}

pub fn toggle_theme(storage: &mut impl Storage) -> Result<Theme, PreferencesError> {
    let theme = load_theme(&*storage).toggled();
    storage.set(THEME_KEY, theme.name())?;
    tracing::debug!(theme = theme.name(), "theme toggled");
    Ok(theme)
}
