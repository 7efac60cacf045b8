use {
    crate::PersistedProgression,
    ron::ser::PrettyConfig,
    std::{
        fs,
        path::PathBuf,
        sync::Mutex,
    },
    thiserror::Error,
};

#[derive(Debug, Error)]
pub enum ProgressStoreError {
    #[error("i/o error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to serialize progression: {0}")]
    Serialize(#[from] ron::Error),
    #[error("failed to parse {}: {source}", .path.display())]
    Deserialize {
        path: PathBuf,
        #[source]
        source: ron::error::SpannedError,
    },
}

/// Somewhere a run's progression can be kept between sessions.
pub trait ProgressStore: Send + Sync {
    /// `Ok(None)` when nothing has been saved yet.
    fn load(&self) -> Result<Option<PersistedProgression>, ProgressStoreError>;

    fn save(&self, progression: &PersistedProgression) -> Result<(), ProgressStoreError>;
}

/// Keeps progression in a single RON file.
#[derive(Debug, Clone)]
pub struct RonProgressStore {
    pub path: PathBuf,
}

impl RonProgressStore {
    pub const DEFAULT_PATH: &str = "saves/progression.ron";

    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn io_error(&self, source: std::io::Error) -> ProgressStoreError {
        ProgressStoreError::Io {
            path: self.path.clone(),
            source,
        }
    }
}

impl Default for RonProgressStore {
    fn default() -> Self {
        Self::new(Self::DEFAULT_PATH)
    }
}

impl ProgressStore for RonProgressStore {
    fn load(&self) -> Result<Option<PersistedProgression>, ProgressStoreError> {
        if !self.path.exists() {
            return Ok(None);
        }

        let contents = fs::read_to_string(&self.path).map_err(|e| self.io_error(e))?;
        ron::from_str(&contents)
            .map(Some)
            .map_err(|source| ProgressStoreError::Deserialize {
                path: self.path.clone(),
                source,
            })
    }

    fn save(&self, progression: &PersistedProgression) -> Result<(), ProgressStoreError> {
        if let Some(dir) = self.path.parent().filter(|dir| !dir.as_os_str().is_empty()) {
            fs::create_dir_all(dir).map_err(|e| self.io_error(e))?;
        }

        let serialized = ron::ser::to_string_pretty(progression, PrettyConfig::default())?;
        fs::write(&self.path, serialized).map_err(|e| self.io_error(e))
    }
}

/// Store that never touches the disk. Used for tests and tooling.
#[derive(Debug, Default)]
pub struct MemoryProgressStore {
    saved: Mutex<Option<PersistedProgression>>,
}

impl MemoryProgressStore {
    pub fn with(progression: PersistedProgression) -> Self {
        Self {
            saved: Mutex::new(Some(progression)),
        }
    }

    pub fn saved(&self) -> Option<PersistedProgression> {
        self.saved.lock().ok().and_then(|saved| saved.clone())
    }
}

impl ProgressStore for MemoryProgressStore {
    fn load(&self) -> Result<Option<PersistedProgression>, ProgressStoreError> {
        Ok(self.saved())
    }

    fn save(&self, progression: &PersistedProgression) -> Result<(), ProgressStoreError> {
        // a poisoned lock only means a panicking writer, the value is still usable
        let mut saved = self
            .saved
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        *saved = Some(progression.clone());
        Ok(())
    }
}
