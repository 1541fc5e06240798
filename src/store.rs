use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use eyre::WrapErr;
use serde::{Deserialize, Serialize};

use crate::festival::Festival;

const CURRENT_FILE: &str = "current.json";
const FESTIVALS_FILE: &str = "festivals.json";

/// Where sessions live between commands. The engine never touches storage
/// itself; callers load, mutate, and save through this.
pub trait SessionRepository {
    fn load_current(&self) -> eyre::Result<Option<Festival>>;
    fn save_current(&self, festival: &Festival) -> eyre::Result<()>;
    fn clear_current(&self) -> eyre::Result<()>;

    fn save_named(&self, name: &str, festival: &Festival) -> eyre::Result<()>;
    fn load_named(&self, name: &str) -> eyre::Result<Option<Festival>>;
    fn list_named(&self) -> eyre::Result<Vec<SavedFestivalInfo>>;
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoredFestival {
    pub saved_at: DateTime<Utc>,
    pub festival: Festival,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SavedFestivalInfo {
    pub name: String,
    pub saved_at: DateTime<Utc>,
}

/// JSON files in one directory: the current session plus a map of named
/// festivals.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    dir: PathBuf,
}

impl JsonFileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn current_path(&self) -> PathBuf {
        self.dir.join(CURRENT_FILE)
    }

    fn festivals_path(&self) -> PathBuf {
        self.dir.join(FESTIVALS_FILE)
    }

    fn read_festivals(&self) -> eyre::Result<BTreeMap<String, StoredFestival>> {
        let path = self.festivals_path();
        if !path.exists() {
            return Ok(BTreeMap::new());
        }
        let bytes = std::fs::read(&path).wrap_err("read festivals file")?;
        serde_json::from_slice(&bytes).wrap_err("parse festivals file")
    }

    fn write_json<T: Serialize>(&self, path: &Path, value: &T) -> eyre::Result<()> {
        std::fs::create_dir_all(&self.dir).wrap_err("create store directory")?;
        let json = serde_json::to_vec_pretty(value).wrap_err("serialize json")?;
        std::fs::write(path, json).wrap_err_with(|| format!("write {}", path.display()))
    }
}

impl SessionRepository for JsonFileStore {
    /// A corrupt current session is discarded rather than blocking start-up.
    fn load_current(&self) -> eyre::Result<Option<Festival>> {
        let path = self.current_path();
        if !path.exists() {
            return Ok(None);
        }
        let bytes = std::fs::read(&path).wrap_err("read current session")?;
        let parsed = serde_json::from_slice::<Festival>(&bytes)
            .map_err(eyre::Report::from)
            .and_then(|festival| {
                festival.check_consistency()?;
                Ok(festival)
            });

        match parsed {
            Ok(festival) => {
                tracing::debug!("Loaded current session from {}", path.display());
                Ok(Some(festival))
            }
            Err(e) => {
                tracing::error!("Could not load saved session, discarding it: {:#}", e);
                std::fs::remove_file(&path).wrap_err("remove corrupt session file")?;
                Ok(None)
            }
        }
    }

    fn save_current(&self, festival: &Festival) -> eyre::Result<()> {
        self.write_json(&self.current_path(), festival)
    }

    fn clear_current(&self) -> eyre::Result<()> {
        let path = self.current_path();
        if path.exists() {
            std::fs::remove_file(&path).wrap_err("remove current session")?;
        }
        Ok(())
    }

    fn save_named(&self, name: &str, festival: &Festival) -> eyre::Result<()> {
        let name = name.trim();
        if name.is_empty() {
            return Err(eyre::eyre!("festival name must not be empty"));
        }
        let mut festivals = self.read_festivals()?;
        festivals.insert(
            name.to_string(),
            StoredFestival {
                saved_at: Utc::now(),
                festival: festival.clone(),
            },
        );
        self.write_json(&self.festivals_path(), &festivals)?;
        tracing::info!("Saved festival '{}'", name);
        Ok(())
    }

    fn load_named(&self, name: &str) -> eyre::Result<Option<Festival>> {
        let mut festivals = self.read_festivals()?;
        let Some(stored) = festivals.remove(name.trim()) else {
            return Ok(None);
        };
        stored
            .festival
            .check_consistency()
            .wrap_err_with(|| format!("saved festival '{name}' is inconsistent"))?;
        Ok(Some(stored.festival))
    }

    fn list_named(&self) -> eyre::Result<Vec<SavedFestivalInfo>> {
        Ok(self
            .read_festivals()?
            .into_iter()
            .map(|(name, stored)| SavedFestivalInfo {
                name,
                saved_at: stored.saved_at,
            })
            .collect())
    }
}
