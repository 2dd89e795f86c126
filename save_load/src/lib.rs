//! Per-profile persistence of unlocked items.
//!
//! This crate provides:
//! - The [`ProfileStore`] trait: a durable map from profile key to an ordered list of item ids
//! - [`FileProfileStore`]: one plain text record per profile directory
//! - [`MemoryProfileStore`]: the same record format kept in memory
//! - The record codec: one decimal item id per line, in unlock order

mod record;

pub use record::{decode_record, encode_record};

use {
    bevy::{platform::collections::HashMap, prelude::*},
    item_components::{ItemId, ProfileKey},
    percent_encoding::{NON_ALPHANUMERIC, utf8_percent_encode},
    settings::BronzemanSettings,
    std::{
        fs, io,
        ops::{Deref, DerefMut},
        path::{Path, PathBuf},
    },
    thiserror::Error,
};

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to read unlock record {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to write unlock record {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

pub trait ProfileStore: Send + Sync {
    /// Reads the record of `profile`. `Ok(None)` means the profile has no record yet.
    fn read(&self, profile: &ProfileKey) -> Result<Option<Vec<ItemId>>, StoreError>;

    /// Replaces the record of `profile` with `items`.
    fn write(&mut self, profile: &ProfileKey, items: &[ItemId]) -> Result<(), StoreError>;
}

/// The store the app persists unlocks to.
#[derive(Resource)]
pub struct ProfileStorage(Box<dyn ProfileStore>);

impl ProfileStorage {
    pub fn new(store: impl ProfileStore + 'static) -> Self {
        Self(Box::new(store))
    }
}

impl Deref for ProfileStorage {
    type Target = dyn ProfileStore;

    fn deref(&self) -> &Self::Target {
        self.0.as_ref()
    }
}

impl DerefMut for ProfileStorage {
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.0.as_mut()
    }
}

/// Stores every profile's record at `<root>/<profile>/<record_file>`.
///
/// Profile keys are percent encoded so any key maps to a single safe directory name.
#[derive(Debug, Clone)]
pub struct FileProfileStore {
    root: PathBuf,
    record_file: String,
}

impl FileProfileStore {
    pub fn new(root: impl Into<PathBuf>, record_file: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            record_file: record_file.into(),
        }
    }

    pub fn from_settings(settings: &BronzemanSettings) -> Self {
        Self::new(settings.profiles_dir.clone(), settings.record_file.clone())
    }

    pub fn profile_dir(&self, profile: &ProfileKey) -> PathBuf {
        let dir_name = utf8_percent_encode(profile.as_str(), NON_ALPHANUMERIC).to_string();
        self.root.join(dir_name)
    }

    pub fn record_path(&self, profile: &ProfileKey) -> PathBuf {
        self.profile_dir(profile).join(&self.record_file)
    }
}

impl ProfileStore for FileProfileStore {
    fn read(&self, profile: &ProfileKey) -> Result<Option<Vec<ItemId>>, StoreError> {
        let path = self.record_path(profile);
        match fs::read_to_string(&path) {
            Ok(text) => Ok(Some(decode_record(&text))),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(source) => Err(StoreError::Read { path, source }),
        }
    }

    fn write(&mut self, profile: &ProfileKey, items: &[ItemId]) -> Result<(), StoreError> {
        let path = self.record_path(profile);
        let write_error = |source| StoreError::Write {
            path: path.clone(),
            source,
        };

        fs::create_dir_all(self.profile_dir(profile)).map_err(write_error)?;
        write_replacing(&path, &encode_record(items)).map_err(write_error)?;
        debug!(path = %path.display(), count = items.len(), "wrote unlock record");
        Ok(())
    }
}

/// Writes `content` next to `path` and renames it over `path`, so an interrupted write never
/// leaves a truncated record behind.
fn write_replacing(path: &Path, content: &str) -> io::Result<()> {
    let file_name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();
    let tmp_path = path.with_file_name(format!(".{file_name}.tmp"));

    fs::write(&tmp_path, content)?;
    fs::rename(&tmp_path, path)
}

/// Keeps records in memory, encoded exactly like the file store does.
#[derive(Debug, Default, Clone)]
pub struct MemoryProfileStore {
    records: HashMap<ProfileKey, String>,
}

impl MemoryProfileStore {
    /// Stores `text` as the raw record of `profile`.
    pub fn insert_raw(&mut self, profile: ProfileKey, text: impl Into<String>) {
        self.records.insert(profile, text.into());
    }

    pub fn raw(&self, profile: &ProfileKey) -> Option<&str> {
        self.records.get(profile).map(String::as_str)
    }
}

impl ProfileStore for MemoryProfileStore {
    fn read(&self, profile: &ProfileKey) -> Result<Option<Vec<ItemId>>, StoreError> {
        Ok(self.raw(profile).map(decode_record))
    }

    fn write(&mut self, profile: &ProfileKey, items: &[ItemId]) -> Result<(), StoreError> {
        self.records.insert(profile.clone(), encode_record(items));
        Ok(())
    }
}

/// Inserts a [`FileProfileStore`] built from [`BronzemanSettings`] unless the app already has a
/// [`ProfileStorage`].
pub struct SaveLoadPlugin;

impl Plugin for SaveLoadPlugin {
    fn build(&self, app: &mut App) {
        if app.world().contains_resource::<ProfileStorage>() {
            return;
        }
        let store = match app.world().get_resource::<BronzemanSettings>() {
            Some(settings) => FileProfileStore::from_settings(settings),
            None => FileProfileStore::from_settings(&BronzemanSettings::default()),
        };
        info!(root = %store.root.display(), "persisting unlocks to profile directories");
        app.insert_resource(ProfileStorage::new(store));
    }
}
