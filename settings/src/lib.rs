//! Bronzeman configuration.
//!
//! Settings are read from a RON document (`bronzeman.settings.ron` by default). Every field is
//! optional; missing fields fall back to the built-in policy. A missing file means defaults, a
//! malformed one is logged and also falls back to defaults.

use {
    bevy::prelude::*,
    item_components::{ContainerId, ItemId, OWNED_CONTAINERS},
    serde::Deserialize,
    std::{
        fs, io,
        path::{Path, PathBuf},
        time::Duration,
    },
    thiserror::Error,
};

pub const DEFAULT_SETTINGS_FILE: &str = "bronzeman.settings.ron";

/// Note template id carried by proper noted duplicates of an item.
pub const NOTED_TEMPLATE_ID: i32 = 799;

/// Raw item ids at or below this value are placeholders for an empty slot.
pub const PLACEHOLDER_ITEM_ID: i32 = 1;

/// Opacity of dimmed exchange listing elements. Matches a 70/255 transparency.
pub const DIMMED_OPACITY: f32 = 1.0 - 70.0 / 255.0;

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: ron::error::SpannedError,
    },
}

#[derive(Resource, Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct BronzemanSettings {
    /// Containers whose contents count as evidence of ownership.
    pub owned_containers: Vec<ContainerId>,
    /// Highest raw item id treated as an empty-slot placeholder.
    pub placeholder_item_id: i32,
    /// Note template a noted variant must carry to unlock its base item.
    pub noted_template: i32,
    /// Items unlocked for a profile that has no record yet, in unlock order.
    pub default_unlocks: Vec<ItemId>,
    /// Opacity applied to the dimmed elements of a locked listing row.
    pub dimmed_opacity: f32,
    /// Directory holding one sub-directory per profile.
    pub profiles_dir: PathBuf,
    /// File name of the unlock record inside a profile directory.
    pub record_file: String,
    /// How long a single unlock notification stays on screen.
    pub notification_seconds: f32,
}

impl Default for BronzemanSettings {
    fn default() -> Self {
        Self {
            owned_containers: OWNED_CONTAINERS.to_vec(),
            placeholder_item_id: PLACEHOLDER_ITEM_ID,
            noted_template: NOTED_TEMPLATE_ID,
            default_unlocks: vec![ItemId::COINS, ItemId::OLD_SCHOOL_BOND],
            dimmed_opacity: DIMMED_OPACITY,
            profiles_dir: PathBuf::from("profiles"),
            record_file: "bronzeman-unlocks.txt".to_string(),
            notification_seconds: 4.0,
        }
    }
}

impl BronzemanSettings {
    pub fn from_ron_str(source: &str, path: &Path) -> Result<Self, SettingsError> {
        ron::from_str(source).map_err(|source| SettingsError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// How long one unlock notification stays on screen. Negative or NaN values mean no
    /// time at all, values too large for a `Duration` saturate.
    pub fn notification_duration(&self) -> Duration {
        Duration::try_from_secs_f32(self.notification_seconds.max(0.0)).unwrap_or(Duration::MAX)
    }

    /// Reads settings from `path`. A missing file yields `Ok(None)`.
    pub fn load(path: &Path) -> Result<Option<Self>, SettingsError> {
        let source = match fs::read_to_string(path) {
            Ok(source) => source,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(source) => {
                return Err(SettingsError::Read {
                    path: path.to_path_buf(),
                    source,
                });
            }
        };
        Self::from_ron_str(&source, path).map(Some)
    }

    /// Like [`BronzemanSettings::load`] but never fails.
    pub fn load_or_default(path: &Path) -> Self {
        match Self::load(path) {
            Ok(Some(settings)) => {
                info!(path = %path.display(), "loaded bronzeman settings");
                settings
            }
            Ok(None) => {
                info!(path = %path.display(), "no settings file, using defaults");
                Self::default()
            }
            Err(e) => {
                error!("{e}, using default settings");
                Self::default()
            }
        }
    }
}

/// Inserts [`BronzemanSettings`] unless the app already has them.
#[derive(Default)]
pub struct SettingsPlugin {
    /// Settings file to read. Defaults are used when `None`.
    pub path: Option<PathBuf>,
}

impl SettingsPlugin {
    pub fn from_file(path: impl Into<PathBuf>) -> Self {
        Self {
            path: Some(path.into()),
        }
    }
}

impl Plugin for SettingsPlugin {
    fn build(&self, app: &mut App) {
        if app.world().contains_resource::<BronzemanSettings>() {
            return;
        }
        let settings = match &self.path {
            Some(path) => BronzemanSettings::load_or_default(path),
            None => BronzemanSettings::default(),
        };
        app.insert_resource(settings);
    }
}

#[cfg(test)]
mod tests {
    use {super::*, std::io::Write};

    #[test]
    fn partial_document_keeps_defaults() {
        let settings = BronzemanSettings::from_ron_str(
            "(dimmed_opacity: 0.5, default_unlocks: [995])",
            Path::new("inline"),
        )
        .unwrap();

        assert_eq!(settings.dimmed_opacity, 0.5);
        assert_eq!(settings.default_unlocks, vec![ItemId::COINS]);
        assert_eq!(settings.noted_template, NOTED_TEMPLATE_ID);
        assert_eq!(settings.owned_containers.len(), OWNED_CONTAINERS.len());
    }

    #[test]
    fn notification_duration_never_panics() {
        let with_seconds = |notification_seconds| BronzemanSettings {
            notification_seconds,
            ..default()
        };

        assert_eq!(with_seconds(4.0).notification_duration(), Duration::from_secs(4));
        assert_eq!(with_seconds(-1.0).notification_duration(), Duration::ZERO);
        assert_eq!(with_seconds(f32::NAN).notification_duration(), Duration::ZERO);
        assert_eq!(with_seconds(1e30).notification_duration(), Duration::MAX);
        assert_eq!(with_seconds(f32::INFINITY).notification_duration(), Duration::MAX);
    }

    #[test]
    fn missing_file_is_not_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let loaded = BronzemanSettings::load(&dir.path().join(DEFAULT_SETTINGS_FILE)).unwrap();
        assert!(loaded.is_none());
    }

    #[test]
    fn malformed_file_falls_back_to_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "(dimmed_opacity: \"very\")").unwrap();

        assert!(matches!(
            BronzemanSettings::load(file.path()),
            Err(SettingsError::Parse { .. })
        ));
        assert_eq!(
            BronzemanSettings::load_or_default(file.path()),
            BronzemanSettings::default()
        );
    }

    #[test]
    fn plugin_keeps_existing_settings() {
        let mut app = App::new();
        app.insert_resource(BronzemanSettings {
            record_file: "custom.txt".into(),
            ..default()
        });
        app.add_plugins(SettingsPlugin::default());

        assert_eq!(
            app.world().resource::<BronzemanSettings>().record_file,
            "custom.txt"
        );
    }
}
