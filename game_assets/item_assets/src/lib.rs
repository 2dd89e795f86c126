//! Item metadata and canonicalization.
//!
//! The host owns the real item database. The core only needs one question answered: which base
//! item does a raw (possibly noted) id stand for, and is it a proper noted duplicate. That
//! question is the [`Canonicalizer`] trait. [`ItemCatalog`] is a RON backed implementation used
//! by the demo host and the tests.

use {
    bevy::{platform::collections::HashMap, prelude::*},
    item_components::ItemId,
    serde::Deserialize,
    std::{
        fs, io,
        ops::Deref,
        path::{Path, PathBuf},
    },
    thiserror::Error,
};

/// Canonical identity of a raw item id.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ItemVariant {
    pub canonical: ItemId,
    /// Note template of the raw item, `None` when it has none.
    pub note_template: Option<i32>,
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CanonicalizeError {
    #[error("unknown item {0}")]
    UnknownItem(ItemId),
    #[error("item {item} is a variant of unknown item {base}")]
    BrokenLink { item: ItemId, base: ItemId },
}

pub trait Canonicalizer: Send + Sync {
    fn canonicalize(&self, raw: ItemId) -> Result<ItemVariant, CanonicalizeError>;

    /// Human readable name of an item, if known.
    fn display_name(&self, _item: ItemId) -> Option<String> {
        None
    }
}

/// The canonicalizer the app uses.
#[derive(Resource)]
pub struct ItemCanonicalizer(Box<dyn Canonicalizer>);

impl ItemCanonicalizer {
    pub fn new(canonicalizer: impl Canonicalizer + 'static) -> Self {
        Self(Box::new(canonicalizer))
    }
}

impl Deref for ItemCanonicalizer {
    type Target = dyn Canonicalizer;

    fn deref(&self) -> &Self::Target {
        self.0.as_ref()
    }
}

/// One entry of an item catalog file.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ItemDefinition {
    pub id: ItemId,
    pub name: String,
    /// Base item this id is a variant of (noted copy, bank placeholder, ...).
    #[serde(default)]
    pub base: Option<ItemId>,
    #[serde(default)]
    pub note_template: Option<i32>,
}

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("failed to read item catalog {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to parse item catalog {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: ron::error::SpannedError,
    },
}

/// In-memory item database keyed by raw item id.
#[derive(Debug, Default, Clone)]
pub struct ItemCatalog {
    items: HashMap<ItemId, ItemDefinition>,
}

impl ItemCatalog {
    pub fn from_definitions(definitions: impl IntoIterator<Item = ItemDefinition>) -> Self {
        let items = definitions
            .into_iter()
            .map(|definition| (definition.id, definition))
            .collect();
        Self { items }
    }

    /// Parses a RON list of [`ItemDefinition`]s.
    pub fn from_ron_str(source: &str, path: &Path) -> Result<Self, CatalogError> {
        let definitions: Vec<ItemDefinition> =
            ron::from_str(source).map_err(|source| CatalogError::Parse {
                path: path.to_path_buf(),
                source,
            })?;
        Ok(Self::from_definitions(definitions))
    }

    pub fn load(path: &Path) -> Result<Self, CatalogError> {
        let source = fs::read_to_string(path).map_err(|source| CatalogError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_ron_str(&source, path)
    }

    /// Adds or replaces a definition.
    pub fn insert(&mut self, definition: ItemDefinition) {
        self.items.insert(definition.id, definition);
    }

    pub fn get(&self, id: ItemId) -> Option<&ItemDefinition> {
        self.items.get(&id)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl Canonicalizer for ItemCatalog {
    fn canonicalize(&self, raw: ItemId) -> Result<ItemVariant, CanonicalizeError> {
        let definition = self
            .items
            .get(&raw)
            .ok_or(CanonicalizeError::UnknownItem(raw))?;

        let canonical = match definition.base {
            Some(base) if !self.items.contains_key(&base) => {
                return Err(CanonicalizeError::BrokenLink { item: raw, base });
            }
            Some(base) => base,
            None => raw,
        };

        Ok(ItemVariant {
            canonical,
            note_template: definition.note_template,
        })
    }

    fn display_name(&self, item: ItemId) -> Option<String> {
        self.items.get(&item).map(|definition| definition.name.clone())
    }
}
