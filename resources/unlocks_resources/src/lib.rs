use {
    bevy::{platform::collections::HashSet, prelude::*},
    item_components::{ItemId, ProfileKey},
    save_load::{ProfileStore, StoreError},
};

/// Items the active profile has obtained, in unlock order.
///
/// Exists only while a profile is active. Every new unlock is written through to the
/// [`ProfileStore`] before it is reported.
#[derive(Resource, Debug, Clone)]
pub struct UnlockRegistry {
    profile: ProfileKey,
    items: Vec<ItemId>,
    index: HashSet<ItemId>,
}

/// Result of [`UnlockRegistry::record_unlock`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnlockOutcome {
    AlreadyUnlocked,
    /// Added and persisted.
    Unlocked,
    /// Added, but the record could not be written. The item stays unlocked for this session.
    UnlockedUnsaved,
}

impl UnlockOutcome {
    pub fn is_new(self) -> bool {
        !matches!(self, UnlockOutcome::AlreadyUnlocked)
    }
}

/// A registry fresh from [`UnlockRegistry::load`].
#[derive(Debug)]
pub struct LoadedRegistry {
    pub registry: UnlockRegistry,
    /// Default items unlocked because the profile had no record.
    pub seeded: Vec<ItemId>,
}

impl UnlockRegistry {
    pub fn new(profile: ProfileKey) -> Self {
        Self {
            profile,
            items: Vec::new(),
            index: HashSet::default(),
        }
    }

    /// Builds a registry from already known items. Repeated ids keep their first position.
    pub fn from_items(profile: ProfileKey, items: impl IntoIterator<Item = ItemId>) -> Self {
        let mut registry = Self::new(profile);
        for item in items {
            if registry.index.insert(item) {
                registry.items.push(item);
            } else {
                debug!(profile = %registry.profile, %item, "dropping duplicate unlock");
            }
        }
        registry
    }

    /// Loads the registry of `profile`.
    ///
    /// A profile without a record gets an empty record created and `defaults` unlocked, each
    /// persisted immediately. A store failure is logged and leaves the registry empty.
    pub fn load(
        profile: ProfileKey,
        store: &mut dyn ProfileStore,
        defaults: &[ItemId],
    ) -> LoadedRegistry {
        let mut registry = Self::new(profile);
        let mut seeded = Vec::new();

        match store.read(&registry.profile) {
            Ok(Some(items)) => {
                registry = Self::from_items(registry.profile, items);
                info!(profile = %registry.profile, count = registry.len(), "loaded unlocks");
            }
            Ok(None) => {
                info!(profile = %registry.profile, "no unlock record, unlocking default items");
                if let Err(e) = registry.persist(store) {
                    error!(profile = %registry.profile, "failed to create unlock record: {e}");
                    return LoadedRegistry { registry, seeded };
                }
                for &item in defaults {
                    if registry.record_unlock(item, store).is_new() {
                        seeded.push(item);
                    }
                }
            }
            Err(e) => {
                error!(profile = %registry.profile, "failed to load unlocks: {e}");
            }
        }

        LoadedRegistry { registry, seeded }
    }

    pub fn profile(&self) -> &ProfileKey {
        &self.profile
    }

    pub fn items(&self) -> &[ItemId] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn contains(&self, item: ItemId) -> bool {
        self.index.contains(&item)
    }

    /// Unlocks `item` and rewrites the profile's record. Does nothing if already unlocked.
    pub fn record_unlock(&mut self, item: ItemId, store: &mut dyn ProfileStore) -> UnlockOutcome {
        if !self.index.insert(item) {
            return UnlockOutcome::AlreadyUnlocked;
        }
        self.items.push(item);

        match self.persist(store) {
            Ok(()) => {
                info!(profile = %self.profile, %item, "item unlocked");
                UnlockOutcome::Unlocked
            }
            Err(e) => {
                error!(profile = %self.profile, %item, "item unlocked but not saved: {e}");
                UnlockOutcome::UnlockedUnsaved
            }
        }
    }

    /// Overwrites the profile's record with the full unlock list.
    pub fn persist(&self, store: &mut dyn ProfileStore) -> Result<(), StoreError> {
        store.write(&self.profile, &self.items)
    }
}

#[cfg(test)]
mod tests {
    use {
        super::*,
        save_load::MemoryProfileStore,
        std::{io, path::PathBuf},
    };

    const DEFAULTS: [ItemId; 2] = [ItemId::COINS, ItemId::OLD_SCHOOL_BOND];

    /// Store whose reads and writes always fail.
    struct BrokenStore;

    impl ProfileStore for BrokenStore {
        fn read(&self, _profile: &ProfileKey) -> Result<Option<Vec<ItemId>>, StoreError> {
            Err(StoreError::Read {
                path: PathBuf::from("broken"),
                source: io::Error::other("device unplugged"),
            })
        }

        fn write(&mut self, _profile: &ProfileKey, _items: &[ItemId]) -> Result<(), StoreError> {
            Err(StoreError::Write {
                path: PathBuf::from("broken"),
                source: io::Error::other("device unplugged"),
            })
        }
    }

    /// Store without any record that refuses every write, like a read-only profile directory.
    struct ReadOnlyStore;

    impl ProfileStore for ReadOnlyStore {
        fn read(&self, _profile: &ProfileKey) -> Result<Option<Vec<ItemId>>, StoreError> {
            Ok(None)
        }

        fn write(&mut self, _profile: &ProfileKey, _items: &[ItemId]) -> Result<(), StoreError> {
            Err(StoreError::Write {
                path: PathBuf::from("read-only"),
                source: io::Error::from(io::ErrorKind::PermissionDenied),
            })
        }
    }

    fn alice() -> ProfileKey {
        ProfileKey::from("Alice")
    }

    #[test]
    fn fresh_profile_is_seeded_with_defaults() {
        let mut store = MemoryProfileStore::default();

        let loaded = UnlockRegistry::load(alice(), &mut store, &DEFAULTS);

        assert_eq!(loaded.registry.items(), &DEFAULTS);
        assert_eq!(loaded.seeded, DEFAULTS.to_vec());
        assert_eq!(store.raw(&alice()), Some("995\n13190\n"));
    }

    #[test]
    fn existing_record_is_not_seeded() {
        let mut store = MemoryProfileStore::default();
        store.insert_raw(alice(), "1205\n");

        let loaded = UnlockRegistry::load(alice(), &mut store, &DEFAULTS);

        assert_eq!(loaded.registry.items(), &[ItemId(1205)]);
        assert!(loaded.seeded.is_empty());
    }

    #[test]
    fn empty_record_is_not_seeded_again() {
        let mut store = MemoryProfileStore::default();
        store.insert_raw(alice(), "");

        let loaded = UnlockRegistry::load(alice(), &mut store, &DEFAULTS);

        assert!(loaded.registry.is_empty());
    }

    #[test]
    fn recording_twice_keeps_one_entry() {
        let mut store = MemoryProfileStore::default();
        let mut registry = UnlockRegistry::load(alice(), &mut store, &DEFAULTS).registry;

        assert_eq!(
            registry.record_unlock(ItemId(1205), &mut store),
            UnlockOutcome::Unlocked
        );
        assert_eq!(
            registry.record_unlock(ItemId(1205), &mut store),
            UnlockOutcome::AlreadyUnlocked
        );

        assert_eq!(
            registry.items(),
            &[ItemId::COINS, ItemId::OLD_SCHOOL_BOND, ItemId(1205)]
        );
        assert_eq!(store.raw(&alice()), Some("995\n13190\n1205\n"));
    }

    #[test]
    fn persist_then_load_round_trips() {
        let mut store = MemoryProfileStore::default();
        let items = [ItemId(4151), ItemId(995), ItemId(1205), ItemId(11840)];
        let registry = UnlockRegistry::from_items(alice(), items);
        registry.persist(&mut store).unwrap();

        let loaded = UnlockRegistry::load(alice(), &mut store, &DEFAULTS);

        assert_eq!(loaded.registry.items(), registry.items());
    }

    #[test]
    fn duplicate_record_lines_keep_first_position() {
        let mut store = MemoryProfileStore::default();
        store.insert_raw(alice(), "995\n1205\n995\n");

        let registry = UnlockRegistry::load(alice(), &mut store, &DEFAULTS).registry;

        assert_eq!(registry.items(), &[ItemId(995), ItemId(1205)]);
    }

    #[test]
    fn unreadable_store_leaves_registry_empty() {
        let loaded = UnlockRegistry::load(alice(), &mut BrokenStore, &DEFAULTS);

        assert!(loaded.registry.is_empty());
        assert!(loaded.seeded.is_empty());
    }

    #[test]
    fn uncreatable_record_skips_seeding() {
        let loaded = UnlockRegistry::load(alice(), &mut ReadOnlyStore, &DEFAULTS);

        assert!(loaded.registry.is_empty());
        assert!(loaded.seeded.is_empty());
        assert_eq!(loaded.registry.profile(), &alice());
    }

    #[test]
    fn failed_write_keeps_unlock_in_memory() {
        let mut registry = UnlockRegistry::new(alice());

        let outcome = registry.record_unlock(ItemId(1205), &mut BrokenStore);

        assert_eq!(outcome, UnlockOutcome::UnlockedUnsaved);
        assert!(outcome.is_new());
        assert!(registry.contains(ItemId(1205)));
    }
}
