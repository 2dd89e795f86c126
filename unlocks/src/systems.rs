use {
    crate::InventoryScanner,
    bevy::prelude::*,
    item_assets::ItemCanonicalizer,
    save_load::ProfileStorage,
    settings::BronzemanSettings,
    states::ProfileState,
    unlocks_events::{ContainerChanged, ItemUnlocked, ProfileActivated, ProfileDeactivated},
    unlocks_resources::{LoadedRegistry, UnlockRegistry},
};

/// Observer that loads the registry of a profile that just logged in.
pub fn on_profile_activated(
    trigger: On<ProfileActivated>,
    settings: Res<BronzemanSettings>,
    storage: Option<ResMut<ProfileStorage>>,
    mut next_state: ResMut<NextState<ProfileState>>,
    mut commands: Commands,
) {
    let profile = trigger.event().profile.clone();
    let Some(mut storage) = storage else {
        error!(%profile, "no profile storage configured, unlocks will not be tracked");
        return;
    };

    info!(%profile, "profile activated");
    let LoadedRegistry { registry, seeded } =
        UnlockRegistry::load(profile, &mut **storage, &settings.default_unlocks);

    commands.insert_resource(registry);
    for item_id in seeded {
        commands.trigger(ItemUnlocked { item_id });
    }
    next_state.set(ProfileState::LoggedIn);
}

/// Observer that discards the registry when the profile logs out.
pub fn on_profile_deactivated(
    _trigger: On<ProfileDeactivated>,
    registry: Option<Res<UnlockRegistry>>,
    mut next_state: ResMut<NextState<ProfileState>>,
    mut commands: Commands,
) {
    if let Some(registry) = registry {
        info!(profile = %registry.profile(), unlocked = registry.len(), "profile deactivated");
        commands.remove_resource::<UnlockRegistry>();
    }
    next_state.set(ProfileState::LoggedOut);
}

/// Observer that scans changed containers for newly obtained items.
pub fn on_container_changed(
    trigger: On<ContainerChanged>,
    scanner: Res<InventoryScanner>,
    canonicalizer: Option<Res<ItemCanonicalizer>>,
    registry: Option<ResMut<UnlockRegistry>>,
    storage: Option<ResMut<ProfileStorage>>,
    mut commands: Commands,
) {
    let event = trigger.event();
    if !scanner.owns(event.container_id) {
        return;
    }

    let (Some(mut registry), Some(mut storage)) = (registry, storage) else {
        debug!(container = %event.container_id, "no active profile, skipping container scan");
        return;
    };
    let Some(canonicalizer) = canonicalizer else {
        warn!(container = %event.container_id, "no item canonicalizer, skipping container scan");
        return;
    };

    let unlocked = scanner.scan(
        event.container_id,
        &event.slots,
        &**canonicalizer,
        &mut registry,
        &mut **storage,
    );
    for item_id in unlocked {
        commands.trigger(ItemUnlocked { item_id });
    }
}
