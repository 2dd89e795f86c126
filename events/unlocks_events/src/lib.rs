use {
    bevy::prelude::*,
    item_components::{ContainerId, ItemId, ItemSlot, ProfileKey},
};

/// Triggered by the host when a player profile logs in.
///
/// # Observers
/// - `unlocks`: loads (or seeds) the profile's unlock registry.
#[derive(Event, Debug, Clone)]
pub struct ProfileActivated {
    pub profile: ProfileKey,
}

/// Triggered by the host when the active profile logs out.
///
/// # Observers
/// - `unlocks`: discards the unlock registry.
/// - `ui/unlock_notification_ui`: drops pending notifications.
#[derive(Event, Debug, Clone)]
pub struct ProfileDeactivated;

/// Triggered by the host whenever the contents of an item container change.
///
/// `slots` is the full container in slot order, `None` marking an empty slot.
#[derive(Event, Debug, Clone)]
pub struct ContainerChanged {
    pub container_id: ContainerId,
    pub slots: Vec<Option<ItemSlot>>,
}

/// Fired after an item was added to the unlock registry.
///
/// Seeded default unlocks of a fresh profile fire this as well.
///
/// # Observers
/// - `ui/unlock_notification_ui`: queues a notification for the player.
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct ItemUnlocked {
    pub item_id: ItemId,
}
