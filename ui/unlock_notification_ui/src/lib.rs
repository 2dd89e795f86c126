//! Unlock notification queue.
//! Every unlocked item is queued and presented one at a time, oldest first, for a fixed duration.
//! Drawing is up to the host: it renders [`UnlockNotificationQueue::current`] as an overlay.

use {
    bevy::prelude::*,
    item_assets::ItemCanonicalizer,
    item_components::ItemId,
    settings::BronzemanSettings,
    std::{collections::VecDeque, time::Duration},
    unlocks_events::{ItemUnlocked, ProfileDeactivated},
};

pub struct UnlockNotificationUiPlugin;

impl Plugin for UnlockNotificationUiPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<BronzemanSettings>()
            .init_resource::<UnlockNotificationQueue>()
            .add_observer(on_item_unlocked)
            .add_observer(on_profile_deactivated)
            .add_systems(Update, advance_notifications);
    }
}

// ============================================================================
// Types
// ============================================================================

#[derive(Clone, Debug, PartialEq)]
pub struct UnlockNotification {
    pub item_id: ItemId,
    /// Item name, or its id when the name is unknown.
    pub message: String,
}

/// Notifications waiting to be shown and the one on screen.
#[derive(Resource, Default)]
pub struct UnlockNotificationQueue {
    current: Option<(UnlockNotification, Timer)>,
    pending: VecDeque<UnlockNotification>,
}

impl UnlockNotificationQueue {
    pub fn push(&mut self, notification: UnlockNotification) {
        self.pending.push_back(notification);
    }

    /// The notification the host should currently draw.
    pub fn current(&self) -> Option<&UnlockNotification> {
        self.current.as_ref().map(|(notification, _)| notification)
    }

    pub fn pending(&self) -> impl Iterator<Item = &UnlockNotification> {
        self.pending.iter()
    }

    pub fn clear(&mut self) {
        self.current = None;
        self.pending.clear();
    }

    /// Advances the shown notification by `delta`, replacing it with the next pending one once
    /// it has been displayed for `display_for`.
    pub fn tick(&mut self, delta: Duration, display_for: Duration) {
        if let Some((_, timer)) = &mut self.current
            && timer.tick(delta).is_finished()
        {
            self.current = None;
        }
        if self.current.is_none()
            && let Some(next) = self.pending.pop_front()
        {
            self.current = Some((next, Timer::new(display_for, TimerMode::Once)));
        }
    }
}

// ============================================================================
// Event Observers
// ============================================================================

/// Queues a notification for every unlocked item.
fn on_item_unlocked(
    trigger: On<ItemUnlocked>,
    canonicalizer: Option<Res<ItemCanonicalizer>>,
    mut queue: ResMut<UnlockNotificationQueue>,
) {
    let item_id = trigger.event().item_id;
    let message = canonicalizer
        .and_then(|canonicalizer| canonicalizer.display_name(item_id))
        .unwrap_or_else(|| item_id.to_string());

    queue.push(UnlockNotification { item_id, message });
}

/// Drops everything queued for the profile that logged out.
fn on_profile_deactivated(
    _trigger: On<ProfileDeactivated>,
    mut queue: ResMut<UnlockNotificationQueue>,
) {
    queue.clear();
}

// ============================================================================
// Systems
// ============================================================================

fn advance_notifications(
    time: Res<Time>,
    settings: Res<BronzemanSettings>,
    mut queue: ResMut<UnlockNotificationQueue>,
) {
    queue.tick(time.delta(), settings.notification_duration());
}
