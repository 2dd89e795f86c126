use {
    bevy::prelude::*,
    exchange_components::ExchangeComponentsPlugin,
    exchange_mask::ExchangeMaskPlugin,
    item_components::ItemComponentsPlugin,
    save_load::SaveLoadPlugin,
    settings::SettingsPlugin,
    std::path::PathBuf,
    unlock_notification_ui::UnlockNotificationUiPlugin,
    unlocks::UnlocksPlugin,
};

/// Everything bronzeman mode needs, for a host that provides `StatesPlugin`, a
/// `Time` resource and an `ItemCanonicalizer`.
#[derive(Default)]
pub struct CorePlugin {
    /// Settings file to read, defaults are used when `None`.
    pub settings_path: Option<PathBuf>,
}

impl Plugin for CorePlugin {
    fn build(&self, app: &mut App) {
        // Settings first, the other plugins read them while building.
        app.add_plugins(SettingsPlugin {
            path: self.settings_path.clone(),
        })
        .add_plugins((
            ItemComponentsPlugin,
            ExchangeComponentsPlugin,
            SaveLoadPlugin,
            UnlocksPlugin,
            ExchangeMaskPlugin,
            UnlockNotificationUiPlugin,
        ));
    }
}
