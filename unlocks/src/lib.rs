mod scanner;
mod systems;


pub use scanner::*;

use {
    bevy::prelude::*, settings::BronzemanSettings, states::ProfileState, systems::*,
};

/// Owns the unlock registry of the active profile and feeds it from container changes.
pub struct UnlocksPlugin;

impl Plugin for UnlocksPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<BronzemanSettings>();
        let scanner = InventoryScanner::from_settings(app.world().resource::<BronzemanSettings>());

        app.insert_resource(scanner)
            .init_state::<ProfileState>()
            // Host events
            .add_observer(on_profile_activated)
            .add_observer(on_profile_deactivated)
            .add_observer(on_container_changed);
    }
}
