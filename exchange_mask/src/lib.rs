//! Greys out exchange listing rows for items the player has not unlocked yet.
//!
//! The calculation itself lives in [`mask`] and only needs the [`ListingElement`] capability.
//! [`ExchangeMaskPlugin`] drives it over the host's [`exchange_components::ExchangeListing`]
//! entity every frame while the listing is open.

pub mod mask;
mod systems;

pub use mask::{
    CLUSTER_SIZE, DisplayDirective, ListingElement, apply_directives, compute_directives,
    mask_listing,
};
pub use systems::ElementSnapshot;

use {
    bevy::prelude::*, exchange_components::ExchangeComponentsPlugin,
    settings::BronzemanSettings, states::ExchangeListingState, systems::*,
};

pub struct ExchangeMaskPlugin;

impl Plugin for ExchangeMaskPlugin {
    fn build(&self, app: &mut App) {
        if !app.is_plugin_added::<ExchangeComponentsPlugin>() {
            app.add_plugins(ExchangeComponentsPlugin);
        }
        app.init_resource::<BronzemanSettings>()
            .init_state::<ExchangeListingState>()
            // Tracked before `StateTransition` so a listing is masked on the frame it opens.
            .add_systems(PreUpdate, track_listing_state)
            .add_systems(
                Update,
                mask_exchange_listing.run_if(in_state(ExchangeListingState::Tracking)),
            )
            .add_systems(OnEnter(ExchangeListingState::Tracking), log_listing_opened)
            .add_systems(OnExit(ExchangeListingState::Tracking), log_listing_closed);
    }
}
