//! Components the host attaches to its exchange listing UI so the mask can read and dim it.

use {bevy::prelude::*, item_components::ItemId};

pub struct ExchangeComponentsPlugin;

impl Plugin for ExchangeComponentsPlugin {
    fn build(&self, app: &mut App) {
        app.register_type::<ExchangeListing>()
            .register_type::<ListingItem>()
            .register_type::<ElementOpacity>();
    }
}

/// Root of the exchange search listing. Its children, in order, are the listing elements,
/// three per row.
#[derive(Component, Default, Reflect)]
#[reflect(Component)]
pub struct ExchangeListing;

/// Item shown by a listing element. Elements that don't carry an item use `None`.
///
/// Children of an [`ExchangeListing`] without this component count as missing elements.
#[derive(Component, Default, Debug, Clone, Copy, Reflect)]
#[reflect(Component)]
#[require(ElementOpacity, Visibility)]
pub struct ListingItem(pub Option<ItemId>);

/// Opacity the host renders a listing element with, 1.0 being fully opaque.
///
/// The host resets it every frame before the mask runs.
#[derive(Component, Debug, Clone, Copy, PartialEq, Reflect, Deref, DerefMut)]
#[reflect(Component)]
pub struct ElementOpacity(pub f32);

impl Default for ElementOpacity {
    fn default() -> Self {
        Self(1.0)
    }
}
