use bevy::prelude::*;

/// Whether a player profile is active and its unlock registry loaded.
#[derive(States, Default, Debug, Clone, PartialEq, Eq, Hash)]
pub enum ProfileState {
    #[default]
    LoggedOut,
    LoggedIn,
}

/// Exchange listing tracking. The mask is recomputed every frame while `Tracking`.
#[derive(States, Default, Debug, Clone, PartialEq, Eq, Hash)]
pub enum ExchangeListingState {
    /// No listing open.
    #[default]
    Inactive,
    /// A listing is visible and has rows.
    Tracking,
}
