//! Value types shared by every bronzeman crate: item and container identities,
//! inventory slots and the profile key the unlock registry is scoped to.

use {
    bevy::prelude::*,
    serde::{Deserialize, Serialize},
    std::fmt,
};

pub struct ItemComponentsPlugin;

impl Plugin for ItemComponentsPlugin {
    fn build(&self, app: &mut App) {
        app.register_type::<ItemId>()
            .register_type::<ContainerId>()
            .register_type::<ItemSlot>();
    }
}

/// Game item identity. After canonicalization this is the primary key of the unlock registry.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Reflect, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct ItemId(pub i32);

impl ItemId {
    /// Coins, always unlocked for a fresh profile.
    pub const COINS: ItemId = ItemId(995);
    /// Old school bond, always unlocked for a fresh profile.
    pub const OLD_SCHOOL_BOND: ItemId = ItemId(13190);
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identifier of an item container (inventory, bank, reward chest, ...).
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Reflect, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct ContainerId(pub i32);

impl ContainerId {
    pub const FISHING_TRAWLER_REWARD: ContainerId = ContainerId(0);
    pub const INVENTORY: ContainerId = ContainerId(93);
    pub const EQUIPMENT: ContainerId = ContainerId(94);
    pub const BANK: ContainerId = ContainerId(95);
    pub const PUZZLE_BOX: ContainerId = ContainerId(140);
    pub const BARROWS_REWARD: ContainerId = ContainerId(141);
    pub const MONKEY_MADNESS_PUZZLE_BOX: ContainerId = ContainerId(221);
    pub const KINGDOM_REWARD: ContainerId = ContainerId(390);
    pub const CHAMBERS_OF_XERIC_CHEST: ContainerId = ContainerId(581);
    pub const THEATRE_OF_BLOOD_CHEST: ContainerId = ContainerId(612);
    pub const SEED_VAULT: ContainerId = ContainerId(626);
    /// The exchange offer container. Never evidence of ownership.
    pub const EXCHANGE_OFFERS: ContainerId = ContainerId(518);
}

impl fmt::Display for ContainerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Containers whose contents prove the player owns an item.
pub const OWNED_CONTAINERS: [ContainerId; 11] = [
    ContainerId::FISHING_TRAWLER_REWARD,
    ContainerId::INVENTORY,
    ContainerId::EQUIPMENT,
    ContainerId::BANK,
    ContainerId::PUZZLE_BOX,
    ContainerId::BARROWS_REWARD,
    ContainerId::MONKEY_MADNESS_PUZZLE_BOX,
    ContainerId::KINGDOM_REWARD,
    ContainerId::CHAMBERS_OF_XERIC_CHEST,
    ContainerId::THEATRE_OF_BLOOD_CHEST,
    ContainerId::SEED_VAULT,
];

/// A single occupied container slot as reported by the host.
///
/// The id is the raw one, possibly a noted variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Reflect)]
pub struct ItemSlot {
    pub item_id: ItemId,
    pub quantity: i32,
}

impl ItemSlot {
    pub fn new(item_id: i32, quantity: i32) -> Self {
        Self {
            item_id: ItemId(item_id),
            quantity,
        }
    }
}

/// Identity of a player profile. Opaque to the core, only used to address the store.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ProfileKey(String);

impl ProfileKey {
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for ProfileKey {
    fn from(key: &str) -> Self {
        Self::new(key)
    }
}

impl fmt::Display for ProfileKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
