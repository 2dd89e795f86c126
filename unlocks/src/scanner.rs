use {
    bevy::{platform::collections::HashSet, prelude::*},
    item_assets::{CanonicalizeError, Canonicalizer},
    item_components::{ContainerId, ItemId, ItemSlot},
    save_load::ProfileStore,
    settings::BronzemanSettings,
    unlocks_resources::UnlockRegistry,
};

/// Why a slot is not evidence of ownership.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rejection {
    EmptySlot,
    NoQuantity(ItemId),
    /// Raw id at or below the placeholder threshold.
    Placeholder(ItemId),
    Unresolvable(CanonicalizeError),
    /// Raw id resolves to another item without being its proper noted copy.
    ForeignVariant {
        raw: ItemId,
        canonical: ItemId,
        note_template: Option<i32>,
    },
}

/// Decides which container slots prove the player owns an item and records them.
#[derive(Resource, Debug, Clone)]
pub struct InventoryScanner {
    owned_containers: HashSet<ContainerId>,
    placeholder_item_id: i32,
    noted_template: i32,
}

impl Default for InventoryScanner {
    fn default() -> Self {
        Self::from_settings(&BronzemanSettings::default())
    }
}

impl InventoryScanner {
    pub fn from_settings(settings: &BronzemanSettings) -> Self {
        Self {
            owned_containers: settings.owned_containers.iter().copied().collect(),
            placeholder_item_id: settings.placeholder_item_id,
            noted_template: settings.noted_template,
        }
    }

    /// Whether the contents of `container` count as owned.
    pub fn owns(&self, container: ContainerId) -> bool {
        self.owned_containers.contains(&container)
    }

    /// Canonical item a slot is evidence for.
    pub fn evidence(
        &self,
        slot: Option<&ItemSlot>,
        canonicalizer: &dyn Canonicalizer,
    ) -> Result<ItemId, Rejection> {
        let slot = slot.ok_or(Rejection::EmptySlot)?;
        let raw = slot.item_id;
        if slot.quantity <= 0 {
            return Err(Rejection::NoQuantity(raw));
        }
        if raw.0 <= self.placeholder_item_id {
            return Err(Rejection::Placeholder(raw));
        }

        let variant = canonicalizer
            .canonicalize(raw)
            .map_err(Rejection::Unresolvable)?;
        if variant.canonical != raw && variant.note_template != Some(self.noted_template) {
            return Err(Rejection::ForeignVariant {
                raw,
                canonical: variant.canonical,
                note_template: variant.note_template,
            });
        }
        Ok(variant.canonical)
    }

    /// Records every new item found in an owned container and returns them in slot order.
    ///
    /// Each new item is persisted on its own before the next slot is looked at.
    pub fn scan(
        &self,
        container: ContainerId,
        slots: &[Option<ItemSlot>],
        canonicalizer: &dyn Canonicalizer,
        registry: &mut UnlockRegistry,
        store: &mut dyn ProfileStore,
    ) -> Vec<ItemId> {
        if !self.owns(container) {
            trace!(%container, "ignoring container that is not owned");
            return Vec::new();
        }

        let mut unlocked = Vec::new();
        for (index, slot) in slots.iter().enumerate() {
            let item = match self.evidence(slot.as_ref(), canonicalizer) {
                Ok(item) => item,
                Err(Rejection::EmptySlot) => continue,
                Err(rejection) => {
                    trace!(%container, slot = index, ?rejection, "slot rejected");
                    continue;
                }
            };
            if registry.contains(item) {
                continue;
            }
            if registry.record_unlock(item, store).is_new() {
                unlocked.push(item);
            }
        }

        if !unlocked.is_empty() {
            debug!(%container, ?unlocked, "container scan unlocked items");
        }
        unlocked
    }
}
