use {
    crate::mask::{ListingElement, mask_listing},
    bevy::prelude::*,
    exchange_components::{ElementOpacity, ExchangeListing, ListingItem},
    item_components::ItemId,
    settings::BronzemanSettings,
    states::ExchangeListingState,
    unlocks_resources::UnlockRegistry,
};

/// Copy of a listing element taken at the start of a frame. Changes made by the mask are
/// written back to the entity afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct ElementSnapshot {
    pub item_id: Option<ItemId>,
    pub hidden: bool,
    pub opacity: f32,
    touched: bool,
}

impl ElementSnapshot {
    pub fn new(item_id: Option<ItemId>, hidden: bool, opacity: f32) -> Self {
        Self {
            item_id,
            hidden,
            opacity,
            touched: false,
        }
    }

    /// Whether the mask changed this element.
    pub fn is_touched(&self) -> bool {
        self.touched
    }
}

impl ListingElement for ElementSnapshot {
    fn item_id(&self) -> Option<ItemId> {
        self.item_id
    }

    fn set_hidden(&mut self, hidden: bool) {
        self.hidden = hidden;
        self.touched = true;
    }

    fn set_opacity(&mut self, opacity: f32) {
        self.opacity = opacity;
        self.touched = true;
    }
}

/// A listing is open when it is not hidden and has at least one element.
fn is_open(visibility: &Visibility, children: Option<&Children>) -> bool {
    *visibility != Visibility::Hidden && children.is_some_and(|children| !children.is_empty())
}

/// Moves between `Inactive` and `Tracking` as the listing opens and closes.
pub fn track_listing_state(
    listings: Query<(&Visibility, Option<&Children>), With<ExchangeListing>>,
    state: Res<State<ExchangeListingState>>,
    mut next_state: ResMut<NextState<ExchangeListingState>>,
) {
    let open = listings
        .iter()
        .any(|(visibility, children)| is_open(visibility, children));
    let target = if open {
        ExchangeListingState::Tracking
    } else {
        ExchangeListingState::Inactive
    };
    if *state.get() != target {
        next_state.set(target);
    }
}

/// Re-evaluates every row of each open listing against the unlock registry.
pub fn mask_exchange_listing(
    registry: Option<Res<UnlockRegistry>>,
    settings: Res<BronzemanSettings>,
    listings: Query<(&Visibility, &Children), With<ExchangeListing>>,
    mut elements: Query<(&ListingItem, &mut Visibility, &mut ElementOpacity), Without<ExchangeListing>>,
) {
    let Some(registry) = registry else {
        return;
    };

    for (visibility, children) in &listings {
        if !is_open(visibility, Some(children)) {
            continue;
        }
        let entities: &[Entity] = children;
        let mut snapshots: Vec<Option<ElementSnapshot>> = entities
            .iter()
            .map(|&entity| {
                elements.get(entity).ok().map(|(item, visibility, opacity)| {
                    ElementSnapshot::new(item.0, *visibility == Visibility::Hidden, opacity.0)
                })
            })
            .collect();

        let restricted = mask_listing(&mut snapshots, &registry, settings.dimmed_opacity);
        trace!(rows = entities.len() / crate::CLUSTER_SIZE, restricted, "masked exchange listing");

        for (&entity, snapshot) in entities.iter().zip(&snapshots) {
            let Some(snapshot) = snapshot.as_ref().filter(|s| s.is_touched()) else {
                continue;
            };
            let Ok((_, mut visibility, mut opacity)) = elements.get_mut(entity) else {
                continue;
            };
            if snapshot.hidden {
                *visibility = Visibility::Hidden;
            }
            opacity.0 = snapshot.opacity;
        }
    }
}

pub fn log_listing_opened() {
    debug!("exchange listing opened, tracking rows");
}

pub fn log_listing_closed() {
    debug!("exchange listing closed");
}
