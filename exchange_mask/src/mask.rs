//! Display mask calculation over an exchange listing, independent of the ECS.
//!
//! A listing is a flat sequence of elements where every row occupies [`CLUSTER_SIZE`]
//! consecutive slots: icon, secondary element, item-bearing element. A row whose item is not
//! unlocked gets its icon hidden and its other two elements dimmed, so the row keeps its place
//! in the layout.

use {item_components::ItemId, unlocks_resources::UnlockRegistry};

pub const CLUSTER_SIZE: usize = 3;

const ICON: usize = 0;
const ITEM: usize = 2;

/// What the mask needs from a listing element.
pub trait ListingElement {
    fn item_id(&self) -> Option<ItemId>;
    fn set_hidden(&mut self, hidden: bool);
    fn set_opacity(&mut self, opacity: f32);
}

/// Restricts one listing row.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DisplayDirective {
    /// Row index, the first element of the row is at `row * CLUSTER_SIZE`.
    pub row: usize,
    pub item_id: ItemId,
    pub dimmed_opacity: f32,
}

impl DisplayDirective {
    /// Element to hide.
    pub fn icon_index(&self) -> usize {
        self.row * CLUSTER_SIZE + ICON
    }

    /// Elements to dim.
    pub fn dimmed_indices(&self) -> [usize; 2] {
        let start = self.row * CLUSTER_SIZE;
        [start + 1, start + 2]
    }
}

/// One directive per complete row whose item is not in `registry`.
///
/// `None` marks a missing element. Rows with a missing element, rows whose item-bearing element
/// has no item and a short trailing row are skipped.
pub fn compute_directives<E: ListingElement>(
    elements: &[Option<E>],
    registry: &UnlockRegistry,
    dimmed_opacity: f32,
) -> Vec<DisplayDirective> {
    elements
        .chunks_exact(CLUSTER_SIZE)
        .enumerate()
        .filter_map(|(row, cluster)| {
            if cluster.iter().any(Option::is_none) {
                return None;
            }
            let item_id = cluster[ITEM].as_ref()?.item_id()?;
            (!registry.contains(item_id)).then_some(DisplayDirective {
                row,
                item_id,
                dimmed_opacity,
            })
        })
        .collect()
}

/// Applies `directives` to `elements`. Indices past the end or at missing elements are skipped.
pub fn apply_directives<E: ListingElement>(
    elements: &mut [Option<E>],
    directives: &[DisplayDirective],
) {
    for directive in directives {
        if let Some(Some(icon)) = elements.get_mut(directive.icon_index()) {
            icon.set_hidden(true);
        }
        for index in directive.dimmed_indices() {
            if let Some(Some(element)) = elements.get_mut(index) {
                element.set_opacity(directive.dimmed_opacity);
            }
        }
    }
}

/// Computes and applies the mask in one go, returning the number of restricted rows.
pub fn mask_listing<E: ListingElement>(
    elements: &mut [Option<E>],
    registry: &UnlockRegistry,
    dimmed_opacity: f32,
) -> usize {
    let directives = compute_directives(elements, registry, dimmed_opacity);
    apply_directives(elements, &directives);
    directives.len()
}
