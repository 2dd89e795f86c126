use {
    bevy::{prelude::*, state::app::StatesPlugin},
    exchange_components::{ElementOpacity, ExchangeListing, ListingItem},
    exchange_mask::ExchangeMaskPlugin,
    item_components::{ItemId, ProfileKey},
    settings::BronzemanSettings,
    states::ExchangeListingState,
    unlocks_resources::UnlockRegistry,
};

const DIM: f32 = 0.25;

fn test_app(unlocked: &[i32]) -> App {
    let mut app = App::new();
    app.add_plugins((MinimalPlugins, StatesPlugin))
        .insert_resource(BronzemanSettings {
            dimmed_opacity: DIM,
            ..default()
        })
        .insert_resource(UnlockRegistry::from_items(
            ProfileKey::from("Alice"),
            unlocked.iter().copied().map(ItemId),
        ))
        .add_plugins(ExchangeMaskPlugin);
    app.update();
    app
}

/// Spawns a listing with one row per item and returns the row elements in order.
fn spawn_listing(app: &mut App, items: &[i32]) -> (Entity, Vec<Entity>) {
    let world = app.world_mut();
    let listing = world.spawn((ExchangeListing, Visibility::Visible)).id();
    let mut elements = Vec::new();
    for &item in items {
        for item_id in [None, None, Some(ItemId(item))] {
            elements.push(world.spawn((ListingItem(item_id), ChildOf(listing))).id());
        }
    }
    (listing, elements)
}

fn listing_state(app: &App) -> ExchangeListingState {
    app.world()
        .resource::<State<ExchangeListingState>>()
        .get()
        .clone()
}

fn is_hidden(app: &App, entity: Entity) -> bool {
    *app.world().get::<Visibility>(entity).unwrap() == Visibility::Hidden
}

fn opacity(app: &App, entity: Entity) -> f32 {
    app.world().get::<ElementOpacity>(entity).unwrap().0
}

#[test]
fn starts_inactive_without_listing() {
    let mut app = test_app(&[]);
    app.update();

    assert_eq!(listing_state(&app), ExchangeListingState::Inactive);
}

#[test]
fn locked_rows_are_hidden_and_dimmed() {
    let mut app = test_app(&[995, 13190, 1205]);
    let (_, elements) = spawn_listing(&mut app, &[1205, 999]);

    app.update();
    app.update();

    assert_eq!(listing_state(&app), ExchangeListingState::Tracking);

    // Row for 1205 untouched.
    for &entity in &elements[..3] {
        assert!(!is_hidden(&app, entity));
        assert_eq!(opacity(&app, entity), 1.0);
    }
    // Row for 999 restricted.
    assert!(is_hidden(&app, elements[3]));
    assert_eq!(opacity(&app, elements[4]), DIM);
    assert_eq!(opacity(&app, elements[5]), DIM);
    assert!(!is_hidden(&app, elements[4]));
}

#[test]
fn listing_is_masked_on_the_frame_it_opens() {
    let mut app = test_app(&[]);
    let (_, elements) = spawn_listing(&mut app, &[999]);

    app.update();

    assert_eq!(listing_state(&app), ExchangeListingState::Tracking);
    assert!(is_hidden(&app, elements[0]));
    assert_eq!(opacity(&app, elements[2]), DIM);
}

#[test]
fn hidden_listing_is_left_alone_while_another_is_open() {
    let mut app = test_app(&[]);
    let (_, open_elements) = spawn_listing(&mut app, &[999]);
    let (hidden_listing, hidden_elements) = spawn_listing(&mut app, &[4151]);
    *app.world_mut().get_mut::<Visibility>(hidden_listing).unwrap() = Visibility::Hidden;

    app.update();

    assert!(is_hidden(&app, open_elements[0]));
    for &entity in &hidden_elements {
        assert!(!is_hidden(&app, entity));
        assert_eq!(opacity(&app, entity), 1.0);
    }
}

#[test]
fn rows_are_reevaluated_after_an_unlock() {
    let mut app = test_app(&[]);
    let (_, elements) = spawn_listing(&mut app, &[4151]);
    app.update();
    app.update();
    assert_eq!(opacity(&app, elements[2]), DIM);

    // The host resets its elements every tick.
    *app.world_mut().resource_mut::<UnlockRegistry>() =
        UnlockRegistry::from_items(ProfileKey::from("Alice"), [ItemId(4151)]);
    for &entity in &elements {
        *app.world_mut().get_mut::<Visibility>(entity).unwrap() = Visibility::Inherited;
        app.world_mut().get_mut::<ElementOpacity>(entity).unwrap().0 = 1.0;
    }
    app.update();

    assert!(!is_hidden(&app, elements[0]));
    assert_eq!(opacity(&app, elements[2]), 1.0);
}

#[test]
fn hidden_listing_stops_tracking() {
    let mut app = test_app(&[]);
    let (listing, elements) = spawn_listing(&mut app, &[999]);
    app.update();
    app.update();
    assert_eq!(listing_state(&app), ExchangeListingState::Tracking);

    *app.world_mut().get_mut::<Visibility>(listing).unwrap() = Visibility::Hidden;
    app.update();
    app.update();
    assert_eq!(listing_state(&app), ExchangeListingState::Inactive);

    app.world_mut().get_mut::<ElementOpacity>(elements[1]).unwrap().0 = 1.0;
    app.update();

    assert_eq!(opacity(&app, elements[1]), 1.0);
}

#[test]
fn torn_down_listing_stops_tracking() {
    let mut app = test_app(&[]);
    let (listing, _) = spawn_listing(&mut app, &[999]);
    app.update();
    app.update();

    app.world_mut().entity_mut(listing).despawn();
    app.update();
    app.update();

    assert_eq!(listing_state(&app), ExchangeListingState::Inactive);
}

#[test]
fn empty_listing_is_not_tracked() {
    let mut app = test_app(&[]);
    app.world_mut().spawn((ExchangeListing, Visibility::Visible));
    app.update();
    app.update();

    assert_eq!(listing_state(&app), ExchangeListingState::Inactive);
}

#[test]
fn nothing_is_masked_without_a_profile() {
    let mut app = test_app(&[]);
    app.world_mut().remove_resource::<UnlockRegistry>();
    let (_, elements) = spawn_listing(&mut app, &[999]);
    app.update();
    app.update();

    assert!(!is_hidden(&app, elements[0]));
    assert_eq!(opacity(&app, elements[1]), 1.0);
}
