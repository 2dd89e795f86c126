//! Headless demo host.
//!
//! Plays the part of the game client: logs a profile in, reports an inventory change and
//! opens an exchange listing, then prints which rows bronzeman mode restricted.

use {
    bevy::{log::LogPlugin, prelude::*, state::app::StatesPlugin},
    bronzeman_core::CorePlugin,
    exchange_components::{ExchangeListing, ListingItem},
    item_assets::{ItemCanonicalizer, ItemCatalog},
    item_components::{ContainerId, ItemId, ItemSlot, ProfileKey},
    settings::DEFAULT_SETTINGS_FILE,
    std::path::Path,
    unlocks_events::{ContainerChanged, ProfileActivated},
    unlocks_resources::UnlockRegistry,
};

const ITEM_CATALOG_FILE: &str = "assets/items.catalog.ron";
const DEMO_PROFILE: &str = "Alice";

fn main() {
    let mut app = App::new();
    app.add_plugins((
        MinimalPlugins,
        StatesPlugin,
        LogPlugin {
            filter: "error,\
                bronzeman=info,\
                unlocks=debug,\
                unlocks_resources=info,\
                save_load=debug,\
                exchange_mask=debug,\
                settings=info"
                .into(),
            level: bevy::log::Level::TRACE,
            ..Default::default()
        },
    ));

    let catalog = match ItemCatalog::load(Path::new(ITEM_CATALOG_FILE)) {
        Ok(catalog) => catalog,
        Err(e) => {
            error!("{e}, nothing can be unlocked");
            ItemCatalog::default()
        }
    };
    info!(items = catalog.len(), "item catalog loaded");

    app.insert_resource(ItemCanonicalizer::new(catalog))
        .add_plugins(CorePlugin {
            settings_path: Some(DEFAULT_SETTINGS_FILE.into()),
        })
        .add_systems(Startup, log_in)
        .add_systems(Update, run_script)
        .run();
}

fn log_in(mut commands: Commands) {
    commands.trigger(ProfileActivated {
        profile: ProfileKey::from(DEMO_PROFILE),
    });
}

/// Host script, one step per frame.
fn run_script(
    mut frame: Local<u32>,
    mut commands: Commands,
    registry: Option<Res<UnlockRegistry>>,
    listings: Query<&Children, With<ExchangeListing>>,
    elements: Query<(&ListingItem, &Visibility)>,
    mut exit: MessageWriter<AppExit>,
) {
    *frame += 1;
    match *frame {
        1 => commands.trigger(ContainerChanged {
            container_id: ContainerId::INVENTORY,
            slots: vec![
                Some(ItemSlot::new(1205, 1)),
                None,
                Some(ItemSlot::new(1352, 3)),
            ],
        }),
        2 => {
            commands
                .spawn((ExchangeListing, Visibility::Visible))
                .with_children(|listing| {
                    for item in [1205, 999, 1353, 995] {
                        listing.spawn(ListingItem(None));
                        listing.spawn(ListingItem(None));
                        listing.spawn(ListingItem(Some(ItemId(item))));
                    }
                });
        }
        // The listing is tracked from the next frame on.
        5 => {
            if let Some(registry) = registry {
                info!(profile = %registry.profile(), unlocked = ?registry.items(), "registry");
            }
            for children in &listings {
                for row in children.chunks_exact(3) {
                    let (Ok((_, icon)), Ok((ListingItem(Some(item_id)), _))) =
                        (elements.get(row[0]), elements.get(row[2]))
                    else {
                        continue;
                    };
                    let restricted = *icon == Visibility::Hidden;
                    info!(%item_id, restricted, "listing row");
                }
            }
            exit.write(AppExit::Success);
        }
        _ => {}
    }
}
