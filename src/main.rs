mod config;
mod constants;
mod formation;
mod movement;
mod selection;
mod setup;
mod types;

use bevy::prelude::*;

use config::{ControlConfig, CONFIG_FILE};
use movement::UnitMovementPlugin;
use selection::SelectionPlugin;
use setup::setup_scene;

fn main() {
    let loaded = ControlConfig::load(CONFIG_FILE);

    let mut app = App::new();
    app.add_plugins(DefaultPlugins.set(WindowPlugin {
        primary_window: Some(Window {
            title: "RTS Unit Control".into(),
            ..default()
        }),
        ..default()
    }));

    // Logging is only available once DefaultPlugins is in
    let config = loaded.unwrap_or_else(|err| {
        warn!("{}; using default controls", err);
        ControlConfig::default()
    });
    info!("Formation spacing {:.1}, default formation {}", config.spacing, config.default_formation);

    app.insert_resource(config)
        .add_plugins((SelectionPlugin, UnitMovementPlugin))
        .add_systems(Startup, setup_scene)
        .run();
}
