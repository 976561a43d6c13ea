// Scene setup module
use bevy::prelude::*;

use crate::config::ControlConfig;
use crate::constants::*;
use crate::selection::visuals::{SELECTION_BOX_COLOR, UNIT_COLOR};
use crate::selection::SelectionBoxIndicator;
use crate::types::*;

pub fn setup_scene(mut commands: Commands, config: Res<ControlConfig>) {
    commands.spawn((Camera2d, MainCamera));

    // Hidden until a drag starts
    commands.spawn((
        Sprite::from_color(SELECTION_BOX_COLOR, Vec2::ONE),
        Transform::from_xyz(0.0, 0.0, SELECTION_BOX_Z),
        Visibility::Hidden,
        SelectionBoxIndicator,
    ));

    spawn_demo_units(&mut commands, &config);
}

/// Grid of units centered on the origin
fn spawn_demo_units(commands: &mut Commands, config: &ControlConfig) {
    let rows = config.demo_unit_rows;
    let columns = config.demo_unit_columns;
    let extent = Vec2::splat(config.unit_extent);
    let half_grid = Vec2::new(
        columns.saturating_sub(1) as f32,
        rows.saturating_sub(1) as f32,
    ) * DEMO_UNIT_SPACING
        * 0.5;

    for row in 0..rows {
        for column in 0..columns {
            let position = Vec2::new(column as f32, row as f32) * DEMO_UNIT_SPACING - half_grid;
            commands.spawn((
                Unit::new(position)
                    .with_speed(config.unit_speed)
                    .with_extent(extent),
                Sprite::from_color(UNIT_COLOR, extent),
                Transform::from_translation(position.extend(UNIT_Z)),
            ));
        }
    }

    info!("Spawned {} selectable units", rows * columns);
}
