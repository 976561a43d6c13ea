// Unit movement systems module
use bevy::prelude::*;

use crate::types::Unit;

pub struct UnitMovementPlugin;

impl Plugin for UnitMovementPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Update, (unit_movement_system, sync_unit_transforms).chain());
    }
}

/// System: Step every moving unit toward its destination (straight line, no avoidance)
pub fn unit_movement_system(time: Res<Time>, mut unit_query: Query<&mut Unit>) {
    let delta_time = time.delta_secs();

    for mut unit in unit_query.iter_mut() {
        // Skip idle units so they don't get flagged as changed
        if unit.is_idle() {
            continue;
        }
        unit.advance(delta_time);
    }
}

/// System: Mirror unit positions into their transforms
pub fn sync_unit_transforms(mut unit_query: Query<(&Unit, &mut Transform), Changed<Unit>>) {
    for (unit, mut transform) in unit_query.iter_mut() {
        transform.translation.x = unit.position.x;
        transform.translation.y = unit.position.y;
    }
}
