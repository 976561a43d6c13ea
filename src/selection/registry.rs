// Selectable registry maintenance
use bevy::prelude::*;

use crate::types::{SelectionRegistry, Unit};

use super::state::SelectionTracker;

/// System: Tag newly spawned units as selectable
pub fn register_selectables_system(
    mut registry: ResMut<SelectionRegistry>,
    added_units: Query<Entity, Added<Unit>>,
) {
    for entity in added_units.iter() {
        registry.register(entity);
    }
}

/// System: Forget despawned units, including any that were selected
pub fn unregister_selectables_system(
    mut registry: ResMut<SelectionRegistry>,
    mut tracker: ResMut<SelectionTracker>,
    mut removed_units: RemovedComponents<Unit>,
) {
    for entity in removed_units.read() {
        registry.unregister(entity);
        tracker.forget(entity);
    }
}
