// Selection module - drag-box selection and formation move orders
//
// Submodules:
// - state: SelectionTracker resource, drag phases, active formation
// - overlap: Box-vs-bounds query over the selectable registry
// - registry: Keeps the selectable registry in sync with spawned units
// - input: Raw input -> ControlEvent, and the ordered event handler
// - movement: Move order dispatch (single target or formation slots)
// - visuals: Selection box indicator and selected tint

mod state;
mod overlap;
pub mod registry;
mod input;
mod movement;
pub mod visuals;

use bevy::prelude::*;

use crate::config::ControlConfig;
use crate::types::SelectionRegistry;

// Re-export main types for external use
pub use state::{ActiveFormation, SelectionBoxIndicator, SelectionTracker};
pub use input::ControlEvent;

pub struct SelectionPlugin;

impl Plugin for SelectionPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<ControlConfig>();
        let initial_formation = app.world().resource::<ControlConfig>().initial_formation();

        app.init_resource::<SelectionTracker>()
            .init_resource::<SelectionRegistry>()
            .insert_resource(ActiveFormation(initial_formation))
            .add_event::<ControlEvent>()
            .add_systems(Update, (
                registry::register_selectables_system,
                registry::unregister_selectables_system,
                input::pointer_input_system,
                input::formation_hotkey_system,
                input::control_event_system,
                visuals::box_selection_visual_system,
                visuals::selection_visual_system,
            ).chain());
    }
}
