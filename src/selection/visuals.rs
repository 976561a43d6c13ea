// Visual feedback for the selection box and selected units
use bevy::prelude::*;

use crate::constants::SELECTION_BOX_Z;
use crate::types::Unit;

use super::state::{SelectionBoxIndicator, SelectionTracker};

pub const SELECTION_BOX_COLOR: Color = Color::srgba(0.2, 0.9, 0.3, 0.25);
pub const UNIT_COLOR: Color = Color::srgb(0.55, 0.55, 0.6);
pub const SELECTED_UNIT_COLOR: Color = Color::srgb(0.3, 1.0, 0.4);

/// System: Stretch the box indicator over the current drag rectangle
pub fn box_selection_visual_system(
    tracker: Res<SelectionTracker>,
    mut indicator_query: Query<(&mut Transform, &mut Visibility, &mut Sprite), With<SelectionBoxIndicator>>,
) {
    if !tracker.is_changed() {
        return;
    }

    for (mut transform, mut visibility, mut sprite) in indicator_query.iter_mut() {
        if !tracker.indicator_visible() {
            *visibility = Visibility::Hidden;
            continue;
        }

        let rect = tracker.current_rect();
        *visibility = Visibility::Visible;
        sprite.custom_size = Some(rect.size);
        transform.translation = (rect.origin + rect.size * 0.5).extend(SELECTION_BOX_Z);
    }
}

/// System: Tint units by selection state
pub fn selection_visual_system(mut unit_query: Query<(&Unit, &mut Sprite), Changed<Unit>>) {
    for (unit, mut sprite) in unit_query.iter_mut() {
        sprite.color = if unit.selected { SELECTED_UNIT_COLOR } else { UNIT_COLOR };
    }
}
