use bevy::prelude::KeyCode;

use crate::formation::FormationKind;

// Formation settings
pub const FORMATION_SPACING: f32 = 8.0;
pub const CRESCENT_OUTER_RADIUS: f32 = 32.0;
pub const CRESCENT_INNER_RADIUS: f32 = 16.0;
pub const RANDOM_FORMATION_RADIUS: f32 = 48.0;
pub const RANDOM_MIN_SEPARATION: f32 = 8.0; // No two random slots closer than this
pub const RANDOM_MAX_ATTEMPTS_PER_POINT: usize = 64;
pub const DEFAULT_FORMATION: FormationKind = FormationKind::Wedge;

// Unit settings
pub const ARRIVAL_EPSILON: f32 = 1.0; // Destination is cleared inside this distance
pub const UNIT_SPEED: f32 = 100.0;
pub const UNIT_EXTENT: f32 = 16.0;

// Demo scene
pub const DEMO_UNIT_ROWS: usize = 4;
pub const DEMO_UNIT_COLUMNS: usize = 6;
pub const DEMO_UNIT_SPACING: f32 = 40.0;

// Selection box indicator
pub const SELECTION_BOX_Z: f32 = 10.0;
pub const UNIT_Z: f32 = 1.0;

/// One hotkey per formation kind, in `FormationKind::ALL` order
pub const FORMATION_HOTKEYS: [(KeyCode, FormationKind); 15] = [
    (KeyCode::Digit1, FormationKind::Square),
    (KeyCode::Digit2, FormationKind::Circle),
    (KeyCode::Digit3, FormationKind::Wedge),
    (KeyCode::Digit4, FormationKind::Line),
    (KeyCode::Digit5, FormationKind::Column),
    (KeyCode::Digit6, FormationKind::Staggered),
    (KeyCode::Digit7, FormationKind::Diamond),
    (KeyCode::Digit8, FormationKind::Hex),
    (KeyCode::Digit9, FormationKind::CircularWedge),
    (KeyCode::Digit0, FormationKind::TShape),
    (KeyCode::KeyZ, FormationKind::LShape),
    (KeyCode::KeyX, FormationKind::Cross),
    (KeyCode::KeyC, FormationKind::Snake),
    (KeyCode::KeyV, FormationKind::Random),
    (KeyCode::KeyB, FormationKind::Crescent),
];
