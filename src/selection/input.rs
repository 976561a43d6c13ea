// Selection input handling systems
use bevy::prelude::*;
use bevy::window::PrimaryWindow;
use rand::Rng;

use crate::config::ControlConfig;
use crate::constants::FORMATION_HOTKEYS;
use crate::formation::FormationKind;
use crate::types::*;

use super::movement::{dispatch_move_order, MoveOrder, MoveOutcome};
use super::state::{ActiveFormation, PointerButton, SelectionTracker};

/// Player input, in delivery order. Positions are in world space.
#[derive(Event, Clone, Copy, Debug, PartialEq)]
pub enum ControlEvent {
    PointerDown { button: PointerButton, at: Vec2 },
    PointerMove { at: Vec2 },
    PointerUp { button: PointerButton, at: Vec2 },
    SelectFormation(FormationKind),
}

const POINTER_BUTTONS: [(MouseButton, PointerButton); 2] = [
    (MouseButton::Left, PointerButton::Left),
    (MouseButton::Right, PointerButton::Right),
];

/// System: Translate mouse state into pointer events
pub fn pointer_input_system(
    mouse_button: Res<ButtonInput<MouseButton>>,
    window_query: Query<&Window, With<PrimaryWindow>>,
    camera_query: Query<(&Camera, &GlobalTransform), With<MainCamera>>,
    mut last_cursor: Local<Option<Vec2>>,
    mut events: EventWriter<ControlEvent>,
) {
    let Ok(window) = window_query.single() else { return };
    let Ok((camera, camera_transform)) = camera_query.single() else { return };

    let cursor_world = window
        .cursor_position()
        .and_then(|cursor_pos| camera.viewport_to_world_2d(camera_transform, cursor_pos).ok());

    if let Some(world_pos) = cursor_world {
        if *last_cursor != Some(world_pos) {
            *last_cursor = Some(world_pos);
            events.write(ControlEvent::PointerMove { at: world_pos });
        }
    }

    // Releases outside the window still finish at the last known position
    let Some(at) = cursor_world.or(*last_cursor) else { return };

    for (mouse, button) in POINTER_BUTTONS {
        if mouse_button.just_pressed(mouse) {
            events.write(ControlEvent::PointerDown { button, at });
        }
        if mouse_button.just_released(mouse) {
            events.write(ControlEvent::PointerUp { button, at });
        }
    }
}

/// System: One key per formation kind
pub fn formation_hotkey_system(
    keyboard: Res<ButtonInput<KeyCode>>,
    mut events: EventWriter<ControlEvent>,
) {
    for (key, kind) in FORMATION_HOTKEYS {
        if keyboard.just_pressed(key) {
            events.write(ControlEvent::SelectFormation(kind));
        }
    }
}

/// System: Apply control events strictly in order. A move order always sees the
/// selection left by the last completed drag.
pub fn control_event_system(
    mut events: EventReader<ControlEvent>,
    mut tracker: ResMut<SelectionTracker>,
    mut active_formation: ResMut<ActiveFormation>,
    config: Res<ControlConfig>,
    registry: Res<SelectionRegistry>,
    mut units: Query<&mut Unit>,
) {
    for event in events.read() {
        let mut unit_set = UnitSet {
            registry: &registry,
            units: &mut units,
        };

        match *event {
            ControlEvent::PointerDown { button: PointerButton::Left, at } => {
                if tracker.pointer_down(PointerButton::Left, at) {
                    debug!("Selection drag started at ({:.1}, {:.1})", at.x, at.y);
                }
            }
            ControlEvent::PointerDown { button: PointerButton::Right, at } => {
                issue_move_order(&tracker, &mut unit_set, at, active_formation.0, &config);
            }
            ControlEvent::PointerMove { at } => tracker.pointer_move(at),
            ControlEvent::PointerUp { button, .. } => {
                let rect = tracker.current_rect();
                if tracker.pointer_up(button, &mut unit_set) {
                    debug!(
                        "Selection box ({:.1}, {:.1}) {:.1}x{:.1}",
                        rect.origin.x, rect.origin.y, rect.size.x, rect.size.y
                    );
                    info!("Selected {} units", tracker.selected().len());
                }
            }
            ControlEvent::SelectFormation(kind) => {
                if active_formation.0 != kind {
                    active_formation.0 = kind;
                    info!("Formation set to {}", kind.name());
                }
            }
        }
    }
}

fn issue_move_order<S>(
    tracker: &SelectionTracker,
    units: &mut S,
    target: Vec2,
    kind: FormationKind,
    config: &ControlConfig,
) where
    S: SelectableSet<Id = Entity>,
{
    let mut order = MoveOrder::from_config(target, kind, config);
    if order.params.seed == 0 {
        order.params.seed = rand::thread_rng().gen();
    }

    match dispatch_move_order(units, tracker.selected(), &order) {
        MoveOutcome::Ignored => {}
        MoveOutcome::Direct => {
            info!("Move command to ({:.1}, {:.1}) for 1 unit", target.x, target.y);
        }
        MoveOutcome::Formation { assigned, unassigned } => {
            info!(
                "Move command to ({:.1}, {:.1}) in {} formation for {} units",
                target.x,
                target.y,
                kind.name(),
                assigned
            );
            if unassigned > 0 {
                warn!("{} units got no formation slot and keep their previous orders", unassigned);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::selection::registry::register_selectables_system;

    fn test_app() -> App {
        let mut app = App::new();
        app.add_event::<ControlEvent>()
            .init_resource::<SelectionTracker>()
            .init_resource::<SelectionRegistry>()
            .init_resource::<ActiveFormation>()
            .insert_resource(ControlConfig { random_seed: 3, ..default() })
            .add_systems(Update, (register_selectables_system, control_event_system).chain());
        app
    }

    fn spawn_unit(app: &mut App, x: f32, y: f32) -> Entity {
        app.world_mut()
            .spawn(Unit::new(Vec2::new(x, y)).with_extent(Vec2::splat(4.0)))
            .id()
    }

    fn send(app: &mut App, events: &[ControlEvent]) {
        for event in events {
            app.world_mut().send_event(*event);
        }
        app.update();
    }

    fn drag(app: &mut App, from: Vec2, to: Vec2) {
        send(
            app,
            &[
                ControlEvent::PointerDown { button: PointerButton::Left, at: from },
                ControlEvent::PointerMove { at: to },
                ControlEvent::PointerUp { button: PointerButton::Left, at: to },
            ],
        );
    }

    fn unit(app: &App, entity: Entity) -> &Unit {
        app.world().get::<Unit>(entity).unwrap()
    }

    #[test]
    fn drag_selects_units_inside_box() {
        let mut app = test_app();
        let a = spawn_unit(&mut app, 10.0, 10.0);
        let b = spawn_unit(&mut app, 20.0, 30.0);
        let c = spawn_unit(&mut app, 200.0, 10.0);
        app.update();

        drag(&mut app, Vec2::ZERO, Vec2::new(50.0, 50.0));

        let tracker = app.world().resource::<SelectionTracker>();
        assert_eq!(tracker.selected(), &[a, b]);
        assert!(!tracker.is_dragging());
        assert!(unit(&app, a).selected);
        assert!(unit(&app, b).selected);
        assert!(!unit(&app, c).selected);
    }

    #[test]
    fn redrag_unmarks_previous_selection() {
        let mut app = test_app();
        let a = spawn_unit(&mut app, 10.0, 10.0);
        let c = spawn_unit(&mut app, 200.0, 10.0);
        app.update();

        drag(&mut app, Vec2::ZERO, Vec2::new(50.0, 50.0));
        drag(&mut app, Vec2::new(180.0, 0.0), Vec2::new(220.0, 20.0));

        assert_eq!(app.world().resource::<SelectionTracker>().selected(), &[c]);
        assert!(!unit(&app, a).selected);
        assert!(unit(&app, c).selected);
    }

    #[test]
    fn right_click_sends_single_unit_to_cursor() {
        let mut app = test_app();
        let a = spawn_unit(&mut app, 10.0, 10.0);
        app.update();
        drag(&mut app, Vec2::ZERO, Vec2::new(50.0, 50.0));

        let target = Vec2::new(-75.5, 12.25);
        send(&mut app, &[ControlEvent::PointerDown { button: PointerButton::Right, at: target }]);
        assert_eq!(unit(&app, a).destination, Some(target));
    }

    #[test]
    fn move_order_uses_selection_made_earlier_in_same_frame() {
        let mut app = test_app();
        let a = spawn_unit(&mut app, 10.0, 10.0);
        let b = spawn_unit(&mut app, 20.0, 20.0);
        app.update();

        let target = Vec2::new(300.0, 300.0);
        send(
            &mut app,
            &[
                ControlEvent::SelectFormation(FormationKind::Line),
                ControlEvent::PointerDown { button: PointerButton::Left, at: Vec2::ZERO },
                ControlEvent::PointerMove { at: Vec2::new(50.0, 50.0) },
                ControlEvent::PointerUp { button: PointerButton::Left, at: Vec2::new(50.0, 50.0) },
                ControlEvent::PointerDown { button: PointerButton::Right, at: target },
            ],
        );

        let spacing = app.world().resource::<ControlConfig>().spacing;
        assert_eq!(unit(&app, a).destination, Some(target));
        assert_eq!(unit(&app, b).destination, Some(target + Vec2::new(spacing, 0.0)));
    }

    #[test]
    fn right_click_with_nothing_selected_does_nothing() {
        let mut app = test_app();
        let a = spawn_unit(&mut app, 10.0, 10.0);
        app.update();
        send(&mut app, &[ControlEvent::PointerDown { button: PointerButton::Right, at: Vec2::ONE }]);
        assert!(unit(&app, a).is_idle());
    }

    #[test]
    fn hotkey_event_switches_formation() {
        let mut app = test_app();
        send(&mut app, &[ControlEvent::SelectFormation(FormationKind::Crescent)]);
        assert_eq!(app.world().resource::<ActiveFormation>().0, FormationKind::Crescent);
    }
}
