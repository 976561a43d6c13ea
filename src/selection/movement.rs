// Move order dispatch
use bevy::prelude::*;

use crate::config::ControlConfig;
use crate::formation::{FormationKind, FormationParams, FormationRequest};
use crate::types::SelectableSet;

/// Formation settings a move order is issued with
#[derive(Clone, Copy, Debug)]
pub struct MoveOrder {
    pub target: Vec2,
    pub kind: FormationKind,
    pub spacing: f32,
    pub params: FormationParams,
}

impl MoveOrder {
    pub fn from_config(target: Vec2, kind: FormationKind, config: &ControlConfig) -> Self {
        Self {
            target,
            kind,
            spacing: config.spacing_for(kind),
            params: config.formation_params(),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MoveOutcome {
    /// Nothing selected
    Ignored,
    /// A single unit sent straight to the target
    Direct,
    /// Slots handed out by selection index. `unassigned` units kept their old destination.
    Formation { assigned: usize, unassigned: usize },
}

/// Hand a destination to every selected unit.
///
/// One unit goes exactly to the target. Several units get formation slots by
/// index: `selected[i]` receives slot `i`, regardless of who is closest to it.
/// If the layout yields fewer slots than units, the trailing units are left as
/// they were.
pub fn dispatch_move_order<S>(units: &mut S, selected: &[S::Id], order: &MoveOrder) -> MoveOutcome
where
    S: SelectableSet + ?Sized,
{
    match selected {
        [] => MoveOutcome::Ignored,
        [only] => {
            if let Some(unit) = units.get_mut(*only) {
                unit.set_destination(order.target);
            }
            MoveOutcome::Direct
        }
        _ => {
            let positions = FormationRequest::new(order.kind, order.target, order.spacing, selected.len())
                .with_params(order.params)
                .generate();
            assign_slots(units, selected, &positions)
        }
    }
}

/// `selected[i]` takes `positions[i]`. Units past the end of `positions` keep
/// their current destination.
pub fn assign_slots<S>(units: &mut S, selected: &[S::Id], positions: &[Vec2]) -> MoveOutcome
where
    S: SelectableSet + ?Sized,
{
    let mut assigned = 0;
    for (&id, &position) in selected.iter().zip(positions) {
        if let Some(unit) = units.get_mut(id) {
            unit.set_destination(position);
            assigned += 1;
        }
    }

    MoveOutcome::Formation {
        assigned,
        unassigned: selected.len().saturating_sub(positions.len()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::formation::generate;
    use crate::types::{Selectable, Unit};

    fn order(target: Vec2, kind: FormationKind) -> MoveOrder {
        MoveOrder::from_config(target, kind, &ControlConfig::default())
    }

    #[test]
    fn nothing_selected_is_a_no_op() {
        let mut units = vec![Unit::new(Vec2::ZERO)];
        let outcome = dispatch_move_order(&mut units, &[], &order(Vec2::ONE, FormationKind::Square));
        assert_eq!(outcome, MoveOutcome::Ignored);
        assert!(units[0].is_idle());
    }

    #[test]
    fn single_unit_goes_exactly_to_target() {
        let mut units = vec![Unit::new(Vec2::ZERO), Unit::new(Vec2::ONE)];
        let target = Vec2::new(123.5, -42.25);
        let outcome = dispatch_move_order(&mut units, &[1], &order(target, FormationKind::Circle));
        assert_eq!(outcome, MoveOutcome::Direct);
        assert_eq!(units[1].destination, Some(target));
        assert!(units[0].is_idle());
    }

    #[test]
    fn slots_follow_selection_order() {
        // Far unit is first in the selection, nearest last
        let mut units = vec![
            Unit::new(Vec2::new(-500.0, -500.0)),
            Unit::new(Vec2::new(0.0, 300.0)),
            Unit::new(Vec2::new(100.0, 100.0)),
        ];
        let target = Vec2::new(100.0, 100.0);
        let move_order = order(target, FormationKind::Square);
        let outcome = dispatch_move_order(&mut units, &[0, 1, 2], &move_order);

        let positions = generate(FormationKind::Square, target, move_order.spacing, 3, &move_order.params);
        assert_eq!(outcome, MoveOutcome::Formation { assigned: 3, unassigned: 0 });
        assert_eq!(units[0].destination, Some(positions[0]));
        assert_eq!(units[1].destination, Some(positions[1]));
        assert_eq!(units[2].destination, Some(positions[2]));
        assert_eq!(units[0].destination, Some(target));
    }

    #[test]
    fn selection_order_not_storage_order_decides() {
        let mut units = vec![Unit::new(Vec2::ZERO), Unit::new(Vec2::ZERO)];
        let move_order = order(Vec2::ZERO, FormationKind::Line);
        dispatch_move_order(&mut units, &[1, 0], &move_order);
        assert_eq!(units[1].destination, Some(Vec2::ZERO));
        assert_eq!(units[0].destination, Some(Vec2::new(move_order.spacing, 0.0)));
    }

    #[test]
    fn uses_configured_spacing_for_kind() {
        let mut config = ControlConfig::default();
        config.spacing_overrides.insert("line".to_string(), 20.0);
        let move_order = MoveOrder::from_config(Vec2::ZERO, FormationKind::Line, &config);

        let mut units = vec![Unit::new(Vec2::ZERO), Unit::new(Vec2::ZERO)];
        dispatch_move_order(&mut units, &[0, 1], &move_order);
        assert_eq!(units[1].destination, Some(Vec2::new(20.0, 0.0)));
    }

    #[test]
    fn missing_units_are_skipped() {
        let mut units = vec![Unit::new(Vec2::ZERO)];
        let outcome = dispatch_move_order(&mut units, &[0, 7], &order(Vec2::ZERO, FormationKind::Column));
        assert_eq!(outcome, MoveOutcome::Formation { assigned: 1, unassigned: 0 });
        assert_eq!(units[0].destination, Some(Vec2::ZERO));
    }

    #[test]
    fn short_layout_leaves_trailing_units_alone() {
        let mut units = vec![Unit::new(Vec2::ZERO), Unit::new(Vec2::ZERO), Unit::new(Vec2::ZERO)];
        let previous = Vec2::new(-30.0, 45.0);
        units[2].set_destination(previous);

        let positions = [Vec2::new(8.0, 0.0), Vec2::new(16.0, 0.0)];
        let outcome = assign_slots(&mut units, &[0, 1, 2], &positions);

        assert_eq!(outcome, MoveOutcome::Formation { assigned: 2, unassigned: 1 });
        assert_eq!(units[0].destination, Some(positions[0]));
        assert_eq!(units[1].destination, Some(positions[1]));
        assert_eq!(units[2].destination, Some(previous));
    }

    #[test]
    fn assignment_supersedes_previous_destination() {
        let mut units = vec![Unit::new(Vec2::ZERO)];
        dispatch_move_order(&mut units, &[0], &order(Vec2::new(10.0, 0.0), FormationKind::Square));
        dispatch_move_order(&mut units, &[0], &order(Vec2::new(0.0, 10.0), FormationKind::Square));
        assert_eq!(units[0].destination, Some(Vec2::new(0.0, 10.0)));
    }
}
