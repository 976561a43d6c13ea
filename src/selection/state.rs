// Selection state and shared types
use bevy::prelude::*;

use crate::constants::DEFAULT_FORMATION;
use crate::formation::FormationKind;
use crate::types::{SelectableSet, SelectionRect};

use super::overlap::overlapping;

#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub enum DragPhase {
    #[default]
    Idle,
    Dragging,
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum PointerButton {
    Left,  // Selection
    Right, // Move order
}

/// Drag-box lifecycle and the current selection set (Vec preserves overlap-scan order)
#[derive(Resource, Debug)]
pub struct SelectionTracker<Id: Send + Sync + 'static = Entity> {
    phase: DragPhase,
    drag_origin: Vec2,
    current_rect: SelectionRect,
    indicator_visible: bool,
    selected: Vec<Id>,
}

impl<Id: Send + Sync + 'static> Default for SelectionTracker<Id> {
    fn default() -> Self {
        Self {
            phase: DragPhase::Idle,
            drag_origin: Vec2::ZERO,
            current_rect: SelectionRect::ZERO,
            indicator_visible: false,
            selected: Vec::new(),
        }
    }
}

impl<Id: Copy + PartialEq + Send + Sync + 'static> SelectionTracker<Id> {
    #[allow(dead_code)]
    pub fn phase(&self) -> DragPhase {
        self.phase
    }

    pub fn is_dragging(&self) -> bool {
        self.phase == DragPhase::Dragging
    }

    #[allow(dead_code)]
    pub fn drag_origin(&self) -> Vec2 {
        self.drag_origin
    }

    pub fn current_rect(&self) -> SelectionRect {
        self.current_rect
    }

    pub fn indicator_visible(&self) -> bool {
        self.indicator_visible
    }

    pub fn selected(&self) -> &[Id] {
        &self.selected
    }

    /// Idle -> Dragging on a left press. Returns true if the press started a drag.
    pub fn pointer_down(&mut self, button: PointerButton, at: Vec2) -> bool {
        if button != PointerButton::Left || self.phase != DragPhase::Idle {
            return false;
        }
        self.phase = DragPhase::Dragging;
        self.drag_origin = at;
        self.current_rect = SelectionRect { origin: at, size: Vec2::ZERO };
        self.indicator_visible = true;
        true
    }

    pub fn pointer_move(&mut self, at: Vec2) {
        if self.phase == DragPhase::Dragging {
            self.current_rect = SelectionRect::from_corners(self.drag_origin, at);
        }
    }

    /// Dragging -> Idle on a left release: the previous selection is cleared and
    /// replaced by everything overlapping the drag rectangle.
    /// Returns true if a selection transaction completed.
    pub fn pointer_up<S>(&mut self, button: PointerButton, units: &mut S) -> bool
    where
        S: SelectableSet<Id = Id> + ?Sized,
    {
        if button != PointerButton::Left || self.phase != DragPhase::Dragging {
            return false;
        }

        self.clear_selection(units);

        let hits = overlapping(&self.current_rect, &*units);
        for &id in &hits {
            if let Some(unit) = units.get_mut(id) {
                unit.set_selected(true);
            }
        }
        self.selected = hits;

        self.indicator_visible = false;
        self.current_rect = SelectionRect { origin: self.drag_origin, size: Vec2::ZERO };
        self.phase = DragPhase::Idle;
        true
    }

    /// Unmark and drop every selected unit
    pub fn clear_selection<S>(&mut self, units: &mut S)
    where
        S: SelectableSet<Id = Id> + ?Sized,
    {
        for id in self.selected.drain(..) {
            if let Some(unit) = units.get_mut(id) {
                unit.set_selected(false);
            }
        }
    }

    /// Drop an id that no longer exists (despawned)
    pub fn forget(&mut self, id: Id) {
        self.selected.retain(|&selected| selected != id);
    }
}

/// Formation used by the next multi-unit move order. Owned by the input context.
#[derive(Resource, Clone, Copy, Debug, PartialEq, Eq)]
pub struct ActiveFormation(pub FormationKind);

impl Default for ActiveFormation {
    fn default() -> Self {
        Self(DEFAULT_FORMATION)
    }
}

// Marker component for the selection box indicator sprite
#[derive(Component)]
pub struct SelectionBoxIndicator;
