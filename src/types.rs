use bevy::prelude::*;

use crate::constants::*;

/// Axis-aligned rectangle in world space. `size` is never negative.
#[derive(Clone, Copy, PartialEq, Debug, Default)]
pub struct SelectionRect {
    pub origin: Vec2,
    pub size: Vec2,
}

impl SelectionRect {
    pub const ZERO: Self = Self {
        origin: Vec2::ZERO,
        size: Vec2::ZERO,
    };

    /// Normalized rectangle spanning two arbitrary corners
    pub fn from_corners(a: Vec2, b: Vec2) -> Self {
        Self {
            origin: a.min(b),
            size: (b - a).abs(),
        }
    }

    /// Bounding box of something centered at `center`
    pub fn centered(center: Vec2, extent: Vec2) -> Self {
        let extent = extent.abs();
        Self {
            origin: center - extent * 0.5,
            size: extent,
        }
    }

    pub fn max(&self) -> Vec2 {
        self.origin + self.size
    }

    /// Closed-interval overlap test: rectangles that only touch still intersect
    pub fn intersects(&self, other: &SelectionRect) -> bool {
        let (a_min, a_max) = (self.origin, self.max());
        let (b_min, b_max) = (other.origin, other.max());
        a_min.x <= b_max.x && b_min.x <= a_max.x && a_min.y <= b_max.y && b_min.y <= a_max.y
    }
}

/// Capability set of anything the selection box can pick up and order around
pub trait Selectable {
    fn world_position(&self) -> Vec2;
    fn extent(&self) -> Vec2;
    fn is_selected(&self) -> bool;
    fn set_selected(&mut self, selected: bool);
    fn set_destination(&mut self, destination: Vec2);

    fn bounds(&self) -> SelectionRect {
        SelectionRect::centered(self.world_position(), self.extent())
    }
}

/// Registry of selectable things, iterated in registration order
pub trait SelectableSet {
    type Id: Copy + PartialEq + std::fmt::Debug;

    fn ids(&self) -> Vec<Self::Id>;
    fn get(&self, id: Self::Id) -> Option<&dyn Selectable>;
    fn get_mut(&mut self, id: Self::Id) -> Option<&mut dyn Selectable>;
}

#[derive(Component, Clone, Debug, PartialEq)]
pub struct Unit {
    pub position: Vec2,
    pub destination: Option<Vec2>, // None while idle
    pub selected: bool,
    pub speed: f32,
    pub extent: Vec2,
}

impl Unit {
    pub fn new(position: Vec2) -> Self {
        Self {
            position,
            destination: None,
            selected: false,
            speed: UNIT_SPEED,
            extent: Vec2::splat(UNIT_EXTENT),
        }
    }

    pub fn with_speed(mut self, speed: f32) -> Self {
        self.speed = speed;
        self
    }

    pub fn with_extent(mut self, extent: Vec2) -> Self {
        self.extent = extent;
        self
    }

    pub fn is_idle(&self) -> bool {
        self.destination.is_none()
    }

    /// One movement tick: straight-line seek, destination cleared on arrival
    pub fn advance(&mut self, delta_seconds: f32) {
        let Some(destination) = self.destination else { return };

        let to_target = destination - self.position;
        let distance = to_target.length();
        if distance < ARRIVAL_EPSILON {
            self.destination = None;
            return;
        }

        let step = (self.speed * delta_seconds).min(distance);
        self.position += to_target / distance * step;
    }
}

impl Selectable for Unit {
    fn world_position(&self) -> Vec2 {
        self.position
    }

    fn extent(&self) -> Vec2 {
        self.extent
    }

    fn is_selected(&self) -> bool {
        self.selected
    }

    fn set_selected(&mut self, selected: bool) {
        self.selected = selected;
    }

    fn set_destination(&mut self, destination: Vec2) {
        self.destination = Some(destination);
    }
}

/// Plain list of units, keyed by index. Handy outside the ECS.
impl SelectableSet for Vec<Unit> {
    type Id = usize;

    fn ids(&self) -> Vec<usize> {
        (0..self.len()).collect()
    }

    fn get(&self, id: usize) -> Option<&dyn Selectable> {
        self.as_slice().get(id).map(|unit| unit as &dyn Selectable)
    }

    fn get_mut(&mut self, id: usize) -> Option<&mut dyn Selectable> {
        self.as_mut_slice().get_mut(id).map(|unit| unit as &mut dyn Selectable)
    }
}

/// Entities tagged selectable, in the order they were registered
#[derive(Resource, Default, Debug)]
pub struct SelectionRegistry {
    pub entities: Vec<Entity>,
}

impl SelectionRegistry {
    pub fn register(&mut self, entity: Entity) {
        if !self.entities.contains(&entity) {
            self.entities.push(entity);
        }
    }

    pub fn unregister(&mut self, entity: Entity) {
        self.entities.retain(|&e| e != entity);
    }
}

/// ECS view of the registry: registration order plus the unit components
pub struct UnitSet<'a, 'w, 's, 'u> {
    pub registry: &'a SelectionRegistry,
    pub units: &'a mut Query<'w, 's, &'u mut Unit>,
}

impl SelectableSet for UnitSet<'_, '_, '_, '_> {
    type Id = Entity;

    fn ids(&self) -> Vec<Entity> {
        self.registry.entities.clone()
    }

    fn get(&self, id: Entity) -> Option<&dyn Selectable> {
        self.units.get(id).ok().map(|unit| unit as &dyn Selectable)
    }

    fn get_mut(&mut self, id: Entity) -> Option<&mut dyn Selectable> {
        self.units
            .get_mut(id)
            .ok()
            .map(|unit| unit.into_inner() as &mut dyn Selectable)
    }
}

#[derive(Component)]
pub struct MainCamera;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn corners_normalize_negative_drags() {
        let rect = SelectionRect::from_corners(Vec2::new(100.0, 100.0), Vec2::new(50.0, 150.0));
        assert_eq!(rect.origin, Vec2::new(50.0, 100.0));
        assert_eq!(rect.size, Vec2::new(50.0, 50.0));
    }

    #[test]
    fn touching_edges_intersect() {
        let a = SelectionRect::from_corners(Vec2::ZERO, Vec2::new(10.0, 10.0));
        let touching = SelectionRect::from_corners(Vec2::new(10.0, 0.0), Vec2::new(20.0, 10.0));
        let apart = SelectionRect::from_corners(Vec2::new(10.5, 0.0), Vec2::new(20.0, 10.0));
        assert!(a.intersects(&touching));
        assert!(touching.intersects(&a));
        assert!(!a.intersects(&apart));
    }

    #[test]
    fn zero_extent_rect_hits_containing_bounds() {
        let click = SelectionRect::from_corners(Vec2::new(3.0, 3.0), Vec2::new(3.0, 3.0));
        let unit = SelectionRect::centered(Vec2::ZERO, Vec2::splat(8.0));
        assert!(click.intersects(&unit));
    }

    #[test]
    fn unit_walks_toward_destination_and_stops() {
        let mut unit = Unit::new(Vec2::ZERO).with_speed(10.0);
        unit.set_destination(Vec2::new(25.0, 0.0));
        assert!(!unit.is_idle());

        unit.advance(1.0);
        assert_eq!(unit.position, Vec2::new(10.0, 0.0));
        unit.advance(1.0);
        unit.advance(1.0);
        // Never overshoots
        assert_eq!(unit.position, Vec2::new(25.0, 0.0));
        assert!(!unit.is_idle());

        unit.advance(1.0);
        assert!(unit.is_idle());
    }

    #[test]
    fn destination_within_epsilon_clears_without_moving() {
        let mut unit = Unit::new(Vec2::ZERO);
        unit.set_destination(Vec2::new(0.5, 0.0));
        unit.advance(0.016);
        assert!(unit.is_idle());
        assert_eq!(unit.position, Vec2::ZERO);
    }

    #[test]
    fn registry_keeps_first_registration_order() {
        let mut registry = SelectionRegistry::default();
        let a = Entity::from_raw(1);
        let b = Entity::from_raw(2);
        registry.register(a);
        registry.register(b);
        registry.register(a);
        assert_eq!(registry.entities, vec![a, b]);
        registry.unregister(a);
        assert_eq!(registry.entities, vec![b]);
    }
}
