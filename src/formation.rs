// Formation layout module
//
// Every generator maps (anchor, spacing, count, extras) to exactly `count`
// destination slots. Slot order is significant: the move command hands slot i
// to the i-th selected unit.
use bevy::prelude::*;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::f32::consts::TAU;

use crate::constants::*;

#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum FormationKind {
    Square,
    Circle,
    Wedge,
    Line,
    Column,
    Staggered,
    Diamond,
    Hex,
    CircularWedge,
    TShape,
    LShape,
    Cross,
    Snake,
    Random,
    Crescent,
}

/// Signature shared by every layout generator
pub type FormationFn = fn(Vec2, f32, usize, &FormationParams) -> Vec<Vec2>;

impl FormationKind {
    pub const ALL: [FormationKind; 15] = [
        FormationKind::Square,
        FormationKind::Circle,
        FormationKind::Wedge,
        FormationKind::Line,
        FormationKind::Column,
        FormationKind::Staggered,
        FormationKind::Diamond,
        FormationKind::Hex,
        FormationKind::CircularWedge,
        FormationKind::TShape,
        FormationKind::LShape,
        FormationKind::Cross,
        FormationKind::Snake,
        FormationKind::Random,
        FormationKind::Crescent,
    ];

    pub fn name(self) -> &'static str {
        match self {
            FormationKind::Square => "square",
            FormationKind::Circle => "circle",
            FormationKind::Wedge => "wedge",
            FormationKind::Line => "line",
            FormationKind::Column => "column",
            FormationKind::Staggered => "staggered",
            FormationKind::Diamond => "diamond",
            FormationKind::Hex => "hex",
            FormationKind::CircularWedge => "circular_wedge",
            FormationKind::TShape => "t_shape",
            FormationKind::LShape => "l_shape",
            FormationKind::Cross => "cross",
            FormationKind::Snake => "snake",
            FormationKind::Random => "random",
            FormationKind::Crescent => "crescent",
        }
    }

    /// Parse a kind by name. "row" is accepted as another name for `Line`.
    pub fn from_name(name: &str) -> Option<Self> {
        if name == "row" {
            return Some(FormationKind::Line);
        }
        Self::ALL.into_iter().find(|kind| kind.name() == name)
    }

    /// Kind -> generator lookup
    pub fn generator(self) -> FormationFn {
        match self {
            FormationKind::Square => square_formation,
            FormationKind::Circle => circle_formation,
            FormationKind::Wedge => wedge_formation,
            FormationKind::Line => line_formation,
            FormationKind::Column => column_formation,
            FormationKind::Staggered => staggered_formation,
            FormationKind::Diamond => diamond_formation,
            FormationKind::Hex => hex_formation,
            FormationKind::CircularWedge => circular_wedge_formation,
            FormationKind::TShape => t_shape_formation,
            FormationKind::LShape => l_shape_formation,
            FormationKind::Cross => cross_formation,
            FormationKind::Snake => snake_formation,
            FormationKind::Random => random_formation,
            FormationKind::Crescent => crescent_formation,
        }
    }
}

/// Kind-specific extras. Only crescent and random read them.
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct FormationParams {
    pub outer_radius: f32,
    pub inner_radius: f32,
    pub random_radius: f32,
    pub seed: u64,
}

impl Default for FormationParams {
    fn default() -> Self {
        Self {
            outer_radius: CRESCENT_OUTER_RADIUS,
            inner_radius: CRESCENT_INNER_RADIUS,
            random_radius: RANDOM_FORMATION_RADIUS,
            seed: 0,
        }
    }
}

/// A single layout request, built and consumed within one move command
#[derive(Clone, Copy, Debug)]
pub struct FormationRequest {
    pub kind: FormationKind,
    pub anchor: Vec2,
    pub spacing: f32,
    pub count: usize,
    pub params: FormationParams,
}

impl FormationRequest {
    pub fn new(kind: FormationKind, anchor: Vec2, spacing: f32, count: usize) -> Self {
        Self {
            kind,
            anchor,
            spacing,
            count,
            params: FormationParams::default(),
        }
    }

    pub fn with_params(mut self, params: FormationParams) -> Self {
        self.params = params;
        self
    }

    pub fn generate(&self) -> Vec<Vec2> {
        generate(self.kind, self.anchor, self.spacing, self.count, &self.params)
    }
}

pub fn generate(
    kind: FormationKind,
    anchor: Vec2,
    spacing: f32,
    count: usize,
    params: &FormationParams,
) -> Vec<Vec2> {
    if count == 0 {
        return Vec::new();
    }
    (kind.generator())(anchor, spacing, count, params)
}

/// Same as `generate`, but by kind name. Unknown names produce no slots.
#[allow(dead_code)]
pub fn generate_named(
    name: &str,
    anchor: Vec2,
    spacing: f32,
    count: usize,
    params: &FormationParams,
) -> Vec<Vec2> {
    match FormationKind::from_name(name) {
        Some(kind) => generate(kind, anchor, spacing, count, params),
        None => {
            debug!("Unknown formation '{}', no slots generated", name);
            Vec::new()
        }
    }
}

/// Side length of the smallest square grid holding `count` slots
fn grid_side(count: usize) -> usize {
    (count as f64).sqrt().ceil() as usize
}

/// (outer, inner) index pairs of a side x side grid, truncated at `count`
fn grid_slots(count: usize) -> impl Iterator<Item = (usize, usize)> {
    let side = grid_side(count);
    (0..side)
        .flat_map(move |outer| (0..side).map(move |inner| (outer, inner)))
        .take(count)
}

fn ring(anchor: Vec2, radius: f32, count: usize, start_degrees: f32) -> Vec<Vec2> {
    if count == 0 {
        return Vec::new();
    }
    let step = 360.0 / count as f32;
    (0..count)
        .map(|i| {
            let angle = (i as f32 * step + start_degrees).to_radians();
            anchor + Vec2::from_angle(angle) * radius
        })
        .collect()
}

fn square_formation(anchor: Vec2, spacing: f32, count: usize, _: &FormationParams) -> Vec<Vec2> {
    // Column-major: outer index walks X, inner walks Y
    grid_slots(count)
        .map(|(i, j)| anchor + Vec2::new(i as f32 * spacing, j as f32 * spacing))
        .collect()
}

fn circle_formation(anchor: Vec2, spacing: f32, count: usize, _: &FormationParams) -> Vec<Vec2> {
    ring(anchor, spacing, count, 0.0)
}

fn circular_wedge_formation(anchor: Vec2, spacing: f32, count: usize, _: &FormationParams) -> Vec<Vec2> {
    ring(anchor, spacing, count, 90.0)
}

fn wedge_formation(anchor: Vec2, spacing: f32, count: usize, _: &FormationParams) -> Vec<Vec2> {
    // Row r holds r + 1 slots, apex at the anchor
    (0usize..)
        .flat_map(|row| (0..=row).map(move |col| (row, col)))
        .take(count)
        .map(|(row, col)| {
            let row = row as f32;
            anchor + Vec2::new(col as f32 * spacing - row * spacing / 2.0, row * spacing)
        })
        .collect()
}

fn line_formation(anchor: Vec2, spacing: f32, count: usize, _: &FormationParams) -> Vec<Vec2> {
    (0..count)
        .map(|i| anchor + Vec2::new(i as f32 * spacing, 0.0))
        .collect()
}

fn column_formation(anchor: Vec2, spacing: f32, count: usize, _: &FormationParams) -> Vec<Vec2> {
    (0..count)
        .map(|i| anchor + Vec2::new(0.0, i as f32 * spacing))
        .collect()
}

fn staggered_formation(anchor: Vec2, spacing: f32, count: usize, _: &FormationParams) -> Vec<Vec2> {
    grid_slots(count)
        .map(|(row, col)| {
            let shift = if row % 2 == 0 { 0.0 } else { spacing / 2.0 };
            anchor + Vec2::new(col as f32 * spacing + shift, row as f32 * spacing)
        })
        .collect()
}

fn diamond_formation(anchor: Vec2, spacing: f32, count: usize, _: &FormationParams) -> Vec<Vec2> {
    let rows = grid_side(count);
    grid_slots(count)
        .map(|(row, col)| {
            let from_last = (rows - 1 - row) as f32;
            let x = from_last * spacing / 2.0 + col as f32 * spacing;
            let y = from_last.abs() * spacing;
            anchor + Vec2::new(x, y)
        })
        .collect()
}

fn hex_formation(anchor: Vec2, spacing: f32, count: usize, _: &FormationParams) -> Vec<Vec2> {
    let row_height = spacing * 3f32.sqrt() / 2.0;
    grid_slots(count)
        .map(|(row, col)| {
            let shift = if row % 2 == 0 { 0.0 } else { spacing * 0.5 };
            anchor + Vec2::new(col as f32 * spacing + shift, row as f32 * row_height)
        })
        .collect()
}

fn t_shape_formation(anchor: Vec2, spacing: f32, count: usize, _: &FormationParams) -> Vec<Vec2> {
    let bar = count.min(3);
    let crossbar = (0..bar).map(|i| anchor + Vec2::new(i as f32 * spacing, 0.0));
    // Stem hangs from the middle of the crossbar
    let stem = (0..count - bar).map(|i| anchor + Vec2::new(spacing, (i + 1) as f32 * spacing));
    crossbar.chain(stem).collect()
}

fn l_shape_formation(anchor: Vec2, spacing: f32, count: usize, _: &FormationParams) -> Vec<Vec2> {
    let upright = count.min(3);
    let foot_y = upright.saturating_sub(1) as f32 * spacing;
    let vertical = (0..upright).map(|i| anchor + Vec2::new(0.0, i as f32 * spacing));
    // Horizontal leg restarts at the foot, so its first slot doubles up on it
    let horizontal = (0..count - upright).map(|i| anchor + Vec2::new(i as f32 * spacing, foot_y));
    vertical.chain(horizontal).collect()
}

fn cross_formation(anchor: Vec2, spacing: f32, count: usize, _: &FormationParams) -> Vec<Vec2> {
    let bar = count.min(3);
    let remaining = count - bar;
    let half = (remaining / 2) as i64;

    let crossbar = (0..bar).map(|i| anchor + Vec2::new(i as f32 * spacing - spacing / 2.0, 0.0));
    let arm = (-half..=half)
        .take(remaining)
        .map(|i| anchor + Vec2::new(0.0, i as f32 * spacing));
    crossbar.chain(arm).collect()
}

fn snake_formation(anchor: Vec2, spacing: f32, count: usize, _: &FormationParams) -> Vec<Vec2> {
    (0..count)
        .map(|i| {
            let x = if i % 2 == 0 { 0.0 } else { spacing };
            anchor + Vec2::new(x, i as f32 * spacing / 2.0)
        })
        .collect()
}

/// Rejection-sampled slots inside a disk of `params.random_radius`.
/// Sampling is capped; when the disk is too crowded the layout falls back to a
/// square grid whose spacing still honors `RANDOM_MIN_SEPARATION`.
fn random_formation(anchor: Vec2, spacing: f32, count: usize, params: &FormationParams) -> Vec<Vec2> {
    let mut rng = StdRng::seed_from_u64(params.seed);
    let mut positions: Vec<Vec2> = Vec::with_capacity(count);
    let max_attempts = RANDOM_MAX_ATTEMPTS_PER_POINT.saturating_mul(count);

    for _ in 0..max_attempts {
        if positions.len() >= count {
            break;
        }
        let angle = rng.gen::<f32>() * TAU;
        let distance = rng.gen::<f32>() * params.random_radius;
        let candidate = anchor + Vec2::from_angle(angle) * distance;

        if positions.iter().all(|p| p.distance(candidate) >= RANDOM_MIN_SEPARATION) {
            positions.push(candidate);
        }
    }

    if positions.len() < count {
        warn!(
            "Random formation placed {}/{} slots in radius {:.1}, falling back to square",
            positions.len(),
            count,
            params.random_radius
        );
        return square_formation(anchor, spacing.max(RANDOM_MIN_SEPARATION), count, params);
    }
    positions
}

fn crescent_formation(anchor: Vec2, _spacing: f32, count: usize, params: &FormationParams) -> Vec<Vec2> {
    let outer_count = count / 2;
    let inner_count = count - outer_count;

    let mut positions = ring(anchor, params.outer_radius, outer_count, 0.0);
    positions.extend(ring(anchor, params.inner_radius, inner_count, 0.0));
    positions
}
