// Box overlap query over the selectable registry
use crate::types::{SelectableSet, SelectionRect};

/// Every registered selectable whose bounding box intersects `rect`, in
/// registration order. Exact AABB test; touching edges count.
pub fn overlapping<S>(rect: &SelectionRect, units: &S) -> Vec<S::Id>
where
    S: SelectableSet + ?Sized,
{
    units
        .ids()
        .into_iter()
        .filter(|&id| {
            units
                .get(id)
                .is_some_and(|unit| unit.bounds().intersects(rect))
        })
        .collect()
}
