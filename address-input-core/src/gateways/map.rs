use crate::entities::{MapBbox, Region};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Readiness {
    Loading,
    Ready,
}

/// Capabilities of the mapping provider that the
/// synchronization logic depends on.
pub trait MapProvider {
    fn readiness(&self) -> Readiness;
    fn compute_bounding_region(&self, regions: &[Region]) -> Option<MapBbox>;
}
