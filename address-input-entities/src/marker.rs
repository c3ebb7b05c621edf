use crate::geo::MapPoint;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Marker {
    pub position: MapPoint,
}

impl From<MapPoint> for Marker {
    fn from(position: MapPoint) -> Self {
        Self { position }
    }
}
