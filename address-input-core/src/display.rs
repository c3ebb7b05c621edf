use crate::entities::{Marker, MapPoint};

pub const DEFAULT_CENTER_LAT: f64 = 14.562_690_1;
pub const DEFAULT_CENTER_LNG: f64 = 121.008_481_5;
pub const DEFAULT_ZOOM: u8 = 20;

pub fn default_center() -> MapPoint {
    MapPoint::from_lat_lng_deg(DEFAULT_CENTER_LAT, DEFAULT_CENTER_LNG)
}

/// Local, never persisted presentation state.
#[derive(Debug, Clone, PartialEq)]
pub struct DisplayState {
    pub query_text: String,
    pub map_center: MapPoint,
    pub markers: Vec<Marker>,
}

impl DisplayState {
    /// The state at mount: an empty query and a
    /// single marker right at the center.
    pub fn new(center: MapPoint) -> Self {
        Self {
            query_text: String::new(),
            map_center: center,
            markers: vec![center.into()],
        }
    }
}

impl Default for DisplayState {
    fn default() -> Self {
        Self::new(default_center())
    }
}
