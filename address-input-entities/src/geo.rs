use itertools::Itertools;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("Invalid latitude degrees: {0}")]
    LatDeg(String),
    #[error("Invalid longitude degrees: {0}")]
    LngDeg(String),
    #[error("Invalid latitude '{0}'")]
    Lat(String),
    #[error("Invalid longitude '{0}'")]
    Lng(String),
    #[error("Failed to parse MapPoint: {0}")]
    MapPoint(String),
}

/// Latitude in degrees.
#[derive(Clone, Copy, Debug, PartialEq, PartialOrd)]
pub struct LatCoord(f64);

impl LatCoord {
    const DEG_MAX: f64 = 90.0;
    const DEG_MIN: f64 = -90.0;

    pub const fn max() -> Self {
        Self(Self::DEG_MAX)
    }

    pub const fn min() -> Self {
        Self(Self::DEG_MIN)
    }

    pub fn is_valid(self) -> bool {
        // NaN is never in range
        (Self::DEG_MIN..=Self::DEG_MAX).contains(&self.0)
    }

    pub const fn to_deg(self) -> f64 {
        self.0
    }

    pub fn from_deg<T: Into<f64>>(deg: T) -> Self {
        let res = Self(deg.into());
        debug_assert!(res.is_valid());
        res
    }

    pub fn try_from_deg<T: Into<f64>>(deg: T) -> Option<Self> {
        let res = Self(deg.into());
        res.is_valid().then_some(res)
    }
}

impl Default for LatCoord {
    fn default() -> Self {
        let res = Self(f64::NAN);
        debug_assert!(!res.is_valid());
        res
    }
}

impl std::fmt::Display for LatCoord {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> Result<(), std::fmt::Error> {
        write!(f, "{}", self.to_deg())
    }
}

/// Longitude in degrees.
#[derive(Clone, Copy, Debug, PartialEq, PartialOrd)]
pub struct LngCoord(f64);

impl LngCoord {
    const DEG_MAX: f64 = 180.0;
    const DEG_MIN: f64 = -180.0;

    pub const fn max() -> Self {
        Self(Self::DEG_MAX)
    }

    pub const fn min() -> Self {
        Self(Self::DEG_MIN)
    }

    pub fn is_valid(self) -> bool {
        (Self::DEG_MIN..=Self::DEG_MAX).contains(&self.0)
    }

    pub const fn to_deg(self) -> f64 {
        self.0
    }

    pub fn from_deg<T: Into<f64>>(deg: T) -> Self {
        let res = Self(deg.into());
        debug_assert!(res.is_valid());
        res
    }

    pub fn try_from_deg<T: Into<f64>>(deg: T) -> Option<Self> {
        let res = Self(deg.into());
        res.is_valid().then_some(res)
    }
}

impl Default for LngCoord {
    fn default() -> Self {
        let res = Self(f64::NAN);
        debug_assert!(!res.is_valid());
        res
    }
}

impl std::fmt::Display for LngCoord {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> Result<(), std::fmt::Error> {
        write!(f, "{}", self.to_deg())
    }
}

/// A geographical location on a (flat) map.
///
/// Degrees are kept as they were given, so a point that was
/// read from a serialized value is written back unchanged.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct MapPoint {
    lat: LatCoord,
    lng: LngCoord,
}

impl MapPoint {
    pub const fn new(lat: LatCoord, lng: LngCoord) -> Self {
        Self { lat, lng }
    }

    pub const fn lat(self) -> LatCoord {
        self.lat
    }

    pub const fn lng(self) -> LngCoord {
        self.lng
    }

    pub fn is_valid(self) -> bool {
        self.lat.is_valid() && self.lng.is_valid()
    }

    pub const fn to_lat_lng_deg(self) -> (f64, f64) {
        (self.lat.to_deg(), self.lng.to_deg())
    }

    pub fn from_lat_lng_deg<LAT: Into<f64>, LNG: Into<f64>>(lat: LAT, lng: LNG) -> Self {
        Self::new(LatCoord::from_deg(lat), LngCoord::from_deg(lng))
    }

    pub fn try_from_lat_lng_deg<LAT: Into<f64>, LNG: Into<f64>>(
        lat: LAT,
        lng: LNG,
    ) -> Option<Self> {
        match (LatCoord::try_from_deg(lat), LngCoord::try_from_deg(lng)) {
            (Some(lat), Some(lng)) => Some(Self::new(lat, lng)),
            _ => None,
        }
    }

    fn parse_lat_lng_deg(lat_deg_str: &str, lng_deg_str: &str) -> Result<Self, ParseError> {
        let lat_deg_str = lat_deg_str.trim();
        let lng_deg_str = lng_deg_str.trim();
        match (lat_deg_str.parse::<f64>(), lng_deg_str.parse::<f64>()) {
            (Ok(lat_deg), Ok(lng_deg)) => {
                let lat = LatCoord::try_from_deg(lat_deg)
                    .ok_or_else(|| ParseError::LatDeg(lat_deg.to_string()))?;
                let lng = LngCoord::try_from_deg(lng_deg)
                    .ok_or_else(|| ParseError::LngDeg(lng_deg.to_string()))?;
                Ok(Self::new(lat, lng))
            }
            (Err(_), _) => Err(ParseError::Lat(lat_deg_str.to_string())),
            (_, Err(_)) => Err(ParseError::Lng(lng_deg_str.to_string())),
        }
    }
}

impl std::fmt::Display for MapPoint {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> Result<(), std::fmt::Error> {
        write!(f, "{},{}", self.lat, self.lng)
    }
}

impl std::str::FromStr for MapPoint {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if let Some((lat_deg_str, lng_deg_str)) = s.split(',').collect_tuple() {
            Self::parse_lat_lng_deg(lat_deg_str, lng_deg_str)
        } else {
            Err(ParseError::MapPoint(s.to_string()))
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct MapBbox {
    sw: MapPoint,
    ne: MapPoint,
}

impl MapBbox {
    pub const fn new(sw: MapPoint, ne: MapPoint) -> Self {
        Self { sw, ne }
    }

    /// A degenerated box that only covers a single point.
    pub const fn from_point(pt: MapPoint) -> Self {
        Self { sw: pt, ne: pt }
    }

    pub const fn south_west(&self) -> MapPoint {
        self.sw
    }

    pub const fn north_east(&self) -> MapPoint {
        self.ne
    }

    pub fn is_valid(&self) -> bool {
        self.sw.is_valid() && self.ne.is_valid() && self.sw.lat() <= self.ne.lat()
    }

    /// Grow the box until it covers `pt`.
    ///
    /// Longitudes are treated as planar, i.e. a box never
    /// grows across the antimeridian.
    pub fn extend(&mut self, pt: MapPoint) {
        debug_assert!(pt.is_valid());
        let (sw_lat, sw_lng) = self.sw.to_lat_lng_deg();
        let (ne_lat, ne_lng) = self.ne.to_lat_lng_deg();
        let (lat, lng) = pt.to_lat_lng_deg();
        self.sw = MapPoint::from_lat_lng_deg(sw_lat.min(lat), sw_lng.min(lng));
        self.ne = MapPoint::from_lat_lng_deg(ne_lat.max(lat), ne_lng.max(lng));
    }

    pub fn union(&mut self, other: &MapBbox) {
        self.extend(other.sw);
        self.extend(other.ne);
    }
}

impl std::fmt::Display for MapBbox {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> Result<(), std::fmt::Error> {
        write!(f, "{},{}", self.sw, self.ne)
    }
}

/// An area that should be visible when framing the map.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Region {
    Viewport(MapBbox),
    Point(MapPoint),
}
