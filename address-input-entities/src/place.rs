use crate::{
    address::AddressRecord,
    geo::{MapBbox, MapPoint, Region},
};

#[derive(Debug, Clone, PartialEq)]
pub struct PlaceGeometry {
    pub location: MapPoint,
    pub viewport: Option<MapBbox>,
}

/// A single result of an address search.
#[derive(Debug, Clone, PartialEq)]
pub struct CandidatePlace {
    pub geometry: PlaceGeometry,
    pub formatted_address: String,
    pub url: Option<String>,
}

impl CandidatePlace {
    pub const fn pos(&self) -> MapPoint {
        self.geometry.location
    }

    /// The area this place occupies on the map:
    /// its viewport if known, otherwise just its location.
    pub fn region(&self) -> Region {
        match self.geometry.viewport {
            Some(viewport) => Region::Viewport(viewport),
            None => Region::Point(self.geometry.location),
        }
    }
}

impl From<&CandidatePlace> for AddressRecord {
    fn from(from: &CandidatePlace) -> Self {
        Self {
            pos: Some(from.pos()),
            address: from.formatted_address.clone(),
            url: from.url.clone(),
        }
    }
}
