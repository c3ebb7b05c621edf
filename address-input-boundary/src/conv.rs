use super::*;
use address_input_entities as e;
use e::geo::{MapBbox, MapPoint};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConversionError {
    #[error("Latitude and longitude must either both be set or both be null")]
    IncompleteCoordinates,
    #[error("Invalid coordinates: lat = {lat}, lng = {lng}")]
    InvalidCoordinates { lat: f64, lng: f64 },
    #[error("Invalid viewport: south-west corner is north of the north-east corner")]
    InvalidViewport,
}

impl From<e::geo::MapPoint> for Coordinate {
    fn from(from: e::geo::MapPoint) -> Self {
        let (lat, lng) = from.to_lat_lng_deg();
        Self { lat, lng }
    }
}

impl TryFrom<Coordinate> for e::geo::MapPoint {
    type Error = ConversionError;
    fn try_from(from: Coordinate) -> Result<Self, Self::Error> {
        let Coordinate { lat, lng } = from;
        MapPoint::try_from_lat_lng_deg(lat, lng)
            .ok_or(ConversionError::InvalidCoordinates { lat, lng })
    }
}

impl From<e::geo::MapBbox> for Viewport {
    fn from(from: e::geo::MapBbox) -> Self {
        Self {
            south_west: from.south_west().into(),
            north_east: from.north_east().into(),
        }
    }
}

impl TryFrom<Viewport> for e::geo::MapBbox {
    type Error = ConversionError;
    fn try_from(from: Viewport) -> Result<Self, Self::Error> {
        let Viewport {
            south_west,
            north_east,
        } = from;
        let bbox = MapBbox::new(south_west.try_into()?, north_east.try_into()?);
        if !bbox.is_valid() {
            return Err(ConversionError::InvalidViewport);
        }
        Ok(bbox)
    }
}

impl From<e::address::AddressRecord> for AddressRecord {
    fn from(from: e::address::AddressRecord) -> Self {
        let e::address::AddressRecord { pos, address, url } = from;
        let (lat, lng) = match pos.map(MapPoint::to_lat_lng_deg) {
            Some((lat, lng)) => (Some(lat), Some(lng)),
            None => (None, None),
        };
        Self {
            lat,
            lng,
            address,
            url,
        }
    }
}

impl TryFrom<AddressRecord> for e::address::AddressRecord {
    type Error = ConversionError;
    fn try_from(from: AddressRecord) -> Result<Self, Self::Error> {
        let AddressRecord {
            lat,
            lng,
            address,
            url,
        } = from;
        let pos = match (lat, lng) {
            (Some(lat), Some(lng)) => Some(Coordinate { lat, lng }.try_into()?),
            (None, None) => None,
            _ => return Err(ConversionError::IncompleteCoordinates),
        };
        Ok(Self { pos, address, url })
    }
}

impl From<e::place::CandidatePlace> for CandidatePlace {
    fn from(from: e::place::CandidatePlace) -> Self {
        let e::place::CandidatePlace {
            geometry,
            formatted_address,
            url,
        } = from;
        Self {
            geometry: PlaceGeometry {
                location: geometry.location.into(),
                viewport: geometry.viewport.map(Into::into),
            },
            formatted_address,
            url,
        }
    }
}

impl TryFrom<CandidatePlace> for e::place::CandidatePlace {
    type Error = ConversionError;
    fn try_from(from: CandidatePlace) -> Result<Self, Self::Error> {
        let CandidatePlace {
            geometry,
            formatted_address,
            url,
        } = from;
        let PlaceGeometry { location, viewport } = geometry;
        Ok(Self {
            geometry: e::place::PlaceGeometry {
                location: location.try_into()?,
                viewport: viewport.map(TryInto::try_into).transpose()?,
            },
            formatted_address,
            url,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn half_null_coordinates() {
        let record = AddressRecord {
            lat: Some(1.0),
            lng: None,
            address: String::new(),
            url: None,
        };
        assert_eq!(
            Err(ConversionError::IncompleteCoordinates),
            e::address::AddressRecord::try_from(record)
        );
    }

    #[test]
    fn out_of_range_coordinates() {
        let record = AddressRecord {
            lat: Some(91.0),
            lng: Some(0.0),
            address: String::new(),
            url: None,
        };
        assert_eq!(
            Err(ConversionError::InvalidCoordinates { lat: 91.0, lng: 0.0 }),
            e::address::AddressRecord::try_from(record)
        );
    }

    #[test]
    fn candidate_place_with_viewport() {
        let place = CandidatePlace {
            geometry: PlaceGeometry {
                location: Coordinate { lat: 1.0, lng: 2.0 },
                viewport: Some(Viewport {
                    south_west: Coordinate { lat: 0.5, lng: 1.5 },
                    north_east: Coordinate { lat: 1.5, lng: 2.5 },
                }),
            },
            formatted_address: "123 Main St".to_string(),
            url: None,
        };
        let place = e::place::CandidatePlace::try_from(place).unwrap();
        assert_eq!(
            Some(MapBbox::new(
                MapPoint::from_lat_lng_deg(0.5, 1.5),
                MapPoint::from_lat_lng_deg(1.5, 2.5)
            )),
            place.geometry.viewport
        );
    }

    #[test]
    fn inverted_viewport() {
        let viewport = Viewport {
            south_west: Coordinate { lat: 10.0, lng: 0.0 },
            north_east: Coordinate { lat: 5.0, lng: 1.0 },
        };
        assert_eq!(
            Err(ConversionError::InvalidViewport),
            MapBbox::try_from(viewport)
        );
    }

    #[test]
    fn viewport_across_antimeridian() {
        let viewport = Viewport {
            south_west: Coordinate { lat: -5.0, lng: 175.0 },
            north_east: Coordinate { lat: 5.0, lng: -175.0 },
        };
        assert!(MapBbox::try_from(viewport).is_ok());
    }
}
