use crate::{
    entities::{AddressRecord, CandidatePlace, MapBbox, MapPoint, Marker, Region},
    gateways::MapProvider,
    NoResultsError,
};

/// Everything that follows from one completed search.
#[derive(Debug, Clone, PartialEq)]
pub struct PlaceSelection {
    /// Derived from the first candidate only.
    pub record: AddressRecord,
    pub center: MapPoint,
    /// One per candidate, in the order of the provider.
    pub markers: Vec<Marker>,
    /// The area the map should be framed to.
    pub region: Option<MapBbox>,
}

pub fn select_places<M>(
    provider: &M,
    places: &[CandidatePlace],
    prior_center: MapPoint,
) -> Result<PlaceSelection, NoResultsError>
where
    M: MapProvider + ?Sized,
{
    let Some(first) = places.first() else {
        return Err(NoResultsError);
    };
    let regions: Vec<Region> = places.iter().map(CandidatePlace::region).collect();
    let region = provider.compute_bounding_region(&regions);
    let markers: Vec<Marker> = places.iter().map(|p| p.pos().into()).collect();
    let center = markers
        .first()
        .map_or(prior_center, |marker| marker.position);
    let record = AddressRecord::from(first);
    Ok(PlaceSelection {
        record,
        center,
        markers,
        region,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{bbox::bounding_region, display::default_center, gateways::Readiness};
    use address_input_entities::builders::*;
    use std::cell::RefCell;

    #[derive(Default)]
    struct RecordingProvider {
        regions: RefCell<Vec<Vec<Region>>>,
    }

    impl MapProvider for RecordingProvider {
        fn readiness(&self) -> Readiness {
            Readiness::Ready
        }
        fn compute_bounding_region(&self, regions: &[Region]) -> Option<MapBbox> {
            self.regions.borrow_mut().push(regions.to_vec());
            bounding_region(regions)
        }
    }

    #[test]
    fn no_places() {
        let provider = RecordingProvider::default();
        assert_eq!(
            Err(NoResultsError),
            select_places(&provider, &[], default_center())
        );
        assert!(provider.regions.borrow().is_empty());
    }

    #[test]
    fn single_place() {
        let provider = RecordingProvider::default();
        let place = CandidatePlace::build()
            .formatted_address("123 Main St")
            .lat_lng(1.0, 2.0)
            .url("http://x")
            .finish();
        let selection = select_places(&provider, &[place], default_center()).unwrap();
        let pos = MapPoint::from_lat_lng_deg(1.0, 2.0);
        assert_eq!(
            AddressRecord::build()
                .lat_lng(1.0, 2.0)
                .address("123 Main St")
                .url("http://x")
                .finish(),
            selection.record
        );
        assert_eq!(pos, selection.center);
        assert_eq!(vec![Marker::from(pos)], selection.markers);
        assert_eq!(Some(MapBbox::from_point(pos)), selection.region);
    }

    #[test]
    fn first_of_many_places_is_canonical() {
        let provider = RecordingProvider::default();
        let viewport = MapBbox::new(
            MapPoint::from_lat_lng_deg(9.0, 9.0),
            MapPoint::from_lat_lng_deg(11.0, 11.0),
        );
        let places = vec![
            CandidatePlace::build()
                .formatted_address("first")
                .lat_lng(10.0, 10.0)
                .viewport(viewport)
                .finish(),
            CandidatePlace::build()
                .formatted_address("second")
                .lat_lng(-5.0, 3.0)
                .url("http://second")
                .finish(),
            CandidatePlace::build()
                .formatted_address("third")
                .lat_lng(20.0, -7.0)
                .finish(),
        ];
        let selection = select_places(&provider, &places, default_center()).unwrap();
        assert_eq!(AddressRecord::from(&places[0]), selection.record);
        assert_eq!("first", selection.record.address);
        assert_eq!(None, selection.record.url);
        assert_eq!(
            vec![
                MapPoint::from_lat_lng_deg(10.0, 10.0),
                MapPoint::from_lat_lng_deg(-5.0, 3.0),
                MapPoint::from_lat_lng_deg(20.0, -7.0),
            ],
            selection
                .markers
                .iter()
                .map(|m| m.position)
                .collect::<Vec<_>>()
        );
        assert_eq!(MapPoint::from_lat_lng_deg(10.0, 10.0), selection.center);
        assert_eq!(
            vec![vec![
                Region::Viewport(viewport),
                Region::Point(MapPoint::from_lat_lng_deg(-5.0, 3.0)),
                Region::Point(MapPoint::from_lat_lng_deg(20.0, -7.0)),
            ]],
            *provider.regions.borrow()
        );
        let region = selection.region.unwrap();
        assert_eq!(MapPoint::from_lat_lng_deg(-5.0, -7.0), region.south_west());
        assert_eq!(MapPoint::from_lat_lng_deg(20.0, 11.0), region.north_east());
    }

    #[test]
    fn place_with_inverted_viewport() {
        let provider = RecordingProvider::default();
        let place = CandidatePlace::build()
            .formatted_address("Upside down")
            .lat_lng(7.0, 0.5)
            .viewport(MapBbox::new(
                MapPoint::from_lat_lng_deg(10.0, 0.0),
                MapPoint::from_lat_lng_deg(5.0, 1.0),
            ))
            .finish();
        let selection = select_places(&provider, &[place], default_center()).unwrap();
        let region = selection.region.unwrap();
        assert!(region.is_valid());
        assert_eq!(MapPoint::from_lat_lng_deg(5.0, 0.0), region.south_west());
    }
}
