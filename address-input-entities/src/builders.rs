pub trait Builder {
    type Build;
    fn build() -> Self::Build;
}

pub use self::{address_builder::*, place_builder::*};

pub mod place_builder {

    use super::*;
    use crate::{geo::*, place::*};

    #[derive(Debug)]
    pub struct CandidatePlaceBuild {
        place: CandidatePlace,
    }

    impl CandidatePlaceBuild {
        pub fn formatted_address(mut self, address: &str) -> Self {
            self.place.formatted_address = address.into();
            self
        }
        pub fn pos(mut self, pos: MapPoint) -> Self {
            self.place.geometry.location = pos;
            self
        }
        pub fn lat_lng(self, lat: f64, lng: f64) -> Self {
            self.pos(MapPoint::from_lat_lng_deg(lat, lng))
        }
        pub fn viewport(mut self, viewport: MapBbox) -> Self {
            self.place.geometry.viewport = Some(viewport);
            self
        }
        pub fn url(mut self, url: &str) -> Self {
            self.place.url = Some(url.into());
            self
        }
        pub fn finish(self) -> CandidatePlace {
            self.place
        }
    }

    impl Builder for CandidatePlace {
        type Build = CandidatePlaceBuild;
        fn build() -> CandidatePlaceBuild {
            CandidatePlaceBuild {
                place: CandidatePlace {
                    geometry: PlaceGeometry {
                        location: MapPoint::from_lat_lng_deg(0.0, 0.0),
                        viewport: None,
                    },
                    formatted_address: String::new(),
                    url: None,
                },
            }
        }
    }
}

pub mod address_builder {

    use super::*;
    use crate::{address::*, geo::*};

    #[derive(Debug)]
    pub struct AddressRecordBuild {
        record: AddressRecord,
    }

    impl AddressRecordBuild {
        pub fn address(mut self, address: &str) -> Self {
            self.record.address = address.into();
            self
        }
        pub fn lat_lng(mut self, lat: f64, lng: f64) -> Self {
            self.record.pos = Some(MapPoint::from_lat_lng_deg(lat, lng));
            self
        }
        pub fn url(mut self, url: &str) -> Self {
            self.record.url = Some(url.into());
            self
        }
        pub fn finish(self) -> AddressRecord {
            self.record
        }
    }

    impl Builder for AddressRecord {
        type Build = AddressRecordBuild;
        fn build() -> AddressRecordBuild {
            AddressRecordBuild {
                record: AddressRecord::default(),
            }
        }
    }
}
