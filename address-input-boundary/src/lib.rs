use serde::{Deserialize, Deserializer, Serialize};

#[cfg(feature = "entity-conversions")]
mod conv;

#[cfg(feature = "entity-conversions")]
pub use conv::ConversionError;

/// The address value as it crosses the widget boundary.
///
/// All four keys are required when reading a value,
/// but `lat`, `lng` and `url` may be `null`.
#[rustfmt::skip]
#[derive(Serialize, Deserialize)]
#[cfg_attr(feature = "extra-derive", derive(Debug, Clone, PartialEq))]
#[serde(deny_unknown_fields)]
pub struct AddressRecord {
    #[serde(deserialize_with = "nullable")]
    pub lat     : Option<f64>,
    #[serde(deserialize_with = "nullable")]
    pub lng     : Option<f64>,
    pub address : String,
    #[serde(deserialize_with = "nullable")]
    pub url     : Option<String>,
}

#[derive(Serialize, Deserialize)]
#[cfg_attr(feature = "extra-derive", derive(Debug, Clone, Copy, PartialEq))]
pub struct Coordinate {
    pub lat: f64,
    pub lng: f64,
}

#[derive(Serialize, Deserialize)]
#[cfg_attr(feature = "extra-derive", derive(Debug, Clone, Copy, PartialEq))]
pub struct Viewport {
    pub south_west: Coordinate,
    pub north_east: Coordinate,
}

#[derive(Serialize, Deserialize)]
#[cfg_attr(feature = "extra-derive", derive(Debug, Clone, PartialEq))]
pub struct PlaceGeometry {
    pub location: Coordinate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub viewport: Option<Viewport>,
}

#[derive(Serialize, Deserialize)]
#[cfg_attr(feature = "extra-derive", derive(Debug, Clone, PartialEq))]
pub struct CandidatePlace {
    pub geometry: PlaceGeometry,
    pub formatted_address: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

// A field that must be present but may be `null`.
// Using `deserialize_with` disables serde's implicit
// `None` for missing `Option` fields.
fn nullable<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serialize_all_keys_in_order() {
        let record = AddressRecord {
            lat: None,
            lng: None,
            address: "Main St".to_string(),
            url: None,
        };
        assert_eq!(
            r#"{"lat":null,"lng":null,"address":"Main St","url":null}"#,
            serde_json::to_string(&record).unwrap()
        );
    }

    #[test]
    fn require_all_keys() {
        let json = r#"{"lat":null,"lng":null,"address":"Main St"}"#;
        assert!(serde_json::from_str::<AddressRecord>(json).is_err());
        let json = r#"{"lng":2,"address":"Main St","url":null}"#;
        assert!(serde_json::from_str::<AddressRecord>(json).is_err());
    }

    #[test]
    fn reject_unknown_keys() {
        let json = r#"{"lat":1,"lng":2,"address":"Main St","url":null,"zip":"123"}"#;
        assert!(serde_json::from_str::<AddressRecord>(json).is_err());
    }

    #[test]
    fn read_integer_coordinates() {
        let json = r#"{"lat":1,"lng":2,"address":"Main St","url":"http://x"}"#;
        let record: AddressRecord = serde_json::from_str(json).unwrap();
        assert_eq!(Some(1.0), record.lat);
        assert_eq!(Some(2.0), record.lng);
        assert_eq!(Some("http://x"), record.url.as_deref());
    }

    #[test]
    fn candidate_place_without_viewport_and_url() {
        let json = r#"{
          "geometry": { "location": { "lat": 1.0, "lng": 2.0 } },
          "formatted_address": "123 Main St"
        }"#;
        let place: CandidatePlace = serde_json::from_str(json).unwrap();
        assert!(place.geometry.viewport.is_none());
        assert!(place.url.is_none());
    }
}
