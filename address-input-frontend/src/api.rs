use gloo_net::http::{Request, Response};
use percent_encoding::{utf8_percent_encode, NON_ALPHANUMERIC};
use serde::{de::DeserializeOwned, Deserialize};
use thiserror::Error;

use address_input_boundary::{CandidatePlace, Coordinate, PlaceGeometry, Viewport};

type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum Error {
    #[error("{0}")]
    Fetch(String),

    #[error("The search service responded with status {0}")]
    Status(u16),

    #[error("Invalid place '{0}'")]
    Place(String),
}

impl From<gloo_net::Error> for Error {
    fn from(err: gloo_net::Error) -> Self {
        Self::Fetch(format!("{err}"))
    }
}

async fn into_json<T>(response: Response) -> Result<T>
where
    T: DeserializeOwned,
{
    // ensure we've got 2xx status
    if response.ok() {
        Ok(response.json().await?)
    } else {
        Err(Error::Status(response.status()))
    }
}

/// Place search of a Nominatim compatible geocoding service.
#[derive(Clone)]
pub struct SearchApi {
    url: String,
    key: String,
}

impl SearchApi {
    #[must_use]
    pub const fn new(url: String, key: String) -> Self {
        Self { url, key }
    }

    pub async fn search(&self, text: &str) -> Result<Vec<CandidatePlace>> {
        let encoded_txt = utf8_percent_encode(text, NON_ALPHANUMERIC);
        let encoded_key = utf8_percent_encode(&self.key, NON_ALPHANUMERIC);
        let url = format!(
            "{}/search?q={encoded_txt}&format=jsonv2&key={encoded_key}",
            self.url
        );
        let response = Request::get(&url).send().await?;
        let places: Vec<SearchResult> = into_json(response).await?;
        places.into_iter().map(CandidatePlace::try_from).collect()
    }
}

#[derive(Deserialize)]
struct SearchResult {
    lat: String,
    lon: String,
    display_name: String,
    /// South, north, west, east
    #[serde(default)]
    boundingbox: Option<[String; 4]>,
    osm_type: Option<String>,
    osm_id: Option<u64>,
}

const OSM_URL: &str = "https://www.openstreetmap.org";

impl TryFrom<SearchResult> for CandidatePlace {
    type Error = Error;

    fn try_from(from: SearchResult) -> Result<Self> {
        let SearchResult {
            lat,
            lon,
            display_name,
            boundingbox,
            osm_type,
            osm_id,
        } = from;
        let invalid = || Error::Place(display_name.clone());
        let location = Coordinate {
            lat: lat.parse().map_err(|_| invalid())?,
            lng: lon.parse().map_err(|_| invalid())?,
        };
        let viewport = boundingbox
            .map(|[south, north, west, east]| {
                let parse = |deg: &str| deg.parse::<f64>().map_err(|_| invalid());
                Ok::<_, Error>(Viewport {
                    south_west: Coordinate {
                        lat: parse(&south)?,
                        lng: parse(&west)?,
                    },
                    north_east: Coordinate {
                        lat: parse(&north)?,
                        lng: parse(&east)?,
                    },
                })
            })
            .transpose()?;
        let url = osm_type
            .zip(osm_id)
            .map(|(kind, id)| format!("{OSM_URL}/{kind}/{id}"));
        Ok(Self {
            geometry: PlaceGeometry { location, viewport },
            formatted_address: display_name,
            url,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn convert_search_result() {
        let json = r#"[{
            "place_id": 1,
            "lat": "52.5170365",
            "lon": "13.3888599",
            "display_name": "Berlin, Deutschland",
            "boundingbox": ["52.3382448", "52.6755087", "13.0883450", "13.7611609"],
            "osm_type": "relation",
            "osm_id": 62422
        }]"#;
        let results: Vec<SearchResult> = serde_json::from_str(json).unwrap();
        let place = CandidatePlace::try_from(results.into_iter().next().unwrap()).unwrap();
        assert_eq!("Berlin, Deutschland", place.formatted_address);
        assert_eq!(52.517_036_5, place.geometry.location.lat);
        assert_eq!(13.388_859_9, place.geometry.location.lng);
        let viewport = place.geometry.viewport.unwrap();
        assert_eq!(52.338_244_8, viewport.south_west.lat);
        assert_eq!(13.761_160_9, viewport.north_east.lng);
        assert_eq!(
            Some("https://www.openstreetmap.org/relation/62422"),
            place.url.as_deref()
        );
    }

    #[test]
    fn reject_invalid_coordinates() {
        let result = SearchResult {
            lat: "north".to_string(),
            lon: "13.0".to_string(),
            display_name: "Nowhere".to_string(),
            boundingbox: None,
            osm_type: None,
            osm_id: None,
        };
        assert_eq!(
            Err(Error::Place("Nowhere".to_string())),
            CandidatePlace::try_from(result)
        );
    }
}
