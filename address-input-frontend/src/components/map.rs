use leaflet::{LatLng, LatLngBounds};
use leptos::*;
use leptos_leaflet::{position, MapContainer, Marker, Position, TileLayer};

use address_input_core::{
    entities::{MapBbox, MapPoint},
    shell::MapSurface,
};

const TILE_LAYER_URL: &str = "https://tile.openstreetmap.org/{z}/{x}/{y}.png";
const MAP_ATTRIBUTION: &str =
    "&copy; <a href=\"https://www.openstreetmap.org/copyright\">OpenStreetMap</a> contributors";

fn lat_lng(pt: MapPoint) -> LatLng {
    let (lat, lng) = pt.to_lat_lng_deg();
    LatLng::new(lat, lng)
}

fn bounds(bbox: MapBbox) -> LatLngBounds {
    LatLngBounds::new(&lat_lng(bbox.south_west()), &lat_lng(bbox.north_east()))
}

#[component]
pub fn AddressMap(#[prop(into)] surface: Signal<MapSurface>) -> impl IntoView {
    let map = RwSignal::<Option<leaflet::Map>>::new(None);

    Effect::new(move |_| {
        let Some(map) = map.get() else {
            log::debug!("Leaflet map not yet available");
            return;
        };
        let MapSurface { center, fit, .. } = surface.get();
        if let Some(fit) = fit {
            map.fit_bounds(&bounds(fit));
        } else {
            map.set_view(&lat_lng(center), map.get_zoom());
        }
    });

    let MapSurface { center, zoom, .. } = surface.get_untracked();
    let (lat, lng) = center.to_lat_lng_deg();
    let center = Position::new(lat, lng);

    view! {
      <MapContainer
        class="address-input-map"
        center
        zoom=f64::from(zoom)
        map=map.write_only()
        set_view=true
      >
        <TileLayer url=TILE_LAYER_URL attribution=MAP_ATTRIBUTION />
        <For
          each=move || surface.get().markers.into_iter().enumerate()
          key=|(idx, marker)| (*idx, marker.position.to_string())
          let:marker
        >
          <Marker position=position!(marker.1.position.lat().to_deg(), marker.1.position.lng().to_deg()) />
        </For>
      </MapContainer>
    }
}
