use crate::entities::{MapBbox, Region};

/// The smallest box that covers all regions.
///
/// Viewports are merged as a whole, single points
/// extend the box. Returns `None` for no regions.
pub fn bounding_region(regions: &[Region]) -> Option<MapBbox> {
    let mut regions = regions.iter();
    let mut bbox = match regions.next()? {
        // Rebuilt from its corners so that an inverted viewport
        // still yields a valid box.
        Region::Viewport(viewport) => {
            let mut bbox = MapBbox::from_point(viewport.south_west());
            bbox.extend(viewport.north_east());
            bbox
        }
        Region::Point(pt) => MapBbox::from_point(*pt),
    };
    for region in regions {
        match region {
            Region::Viewport(viewport) => bbox.union(viewport),
            Region::Point(pt) => bbox.extend(*pt),
        }
    }
    debug_assert!(bbox.is_valid());
    Some(bbox)
}
