use itertools::Itertools;

use super::txc_types::{Location, RouteLink, TransXChange};
use crate::database::store::TrackPoint;

/// Polyline of a journey pattern: the route's sections in declared order, and
/// within each section the requested route links in the order they are
/// requested. Adjacent duplicate points are collapsed.
pub fn assemble_track(doc: &TransXChange, route_ref: &str, route_link_refs: &[&str]) -> Vec<TrackPoint> {
    let route = match doc.route(route_ref) {
        Some(route) => route,
        None => return vec![],
    };

    let points = route.section_refs.iter()
        .flat_map(|section_ref| doc.route_sections(section_ref))
        .flat_map(|section| route_link_refs.iter()
            .filter_map(move |link_ref| section.links.iter().find(|link| link.id.as_deref() == Some(*link_ref))))
        .flat_map(link_points)
        .collect();

    collapse_adjacent(points)
}

fn link_points(link: &RouteLink) -> Vec<TrackPoint> {
    link.tracks.iter()
        .flat_map(|track| track.mappings.iter())
        .flat_map(|mapping| mapping.locations.iter())
        .filter_map(location_point)
        .collect()
}

/// Prefers the translated pair over the raw one.
fn location_point(location: &Location) -> Option<TrackPoint> {
    let translated = location.translation.as_ref()
        .and_then(|translation| Some(TrackPoint::new(translation.longitude.clone()?, translation.latitude.clone()?)));

    translated.or_else(|| Some(TrackPoint::new(location.longitude.clone()?, location.latitude.clone()?)))
}

pub fn collapse_adjacent(points: Vec<TrackPoint>) -> Vec<TrackPoint> {
    points.into_iter().dedup().collect()
}
