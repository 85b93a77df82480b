use std::collections::BTreeSet;

use log::info;

use super::journeys::{elect_journey_pattern, vehicle_journey_rows, vehicle_journeys_for_line};
use super::sections::ResolvedJourneyPattern;
use super::tracks::assemble_track;
use super::txc_types::{DirectionDescription, Line, Operator, Service, TransXChange};
use super::uploader::UploadSummary;
use super::ObjectKey;
use crate::database::store::{NewJourneyPattern, NewService, RowId};
use crate::database::types::DataSource;
use crate::database::{ReferenceStore, StoreError};

pub fn create_unique_line_id(noc: &str, line_name: &str) -> String {
    format!("UZ000{}:{}{}", noc, noc, line_name)
}

/// The line's own `id`, unless it has none or it is a non-bus TNDS line, in
/// which case one is derived from the operator and line name.
fn line_id(line: &Line, noc: &str, line_name: &str, data_source: DataSource, mode: &str) -> String {
    match line.id.as_deref() {
        Some(id) if !id.is_empty() && !(data_source == DataSource::Tnds && mode != "bus") => id.to_string(),
        _ => create_unique_line_id(noc, line_name),
    }
}

pub fn line_row(operator: &Operator, noc: &str, service: &Service, line: &Line, object_key: &ObjectKey) -> NewService {
    let line_name = line.line_name.clone().unwrap_or_default();
    let mode = service.mode.clone().unwrap_or_default();
    let description = |d: &Option<DirectionDescription>| {
        d.as_ref().and_then(|d| d.description.clone()).unwrap_or_default()
    };

    NewService {
        noc_code: Some(noc.to_string()),
        line_id: line_id(line, noc, &line_name, object_key.data_source, &mode),
        line_name,
        start_date: service.start_date(),
        end_date: service.end_date(),
        operator_short_name: operator.short_name.clone(),
        inbound_direction_description: description(&line.inbound_description),
        outbound_direction_description: description(&line.outbound_description),
        service_description: service.description.clone().unwrap_or_default(),
        service_code: service.service_code.clone(),
        region_code: object_key.region_code.clone(),
        data_source: object_key.data_source,
        origin: service.origin().map(str::to_string),
        destination: service.destination().map(str::to_string),
        mode,
        file_path: Some(object_key.key.clone()),
    }
}

/// A line row that is in the store after `find_or_insert_line`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StoredLine {
    pub id: RowId,
    pub inserted: bool,
}

pub fn find_or_insert_line<S: ReferenceStore + ?Sized>(store: &mut S, row: &NewService) -> Result<StoredLine, StoreError> {
    if let Some(id) = store.find_service(row)? {
        info!(
            "Existing line found - '{:?}' - '{}' - '{:?}' - '{:?}' - '{}'",
            row.noc_code, row.line_name, row.service_code, row.start_date, row.data_source,
        );
        return Ok(StoredLine { id, inserted: false });
    }

    let id = store.insert_service(row)?;
    Ok(StoredLine { id, inserted: true })
}

/// Writes every journey pattern of the line that is not stored yet, with its
/// links, then links the line to the admin areas all its patterns pass through.
pub fn write_journey_patterns<S: ReferenceStore + ?Sized>(
    store: &mut S,
    patterns: &[ResolvedJourneyPattern],
    service_id: RowId,
    summary: &mut UploadSummary,
) -> Result<(), StoreError> {
    let mut admin_area_codes = BTreeSet::new();

    for pattern in patterns {
        let row = NewJourneyPattern {
            operator_service_id: service_id,
            destination_display: pattern.pattern.destination_display.clone(),
            direction: pattern.pattern.direction.clone(),
            route_ref: pattern.pattern.route_ref.clone(),
            journey_pattern_ref: pattern.pattern.id.clone(),
            section_refs: pattern.section_key.clone(),
        };

        if store.find_journey_pattern(&row)?.is_some() {
            info!(
                "Existing journey pattern found - '{}' - '{:?}' - '{:?}' - '{:?}' - '{}'",
                service_id, row.destination_display, row.direction, row.route_ref, row.section_refs,
            );
            continue;
        }

        let journey_pattern_id = store.insert_journey_pattern(&row)?;
        let links = pattern.link_rows();
        store.insert_journey_pattern_links(journey_pattern_id, &links)?;

        summary.journey_patterns += 1;
        summary.journey_pattern_links += links.len();

        admin_area_codes.extend(store.admin_area_codes(&pattern.stop_codes())?);
    }

    if !admin_area_codes.is_empty() {
        store.insert_admin_area_codes(service_id, &admin_area_codes)?;
        summary.admin_area_codes += admin_area_codes.len();
    }

    Ok(())
}

/// Vehicle journeys of the line, and the track and centre point of the
/// journey pattern they elect.
///
/// Only call this for a line inserted by the current run. These tables have
/// no natural key to deduplicate on, so a line that already existed keeps the
/// journeys and geometry it was first written with.
pub fn write_vehicle_journeys<S: ReferenceStore + ?Sized>(
    store: &mut S,
    doc: &TransXChange,
    line: &Line,
    patterns: &[ResolvedJourneyPattern],
    service_id: RowId,
    summary: &mut UploadSummary,
) -> Result<(), StoreError> {
    let journeys = vehicle_journeys_for_line(doc, line);

    let rows = vehicle_journey_rows(doc, &journeys, service_id);
    if !rows.is_empty() {
        store.insert_vehicle_journeys(&rows)?;
        summary.vehicle_journeys += rows.len();
    }

    let elected = match elect_journey_pattern(&journeys) {
        Some(elected) => elected,
        None => {
            info!("No journey pattern elected for line {:?}", line.id);
            return Ok(());
        }
    };

    let pattern = match patterns.iter().find(|pattern| pattern.journey_pattern_ref() == Some(elected.as_str())) {
        Some(pattern) => pattern,
        None => {
            info!("Elected journey pattern {} is not part of the service", elected);
            return Ok(());
        }
    };

    if let Some(route_ref) = pattern.pattern.route_ref.as_deref() {
        let track = assemble_track(doc, route_ref, &pattern.route_link_refs());
        if !track.is_empty() {
            store.insert_track(service_id, &track)?;
            summary.track_points += track.len();
        }
    }

    if let Some(centre_stop) = pattern.centre_stop() {
        match store.stop_location(centre_stop)? {
            Some(centre) => store.update_centre_point(service_id, &centre)?,
            None => info!("No location found for centre stop {}", centre_stop),
        }
    }

    Ok(())
}
