use std::collections::BTreeSet;

use chrono::NaiveDate;

use super::{types::DataSource, StoreError};

pub type RowId = u64;

/// Equality where two absent values are equal, the `<=>` operator of MySQL.
/// Every dedup key is compared with this, never with plain `==` on optionals.
pub trait NullSafeEq {
    fn null_safe_eq(&self, other: &Self) -> bool;
}

impl<T: PartialEq> NullSafeEq for Option<T> {
    fn null_safe_eq(&self, other: &Self) -> bool {
        match (self, other) {
            (None, None) => true,
            (Some(a), Some(b)) => a == b,
            _ => false,
        }
    }
}

/// A line of a service, persisted as one row of `services`.
#[derive(Debug, Clone, PartialEq)]
pub struct NewService {
    pub noc_code: Option<String>,
    pub line_name: String,
    pub line_id: String,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub operator_short_name: Option<String>,
    pub inbound_direction_description: String,
    pub outbound_direction_description: String,
    pub service_description: String,
    pub service_code: Option<String>,
    pub region_code: Option<String>,
    pub data_source: DataSource,
    pub origin: Option<String>,
    pub destination: Option<String>,
    pub mode: String,
    pub file_path: Option<String>,
}

impl NewService {
    /// Dedup key: (noc, lineName, serviceCode, startDate, endDate, dataSource).
    pub fn same_line(&self, other: &NewService) -> bool {
        self.noc_code.null_safe_eq(&other.noc_code)
            && self.line_name == other.line_name
            && self.service_code.null_safe_eq(&other.service_code)
            && self.start_date.null_safe_eq(&other.start_date)
            && self.end_date.null_safe_eq(&other.end_date)
            && self.data_source == other.data_source
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewJourneyPattern {
    pub operator_service_id: RowId,
    pub destination_display: Option<String>,
    pub direction: Option<String>,
    pub route_ref: Option<String>,
    pub journey_pattern_ref: Option<String>,
    pub section_refs: String,
}

impl NewJourneyPattern {
    /// Dedup key: (line, destinationDisplay, direction, routeRef, sectionRefs).
    /// The external `journeyPatternRef` is not part of it.
    pub fn same_pattern(&self, other: &NewJourneyPattern) -> bool {
        self.operator_service_id == other.operator_service_id
            && self.destination_display.null_safe_eq(&other.destination_display)
            && self.direction.null_safe_eq(&other.direction)
            && self.route_ref.null_safe_eq(&other.route_ref)
            && self.section_refs == other.section_refs
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewJourneyPatternLink {
    pub from_atco_code: String,
    pub from_timing_status: Option<String>,
    pub from_sequence_number: Option<String>,
    pub to_atco_code: String,
    pub to_timing_status: Option<String>,
    pub to_sequence_number: Option<String>,
    pub run_time: Option<String>,
    pub route_link_ref: Option<String>,
    pub order_in_sequence: u32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewVehicleJourney {
    pub operator_service_id: RowId,
    pub vehicle_journey_code: Option<String>,
    pub service_ref: Option<String>,
    pub line_ref: Option<String>,
    pub journey_pattern_ref: String,
    pub departure_time: Option<String>,
    pub journey_code: Option<String>,
}

/// One longitude/latitude pair, kept as the text found in the source so that
/// nothing is lost to float formatting.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TrackPoint {
    pub longitude: String,
    pub latitude: String,
}

impl TrackPoint {
    pub fn new(longitude: impl Into<String>, latitude: impl Into<String>) -> Self {
        TrackPoint { longitude: longitude.into(), latitude: latitude.into() }
    }
}

/// Transactional access to the reference-data schema. One transaction spans a
/// whole document: `begin` before the first write, then exactly one of
/// `commit` or `rollback`.
pub trait ReferenceStore {
    fn begin(&mut self) -> Result<(), StoreError>;
    fn commit(&mut self) -> Result<(), StoreError>;
    fn rollback(&mut self) -> Result<(), StoreError>;

    fn find_service(&mut self, service: &NewService) -> Result<Option<RowId>, StoreError>;

    /// Fails with `StoreError::InvalidNoc` when the operator code is unknown
    /// to the `operators` table.
    fn insert_service(&mut self, service: &NewService) -> Result<RowId, StoreError>;

    fn update_centre_point(&mut self, service_id: RowId, centre: &TrackPoint) -> Result<(), StoreError>;

    fn find_journey_pattern(&mut self, pattern: &NewJourneyPattern) -> Result<Option<RowId>, StoreError>;
    fn insert_journey_pattern(&mut self, pattern: &NewJourneyPattern) -> Result<RowId, StoreError>;
    fn insert_journey_pattern_links(&mut self, journey_pattern_id: RowId, links: &[NewJourneyPatternLink]) -> Result<(), StoreError>;

    /// Administrative area codes of the localities the given stops belong to.
    fn admin_area_codes(&mut self, stop_codes: &BTreeSet<String>) -> Result<BTreeSet<String>, StoreError>;

    /// Duplicate-tolerant, codes already linked to the service are ignored.
    fn insert_admin_area_codes(&mut self, service_id: RowId, codes: &BTreeSet<String>) -> Result<(), StoreError>;

    fn insert_vehicle_journeys(&mut self, journeys: &[NewVehicleJourney]) -> Result<(), StoreError>;

    fn stop_location(&mut self, atco_code: &str) -> Result<Option<TrackPoint>, StoreError>;

    fn insert_track(&mut self, service_id: RowId, points: &[TrackPoint]) -> Result<(), StoreError>;
}
