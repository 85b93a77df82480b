//! Serde model of the parts of a TransXChange document the uploader reads.
//!
//! Every element that the schema allows to repeat is a `Vec` with a default,
//! so a missing element, a single element and a list of elements all decode
//! into the same ordered (possibly empty) sequence. Code further on never has
//! to care which of the three it was.

use chrono::NaiveDate;
use serde::de::{self, Deserializer, Unexpected};
use serde::Deserialize;

#[derive(Deserialize, Debug, Default)]
pub struct TransXChange {
    #[serde(rename = "Operators")]
    pub operators: Option<Operators>,

    #[serde(rename = "Services")]
    pub services: Option<Services>,

    #[serde(rename = "JourneyPatternSections")]
    pub journey_pattern_sections: Option<JourneyPatternSections>,

    #[serde(rename = "Routes")]
    pub routes: Option<Routes>,

    #[serde(rename = "RouteSections")]
    pub route_sections: Option<RouteSections>,

    #[serde(rename = "VehicleJourneys")]
    pub vehicle_journeys: Option<VehicleJourneys>,
}

#[derive(Deserialize, Debug, Default)]
pub struct Operators {
    #[serde(rename = "Operator", default)]
    pub operators: Vec<Operator>,

    #[serde(rename = "LicensedOperator", default)]
    pub licensed_operators: Vec<Operator>,
}

#[derive(Deserialize, Debug, Default, Clone)]
pub struct Operator {
    #[serde(rename = "@id")]
    pub id: Option<String>,

    #[serde(rename = "NationalOperatorCode")]
    pub national_operator_code: Option<String>,

    #[serde(rename = "OperatorShortName")]
    pub short_name: Option<String>,
}

#[derive(Deserialize, Debug, Default)]
pub struct Services {
    #[serde(rename = "Service", default)]
    pub services: Vec<Service>,
}

#[derive(Deserialize, Debug, Default)]
pub struct Service {
    #[serde(rename = "ServiceCode")]
    pub service_code: Option<String>,

    #[serde(rename = "Lines")]
    pub lines: Option<Lines>,

    #[serde(rename = "OperatingPeriod")]
    pub operating_period: Option<OperatingPeriod>,

    #[serde(rename = "RegisteredOperatorRef")]
    pub registered_operator_ref: Option<String>,

    #[serde(rename = "Description")]
    pub description: Option<String>,

    #[serde(rename = "Mode")]
    pub mode: Option<String>,

    #[serde(rename = "StandardService")]
    pub standard_service: Option<StandardService>,
}

#[derive(Deserialize, Debug, Default)]
pub struct Lines {
    #[serde(rename = "Line", default)]
    pub lines: Vec<Line>,
}

#[derive(Deserialize, Debug, Default)]
pub struct Line {
    #[serde(rename = "@id")]
    pub id: Option<String>,

    #[serde(rename = "LineName")]
    pub line_name: Option<String>,

    #[serde(rename = "OutboundDescription")]
    pub outbound_description: Option<DirectionDescription>,

    #[serde(rename = "InboundDescription")]
    pub inbound_description: Option<DirectionDescription>,
}

#[derive(Deserialize, Debug, Default)]
pub struct DirectionDescription {
    #[serde(rename = "Description")]
    pub description: Option<String>,
}

#[derive(Deserialize, Debug, Default)]
pub struct OperatingPeriod {
    #[serde(rename = "StartDate", default, deserialize_with = "optional_date")]
    pub start_date: Option<NaiveDate>,

    #[serde(rename = "EndDate", default, deserialize_with = "optional_date")]
    pub end_date: Option<NaiveDate>,
}

#[derive(Deserialize, Debug, Default)]
pub struct StandardService {
    #[serde(rename = "Origin")]
    pub origin: Option<String>,

    #[serde(rename = "Destination")]
    pub destination: Option<String>,

    #[serde(rename = "JourneyPattern", default)]
    pub journey_patterns: Vec<JourneyPattern>,
}

#[derive(Deserialize, Debug, Default, Clone)]
pub struct JourneyPattern {
    #[serde(rename = "@id")]
    pub id: Option<String>,

    #[serde(rename = "DestinationDisplay")]
    pub destination_display: Option<String>,

    #[serde(rename = "Direction")]
    pub direction: Option<String>,

    #[serde(rename = "RouteRef")]
    pub route_ref: Option<String>,

    #[serde(rename = "JourneyPatternSectionRefs", default)]
    pub section_refs: Vec<String>,
}

#[derive(Deserialize, Debug, Default)]
pub struct JourneyPatternSections {
    #[serde(rename = "JourneyPatternSection", default)]
    pub sections: Vec<JourneyPatternSection>,
}

#[derive(Deserialize, Debug, Default)]
pub struct JourneyPatternSection {
    #[serde(rename = "@id")]
    pub id: Option<String>,

    #[serde(rename = "JourneyPatternTimingLink", default)]
    pub timing_links: Vec<JourneyPatternTimingLink>,
}

#[derive(Deserialize, Debug, Default)]
pub struct JourneyPatternTimingLink {
    #[serde(rename = "From")]
    pub from: Option<TimingLinkEnd>,

    #[serde(rename = "To")]
    pub to: Option<TimingLinkEnd>,

    #[serde(rename = "RouteLinkRef")]
    pub route_link_ref: Option<String>,

    #[serde(rename = "RunTime")]
    pub run_time: Option<String>,
}

#[derive(Deserialize, Debug, Default)]
pub struct TimingLinkEnd {
    #[serde(rename = "@SequenceNumber")]
    pub sequence_number: Option<String>,

    #[serde(rename = "StopPointRef")]
    pub stop_point_ref: Option<String>,

    #[serde(rename = "TimingStatus")]
    pub timing_status: Option<String>,
}

#[derive(Deserialize, Debug, Default)]
pub struct Routes {
    #[serde(rename = "Route", default)]
    pub routes: Vec<Route>,
}

#[derive(Deserialize, Debug, Default)]
pub struct Route {
    #[serde(rename = "@id")]
    pub id: Option<String>,

    #[serde(rename = "RouteSectionRef", default)]
    pub section_refs: Vec<String>,
}

#[derive(Deserialize, Debug, Default)]
pub struct RouteSections {
    #[serde(rename = "RouteSection", default)]
    pub sections: Vec<RouteSection>,
}

#[derive(Deserialize, Debug, Default)]
pub struct RouteSection {
    #[serde(rename = "@id")]
    pub id: Option<String>,

    #[serde(rename = "RouteLink", default)]
    pub links: Vec<RouteLink>,
}

#[derive(Deserialize, Debug, Default)]
pub struct RouteLink {
    #[serde(rename = "@id")]
    pub id: Option<String>,

    #[serde(rename = "Track", default)]
    pub tracks: Vec<Track>,
}

#[derive(Deserialize, Debug, Default)]
pub struct Track {
    #[serde(rename = "Mapping", default)]
    pub mappings: Vec<Mapping>,
}

#[derive(Deserialize, Debug, Default)]
pub struct Mapping {
    #[serde(rename = "Location", default)]
    pub locations: Vec<Location>,
}

#[derive(Deserialize, Debug, Default)]
pub struct Location {
    #[serde(rename = "@id")]
    pub id: Option<String>,

    #[serde(rename = "Longitude")]
    pub longitude: Option<String>,

    #[serde(rename = "Latitude")]
    pub latitude: Option<String>,

    #[serde(rename = "Translation")]
    pub translation: Option<Translation>,
}

#[derive(Deserialize, Debug, Default)]
pub struct Translation {
    #[serde(rename = "Longitude")]
    pub longitude: Option<String>,

    #[serde(rename = "Latitude")]
    pub latitude: Option<String>,
}

#[derive(Deserialize, Debug, Default)]
pub struct VehicleJourneys {
    #[serde(rename = "VehicleJourney", default)]
    pub vehicle_journeys: Vec<VehicleJourney>,
}

#[derive(Deserialize, Debug, Default, Clone)]
pub struct VehicleJourney {
    #[serde(rename = "Operational")]
    pub operational: Option<Operational>,

    #[serde(rename = "VehicleJourneyCode")]
    pub vehicle_journey_code: Option<String>,

    #[serde(rename = "ServiceRef")]
    pub service_ref: Option<String>,

    #[serde(rename = "LineRef")]
    pub line_ref: Option<String>,

    #[serde(rename = "JourneyPatternRef")]
    pub journey_pattern_ref: Option<String>,

    #[serde(rename = "VehicleJourneyRef")]
    pub vehicle_journey_ref: Option<String>,

    #[serde(rename = "DepartureTime")]
    pub departure_time: Option<String>,
}

#[derive(Deserialize, Debug, Default, Clone)]
pub struct Operational {
    #[serde(rename = "TicketMachine")]
    pub ticket_machine: Option<TicketMachine>,
}

#[derive(Deserialize, Debug, Default, Clone)]
pub struct TicketMachine {
    #[serde(rename = "JourneyCode")]
    pub journey_code: Option<String>,
}

/// `YYYY-MM-DD`, where an empty element counts as absent.
fn optional_date<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
where
    D: Deserializer<'de>,
{
    let date = Option::<String>::deserialize(deserializer)?;
    match date.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(date) => NaiveDate::parse_from_str(date, "%Y-%m-%d").map(Some).map_err(|_| de::Error::invalid_value(
            Unexpected::Str(date),
            &"Date in the format YEAR-MO-DA",
        )),
    }
}
