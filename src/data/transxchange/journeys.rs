use std::collections::{BTreeMap, HashSet};

use log::{debug, info};

use super::txc_types::{Line, TransXChange, VehicleJourney};
use crate::database::store::{NewVehicleJourney, RowId};

/// Vehicle journeys running on the line, matched on the line's `id`.
pub fn vehicle_journeys_for_line<'a>(doc: &'a TransXChange, line: &Line) -> Vec<&'a VehicleJourney> {
    match line.id.as_deref() {
        Some(id) => doc.vehicle_journeys().iter()
            .filter(|journey| journey.line_ref.as_deref() == Some(id))
            .collect(),
        None => vec![],
    }
}

/// The journey pattern a vehicle journey runs, either given directly or taken
/// from the journey it refers to through `VehicleJourneyRef`. `None` when the
/// chain ends without a pattern, points at an unknown journey, or loops.
pub fn resolve_journey_pattern_ref<'a>(doc: &'a TransXChange, journey: &'a VehicleJourney) -> Option<&'a str> {
    let mut visited = HashSet::new();
    let mut current = journey;

    loop {
        if let Some(pattern_ref) = current.journey_pattern_ref.as_deref() {
            return Some(pattern_ref);
        }

        let next_code = current.vehicle_journey_ref.as_deref()?;
        if !visited.insert(next_code) {
            return None;
        }

        current = doc.vehicle_journeys().iter()
            .find(|candidate| candidate.vehicle_journey_code.as_deref() == Some(next_code))?;
    }
}

/// Picks the journey pattern whose geometry represents the line. Only journeys
/// that name their pattern directly take part, and the greatest pattern
/// reference among them wins regardless of how often each one occurs.
pub fn elect_journey_pattern(journeys: &[&VehicleJourney]) -> Option<String> {
    let mut tally: BTreeMap<&str, usize> = BTreeMap::new();
    for pattern_ref in journeys.iter().filter_map(|journey| journey.journey_pattern_ref.as_deref()) {
        *tally.entry(pattern_ref).or_insert(0) += 1;
    }

    debug!("Journey pattern tally: {:?}", tally);

    tally.keys().next_back().map(|pattern_ref| pattern_ref.to_string())
}

pub fn vehicle_journey_rows(doc: &TransXChange, journeys: &[&VehicleJourney], operator_service_id: RowId) -> Vec<NewVehicleJourney> {
    journeys.iter().filter_map(|journey| {
        let journey_pattern_ref = match resolve_journey_pattern_ref(doc, journey) {
            Some(pattern_ref) => pattern_ref.to_string(),
            None => {
                info!("No journey pattern found for vehicle journey {:?}, skipping", journey.vehicle_journey_code);
                return None;
            }
        };

        Some(NewVehicleJourney {
            operator_service_id,
            vehicle_journey_code: journey.vehicle_journey_code.clone(),
            service_ref: journey.service_ref.clone(),
            line_ref: journey.line_ref.clone(),
            journey_pattern_ref,
            departure_time: journey.departure_time.clone(),
            journey_code: journey.operational.as_ref()
                .and_then(|operational| operational.ticket_machine.as_ref())
                .and_then(|ticket_machine| ticket_machine.journey_code.clone()),
        })
    }).collect()
}
