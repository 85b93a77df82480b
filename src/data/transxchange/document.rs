use std::{fs, path::Path};

use quick_xml::de::from_str;

use super::txc_types::{
    JourneyPattern, JourneyPatternSection, Line, Operator, Route, RouteSection, Service, TransXChange, VehicleJourney,
};
use crate::error::TxcError;

impl TransXChange {
    pub fn from_xml(xml: &str) -> Result<Self, quick_xml::DeError> {
        from_str(xml)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, TxcError> {
        let xml = fs::read_to_string(path)?;
        Ok(Self::from_xml(&xml)?)
    }

    /// `Operator` entries followed by `LicensedOperator` entries.
    pub fn operators(&self) -> Vec<&Operator> {
        match &self.operators {
            Some(operators) => operators.operators.iter().chain(operators.licensed_operators.iter()).collect(),
            None => vec![],
        }
    }

    pub fn services(&self) -> &[Service] {
        self.services.as_ref().map(|s| s.services.as_slice()).unwrap_or(&[])
    }

    /// Services registered to the operator, matched on the operator's `id`.
    pub fn services_for_operator(&self, operator: &Operator) -> Vec<&Service> {
        match operator.id.as_deref() {
            Some(id) => self.services().iter()
                .filter(|service| service.registered_operator_ref.as_deref() == Some(id))
                .collect(),
            None => vec![],
        }
    }

    pub fn has_journey_pattern_sections(&self) -> bool {
        !self.journey_pattern_sections().is_empty()
    }

    pub fn journey_pattern_sections(&self) -> &[JourneyPatternSection] {
        self.journey_pattern_sections.as_ref().map(|s| s.sections.as_slice()).unwrap_or(&[])
    }

    pub fn route(&self, id: &str) -> Option<&Route> {
        self.routes.as_ref()?.routes.iter().find(|route| route.id.as_deref() == Some(id))
    }

    pub fn route_sections(&self, id: &str) -> impl Iterator<Item = &RouteSection> + '_ {
        let id = id.to_string();
        self.route_sections.iter()
            .flat_map(|sections| sections.sections.iter())
            .filter(move |section| section.id.as_deref() == Some(id.as_str()))
    }

    pub fn vehicle_journeys(&self) -> &[VehicleJourney] {
        self.vehicle_journeys.as_ref().map(|v| v.vehicle_journeys.as_slice()).unwrap_or(&[])
    }

    pub fn has_vehicle_journeys_for(&self, service: &Service) -> bool {
        self.vehicle_journeys().iter()
            .any(|journey| journey.service_ref.is_some() && journey.service_ref == service.service_code)
    }
}

impl Service {
    pub fn lines(&self) -> &[Line] {
        self.lines.as_ref().map(|l| l.lines.as_slice()).unwrap_or(&[])
    }

    pub fn journey_patterns(&self) -> &[JourneyPattern] {
        self.standard_service.as_ref().map(|s| s.journey_patterns.as_slice()).unwrap_or(&[])
    }

    pub fn start_date(&self) -> Option<chrono::NaiveDate> {
        self.operating_period.as_ref().and_then(|period| period.start_date)
    }

    pub fn end_date(&self) -> Option<chrono::NaiveDate> {
        self.operating_period.as_ref().and_then(|period| period.end_date)
    }

    pub fn origin(&self) -> Option<&str> {
        self.standard_service.as_ref().and_then(|s| s.origin.as_deref())
    }

    pub fn destination(&self) -> Option<&str> {
        self.standard_service.as_ref().and_then(|s| s.destination.as_deref())
    }
}
