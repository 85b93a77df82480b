use std::collections::BTreeSet;

use itertools::Itertools;

use super::txc_types::{JourneyPattern, JourneyPatternSection, JourneyPatternTimingLink, Service, TransXChange};
use crate::database::store::NewJourneyPatternLink;

/// One stop-to-stop hop of a journey pattern section.
#[derive(Debug, Clone, PartialEq)]
pub struct TimingLink {
    pub from_atco_code: String,
    pub from_timing_status: Option<String>,
    pub from_sequence_number: Option<String>,
    pub to_atco_code: String,
    pub to_timing_status: Option<String>,
    pub to_sequence_number: Option<String>,
    pub run_time: Option<String>,
    pub route_link_ref: Option<String>,
}

impl TimingLink {
    /// `None` for links that lack a stop on either end.
    fn from_txc(link: &JourneyPatternTimingLink) -> Option<Self> {
        let from = link.from.as_ref()?;
        let to = link.to.as_ref()?;

        Some(TimingLink {
            from_atco_code: from.stop_point_ref.clone()?,
            from_timing_status: from.timing_status.clone(),
            from_sequence_number: from.sequence_number.clone(),
            to_atco_code: to.stop_point_ref.clone()?,
            to_timing_status: to.timing_status.clone(),
            to_sequence_number: to.sequence_number.clone(),
            run_time: link.run_time.clone(),
            route_link_ref: link.route_link_ref.clone(),
        })
    }
}

/// Dedup key of a journey pattern: its section references sorted and
/// concatenated, so patterns built from the same set of sections collide.
pub fn section_key(section_refs: &[String]) -> String {
    section_refs.iter().sorted().join("")
}

/// Timing links of every section in the pool matching one of the references,
/// one entry per matched section, in reference order. References to sections
/// that are not in the pool contribute nothing.
pub fn resolve_sections(section_refs: &[String], pool: &[JourneyPatternSection]) -> Vec<Vec<TimingLink>> {
    section_refs.iter()
        .flat_map(|section_ref| pool.iter().filter(move |section| section.id.as_deref() == Some(section_ref.as_str())))
        .map(|section| section.timing_links.iter().filter_map(TimingLink::from_txc).collect())
        .collect()
}

/// A journey pattern with its sections expanded into timing links.
#[derive(Debug)]
pub struct ResolvedJourneyPattern<'a> {
    pub pattern: &'a JourneyPattern,
    pub sections: Vec<Vec<TimingLink>>,
    pub section_key: String,
}

impl<'a> ResolvedJourneyPattern<'a> {
    pub fn resolve(pattern: &'a JourneyPattern, pool: &[JourneyPatternSection]) -> Self {
        ResolvedJourneyPattern {
            pattern,
            sections: resolve_sections(&pattern.section_refs, pool),
            section_key: section_key(&pattern.section_refs),
        }
    }

    pub fn journey_pattern_ref(&self) -> Option<&'a str> {
        self.pattern.id.as_deref()
    }

    pub fn links(&self) -> impl Iterator<Item = &TimingLink> {
        self.sections.iter().flatten()
    }

    pub fn link_rows(&self) -> Vec<NewJourneyPatternLink> {
        self.links().enumerate().map(|(order, link)| NewJourneyPatternLink {
            from_atco_code: link.from_atco_code.clone(),
            from_timing_status: link.from_timing_status.clone(),
            from_sequence_number: link.from_sequence_number.clone(),
            to_atco_code: link.to_atco_code.clone(),
            to_timing_status: link.to_timing_status.clone(),
            to_sequence_number: link.to_sequence_number.clone(),
            run_time: link.run_time.clone(),
            route_link_ref: link.route_link_ref.clone(),
            order_in_sequence: order as u32,
        }).collect()
    }

    pub fn stop_codes(&self) -> BTreeSet<String> {
        self.links()
            .flat_map(|link| vec![link.from_atco_code.clone(), link.to_atco_code.clone()])
            .collect()
    }

    /// From-stop of the link in the middle of the pattern.
    pub fn centre_stop(&self) -> Option<&str> {
        let links: Vec<&TimingLink> = self.links().collect();
        links.get(links.len() / 2).map(|link| link.from_atco_code.as_str())
    }

    pub fn route_link_refs(&self) -> Vec<&str> {
        self.links().filter_map(|link| link.route_link_ref.as_deref()).collect()
    }

    fn has_empty_section(&self) -> bool {
        self.sections.iter().any(|links| links.is_empty())
    }
}

pub fn resolve_journey_patterns<'a>(doc: &'a TransXChange, service: &'a Service) -> Vec<ResolvedJourneyPattern<'a>> {
    let pool = doc.journey_pattern_sections();
    service.journey_patterns().iter().map(|pattern| ResolvedJourneyPattern::resolve(pattern, pool)).collect()
}

/// Whether a service has anything worth writing: journey patterns, a section
/// pool, and no referenced section that resolves to zero links.
pub fn service_has_usable_data(doc: &TransXChange, service: &Service) -> bool {
    !service.journey_patterns().is_empty()
        && doc.has_journey_pattern_sections()
        && resolve_journey_patterns(doc, service).iter().all(|pattern| !pattern.has_empty_section())
}
