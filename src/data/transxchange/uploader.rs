//! Walks a parsed document operator by operator, service by service and line
//! by line, writing everything inside one transaction that is committed only
//! when every stage of the document produced something.

use log::{error, info};

use super::sections::{resolve_journey_patterns, service_has_usable_data};
use super::txc_types::TransXChange;
use super::writer::{find_or_insert_line, line_row, write_journey_patterns, write_vehicle_journeys};
use super::{ObjectKey, Pipeline};
use crate::database::{ReferenceStore, StoreError};
use crate::error::TxcError;
use crate::metrics::{Anomaly, MetricsSink};

/// Counts of what a committed document added to the store.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct UploadSummary {
    pub lines_inserted: usize,
    pub lines_existing: usize,
    pub journey_patterns: usize,
    pub journey_pattern_links: usize,
    pub admin_area_codes: usize,
    pub vehicle_journeys: usize,
    pub track_points: usize,
    pub invalid_nocs: usize,
}

#[derive(Debug, PartialEq)]
pub enum Outcome {
    Committed(UploadSummary),
    /// The document was rolled back because one of its stages found nothing.
    NothingWritten(Anomaly),
}

/// Which stages found data somewhere in the document.
#[derive(Debug, Default)]
struct StageFlags {
    nocs: bool,
    services: bool,
    vehicle_journeys: bool,
    lines: bool,
    usable_data: bool,
}

impl StageFlags {
    fn first_unmet(&self, pipeline: Pipeline) -> Option<Anomaly> {
        if !self.nocs {
            Some(Anomaly::NoNocsInFile)
        } else if !self.services {
            Some(Anomaly::NoServiceDataInFile)
        } else if pipeline == Pipeline::Extended && !self.vehicle_journeys {
            Some(Anomaly::NoVehicleJourneysDataInFile)
        } else if !self.lines {
            Some(Anomaly::NoLineDataInFile)
        } else if !self.usable_data {
            Some(Anomaly::NoUseableDataInFile)
        } else {
            None
        }
    }
}

pub fn write_to_database<S, M>(
    doc: &TransXChange,
    object_key: &ObjectKey,
    pipeline: Pipeline,
    store: &mut S,
    metrics: &mut M,
) -> Result<Outcome, TxcError>
where
    S: ReferenceStore + ?Sized,
    M: MetricsSink + ?Sized,
{
    let data_source = object_key.data_source;

    if doc.operators().is_empty() {
        info!("No operator data found in TXC file: '{}'", object_key.key);
        metrics.put_metric(data_source, Anomaly::NoOperatorData, 1);
        return Ok(Outcome::NothingWritten(Anomaly::NoOperatorData));
    }

    store.begin()?;

    let result = write_operators(doc, object_key, pipeline, store, metrics).and_then(|(flags, summary)| {
        match flags.first_unmet(pipeline) {
            Some(anomaly) => {
                store.rollback()?;
                info!("{} for TXC file: '{}'", anomaly, object_key.key);
                metrics.put_metric(data_source, anomaly, 1);
                Ok(Outcome::NothingWritten(anomaly))
            }
            None => {
                store.commit()?;
                Ok(Outcome::Committed(summary))
            }
        }
    });

    result.map_err(|err| {
        if let Err(rollback_err) = store.rollback() {
            error!("Rollback failed for TXC file '{}': {}", object_key.key, rollback_err);
        }
        error!("ERROR! Unexpected error. Could not write TXC file '{}' to database. Error: {}", object_key.key, err);
        TxcError::from(err)
    })
}

fn write_operators<S, M>(
    doc: &TransXChange,
    object_key: &ObjectKey,
    pipeline: Pipeline,
    store: &mut S,
    metrics: &mut M,
) -> Result<(StageFlags, UploadSummary), StoreError>
where
    S: ReferenceStore + ?Sized,
    M: MetricsSink + ?Sized,
{
    let key = object_key.key.as_str();
    let mut flags = StageFlags::default();
    let mut summary = UploadSummary::default();

    for operator in doc.operators() {
        let noc = match operator.national_operator_code.as_deref() {
            Some(noc) => noc,
            None => {
                info!(
                    "No NOC found for operator: '{}', in TXC file: '{}'",
                    operator.short_name.as_deref().unwrap_or_default(), key,
                );
                continue;
            }
        };
        flags.nocs = true;

        let services = doc.services_for_operator(operator);
        if services.is_empty() {
            info!("No service data found for operator: '{}', in TXC file: '{}'", noc, key);
            continue;
        }
        flags.services = true;

        'services: for service in services {
            let service_code = service.service_code.as_deref().unwrap_or_default();

            if pipeline == Pipeline::Extended {
                if !doc.has_vehicle_journeys_for(service) {
                    info!(
                        "No vehicle journey data found for service: '{}', for operator: '{}', in TXC file: '{}'",
                        service_code, noc, key,
                    );
                    continue;
                }
                flags.vehicle_journeys = true;
            }

            let lines = service.lines();
            if lines.is_empty() {
                info!(
                    "No line data found for service: '{}', for operator: '{}', in TXC file: '{}'",
                    service_code, noc, key,
                );
                continue;
            }
            flags.lines = true;

            for line in lines {
                let row = line_row(operator, noc, service, line, object_key);

                let stored = match find_or_insert_line(store, &row) {
                    Ok(stored) => stored,
                    Err(StoreError::InvalidNoc { noc }) => {
                        info!(
                            "NOC not found in database - '{}' - '{}'",
                            noc, operator.short_name.as_deref().unwrap_or_default(),
                        );
                        metrics.put_metric(object_key.data_source, Anomaly::InvalidNoc, 1);
                        summary.invalid_nocs += 1;
                        break 'services;
                    }
                    Err(err) => return Err(err),
                };

                if stored.inserted {
                    summary.lines_inserted += 1;
                } else {
                    summary.lines_existing += 1;
                }

                if !service_has_usable_data(doc, service) {
                    continue;
                }
                flags.usable_data = true;

                let patterns = resolve_journey_patterns(doc, service);
                write_journey_patterns(store, &patterns, stored.id, &mut summary)?;

                // Journeys and geometry are only written alongside a new line
                if pipeline == Pipeline::Extended && stored.inserted {
                    write_vehicle_journeys(store, doc, line, &patterns, stored.id, &mut summary)?;
                }
            }
        }
    }

    Ok((flags, summary))
}
