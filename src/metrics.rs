use std::fmt;

use log::info;

use crate::database::types::DataSource;

/// Anomalies counted while processing a document. None of these are errors,
/// they describe input that could not (fully) be used.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Anomaly {
    InvalidNoc,
    NoOperatorData,
    NoNocsInFile,
    NoServiceDataInFile,
    NoLineDataInFile,
    NoVehicleJourneysDataInFile,
    NoUseableDataInFile,
}

impl Anomaly {
    pub fn metric_name(&self) -> &'static str {
        match self {
            Anomaly::InvalidNoc => "InvalidNoc",
            Anomaly::NoOperatorData => "NoOperatorData",
            Anomaly::NoNocsInFile => "NoNOCsInFile",
            Anomaly::NoServiceDataInFile => "NoServiceDataInFile",
            Anomaly::NoLineDataInFile => "NoLineDataInFile",
            Anomaly::NoVehicleJourneysDataInFile => "NoVehicleJourneysDataInFile",
            Anomaly::NoUseableDataInFile => "NoUseableDataInFile",
        }
    }
}

impl fmt::Display for Anomaly {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.metric_name())
    }
}

pub trait MetricsSink {
    fn put_metric(&mut self, data_source: DataSource, anomaly: Anomaly, value: u64);
}

/// Emits every counter as a structured log record, the transport picks them
/// up from there.
pub struct LogMetrics {
    namespace: String,
}

impl LogMetrics {
    pub fn new(namespace: impl Into<String>) -> Self {
        LogMetrics { namespace: namespace.into() }
    }
}

impl MetricsSink for LogMetrics {
    fn put_metric(&mut self, data_source: DataSource, anomaly: Anomaly, value: u64) {
        info!(
            target: "metrics",
            "namespace={} metric={} by_data_source={} value={} unit=None",
            self.namespace, anomaly, data_source, value
        );
    }
}

#[cfg(test)]
#[derive(Debug, Default)]
pub struct RecordingMetrics {
    pub records: Vec<(DataSource, Anomaly, u64)>,
}

#[cfg(test)]
impl RecordingMetrics {
    pub fn count(&self, data_source: DataSource, anomaly: Anomaly) -> u64 {
        self.records.iter()
            .filter(|(source, a, _)| *source == data_source && *a == anomaly)
            .map(|(_, _, value)| value)
            .sum()
    }
}

#[cfg(test)]
impl MetricsSink for RecordingMetrics {
    fn put_metric(&mut self, data_source: DataSource, anomaly: Anomaly, value: u64) {
        self.records.push((data_source, anomaly, value));
    }
}
