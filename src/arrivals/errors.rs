/// Record-level problems found while aggregating predictions.
use thiserror::Error;

/// A prediction whose `prdtm` has no space separating date and time of day.
///
/// The record is skipped; the rest of the stop still aggregates.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("skipped {route} ({destination}): malformed predicted time '{predicted_time}'")]
pub struct MalformedPrediction {
    /// Route code of the skipped record.
    pub route: String,
    /// Destination of the skipped record.
    pub destination: String,
    /// The raw `prdtm` value.
    pub predicted_time: String,
}
