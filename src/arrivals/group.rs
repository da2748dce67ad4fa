/// Group predictions by composite route key.
use std::collections::BTreeMap;

use tracing::{debug, warn};

use super::errors::MalformedPrediction;
use super::pad::pad_rows;
use crate::types::{PredictionRecord, RouteArrivalsOutput};

/// Arrival times keyed by `"<route> (<destination>)"`.
///
/// Keys iterate in lexicographic order so the rendered table is stable
/// between runs. Times within a key keep the order the API returned them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ArrivalsByRoute {
    routes: BTreeMap<String, Vec<String>>,
}

impl ArrivalsByRoute {
    /// Append an arrival time under `key`, creating the entry on first use.
    pub fn push(&mut self, key: String, time: String) {
        self.routes.entry(key).or_default().push(time);
    }

    /// Arrival times recorded for `key`, if any.
    #[cfg(test)]
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&[String]> {
        self.routes.get(key).map(Vec::as_slice)
    }

    /// Number of distinct route keys.
    #[must_use]
    pub fn len(&self) -> usize {
        self.routes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    /// Iterate `(key, times)` in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.routes.iter().map(|(k, v)| (k.as_str(), v.as_slice()))
    }

    /// Table rows `[key, time, time, ..]`, padded to equal length.
    #[must_use]
    pub fn rows(&self) -> Vec<Vec<String>> {
        let rows = self
            .iter()
            .map(|(key, times)| {
                let mut row = Vec::with_capacity(times.len() + 1);
                row.push(key.to_owned());
                row.extend(times.iter().cloned());
                row
            })
            .collect();
        pad_rows(rows)
    }

    /// Serializable form for the JSON output modes.
    #[must_use]
    pub fn to_output(&self) -> Vec<RouteArrivalsOutput> {
        self.iter()
            .map(|(route, times)| RouteArrivalsOutput {
                route: route.to_owned(),
                arrivals: times.to_vec(),
            })
            .collect()
    }
}

/// Result of aggregating one stop's predictions.
#[derive(Debug, Clone, Default)]
pub struct Aggregation {
    /// Well-formed records grouped by route key.
    pub arrivals: ArrivalsByRoute,
    /// Records left out because their predicted time was malformed.
    pub skipped: Vec<MalformedPrediction>,
}

/// Composite display key for a route and destination.
#[must_use]
pub fn route_key(route: &str, destination: &str) -> String {
    format!("{route} ({destination})")
}

/// Time-of-day part of a `"YYYY-MM-DD HH:MM"` timestamp: the second
/// space-separated token.
///
/// # Errors
///
/// Returns `MalformedPrediction` when `record.prdtm` contains no space.
pub fn arrival_time(record: &PredictionRecord) -> Result<&str, MalformedPrediction> {
    record
        .prdtm
        .split(' ')
        .nth(1)
        .ok_or_else(|| MalformedPrediction {
            route: record.rt.clone(),
            destination: record.des.clone(),
            predicted_time: record.prdtm.clone(),
        })
}

/// Group predictions by [`route_key`], keeping API order within each key.
///
/// Malformed records are skipped and reported in [`Aggregation::skipped`].
#[must_use]
pub fn aggregate(records: &[PredictionRecord]) -> Aggregation {
    let mut out = Aggregation::default();
    for record in records {
        match arrival_time(record) {
            Ok(time) => out
                .arrivals
                .push(route_key(&record.rt, &record.des), time.to_owned()),
            Err(skip) => {
                warn!(%skip, "skipping prediction");
                out.skipped.push(skip);
            }
        }
    }
    debug!(
        records = records.len(),
        routes = out.arrivals.len(),
        skipped = out.skipped.len(),
        "aggregated predictions"
    );
    out
}
