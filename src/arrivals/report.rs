/// Everything known about one stop after both requests have been made.
use super::errors::MalformedPrediction;
use super::group::{ArrivalsByRoute, aggregate};
use crate::transit::TransitError;
use crate::types::{PredictionsEnvelope, StopArrivalsOutput, StopProfile};

/// One stop's arrivals plus whatever went wrong fetching them.
///
/// `arrivals` is `None` when the predictions request itself failed, so an
/// empty table is never shown for data that was not received.
#[derive(Debug, Default)]
pub struct StopReport {
    /// Stop id exactly as given on the command line.
    pub stop_id: String,
    /// Place description, else street, else empty.
    pub location: String,
    /// Grouped arrivals; `None` if the predictions request failed.
    pub arrivals: Option<ArrivalsByRoute>,
    /// Upstream notices such as "No arrival times".
    pub notices: Vec<String>,
    /// Predictions left out because their time was malformed.
    pub skipped: Vec<MalformedPrediction>,
    /// Failed requests, in the order they were made.
    pub errors: Vec<TransitError>,
}

impl StopReport {
    #[must_use]
    pub fn new(stop_id: &str) -> Self {
        Self {
            stop_id: stop_id.to_owned(),
            ..Self::default()
        }
    }

    /// Fold a decoded predictions response into the report.
    pub fn add_predictions(&mut self, envelope: &PredictionsEnvelope) {
        let response = &envelope.bustime_response;
        let agg = aggregate(&response.prd);
        self.arrivals = Some(agg.arrivals);
        self.skipped = agg.skipped;
        self.notices = response
            .error
            .iter()
            .filter(|n| !n.msg.is_empty())
            .map(|n| {
                if n.rt.is_empty() {
                    n.msg.clone()
                } else {
                    format!("{} (route {})", n.msg, n.rt)
                }
            })
            .collect();
    }

    pub fn add_profile(&mut self, profile: &StopProfile) {
        profile.location().clone_into(&mut self.location);
    }

    pub fn add_error(&mut self, err: TransitError) {
        self.errors.push(err);
    }

    /// Whether any request for this stop failed.
    #[must_use]
    pub fn failed(&self) -> bool {
        !self.errors.is_empty()
    }

    /// Serializable form for the JSON output modes.
    #[must_use]
    pub fn to_output(&self) -> StopArrivalsOutput {
        StopArrivalsOutput {
            stop_id: self.stop_id.clone(),
            location: self.location.clone(),
            routes: self
                .arrivals
                .as_ref()
                .map(ArrivalsByRoute::to_output)
                .unwrap_or_default(),
            notices: self.notices.clone(),
            skipped: self.skipped.iter().map(ToString::to_string).collect(),
            errors: self.errors.iter().map(ToString::to_string).collect(),
        }
    }
}
