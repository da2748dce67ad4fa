/// Wire types decoded from the AC Transit API and serializable output types.
///
/// Wire types tolerate missing and unknown fields: every field defaults, and
/// anything the upstream adds later is ignored by serde.
use serde::{Deserialize, Serialize};

// --- Upstream (wire) types ---

/// Body of `GET /actrealtime/prediction`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct PredictionsEnvelope {
    #[serde(rename = "bustime-response")]
    pub bustime_response: BusTimeResponse,
}

/// The BusTime response object wrapped by [`PredictionsEnvelope`].
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct BusTimeResponse {
    /// Arrival predictions, in the order the API returned them.
    pub prd: Vec<PredictionRecord>,
    /// Notices such as "No arrival times" for a stop with no service.
    pub error: Vec<BusTimeNotice>,
}

/// One arrival estimate.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
#[allow(dead_code)]
pub struct PredictionRecord {
    pub tmstmp: String,
    pub typ: String,
    pub stpnm: String,
    pub stpid: String,
    pub vid: String,
    pub dstp: i64,
    /// Route code (e.g. "51A").
    pub rt: String,
    pub rtdd: String,
    pub rtdir: String,
    /// Destination headsign.
    pub des: String,
    /// Predicted arrival, `"YYYY-MM-DD HH:MM"`.
    pub prdtm: String,
    pub tablockid: String,
    pub tatripid: String,
    /// Delayed flag.
    pub dly: bool,
    /// Minutes until arrival, or "DUE".
    pub prdctdn: String,
    pub zone: String,
    pub tripid: String,
    pub schdtm: String,
    pub seq: i64,
}

/// An entry of the BusTime `error` array.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
#[allow(dead_code)]
pub struct BusTimeNotice {
    pub stpid: String,
    pub rt: String,
    pub msg: String,
}

/// Body of `GET /stop/{id}/profile`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
#[allow(dead_code)]
pub struct StopProfile {
    pub place_description: String,
    pub street: String,
    pub stop_id: Option<i64>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

impl StopProfile {
    /// Human-readable location: place description, else street, else empty.
    #[must_use]
    pub fn location(&self) -> &str {
        if self.place_description.is_empty() {
            &self.street
        } else {
            &self.place_description
        }
    }
}

// --- Output types ---

/// One stop's arrivals as written in the JSON output modes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StopArrivalsOutput {
    /// Stop identifier exactly as given on the command line.
    pub stop_id: String,
    /// Location line (place description or street).
    pub location: String,
    /// Routes in composite-key order.
    pub routes: Vec<RouteArrivalsOutput>,
    /// Upstream notices (e.g. "No arrival times").
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub notices: Vec<String>,
    /// Records skipped because their predicted time was malformed.
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub skipped: Vec<String>,
    /// Request or decoding failures for this stop.
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub errors: Vec<String>,
}

/// Arrival times for one composite route key.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RouteArrivalsOutput {
    /// `"<route> (<destination>)"`.
    pub route: String,
    /// Time-of-day strings in the order the API returned them.
    pub arrivals: Vec<String>,
}

/// A structured error envelope for JSON error output.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorOutput {
    /// Always `false`.
    pub ok: bool,
    /// Error details.
    pub error: ErrorDetail,
}

/// Error detail in the JSON error envelope.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorDetail {
    /// Machine-readable error code (snake_case).
    pub code: String,
    /// Human-readable error message.
    pub message: String,
}

impl ErrorOutput {
    /// Construct from an `AppError`.
    #[must_use]
    pub fn from_app_error(err: &crate::errors::AppError) -> Self {
        use crate::errors::AppError;
        let code = match err {
            AppError::Configuration(_) => "configuration",
            AppError::Client(e) => e.code(),
            AppError::StopsFailed { .. } => "stops_failed",
        };
        Self {
            ok: false,
            error: ErrorDetail {
                code: code.to_owned(),
                message: err.to_string(),
            },
        }
    }
}
