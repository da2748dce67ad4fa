/// Arrival aggregation: grouping predictions by route, padding table rows,
/// and assembling the per-stop report.
pub mod errors;
pub mod group;
pub mod pad;
pub mod report;

pub use report::StopReport;
