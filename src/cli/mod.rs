/// CLI layer: argument parsing, argument scanning and output formatting.
pub mod args;
pub mod output;
pub mod scan;

pub use args::Cli;
pub use output::{OutputCtx, write_error};
pub use scan::Invocation;
