/// Output formatting: banner, per-stop table, JSON modes.
use std::fmt::Write as _;
use std::io::Write;

use comfy_table::{Table, presets::ASCII_FULL_CONDENSED};
use serde::Serialize;
use tracing::debug;

use super::args::OutputFormat;
use crate::arrivals::StopReport;
use crate::types::{ErrorOutput, StopArrivalsOutput};

/// Title art printed at the top of a table-mode run.
const BANNER: &str = r" ____              _____ _
| __ ) _   _ ___  |_   _(_)_ __ ___   ___  ___
|  _ \| | | / __|   | | | | '_ ` _ \ / _ \/ __|
| |_) | |_| \__ \   | | | | | | | | |  __/\__ \
|____/ \__,_|___/   |_| |_|_| |_| |_|\___||___/
";

/// Marker printed before each stop's location.
const STOP_MARKER: &str = "🚏";

/// Resolve the effective output format. `--json` wins over `--output`.
///
/// There is no TTY detection: piped output is the same table a terminal sees.
#[must_use]
pub const fn resolve_format(fmt: OutputFormat, json_flag: bool) -> OutputFormat {
    if json_flag { OutputFormat::Json } else { fmt }
}

/// Output context passed to all formatters.
#[derive(Debug)]
pub struct OutputCtx {
    pub format: OutputFormat,
    /// When true, report request timings.
    pub debug: bool,
}

impl OutputCtx {
    /// Construct from CLI args.
    #[must_use]
    pub const fn new(fmt: OutputFormat, json_flag: bool, debug: bool) -> Self {
        Self {
            format: resolve_format(fmt, json_flag),
            debug,
        }
    }

    /// Start a named debug timer. Logs elapsed on drop only when `--debug` is set.
    #[must_use]
    pub fn timer(&self, label: &'static str) -> DebugTimer {
        DebugTimer::new(label, self.debug)
    }

    /// Whether output is the human-readable table.
    #[must_use]
    pub const fn is_table(&self) -> bool {
        matches!(self.format, OutputFormat::Table)
    }
}

// --- Banner ---

/// The banner text, or `None` when suppressed.
#[must_use]
pub const fn banner(show: bool) -> Option<&'static str> {
    if show { Some(BANNER) } else { None }
}

/// Print the banner, preceded by two blank lines (table mode only).
pub fn write_banner<W: Write>(out: &mut W, show: bool, ctx: &OutputCtx) {
    if !ctx.is_table() {
        return;
    }
    if let Some(art) = banner(show) {
        let _ = write!(out, "\n\n{art}");
    }
}

// --- Per-stop output ---

/// Location line: marker followed by the place description or street.
#[must_use]
pub fn location_line(location: &str) -> String {
    format!(" {STOP_MARKER} {location}")
}

/// Bordered table with a single `Route` header; overflow columns are unlabeled.
#[must_use]
pub fn arrivals_table(rows: &[Vec<String>]) -> Table {
    let mut table = Table::new();
    table.load_preset(ASCII_FULL_CONDENSED);
    table.set_header(["Route"]);
    for row in rows {
        table.add_row(row);
    }
    table
}

/// Render one stop's block as it appears in table mode.
#[must_use]
pub fn render_stop(report: &StopReport) -> String {
    let mut out = String::new();
    let _ = writeln!(out);
    let _ = writeln!(out, "{}", location_line(&report.location));
    let _ = writeln!(out);
    for notice in &report.notices {
        let _ = writeln!(out, "note: {notice}");
    }
    for skip in &report.skipped {
        let _ = writeln!(out, "warning: {skip}");
    }
    for err in &report.errors {
        let _ = writeln!(out, "error: {err}");
    }
    if let Some(arrivals) = &report.arrivals {
        if arrivals.is_empty() && report.notices.is_empty() {
            let _ = writeln!(out, "note: no upcoming arrivals");
        }
        let _ = writeln!(out, "{}", arrivals_table(&arrivals.rows()));
    }
    out
}

/// Write one stop as soon as it is done (table and ndjson modes).
///
/// Returns the JSON form for modes that print everything at the end.
pub fn write_stop<W: Write>(
    out: &mut W,
    report: &StopReport,
    ctx: &OutputCtx,
) -> Option<StopArrivalsOutput> {
    match ctx.format {
        OutputFormat::Table => {
            let _ = write!(out, "{}", render_stop(report));
            None
        }
        OutputFormat::Ndjson => {
            print_ndjson(out, &[report.to_output()]);
            None
        }
        OutputFormat::Json | OutputFormat::Compact => Some(report.to_output()),
    }
}

/// Finish the run: print collected JSON, or the trailing blank line in table mode.
pub fn write_footer<W: Write>(out: &mut W, collected: &[StopArrivalsOutput], ctx: &OutputCtx) {
    match ctx.format {
        OutputFormat::Json => print_json(out, collected),
        OutputFormat::Compact => print_compact_json(out, collected),
        OutputFormat::Ndjson => {}
        OutputFormat::Table => {
            let _ = writeln!(out);
        }
    }
}

// --- Error output ---

/// Write a structured error to stderr.
pub fn write_error(err: &ErrorOutput, format: OutputFormat, json_flag: bool) {
    let fmt = resolve_format(format, json_flag);
    let stderr = std::io::stderr();
    let mut out = stderr.lock();
    match fmt {
        OutputFormat::Json | OutputFormat::Compact | OutputFormat::Ndjson => {
            let s = serde_json::to_string_pretty(err).unwrap_or_default();
            let _ = writeln!(out, "{s}");
        }
        _ => {
            let _ = writeln!(out, "Error: {}", err.error.message);
        }
    }
}

// --- Debug timer ---

/// A RAII timer that logs elapsed milliseconds on drop.
///
/// Created via [`OutputCtx::timer`]. Does nothing when `debug` is false.
#[derive(Debug)]
pub struct DebugTimer {
    label: &'static str,
    start: std::time::Instant,
    active: bool,
}

impl DebugTimer {
    #[must_use]
    fn new(label: &'static str, active: bool) -> Self {
        Self {
            label,
            start: std::time::Instant::now(),
            active,
        }
    }
}

impl Drop for DebugTimer {
    fn drop(&mut self) {
        if self.active {
            let ms = self.start.elapsed().as_secs_f64() * 1000.0;
            debug!(label = self.label, elapsed_ms = ms, "timing");
        }
    }
}

// --- Generic JSON helpers ---

fn print_json<W: Write, T: Serialize + ?Sized>(out: &mut W, value: &T) {
    match serde_json::to_string_pretty(value) {
        Ok(s) => {
            let _ = writeln!(out, "{s}");
        }
        Err(e) => eprintln!("JSON serialization error: {e}"),
    }
}

fn print_compact_json<W: Write, T: Serialize + ?Sized>(out: &mut W, value: &T) {
    match serde_json::to_string(value) {
        Ok(s) => {
            let _ = writeln!(out, "{s}");
        }
        Err(e) => eprintln!("JSON serialization error: {e}"),
    }
}

fn print_ndjson<W: Write, T: Serialize>(out: &mut W, values: &[T]) {
    for v in values {
        match serde_json::to_string(v) {
            Ok(s) => {
                let _ = writeln!(out, "{s}");
            }
            Err(e) => eprintln!("JSON serialization error: {e}"),
        }
    }
}
