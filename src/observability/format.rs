//! Line format for relay log output.
//!
//! `<YYYY-MM-DD HH:MM:SS>\t<LEVEL>\t<message>`, local time. Log scrapers
//! depend on this layout, keep it stable.

use std::fmt::{self, Write as _};

use chrono::Local;
use tracing::field::{Field, Visit};
use tracing::{Event, Subscriber};
use tracing_subscriber::fmt::format::Writer;
use tracing_subscriber::fmt::{FmtContext, FormatEvent, FormatFields};
use tracing_subscriber::registry::LookupSpan;

use crate::observability::level::Severity;

pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Event field carrying the exact severity name. Namespaced so that a
/// caller's own `severity` field is printed as data, not as the level.
pub const SEVERITY_FIELD: &str = "relay.severity";

const ANSI_RESET: &str = "\x1b[0m";

/// Formats each event as a single tab-separated line.
///
/// When the writer accepts ANSI escapes the whole line is colored by
/// severity and always followed by a reset.
#[derive(Debug, Clone, Copy, Default)]
pub struct LineFormat;

impl<S, N> FormatEvent<S, N> for LineFormat
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        _ctx: &FmtContext<'_, S, N>,
        mut writer: Writer<'_>,
        event: &Event<'_>,
    ) -> fmt::Result {
        let mut visitor = LineVisitor::default();
        event.record(&mut visitor);

        let severity = visitor
            .severity
            .unwrap_or_else(|| Severity::from_tracing(event.metadata().level()));
        let ansi = writer.has_ansi_escapes();

        if ansi {
            write!(writer, "{}", severity.ansi_color())?;
        }
        write!(
            writer,
            "{}\t{}\t{}{}",
            Local::now().format(TIMESTAMP_FORMAT),
            severity,
            visitor.message,
            visitor.fields
        )?;
        if ansi {
            write!(writer, "{ANSI_RESET}")?;
        }
        writeln!(writer)
    }
}

/// Collects the message, the severity field and any extra fields.
#[derive(Default)]
struct LineVisitor {
    message: String,
    fields: String,
    severity: Option<Severity>,
}

impl Visit for LineVisitor {
    fn record_str(&mut self, field: &Field, value: &str) {
        match field.name() {
            "message" => self.message.push_str(value),
            SEVERITY_FIELD => self.severity = value.parse().ok(),
            name => {
                let _ = write!(self.fields, " {name}={value}");
            }
        }
    }

    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        match field.name() {
            "message" => {
                let _ = write!(self.message, "{value:?}");
            }
            SEVERITY_FIELD => {}
            name => {
                let _ = write!(self.fields, " {name}={value:?}");
            }
        }
    }
}
