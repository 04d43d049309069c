//! Leveled diagnostics for the translation layer.
//!
//! Components in this crate emit plain `tracing` events; this module owns
//! how those events reach the diagnostic stream. [`DiagFormat`] renders the
//! historical line shape (indentation by level, Unix timestamp, source
//! location, message) and [`init`] installs it on stderr gated by a numeric
//! verbosity threshold. Write failures on the diagnostic stream are
//! swallowed by the subscriber; diagnostics never fail an operation.

use std::fmt;
use std::time::{SystemTime, UNIX_EPOCH};

use tracing::{Event, Level, Subscriber};
use tracing_subscriber::fmt::format::Writer;
use tracing_subscriber::fmt::{FmtContext, FormatEvent, FormatFields};
use tracing_subscriber::registry::LookupSpan;

/// Numeric verbosity threshold, `-v` occurrence-count style.
///
/// `0` keeps only warnings and errors; each step opens one more level, and
/// `3` or more lets everything through.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord)]
pub struct Verbosity(pub u8);

impl Verbosity {
    /// The `tracing` level filter this threshold corresponds to.
    pub fn level_filter(self) -> tracing::level_filters::LevelFilter {
        use tracing::level_filters::LevelFilter;
        match self.0 {
            0 => LevelFilter::WARN,
            1 => LevelFilter::INFO,
            2 => LevelFilter::DEBUG,
            _ => LevelFilter::TRACE,
        }
    }
}

impl From<u8> for Verbosity {
    fn from(count: u8) -> Self {
        Self(count)
    }
}

/// Event format matching the layer's historical diagnostic line:
/// `<indent><unix-secs> <file>:<line> <message>`.
///
/// Indentation grows with level depth so interleaved coarse and fine
/// diagnostics stay visually grouped when reading a capture.
#[derive(Debug, Clone, Copy, Default)]
pub struct DiagFormat;

fn indent_for(level: &Level) -> usize {
    if *level == Level::ERROR {
        0
    } else if *level == Level::WARN {
        1
    } else if *level == Level::INFO {
        2
    } else if *level == Level::DEBUG {
        3
    } else {
        4
    }
}

impl<S, N> FormatEvent<S, N> for DiagFormat
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        ctx: &FmtContext<'_, S, N>,
        mut writer: Writer<'_>,
        event: &Event<'_>,
    ) -> fmt::Result {
        let meta = event.metadata();

        for _ in 0..indent_for(meta.level()) {
            writer.write_char(' ')?;
        }

        let secs = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or(0);
        write!(
            writer,
            "{secs} {}:{} ",
            meta.file().unwrap_or("<unknown>"),
            meta.line().unwrap_or(0)
        )?;

        ctx.field_format().format_fields(writer.by_ref(), event)?;
        writeln!(writer)
    }
}

/// Installs the global stderr diagnostic subscriber.
///
/// Call once at process startup; later calls are ignored (the first
/// subscriber wins, matching `tracing`'s global-default semantics).
pub fn init(verbosity: Verbosity) {
    let _ = tracing_subscriber::fmt()
        .event_format(DiagFormat)
        .with_max_level(verbosity.level_filter())
        .with_writer(std::io::stderr)
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;
    use std::sync::{Arc, Mutex};
    use tracing_subscriber::fmt::MakeWriter;

    #[derive(Clone, Default)]
    struct Capture(Arc<Mutex<Vec<u8>>>);

    impl Capture {
        fn contents(&self) -> String {
            String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
        }
    }

    impl io::Write for Capture {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    impl<'a> MakeWriter<'a> for Capture {
        type Writer = Capture;

        fn make_writer(&'a self) -> Self::Writer {
            self.clone()
        }
    }

    fn capture_at(verbosity: Verbosity, f: impl FnOnce()) -> String {
        let capture = Capture::default();
        let subscriber = tracing_subscriber::fmt()
            .event_format(DiagFormat)
            .with_max_level(verbosity.level_filter())
            .with_writer(capture.clone())
            .finish();
        tracing::subscriber::with_default(subscriber, f);
        capture.contents()
    }

    #[test]
    fn verbosity_maps_to_level_filters() {
        use tracing::level_filters::LevelFilter;
        assert_eq!(Verbosity(0).level_filter(), LevelFilter::WARN);
        assert_eq!(Verbosity(1).level_filter(), LevelFilter::INFO);
        assert_eq!(Verbosity(2).level_filter(), LevelFilter::DEBUG);
        assert_eq!(Verbosity(3).level_filter(), LevelFilter::TRACE);
        assert_eq!(Verbosity(200).level_filter(), LevelFilter::TRACE);
    }

    #[test]
    fn events_over_threshold_are_dropped() {
        let out = capture_at(Verbosity(0), || {
            tracing::info!("listing fetched");
            tracing::debug!("cache probe");
        });
        assert!(out.is_empty());
    }

    #[test]
    fn line_carries_indent_location_and_message() {
        let out = capture_at(Verbosity(3), || {
            tracing::debug!("cache probe");
        });
        // DEBUG events indent three spaces.
        assert!(out.starts_with("   "), "unexpected line: {out:?}");
        let line = out.trim_start();
        // Leading Unix timestamp.
        let ts = line.split_whitespace().next().unwrap();
        assert!(ts.chars().all(|c| c.is_ascii_digit()));
        // file:line tag, then the message.
        assert!(line.contains("diag.rs:"), "unexpected line: {out:?}");
        assert!(out.trim_end().ends_with("cache probe"));
    }

    #[test]
    fn warnings_outdent_relative_to_trace() {
        let out = capture_at(Verbosity(3), || {
            tracing::warn!("slow server");
            tracing::trace!("byte count");
        });
        let mut lines = out.lines();
        let warn = lines.next().unwrap();
        let trace = lines.next().unwrap();
        assert!(warn.starts_with(" ") && !warn.starts_with("  "));
        assert!(trace.starts_with("    "));
    }
}
