use std::io::IsTerminal;

use colored::*;
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::format::{self, Writer};
use tracing_subscriber::fmt::{FmtContext, FormatEvent};
use tracing_subscriber::registry::LookupSpan;

/// Diagnostics go to stderr; stdout carries nothing but results.
pub fn init_logging(verbose: u8) {
    let level: &str = match verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    let formatter = SweepFormatter {
        ansi: std::io::stderr().is_terminal(),
        with_target: verbose > 0,
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .event_format(formatter)
        .init();
}

/// `[-] message`, one line per event.
///
/// Colour only when stderr is a terminal, so redirected diagnostics stay
/// plain text. With `-v`, the emitting module is named after the symbol.
pub struct SweepFormatter {
    ansi: bool,
    with_target: bool,
}

impl SweepFormatter {
    fn symbol(&self, level: &Level) -> ColoredString {
        let (symbol, paint): (&str, fn(ColoredString) -> ColoredString) = match *level {
            Level::TRACE => ("[ ]", |s| s.dimmed()),
            Level::DEBUG => ("[?]", |s| s.blue()),
            Level::INFO => ("[+]", |s| s.green().bold()),
            Level::WARN => ("[*]", |s| s.yellow().bold()),
            Level::ERROR => ("[-]", |s| s.red().bold()),
        };
        if self.ansi {
            paint(symbol.into())
        } else {
            symbol.normal()
        }
    }
}

impl<S, N> FormatEvent<S, N> for SweepFormatter
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> format::FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        ctx: &FmtContext<'_, S, N>,
        mut writer: Writer<'_>,
        event: &Event<'_>,
    ) -> std::fmt::Result {
        let meta = event.metadata();
        write!(writer, "{} ", self.symbol(meta.level()))?;

        if self.with_target {
            let module: &str = meta.target().rsplit("::").next().unwrap_or(meta.target());
            write!(writer, "{module}: ")?;
        }

        ctx.field_format().format_fields(writer.by_ref(), event)?;
        writeln!(writer)
    }
}
