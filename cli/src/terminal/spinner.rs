use std::io::{self, Write};
use std::sync::OnceLock;
use std::time::Duration;

use chk_core::progress::{ProgressSink, RunState};
use indicatif::{ProgressBar, ProgressStyle};

use crate::terminal::colors;
use crate::terminal::format::Style;

const TICK_INTERVAL: Duration = Duration::from_millis(100);

static SPINNER: OnceLock<ProgressBar> = OnceLock::new();

/// The one progress line of the process. Log output is written around it.
pub fn shared_bar() -> &'static ProgressBar {
    SPINNER.get_or_init(ProgressBar::new_spinner)
}

/// Progress line on stderr. Hidden automatically when stderr isn't a terminal.
pub struct SpinnerSink {
    bar: ProgressBar,
    style: Style,
}

impl SpinnerSink {
    pub fn new(style: Style) -> Self {
        let template: &str = if style.colorize {
            "{spinner:.blue} {msg}"
        } else {
            "{spinner} {msg}"
        };
        let spinner_style = ProgressStyle::with_template(template)
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
            .tick_strings(&[
                "▁▁▁▁▁",
                "▁▂▂▂▁",
                "▁▄▂▄▁",
                "▂▄▆▄▂",
                "▄▆█▆▄",
                "▂▄▆▄▂",
                "▁▄▂▄▁",
                "▁▂▂▂▁",
            ]);

        let bar = shared_bar().clone();
        bar.set_style(spinner_style);
        bar.set_message(style.paint("Checking records... Please wait", colors::ADDRESS));
        bar.enable_steady_tick(TICK_INTERVAL);

        Self { bar, style }
    }
}

impl ProgressSink for SpinnerSink {
    fn render(&self, state: RunState) {
        let counter = format!("{}/{}", state.completed, state.total);
        self.bar.set_message(format!(
            "{} {} completed",
            self.style.paint("Checking records...", colors::ADDRESS),
            self.style.paint_bold(&counter, colors::VALUE)
        ));
    }

    fn clear(&self) {
        self.bar.finish_and_clear();
    }
}

impl Drop for SpinnerSink {
    fn drop(&mut self) {
        if !self.bar.is_finished() {
            self.bar.finish_and_clear();
        }
    }
}

/// Writes through `out` with the progress line hidden, then redraws it.
pub struct SpinnerWriter<W> {
    bar: ProgressBar,
    out: W,
}

impl<W: Write> SpinnerWriter<W> {
    pub fn new(bar: ProgressBar, out: W) -> Self {
        Self { bar, out }
    }
}

impl<W: Write> Write for SpinnerWriter<W> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let out = &mut self.out;
        self.bar.suspend(|| out.write_all(buf))?;
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        self.out.flush()
    }
}
