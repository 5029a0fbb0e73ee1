use std::time::Duration;

use chk_common::record::LookupResult;

use crate::terminal::colors;
use crate::terminal::format::{self, Style};

pub const TOTAL_WIDTH: usize = 64;

#[macro_export]
macro_rules! cprint {
    () => {
        $crate::terminal::print::print("");
    };
    ($msg:expr) => {
        $crate::terminal::print::print($msg);
    };
}

pub fn print(msg: &str) {
    println!("{msg}");
}

pub fn header(msg: &str, style: Style) {
    let formatted: String = format!("⟦ {} ⟧", msg.to_uppercase());
    let msg_len: usize = console::measure_text_width(&formatted);

    let dash_count: usize = TOTAL_WIDTH.saturating_sub(msg_len);
    let left: usize = dash_count / 2;
    let right: usize = dash_count - left;

    print(&format!(
        "{}{}{}",
        style.paint(&"─".repeat(left), colors::SEPARATOR),
        style.paint_bold(&formatted, colors::ACCENT),
        style.paint(&"─".repeat(right), colors::SEPARATOR)
    ));
}

/// Prints every result as its own block, each followed by a blank line.
pub fn results(results: &[LookupResult], style: Style) {
    for result in results {
        for line in format::result_lines(result, style) {
            print(&line);
        }
        cprint!();
    }
}

pub fn no_results(style: Style) {
    print(&style.paint_bold("No matching records found.", colors::ADDRESS));
}

pub fn summary(count: usize, elapsed: Duration, style: Style) {
    let unit: &str = if count == 1 { "record" } else { "records" };
    let count: String = style.paint_bold(&format!("{count} {unit}"), colors::VALUE);
    let elapsed: String = style.paint_bold(&format!("{:.2}s", elapsed.as_secs_f64()), colors::ADDRESS);
    print(&format!(
        "{} {count} checked in {elapsed}",
        style.paint(">", colors::SEPARATOR)
    ));
}

pub fn error(msg: &str, style: Style) {
    eprintln!(
        "{}: {}",
        style.paint_bold("Error", colors::ERROR),
        style.paint(msg, colors::ERROR)
    );
}
