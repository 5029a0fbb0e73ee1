//! Turns lookup results into display lines.
//!
//! Everything here is a pure function of its inputs. Whether color is used is
//! passed in through [`Style`] instead of living in global state.

use chk_common::record::LookupResult;
use colored::*;

use crate::terminal::colors;

#[derive(Debug, Clone, Copy)]
pub struct Style {
    pub colorize: bool,
}

impl Style {
    pub fn new(colorize: bool) -> Self {
        Self { colorize }
    }

    pub fn paint(self, text: &str, color: Color) -> String {
        if self.colorize {
            text.color(color).to_string()
        } else {
            text.to_string()
        }
    }

    pub fn paint_bold(self, text: &str, color: Color) -> String {
        if self.colorize {
            text.color(color).bold().to_string()
        } else {
            text.to_string()
        }
    }
}

/// Renders one result as a block of lines, without the trailing blank line.
pub fn result_lines(result: &LookupResult, style: Style) -> Vec<String> {
    let header: String = format!("{} Record", result.family().record_type());
    let mut lines: Vec<String> = vec![format!(
        "{}: {}",
        style.paint(&header, colors::LABEL),
        style.paint(&result.address.to_string(), colors::ADDRESS)
    )];

    if !result.ptr.is_empty() {
        lines.push(detail("PTR Records", &result.ptr.join(", "), style));
    }

    if let Some(info) = &result.metadata {
        lines.push(detail("City", &info.city, style));
        lines.push(detail("Region", &info.region, style));
        lines.push(detail("Country", &info.country, style));
        lines.push(detail("Location", &info.loc, style));
        lines.push(detail("Organization", &info.org, style));
    }

    if let Some(error) = &result.error {
        lines.push(format!(
            "  {}: {}",
            style.paint("Error", colors::ERROR),
            style.paint(&error.to_string(), colors::ERROR)
        ));
    }

    lines
}

fn detail(key: &str, value: &str, style: Style) -> String {
    format!(
        "  {}: {}",
        style.paint(key, colors::LABEL),
        style.paint(value, colors::VALUE)
    )
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
