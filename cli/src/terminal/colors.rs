use colored::Color;

pub const LABEL: Color = Color::Cyan;
pub const ADDRESS: Color = Color::Yellow;
pub const VALUE: Color = Color::Green;
pub const ERROR: Color = Color::Red;
pub const ACCENT: Color = Color::Magenta;
pub const SEPARATOR: Color = Color::BrightBlack;
