//! # Terminal Output
//!
//! The register's visual environment: theme variables become ANSI
//! truecolor escapes used when rendering command output.

use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};

use izzymart_core::theme::{ACCENT_VARIABLE, PRIMARY_VARIABLE, SECONDARY_VARIABLE};
use izzymart_store::VisualEnvironment;

const RESET: &str = "\x1b[0m";

/// Which theme color a piece of text is painted with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Primary,
    Secondary,
    Accent,
}

impl Tone {
    fn variable(self) -> &'static str {
        match self {
            Tone::Primary => PRIMARY_VARIABLE,
            Tone::Secondary => SECONDARY_VARIABLE,
            Tone::Accent => ACCENT_VARIABLE,
        }
    }
}

#[derive(Debug, Default)]
pub struct TerminalEnvironment {
    /// Variable name to ready-made escape sequence.
    escapes: RwLock<HashMap<String, String>>,
    color: bool,
}

impl TerminalEnvironment {
    pub fn new(color: bool) -> Self {
        TerminalEnvironment {
            escapes: RwLock::default(),
            color,
        }
    }

    /// Color unless `NO_COLOR` is set.
    pub fn from_env() -> Self {
        Self::new(std::env::var_os("NO_COLOR").is_none())
    }

    /// Wraps `text` in the escape for `tone`, if one has been set.
    pub fn paint(&self, tone: Tone, text: &str) -> String {
        if !self.color {
            return text.to_string();
        }

        let escapes = self.escapes.read().unwrap_or_else(PoisonError::into_inner);
        match escapes.get(tone.variable()) {
            Some(escape) => format!("{}{}{}", escape, text, RESET),
            None => text.to_string(),
        }
    }
}

impl VisualEnvironment for TerminalEnvironment {
    fn set_property(&self, name: &str, value: &str) {
        let mut escapes = self.escapes.write().unwrap_or_else(PoisonError::into_inner);
        match hex_to_rgb(value) {
            Some((r, g, b)) => {
                escapes.insert(name.to_string(), format!("\x1b[38;2;{};{};{}m", r, g, b));
            }
            None => {
                escapes.remove(name);
            }
        }
    }
}

/// Parses `#rrggbb`.
fn hex_to_rgb(value: &str) -> Option<(u8, u8, u8)> {
    let hex = value.trim().strip_prefix('#')?;
    if hex.len() != 6 || !hex.is_ascii() {
        return None;
    }
    let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
    Some((channel(0)?, channel(2)?, channel(4)?))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hex_to_rgb() {
        assert_eq!(hex_to_rgb("#1976D2"), Some((0x19, 0x76, 0xd2)));
        assert_eq!(hex_to_rgb("1976D2"), None);
        assert_eq!(hex_to_rgb("#fff"), None);
        assert_eq!(hex_to_rgb("#zzzzzz"), None);
    }

    #[test]
    fn test_paint_uses_theme_variable() {
        let term = TerminalEnvironment::new(true);
        assert_eq!(term.paint(Tone::Accent, "hi"), "hi");

        term.set_property(ACCENT_VARIABLE, "#ff0000");
        assert_eq!(term.paint(Tone::Accent, "hi"), "\x1b[38;2;255;0;0mhi\x1b[0m");
        assert_eq!(term.paint(Tone::Primary, "hi"), "hi");
    }

    #[test]
    fn test_no_color_leaves_text_plain() {
        let term = TerminalEnvironment::new(false);
        term.set_property(PRIMARY_VARIABLE, "#667eea");
        assert_eq!(term.paint(Tone::Primary, "total"), "total");
    }
}
