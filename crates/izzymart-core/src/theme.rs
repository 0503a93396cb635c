//! # Theme Palette
//!
//! The fixed set of color themes an operator can pick from.
//!
//! ```text
//! ┌──────────┬───────────┬───────────┬───────────┐
//! │ name     │ primary   │ secondary │ accent    │
//! ├──────────┼───────────┼───────────┼───────────┤
//! │ Purple   │ #667eea   │ #764ba2   │ #f093fb   │
//! │ Blue  ◄──┼─ default  │ #2196F3   │ #82B1FF   │
//! │ Green    │ #11998e   │ #38ef7d   │ #96e6a1   │
//! │ Orange   │ #fa709a   │ #fee140   │ #ffd89b   │
//! │ Red      │ #eb3349   │ #f45c43   │ #ff6a6a   │
//! │ Teal     │ #2dd4bf   │ #14b8a6   │ #5eead4   │
//! └──────────┴───────────┴───────────┴───────────┘
//! ```
//!
//! Applying a theme means pushing three named variables into the visual
//! environment; see [`ThemeColor::variables`].

use std::borrow::Cow;

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};

/// Variable name receiving the primary color.
pub const PRIMARY_VARIABLE: &str = "--color-primary";
/// Variable name receiving the secondary color.
pub const SECONDARY_VARIABLE: &str = "--color-secondary";
/// Variable name receiving the accent color.
pub const ACCENT_VARIABLE: &str = "--color-accent";

/// A named primary/secondary/accent color triple.
///
/// Palette entries borrow static strings; themes read back from storage own
/// theirs. Equality compares content either way.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThemeColor {
    pub name: Cow<'static, str>,
    pub primary: Cow<'static, str>,
    pub secondary: Cow<'static, str>,
    pub accent: Cow<'static, str>,
}

const fn entry(
    name: &'static str,
    primary: &'static str,
    secondary: &'static str,
    accent: &'static str,
) -> ThemeColor {
    ThemeColor {
        name: Cow::Borrowed(name),
        primary: Cow::Borrowed(primary),
        secondary: Cow::Borrowed(secondary),
        accent: Cow::Borrowed(accent),
    }
}

/// The fixed palette, in display order.
pub static THEME_PALETTE: [ThemeColor; 6] = [
    entry("Purple", "#667eea", "#764ba2", "#f093fb"),
    entry("Blue", "#1976D2", "#2196F3", "#82B1FF"),
    entry("Green", "#11998e", "#38ef7d", "#96e6a1"),
    entry("Orange", "#fa709a", "#fee140", "#ffd89b"),
    entry("Red", "#eb3349", "#f45c43", "#ff6a6a"),
    entry("Teal", "#2dd4bf", "#14b8a6", "#5eead4"),
];

/// Index of the default theme in [`THEME_PALETTE`] (Blue).
pub const DEFAULT_THEME_INDEX: usize = 1;

impl ThemeColor {
    /// The theme used when nothing has been chosen yet.
    pub fn default_theme() -> Self {
        THEME_PALETTE[DEFAULT_THEME_INDEX].clone()
    }

    /// Finds a palette entry by name, ignoring case.
    pub fn by_name(name: &str) -> CoreResult<Self> {
        THEME_PALETTE
            .iter()
            .find(|t| t.name.eq_ignore_ascii_case(name.trim()))
            .cloned()
            .ok_or_else(|| CoreError::UnknownTheme {
                name: name.to_string(),
                available: THEME_PALETTE
                    .iter()
                    .map(|t| t.name.as_ref())
                    .collect::<Vec<_>>()
                    .join(", "),
            })
    }

    /// The three named variables this theme pushes into the environment.
    pub fn variables(&self) -> [(&'static str, &str); 3] {
        [
            (PRIMARY_VARIABLE, self.primary.as_ref()),
            (SECONDARY_VARIABLE, self.secondary.as_ref()),
            (ACCENT_VARIABLE, self.accent.as_ref()),
        ]
    }
}

impl Default for ThemeColor {
    fn default() -> Self {
        Self::default_theme()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_second_entry() {
        let theme = ThemeColor::default_theme();
        assert_eq!(theme, THEME_PALETTE[1]);
        assert_eq!(theme.name, "Blue");
    }

    #[test]
    fn test_by_name_is_case_insensitive() {
        assert_eq!(ThemeColor::by_name("teal").unwrap().primary, "#2dd4bf");
        assert_eq!(ThemeColor::by_name(" GREEN ").unwrap().name, "Green");
        assert!(ThemeColor::by_name("magenta").is_err());
    }

    #[test]
    fn test_json_shape_matches_persisted_format() {
        let json = serde_json::to_string(&THEME_PALETTE[0]).unwrap();
        assert_eq!(
            json,
            r##"{"name":"Purple","primary":"#667eea","secondary":"#764ba2","accent":"#f093fb"}"##
        );

        let parsed: ThemeColor = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, THEME_PALETTE[0]);
    }

    #[test]
    fn test_variables() {
        let theme = ThemeColor::default_theme();
        assert_eq!(
            theme.variables(),
            [
                ("--color-primary", "#1976D2"),
                ("--color-secondary", "#2196F3"),
                ("--color-accent", "#82B1FF"),
            ]
        );
    }
}
