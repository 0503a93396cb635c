//! # Settings Commands
//!
//! Store name, theme and camera scanning. Each change is persisted and the
//! theme is pushed to the terminal by the preference store's hooks.

use izzymart_core::ThemeColor;

use crate::error::AppResult;
use crate::state::Register;
use crate::terminal::{TerminalEnvironment, Tone};

#[derive(Debug, Clone)]
pub struct PreferencesResponse {
    pub store_name: String,
    pub theme: ThemeColor,
    pub camera_scanning: bool,
    pub palette: Vec<String>,
}

impl PreferencesResponse {
    pub fn render(&self, term: &TerminalEnvironment) -> String {
        let palette = self
            .palette
            .iter()
            .map(|name| {
                if *name == self.theme.name {
                    term.paint(Tone::Accent, &format!("[{}]", name))
                } else {
                    name.clone()
                }
            })
            .collect::<Vec<_>>()
            .join(" ");

        format!(
            "  store name: {}\n  theme:      {}\n  camera:     {}",
            self.store_name,
            palette,
            if self.camera_scanning { "on" } else { "off" },
        )
    }
}

pub fn get_preferences(register: &Register) -> PreferencesResponse {
    let prefs = &register.preferences;
    let snapshot = prefs.snapshot();
    PreferencesResponse {
        store_name: snapshot.store_name,
        theme: snapshot.theme,
        camera_scanning: snapshot.camera_scanning,
        palette: prefs
            .theme_palette()
            .iter()
            .map(|t| t.name.to_string())
            .collect(),
    }
}

pub fn set_store_name(register: &Register, name: &str) -> AppResult<()> {
    register.preferences.set_store_name(name.trim())?;
    Ok(())
}

/// Switches to the palette entry with this name (any case).
pub fn set_theme(register: &Register, name: &str) -> AppResult<ThemeColor> {
    Ok(register.preferences.set_theme_by_name(name)?)
}

pub fn set_camera_scanning(register: &Register, enabled: bool) -> AppResult<()> {
    register.preferences.set_camera_scanning(enabled)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::test_register;
    use crate::error::ErrorCode;

    #[test]
    fn test_changes_show_up_in_preferences() {
        let register = test_register();

        set_store_name(&register, "  Corner Shop ").unwrap();
        let theme = set_theme(&register, "teal").unwrap();
        set_camera_scanning(&register, true).unwrap();

        let prefs = get_preferences(&register);
        assert_eq!(prefs.store_name, "Corner Shop");
        assert_eq!(theme.name, "Teal");
        assert_eq!(prefs.theme, theme);
        assert!(prefs.camera_scanning);
        assert_eq!(prefs.palette.len(), 6);
    }

    #[test]
    fn test_unknown_theme_keeps_current() {
        let register = test_register();

        let err = set_theme(&register, "magenta").unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);
        assert_eq!(get_preferences(&register).theme.name, "Blue");
    }

    #[test]
    fn test_render_marks_current_theme() {
        let register = test_register();
        let text = get_preferences(&register).render(&TerminalEnvironment::new(false));

        assert!(text.contains("store name: IzzyMart"));
        assert!(text.contains("Purple [Blue] Green"));
        assert!(text.contains("camera:     off"));
    }
}
