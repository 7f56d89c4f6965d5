//! Font registration
//!
//! The plotting backend carries no fonts of its own. A TrueType file is
//! registered under `FONT_FAMILY` before drawing. With `plot.font` unset the
//! usual system locations are searched; `none` turns text off.

use super::RenderError;
use plotters::style::{register_font, FontStyle};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

/// Family name every text element is drawn with
pub const FONT_FAMILY: &str = "sans-serif";

/// Searched in order when no font is configured
pub const SYSTEM_FONT_CANDIDATES: &[&str] = &[
    "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/TTF/DejaVuSans.ttf",
    "/usr/share/fonts/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/dejavu-sans-fonts/DejaVuSans.ttf",
    "/usr/share/fonts/truetype/liberation/LiberationSans-Regular.ttf",
    "/usr/share/fonts/liberation-sans/LiberationSans-Regular.ttf",
    "/System/Library/Fonts/Supplemental/Arial.ttf",
    "/Library/Fonts/Arial.ttf",
    "C:\\Windows\\Fonts\\arial.ttf",
];

/// Path of the font currently registered under `FONT_FAMILY`
static REGISTERED: Mutex<Option<PathBuf>> = Mutex::new(None);

/// Where figure text gets its font from
#[derive(Debug, Clone, PartialEq, Default)]
pub enum FontSource {
    /// First readable entry of `SYSTEM_FONT_CANDIDATES`
    #[default]
    System,
    File(PathBuf),
    /// Figures without text
    Disabled,
}

impl FontSource {
    /// Parse the `plot.font` property ("" = system, "none" = disabled)
    pub fn parse(value: &str) -> Self {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            FontSource::System
        } else if trimmed.eq_ignore_ascii_case("none") {
            FontSource::Disabled
        } else {
            FontSource::File(PathBuf::from(trimmed))
        }
    }
}

/// First system font that exists on this machine
pub fn find_system_font() -> Option<PathBuf> {
    SYSTEM_FONT_CANDIDATES
        .iter()
        .map(PathBuf::from)
        .find(|p| p.is_file())
}

/// Register `path` as the text font
///
/// Registering the same file twice is a no-op; a different file replaces
/// the previous one.
pub fn register_font_file(path: &Path) -> Result<(), RenderError> {
    if let Ok(guard) = REGISTERED.lock() {
        if guard.as_deref() == Some(path) {
            return Ok(());
        }
    }

    let bytes = std::fs::read(path).map_err(|e| RenderError::Font {
        path: path.display().to_string(),
        reason: e.to_string(),
    })?;
    // The backend keeps a 'static reference for the process lifetime
    let bytes: &'static [u8] = Box::leak(bytes.into_boxed_slice());
    register_font(FONT_FAMILY, FontStyle::Normal, bytes).map_err(|_| RenderError::Font {
        path: path.display().to_string(),
        reason: "not a valid TrueType/OpenType font".to_string(),
    })?;

    if let Ok(mut guard) = REGISTERED.lock() {
        *guard = Some(path.to_path_buf());
    }
    log::info!("Registered font {}", path.display());
    Ok(())
}

/// Try to enable text; returns whether labels can be drawn
pub fn enable_text(source: &FontSource) -> bool {
    let path = match source {
        FontSource::Disabled => {
            log::info!("plot.font is 'none', figures are rendered without text");
            return false;
        }
        FontSource::File(path) => path.clone(),
        FontSource::System => match find_system_font() {
            Some(path) => path,
            None => {
                log::warn!("No system font found and plot.font unset; rendering without text");
                return false;
            }
        },
    };

    match register_font_file(&path) {
        Ok(()) => true,
        Err(e) => {
            log::warn!("{}; rendering without text", e);
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_font_source_parse() {
        assert_eq!(FontSource::parse(""), FontSource::System);
        assert_eq!(FontSource::parse(" None "), FontSource::Disabled);
        assert_eq!(
            FontSource::parse("fonts/a.ttf"),
            FontSource::File(PathBuf::from("fonts/a.ttf"))
        );
    }

    #[test]
    fn test_disabled_or_missing_font_disables_text() {
        assert!(!enable_text(&FontSource::Disabled));
        assert!(!enable_text(&FontSource::File(PathBuf::from(
            "/nonexistent/font.ttf"
        ))));
    }

    #[test]
    fn test_invalid_font_bytes() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bogus.ttf");
        std::fs::write(&path, b"definitely not a font").unwrap();
        let err = register_font_file(&path).unwrap_err();
        assert!(matches!(err, RenderError::Font { .. }));
    }

    #[test]
    fn test_register_system_font() {
        let Some(path) = find_system_font() else {
            eprintln!("no system TrueType font installed, skipping");
            return;
        };
        register_font_file(&path).unwrap();
        // Second registration of the same file is accepted
        register_font_file(&path).unwrap();
        assert!(enable_text(&FontSource::File(path)));
        assert!(enable_text(&FontSource::System));
    }
}
