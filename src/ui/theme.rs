//! Color themes and ANSI escape helpers.
//!
//! Built-in themes are compiled in from `themes/*.toml`; custom themes use
//! the same format:
//!
//! ```toml
//! name = "my-theme"
//!
//! [colors]
//! header_fg = "#cdd6f4"
//! selection_fg = "#1e1e2e"
//! selection_bg = "#f5c2e7"
//! text_normal = "#cdd6f4"
//! text_dim = "#6c7086"
//! border = "#45475a"
//! search_bar_border = "#f5c2e7"
//! match_highlight_fg = "#1e1e2e"
//! match_highlight_bg = "#f9e2af"
//! status_fg = "#89b4fa"
//! error_fg = "#f38ba8"
//! accent_fg = "#f9e2af"
//! ```

use crate::domain::error::{MarqueeError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Color scheme used by every component of the frame.
///
/// Loaded from a built-in theme or a custom TOML file; see the module docs
/// for the format.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Theme {
    /// Human-readable theme name.
    pub name: String,
    /// Color palette for all UI elements.
    pub colors: ThemeColors,
}

/// Hex colors (`#rrggbb`) for each UI element.
///
/// `header_bg` is optional; every other color must be present for a theme
/// file to load.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ThemeColors {
    /// Header text color.
    pub header_fg: String,
    /// Optional header background color.
    #[serde(default)]
    pub header_bg: Option<String>,

    /// Highlighted row foreground.
    pub selection_fg: String,
    /// Highlighted row background.
    pub selection_bg: String,

    /// Movie titles and overview text.
    pub text_normal: String,
    /// Footer, release years, secondary text.
    pub text_dim: String,

    /// Border and separator lines.
    pub border: String,

    /// Search bar border.
    pub search_bar_border: String,
    /// Fuzzy match highlight foreground.
    pub match_highlight_fg: String,
    /// Fuzzy match highlight background.
    pub match_highlight_bg: String,

    /// Placeholder, loading and "no results" messages.
    pub status_fg: String,
    /// Failed-search message.
    pub error_fg: String,
    /// Detail pane title and labels.
    pub accent_fg: String,
}

impl Theme {
    /// Loads a built-in theme by name.
    ///
    /// Supported names: `catppuccin-mocha`, `catppuccin-latte`,
    /// `catppuccin-frappe`, `catppuccin-macchiato`.
    ///
    /// # Parameters
    ///
    /// * `name` - Built-in theme name
    ///
    /// # Returns
    ///
    /// - `Some(Theme)` if the name is recognized
    /// - `None` otherwise
    ///
    /// # Example
    ///
    /// ```rust
    /// use marquee::ui::Theme;
    ///
    /// let theme = Theme::from_name("catppuccin-latte").unwrap();
    /// assert_eq!(theme.name, "catppuccin-latte");
    /// assert!(Theme::from_name("solarized").is_none());
    /// ```
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        let toml_str = match name {
            "catppuccin-mocha" => include_str!("../../themes/catppuccin-mocha.toml"),
            "catppuccin-latte" => include_str!("../../themes/catppuccin-latte.toml"),
            "catppuccin-frappe" => include_str!("../../themes/catppuccin-frappe.toml"),
            "catppuccin-macchiato" => include_str!("../../themes/catppuccin-macchiato.toml"),
            _ => return None,
        };

        toml::from_str(toml_str).ok()
    }

    /// Loads a theme from a TOML file.
    ///
    /// # Parameters
    ///
    /// * `path` - Path to the TOML file, already tilde-expanded
    ///
    /// # Errors
    ///
    /// Returns [`MarqueeError::Theme`] if:
    /// - the file cannot be read
    /// - the TOML is invalid or a required color is missing
    ///
    /// # Example
    ///
    /// ```rust,no_run
    /// use marquee::ui::Theme;
    ///
    /// let theme = Theme::from_file("/host/.config/marquee/dracula.toml")?;
    /// println!("loaded {}", theme.name);
    /// # Ok::<(), marquee::MarqueeError>(())
    /// ```
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path)
            .map_err(|e| MarqueeError::Theme(format!("failed to read {}: {e}", path.display())))?;

        toml::from_str(&contents)
            .map_err(|e| MarqueeError::Theme(format!("failed to parse {}: {e}", path.display())))
    }

    /// Converts a hex color to an RGB tuple.
    ///
    /// The `#` prefix is optional. Malformed input renders white.
    ///
    /// # Returns
    ///
    /// An `(r, g, b)` tuple with values 0-255.
    fn hex_to_rgb(hex: &str) -> (u8, u8, u8) {
        let hex = hex.trim().trim_start_matches('#');

        if hex.len() != 6 || !hex.is_ascii() {
            return (255, 255, 255);
        }

        let channel = |range: std::ops::Range<usize>| u8::from_str_radix(&hex[range], 16).unwrap_or(255);
        (channel(0..2), channel(2..4), channel(4..6))
    }

    /// Generates an ANSI 24-bit foreground escape (`\x1b[38;2;r;g;bm`).
    ///
    /// # Parameters
    ///
    /// * `hex` - Hex color string, e.g. `"#cdd6f4"`
    ///
    /// # Example
    ///
    /// ```rust
    /// use marquee::ui::Theme;
    ///
    /// assert_eq!(Theme::fg("#ff8000"), "\u{1b}[38;2;255;128;0m");
    /// ```
    #[must_use]
    pub fn fg(hex: &str) -> String {
        let (r, g, b) = Self::hex_to_rgb(hex);
        format!("\u{001b}[38;2;{r};{g};{b}m")
    }

    /// Generates an ANSI 24-bit background escape (`\x1b[48;2;r;g;bm`).
    ///
    /// # Parameters
    ///
    /// * `hex` - Hex color string, e.g. `"#1e1e2e"`
    #[must_use]
    pub fn bg(hex: &str) -> String {
        let (r, g, b) = Self::hex_to_rgb(hex);
        format!("\u{001b}[48;2;{r};{g};{b}m")
    }

    /// ANSI bold escape.
    #[must_use]
    pub const fn bold() -> &'static str {
        "\u{001b}[1m"
    }

    #[must_use]
    pub const fn dim() -> &'static str {
        "\u{001b}[2m"
    }

    #[must_use]
    pub const fn italic() -> &'static str {
        "\u{001b}[3m"
    }

    /// ANSI reset escape; clears every color and attribute.
    #[must_use]
    pub const fn reset() -> &'static str {
        "\u{001b}[0m"
    }
}

impl Default for Theme {
    /// Catppuccin Mocha.
    ///
    /// # Panics
    ///
    /// Panics if the compiled-in theme fails to parse.
    fn default() -> Self {
        Self::from_name("catppuccin-mocha").expect("built-in catppuccin-mocha theme should always parse")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn every_builtin_theme_parses() {
        for name in ["catppuccin-mocha", "catppuccin-latte", "catppuccin-frappe", "catppuccin-macchiato"] {
            let theme = Theme::from_name(name).unwrap_or_else(|| panic!("{name} should parse"));
            assert_eq!(theme.name, name);
        }
    }

    #[test]
    fn loads_custom_theme_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        let mut theme = Theme::default();
        theme.name = "custom".to_string();
        theme.colors.error_fg = "#ff0000".to_string();
        file.write_all(toml::to_string(&theme).unwrap().as_bytes()).unwrap();

        let loaded = Theme::from_file(file.path()).unwrap();
        assert_eq!(loaded.name, "custom");
        assert_eq!(loaded.colors.error_fg, "#ff0000");
    }

    #[test]
    fn incomplete_theme_file_is_an_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"name = \"broken\"\n[colors]\nheader_fg = \"#ffffff\"\n").unwrap();
        assert!(matches!(Theme::from_file(file.path()), Err(MarqueeError::Theme(_))));
    }

    #[test]
    fn missing_theme_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(matches!(Theme::from_file(dir.path().join("nope.toml")), Err(MarqueeError::Theme(_))));
    }

    #[test]
    fn escapes_use_rgb_channels() {
        assert_eq!(Theme::fg("#1e1e2e"), "\u{1b}[38;2;30;30;46m");
        assert_eq!(Theme::bg("f5c2e7"), "\u{1b}[48;2;245;194;231m");
        assert_eq!(Theme::fg("#nope"), "\u{1b}[38;2;255;255;255m");
    }
}
