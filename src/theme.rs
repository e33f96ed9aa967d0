use ratatui::style::Color;

/// Theme data structure containing all colors used in the application
#[derive(Debug, Clone)]
pub struct Theme {
    // Panel borders
    pub active_border: Color,
    pub inactive_border: Color,

    // Title and search box
    pub title: Color,
    pub input_text: Color,
    pub input_placeholder: Color,
    pub button_enabled: Color,
    pub button_disabled: Color,

    // Error banner
    pub error_fg: Color,
    pub error_border: Color,

    // Results table
    pub header_fg: Color,
    pub row_selected_bg: Color,
    pub row_expanded_bg: Color,
    pub remote_yes: Color,
    pub remote_other: Color,
    pub sort_indicator: Color,

    // Detail panel
    pub detail_heading: Color,
    pub detail_label: Color,
    pub detail_value: Color,
    pub link: Color,

    // Status bar
    pub status_bar_bg: Color,
    pub status_bar_fg: Color,
    pub status_help_text: Color,

    // General UI
    pub text_muted: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            // Panel borders
            active_border: Color::Yellow,
            inactive_border: Color::DarkGray,

            // Title and search box
            title: Color::LightBlue,
            input_text: Color::Reset,
            input_placeholder: Color::DarkGray,
            button_enabled: Color::LightBlue,
            button_disabled: Color::DarkGray,

            // Error banner
            error_fg: Color::LightRed,
            error_border: Color::Red,

            // Results table
            header_fg: Color::Gray,
            row_selected_bg: Color::DarkGray,
            row_expanded_bg: Color::Blue,
            remote_yes: Color::Green,
            remote_other: Color::Red,
            sort_indicator: Color::Yellow,

            // Detail panel
            detail_heading: Color::LightBlue,
            detail_label: Color::Gray,
            detail_value: Color::Reset,
            link: Color::Cyan,

            // Status bar
            status_bar_bg: Color::DarkGray,
            status_bar_fg: Color::White,
            status_help_text: Color::Gray,

            // General UI
            text_muted: Color::Gray,
        }
    }
}

/// Get the current theme
pub fn get_theme() -> Theme {
    Theme::default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_theme_returns_valid_theme() {
        let theme = get_theme();

        assert_eq!(theme.active_border, Color::Yellow);
        assert_eq!(theme.remote_yes, Color::Green);
        assert_eq!(theme.status_bar_bg, Color::DarkGray);
    }

    #[test]
    fn test_remote_colors_differ() {
        let theme = Theme::default();
        assert_ne!(theme.remote_yes, theme.remote_other);
    }
}
