use serde::Deserialize;

/// Colour scheme. Owned by the UI model and handed to every render call.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }

    pub fn is_dark(self) -> bool {
        self == Theme::Dark
    }

    /// Icon for the header toggle: the theme you would switch to.
    pub fn toggle_icon(self) -> Icon {
        match self {
            Theme::Light => Icon::Moon,
            Theme::Dark => Icon::Sun,
        }
    }
}

/// Every icon the shell can draw.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Icon {
    Home,
    Products,
    Examples,
    Cog,
    Help,
    Sun,
    Moon,
    Menu,
    Trash,
    ChevronUp,
    ChevronDown,
    ChevronLeft,
    ChevronRight,
    Plus,
    Download,
    Sliders,
    ExternalLink,
}

impl Icon {
    /// Single-column glyph.
    pub fn glyph(self) -> &'static str {
        match self {
            Icon::Home => "⌂",
            Icon::Products => "▤",
            Icon::Examples => "◇",
            Icon::Cog => "*",
            Icon::Help => "?",
            Icon::Sun => "☼",
            Icon::Moon => "☾",
            Icon::Menu => "≡",
            Icon::Trash => "✗",
            Icon::ChevronUp => "▲",
            Icon::ChevronDown => "▼",
            Icon::ChevronLeft => "‹",
            Icon::ChevronRight => "›",
            Icon::Plus => "+",
            Icon::Download => "↓",
            Icon::Sliders => "≈",
            Icon::ExternalLink => "↗",
        }
    }
}
