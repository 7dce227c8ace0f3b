use crate::theme::Theme;
use lipgloss::{Color, Style, rounded_border};
use once_cell::sync::Lazy;

/// Styles for one theme. Render functions take this instead of reading a
/// global, so a theme switch is just a different `&Palette`.
#[derive(Clone)]
pub struct Palette {
    pub text: Style,
    pub muted: Style,
    pub title: Style,
    pub header: Style,
    pub menu_item: Style,
    pub menu_active: Style,
    pub menu_group: Style,
    pub primary: Style,
    pub danger: Style,
    pub selected_row: Style,
    pub cursor_row: Style,
    pub tag: Style,
    pub modeline: Style,
    pub key: Style,
    pub boxed: Style,
}

type Rgb = (u8, u8, u8);

fn c((r, g, b): Rgb) -> Color {
    Color::from_rgb(r, g, b)
}

fn build(fg: Rgb, bar: Rgb, accent: Rgb, surface: Rgb, muted: Rgb) -> Palette {
    Palette {
        text: Style::new().foreground(c(fg)),
        muted: Style::new().foreground(c(muted)).faint(true),
        title: Style::new().foreground(c(fg)).bold(true),
        header: Style::new().background(c(bar)).foreground(c(fg)),
        menu_item: Style::new().foreground(c(fg)),
        menu_active: Style::new()
            .foreground(c(accent))
            .background(c(surface))
            .bold(true),
        menu_group: Style::new().background(c(surface)).foreground(c(fg)),
        primary: Style::new()
            .foreground(c((255, 255, 255)))
            .background(c(accent))
            .padding(0, 1, 0, 1),
        danger: Style::new()
            .foreground(c((255, 255, 255)))
            .background(c((200, 40, 40)))
            .padding(0, 1, 0, 1),
        selected_row: Style::new().background(c(surface)).foreground(c(fg)),
        cursor_row: Style::new().foreground(c(accent)).bold(true),
        tag: Style::new()
            .background(c(surface))
            .foreground(c(fg))
            .padding(0, 1, 0, 1),
        modeline: Style::new().background(c(bar)).foreground(c(fg)),
        key: Style::new().foreground(c(accent)).bold(true),
        boxed: Style::new().border(rounded_border()).padding(0, 1, 0, 1),
    }
}

pub static LIGHT: Lazy<Palette> = Lazy::new(|| {
    build(
        (30, 30, 30),
        (230, 230, 230),
        (0, 80, 195),
        (220, 232, 250),
        (110, 110, 110),
    )
});

pub static DARK: Lazy<Palette> = Lazy::new(|| {
    build(
        (235, 235, 235),
        (45, 45, 45),
        (110, 170, 255),
        (30, 50, 80),
        (160, 160, 160),
    )
});

pub fn palette(theme: Theme) -> &'static Palette {
    match theme {
        Theme::Light => &LIGHT,
        Theme::Dark => &DARK,
    }
}
