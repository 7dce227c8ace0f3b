use crate::nav;
use crate::theme::Icon;
use crate::ui::model::{
    HEADER_LINES, MENU_WIDTH, MODELINE_LINES, Model, TABBAR_LINES, ViewportClass,
};
use crate::ui::render::menu::render_menu;
use crate::ui::render::modeline::render_modeline;
use crate::ui::render::styles::Palette;
use crate::ui::render::util::{fit_width, normalize_and_pad, spread, visible_width};

/// Pick the tree for the current viewport class. Both trees are built by the
/// caller; only one is kept.
pub fn responsive<T>(class: ViewportClass, mobile: T, desktop: T) -> T {
    match class {
        ViewportClass::Mobile => mobile,
        ViewportClass::Desktop => desktop,
    }
}

pub fn render_header(m: &Model, pal: &Palette, width: usize) -> String {
    let left = match nav::back_target(&m.routes, &m.path) {
        Some(_) => format!(" {} {}", Icon::ChevronLeft.glyph(), m.tc("header.back")),
        None => String::new(),
    };
    let right = format!(
        "{} {}  {} ",
        Icon::Help.glyph(),
        m.tc("header.help"),
        m.theme.toggle_icon().glyph()
    );
    pal.header.render(&spread(&left, &right, width))
}

/// Bottom tab bar: one cell per top-level route plus the menu tab. Labels
/// are dropped when they do not fit.
pub fn render_tabbar(m: &Model, pal: &Palette, width: usize) -> String {
    let mut tabs: Vec<(String, String, bool)> = nav::tab_routes(&m.routes)
        .into_iter()
        .map(|r| {
            let glyph = r.icon.unwrap_or(Icon::ChevronRight).glyph().to_string();
            let label = m.tc(&format!("menu.{}", r.title_key));
            let active = !m.menu_open && nav::is_active(r.slug, &m.path);
            (glyph, label, active)
        })
        .collect();
    tabs.push((
        Icon::Menu.glyph().to_string(),
        m.tc("keys.menu"),
        m.menu_open,
    ));

    let n = tabs.len();
    let cell = (width / n).max(1);
    let with_labels = tabs
        .iter()
        .all(|(g, l, _)| visible_width(g) + 1 + visible_width(l) + 2 <= cell);

    let mut out = String::new();
    for (i, (glyph, label, active)) in tabs.iter().enumerate() {
        let this_cell = if i + 1 == n {
            width.saturating_sub(cell * (n - 1))
        } else {
            cell
        };
        let text = if with_labels {
            format!("{glyph} {label}")
        } else {
            glyph.clone()
        };
        let len = visible_width(&text).min(this_cell);
        let before = (this_cell - len) / 2;
        let plain = fit_width(&format!("{}{}", " ".repeat(before), text), this_cell);
        out.push_str(&if *active {
            pal.menu_active.render(&plain)
        } else {
            pal.menu_item.render(&plain)
        });
    }
    fit_width(&out, width)
}

// page body with one column of margin on each side
fn padded_body(lines: Vec<String>, width: usize, height: usize) -> Vec<String> {
    normalize_and_pad(lines, width.saturating_sub(2), height)
        .into_iter()
        .map(|l| format!(" {l} "))
        .collect()
}

pub fn desktop_frame(m: &Model, pal: &Palette, width: usize, height: usize) -> Vec<String> {
    let body_h = height.saturating_sub(HEADER_LINES + MODELINE_LINES);
    let menu_w = MENU_WIDTH.min(width / 3);
    let content_w = width.saturating_sub(menu_w + 1);

    let menu = normalize_and_pad(render_menu(m, pal, menu_w, body_h), menu_w, body_h);
    let body = padded_body(
        crate::ui::render::render_body(m, pal, content_w.saturating_sub(2)),
        content_w,
        body_h,
    );
    let sep = pal.muted.render("│");

    let mut lines = vec![render_header(m, pal, width)];
    lines.extend(
        menu.into_iter()
            .zip(body)
            .map(|(left, right)| format!("{left}{sep}{right}")),
    );
    lines.push(render_modeline(m, pal, width));
    lines
}

pub fn mobile_frame(m: &Model, pal: &Palette, width: usize, height: usize) -> Vec<String> {
    let body_h = height.saturating_sub(TABBAR_LINES + MODELINE_LINES);
    let mut lines = if m.menu_open {
        normalize_and_pad(render_menu(m, pal, width, body_h), width, body_h)
    } else {
        padded_body(
            crate::ui::render::render_body(m, pal, width.saturating_sub(2)),
            width,
            body_h,
        )
    };
    lines.push(render_tabbar(m, pal, width));
    lines.push(render_modeline(m, pal, width));
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Settings;
    use crate::ui::render::styles::palette;
    use crate::ui::{Msg, initial_model};
    use regex::Regex;

    fn strip_ansi(s: &str) -> String {
        let re = Regex::new(r"\x1b\[[0-9;?]*[ -/]*[@-~]").unwrap();
        re.replace_all(s, "").to_string()
    }

    fn model_at(path: &str, width: usize) -> Model {
        let mut m = initial_model(Settings {
            start_route: path.into(),
            ..Settings::default()
        });
        m.update(Msg::WindowSize { width, height: 24 });
        m
    }

    #[test]
    fn responsive_keeps_exactly_one_tree() {
        assert_eq!(responsive(ViewportClass::Mobile, "m", "d"), "m");
        assert_eq!(responsive(ViewportClass::Desktop, "m", "d"), "d");
    }

    #[test]
    fn header_shows_back_only_under_a_group() {
        let child = model_at("/examples/page-template", 100);
        let line = strip_ansi(&render_header(&child, palette(child.theme), 100));
        assert!(line.starts_with(" ‹ Voltar"));
        assert!(line.ends_with("☾ "));

        let head = model_at("/examples", 100);
        let line = strip_ansi(&render_header(&head, palette(head.theme), 100));
        assert!(!line.contains("Voltar"));
        assert!(line.contains("? Ajuda para desenvolvedores"));
    }

    #[test]
    fn header_glyph_follows_theme() {
        let mut m = model_at("/", 100);
        m.toggle_theme();
        let line = strip_ansi(&render_header(&m, palette(m.theme), 100));
        assert!(line.ends_with("☼ "));
    }

    #[test]
    fn tabbar_marks_active_route_and_fits() {
        let m = model_at("/products", 60);
        let bar = strip_ansi(&render_tabbar(&m, palette(m.theme), 60));
        assert_eq!(lipgloss::width(&bar), 60);
        assert!(bar.contains("▤ Produtos"));
        assert!(bar.contains("≡ menu"));

        let narrow = strip_ansi(&render_tabbar(&m, palette(m.theme), 12));
        assert_eq!(lipgloss::width(&narrow), 12);
        assert!(!narrow.contains("Produtos"));
        assert!(narrow.contains('▤'));
    }
}
