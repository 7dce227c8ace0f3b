use crate::nav::{self, MenuEntry, MenuLink};
use crate::theme::Icon;
use crate::ui::model::Model;
use crate::ui::render::styles::Palette;
use crate::ui::render::util::{clip, fit_width};

fn link_line(
    m: &Model,
    pal: &Palette,
    link: &MenuLink,
    index: usize,
    indent: usize,
    width: usize,
) -> String {
    let icon = match link.route.icon {
        Some(i) => format!("{} ", i.glyph()),
        None => String::new(),
    };
    let label = m.tc(&format!("menu.{}", link.route.title_key));
    let hint = if index < 9 {
        format!("{}", index + 1)
    } else {
        " ".to_string()
    };
    let plain = format!("{}{} {}{}", " ".repeat(indent), hint, icon, label);
    let plain = fit_width(&clip(&plain, width), width);
    if link.active {
        pal.menu_active.render(&plain)
    } else {
        pal.menu_item.render(&plain)
    }
}

/// Menu column: app name, route entries, settings footer. Exactly `height`
/// lines when there is room for all three.
pub fn render_menu(m: &Model, pal: &Palette, width: usize, height: usize) -> Vec<String> {
    let title = fit_width(&clip(&format!(" ▣ {}", m.settings.app_name), width), width);
    let mut lines = vec![pal.title.render(&title), String::new()];

    let entries = nav::menu_entries(&m.routes, &m.path);
    let mut index = 0usize;
    for entry in &entries {
        match entry {
            MenuEntry::Link(link) => {
                lines.push(link_line(m, pal, link, index, 0, width));
                index += 1;
            }
            MenuEntry::Group {
                head,
                expanded,
                children,
            } => {
                let marker = if *expanded { "▾" } else { "▸" };
                let head_line = link_line(m, pal, head, index, 0, width.saturating_sub(2));
                let wrapped = format!("{head_line}{marker} ");
                lines.push(if *expanded {
                    pal.menu_group.render(&wrapped)
                } else {
                    wrapped
                });
                index += 1;
                for child in children {
                    lines.push(link_line(m, pal, child, index, 3, width));
                    index += 1;
                }
            }
        }
    }

    let footer = pal.muted.render(&fit_width(
        &clip(&format!(" {} {}", Icon::Cog.glyph(), m.tc("menu.settings")), width),
        width,
    ));
    if height > lines.len() {
        while lines.len() + 1 < height {
            lines.push(String::new());
        }
        lines.push(footer);
    }
    lines
}
