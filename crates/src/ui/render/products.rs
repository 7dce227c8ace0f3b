use crate::catalog::{LoadState, Product, Snapshot};
use crate::i18n::{self, Namespace};
use crate::listing::{HeaderState, SortColumn, SortDirection};
use crate::theme::Icon;
use crate::ui::model::Model;
use crate::ui::render::shell::responsive;
use crate::ui::render::styles::Palette;
use crate::ui::render::util::{clip, fit_width, spread, visible_width};

const ACTIONS_WIDTH: usize = 10;
const ID_WIDTH: usize = 5;

pub fn checkbox(state: HeaderState) -> &'static str {
    match state {
        HeaderState::Checked => "[x]",
        HeaderState::Indeterminate => "[-]",
        HeaderState::Unchecked => "[ ]",
    }
}

fn row_checkbox(selected: bool) -> &'static str {
    if selected { "[x]" } else { "[ ]" }
}

fn sort_glyph(m: &Model, column: SortColumn) -> &'static str {
    if m.listing.sort.column != column {
        return " ";
    }
    match m.listing.sort.direction {
        SortDirection::Ascending => Icon::ChevronUp.glyph(),
        SortDirection::Descending => Icon::ChevronDown.glyph(),
    }
}

fn thumb(p: &Product) -> &'static str {
    if p.thumbnail().is_some() { "▣" } else { "□" }
}

fn selection_label(m: &Model, count: usize) -> String {
    let key = if count == 1 {
        "products.selected.single"
    } else {
        "products.selected.many"
    };
    format!("{count} {}", m.t(key))
}

fn bulk_bar(m: &Model, pal: &Palette, snap: &Snapshot, width: usize) -> Option<String> {
    let count = m.listing.selection().len();
    if count == 0 {
        return None;
    }
    let left = format!(
        "{} {}",
        checkbox(m.listing.header_state(snap.len())),
        selection_label(m, count)
    );
    let button = pal.danger.render(&format!("x {}", m.t("products.remove")));
    Some(spread(&pal.title.render(&left), &button, width))
}

fn style_row(m: &Model, pal: &Palette, p: &Product, index: usize, plain: String) -> String {
    if index == m.cursor {
        pal.cursor_row.render(&plain)
    } else if m.listing.is_selected(p.id) {
        pal.selected_row.render(&plain)
    } else {
        pal.text.render(&plain)
    }
}

fn action_cell(m: &Model, p: &Product) -> String {
    if m.query.is_deleting(p.id) {
        clip(&m.t("products.deleting"), ACTIONS_WIDTH)
    } else {
        format!("  {}", Icon::Trash.glyph())
    }
}

fn desktop_table(m: &Model, pal: &Palette, snap: &Snapshot, width: usize) -> Vec<String> {
    let name_width = width.saturating_sub(2 + 4 + ID_WIDTH + 2 + ACTIONS_WIDTH);
    let name_w = name_width.saturating_sub(2);
    let header = format!(
        "  {} {}{} {}{} {}",
        checkbox(m.listing.header_state(snap.len())),
        fit_width("#", ID_WIDTH - 2),
        sort_glyph(m, SortColumn::Id),
        fit_width(&m.t("products.name"), name_width.saturating_sub(1)),
        sort_glyph(m, SortColumn::Name),
        m.t("products.actions"),
    );
    let mut lines = vec![pal.title.render(&fit_width(&header, width))];
    for (i, p) in m.listing.visible_rows(snap).into_iter().enumerate() {
        let cursor = if i == m.cursor { "›" } else { " " };
        let plain = format!(
            "{} {} {} {} {} {}",
            cursor,
            row_checkbox(m.listing.is_selected(p.id)),
            fit_width(&p.id.to_string(), ID_WIDTH - 1),
            thumb(p),
            fit_width(&clip(p.name.display(), name_w), name_w),
            action_cell(m, p),
        );
        lines.push(style_row(m, pal, p, i, fit_width(&plain, width)));
    }
    lines
}

fn mobile_list(m: &Model, pal: &Palette, snap: &Snapshot, width: usize) -> Vec<String> {
    let mut lines = Vec::new();
    for (i, p) in m.listing.visible_rows(snap).into_iter().enumerate() {
        let cursor = if i == m.cursor { "›" } else { " " };
        let left = format!(
            "{} {} {} {}",
            cursor,
            row_checkbox(m.listing.is_selected(p.id)),
            thumb(p),
            p.name.display()
        );
        let right = action_cell(m, p);
        let left = clip(&left, width.saturating_sub(visible_width(&right) + 1));
        lines.push(style_row(m, pal, p, i, spread(&left, &right, width)));
    }
    lines
}

fn pagination(m: &Model, pal: &Palette, total: usize) -> String {
    let pages = m.listing.page_count(total);
    let mut parts = vec![pal.muted.render(Icon::ChevronLeft.glyph())];
    for n in 1..=pages {
        let label = n.to_string();
        parts.push(if n == m.listing.page {
            pal.key.render(&format!("[{label}]"))
        } else {
            pal.text.render(&label)
        });
    }
    parts.push(pal.muted.render(Icon::ChevronRight.glyph()));
    parts.join(" ")
}

fn footer(m: &Model, pal: &Palette, snap: &Snapshot, width: usize) -> String {
    let total = snap.len();
    let count = match m.listing.row_range(total) {
        Some((first, last)) => i18n::translate_with(
            m.settings.locale,
            "products.showing",
            Namespace::Translations,
            &[
                ("first", first.to_string()),
                ("last", last.to_string()),
                ("total", total.to_string()),
            ],
        ),
        None => String::new(),
    };
    spread(&pal.muted.render(&count), &pagination(m, pal, total), width)
}

/// Body of the products page, not yet cut to height.
pub fn render_products(m: &Model, pal: &Palette, width: usize) -> Vec<String> {
    let mut title = m.t("products.title");
    if m.query.is_fetching() && !m.query.is_loading() {
        title = format!("{title}  ({}…)", m.t("products.refreshing"));
    }
    let mut lines = vec![pal.title.render(&clip(&title, width)), String::new()];

    match m.query.state() {
        LoadState::Loading => {
            lines.push(pal.muted.render(&m.t("products.loading")));
            return lines;
        }
        LoadState::Failed(reason) => {
            lines.push(pal.danger.render(&clip(&m.t("products.error"), width.saturating_sub(2))));
            lines.push(pal.muted.render(&clip(reason, width)));
            lines.push(String::new());
            lines.push(pal.text.render(&clip(&m.t("products.retry"), width)));
            return lines;
        }
        LoadState::Ready => {}
    }

    let Some(snap) = m.query.snapshot() else {
        return lines;
    };
    if let Some(notice) = m.query.notice() {
        lines.push(pal.danger.render(&clip(notice, width.saturating_sub(2))));
    }
    if snap.is_empty() {
        lines.push(pal.text.render(&clip(&m.t("products.no-content"), width)));
        return lines;
    }
    if let Some(bar) = bulk_bar(m, pal, snap, width) {
        lines.push(bar);
    }

    let mobile = mobile_list(m, pal, snap, width);
    let desktop = desktop_table(m, pal, snap, width);
    lines.extend(responsive(m.viewport(), mobile, desktop));
    lines.push(String::new());
    lines.push(footer(m, pal, snap, width));
    lines
}
