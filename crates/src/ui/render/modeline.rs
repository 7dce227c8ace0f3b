use crate::ui::model::{Model, PageKind, ViewportClass};
use crate::ui::render::styles::Palette;
use crate::ui::render::util::{fit_width, visible_width};

fn key_pairs(m: &Model) -> Vec<(&'static str, String)> {
    let mut pairs = Vec::new();
    if m.page() == PageKind::Products {
        pairs.push(("␣", m.tc("keys.select")));
        pairs.push(("a", m.tc("keys.all")));
        pairs.push(("s", m.tc("keys.sort")));
        pairs.push(("d", m.tc("keys.delete")));
    }
    pairs.push(("⇥", m.tc("keys.navigate")));
    if m.viewport() == ViewportClass::Mobile {
        pairs.push(("m", m.tc("keys.menu")));
    }
    pairs.push(("t", m.tc("keys.theme")));
    pairs.push(("q", m.tc("keys.quit")));
    pairs
}

fn page_title(m: &Model) -> String {
    match m.page() {
        PageKind::Home => m.t("home.title"),
        PageKind::Products => m.t("products.title"),
        PageKind::ExamplesGallery => m.t("examples.title"),
        PageKind::PageTemplate => m.t("template.title"),
        PageKind::NotFound => m.t("not-found.title"),
    }
}

/// Pagination text for the products page, full and short forms.
fn pagination(m: &Model) -> Option<(String, String)> {
    if m.page() != PageKind::Products {
        return None;
    }
    let snap = m.query.snapshot()?;
    let pages = m.listing.page_count(snap.len());
    if pages <= 1 {
        return None;
    }
    let short = format!("{} {}/{}", m.tc("keys.page"), m.listing.page, pages);
    Some((format!("{short} ←/→"), short))
}

/// One line, exactly `width` cells. Key hints are dropped from the right until
/// the pagination fits; the pagination then loses its arrows if it must.
pub fn render_modeline(m: &Model, pal: &Palette, width: usize) -> String {
    let mode = format!(" {} ", page_title(m));
    let mode_w = visible_width(&mode);
    let sep = " | ";
    let avail = width.saturating_sub(mode_w + sep.len() + 1);

    let pairs: Vec<(String, usize)> = key_pairs(m)
        .into_iter()
        .map(|(k, d)| {
            let plain = visible_width(&d) + 1 + visible_width(k);
            let rendered = format!(
                "{}{}{}",
                pal.modeline.render(&d),
                pal.modeline.render(":"),
                pal.key.render(k)
            );
            (rendered, plain)
        })
        .collect();

    let (mut pag_plain, mut pag_width) = match pagination(m) {
        Some((full, _)) => {
            let w = visible_width(&full);
            (full, w)
        }
        None => (String::new(), 0),
    };

    let width_of = |n: usize| -> usize {
        if n == 0 {
            0
        } else {
            pairs.iter().take(n).map(|(_, w)| *w).sum::<usize>() + 2 * (n - 1)
        }
    };
    let mut count = pairs.len();
    while count > 0 && width_of(count) + pag_width > avail {
        count -= 1;
    }
    if width_of(count) + pag_width > avail {
        if let Some((_, short)) = pagination(m) {
            pag_width = visible_width(&short);
            pag_plain = short;
        }
    }

    let left = pairs
        .iter()
        .take(count)
        .map(|(r, _)| r.clone())
        .collect::<Vec<_>>()
        .join(&pal.modeline.render("  "));
    let gap = avail.saturating_sub(width_of(count) + pag_width);
    let filler = pal.modeline.render(&" ".repeat(gap));

    let line = format!(
        "{}{}{}{}{}{}",
        pal.title.render(&mode),
        pal.modeline.render(sep),
        left,
        filler,
        pal.muted.render(&pag_plain),
        pal.modeline.render(" "),
    );
    if visible_width(&line) == width {
        line
    } else {
        fit_width(&line, width)
    }
}
