// Render module: pure functions from `&Model` to lines of text.

pub mod menu;
pub mod modeline;
pub mod pages;
pub mod products;
pub mod shell;
pub mod styles;
pub mod util;

pub use modeline::render_modeline;

use crate::ui::model::{Model, PageKind};
use styles::{Palette, palette};
use util::normalize_and_pad;

/// Lines of the current page (or the help overlay), `width` cells wide at most.
pub fn render_body(m: &Model, pal: &Palette, width: usize) -> Vec<String> {
    if m.help_open {
        return pages::render_help(m, pal, width);
    }
    match m.page() {
        PageKind::Home => pages::render_home(m, pal, width),
        PageKind::Products => products::render_products(m, pal, width),
        PageKind::ExamplesGallery => pages::render_gallery(m, pal, width),
        PageKind::PageTemplate => pages::render_template(m, pal, width),
        PageKind::NotFound => pages::render_not_found(m, pal, width),
    }
}

/// The whole screen, exactly `width` x `height` cells.
pub fn render_full(m: &Model) -> String {
    let (w, h) = (m.width(), m.height());
    let pal = palette(m.theme);
    let frame = shell::responsive(
        m.viewport(),
        shell::mobile_frame(m, pal, w, h),
        shell::desktop_frame(m, pal, w, h),
    );
    normalize_and_pad(frame, w, h).join("\n")
}
