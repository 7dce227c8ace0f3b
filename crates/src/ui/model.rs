use crate::catalog::{Effect, ProductQuery, Snapshot};
use crate::config::Settings;
use crate::i18n::{self, Namespace};
use crate::listing::ListController;
use crate::nav::{self, RouteDescriptor};
use crate::theme::Theme;
use std::sync::Arc;
use tracing::info;

// small constants reused by rendering code
pub const HEADER_LINES: usize = 1;
pub const MODELINE_LINES: usize = 1;
pub const TABBAR_LINES: usize = 1;
pub const MENU_WIDTH: usize = 24;
pub const DEFAULT_WIDTH: usize = 80;
pub const DEFAULT_HEIGHT: usize = 24;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ViewportClass {
    Mobile,
    Desktop,
}

impl ViewportClass {
    pub fn classify(width: usize, breakpoint: usize) -> Self {
        if width < breakpoint {
            ViewportClass::Mobile
        } else {
            ViewportClass::Desktop
        }
    }
}

/// Which page the current path shows.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PageKind {
    Home,
    Products,
    ExamplesGallery,
    PageTemplate,
    NotFound,
}

impl PageKind {
    fn from_route(route: Option<&RouteDescriptor>) -> Self {
        match route.map(|r| r.name) {
            Some("home") => PageKind::Home,
            Some("products") => PageKind::Products,
            Some("examples-gallery") => PageKind::ExamplesGallery,
            Some("page-template") => PageKind::PageTemplate,
            _ => PageKind::NotFound,
        }
    }
}

#[derive(Clone, Debug)]
pub struct Model {
    pub settings: Settings,
    pub routes: Vec<RouteDescriptor>,
    pub path: String,
    pub theme: Theme,
    pub query: ProductQuery,
    pub listing: ListController,
    // row cursor on the products page, card cursor on the gallery
    pub cursor: usize,
    pub menu_open: bool,
    pub help_open: bool,
    pub screen_width: usize,
    pub screen_height: usize,
}

pub fn initial_model(settings: Settings) -> Model {
    let query = ProductQuery::new(settings.fetch_retries);
    let listing = ListController::new(settings.page_size);
    Model {
        routes: nav::default_routes(),
        path: settings.start_route.clone(),
        theme: settings.theme,
        query,
        listing,
        cursor: 0,
        menu_open: false,
        help_open: false,
        screen_width: 0,
        screen_height: 0,
        settings,
    }
}

impl Model {
    // wrapper update that delegates to the update module
    pub fn update(&mut self, msg: crate::ui::Msg) -> Vec<Effect> {
        crate::ui::update::handle_update(self, msg)
    }

    /// Effects to run once the program starts.
    pub fn start(&mut self) -> Vec<Effect> {
        self.enter_page()
    }

    pub fn width(&self) -> usize {
        if self.screen_width > 0 {
            self.screen_width
        } else {
            DEFAULT_WIDTH
        }
    }

    pub fn height(&self) -> usize {
        if self.screen_height > 0 {
            self.screen_height
        } else {
            DEFAULT_HEIGHT
        }
    }

    pub fn viewport(&self) -> ViewportClass {
        ViewportClass::classify(self.width(), self.settings.mobile_breakpoint)
    }

    pub fn page(&self) -> PageKind {
        PageKind::from_route(nav::resolve(&self.routes, &self.path))
    }

    pub fn t(&self, key: &str) -> String {
        i18n::translate(self.settings.locale, key, Namespace::Translations)
    }

    pub fn tc(&self, key: &str) -> String {
        i18n::translate(self.settings.locale, key, Namespace::Components)
    }

    pub fn snapshot(&self) -> Option<Arc<Snapshot>> {
        self.query.snapshot().cloned()
    }

    /// The single place the theme changes.
    pub fn toggle_theme(&mut self) {
        self.theme = self.theme.toggled();
        info!(dark = self.theme.is_dark(), "theme toggled");
    }

    pub fn navigate(&mut self, path: &str) -> Vec<Effect> {
        if self.path == path {
            self.menu_open = false;
            return Vec::new();
        }
        info!(from = %self.path, to = path, "navigate");
        self.path = path.to_string();
        self.menu_open = false;
        self.cursor = 0;
        self.enter_page()
    }

    // Mounting the products page refreshes the list, keeping any snapshot
    // already on screen until the new one lands.
    fn enter_page(&mut self) -> Vec<Effect> {
        if self.page() == PageKind::Products {
            return self.query.begin_fetch().into_iter().collect();
        }
        Vec::new()
    }

    /// Re-bind the list controller to whatever snapshot the query holds.
    pub fn sync_listing(&mut self) {
        if let Some(snap) = self.query.snapshot().cloned() {
            self.listing.observe(&snap);
            let rows = self.listing.visible_rows(&snap).len();
            if rows == 0 {
                self.cursor = 0;
            } else if self.cursor >= rows {
                self.cursor = rows - 1;
            }
        }
    }

    /// Product id under the row cursor on the current page.
    pub fn cursor_product(&self) -> Option<u64> {
        let snap = self.query.snapshot()?;
        self.listing
            .visible_rows(snap)
            .get(self.cursor)
            .map(|p| p.id)
    }

    /// Routes the gallery shows as cards: the rest of the current group.
    pub fn gallery_routes(&self) -> Vec<&RouteDescriptor> {
        let Some(head) = nav::resolve(&self.routes, &self.path) else {
            return Vec::new();
        };
        let Some(group) = head.group else {
            return Vec::new();
        };
        self.routes
            .iter()
            .filter(|r| r.group == Some(group) && r.slug != head.slug)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn model_at(path: &str) -> Model {
        let settings = Settings {
            start_route: path.to_string(),
            ..Settings::default()
        };
        initial_model(settings)
    }

    #[test]
    fn viewport_class_follows_breakpoint() {
        assert_eq!(ViewportClass::classify(79, 80), ViewportClass::Mobile);
        assert_eq!(ViewportClass::classify(80, 80), ViewportClass::Desktop);
        let m = model_at("/");
        // unsized terminal falls back to the default width
        assert_eq!(m.viewport(), ViewportClass::Desktop);
    }

    #[test]
    fn page_follows_path() {
        assert_eq!(model_at("/").page(), PageKind::Home);
        assert_eq!(model_at("/products").page(), PageKind::Products);
        assert_eq!(model_at("/examples").page(), PageKind::ExamplesGallery);
        assert_eq!(
            model_at("/examples/page-template").page(),
            PageKind::PageTemplate
        );
        assert_eq!(model_at("/nowhere").page(), PageKind::NotFound);
    }

    #[test]
    fn start_on_products_fetches() {
        let mut m = model_at("/products");
        assert_eq!(m.start(), vec![Effect::Fetch { attempt: 0 }]);
        let mut home = model_at("/");
        assert!(home.start().is_empty());
    }

    #[test]
    fn navigate_to_products_refetches_and_closes_menu() {
        let mut m = model_at("/");
        m.menu_open = true;
        let effects = m.navigate("/products");
        assert_eq!(effects, vec![Effect::Fetch { attempt: 0 }]);
        assert!(!m.menu_open);
        assert!(m.navigate("/products").is_empty());
    }

    #[test]
    fn toggle_theme_is_the_only_write() {
        let mut m = model_at("/");
        assert_eq!(m.theme, Theme::Light);
        m.toggle_theme();
        assert_eq!(m.theme, Theme::Dark);
    }

    #[test]
    fn gallery_lists_rest_of_group() {
        let m = model_at("/examples");
        let slugs: Vec<&str> = m.gallery_routes().iter().map(|r| r.slug).collect();
        assert_eq!(slugs, vec!["/examples/page-template"]);
        assert!(model_at("/products").gallery_routes().is_empty());
    }
}
