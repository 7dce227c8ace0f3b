use crate::catalog::Effect;
use crate::listing::SortColumn;
use crate::nav;
use crate::ui::Msg;
use crate::ui::model::{Model, PageKind, ViewportClass};
use tracing::debug;

pub fn handle_update(m: &mut Model, msg: Msg) -> Vec<Effect> {
    match msg {
        Msg::WindowSize { width, height } => {
            handle_window_size(m, width, height);
            Vec::new()
        }
        Msg::Fetched { attempt, result } => {
            let follow = m.query.on_fetched(attempt, result);
            m.sync_listing();
            follow.into_iter().collect()
        }
        Msg::Deleted { id, result } => m.query.on_deleted(id, result).into_iter().collect(),
        Msg::KeyTab => cycle_nav(m, true),
        Msg::KeyBackTab => cycle_nav(m, false),
        Msg::KeyBackspace => go_back(m),
        Msg::KeyEsc => {
            handle_key_esc(m);
            Vec::new()
        }
        Msg::Rune(r) => handle_rune(m, r),
        key => handle_page_key(m, key),
    }
}

fn handle_window_size(m: &mut Model, width: usize, height: usize) {
    m.screen_width = width;
    m.screen_height = height;
    if m.viewport() == ViewportClass::Desktop {
        // the sidebar only exists on narrow screens
        m.menu_open = false;
    }
}

fn handle_key_esc(m: &mut Model) {
    if m.help_open {
        m.help_open = false;
    } else if m.menu_open {
        m.menu_open = false;
    }
    m.query.clear_notice();
}

fn cycle_nav(m: &mut Model, forward: bool) -> Vec<Effect> {
    let targets: Vec<String> = {
        let entries = nav::menu_entries(&m.routes, &m.path);
        nav::navigable(&entries)
            .iter()
            .map(|r| r.slug.to_string())
            .collect()
    };
    if targets.is_empty() {
        return Vec::new();
    }
    let here = nav::resolve(&m.routes, &m.path).map(|r| r.slug);
    let current = targets.iter().position(|s| Some(s.as_str()) == here);
    let next = match (current, forward) {
        (Some(i), true) => (i + 1) % targets.len(),
        (Some(i), false) => (i + targets.len() - 1) % targets.len(),
        (None, true) => 0,
        (None, false) => targets.len() - 1,
    };
    m.navigate(&targets[next])
}

fn go_back(m: &mut Model) -> Vec<Effect> {
    let target = nav::back_target(&m.routes, &m.path).map(|r| r.slug.to_string());
    match target {
        Some(slug) => m.navigate(&slug),
        None => Vec::new(),
    }
}

fn jump_to_link(m: &mut Model, index: usize) -> Vec<Effect> {
    let target = {
        let entries = nav::menu_entries(&m.routes, &m.path);
        nav::navigable(&entries)
            .get(index)
            .map(|r| r.slug.to_string())
    };
    match target {
        Some(slug) => m.navigate(&slug),
        None => Vec::new(),
    }
}

fn handle_rune(m: &mut Model, r: char) -> Vec<Effect> {
    match r {
        't' => {
            m.toggle_theme();
            Vec::new()
        }
        '?' => {
            m.help_open = !m.help_open;
            Vec::new()
        }
        'm' => {
            if m.viewport() == ViewportClass::Mobile {
                m.menu_open = !m.menu_open;
            }
            Vec::new()
        }
        'b' => go_back(m),
        '1'..='9' => jump_to_link(m, r as usize - '1' as usize),
        'j' => handle_page_key(m, Msg::KeyDown),
        'k' => handle_page_key(m, Msg::KeyUp),
        'h' => handle_page_key(m, Msg::KeyLeft),
        'l' => handle_page_key(m, Msg::KeyRight),
        _ if m.page() == PageKind::Products => handle_products_rune(m, r),
        _ => Vec::new(),
    }
}

fn handle_products_rune(m: &mut Model, r: char) -> Vec<Effect> {
    match r {
        'a' => {
            if let Some(snap) = m.snapshot() {
                m.listing.toggle_all(&snap);
            }
            Vec::new()
        }
        's' => {
            m.listing.set_sort(SortColumn::Name);
            Vec::new()
        }
        'i' => {
            m.listing.set_sort(SortColumn::Id);
            Vec::new()
        }
        'd' => match m.cursor_product() {
            Some(id) => m.query.request_delete(id).into_iter().collect(),
            None => Vec::new(),
        },
        'x' => {
            let ids: Vec<u64> = m.listing.selection().iter().copied().collect();
            debug!(count = ids.len(), "remove selected");
            m.query.request_bulk_delete(ids)
        }
        'r' => m.query.begin_fetch().into_iter().collect(),
        _ => Vec::new(),
    }
}

fn handle_page_key(m: &mut Model, key: Msg) -> Vec<Effect> {
    if m.menu_open {
        return Vec::new();
    }
    match m.page() {
        PageKind::Products => handle_products_key(m, key),
        PageKind::ExamplesGallery => handle_gallery_key(m, key),
        _ => Vec::new(),
    }
}

fn handle_products_key(m: &mut Model, key: Msg) -> Vec<Effect> {
    let Some(snap) = m.snapshot() else {
        return Vec::new();
    };
    let rows = m.listing.visible_rows(&snap).len();
    match key {
        Msg::KeyDown => {
            if m.cursor + 1 < rows {
                m.cursor += 1;
            }
        }
        Msg::KeyUp => {
            m.cursor = m.cursor.saturating_sub(1);
        }
        Msg::KeyRight => {
            m.listing.next_page(snap.len());
            m.cursor = 0;
        }
        Msg::KeyLeft => {
            m.listing.prev_page();
            m.cursor = 0;
        }
        Msg::KeySpace | Msg::KeyEnter => {
            if let Some(id) = m.cursor_product() {
                m.listing.toggle_row(id);
            }
        }
        _ => {}
    }
    Vec::new()
}

fn handle_gallery_key(m: &mut Model, key: Msg) -> Vec<Effect> {
    let cards: Vec<String> = m
        .gallery_routes()
        .iter()
        .map(|r| r.slug.to_string())
        .collect();
    match key {
        Msg::KeyDown if m.cursor + 1 < cards.len() => {
            m.cursor += 1;
            Vec::new()
        }
        Msg::KeyUp => {
            m.cursor = m.cursor.saturating_sub(1);
            Vec::new()
        }
        Msg::KeyEnter | Msg::KeySpace => match cards.get(m.cursor) {
            Some(slug) => m.navigate(slug),
            None => Vec::new(),
        },
        _ => Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::seed_collection;
    use crate::config::Settings;
    use crate::error::AccessorError;
    use crate::listing::{HeaderState, SortDirection};
    use crate::ui::initial_model;

    fn loaded_products() -> Model {
        let mut m = initial_model(Settings {
            start_route: "/products".into(),
            ..Settings::default()
        });
        assert_eq!(m.start(), vec![Effect::Fetch { attempt: 0 }]);
        let follow = m.update(Msg::Fetched {
            attempt: 0,
            result: Ok(seed_collection()),
        });
        assert!(follow.is_empty());
        m
    }

    #[test]
    fn space_toggles_row_under_cursor() {
        let mut m = loaded_products();
        m.update(Msg::KeyDown);
        let id = m.cursor_product().unwrap();
        // default sort is id descending
        assert_eq!(id, 11);
        m.update(Msg::KeySpace);
        assert!(m.listing.is_selected(11));
        m.update(Msg::KeySpace);
        assert!(!m.listing.is_selected(11));
    }

    #[test]
    fn select_all_key_covers_every_page() {
        let mut m = loaded_products();
        m.update(Msg::Rune('a'));
        assert_eq!(m.listing.selection().len(), 12);
        assert_eq!(m.listing.header_state(12), HeaderState::Checked);
        m.update(Msg::Rune('a'));
        assert!(m.listing.selection().is_empty());
    }

    #[test]
    fn sort_keys_flip_and_reset() {
        let mut m = loaded_products();
        m.update(Msg::Rune('i'));
        assert_eq!(m.listing.sort.direction, SortDirection::Ascending);
        assert_eq!(m.cursor_product(), Some(1));
        m.update(Msg::Rune('s'));
        assert_eq!(m.listing.sort.column, SortColumn::Name);
        assert_eq!(m.listing.sort.direction, SortDirection::Ascending);
    }

    #[test]
    fn paging_moves_and_stops_at_ends() {
        let mut m = loaded_products();
        m.update(Msg::KeyRight);
        m.update(Msg::KeyRight);
        m.update(Msg::KeyRight);
        assert_eq!(m.listing.page, 3);
        m.update(Msg::KeyLeft);
        assert_eq!(m.listing.page, 2);
        m.update(Msg::Rune('h'));
        m.update(Msg::Rune('h'));
        assert_eq!(m.listing.page, 1);
    }

    #[test]
    fn delete_key_requests_once_and_keeps_rows_until_refetch() {
        let mut m = loaded_products();
        let first = m.cursor_product().unwrap();
        assert_eq!(m.update(Msg::Rune('d')), vec![Effect::Delete(first)]);
        // repeated clicks while in flight are dropped
        assert!(m.update(Msg::Rune('d')).is_empty());
        assert!(m.snapshot().unwrap().contains(first));

        let follow = m.update(Msg::Deleted {
            id: first,
            result: Ok(()),
        });
        assert_eq!(follow, vec![Effect::Fetch { attempt: 0 }]);
        let mut remaining = seed_collection();
        remaining.content.retain(|p| p.id != first);
        m.update(Msg::Fetched {
            attempt: 0,
            result: Ok(remaining),
        });
        assert!(!m.snapshot().unwrap().contains(first));
    }

    #[test]
    fn refetch_clears_selection() {
        let mut m = loaded_products();
        m.update(Msg::KeySpace);
        assert_eq!(m.listing.selection().len(), 1);
        m.update(Msg::Fetched {
            attempt: 0,
            result: Ok(seed_collection()),
        });
        assert!(m.listing.selection().is_empty());
    }

    #[test]
    fn remove_selected_issues_one_delete_per_id() {
        let mut m = loaded_products();
        m.update(Msg::KeySpace);
        m.update(Msg::KeyDown);
        m.update(Msg::KeySpace);
        let effects = m.update(Msg::Rune('x'));
        assert_eq!(effects, vec![Effect::Delete(11), Effect::Delete(12)]);
    }

    #[test]
    fn cursor_is_clamped_when_last_page_shrinks() {
        let mut m = loaded_products();
        m.update(Msg::KeyRight);
        m.update(Msg::KeyRight);
        m.update(Msg::KeyDown);
        assert_eq!(m.cursor, 1);
        let mut fewer = seed_collection();
        fewer.content.truncate(11);
        m.update(Msg::Fetched {
            attempt: 0,
            result: Ok(fewer),
        });
        assert_eq!(m.listing.page, 3);
        assert_eq!(m.cursor, 0);
    }

    #[test]
    fn fetch_failure_retries_through_update() {
        let mut m = initial_model(Settings {
            start_route: "/products".into(),
            fetch_retries: 1,
            ..Settings::default()
        });
        m.start();
        let follow = m.update(Msg::Fetched {
            attempt: 0,
            result: Err(AccessorError::Unavailable("down".into())),
        });
        assert_eq!(follow, vec![Effect::Fetch { attempt: 1 }]);
        m.update(Msg::Fetched {
            attempt: 1,
            result: Err(AccessorError::Unavailable("down".into())),
        });
        assert!(matches!(
            m.query.state(),
            crate::catalog::LoadState::Failed(_)
        ));
        assert_eq!(m.update(Msg::Rune('r')), vec![Effect::Fetch { attempt: 0 }]);
    }

    #[test]
    fn tab_cycles_through_menu_links() {
        let mut m = initial_model(Settings::default());
        assert_eq!(m.update(Msg::KeyTab), vec![Effect::Fetch { attempt: 0 }]);
        assert_eq!(m.path, "/products");
        m.update(Msg::KeyTab);
        assert_eq!(m.path, "/examples");
        // group is now expanded, so its child is next
        m.update(Msg::KeyTab);
        assert_eq!(m.path, "/examples/page-template");
        m.update(Msg::KeyTab);
        assert_eq!(m.path, "/");
        // back on the root the group is collapsed again
        m.update(Msg::KeyBackTab);
        assert_eq!(m.path, "/examples");
    }

    #[test]
    fn number_keys_jump_and_back_returns_to_group_head() {
        let mut m = initial_model(Settings::default());
        m.update(Msg::Rune('3'));
        assert_eq!(m.path, "/examples");
        m.update(Msg::KeyEnter);
        assert_eq!(m.path, "/examples/page-template");
        m.update(Msg::KeyBackspace);
        assert_eq!(m.path, "/examples");
        m.update(Msg::Rune('9'));
        assert_eq!(m.path, "/examples");
    }

    #[test]
    fn mobile_menu_only_opens_on_narrow_screens() {
        let mut m = initial_model(Settings::default());
        m.update(Msg::WindowSize {
            width: 100,
            height: 30,
        });
        m.update(Msg::Rune('m'));
        assert!(!m.menu_open);
        m.update(Msg::WindowSize {
            width: 50,
            height: 30,
        });
        m.update(Msg::Rune('m'));
        assert!(m.menu_open);
        m.update(Msg::KeyEsc);
        assert!(!m.menu_open);
        m.update(Msg::Rune('m'));
        m.update(Msg::WindowSize {
            width: 120,
            height: 30,
        });
        assert!(!m.menu_open);
    }
}
