//! Route table and the active/expanded state derived from the current path.
//!
//! Nothing here is stored between frames; the menu is recomputed from the
//! path every time it is drawn.

use crate::theme::Icon;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct GroupId(pub &'static str);

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RouteDescriptor {
    pub name: &'static str,
    pub slug: &'static str,
    pub title_key: &'static str,
    pub icon: Option<Icon>,
    /// Routes sharing a group are listed together; the first one is the head.
    pub group: Option<GroupId>,
}

pub const EXAMPLES: GroupId = GroupId("examples");

pub fn default_routes() -> Vec<RouteDescriptor> {
    vec![
        RouteDescriptor {
            name: "home",
            slug: "/",
            title_key: "home",
            icon: Some(Icon::Home),
            group: None,
        },
        RouteDescriptor {
            name: "products",
            slug: "/products",
            title_key: "products",
            icon: Some(Icon::Products),
            group: None,
        },
        RouteDescriptor {
            name: "examples-gallery",
            slug: "/examples",
            title_key: "examples",
            icon: Some(Icon::Examples),
            group: Some(EXAMPLES),
        },
        RouteDescriptor {
            name: "page-template",
            slug: "/examples/page-template",
            title_key: "page-template",
            icon: None,
            group: Some(EXAMPLES),
        },
    ]
}

fn normalize(path: &str) -> &str {
    let trimmed = path.trim_end_matches('/');
    if trimmed.is_empty() {
        "/"
    } else {
        trimmed
    }
}

/// True when `path` is `slug` or lies below it.
///
/// "Below" means the remainder after `slug` starts with `/`, so `/products`
/// is active on `/products/12` but not on `/productsx`. The root slug `/`
/// is a prefix of every path and therefore only matches `/` itself.
pub fn is_active(slug: &str, path: &str) -> bool {
    let slug = normalize(slug);
    let path = normalize(path);
    if slug == "/" {
        return path == "/";
    }
    path == slug
        || path
            .strip_prefix(slug)
            .is_some_and(|rest| rest.starts_with('/'))
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MenuLink<'a> {
    pub route: &'a RouteDescriptor,
    pub active: bool,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum MenuEntry<'a> {
    Link(MenuLink<'a>),
    /// A group head. When `expanded`, `children` holds the rest of the group.
    Group {
        head: MenuLink<'a>,
        expanded: bool,
        children: Vec<MenuLink<'a>>,
    },
}

fn group_head(routes: &[RouteDescriptor], group: GroupId) -> Option<&RouteDescriptor> {
    routes.iter().find(|r| r.group == Some(group))
}

fn is_head(routes: &[RouteDescriptor], route: &RouteDescriptor) -> bool {
    match route.group {
        Some(g) => group_head(routes, g).is_some_and(|h| std::ptr::eq(h, route)),
        None => false,
    }
}

pub fn menu_entries<'a>(routes: &'a [RouteDescriptor], path: &str) -> Vec<MenuEntry<'a>> {
    let mut out = Vec::new();
    for route in routes {
        match route.group {
            None => out.push(MenuEntry::Link(MenuLink {
                route,
                active: is_active(route.slug, path),
            })),
            Some(g) if is_head(routes, route) => {
                let expanded = is_active(route.slug, path);
                let children = if expanded {
                    routes
                        .iter()
                        .filter(|r| r.group == Some(g) && !std::ptr::eq(*r, route))
                        .map(|r| MenuLink {
                            route: r,
                            active: is_active(r.slug, path),
                        })
                        .collect()
                } else {
                    Vec::new()
                };
                out.push(MenuEntry::Group {
                    head: MenuLink {
                        route,
                        active: expanded,
                    },
                    expanded,
                    children,
                });
            }
            // group members are listed under their head
            Some(_) => {}
        }
    }
    out
}

/// Links in menu order, including expanded children.
pub fn navigable<'a>(entries: &[MenuEntry<'a>]) -> Vec<&'a RouteDescriptor> {
    let mut out = Vec::new();
    for e in entries {
        match e {
            MenuEntry::Link(l) => out.push(l.route),
            MenuEntry::Group { head, children, .. } => {
                out.push(head.route);
                out.extend(children.iter().map(|c| c.route));
            }
        }
    }
    out
}

/// Top-level routes, shown as tabs on narrow screens.
pub fn tab_routes(routes: &[RouteDescriptor]) -> Vec<&RouteDescriptor> {
    routes
        .iter()
        .filter(|r| r.group.is_none() || is_head(routes, r))
        .collect()
}

/// Where the header's back button leads: the group head when on one of its
/// children.
pub fn back_target<'a>(routes: &'a [RouteDescriptor], path: &str) -> Option<&'a RouteDescriptor> {
    routes
        .iter()
        .filter(|r| is_head(routes, r))
        .find(|head| is_active(head.slug, path) && normalize(head.slug) != normalize(path))
}

/// Route whose slug is exactly `path`.
pub fn resolve<'a>(routes: &'a [RouteDescriptor], path: &str) -> Option<&'a RouteDescriptor> {
    routes.iter().find(|r| normalize(r.slug) == normalize(path))
}
