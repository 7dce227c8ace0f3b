//! Message lookup for every user-facing string.
//!
//! Missing keys fall back to English, then to the key itself, so a typo
//! shows up on screen instead of failing.

use once_cell::sync::Lazy;
use serde::Deserialize;
use std::collections::HashMap;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    #[default]
    Pt,
    Es,
    En,
}

impl Locale {
    pub fn as_str(self) -> &'static str {
        match self {
            Locale::Pt => "pt",
            Locale::Es => "es",
            Locale::En => "en",
        }
    }

    /// Accepts `pt`, `pt-BR`, `es_AR` and so on.
    pub fn parse(value: &str) -> Option<Self> {
        let lang = value
            .trim()
            .to_ascii_lowercase()
            .split(['-', '_'])
            .next()
            .unwrap_or("")
            .to_string();
        match lang.as_str() {
            "pt" => Some(Locale::Pt),
            "es" => Some(Locale::Es),
            "en" => Some(Locale::En),
            _ => None,
        }
    }

    fn slot(self) -> usize {
        match self {
            Locale::Pt => 0,
            Locale::Es => 1,
            Locale::En => 2,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Namespace {
    Translations,
    Components,
}

// [pt, es, en]
type Entry = [&'static str; 3];

const TRANSLATIONS: &[(&str, Entry)] = &[
    ("home.title", ["Início", "Inicio", "Home"]),
    (
        "home.body",
        [
            "Bem-vindo ao painel. Use o menu para navegar.",
            "Bienvenido al panel. Usa el menú para navegar.",
            "Welcome to the dashboard. Use the menu to navigate.",
        ],
    ),
    ("products.title", ["Produtos", "Productos", "Products"]),
    ("products.name", ["Produto", "Producto", "Product"]),
    ("products.remove", ["Remover", "Eliminar", "Remove"]),
    ("products.actions", ["Ações", "Acciones", "Actions"]),
    (
        "products.no-content",
        [
            "Nenhum produto cadastrado.",
            "No hay productos registrados.",
            "No products yet.",
        ],
    ),
    (
        "products.selected.single",
        ["selecionado", "seleccionado", "selected"],
    ),
    (
        "products.selected.many",
        ["selecionados", "seleccionados", "selected"],
    ),
    (
        "products.showing",
        [
            "Mostrando {first}-{last} produtos de {total}",
            "Mostrando {first}-{last} productos de {total}",
            "Showing {first}-{last} of {total} products",
        ],
    ),
    (
        "products.loading",
        ["Carregando...", "Cargando...", "Loading..."],
    ),
    (
        "products.error",
        [
            "Não foi possível carregar os produtos",
            "No se pudieron cargar los productos",
            "Could not load products",
        ],
    ),
    (
        "products.retry",
        [
            "Pressione r para tentar novamente",
            "Presiona r para reintentar",
            "Press r to try again",
        ],
    ),
    ("products.deleting", ["removendo", "eliminando", "removing"]),
    (
        "products.refreshing",
        ["atualizando", "actualizando", "refreshing"],
    ),
    ("examples.title", ["Exemplos", "Ejemplos", "Examples"]),
    (
        "examples.page-template",
        [
            "Estrutura base de uma página com cabeçalho, ações e conteúdo.",
            "Estructura base de una página con encabezado, acciones y contenido.",
            "Base page layout with header, actions and content.",
        ],
    ),
    (
        "template.title",
        ["Modelo de página", "Plantilla de página", "Page template"],
    ),
    (
        "template.subtitle",
        [
            "Subtítulo da página",
            "Subtítulo de la página",
            "Page subtitle",
        ],
    ),
    (
        "template.secondary",
        ["Ação secundária", "Acción secundaria", "Secondary action"],
    ),
    (
        "template.primary",
        ["Ação primária", "Acción primaria", "Primary action"],
    ),
    (
        "template.context-menu",
        ["Menu contextual", "Menú contextual", "Context menu"],
    ),
    (
        "template.tag",
        ["Tag de exemplo", "Etiqueta de ejemplo", "Example tag"],
    ),
    (
        "template.alert-title",
        ["Alerta de exemplo", "Alerta de ejemplo", "Example alert"],
    ),
    (
        "template.alert-body",
        [
            "Este é um alerta de exemplo no cabeçalho da página",
            "Esta es una alerta de ejemplo en el encabezado de la página",
            "This is an example alert in the page header",
        ],
    ),
    ("template.search", ["Buscar", "Buscar", "Search"]),
    ("template.sales", ["150 vendas", "150 ventas", "150 sales"]),
    (
        "template.filter",
        ["Filtro aplicado", "Filtro aplicado", "Filter applied"],
    ),
    (
        "template.placeholder",
        [
            "Substitua-me pelo seu conteúdo",
            "Reemplázame con tu contenido",
            "Replace me with your content",
        ],
    ),
    (
        "template.help",
        ["Mais informações", "Más información", "Learn more"],
    ),
    (
        "not-found.title",
        [
            "Página não encontrada",
            "Página no encontrada",
            "Page not found",
        ],
    ),
];

const COMPONENTS: &[(&str, Entry)] = &[
    ("menu.home", ["Início", "Inicio", "Home"]),
    ("menu.products", ["Produtos", "Productos", "Products"]),
    ("menu.examples", ["Exemplos", "Ejemplos", "Examples"]),
    (
        "menu.page-template",
        ["Modelo de página", "Plantilla de página", "Page template"],
    ),
    (
        "menu.settings",
        ["Configuração", "Configuración", "Settings"],
    ),
    (
        "menu.open",
        ["Menu principal", "Menú principal", "Main menu"],
    ),
    (
        "header.help",
        [
            "Ajuda para desenvolvedores",
            "Ayuda para desarrolladores",
            "Developer help",
        ],
    ),
    ("header.back", ["Voltar", "Volver", "Back"]),
    ("keys.select", ["selecionar", "seleccionar", "select"]),
    ("keys.all", ["todos", "todos", "all"]),
    ("keys.sort", ["ordenar", "ordenar", "sort"]),
    ("keys.delete", ["remover", "eliminar", "delete"]),
    ("keys.navigate", ["navegar", "navegar", "navigate"]),
    ("keys.theme", ["tema", "tema", "theme"]),
    ("keys.menu", ["menu", "menú", "menu"]),
    ("keys.quit", ["sair", "salir", "quit"]),
    ("keys.page", ["Página", "Página", "Page"]),
];

static CATALOG: Lazy<HashMap<(Namespace, &'static str), Entry>> = Lazy::new(|| {
    let mut m = HashMap::new();
    for (k, v) in TRANSLATIONS {
        m.insert((Namespace::Translations, *k), *v);
    }
    for (k, v) in COMPONENTS {
        m.insert((Namespace::Components, *k), *v);
    }
    m
});

pub fn translate(locale: Locale, key: &str, ns: Namespace) -> String {
    match CATALOG.get(&(ns, key)) {
        Some(entry) => {
            let s = entry[locale.slot()];
            if s.is_empty() {
                entry[Locale::En.slot()].to_string()
            } else {
                s.to_string()
            }
        }
        None => key.to_string(),
    }
}

/// Like [`translate`], then replaces `{name}` placeholders in order.
pub fn translate_with(locale: Locale, key: &str, ns: Namespace, args: &[(&str, String)]) -> String {
    let mut out = translate(locale, key, ns);
    for (name, value) in args {
        out = out.replace(&format!("{{{name}}}"), value);
    }
    out
}
