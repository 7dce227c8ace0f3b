use crate::theme::Icon;
use crate::ui::model::{Model, ViewportClass};
use crate::ui::render::shell::responsive;
use crate::ui::render::styles::Palette;
use crate::ui::render::util::{clip, spread, visible_width, wrap};

fn boxed(pal: &Palette, content: &[String]) -> Vec<String> {
    pal.boxed
        .render(&content.join("\n"))
        .lines()
        .map(str::to_string)
        .collect()
}

pub fn render_home(m: &Model, pal: &Palette, width: usize) -> Vec<String> {
    let mut lines = vec![
        pal.title.render(&clip(&m.t("home.title"), width)),
        String::new(),
    ];
    lines.extend(
        wrap(&m.t("home.body"), width)
            .iter()
            .map(|l| pal.text.render(l)),
    );
    lines
}

/// One card per example route; the card under the cursor is marked.
pub fn render_gallery(m: &Model, pal: &Palette, width: usize) -> Vec<String> {
    let mut lines = vec![
        pal.title.render(&clip(&m.t("examples.title"), width)),
        String::new(),
    ];
    let inner = width.saturating_sub(4).max(1);
    for (i, route) in m.gallery_routes().iter().enumerate() {
        let marker = if i == m.cursor { "› " } else { "  " };
        let title = format!("{marker}{}", m.tc(&format!("menu.{}", route.title_key)));
        let mut content = vec![if i == m.cursor {
            pal.key.render(&clip(&title, inner))
        } else {
            pal.title.render(&clip(&title, inner))
        }];
        content.extend(
            wrap(&m.t(&format!("examples.{}", route.title_key)), inner)
                .iter()
                .map(|l| pal.muted.render(l)),
        );
        lines.extend(boxed(pal, &content));
    }
    lines
}

fn template_buttons(m: &Model, pal: &Palette) -> Vec<String> {
    vec![
        pal.tag.render(&format!(
            "{} {}",
            Icon::Download.glyph(),
            m.t("template.secondary")
        )),
        pal.tag.render("⋮"),
        pal.primary.render(&format!(
            "{} {}",
            Icon::Plus.glyph(),
            m.t("template.primary")
        )),
    ]
}

pub fn render_template(m: &Model, pal: &Palette, width: usize) -> Vec<String> {
    let title = pal.title.render(&clip(&m.t("template.title"), width));
    let buttons = template_buttons(m, pal);
    let inline = buttons.join(" ");

    let mut mobile = vec![title.clone()];
    mobile.extend(buttons.iter().cloned());
    let desktop = if visible_width(&title) + 2 + visible_width(&inline) <= width {
        vec![spread(&title, &inline, width)]
    } else {
        vec![title.clone(), inline.clone()]
    };
    let mut lines = responsive(m.viewport(), mobile, desktop);

    lines.push(pal.muted.render(&clip(&m.t("template.subtitle"), width)));
    lines.push(pal.tag.render(&m.t("template.tag")));
    lines.push(String::new());

    let inner = width.saturating_sub(4).max(1);
    let mut alert = vec![pal.title.render(&clip(&m.t("template.alert-title"), inner))];
    alert.extend(wrap(&m.t("template.alert-body"), inner));
    lines.extend(boxed(pal, &alert));

    let search = format!("⌕ {} ____________", m.t("template.search"));
    let chips = format!(
        "{} {}",
        pal.tag.render(&m.t("template.sales")),
        pal.tag.render(&format!(
            "{} {} {}",
            Icon::Sliders.glyph(),
            m.t("template.filter"),
            Icon::Trash.glyph()
        ))
    );
    match m.viewport() {
        ViewportClass::Desktop => {
            lines.push(spread(
                &pal.text.render(&search),
                &chips,
                width,
            ));
        }
        ViewportClass::Mobile => {
            lines.push(pal.text.render(&clip(&search, width)));
            lines.push(chips);
        }
    }

    lines.extend(boxed(
        pal,
        &wrap(&m.t("template.placeholder"), inner)
            .iter()
            .map(|l| pal.muted.render(l))
            .collect::<Vec<_>>(),
    ));
    lines.push(pal.key.render(&format!(
        "{} {}",
        m.t("template.help"),
        Icon::ExternalLink.glyph()
    )));
    lines
}

pub fn render_not_found(m: &Model, pal: &Palette, width: usize) -> Vec<String> {
    vec![
        pal.title.render(&clip(&m.t("not-found.title"), width)),
        String::new(),
        pal.muted.render(&clip(&m.path, width)),
    ]
}

/// Key reference shown over the page body while `?` is toggled on.
pub fn render_help(m: &Model, pal: &Palette, width: usize) -> Vec<String> {
    let rows = [
        ("⇥ ⇤", m.tc("keys.navigate")),
        ("1-9", m.tc("keys.navigate")),
        ("b ⌫", m.tc("header.back")),
        ("↑ ↓", m.tc("keys.select")),
        ("␣ ⏎", m.tc("keys.select")),
        ("a", m.tc("keys.all")),
        ("s i", m.tc("keys.sort")),
        ("d x", m.tc("keys.delete")),
        ("← →", m.tc("keys.page")),
        ("m", m.tc("keys.menu")),
        ("t", m.tc("keys.theme")),
        ("q", m.tc("keys.quit")),
    ];
    let mut lines = vec![
        pal.title.render(&clip(&m.tc("header.help"), width)),
        String::new(),
    ];
    for (keys, desc) in rows {
        lines.push(format!(
            "{}{}",
            pal.key.render(&format!("{keys:<6}")),
            pal.text.render(&clip(&desc, width.saturating_sub(6)))
        ));
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Settings;
    use crate::i18n::Locale;
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

    fn plain(lines: Vec<String>) -> String {
        strip_ansi(&lines.join("\n"))
    }

    #[test]
    fn home_wraps_welcome_text() {
        let m = model_at("/", 100);
        let out = plain(render_home(&m, palette(m.theme), 20));
        assert!(out.starts_with("Início"));
        for line in out.lines() {
            assert!(lipgloss::width(line) <= 20);
        }
    }

    #[test]
    fn gallery_has_a_card_per_example() {
        let m = model_at("/examples", 100);
        let out = plain(render_gallery(&m, palette(m.theme), 60));
        assert!(out.contains("› Modelo de página"));
        assert!(out.contains("Estrutura base"));
        assert!(out.contains('╭'));
    }

    #[test]
    fn template_shows_every_block() {
        let m = model_at("/examples/page-template", 100);
        let out = plain(render_template(&m, palette(m.theme), 76));
        for needle in [
            "Modelo de página",
            "Subtítulo da página",
            "Ação secundária",
            "Ação primária",
            "Tag de exemplo",
            "Alerta de exemplo",
            "Buscar",
            "150 vendas",
            "Filtro aplicado",
            "Substitua-me pelo seu conteúdo",
            "Mais informações ↗",
        ] {
            assert!(out.contains(needle), "missing `{needle}`\n{out}");
        }
    }

    #[test]
    fn template_stacks_buttons_on_mobile() {
        let m = model_at("/examples/page-template", 40);
        let lines: Vec<String> = render_template(&m, palette(m.theme), 40)
            .into_iter()
            .map(|l| strip_ansi(&l))
            .collect();
        assert!(lines[0].contains("Modelo de página"));
        assert!(!lines[0].contains("Ação primária"));
        assert!(lines[3].contains("Ação primária"));
    }

    #[test]
    fn not_found_echoes_path() {
        let m = model_at("/nope", 100);
        let out = plain(render_not_found(&m, palette(m.theme), 40));
        assert!(out.contains("Página não encontrada"));
        assert!(out.contains("/nope"));
    }

    #[test]
    fn help_follows_locale() {
        let mut m = model_at("/", 100);
        m.settings.locale = Locale::En;
        let out = plain(render_help(&m, palette(m.theme), 40));
        assert!(out.starts_with("Developer help"));
        assert!(out.contains("quit"));
    }
}
