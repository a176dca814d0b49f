//! Page rendering seam
//!
//! Rendering and SEO copy live outside the routing core; they receive the
//! resolved locale and a [`LinkLocalizer`] and produce HTML.

use rust_i18n::t;

use crate::models::{Locale, LocaleConfig};
use crate::services::StoreSettings;
use crate::utils::LinkLocalizer;

/// Pages the site navigation knows about, by slug. `""` is the home page.
pub const SITE_PAGES: &[&str] = &["", "services", "about", "blog", "contact"];

pub struct RenderContext<'a> {
    pub locale: Locale,
    pub locales: &'a LocaleConfig,
    pub links: &'a LinkLocalizer,
    /// Client locale store settings, emitted for hydration
    pub client: &'a StoreSettings,
    /// Canonical request path, e.g. `/fr/services`
    pub path: &'a str,
}

pub trait PageRenderer: Send + Sync {
    /// Render the page at `slug` (path after the locale prefix, `""` or
    /// `/services`), or `None` when no such page exists.
    fn render(&self, slug: &str, ctx: &RenderContext<'_>) -> Option<String>;
}

/// Minimal HTML shell with localized navigation.
#[derive(Debug, Default, Clone, Copy)]
pub struct ShellRenderer;

impl PageRenderer for ShellRenderer {
    fn render(&self, slug: &str, ctx: &RenderContext<'_>) -> Option<String> {
        let slug = canonical_slug(slug)?;

        let locale = ctx.locale.code();
        let title = page_title(slug, ctx.locale);
        let site_name = t!("site.name", locale = locale);

        let nav: String = SITE_PAGES
            .iter()
            .map(|page| {
                let href = ctx.links.localize(&format!("/{}", page), ctx.locale);
                format!(r#"<li><a href="{}">{}</a></li>"#, href, page_title(page, ctx.locale))
            })
            .collect();

        let switcher: String = ctx
            .locales
            .supported()
            .iter()
            .map(|target| {
                let href = ctx.links.switch_locale(ctx.path, *target);
                format!(r#"<li><a href="{}" hreflang="{}">{}</a></li>"#, href, target, target)
            })
            .collect();

        Some(format!(
            concat!(
                "<!DOCTYPE html>\n<html lang=\"{lang}\" data-default-locale=\"{default}\" ",
                "data-fallback-locale=\"{fallback}\" data-storage-key=\"{storage_key}\" ",
                "data-persist-policy=\"{persist}\">\n<head><meta charset=\"utf-8\">",
                "<title>{title} | {site}</title></head>\n<body>\n",
                "<nav aria-label=\"{nav_label}\"><ul>{nav}</ul></nav>\n",
                "<nav aria-label=\"{languages}\"><ul>{switcher}</ul></nav>\n",
                "<main><h1>{title}</h1><p>{tagline}</p></main>\n</body>\n</html>\n"
            ),
            lang = locale,
            default = ctx.locales.default_locale(),
            fallback = ctx.client.fallback,
            storage_key = ctx.client.storage_key,
            persist = ctx.client.persist_policy.as_str(),
            title = title,
            site = site_name,
            nav_label = t!("nav.label", locale = locale),
            nav = nav,
            languages = t!("nav.languages", locale = locale),
            switcher = switcher,
            tagline = t!("site.tagline", locale = locale),
        ))
    }
}

/// Exact page slug, so `/fr/services/` and `/fr//services` are not
/// served as duplicates of `/fr/services`.
fn canonical_slug(slug: &str) -> Option<&str> {
    let page = match slug {
        "" => "",
        _ => slug.strip_prefix('/').filter(|page| !page.is_empty())?,
    };
    SITE_PAGES.iter().copied().find(|known| *known == page)
}

pub fn page_title(slug: &str, locale: Locale) -> String {
    let locale = locale.code();
    match slug {
        "" => t!("page.home", locale = locale).to_string(),
        "services" => t!("page.services", locale = locale).to_string(),
        "about" => t!("page.about", locale = locale).to_string(),
        "blog" => t!("page.blog", locale = locale).to_string(),
        "contact" => t!("page.contact", locale = locale).to_string(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_exact_slugs_are_pages() {
        assert_eq!(canonical_slug(""), Some(""));
        assert_eq!(canonical_slug("/services"), Some("services"));
        assert_eq!(canonical_slug("/"), None);
        assert_eq!(canonical_slug("/services/"), None);
        assert_eq!(canonical_slug("//services"), None);
        assert_eq!(canonical_slug("/nowhere"), None);
    }
}
