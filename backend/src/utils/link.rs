//! Locale-aware link generation
//!
//! Every internal navigation link goes through [`LinkLocalizer::localize`]
//! so that client-side navigation lands directly on canonical URLs and never
//! depends on an edge redirect.

use regex::Regex;

use crate::models::Locale;
use crate::services::RouterConfig;
use crate::utils::ConfigError;

#[derive(Debug, Clone)]
pub struct LinkLocalizer {
    prefix: Regex,
    router: RouterConfig,
}

impl LinkLocalizer {
    /// Prefix pattern and exemptions both come from the router configuration,
    /// so a localized link is always canonical for the edge router.
    pub fn new(router: &RouterConfig) -> Result<Self, ConfigError> {
        let codes: Vec<&str> = router.locales.supported().iter().map(|locale| locale.code()).collect();
        let prefix = Regex::new(&format!("^/({})([/?#]|$)", codes.join("|")))?;
        Ok(Self { prefix, router: router.clone() })
    }

    /// Locale already carried by `href`, if it starts with a supported prefix.
    pub fn prefix_locale(&self, href: &str) -> Option<Locale> {
        self.prefix
            .captures(href)
            .and_then(|caps| caps.get(1))
            .and_then(|code| Locale::from_code(code.as_str()))
    }

    /// Prefix `href` with the active locale.
    ///
    /// An href that already starts with any supported locale is returned
    /// untouched, even when that locale differs from `active`. Off-site
    /// links, fragments, `mailto:`/`tel:` links and the empty href are left
    /// alone too. Exempt paths (API, assets, files) are only made absolute.
    pub fn localize(&self, href: &str, active: Locale) -> String {
        if href.is_empty() || is_external(href) || self.prefix.is_match(href) {
            return href.to_string();
        }

        let rest = href.strip_prefix('/').unwrap_or(href);
        let path = rest.split(['?', '#']).next().unwrap_or_default();
        if self.router.is_exempt(&format!("/{}", path)) {
            return format!("/{}", rest);
        }

        if rest.is_empty() || rest.starts_with(['?', '#']) {
            format!("/{}{}", active, rest)
        } else {
            format!("/{}/{}", active, rest)
        }
    }

    /// Same page in another locale, as used by the language switcher.
    pub fn switch_locale(&self, href: &str, target: Locale) -> String {
        match self.prefix.captures(href).and_then(|caps| caps.get(1)) {
            Some(code) => format!("/{}{}", target, &href[code.end()..]),
            None => self.localize(href, target),
        }
    }
}

fn is_external(href: &str) -> bool {
    href.contains("://")
        || href.starts_with("//")
        || href.starts_with('#')
        || href.starts_with("mailto:")
        || href.starts_with("tel:")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::LocaleConfig;

    fn links() -> LinkLocalizer {
        LinkLocalizer::new(&RouterConfig::default()).unwrap()
    }

    #[test]
    fn test_localize_root_and_paths() {
        let links = links();
        assert_eq!(links.localize("/", Locale::En), "/en");
        assert_eq!(links.localize("/services", Locale::Es), "/es/services");
        assert_eq!(links.localize("blog/post-1", Locale::Fr), "/fr/blog/post-1");
    }

    #[test]
    fn test_already_prefixed_links_are_untouched() {
        let links = links();
        // Intentional: a link pinned to another locale keeps that locale
        assert_eq!(links.localize("/fr/blog", Locale::Es), "/fr/blog");
        assert_eq!(links.localize("/en", Locale::Fr), "/en");
        assert_eq!(links.localize("/es/", Locale::En), "/es/");
    }

    #[test]
    fn test_lookalike_prefixes_are_localized() {
        let links = links();
        assert_eq!(links.localize("/french-cuisine", Locale::En), "/en/french-cuisine");
        assert_eq!(links.localize("/de/blog", Locale::En), "/en/de/blog");
    }

    #[test]
    fn test_external_links_are_untouched() {
        let links = links();
        assert_eq!(links.localize("https://example.com/x", Locale::En), "https://example.com/x");
        assert_eq!(links.localize("//cdn.example.com/a.js", Locale::En), "//cdn.example.com/a.js");
        assert_eq!(links.localize("#pricing", Locale::En), "#pricing");
        assert_eq!(links.localize("mailto:hello@example.com", Locale::En), "mailto:hello@example.com");
    }

    #[test]
    fn test_prefix_pattern_follows_supported_set() {
        let locales = LocaleConfig::new(vec![Locale::En, Locale::Fr], Locale::En).unwrap();
        let links = LinkLocalizer::new(&RouterConfig { locales, ..Default::default() }).unwrap();
        assert_eq!(links.localize("/es/blog", Locale::En), "/en/es/blog");
        assert_eq!(links.prefix_locale("/fr/blog"), Some(Locale::Fr));
        assert_eq!(links.prefix_locale("/es/blog"), None);
    }

    #[test]
    fn test_exempt_links_are_never_prefixed() {
        let links = links();
        assert_eq!(links.localize("/api/contact", Locale::En), "/api/contact");
        assert_eq!(links.localize("/assets/logo.svg", Locale::Es), "/assets/logo.svg");
        assert_eq!(links.localize("/robots.txt", Locale::Fr), "/robots.txt");
        assert_eq!(links.localize("/brochure.pdf?v=2", Locale::En), "/brochure.pdf?v=2");
        assert_eq!(links.localize("api/locale", Locale::En), "/api/locale");
        assert_eq!(links.localize("", Locale::En), "");
        // Segment boundary, same as the router
        assert_eq!(links.localize("/apiary", Locale::En), "/en/apiary");
    }

    #[test]
    fn test_query_and_fragment_stay_after_prefix() {
        let links = links();
        assert_eq!(links.localize("/?ref=nav", Locale::En), "/en?ref=nav");
        assert_eq!(links.localize("/services#pricing", Locale::Es), "/es/services#pricing");
        assert_eq!(links.localize("/en?ref=nav", Locale::Fr), "/en?ref=nav");
    }

    #[test]
    fn test_switch_locale() {
        let links = links();
        assert_eq!(links.switch_locale("/fr/services", Locale::Es), "/es/services");
        assert_eq!(links.switch_locale("/fr", Locale::En), "/en");
        assert_eq!(links.switch_locale("/about", Locale::En), "/en/about");
    }
}
