use proptest::prelude::*;

use crate::models::{Locale, LocaleConfig, RoutePath};
use crate::services::{
    EdgeRouter, RedirectStatus, RootRedirectPolicy, RouteDecision, RouterConfig, negotiate,
};

fn path_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("/".to_string()),
        prop::collection::vec("[a-zA-Z0-9_-]{0,8}", 1..5).prop_map(|segments| format!("/{}", segments.join("/"))),
        prop::collection::vec("(fr|en|es|de|FR|api|assets)", 1..3).prop_map(|segments| format!("/{}", segments.join("/"))),
    ]
}

fn header_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        ".*",
        prop::collection::vec(("[a-zA-Z]{1,3}(-[A-Z]{2})?", "(0(\\.[0-9])?|1|x)"), 0..5).prop_map(|entries| {
            entries
                .into_iter()
                .map(|(tag, q)| format!("{};q={}", tag, q))
                .collect::<Vec<_>>()
                .join(",")
        }),
    ]
}

fn routers() -> Vec<EdgeRouter> {
    vec![
        EdgeRouter::new(RouterConfig::default()),
        EdgeRouter::new(RouterConfig {
            root_policy: RootRedirectPolicy::FixedDefault,
            ..Default::default()
        }),
    ]
}

proptest! {
    #[test]
    fn prop_single_hop_reaches_canonical(path in path_strategy(), header in header_strategy()) {
        for router in routers() {
            match router.route(&path, None, Some(&header)) {
                RouteDecision::PassThrough { locale } => {
                    let canonical = RoutePath::parse(&path, router.locales()).has_locale_prefix;
                    prop_assert!(router.is_exempt(&path) || canonical);
                    prop_assert_eq!(locale.is_some(), canonical && !router.is_exempt(&path));
                },
                RouteDecision::Redirect(redirect) => {
                    prop_assert!(!router.is_exempt(&path));
                    let target = RoutePath::parse(&redirect.location, router.locales());
                    prop_assert!(target.has_locale_prefix);

                    // Requesting the target again must not redirect
                    let again = router.route(&redirect.location, None, Some(&header));
                    prop_assert_eq!(again, RouteDecision::PassThrough { locale: target.prefix_locale });
                },
            }
        }
    }

    #[test]
    fn prop_negotiation_is_deterministic(header in header_strategy()) {
        let locales = LocaleConfig::default();
        let first = negotiate(&header, &locales);
        prop_assert_eq!(first, negotiate(&header, &locales));
        prop_assert!(locales.supports(first));
    }

    #[test]
    fn prop_unprefixed_paths_ignore_accept_language(
        segment in "[a-z]{3,10}",
        header in header_strategy(),
    ) {
        let router = EdgeRouter::new(RouterConfig::default());
        let path = format!("/{}", segment);
        let decision = router.route(&path, None, Some(&header));
        let expected = format!("/fr{}", path);
        match decision {
            RouteDecision::Redirect(redirect) => {
                prop_assert_eq!(redirect.location, expected);
                prop_assert_eq!(redirect.status, RedirectStatus::MovedPermanently);
            },
            RouteDecision::PassThrough { .. } => {
                // Only exempt words such as "api" pass
                prop_assert!(router.is_exempt(&path));
            },
        }
    }
}

#[test]
fn test_custom_default_locale() {
    let locales = LocaleConfig::new(vec![Locale::En, Locale::Es], Locale::En).unwrap();
    let config = RouterConfig { locales, ..Default::default() };
    let router = EdgeRouter::new(config);

    match router.route("/services", None, Some("es")) {
        RouteDecision::Redirect(redirect) => assert_eq!(redirect.location, "/en/services"),
        other => panic!("expected redirect, got {:?}", other),
    }

    // fr is no longer live, so /fr/... is not canonical
    match router.route("/fr/blog", None, None) {
        RouteDecision::Redirect(redirect) => assert_eq!(redirect.location, "/en/fr/blog"),
        other => panic!("expected redirect, got {:?}", other),
    }
}
