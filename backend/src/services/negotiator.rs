//! Accept-Language negotiation
//!
//! Picks the best supported locale for an `Accept-Language` header. Only the
//! 2-letter primary code of each tag is considered; region and script
//! subtags are discarded.

use std::cmp::Ordering;

use crate::models::{Locale, LocaleConfig, LocaleQualityEntry};

/// Parse a header into entries ordered by descending quality.
///
/// Ties keep header order. Segments with an empty or wildcard tag are
/// dropped; an unparseable `q` value counts as quality 0.
pub fn parse_accept_language(header: &str) -> Vec<LocaleQualityEntry> {
    let mut entries: Vec<LocaleQualityEntry> = header.split(',').filter_map(parse_segment).collect();

    // `sort_by` is stable
    entries.sort_by(|a, b| b.quality.partial_cmp(&a.quality).unwrap_or(Ordering::Equal));
    entries
}

fn parse_segment(segment: &str) -> Option<LocaleQualityEntry> {
    let mut parts = segment.split(';');
    let tag = parts.next()?.trim();
    if tag.is_empty() || tag == "*" {
        return None;
    }

    let quality = parts
        .filter_map(|param| param.split_once('='))
        .find(|(key, _)| key.trim().eq_ignore_ascii_case("q"))
        .map(|(_, value)| parse_quality(value))
        .unwrap_or(1.0);

    let code = tag.chars().take(2).collect::<String>().to_lowercase();

    Some(LocaleQualityEntry { code, quality })
}

fn parse_quality(value: &str) -> f32 {
    value
        .trim()
        .parse::<f32>()
        .ok()
        .filter(|q| q.is_finite())
        .map(|q| q.clamp(0.0, 1.0))
        .unwrap_or(0.0)
}

/// Best supported locale for the header, or the configured default.
pub fn negotiate(accept_language: &str, locales: &LocaleConfig) -> Locale {
    if accept_language.trim().is_empty() {
        return locales.default_locale();
    }

    parse_accept_language(accept_language)
        .iter()
        // q=0 means "not acceptable"
        .filter(|entry| entry.quality > 0.0)
        .find_map(|entry| locales.find(&entry.code))
        .unwrap_or_else(|| locales.default_locale())
}

/// [`negotiate`] for a header that may be missing.
pub fn negotiate_header(accept_language: Option<&str>, locales: &LocaleConfig) -> Locale {
    match accept_language {
        Some(value) => negotiate(value, locales),
        None => locales.default_locale(),
    }
}
