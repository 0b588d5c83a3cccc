//! Locale canonicalization, text-direction lookup, and week parameters.
//!
//! ## Usage
//!
//! Resolve a [`LocaleRequest`] once per widget and hand the resulting
//! [`ResolvedLocale`] to the grid builder and keyboard mapper.
use smallvec::SmallVec;

use crate::date::{WeekScheme, Weekday};

/// Locale used when the request is absent or entirely malformed.
pub const DEFAULT_LOCALE: &str = "en-US";

/// A locale preference, most preferred first.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum LocaleRequest {
    /// No preference; the default locale applies.
    #[default]
    Default,
    /// A single BCP 47 tag.
    Single(String),
    /// An ordered list of BCP 47 tags.
    List(Vec<String>),
}

impl From<&str> for LocaleRequest {
    fn from(tag: &str) -> Self {
        LocaleRequest::Single(tag.to_string())
    }
}

impl From<String> for LocaleRequest {
    fn from(tag: String) -> Self {
        LocaleRequest::Single(tag)
    }
}

impl From<Vec<String>> for LocaleRequest {
    fn from(tags: Vec<String>) -> Self {
        LocaleRequest::List(tags)
    }
}

impl From<&[&str]> for LocaleRequest {
    fn from(tags: &[&str]) -> Self {
        LocaleRequest::List(tags.iter().map(|t| t.to_string()).collect())
    }
}

/// The outcome of locale resolution: canonical tags plus derived layout
/// parameters. Never mutated in place; recompute when the request changes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedLocale {
    tags: SmallVec<[String; 2]>,
    right_to_left: bool,
    week: WeekScheme,
}

impl ResolvedLocale {
    /// Resolves a locale request deterministically.
    ///
    /// Malformed tags are skipped; if nothing survives, the default locale
    /// is used instead of failing.
    pub fn resolve(request: &LocaleRequest) -> Self {
        let mut tags: SmallVec<[String; 2]> = SmallVec::new();
        let raw: &[String] = match request {
            LocaleRequest::Default => &[],
            LocaleRequest::Single(tag) => std::slice::from_ref(tag),
            LocaleRequest::List(list) => list,
        };
        for tag in raw {
            match canonicalize_tag(tag) {
                Some(canonical) => tags.push(canonical),
                None => tracing::warn!(tag, "skipping malformed locale tag"),
            }
        }
        if tags.is_empty() {
            if !matches!(request, LocaleRequest::Default) {
                tracing::warn!(locale = DEFAULT_LOCALE, "falling back to default locale");
            }
            tags.push(DEFAULT_LOCALE.to_string());
        }

        let right_to_left = tags.iter().any(|tag| is_rtl_tag(tag));
        let week = week_scheme_for(&tags[0]);
        Self {
            tags,
            right_to_left,
            week,
        }
    }

    /// Returns the canonical tags, most preferred first. Never empty.
    pub fn tags(&self) -> &[String] {
        &self.tags
    }

    /// Returns whether the locale is written right to left.
    pub fn right_to_left(&self) -> bool {
        self.right_to_left
    }

    /// Returns the week start and numbering parameters.
    pub fn week(&self) -> WeekScheme {
        self.week
    }
}

impl Default for ResolvedLocale {
    fn default() -> Self {
        ResolvedLocale::resolve(&LocaleRequest::Default)
    }
}

/// Normalizes subtag casing per BCP 47: language lowercase, script
/// titlecase, region uppercase. Returns `None` for malformed tags.
fn canonicalize_tag(raw: &str) -> Option<String> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    let mut parts = Vec::new();
    for (index, subtag) in raw.split('-').enumerate() {
        if subtag.is_empty() || subtag.len() > 8 || !subtag.chars().all(|c| c.is_ascii_alphanumeric())
        {
            return None;
        }
        let canonical = if index == 0 {
            // Primary language subtag: 2-3 letters.
            if subtag.len() > 3 || !subtag.chars().all(|c| c.is_ascii_alphabetic()) {
                return None;
            }
            subtag.to_ascii_lowercase()
        } else if subtag.len() == 4 && subtag.chars().all(|c| c.is_ascii_alphabetic()) {
            // Script subtag.
            let mut chars = subtag.chars();
            let first = chars.next()?.to_ascii_uppercase();
            let rest: String = chars.map(|c| c.to_ascii_lowercase()).collect();
            format!("{first}{rest}")
        } else if (subtag.len() == 2 && subtag.chars().all(|c| c.is_ascii_alphabetic()))
            || (subtag.len() == 3 && subtag.chars().all(|c| c.is_ascii_digit()))
        {
            // Region subtag.
            subtag.to_ascii_uppercase()
        } else {
            subtag.to_ascii_lowercase()
        };
        parts.push(canonical);
    }
    Some(parts.join("-"))
}

/// Returns whether a canonical tag, or its primary language subtag, names a
/// right-to-left locale.
fn is_rtl_tag(tag: &str) -> bool {
    let primary = tag.split('-').next().unwrap_or(tag);
    matches!(
        primary,
        "ar" | "he" | "iw" | "fa" | "ur" | "yi" | "ps" | "sd" | "ug" | "ku" | "dv" | "ks" | "arc"
    )
}

/// Derives week parameters from the most-preferred canonical tag.
fn week_scheme_for(tag: &str) -> WeekScheme {
    let mut subtags = tag.split('-');
    let language = subtags.next().unwrap_or(tag);
    let region = subtags.find(|s| s.len() == 2 && s.chars().all(|c| c.is_ascii_uppercase()));

    let first_day = match region {
        Some(region) => first_day_for_region(region),
        None => first_day_for_language(language),
    };
    let min_days_in_first_week = if first_day == Weekday::Monday { 4 } else { 1 };
    WeekScheme {
        first_day,
        min_days_in_first_week,
    }
}

fn first_day_for_region(region: &str) -> Weekday {
    match region {
        // Saturday-first regions.
        "AE" | "AF" | "BH" | "DJ" | "DZ" | "EG" | "IQ" | "IR" | "JO" | "KW" | "LY" | "OM"
        | "QA" | "SA" | "SD" | "SY" | "YE" => Weekday::Saturday,
        // Sunday-first regions.
        "US" | "CA" | "MX" | "BR" | "CO" | "PE" | "VE" | "JP" | "KR" | "TW" | "HK" | "MO"
        | "IL" | "IN" | "PH" | "TH" | "ZA" | "ET" | "GT" | "HN" | "NI" | "PA" | "PR" | "SV"
        | "DO" => Weekday::Sunday,
        _ => Weekday::Monday,
    }
}

fn first_day_for_language(language: &str) -> Weekday {
    match language {
        "ar" | "fa" | "ps" | "dv" => Weekday::Saturday,
        "en" | "es" | "pt" | "ja" | "ko" | "zh" | "he" | "iw" | "hi" | "th" | "fil" => {
            Weekday::Sunday
        }
        _ => Weekday::Monday,
    }
}
