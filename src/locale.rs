//! Locale tags and locale-aware currency formatting.
//!
//! Output follows the browser's `Intl.NumberFormat` in currency style with a
//! minimum of zero fraction digits, for the locales listed in
//! `NUMBER_STYLES`. Unlisted locales fall back to their language's first
//! entry, then to `en-US`.

use log::debug;
use std::fmt;

const NBSP: &str = "\u{a0}";
const NARROW_NBSP: &str = "\u{202f}";

/// BCP-47 locale tag, normalized from the `en_US` form pages carry.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Locale(String);

impl Locale {
    /// Normalizes a page or request locale. Tags with anything other than
    /// ASCII letters and digits in their subtags fall back to `en-US`.
    pub fn from_attribute(raw: &str) -> Self {
        let parts: Vec<&str> = raw
            .trim()
            .split(['_', '-'])
            .filter(|part| !part.is_empty())
            .collect();

        if parts.is_empty() {
            return Self::default();
        }
        if parts
            .iter()
            .any(|part| !part.chars().all(|c| c.is_ascii_alphanumeric()))
        {
            debug!("Ignoring malformed locale {:?}", raw);
            return Self::default();
        }

        let tag = parts
            .iter()
            .enumerate()
            .map(|(position, part)| match (position, part.len()) {
                (0, _) => part.to_ascii_lowercase(),
                (_, 2) => part.to_ascii_uppercase(),
                (_, 4) => title_case(part),
                _ => part.to_string(),
            })
            .collect::<Vec<_>>()
            .join("-");

        Self(tag)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn language(&self) -> &str {
        self.0.split('-').next().unwrap_or_default()
    }
}

fn title_case(subtag: &str) -> String {
    let mut chars = subtag.chars();
    match chars.next() {
        Some(first) => {
            let mut out = first.to_ascii_uppercase().to_string();
            out.push_str(&chars.as_str().to_ascii_lowercase());
            out
        }
        None => String::new(),
    }
}

impl Default for Locale {
    fn default() -> Self {
        Self("en-US".to_string())
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SymbolPlacement {
    Prefix,
    PrefixSpace,
    SuffixSpace,
}

#[derive(Debug)]
struct NumberStyle {
    locale: &'static str,
    decimal: &'static str,
    group: &'static str,
    min_grouping: usize,
    placement: SymbolPlacement,
}

impl NumberStyle {
    const fn new(
        locale: &'static str,
        decimal: &'static str,
        group: &'static str,
        min_grouping: usize,
        placement: SymbolPlacement,
    ) -> Self {
        Self { locale, decimal, group, min_grouping, placement }
    }
}

const NUMBER_STYLES: &[NumberStyle] = &[
    NumberStyle::new("en-US", ".", ",", 1, SymbolPlacement::Prefix),
    NumberStyle::new("en-GB", ".", ",", 1, SymbolPlacement::Prefix),
    NumberStyle::new("en-CA", ".", ",", 1, SymbolPlacement::Prefix),
    NumberStyle::new("en-AU", ".", ",", 1, SymbolPlacement::Prefix),
    NumberStyle::new("en-NZ", ".", ",", 1, SymbolPlacement::Prefix),
    NumberStyle::new("en-IE", ".", ",", 1, SymbolPlacement::Prefix),
    NumberStyle::new("de-DE", ",", ".", 1, SymbolPlacement::SuffixSpace),
    NumberStyle::new("de-CH", ".", "\u{2019}", 1, SymbolPlacement::PrefixSpace),
    NumberStyle::new("fr-FR", ",", NARROW_NBSP, 1, SymbolPlacement::SuffixSpace),
    NumberStyle::new("fr-CA", ",", NBSP, 1, SymbolPlacement::SuffixSpace),
    NumberStyle::new("es-ES", ",", ".", 2, SymbolPlacement::SuffixSpace),
    NumberStyle::new("es-MX", ".", ",", 1, SymbolPlacement::Prefix),
    NumberStyle::new("it-IT", ",", ".", 1, SymbolPlacement::SuffixSpace),
    NumberStyle::new("nl-NL", ",", ".", 1, SymbolPlacement::PrefixSpace),
    NumberStyle::new("pt-BR", ",", ".", 1, SymbolPlacement::PrefixSpace),
    NumberStyle::new("pt-PT", ",", NBSP, 2, SymbolPlacement::SuffixSpace),
    NumberStyle::new("pl-PL", ",", NBSP, 2, SymbolPlacement::SuffixSpace),
    NumberStyle::new("sv-SE", ",", NBSP, 1, SymbolPlacement::SuffixSpace),
    NumberStyle::new("da-DK", ",", ".", 1, SymbolPlacement::SuffixSpace),
    NumberStyle::new("ja-JP", ".", ",", 1, SymbolPlacement::Prefix),
    NumberStyle::new("zh-CN", ".", ",", 1, SymbolPlacement::Prefix),
];

const CURRENCY_SYMBOLS: &[(&str, &str)] = &[
    ("USD", "$"),
    ("EUR", "€"),
    ("GBP", "£"),
    ("JPY", "¥"),
    ("CAD", "CA$"),
    ("AUD", "A$"),
    ("NZD", "NZ$"),
    ("MXN", "MX$"),
    ("BRL", "R$"),
    ("CNY", "CN¥"),
    ("INR", "₹"),
    ("HKD", "HK$"),
    ("TWD", "NT$"),
    ("ILS", "₪"),
    ("KRW", "₩"),
    ("VND", "₫"),
    ("CHF", "CHF"),
    ("SEK", "SEK"),
    ("NOK", "NOK"),
    ("DKK", "DKK"),
    ("PLN", "PLN"),
    ("CZK", "CZK"),
    ("HUF", "HUF"),
    ("ZAR", "ZAR"),
    ("RUB", "RUB"),
    ("THB", "THB"),
    ("TRY", "TRY"),
];

// (locale, currency, symbol)
const LOCAL_SYMBOLS: &[(&str, &str, &str)] = &[
    ("en-CA", "CAD", "$"),
    ("en-CA", "USD", "US$"),
    ("en-AU", "AUD", "$"),
    ("en-AU", "USD", "USD"),
    ("en-NZ", "NZD", "$"),
    ("en-NZ", "USD", "US$"),
    ("fr-CA", "CAD", "$"),
    ("fr-CA", "USD", "$\u{a0}US"),
    ("es-MX", "MXN", "$"),
    ("es-MX", "USD", "USD"),
    ("pt-BR", "USD", "US$"),
    ("ja-JP", "JPY", "￥"),
    ("ja-JP", "CNY", "元"),
    ("zh-CN", "CNY", "¥"),
    ("zh-CN", "JPY", "JP¥"),
    ("sv-SE", "SEK", "kr"),
    ("sv-SE", "USD", "US$"),
    ("da-DK", "DKK", "kr."),
    ("da-DK", "USD", "US$"),
    ("pl-PL", "PLN", "zł"),
    ("pl-PL", "USD", "USD"),
];

const ZERO_DECIMAL_CURRENCIES: &[&str] = &["JPY", "KRW", "ISK", "CLP", "VND"];

fn resolve_style(locale: &Locale) -> &'static NumberStyle {
    NUMBER_STYLES
        .iter()
        .find(|style| style.locale == locale.as_str())
        .or_else(|| {
            NUMBER_STYLES
                .iter()
                .find(|style| style.locale.split('-').next() == Some(locale.language()))
        })
        .unwrap_or(&NUMBER_STYLES[0])
}

fn lookup_symbol(locale: &str, iso: &str) -> Option<&'static str> {
    LOCAL_SYMBOLS
        .iter()
        .find(|(l, c, _)| *l == locale && *c == iso)
        .map(|(_, _, symbol)| *symbol)
        .or_else(|| {
            CURRENCY_SYMBOLS
                .iter()
                .find(|(c, _)| *c == iso)
                .map(|(_, symbol)| *symbol)
        })
}

/// Formats amounts of one currency for one locale.
#[derive(Debug, Clone)]
pub struct CurrencyFormatter {
    style: &'static NumberStyle,
    symbol: String,
    localized_symbol: bool,
    fraction_digits: usize,
}

impl CurrencyFormatter {
    /// `fallback_symbol` is used when the locale data has no symbol for
    /// `iso`.
    pub fn new(locale: &Locale, iso: &str, fallback_symbol: &str) -> Self {
        let style = resolve_style(locale);
        let iso = iso.to_ascii_uppercase();
        let localized = lookup_symbol(style.locale, &iso);
        if localized.is_none() {
            debug!(
                "No {} symbol for {}, falling back to {:?}",
                style.locale, iso, fallback_symbol
            );
        }
        let fraction_digits = if ZERO_DECIMAL_CURRENCIES.contains(&iso.as_str()) { 0 } else { 2 };

        Self {
            style,
            symbol: localized.unwrap_or(fallback_symbol).to_string(),
            localized_symbol: localized.is_some(),
            fraction_digits,
        }
    }

    /// Locale the formatter resolved to.
    pub fn resolved_locale(&self) -> &'static str {
        self.style.locale
    }

    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    pub fn has_localized_symbol(&self) -> bool {
        self.localized_symbol
    }

    pub fn format(&self, amount: f64) -> String {
        let number = self.format_number(amount.abs());
        let sign = if amount < 0.0 { "-" } else { "" };
        match self.style.placement {
            SymbolPlacement::Prefix => format!("{}{}{}", sign, self.symbol, number),
            SymbolPlacement::PrefixSpace => format!("{}{}{}{}", sign, self.symbol, NBSP, number),
            SymbolPlacement::SuffixSpace => format!("{}{}{}{}", sign, number, NBSP, self.symbol),
        }
    }

    fn format_number(&self, amount: f64) -> String {
        let factor = 10f64.powi(self.fraction_digits as i32);
        let rounded = (amount * factor).round() / factor;
        let digits = format!("{:.*}", self.fraction_digits, rounded);
        let (integer, fraction) = match digits.split_once('.') {
            Some((integer, fraction)) => (integer, fraction.trim_end_matches('0')),
            None => (digits.as_str(), ""),
        };

        let mut out = self.group_digits(integer);
        if !fraction.is_empty() {
            out.push_str(self.style.decimal);
            out.push_str(fraction);
        }
        out
    }

    fn group_digits(&self, integer: &str) -> String {
        if integer.len() < 3 + self.style.min_grouping {
            return integer.to_string();
        }
        let mut out = String::with_capacity(integer.len() * 2);
        for (position, digit) in integer.chars().enumerate() {
            let remaining = integer.len() - position;
            if position > 0 && remaining % 3 == 0 {
                out.push_str(self.style.group);
            }
            out.push(digit);
        }
        out
    }
}
