// crates/ccp-extract/src/canonical.rs
//
// Text and token canonicalization. All functions are pure; `normalize` is
// idempotent: normalize(normalize(x)) == normalize(x).

use std::sync::OnceLock;

use chrono::NaiveDate;
use regex::Regex;

/// Numeric/currency token pattern: optional currency sign, digits with
/// optional thousands separators and decimals, optional percent sign.
fn num_pattern() -> &'static Regex {
    static NUM_RE: OnceLock<Regex> = OnceLock::new();
    NUM_RE.get_or_init(|| {
        Regex::new(r"^[$€£]?\d{1,3}(?:[,\d]*)?(?:\.\d+)?%?$").expect("static regex")
    })
}

/// Date formats a single token can carry.
const DATE_FORMATS: [&str; 3] = ["%Y-%m-%d", "%d/%m/%Y", "%m/%d/%Y"];

/// Collapse internal whitespace runs to single spaces, trim, and map
/// typographic dashes (em dash, en dash, minus sign) to ASCII hyphen.
pub fn normalize(text: &str) -> String {
    let dashed: String = text
        .chars()
        .map(|c| match c {
            '\u{2014}' | '\u{2013}' | '\u{2212}' => '-',
            other => other,
        })
        .collect();
    dashed.split_whitespace().collect::<Vec<&str>>().join(" ")
}

/// Canonicalize one token: numeric/currency patterns map to `#NUM`, parseable
/// dates map to their ISO-8601 form, everything else is lower-cased.
pub fn canonicalize_token(token: &str) -> String {
    if num_pattern().is_match(token) {
        return "#NUM".to_string();
    }
    for format in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(token, format) {
            return date.format("%Y-%m-%d").to_string();
        }
    }
    token.to_lowercase()
}

/// Strip trailing sentence punctuation (`.`, `!`, `?`) and surrounding
/// whitespace from a clause. The simple-mode canonical key form.
pub fn strip_terminal_punctuation(clause: &str) -> String {
    clause
        .trim()
        .trim_end_matches(['.', '!', '?'])
        .trim()
        .to_string()
}
